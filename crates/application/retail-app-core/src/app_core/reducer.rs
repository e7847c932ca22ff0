use std::time::Duration;

use chrono::{DateTime, Utc};
use retail_core::{FindableProduct, FoundStatus, Order};

use crate::domain::{
    CanceledState, ChooseDeliveryLocationState, CompletedState, FindProductsState,
    NotStartedState, WorkflowSettings, WorkflowState,
};

use super::actions::Action;

/// Inputs a transition may read besides the current state.
#[derive(Debug, Clone, Copy)]
pub struct ReduceContext<'a> {
    pub now: DateTime<Utc>,
    pub settings: &'a WorkflowSettings,
}

/// Seeds `NotStarted` from the order. Only valid while `Initial`.
pub fn appear(
    state: &WorkflowState,
    order: &Order,
    settings: &WorkflowSettings,
) -> Option<WorkflowState> {
    if !matches!(state, WorkflowState::Initial) {
        return None;
    }

    Some(WorkflowState::NotStarted(NotStartedState {
        customer: settings.customer.clone(),
        instructions: settings.instructions.clone(),
        order_id: order.id.clone(),
        products: order.products.clone(),
        start_action: Action::StartOrder,
    }))
}

/// Computes the state that follows `action`, or `None` when the action does
/// not apply to the current variant.
///
/// `Done` never produces a state; dismissal is handled by the evaluator.
pub fn reduce(
    state: &WorkflowState,
    action: &Action,
    ctx: &ReduceContext<'_>,
) -> Option<WorkflowState> {
    match (state, action) {
        (WorkflowState::NotStarted(s), Action::StartOrder) => Some(start_order(s, ctx.now)),

        (WorkflowState::FindProducts(s), Action::ToggleProductFound(p)) => {
            toggle_product(s, &p.upc, FoundStatus::toggled_found)
        }
        (WorkflowState::FindProducts(s), Action::ToggleProductNotFound(p)) => {
            toggle_product(s, &p.upc, FoundStatus::toggled_not_found)
        }
        (WorkflowState::FindProducts(s), Action::AdvanceToDelivery) => {
            Some(advance_to_delivery(s, ctx.settings))
        }
        (WorkflowState::FindProducts(s), Action::AdvanceToCanceled) => {
            Some(advance_to_canceled(s, ctx))
        }

        (WorkflowState::ChooseDeliveryLocation(s), Action::ToggleOption(option)) => {
            Some(toggle_option(s, option))
        }
        (WorkflowState::ChooseDeliveryLocation(s), Action::AdvanceToCompleted) => {
            Some(advance_to_completed(s, ctx))
        }

        _ => None,
    }
}

fn start_order(s: &NotStartedState, now: DateTime<Utc>) -> WorkflowState {
    WorkflowState::FindProducts(FindProductsState {
        customer: s.customer.clone(),
        instructions: s.instructions.clone(),
        focused_instruction_index: retail_config::FIND_PRODUCTS_FOCUS,
        order_id: s.order_id.clone(),
        findable_products: s
            .products
            .iter()
            .cloned()
            .map(FindableProduct::unknown)
            .collect(),
        start_time: now,
        next_action: None,
    })
}

/// Replaces every entry with a matching UPC, each flipped from its own
/// current status. Unknown UPCs leave the state alone.
fn toggle_product(
    s: &FindProductsState,
    upc: &str,
    flip: fn(FoundStatus) -> FoundStatus,
) -> Option<WorkflowState> {
    if !s.findable_products.iter().any(|p| p.upc() == upc) {
        return None;
    }

    let findable_products: Vec<FindableProduct> = s
        .findable_products
        .iter()
        .map(|p| {
            if p.upc() == upc {
                p.with_status(flip(p.status))
            } else {
                p.clone()
            }
        })
        .collect();

    let next_action = next_action_for(&findable_products);

    Some(WorkflowState::FindProducts(FindProductsState {
        findable_products,
        next_action,
        ..s.clone()
    }))
}

/// `None` while anything is still unknown; cancel when nothing was found.
pub fn next_action_for(products: &[FindableProduct]) -> Option<Action> {
    if products.iter().any(|p| p.status == FoundStatus::Unknown) {
        return None;
    }

    if products.iter().all(|p| p.status == FoundStatus::NotFound) {
        Some(Action::AdvanceToCanceled)
    } else {
        Some(Action::AdvanceToDelivery)
    }
}

fn advance_to_delivery(s: &FindProductsState, settings: &WorkflowSettings) -> WorkflowState {
    WorkflowState::ChooseDeliveryLocation(ChooseDeliveryLocationState {
        customer: s.customer.clone(),
        instructions: s.instructions.clone(),
        focused_instruction_index: retail_config::CHOOSE_DELIVERY_FOCUS,
        order_id: s.order_id.clone(),
        products: s
            .findable_products
            .iter()
            .filter(|p| p.status == FoundStatus::Found)
            .map(|p| p.product.clone())
            .collect(),
        number_of_products_requested: s.findable_products.len(),
        delivery_location_choices: settings.delivery_location_choices.clone(),
        delivery_location_preference: None,
        start_time: s.start_time,
        next_action: None,
    })
}

fn advance_to_canceled(s: &FindProductsState, ctx: &ReduceContext<'_>) -> WorkflowState {
    let mut instructions = s.instructions.clone();
    instructions.push(ctx.settings.canceled_closing_instruction.clone());

    WorkflowState::Canceled(CanceledState {
        customer: s.customer.clone(),
        instructions,
        focused_instruction_index: retail_config::TERMINAL_FOCUS,
        order_id: s.order_id.clone(),
        time_completed: ctx.now,
        elapsed_time: elapsed_between(s.start_time, ctx.now),
        done_action: Action::Done,
    })
}

fn toggle_option(s: &ChooseDeliveryLocationState, option: &str) -> WorkflowState {
    let mut next = s.clone();
    if next.delivery_location_preference.as_deref() == Some(option) {
        next.delivery_location_preference = None;
        next.next_action = None;
    } else {
        next.delivery_location_preference = Some(option.to_string());
        next.next_action = Some(Action::AdvanceToCompleted);
    }
    WorkflowState::ChooseDeliveryLocation(next)
}

fn advance_to_completed(
    s: &ChooseDeliveryLocationState,
    ctx: &ReduceContext<'_>,
) -> WorkflowState {
    let delivery_location = s
        .delivery_location_preference
        .clone()
        .unwrap_or_else(|| ctx.settings.unknown_location.clone());

    let mut instructions = s.instructions.clone();
    instructions.push(retail_config::deliver_to_instruction(&delivery_location));

    WorkflowState::Completed(CompletedState {
        customer: s.customer.clone(),
        instructions,
        focused_instruction_index: retail_config::TERMINAL_FOCUS,
        order_id: s.order_id.clone(),
        delivery_location,
        products: s.products.clone(),
        number_of_products_requested: s.number_of_products_requested,
        time_completed: ctx.now,
        elapsed_time: elapsed_between(s.start_time, ctx.now),
        done_action: Action::Done,
    })
}

/// `|now - start|`, whichever order the two instants come in.
pub fn elapsed_between(start: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    let delta = if now >= start { now - start } else { start - now };
    delta.to_std().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use retail_core::fixtures::seed_products;

    fn findable(statuses: &[FoundStatus]) -> Vec<FindableProduct> {
        seed_products()
            .into_iter()
            .zip(statuses)
            .map(|(p, s)| FindableProduct { product: p, status: *s })
            .collect()
    }

    #[test]
    fn next_action_waits_for_every_product() {
        use FoundStatus::*;
        assert_eq!(next_action_for(&findable(&[Found, Unknown])), None);
        assert_eq!(
            next_action_for(&findable(&[NotFound, NotFound])),
            Some(Action::AdvanceToCanceled)
        );
        assert_eq!(
            next_action_for(&findable(&[NotFound, Found])),
            Some(Action::AdvanceToDelivery)
        );
    }

    #[test]
    fn empty_product_list_cancels() {
        assert_eq!(next_action_for(&[]), Some(Action::AdvanceToCanceled));
    }

    #[test]
    fn elapsed_is_absolute() {
        let a = Utc.with_ymd_and_hms(2020, 6, 28, 12, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2020, 6, 28, 12, 1, 30).unwrap();
        assert_eq!(elapsed_between(a, b), Duration::from_secs(90));
        assert_eq!(elapsed_between(b, a), Duration::from_secs(90));
    }

    #[test]
    fn appear_only_from_initial() {
        let settings = WorkflowSettings::default();
        let order = retail_core::fixtures::seed_order();
        let seeded = appear(&WorkflowState::Initial, &order, &settings).unwrap();
        assert!(appear(&seeded, &order, &settings).is_none());
    }
}
