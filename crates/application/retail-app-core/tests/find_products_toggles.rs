use retail_app_core::{
    Action, ActionEvaluating, Evaluation, Evaluator, FindProductsState, Translator,
    ViewCycleEvaluating, WorkflowSettings, WorkflowState,
};
use retail_app_core::{SystemClock, UnclaimedOrders};
use retail_core::{FoundStatus, Order, Product};

fn product(upc: &str) -> Product {
    Product {
        title: format!("Item {upc}"),
        upc: upc.to_string(),
        image: String::new(),
        location: "Bin 9Z".to_string(),
    }
}

fn order_of(upcs: &[&str]) -> Order {
    Order {
        id: "42".to_string(),
        products: upcs.iter().map(|u| product(u)).collect(),
    }
}

fn picking(order: Order) -> Evaluator {
    let mut ev = Evaluator::with_ports(
        order,
        WorkflowSettings::default(),
        Translator::new(),
        SystemClock,
        UnclaimedOrders,
    );
    ev.view_did_appear();
    ev.evaluate(Some(Action::StartOrder));
    ev
}

fn find_state(ev: &Evaluator) -> &FindProductsState {
    match ev.state() {
        WorkflowState::FindProducts(s) => s,
        other => panic!("expected FindProducts, got {other:?}"),
    }
}

fn statuses(ev: &Evaluator) -> Vec<FoundStatus> {
    find_state(ev)
        .findable_products
        .iter()
        .map(|p| p.status)
        .collect()
}

#[test]
fn start_order_marks_everything_unknown() {
    for n in [0usize, 1, 4, 7] {
        let upcs: Vec<String> = (0..n).map(|i| format!("{i:012}")).collect();
        let refs: Vec<&str> = upcs.iter().map(String::as_str).collect();
        let ev = picking(order_of(&refs));

        let s = find_state(&ev);
        assert_eq!(s.findable_products.len(), n);
        assert!(s
            .findable_products
            .iter()
            .all(|p| p.status == FoundStatus::Unknown));
        assert_eq!(s.focused_instruction_index, 1);
        assert_eq!(s.next_action, None);
    }
}

#[test]
fn double_toggle_found_returns_to_unknown() {
    let mut ev = picking(order_of(&["1", "2"]));
    let p = product("1");

    ev.evaluate(Some(Action::ToggleProductFound(p.clone())));
    assert_eq!(statuses(&ev), vec![FoundStatus::Found, FoundStatus::Unknown]);

    ev.evaluate(Some(Action::ToggleProductFound(p)));
    assert_eq!(statuses(&ev), vec![FoundStatus::Unknown, FoundStatus::Unknown]);
}

#[test]
fn found_then_not_found_ends_not_found() {
    let mut ev = picking(order_of(&["1", "2"]));
    let p = product("2");

    ev.evaluate(Some(Action::ToggleProductFound(p.clone())));
    ev.evaluate(Some(Action::ToggleProductNotFound(p)));

    assert_eq!(statuses(&ev), vec![FoundStatus::Unknown, FoundStatus::NotFound]);
}

#[test]
fn next_action_rule_holds_for_every_assignment() {
    use FoundStatus::*;
    let all = [Unknown, Found, NotFound];
    let upcs = ["a", "b", "c"];

    for x in all {
        for y in all {
            for z in all {
                let mut ev = picking(order_of(&upcs));
                for (upc, target) in upcs.iter().zip([x, y, z]) {
                    let action = match target {
                        Unknown => continue,
                        Found => Action::ToggleProductFound(product(upc)),
                        NotFound => Action::ToggleProductNotFound(product(upc)),
                    };
                    assert_eq!(ev.evaluate(Some(action)), Evaluation::Transitioned);
                }

                let targets = [x, y, z];
                assert_eq!(statuses(&ev), targets.to_vec());

                let expected = if targets.contains(&Unknown) {
                    None
                } else if targets.iter().all(|s| *s == NotFound) {
                    Some(Action::AdvanceToCanceled)
                } else {
                    Some(Action::AdvanceToDelivery)
                };
                assert_eq!(
                    find_state(&ev).next_action,
                    expected,
                    "assignment {targets:?}"
                );
            }
        }
    }
}

#[test]
fn unknown_upc_is_ignored() {
    let mut ev = picking(order_of(&["1"]));
    let before = ev.state().clone();

    let outcome = ev.evaluate(Some(Action::ToggleProductFound(product("999"))));

    assert_eq!(outcome, Evaluation::Ignored);
    assert_eq!(*ev.state(), before);
}

#[test]
fn toggle_carries_only_the_upc_identity() {
    // A stale title or location on the action does not leak into state.
    let mut ev = picking(order_of(&["1"]));
    let mut stale = product("1");
    stale.title = "Renamed".into();

    ev.evaluate(Some(Action::ToggleProductFound(stale)));

    let s = find_state(&ev);
    assert_eq!(s.findable_products[0].product.title, "Item 1");
    assert_eq!(s.findable_products[0].status, FoundStatus::Found);
}

#[test]
fn duplicate_upcs_are_all_updated() {
    // Orders are not re-validated here; every matching entry flips.
    let mut ev = picking(order_of(&["dup", "other", "dup"]));

    ev.evaluate(Some(Action::ToggleProductFound(product("dup"))));

    assert_eq!(
        statuses(&ev),
        vec![FoundStatus::Found, FoundStatus::Unknown, FoundStatus::Found]
    );
}

#[test]
fn products_requested_counts_the_findable_list() {
    let mut ev = picking(order_of(&["1", "2", "3"]));
    ev.evaluate(Some(Action::ToggleProductFound(product("1"))));
    ev.evaluate(Some(Action::ToggleProductNotFound(product("2"))));
    // "3" stays unknown; advancing is still accepted from this state.
    ev.evaluate(Some(Action::AdvanceToDelivery));

    match ev.state() {
        WorkflowState::ChooseDeliveryLocation(s) => {
            assert_eq!(s.number_of_products_requested, 3);
            assert_eq!(s.products, vec![product("1")]);
            assert_eq!(s.delivery_location_preference, None);
            assert_eq!(s.next_action, None);
            assert_eq!(s.focused_instruction_index, 2);
        }
        other => panic!("expected ChooseDeliveryLocation, got {other:?}"),
    }
}
