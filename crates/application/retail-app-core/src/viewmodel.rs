use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local, Utc};
use retail_core::{FindableProduct, FoundStatus, Product};
use serde::Serialize;

use crate::app_core::{Action, NamedEnabledAction, Observable, Please};
use crate::domain::{
    CanceledState, ChooseDeliveryLocationState, CompletedState, FindProductsState,
    NotStartedState, WorkflowState,
};

pub const START_LABEL: &str = "Start";
pub const NEXT_LABEL: &str = "Next";
pub const CANCEL_ORDER_LABEL: &str = "Cancel Order";
pub const DELIVER_LABEL: &str = "Deliver and Notify Customer";
pub const DONE_LABEL: &str = "Done";

pub const CANCELED_FEEDBACK: &str =
    "The customer has been notified that their order cannot be fulfilled.";

const LONG_DATETIME_FORMAT: &str = "%B %-d, %Y at %-I:%M:%S %p %:z";

pub fn pluralized_product(count: usize) -> &'static str {
    if count == 1 {
        "product"
    } else {
        "products"
    }
}

pub fn title_for(customer: &str) -> String {
    format!("Order for\n{customer}")
}

pub fn format_long_datetime(ts: DateTime<Utc>, offset: &FixedOffset) -> String {
    ts.with_timezone(offset)
        .format(LONG_DATETIME_FORMAT)
        .to_string()
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Decimal rendering rounded to at most `digits` significant digits, with
/// trailing zeros dropped and thousands grouped.
pub fn format_significant(value: f64, digits: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 || digits == 0 {
        return "0".into();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let scale = digits as i32 - 1 - magnitude;
    let rounded = if scale >= 0 {
        let f = 10f64.powi(scale);
        (value * f).round() / f
    } else {
        let f = 10f64.powi(-scale);
        (value / f).round() * f
    };

    let mut text = format!("{:.*}", scale.max(0) as usize, rounded);
    if text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }

    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    match body.split_once('.') {
        Some((int_part, frac)) => format!("{sign}{}.{frac}", group_thousands(int_part)),
        None => format!("{sign}{}", group_thousands(body)),
    }
}

pub fn format_elapsed(elapsed: Duration) -> String {
    format_significant(
        elapsed.as_secs_f64(),
        retail_config::ELAPSED_SIGNIFICANT_DIGITS,
    )
}

/// Components a screen is built from, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    TopSpace,
    CompletedTitle,
    CanceledTitle,
    CustomerTitle,
    Space,
    Instructions,
    DeliveryOptions,
    Divider,
    Feedback,
    DisplayableProducts,
    CompletedSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayableProduct {
    pub product: Product,
    pub status: Option<FoundStatus>,
}

impl DisplayableProduct {
    pub fn id(&self) -> &str {
        &self.product.upc
    }
}

impl From<&Product> for DisplayableProduct {
    fn from(p: &Product) -> Self {
        Self {
            product: p.clone(),
            status: None,
        }
    }
}

impl From<&FindableProduct> for DisplayableProduct {
    fn from(fp: &FindableProduct) -> Self {
        Self {
            product: fp.product.clone(),
            status: Some(fp.status),
        }
    }
}

/// Point-in-time copy of every display field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayFields {
    pub sections: Vec<Section>,
    pub customer_title: String,
    pub feedback: String,
    pub instructions: Vec<String>,
    pub focused_instruction_index: Option<usize>,
    pub allows_collapsing_and_expanding: bool,
    pub delivery_options: Vec<String>,
    pub delivery_preference: String,
    pub displayable_products: Vec<DisplayableProduct>,
    pub completed_summary: String,
    pub bottom_button: Option<NamedEnabledAction>,
}

/// Projects workflow states into display fields.
///
/// Fields that the current screen does not list in `sections` may hold
/// values from an earlier screen.
#[derive(Debug)]
pub struct Translator {
    pub sections: Observable<Vec<Section>>,
    pub customer_title: Observable<String>,
    pub feedback: Observable<String>,
    pub instructions: Observable<Vec<String>>,
    pub focused_instruction_index: Observable<Option<usize>>,
    pub allows_collapsing_and_expanding: Observable<bool>,
    pub delivery_options: Observable<Vec<String>>,
    pub delivery_preference: Observable<String>,
    pub displayable_products: Observable<Vec<DisplayableProduct>>,
    pub completed_summary: Observable<String>,
    pub bottom_button: Observable<Option<NamedEnabledAction>>,

    pub dismiss: Please,

    offset: FixedOffset,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// Formats timestamps in the machine's current UTC offset.
    pub fn new() -> Self {
        Self::with_offset(*Local::now().offset())
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            sections: Observable::default(),
            customer_title: Observable::default(),
            feedback: Observable::default(),
            instructions: Observable::default(),
            focused_instruction_index: Observable::default(),
            allows_collapsing_and_expanding: Observable::default(),
            delivery_options: Observable::default(),
            delivery_preference: Observable::default(),
            displayable_products: Observable::default(),
            completed_summary: Observable::default(),
            bottom_button: Observable::default(),
            dismiss: Please::new(),
            offset,
        }
    }

    pub fn fields(&self) -> DisplayFields {
        DisplayFields {
            sections: self.sections.get().clone(),
            customer_title: self.customer_title.get().clone(),
            feedback: self.feedback.get().clone(),
            instructions: self.instructions.get().clone(),
            focused_instruction_index: *self.focused_instruction_index.get(),
            allows_collapsing_and_expanding: *self.allows_collapsing_and_expanding.get(),
            delivery_options: self.delivery_options.get().clone(),
            delivery_preference: self.delivery_preference.get().clone(),
            displayable_products: self.displayable_products.get().clone(),
            completed_summary: self.completed_summary.get().clone(),
            bottom_button: self.bottom_button.get().clone(),
        }
    }

    pub fn translate(&self, state: &WorkflowState) {
        tracing::trace!(state = ?state.kind(), "translating");
        match state {
            WorkflowState::Initial => {}
            WorkflowState::NotStarted(s) => self.translate_not_started(s),
            WorkflowState::FindProducts(s) => self.translate_find_products(s),
            WorkflowState::ChooseDeliveryLocation(s) => self.translate_delivery_options(s),
            WorkflowState::Completed(s) => self.translate_completed(s),
            WorkflowState::Canceled(s) => self.translate_canceled(s),
        }
    }

    // --- Not started ---

    fn translate_not_started(&self, s: &NotStartedState) {
        let count = s.products.len();

        self.customer_title.set(title_for(&s.customer));
        self.feedback
            .set(format!("{count} {} requested", pluralized_product(count)));
        self.instructions.set(s.instructions.clone());
        self.focused_instruction_index.set(None);
        self.allows_collapsing_and_expanding.set(false);
        self.displayable_products
            .set(s.products.iter().map(DisplayableProduct::from).collect());

        self.sections.set(vec![
            Section::TopSpace,
            Section::CustomerTitle,
            Section::Space,
            Section::Instructions,
            Section::Divider,
            Section::Feedback,
            Section::Space,
            Section::DisplayableProducts,
        ]);

        self.bottom_button.set(Some(NamedEnabledAction::new(
            START_LABEL,
            true,
            s.start_action.clone(),
        )));
    }

    // --- Finding products ---

    fn translate_find_products(&self, s: &FindProductsState) {
        let found = s.count_with(FoundStatus::Found);

        self.customer_title.set(title_for(&s.customer));
        self.feedback
            .set(format!("{found} {} marked found", pluralized_product(found)));
        self.instructions.set(s.instructions.clone());
        self.focused_instruction_index
            .set(Some(s.focused_instruction_index));
        self.allows_collapsing_and_expanding.set(true);
        self.displayable_products.set(
            s.findable_products
                .iter()
                .map(DisplayableProduct::from)
                .collect(),
        );

        self.sections.set(vec![
            Section::TopSpace,
            Section::CustomerTitle,
            Section::Space,
            Section::Instructions,
            Section::Divider,
            Section::Feedback,
            Section::Space,
            Section::DisplayableProducts,
        ]);

        self.bottom_button.set(s.next_action.clone().map(|action| {
            let name = if action == Action::AdvanceToCanceled {
                CANCEL_ORDER_LABEL
            } else {
                NEXT_LABEL
            };
            NamedEnabledAction::new(name, true, action)
        }));
    }

    // --- Choosing a delivery location ---

    fn translate_delivery_options(&self, s: &ChooseDeliveryLocationState) {
        let requested = s.number_of_products_requested;

        self.customer_title.set(title_for(&s.customer));
        self.feedback.set(format!(
            "{} of {requested} {} found",
            s.products.len(),
            pluralized_product(requested)
        ));
        self.delivery_options
            .set(s.delivery_location_choices.clone());
        self.delivery_preference
            .set(s.delivery_location_preference.clone().unwrap_or_default());
        self.instructions.set(s.instructions.clone());
        self.focused_instruction_index
            .set(Some(s.focused_instruction_index));
        self.allows_collapsing_and_expanding.set(true);
        self.displayable_products
            .set(s.products.iter().map(DisplayableProduct::from).collect());

        self.sections.set(vec![
            Section::TopSpace,
            Section::CustomerTitle,
            Section::Space,
            Section::Instructions,
            Section::DeliveryOptions,
            Section::Divider,
            Section::Feedback,
            Section::Space,
            Section::DisplayableProducts,
        ]);

        self.bottom_button.set(
            s.next_action
                .clone()
                .map(|action| NamedEnabledAction::new(DELIVER_LABEL, true, action)),
        );
    }

    // --- Completed ---

    fn translate_completed(&self, s: &CompletedState) {
        let count = s.products.len();
        let requested = s.number_of_products_requested;

        self.customer_title.set(title_for(&s.customer));
        self.feedback
            .set(format!("{count} {} fulfilled", pluralized_product(count)));
        self.completed_summary.set(format!(
            "Order completed on {}.\n{count} of {requested} {} found.\nTime to complete: {} seconds.",
            format_long_datetime(s.time_completed, &self.offset),
            pluralized_product(requested),
            format_elapsed(s.elapsed_time),
        ));
        self.instructions.set(s.instructions.clone());
        self.focused_instruction_index
            .set(Some(s.focused_instruction_index));
        self.allows_collapsing_and_expanding.set(true);
        self.displayable_products
            .set(s.products.iter().map(DisplayableProduct::from).collect());

        self.sections.set(vec![
            Section::TopSpace,
            Section::CompletedTitle,
            Section::CustomerTitle,
            Section::Space,
            Section::Instructions,
            Section::Divider,
            Section::Feedback,
            Section::Space,
            Section::DisplayableProducts,
            Section::Divider,
            Section::CompletedSummary,
        ]);

        self.bottom_button.set(Some(NamedEnabledAction::new(
            DONE_LABEL,
            true,
            s.done_action.clone(),
        )));
    }

    // --- Canceled ---

    fn translate_canceled(&self, s: &CanceledState) {
        self.customer_title.set(title_for(&s.customer));
        self.feedback.set(CANCELED_FEEDBACK.to_string());
        self.completed_summary.set(format!(
            "Order canceled on {}.\n0 products found.\nTime to complete: {} seconds.",
            format_long_datetime(s.time_completed, &self.offset),
            format_elapsed(s.elapsed_time),
        ));
        self.instructions.set(s.instructions.clone());
        self.focused_instruction_index
            .set(Some(s.focused_instruction_index));
        self.allows_collapsing_and_expanding.set(true);

        self.sections.set(vec![
            Section::TopSpace,
            Section::CanceledTitle,
            Section::CustomerTitle,
            Section::Space,
            Section::Instructions,
            Section::Divider,
            Section::Feedback,
            Section::Space,
            Section::Divider,
            Section::CompletedSummary,
        ]);

        self.bottom_button.set(Some(NamedEnabledAction::new(
            DONE_LABEL,
            true,
            s.done_action.clone(),
        )));
    }
}
