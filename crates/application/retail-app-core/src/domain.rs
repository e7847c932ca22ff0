use std::time::Duration;

use chrono::{DateTime, Utc};
use retail_core::{FindableProduct, FoundStatus, Product};
use serde::{Deserialize, Serialize};

use crate::app_core::Action;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSettings {
    pub customer: String,
    pub instructions: Vec<String>,
    pub delivery_location_choices: Vec<String>,
    pub unknown_location: String,
    pub canceled_closing_instruction: String,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            customer: retail_config::DEFAULT_CUSTOMER.to_string(),
            instructions: retail_config::DEFAULT_INSTRUCTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            delivery_location_choices: retail_config::DELIVERY_LOCATION_CHOICES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            unknown_location: retail_config::UNKNOWN_LOCATION.to_string(),
            canceled_closing_instruction: retail_config::CANCELED_CLOSING_INSTRUCTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotStartedState {
    pub customer: String,
    pub instructions: Vec<String>,
    pub order_id: String,
    pub products: Vec<Product>,
    pub start_action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FindProductsState {
    pub customer: String,
    pub instructions: Vec<String>,
    pub focused_instruction_index: usize,
    pub order_id: String,
    pub findable_products: Vec<FindableProduct>,
    pub start_time: DateTime<Utc>,
    pub next_action: Option<Action>,
}

impl FindProductsState {
    pub fn count_with(&self, status: FoundStatus) -> usize {
        self.findable_products
            .iter()
            .filter(|p| p.status == status)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChooseDeliveryLocationState {
    pub customer: String,
    pub instructions: Vec<String>,
    pub focused_instruction_index: usize,
    pub order_id: String,
    /// Only the products marked found.
    pub products: Vec<Product>,
    pub number_of_products_requested: usize,
    pub delivery_location_choices: Vec<String>,
    pub delivery_location_preference: Option<String>,
    pub start_time: DateTime<Utc>,
    pub next_action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedState {
    pub customer: String,
    pub instructions: Vec<String>,
    pub focused_instruction_index: usize,
    pub order_id: String,
    pub delivery_location: String,
    pub products: Vec<Product>,
    pub number_of_products_requested: usize,
    pub time_completed: DateTime<Utc>,
    pub elapsed_time: Duration,
    pub done_action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanceledState {
    pub customer: String,
    pub instructions: Vec<String>,
    pub focused_instruction_index: usize,
    pub order_id: String,
    pub time_completed: DateTime<Utc>,
    pub elapsed_time: Duration,
    pub done_action: Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StateKind {
    Initial,
    NotStarted,
    FindProducts,
    ChooseDeliveryLocation,
    Completed,
    Canceled,
}

/// The fulfillment workflow. Exactly one variant is current; transitions
/// replace the whole value.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum WorkflowState {
    #[default]
    Initial,
    NotStarted(NotStartedState),
    FindProducts(FindProductsState),
    ChooseDeliveryLocation(ChooseDeliveryLocationState),
    Completed(CompletedState),
    Canceled(CanceledState),
}

impl WorkflowState {
    pub fn kind(&self) -> StateKind {
        match self {
            WorkflowState::Initial => StateKind::Initial,
            WorkflowState::NotStarted(_) => StateKind::NotStarted,
            WorkflowState::FindProducts(_) => StateKind::FindProducts,
            WorkflowState::ChooseDeliveryLocation(_) => StateKind::ChooseDeliveryLocation,
            WorkflowState::Completed(_) => StateKind::Completed,
            WorkflowState::Canceled(_) => StateKind::Canceled,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkflowState::Completed(_) | WorkflowState::Canceled(_)
        )
    }

    /// The action the current screen offers to move forward, if any.
    pub fn next_action(&self) -> Option<&Action> {
        match self {
            WorkflowState::Initial => None,
            WorkflowState::NotStarted(s) => Some(&s.start_action),
            WorkflowState::FindProducts(s) => s.next_action.as_ref(),
            WorkflowState::ChooseDeliveryLocation(s) => s.next_action.as_ref(),
            WorkflowState::Completed(s) => Some(&s.done_action),
            WorkflowState::Canceled(s) => Some(&s.done_action),
        }
    }
}
