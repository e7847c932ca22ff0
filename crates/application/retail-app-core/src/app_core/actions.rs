use retail_core::Product;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Something an evaluator can be asked to do.
///
/// The breadcrumb is logged before the action is applied.
pub trait EvaluatorAction: std::fmt::Debug {
    fn breadcrumb_description(&self) -> String {
        format!("{self:?}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "with", rename_all = "camelCase")]
pub enum Action {
    // Advancing between states
    StartOrder,
    AdvanceToDelivery,
    AdvanceToCompleted,
    AdvanceToCanceled,
    Done,

    // Option toggling
    ToggleOption(String),

    // Product finding
    ToggleProductFound(Product),
    ToggleProductNotFound(Product),
}

impl EvaluatorAction for Action {
    fn breadcrumb_description(&self) -> String {
        match self {
            Action::StartOrder => "startOrder".into(),
            Action::AdvanceToDelivery => "advanceToDelivery".into(),
            Action::AdvanceToCompleted => "advanceToCompleted".into(),
            Action::AdvanceToCanceled => "advanceToCanceled".into(),
            Action::Done => "done".into(),
            Action::ToggleOption(option) => format!("toggleOption({option})"),
            Action::ToggleProductFound(p) => format!("toggleProductFound({})", p.upc),
            Action::ToggleProductNotFound(p) => format!("toggleProductNotFound({})", p.upc),
        }
    }
}

/// A labelled action with an enabled flag, e.g. the bottom button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedEnabledAction<A = Action> {
    pub id: Uuid,
    pub name: String,
    pub enabled: bool,
    pub action: A,
}

impl<A: EvaluatorAction> NamedEnabledAction<A> {
    pub fn new(name: impl Into<String>, enabled: bool, action: A) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            enabled,
            action,
        }
    }
}
