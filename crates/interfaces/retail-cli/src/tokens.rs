//! Typed user intents, e.g. `found:885909918161` or `option:Front Door`.

use std::str::FromStr;

use retail_app_core::{Action, Evaluator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionToken {
    Start,
    Found(String),
    NotFound(String),
    Next,
    Cancel,
    Option(String),
    Complete,
    Done,
    /// Whatever the bottom button currently offers.
    Press,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionParseError {
    #[error("empty action")]
    Empty,
    #[error("unknown action '{0}' (try: start, found:<upc>, not-found:<upc>, next, cancel, option:<name>, complete, done, press)")]
    Unknown(String),
    #[error("'{0}' needs a value, e.g. {0}:<value>")]
    MissingValue(String),
    #[error("no product with UPC {0} in this order")]
    UnknownUpc(String),
}

impl FromStr for ActionToken {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ActionParseError::Empty);
        }

        let (head, value) = match s.split_once(':') {
            Some((h, v)) => (h.trim(), Some(v.trim())),
            None => (s, None),
        };
        let needs_value = |name: &str| -> Result<String, ActionParseError> {
            match value {
                Some(v) if !v.is_empty() => Ok(v.to_string()),
                _ => Err(ActionParseError::MissingValue(name.to_string())),
            }
        };

        match head.to_ascii_lowercase().as_str() {
            "start" => Ok(ActionToken::Start),
            "found" => Ok(ActionToken::Found(needs_value("found")?)),
            "not-found" | "notfound" => Ok(ActionToken::NotFound(needs_value("not-found")?)),
            "next" => Ok(ActionToken::Next),
            "cancel" => Ok(ActionToken::Cancel),
            "option" => Ok(ActionToken::Option(needs_value("option")?)),
            "complete" => Ok(ActionToken::Complete),
            "done" => Ok(ActionToken::Done),
            "press" => Ok(ActionToken::Press),
            other => Err(ActionParseError::Unknown(other.to_string())),
        }
    }
}

impl ActionToken {
    /// Maps the token onto the evaluator's action vocabulary.
    ///
    /// `Press` resolves to `None` when the bottom button is hidden.
    pub fn resolve<C, P>(&self, ev: &Evaluator<C, P>) -> Result<Option<Action>, ActionParseError>
    where
        C: retail_app_core::Clock,
        P: retail_app_core::OrderClaimPort,
    {
        let product = |upc: &str| {
            ev.order()
                .product(upc)
                .cloned()
                .ok_or_else(|| ActionParseError::UnknownUpc(upc.to_string()))
        };

        Ok(match self {
            ActionToken::Start => Some(Action::StartOrder),
            ActionToken::Found(upc) => Some(Action::ToggleProductFound(product(upc)?)),
            ActionToken::NotFound(upc) => Some(Action::ToggleProductNotFound(product(upc)?)),
            ActionToken::Next => Some(Action::AdvanceToDelivery),
            ActionToken::Cancel => Some(Action::AdvanceToCanceled),
            ActionToken::Option(name) => Some(Action::ToggleOption(name.clone())),
            ActionToken::Complete => Some(Action::AdvanceToCompleted),
            ActionToken::Done => Some(Action::Done),
            ActionToken::Press => ev
                .translator()
                .bottom_button
                .get()
                .as_ref()
                .filter(|b| b.enabled)
                .map(|b| b.action.clone()),
        })
    }
}
