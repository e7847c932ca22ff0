pub mod actions;
pub mod reducer;
pub mod store;

pub use actions::{Action, EvaluatorAction, NamedEnabledAction};
pub use reducer::{appear, next_action_for, reduce, ReduceContext};
pub use store::{Observable, PassableState, Please, SubscriptionId};
