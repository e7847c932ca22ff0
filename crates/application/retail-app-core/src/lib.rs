pub mod app_core;
pub mod domain;
pub mod kernel;
pub mod ports;
pub mod viewmodel;

pub use app_core::*;
pub use domain::{
    CanceledState, ChooseDeliveryLocationState, CompletedState, FindProductsState,
    NotStartedState, StateKind, WorkflowSettings, WorkflowState,
};
pub use kernel::{ActionEvaluating, Evaluation, Evaluator, ViewCycleEvaluating};
pub use ports::*;
pub use viewmodel::*;
