use std::rc::Rc;

use retail_core::Order;

use crate::app_core::{
    appear, reduce, Action, EvaluatorAction, PassableState, ReduceContext, SubscriptionId,
};
use crate::domain::{WorkflowSettings, WorkflowState};
use crate::ports::{Clock, OrderClaimPort, SystemClock, UnclaimedOrders};
use crate::viewmodel::Translator;

/// What `evaluate` did with an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// A new state was assigned and broadcast.
    Transitioned,
    /// Nothing to do: no action, or not valid for the current state.
    Ignored,
    /// The dismiss signal fired; state is unchanged.
    DismissRequested,
}

pub trait ActionEvaluating {
    type Action: EvaluatorAction;

    /// Applies `action` after logging its breadcrumb. `None` is a no-op.
    fn evaluate(&mut self, action: Option<Self::Action>) -> Evaluation {
        match action {
            Some(action) => {
                tracing::debug!(action = %action.breadcrumb_description(), "breadcrumb");
                self.apply(action)
            }
            None => Evaluation::Ignored,
        }
    }

    fn apply(&mut self, action: Self::Action) -> Evaluation;
}

pub trait ViewCycleEvaluating {
    fn view_did_appear(&mut self) -> Evaluation;
}

/// Owns the workflow state and decides every transition.
///
/// The translator subscribes first, so display fields are up to date before
/// any other state subscriber runs.
pub struct Evaluator<C = SystemClock, P = UnclaimedOrders> {
    current: PassableState<WorkflowState>,
    translator: Rc<Translator>,
    order: Order,
    settings: WorkflowSettings,
    clock: C,
    claims: P,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(retail_core::fixtures::seed_order())
    }
}

impl Evaluator {
    pub fn new(order: Order) -> Self {
        Self::with_ports(
            order,
            WorkflowSettings::default(),
            Translator::new(),
            SystemClock,
            UnclaimedOrders,
        )
    }
}

impl<C, P> Evaluator<C, P>
where
    C: Clock,
    P: OrderClaimPort,
{
    pub fn with_ports(
        order: Order,
        settings: WorkflowSettings,
        translator: Translator,
        clock: C,
        claims: P,
    ) -> Self {
        let translator = Rc::new(translator);
        let mut current = PassableState::new(WorkflowState::Initial);

        let sink = Rc::clone(&translator);
        current.subscribe(move |state| sink.translate(state));

        Self {
            current,
            translator,
            order,
            settings,
            clock,
            claims,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        self.current.state()
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Shared handle for observers that outlive a borrow of the evaluator.
    pub fn translator_handle(&self) -> Rc<Translator> {
        Rc::clone(&self.translator)
    }

    pub fn subscribe(&mut self, f: impl FnMut(&WorkflowState) + 'static) -> SubscriptionId {
        self.current.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.current.unsubscribe(id)
    }

    fn commit(&mut self, next: Option<WorkflowState>) -> Evaluation {
        match next {
            Some(state) => {
                tracing::debug!(from = ?self.current.state().kind(), to = ?state.kind(), "transition");
                self.current.set(state);
                Evaluation::Transitioned
            }
            None => Evaluation::Ignored,
        }
    }

    fn done(&mut self) -> Evaluation {
        if !self.current.state().is_terminal() {
            return Evaluation::Ignored;
        }
        self.translator.dismiss.please();
        Evaluation::DismissRequested
    }

    fn claim_before_start(&self) {
        let WorkflowState::NotStarted(s) = self.current.state() else {
            return;
        };
        if let Err(e) = self.claims.claim(&s.order_id) {
            tracing::warn!(order_id = %s.order_id, "order claim failed, continuing: {e:#}");
        }
    }
}

impl<C, P> ActionEvaluating for Evaluator<C, P>
where
    C: Clock,
    P: OrderClaimPort,
{
    type Action = Action;

    fn apply(&mut self, action: Action) -> Evaluation {
        match action {
            Action::Done => self.done(),
            action => {
                if action == Action::StartOrder {
                    self.claim_before_start();
                }
                let ctx = ReduceContext {
                    now: self.clock.now(),
                    settings: &self.settings,
                };
                let next = reduce(self.current.state(), &action, &ctx);
                if next.is_none() {
                    tracing::trace!(state = ?self.current.state().kind(), "action ignored");
                }
                self.commit(next)
            }
        }
    }
}

impl<C, P> ViewCycleEvaluating for Evaluator<C, P>
where
    C: Clock,
    P: OrderClaimPort,
{
    fn view_did_appear(&mut self) -> Evaluation {
        let next = appear(self.current.state(), &self.order, &self.settings);
        self.commit(next)
    }
}
