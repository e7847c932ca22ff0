use chrono::{DateTime, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Claims an order for the picker before picking starts.
pub trait OrderClaimPort {
    fn claim(&self, order_id: &str) -> anyhow::Result<()>;
}

/// Stand-in until order claiming talks to a backend; always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnclaimedOrders;

impl OrderClaimPort for UnclaimedOrders {
    fn claim(&self, order_id: &str) -> anyhow::Result<()> {
        tracing::trace!(order_id, "order claim skipped: no backend configured");
        Ok(())
    }
}
