use std::sync::atomic::{AtomicU64, Ordering};

/// Guards against out-of-order completion of overlapping dashboard
/// refreshes: each refresh takes a ticket at start, and only the holder of
/// the newest ticket may commit its result ("latest request wins"). A
/// superseded refresh must treat its late result as a no-op.
#[derive(Debug, Default)]
pub struct RefreshGuard {
    latest: AtomicU64,
}

/// Proof of which refresh generation a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket(u64);

impl RefreshGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new refresh, superseding all earlier tickets.
    pub fn begin(&self) -> RefreshTicket {
        RefreshTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether the ticket still belongs to the newest refresh.
    pub fn is_current(&self, ticket: RefreshTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
