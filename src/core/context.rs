/// Parse context — the collaborators a parser reads from and reports to.
///
/// Both are optional from the parser's point of view: a missing stats
/// provider means the default snapshot is used, and the default error
/// sink only logs.

use crate::schema::encounter::StatsSnapshot;

/// Read-only access to the live player's stats.
pub trait StatsProvider: Send + Sync {
    /// The current stats, or `None` when no player session is active.
    fn current_stats(&self) -> Option<StatsSnapshot>;
}

/// A fixed snapshot acts as its own provider.
impl StatsProvider for StatsSnapshot {
    fn current_stats(&self) -> Option<StatsSnapshot> {
        Some(*self)
    }
}

/// Provider used when the game has no player session.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPlayer;

impl StatsProvider for NoPlayer {
    fn current_stats(&self) -> Option<StatsSnapshot> {
        None
    }
}

/// Receives a message for every parse that fails. Fire-and-forget.
pub trait ErrorSink: Send + Sync {
    fn report(&self, message: &str);
}

/// Sink that writes failures to the `tracing` error log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, message: &str) {
        tracing::error!("{}", message);
    }
}
