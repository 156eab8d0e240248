use tokio::sync::watch;

/// Snapshot of how far a sync has come.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncProgress {
    /// Highest round covered so far.
    pub synced_until_round: u64,

    /// First round of the range being fetched.
    pub start_round: u64,

    /// Chain tip used as the upper bound, when known.
    pub current_round: Option<u64>,

    /// `current_round - synced_until_round`, when the tip is known.
    pub remaining_rounds: Option<u64>,
}

impl SyncProgress {
    pub fn new(synced_until_round: u64, start_round: u64, current_round: Option<u64>) -> Self {
        Self {
            synced_until_round,
            start_round,
            current_round,
            remaining_rounds: current_round.map(|cur| cur.saturating_sub(synced_until_round)),
        }
    }
}

/// Receives progress updates while blocks are being fetched.
///
/// There is no completion event; a sync is done when its future resolves.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, progress: &SyncProgress);
}

impl ProgressObserver for () {
    fn on_progress(&self, _progress: &SyncProgress) {}
}

impl<F> ProgressObserver for F
where
    F: Fn(&SyncProgress) + Send + Sync,
{
    fn on_progress(&self, progress: &SyncProgress) {
        self(progress)
    }
}

impl ProgressObserver for watch::Sender<Option<SyncProgress>> {
    fn on_progress(&self, progress: &SyncProgress) {
        // Nobody listening is fine.
        self.send_replace(Some(*progress));
    }
}
