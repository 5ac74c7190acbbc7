//! Fan-out of user-facing [`Notice`]s.

use crate::model::Notice;
use tokio::sync::broadcast;
use tracing::debug;

/// Broadcasts notices to whoever is listening (typically the UI layer).
///
/// Publishing with no subscriber is not an error; the notice is simply dropped.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notice>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, notice: Notice) {
        debug!(level = ?notice.level, message = %notice.message, "Notice");
        let _ = self.sender.send(notice);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(16)
    }
}
