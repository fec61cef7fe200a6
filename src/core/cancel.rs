use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Handle for cancelling chunk production when the client disconnects mid-stream.
#[derive(Clone)]
pub struct StreamCancelHandle {
    sender: watch::Sender<bool>,
    receiver: watch::Receiver<bool>,
    /// Flag to track if the stream completed normally (not a disconnect)
    completed: Arc<AtomicBool>,
}

impl StreamCancelHandle {
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender,
            receiver,
            completed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mark the stream as completed normally.
    /// This should be called after the terminal chunk and [DONE] sentinel are emitted.
    pub fn mark_completed(&self) {
        self.completed.store(true, Ordering::SeqCst);
    }

    /// Check if the stream completed normally
    pub fn is_completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }

    /// Signal cancellation (only if not already completed)
    pub fn cancel(&self) {
        if !self.is_completed() {
            let _ = self.sender.send(true);
        }
    }

    /// Check if cancelled
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }
}

impl Default for StreamCancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_sets_flag() {
        let handle = StreamCancelHandle::new();
        assert!(!handle.is_cancelled());
        handle.cancel();
        assert!(handle.is_cancelled());
    }

    #[test]
    fn test_completed_stream_is_not_cancelled() {
        let handle = StreamCancelHandle::new();
        handle.mark_completed();
        handle.cancel();
        assert!(!handle.is_cancelled());
        assert!(handle.is_completed());
    }
}
