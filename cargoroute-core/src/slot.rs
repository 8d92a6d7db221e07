//! Single-assignment result slot shared by racing producers.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::oneshot;

/// Write side of a value that may be settled at most once.
///
/// Clones share the same slot. The first [`ResolveOnce::settle`] wins; later
/// calls report `false` and drop their value.
#[derive(Debug)]
pub struct ResolveOnce<T> {
    sender: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T> Clone for ResolveOnce<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T> ResolveOnce<T> {
    /// Create a slot and the receiver that observes its value.
    #[must_use]
    pub fn channel() -> (Self, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                sender: Arc::new(Mutex::new(Some(tx))),
            },
            rx,
        )
    }

    /// Settle the slot with `value`.
    ///
    /// Returns `true` when this call settled it. A slot whose receiver was
    /// dropped still counts as settled by the first caller.
    pub fn settle(&self, value: T) -> bool {
        let taken = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match taken {
            Some(tx) => {
                // A dropped receiver just means nobody is listening any more.
                let _ignored = tx.send(value);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn first_settle_wins() {
        let (slot, rx) = ResolveOnce::channel();
        let racer = slot.clone();

        assert!(slot.settle("deadline"));
        assert!(!racer.settle("cascade"));
        assert_eq!(rx.await, Ok("deadline"));
    }

    #[rstest]
    fn settling_without_a_listener_still_counts() {
        let (slot, rx) = ResolveOnce::channel();
        drop(rx);
        assert!(slot.settle(1_u8));
        assert!(!slot.settle(2_u8));
    }
}
