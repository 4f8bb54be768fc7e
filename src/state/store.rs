//! Observable value holder.

use tokio::sync::watch;

/// A value that notifies subscribers on every update.
///
/// Updates go through the sender side of a `watch` channel, so they succeed
/// whether or not anyone is subscribed. Subscribers always see the latest
/// value; intermediate values may be skipped.
#[derive(Debug)]
pub struct Store<T> {
    tx: watch::Sender<T>,
}

impl<T> Store<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Read the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Modify the value in place and notify subscribers.
    ///
    /// Subscribers are notified even if `f` leaves the value unchanged.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Notify subscribers without changing the value.
    pub fn touch(&self) {
        self.tx.send_modify(|_| {});
    }

    /// Receive the current value and every later update.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Store<T> {
    /// A copy of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
