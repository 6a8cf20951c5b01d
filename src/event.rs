//! Ordered multi-subscriber notification channel

use std::fmt;

/// Handle returned by [`Event::add`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subscription(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

/// A list of callbacks invoked synchronously in subscription order
pub struct Event<T> {
    callbacks: Vec<(Subscription, Callback<T>)>,
    next_handle: u64,
}

impl<T> Event<T> {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
            next_handle: 1,
        }
    }

    /// Subscribe a callback; it runs after every earlier subscriber
    pub fn add(&mut self, callback: impl FnMut(&T) + 'static) -> Subscription {
        let handle = Subscription(self.next_handle);
        self.next_handle += 1;
        self.callbacks.push((handle, Box::new(callback)));
        handle
    }

    /// Unsubscribe; returns false if the handle was not subscribed
    pub fn remove(&mut self, handle: Subscription) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(h, _)| *h != handle);
        self.callbacks.len() != before
    }

    /// Drop every subscriber and restart handle numbering
    pub fn clear(&mut self) {
        self.callbacks.clear();
        self.next_handle = 1;
    }

    /// Call every subscriber with `value`
    pub fn invoke(&mut self, value: &T) {
        for (_, callback) in &mut self.callbacks {
            callback(value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}
