//! Change notifications for stats and registries
//!
//! Delivery is synchronous and in subscription order. Handlers only see the
//! event, so they cannot reach back into the emitter through `&mut`; a
//! handler that smuggles the emitter in through `Rc<RefCell<_>>` hits a
//! borrow panic rather than recursing. Nothing here is `Send`.

use std::fmt;

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A single stat's effective value changed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueChange {
    pub old_value: f64,
    pub new_value: f64,
}

impl ValueChange {
    pub fn delta(&self) -> f64 {
        self.new_value - self.old_value
    }
}

/// A registry stat's effective value changed, tagged with the stat name
#[derive(Debug, Clone, PartialEq)]
pub struct StatChange {
    pub name: String,
    pub old_value: f64,
    pub new_value: f64,
}

impl StatChange {
    pub fn new(name: impl Into<String>, change: ValueChange) -> Self {
        StatChange {
            name: name.into(),
            old_value: change.old_value,
            new_value: change.new_value,
        }
    }
}

type Handler<E> = Box<dyn FnMut(&E)>;

/// Ordered list of subscribed handlers
pub struct Listeners<E> {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler<E>)>,
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Listeners {
            next_id: 0,
            handlers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub fn emit(&mut self, event: &E) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(event);
        }
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}
