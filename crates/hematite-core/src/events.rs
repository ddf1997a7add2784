//! Synchronous notification channels.
//!
//! Emitters are single-threaded and re-entrant: handlers run depth-first on
//! the emitting call stack and may emit, subscribe or unsubscribe while a
//! notification is in flight. The handler list is snapshotted before each
//! emission, so handlers added during an emission are first called on the
//! next one.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Handler<E> = Rc<dyn Fn(&E)>;
type HandlerList<E> = RefCell<Vec<(u64, Handler<E>)>>;

/// A list of handlers that receive every emitted event in registration order.
pub struct EventEmitter<E> {
    handlers: Rc<HandlerList<E>>,
    next_id: Cell<u64>,
}

impl<E: 'static> EventEmitter<E> {
    /// Create an emitter with no handlers.
    pub fn new() -> Self {
        Self {
            handlers: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(0),
        }
    }

    /// Register a handler. It stays registered while the returned
    /// [`Subscription`] is alive (or forever, after [`Subscription::detach`]).
    pub fn subscribe(&self, handler: impl Fn(&E) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));

        let handlers: Weak<HandlerList<E>> = Rc::downgrade(&self.handlers);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(handlers) = handlers.upgrade() {
                    handlers.borrow_mut().retain(|(handler_id, _)| *handler_id != id);
                }
            })),
        }
    }

    /// Deliver `event` to every handler registered at the time of the call.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<Handler<E>> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        for handler in snapshot {
            handler(event);
        }
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl<E: 'static> Default for EventEmitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventEmitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("handlers", &self.handlers.borrow().len())
            .finish()
    }
}

/// Guard for a registered handler. Dropping it unregisters the handler.
#[must_use = "dropping a Subscription unregisters its handler; call `detach()` to keep it"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keep the handler registered for the lifetime of its emitter.
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }

    /// Unregister the handler now.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
