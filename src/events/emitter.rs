// ============================================================================
// reactive-list - Event Emitter
// Push-based structural-change notification channel
// ============================================================================
//
// An Emitter owns the subscriber list and is the only side that can emit.
// The Listenable handle it hands out can subscribe but never emit, so a type
// can expose its change feed without giving callers a way to forge events.
// Delivery is synchronous, in subscription order, with no buffering.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

// =============================================================================
// REGISTRY
// =============================================================================

struct ListenerSlot<E: 'static> {
    id: u64,
    handler: Rc<dyn Fn(&E)>,
}

struct Registry<E: 'static> {
    slots: RefCell<Vec<ListenerSlot<E>>>,
    next_id: Cell<u64>,
}

impl<E: 'static> Registry<E> {
    fn new() -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    fn subscribe(registry: &Rc<Self>, handler: impl Fn(&E) + 'static) -> Subscription<E> {
        let id = registry.next_id.get();
        registry.next_id.set(id + 1);

        registry.slots.borrow_mut().push(ListenerSlot {
            id,
            handler: Rc::new(handler),
        });

        Subscription {
            registry: Rc::downgrade(registry),
            id,
        }
    }
}

// =============================================================================
// EMITTER
// =============================================================================

/// The owning side of a notification channel.
pub struct Emitter<E: 'static> {
    registry: Rc<Registry<E>>,
}

impl<E: 'static> Emitter<E> {
    /// Create an emitter with no subscribers.
    pub fn new() -> Self {
        Self {
            registry: Rc::new(Registry::new()),
        }
    }

    /// Get the public attachment point for this channel.
    pub fn listenable(&self) -> Listenable<E> {
        Listenable {
            registry: self.registry.clone(),
        }
    }

    /// Check whether anyone is subscribed.
    ///
    /// Emitting is pointless without subscribers; callers check this first
    /// so they can skip building the event at all.
    pub fn has_listeners(&self) -> bool {
        !self.registry.slots.borrow().is_empty()
    }

    /// Deliver an event to every current subscriber, in subscription order.
    ///
    /// The subscriber list is snapshotted before the first call, so handlers
    /// may subscribe, unsubscribe, or emit again from inside a delivery -
    /// including deliveries that re-enter a handler that is still running.
    pub fn emit(&self, event: &E) {
        let handlers: Vec<Rc<dyn Fn(&E)>> = {
            let slots = self.registry.slots.borrow();
            slots.iter().map(|slot| slot.handler.clone()).collect()
        };

        for handler in handlers {
            handler(event);
        }
    }
}

impl<E: 'static> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// LISTENABLE
// =============================================================================

/// The subscribe-only side of a notification channel.
///
/// Cloning yields another handle to the same channel.
pub struct Listenable<E: 'static> {
    registry: Rc<Registry<E>>,
}

impl<E: 'static> Listenable<E> {
    /// Attach a handler, returning the token that detaches it.
    ///
    /// The handler stays attached for as long as the [`Subscription`] is
    /// held.
    pub fn subscribe(&self, handler: impl Fn(&E) + 'static) -> Subscription<E> {
        Registry::subscribe(&self.registry, handler)
    }
}

impl<E: 'static> Clone for Listenable<E> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Token for an attached handler. Dropping it (or calling
/// [`unsubscribe`](Subscription::unsubscribe)) detaches the handler.
pub struct Subscription<E: 'static> {
    registry: Weak<Registry<E>>,
    id: u64,
}

impl<E: 'static> Subscription<E> {
    /// Detach the handler now.
    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl<E: 'static> Drop for Subscription<E> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.slots.borrow_mut().retain(|slot| slot.id != self.id);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
