//! # sentry_event - Scoped Event Registry
//!
//! Typed publish/subscribe for broadcasts owned by the simulation world:
//! - Subscribers are keyed by event `TypeId`
//! - Each subscriber owns a mailbox; publishing never runs foreign code
//! - `Subscription` is an RAII guard: dropping it unsubscribes
//!
//! # Example
//!
//! ```ignore
//! use sentry_event::prelude::*;
//!
//! let bus = EventBus::new();
//! let sub = bus.subscribe::<TargetMoved>();
//! bus.publish(TargetMoved { position });
//! let latest = sub.latest();
//! drop(sub); // unsubscribed
//! ```

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::{Arc, Weak};

/// Trait for events
pub trait Event: Clone + Send + 'static {}

// Blanket implementation
impl<T: Clone + Send + 'static> Event for T {}

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(pub u64);

/// Type-erased mailbox sender (always a `Sender<E>` for the keyed `TypeId`)
type Mailbox = Box<dyn Any + Send>;

#[derive(Default)]
struct Registry {
    /// Mailboxes by event type
    mailboxes: BTreeMap<TypeId, Vec<(SubscriberId, Mailbox)>>,
    /// Next subscriber ID
    next_subscriber_id: u64,
}

impl Registry {
    fn remove(&mut self, type_id: TypeId, id: SubscriberId) -> bool {
        let Some(entries) = self.mailboxes.get_mut(&type_id) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|(sub_id, _)| *sub_id != id);
        let removed = entries.len() != before;
        if entries.is_empty() {
            self.mailboxes.remove(&type_id);
        }
        removed
    }
}

/// Event bus for publishing and subscribing to events
///
/// Cloning the bus yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<Mutex<Registry>>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                mailboxes: BTreeMap::new(),
                next_subscriber_id: 1,
            })),
        }
    }

    /// Subscribe to an event type
    ///
    /// The returned guard receives every event of type `E` published while it
    /// is alive. Dropping it removes the subscriber.
    pub fn subscribe<E: Event>(&self) -> Subscription<E> {
        let (sender, receiver) = crossbeam_channel::unbounded::<E>();
        let type_id = TypeId::of::<E>();

        let id = {
            let mut registry = self.registry.lock();
            let id = SubscriberId(registry.next_subscriber_id.max(1));
            registry.next_subscriber_id = id.0 + 1;
            registry
                .mailboxes
                .entry(type_id)
                .or_default()
                .push((id, Box::new(sender)));
            id
        };

        Subscription {
            id,
            type_id,
            receiver,
            registry: Arc::downgrade(&self.registry),
            _marker: PhantomData,
        }
    }

    /// Publish an event to every current subscriber of its type
    ///
    /// Returns the number of mailboxes the event was delivered to.
    pub fn publish<E: Event>(&self, event: E) -> usize {
        let registry = self.registry.lock();
        let Some(entries) = registry.mailboxes.get(&TypeId::of::<E>()) else {
            return 0;
        };

        let mut delivered = 0;
        for (_, mailbox) in entries {
            if let Some(sender) = mailbox.downcast_ref::<Sender<E>>() {
                if sender.send(event.clone()).is_ok() {
                    delivered += 1;
                }
            }
        }
        delivered
    }

    /// Number of live subscribers for an event type
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.registry
            .lock()
            .mailboxes
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }

    /// Number of live subscribers across all event types
    pub fn total_subscribers(&self) -> usize {
        self.registry.lock().mailboxes.values().map(Vec::len).sum()
    }
}

/// Scoped subscription to events of type `E`
///
/// Holds only a weak reference to the registry, so a subscription may
/// outlive the bus; in that case dropping it is a no-op.
pub struct Subscription<E: Event> {
    id: SubscriberId,
    type_id: TypeId,
    receiver: Receiver<E>,
    registry: Weak<Mutex<Registry>>,
    _marker: PhantomData<fn() -> E>,
}

impl<E: Event> Subscription<E> {
    /// Subscriber ID
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Receive the oldest pending event
    pub fn try_recv(&self) -> Option<E> {
        self.receiver.try_recv().ok()
    }

    /// Drain all pending events in publish order
    pub fn drain(&self) -> Vec<E> {
        self.receiver.try_iter().collect()
    }

    /// Drain all pending events, keeping only the most recent
    pub fn latest(&self) -> Option<E> {
        self.receiver.try_iter().last()
    }

    /// Pending event count
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Whether the owning bus still exists
    pub fn is_connected(&self) -> bool {
        self.registry.strong_count() > 0
    }

    /// Explicitly unsubscribe (same as dropping the guard)
    pub fn unsubscribe(self) {}
}

impl<E: Event> Drop for Subscription<E> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if !registry.lock().remove(self.type_id, self.id) {
                log::warn!("Subscriber {:?} was already removed from the registry", self.id);
            }
        }
    }
}

impl<E: Event> std::fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("event", &std::any::type_name::<E>())
            .field("pending", &self.receiver.len())
            .finish()
    }
}

/// Prelude
pub mod prelude {
    pub use crate::{Event, EventBus, SubscriberId, Subscription};
}
