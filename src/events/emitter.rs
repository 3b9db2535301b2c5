//! Listener lists with scoped unsubscription.
//!
//! An [`Emitter`] owns a list of listeners. Every call to
//! [`Emitter::subscribe`] hands back a [`Subscription`] guard; dropping the
//! guard removes the listener again, so a listener can never outlive the
//! scope that registered it.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T: ?Sized> = Rc<RefCell<dyn FnMut(&T)>>;

struct Slots<T: ?Sized> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

impl<T: ?Sized> Slots<T> {
    fn contains(&self, id: u64) -> bool {
        self.listeners.iter().any(|(i, _)| *i == id)
    }
}

/// A single-threaded event source.
pub struct Emitter<T: ?Sized> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T: ?Sized + 'static> Emitter<T> {
    /// Create an emitter with no listeners.
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register a listener.
    ///
    /// The listener stays registered until the returned guard is dropped or
    /// [`Subscription::unsubscribe`] is called.
    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next_id;
            slots.next_id += 1;
            let listener: Listener<T> = Rc::new(RefCell::new(listener));
            slots.listeners.push((id, listener));
            id
        };

        let weak: Weak<RefCell<Slots<T>>> = Rc::downgrade(&self.slots);
        Subscription::new(move || {
            if let Some(slots) = weak.upgrade() {
                slots.borrow_mut().listeners.retain(|(i, _)| *i != id);
            }
        })
    }

    /// Deliver an event to every registered listener, in registration order.
    ///
    /// Listeners removed while the event is being delivered are skipped.
    /// A listener that re-enters `fire` on the same emitter is not called
    /// recursively.
    pub fn fire(&self, event: &T) {
        let snapshot: Vec<(u64, Listener<T>)> = self
            .slots
            .borrow()
            .listeners
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in snapshot {
            if !self.slots.borrow().contains(id) {
                continue;
            }
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (&mut *callback)(event);
            }
        }
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.slots.borrow().listeners.len()
    }
}

impl<T: ?Sized + 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard for a registered listener.
///
/// Dropping the guard unregisters the listener.
#[must_use = "dropping a Subscription immediately unregisters its listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Unregister the listener now.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
