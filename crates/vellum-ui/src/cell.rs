//! Observable value cells shared between a rendered widget and application
//! code.
//!
//! A cell holds one value and a list of observers. [`ValueCell::set`]
//! compares before writing: storing the value the cell already holds is a
//! no-op and notifies nobody, which is what stops a widget → cell → widget
//! write-back from echoing forever. Changes that originate from one observer
//! are stored with [`ValueCell::set_from`], which skips that observer.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Identifies one observer of a [`ValueCell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Observer<T> {
    id: SubscriptionId,
    f:  Rc<dyn Fn(&T)>,
}

struct Inner<T> {
    value:     RefCell<T>,
    observers: RefCell<Vec<Observer<T>>>,
    next_id:   Cell<u64>,
}

/// A shared, observable value. Clones refer to the same cell.
pub struct ValueCell<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for ValueCell<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T: Clone + PartialEq + 'static> ValueCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value:     RefCell::new(value),
                observers: RefCell::new(Vec::new()),
                next_id:   Cell::new(0),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Store `value` and notify every observer.
    ///
    /// Returns `false` (and notifies nobody) if the cell already holds an
    /// equal value.
    pub fn set(&self, value: T) -> bool {
        self.store(value, None)
    }

    /// Store `value` on behalf of observer `origin`: every other observer is
    /// notified, `origin` is not.
    pub fn set_from(&self, value: T, origin: SubscriptionId) -> bool {
        self.store(value, Some(origin))
    }

    fn store(&self, value: T, origin: Option<SubscriptionId>) -> bool {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value.clone();
        }
        // Snapshot first: observers may subscribe, unsubscribe or set again.
        let observers: Vec<Rc<dyn Fn(&T)>> = self
            .inner
            .observers
            .borrow()
            .iter()
            .filter(|o| Some(o.id) != origin)
            .map(|o| Rc::clone(&o.f))
            .collect();
        for f in observers {
            f(&value);
        }
        true
    }

    /// Register `f` to run after every effective change.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.observers.borrow_mut().push(Observer { id, f: Rc::new(f) });
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.inner.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|o| o.id != id);
        observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    /// True if both handles refer to the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueCell")
            .field("value", &*self.inner.value.borrow())
            .field("observers", &self.inner.observers.borrow().len())
            .finish()
    }
}
