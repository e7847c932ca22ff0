//! Synchronous broadcast cells.
//!
//! Everything here runs on the caller's thread: a change is delivered to
//! every subscriber, in registration order, before the setter returns.

use std::cell::{Cell, Ref, RefCell};
use std::fmt;

pub type SubscriptionId = u64;

type Callback<T> = Box<dyn FnMut(&T)>;

struct Subscribers<T> {
    next_id: SubscriptionId,
    callbacks: Vec<(SubscriptionId, Callback<T>)>,
}

impl<T> Subscribers<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }

    fn add(&mut self, f: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.callbacks.push((id, Box::new(f)));
        id
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(x, _)| *x != id);
        self.callbacks.len() != before
    }

    fn notify(&mut self, value: &T) {
        for (_, cb) in self.callbacks.iter_mut() {
            cb(value);
        }
    }

    fn len(&self) -> usize {
        self.callbacks.len()
    }
}

/// Single-writer state cell. Every assignment is broadcast.
pub struct PassableState<S> {
    state: S,
    subscribers: Subscribers<S>,
}

impl<S> PassableState<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            subscribers: Subscribers::new(),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn set(&mut self, next: S) {
        self.state = next;
        self.subscribers.notify(&self.state);
    }

    pub fn subscribe(&mut self, f: impl FnMut(&S) + 'static) -> SubscriptionId {
        self.subscribers.add(f)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }
}

impl<S: fmt::Debug> fmt::Debug for PassableState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassableState")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// A display field that can be observed on its own.
///
/// Setting a field needs only a shared reference, so subscribers may read
/// this or any sibling field while the notification is delivered. A
/// subscriber must not subscribe to the field that is notifying it.
pub struct Observable<T> {
    value: RefCell<T>,
    subscribers: RefCell<Subscribers<T>>,
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            subscribers: RefCell::new(Subscribers::new()),
        }
    }

    pub fn get(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
        let current = self.value.borrow();
        self.subscribers.borrow_mut().notify(&current);
    }

    pub fn subscribe(&self, f: impl FnMut(&T) + 'static) -> SubscriptionId {
        self.subscribers.borrow_mut().add(f)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.borrow_mut().remove(id)
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Observable").field(&*self.value.borrow()).finish()
    }
}

/// Payload-free signal, e.g. "dismiss this screen".
pub struct Please {
    requests: Cell<usize>,
    subscribers: RefCell<Subscribers<()>>,
}

impl Please {
    pub fn new() -> Self {
        Self {
            requests: Cell::new(0),
            subscribers: RefCell::new(Subscribers::new()),
        }
    }

    pub fn please(&self) {
        self.requests.set(self.requests.get() + 1);
        self.subscribers.borrow_mut().notify(&());
    }

    pub fn request_count(&self) -> usize {
        self.requests.get()
    }

    pub fn subscribe(&self, mut f: impl FnMut() + 'static) -> SubscriptionId {
        self.subscribers.borrow_mut().add(move |_| f())
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.borrow_mut().remove(id)
    }
}

impl Default for Please {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Please {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Please")
            .field("requests", &self.requests.get())
            .finish()
    }
}
