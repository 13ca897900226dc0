//! Observable value cells
//!
//! A `Writable<T>` holds one value and a list of subscribers. Handles are
//! cheap `Rc` clones; every clone sees the same value.
//!
//! Delivery rules:
//! - `subscribe` calls the new callback once, right away, with the current value
//! - every `set` calls each live subscriber once, in registration order
//! - no deduplication: writing an equal value notifies again
//! - a `set` from inside a callback stores the value immediately and queues
//!   its notifications behind the running pass, so callbacks see writes in order

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Subscriber<T> {
    id: u64,
    live: Rc<Cell<bool>>,
    callback: Callback<T>,
}

struct Delivery<T> {
    value: T,
    targets: Vec<(Rc<Cell<bool>>, Callback<T>)>,
}

struct Inner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<Subscriber<T>>>,
    next_id: Cell<u64>,
    pending: RefCell<VecDeque<Delivery<T>>>,
    delivering: Cell<bool>,
}

pub struct Writable<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Writable<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T: Default + Clone + 'static> Default for Writable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + 'static> Writable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                pending: RefCell::new(VecDeque::new()),
                delivering: Cell::new(false),
            }),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Read the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = self.inner.value.borrow();
        f(&*value)
    }

    /// Replace the value and notify subscribers
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value.clone();

        let targets = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|s| (Rc::clone(&s.live), Rc::clone(&s.callback)))
            .collect();
        self.inner
            .pending
            .borrow_mut()
            .push_back(Delivery { value, targets });

        self.flush();
    }

    /// Compute the next value from the current one, then `set` it.
    ///
    /// `f` runs on a copy, so it may itself write to this cell.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let current = self.get();
        let next = f(&current);
        self.set(next);
    }

    /// Register `callback`; it runs immediately with the current value
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let live = Rc::new(Cell::new(true));
        let callback: Callback<T> = Rc::new(callback);
        self.inner.subscribers.borrow_mut().push(Subscriber {
            id,
            live: Rc::clone(&live),
            callback: Rc::clone(&callback),
        });

        let current = self.get();
        callback(&current);

        let weak: Weak<Inner<T>> = Rc::downgrade(&self.inner);
        Subscription {
            live,
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.subscribers.borrow_mut().retain(|s| s.id != id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    fn flush(&self) {
        if self.inner.delivering.get() {
            return;
        }
        let _guard = DeliveringGuard::enter(&self.inner);

        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some(delivery) = next else { break };
            for (live, callback) in delivery.targets.iter() {
                if live.get() {
                    callback(&delivery.value);
                }
            }
        }
    }
}

/// Clears the delivering flag even when a callback panics.
/// Deliveries still queued behind a panicking callback are dropped.
struct DeliveringGuard<'a, T> {
    inner: &'a Inner<T>,
}

impl<'a, T> DeliveringGuard<'a, T> {
    fn enter(inner: &'a Inner<T>) -> Self {
        inner.delivering.set(true);
        Self { inner }
    }
}

impl<T> Drop for DeliveringGuard<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.inner.pending.borrow_mut().clear();
        }
        self.inner.delivering.set(false);
    }
}

/// Handle returned by [`Writable::subscribe`].
///
/// Dropping it unsubscribes. Call [`Subscription::detach`] to keep the
/// callback registered for the lifetime of the cell instead.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    live: Rc<Cell<bool>>,
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.release();
    }

    /// Leave the callback registered; the handle no longer controls it
    pub fn detach(mut self) {
        self.detach = None;
    }

    pub fn is_active(&self) -> bool {
        self.live.get()
    }

    fn release(&mut self) {
        self.live.set(false);
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.detach.is_some() {
            self.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(&T) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |v: &T| sink.borrow_mut().push(v.clone()))
    }

    #[test]
    fn set_then_get_returns_value() {
        let cell = Writable::new(1);
        cell.set(5);
        assert_eq!(cell.get(), 5);
        cell.update(|v| v * 2);
        assert_eq!(cell.get(), 10);
    }

    #[test]
    fn subscribe_runs_immediately_then_on_every_write() {
        let cell = Writable::new(false);
        let (log, cb) = recorder::<bool>();
        let sub = cell.subscribe(cb);

        cell.set(true);
        cell.set(true);
        assert_eq!(*log.borrow(), vec![false, true, true]);

        sub.unsubscribe();
        cell.set(false);
        assert_eq!(log.borrow().len(), 3);
        assert_eq!(cell.subscriber_count(), 0);
    }

    #[test]
    fn subscribers_run_in_registration_order() {
        let cell = Writable::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));
        let subs: Vec<Subscription> = (0..3)
            .map(|i| {
                let order = Rc::clone(&order);
                cell.subscribe(move |v: &i32| order.borrow_mut().push((i, *v)))
            })
            .collect();

        order.borrow_mut().clear();
        cell.set(7);
        assert_eq!(*order.borrow(), vec![(0, 7), (1, 7), (2, 7)]);
        drop(subs);
    }

    #[test]
    fn dropping_handle_unsubscribes_and_detach_keeps_it() {
        let cell = Writable::new(0);
        let (log, cb) = recorder::<i32>();
        {
            let _sub = cell.subscribe(cb);
        }
        cell.set(1);
        assert_eq!(*log.borrow(), vec![0]);

        let (kept, cb) = recorder::<i32>();
        cell.subscribe(cb).detach();
        cell.set(2);
        assert_eq!(*kept.borrow(), vec![1, 2]);
    }

    #[test]
    fn reentrant_writes_are_delivered_in_order() {
        let cell = Writable::new(0);
        let writer = cell.clone();
        let _bump = cell.subscribe(move |v: &i32| {
            if *v == 1 {
                writer.set(2);
            }
        });
        let (log, cb) = recorder::<i32>();
        let _sub = cell.subscribe(cb);

        cell.set(1);
        assert_eq!(cell.get(), 2);
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn update_closure_may_write_the_same_cell() {
        let cell = Writable::new(1);
        let writer = cell.clone();
        let (log, cb) = recorder::<i32>();
        let _sub = cell.subscribe(cb);

        cell.update(|v| {
            writer.set(9);
            v + 1
        });
        assert_eq!(cell.get(), 2);
        assert_eq!(*log.borrow(), vec![1, 9, 2]);
    }

    #[test]
    fn panicking_subscriber_does_not_leave_stale_deliveries() {
        let cell = Writable::new(0);
        let writer = cell.clone();
        let _boom = cell.subscribe(move |v: &i32| {
            if *v == 1 {
                writer.set(2);
                panic!("subscriber failed");
            }
        });
        let (log, cb) = recorder::<i32>();
        let _sub = cell.subscribe(cb);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| cell.set(1)));
        assert!(result.is_err());
        assert_eq!(cell.get(), 2);

        cell.set(3);
        assert_eq!(*log.borrow(), vec![0, 3]);
    }

    #[test]
    fn unsubscribed_mid_pass_is_skipped() {
        let cell = Writable::new(0);
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let slot = Rc::clone(&victim);
        let _killer = cell.subscribe(move |v: &i32| {
            if *v == 1 {
                if let Some(sub) = slot.borrow_mut().take() {
                    sub.unsubscribe();
                }
            }
        });

        let (log, cb) = recorder::<i32>();
        *victim.borrow_mut() = Some(cell.subscribe(cb));

        cell.set(1);
        assert_eq!(*log.borrow(), vec![0]);
    }
}
