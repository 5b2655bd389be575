//! Single-threaded observer lists with scoped subscriptions.
//!
//! A [`Signal`] fans a value out to its listeners. Every listener is owned by
//! a [`Subscription`] guard; dropping the guard (including during unwinding)
//! removes the listener, so nothing outlives the view that registered it.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Box<dyn FnMut(&T)>;

struct Registry<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
    /// Number of `emit` calls currently on the stack.
    depth: usize,
    /// Listeners released while some emit held them, cleared at depth 0.
    released: Vec<u64>,
}

impl<T> Registry<T> {
    fn release(&mut self, id: u64) {
        self.listeners.retain(|(lid, _)| *lid != id);
        if self.depth > 0 {
            self.released.push(id);
        }
    }
}

/// Listeners taken out for one delivery. Dropping it, on return or on
/// unwind, puts the survivors back ahead of any added meanwhile.
struct Delivery<'a, T> {
    registry: &'a RefCell<Registry<T>>,
    taken: Vec<(u64, Listener<T>)>,
}

impl<T> Drop for Delivery<'_, T> {
    fn drop(&mut self) {
        let mut reg = self.registry.borrow_mut();
        let mut restored = std::mem::take(&mut self.taken);
        restored.retain(|(id, _)| !reg.released.contains(id));
        restored.append(&mut reg.listeners);
        reg.listeners = restored;
        reg.depth -= 1;
        if reg.depth == 0 {
            reg.released.clear();
        }
    }
}

pub struct Signal<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Signal<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
                depth: 0,
                released: Vec::new(),
            })),
        }
    }

    /// Register a listener for as long as the returned guard lives.
    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut reg = self.registry.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.listeners.push((id, Box::new(listener)));
            id
        };
        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry.borrow_mut().release(id);
                }
            })),
        }
    }

    /// Deliver `value` to every listener in subscription order.
    ///
    /// Listeners may subscribe, release or emit again during delivery. A
    /// listener released before its turn is skipped, one added meanwhile
    /// first hears the next emit. A nested emit skips the listeners its outer
    /// emit still holds.
    pub fn emit(&self, value: &T) {
        let mut delivery = {
            let mut reg = self.registry.borrow_mut();
            reg.depth += 1;
            Delivery {
                registry: &self.registry,
                taken: std::mem::take(&mut reg.listeners),
            }
        };
        for (id, listener) in &mut delivery.taken {
            if !self.registry.borrow().released.contains(id) {
                listener(value);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Guard that keeps a listener registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn release(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_emit_reaches_all_listeners_in_order() {
        let signal = Signal::<i32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let a = {
            let seen = Rc::clone(&seen);
            signal.subscribe(move |v| seen.borrow_mut().push(("a", *v)))
        };
        let b = {
            let seen = Rc::clone(&seen);
            signal.subscribe(move |v| seen.borrow_mut().push(("b", *v)))
        };
        signal.emit(&7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
        drop((a, b));
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let signal = Signal::<i32>::new();
        let count = Rc::new(Cell::new(0));
        let sub = {
            let count = Rc::clone(&count);
            signal.subscribe(move |_| count.set(count.get() + 1))
        };
        signal.emit(&1);
        drop(sub);
        signal.emit(&2);
        assert_eq!(count.get(), 1);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn test_explicit_release() {
        let signal = Signal::<()>::new();
        let sub = signal.subscribe(|()| {});
        assert_eq!(signal.listener_count(), 1);
        sub.release();
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_signal_is_harmless() {
        let signal = Signal::<i32>::new();
        let sub = signal.subscribe(|_| {});
        drop(signal);
        drop(sub);
    }

    #[test]
    fn test_release_during_emit_takes_effect_afterwards() {
        let signal = Signal::<i32>::new();
        let held: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let count = Rc::new(Cell::new(0));
        let sub = {
            let held = Rc::clone(&held);
            let count = Rc::clone(&count);
            signal.subscribe(move |_| {
                count.set(count.get() + 1);
                held.borrow_mut().take();
            })
        };
        *held.borrow_mut() = Some(sub);
        signal.emit(&1);
        signal.emit(&2);
        assert_eq!(count.get(), 1);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn test_release_after_nested_emit_is_not_lost() {
        let signal = Rc::new(Signal::<i32>::new());
        let held: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let count = Rc::new(Cell::new(0));
        let outer = {
            let inner_signal = Rc::clone(&signal);
            let held = Rc::clone(&held);
            signal.subscribe(move |v| {
                if *v == 1 {
                    inner_signal.emit(&2);
                    held.borrow_mut().take();
                }
            })
        };
        let counted = {
            let count = Rc::clone(&count);
            signal.subscribe(move |_| count.set(count.get() + 1))
        };
        *held.borrow_mut() = Some(counted);

        signal.emit(&1);
        assert_eq!(count.get(), 0);
        assert_eq!(signal.listener_count(), 1);
        signal.emit(&3);
        assert_eq!(count.get(), 0);
        drop(outer);
    }

    #[test]
    fn test_listener_panic_keeps_other_listeners() {
        let signal = Signal::<i32>::new();
        let count = Rc::new(Cell::new(0));
        let _panics = signal.subscribe(|v| assert!(*v != 1, "bad sample"));
        let _counts = {
            let count = Rc::clone(&count);
            signal.subscribe(move |_| count.set(count.get() + 1))
        };

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| signal.emit(&1)));
        assert!(result.is_err());
        assert_eq!(signal.listener_count(), 2);
        signal.emit(&2);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_listener_released_on_unwind() {
        let signal = Signal::<i32>::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _sub = signal.subscribe(|_| {});
            panic!("view torn down abnormally");
        }));
        assert!(result.is_err());
        assert_eq!(signal.listener_count(), 0);
    }
}
