//! Readiness Gate - one-shot "API ready" broker
//!
//! The external bootstrap script calls a global hook exactly once when the
//! `YT` namespace becomes usable. Any number of independent call sites can
//! ask to be called back at that moment through the gate:
//!
//! - before readiness, callbacks are queued in registration order
//! - the readiness signal invokes the queue in order and empties it
//! - after readiness, callbacks run synchronously inside `register_on_ready`
//!
//! A waiter that panics does not strand the ones queued behind it: the drain
//! finishes, then the first panic is resumed.
//!
//! The gate is single-threaded (`RefCell`, not `Send`), matching the browser
//! main thread it lives on. Share it with `Rc`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Boxed Rust callback, the default waiter type
pub type Callback = Box<dyn FnOnce()>;

/// Something that can be notified once when the API becomes ready
pub trait Waiter {
    fn notify(self);
}

impl Waiter for Box<dyn FnOnce()> {
    fn notify(self) {
        self()
    }
}

/// Handle to a queued waiter, used to unregister it before the drain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WaiterId(u64);

impl std::fmt::Display for WaiterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "waiter-{}", self.0)
    }
}

/// Outcome of `register_on_ready`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The gate was already open; the callback ran before returning
    Invoked,
    /// The callback is waiting for the readiness signal
    Queued(WaiterId),
}

impl Registration {
    /// Id of the queued waiter, if it was queued
    pub fn waiter_id(&self) -> Option<WaiterId> {
        match self {
            Registration::Invoked => None,
            Registration::Queued(id) => Some(*id),
        }
    }
}

struct GateState<W> {
    ready: bool,
    next_id: u64,
    waiters: VecDeque<(WaiterId, W)>,
}

/// Readiness flag plus ordered waiter list
pub struct ReadinessGate<W: Waiter = Callback> {
    state: RefCell<GateState<W>>,
}

impl<W: Waiter> ReadinessGate<W> {
    /// Create a closed gate with no waiters
    pub fn new() -> Self {
        Self {
            state: RefCell::new(GateState {
                ready: false,
                next_id: 0,
                waiters: VecDeque::new(),
            }),
        }
    }

    /// Create a gate ready to be shared between call sites
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Has the readiness signal been received
    pub fn is_ready(&self) -> bool {
        self.state.borrow().ready
    }

    /// Number of waiters still queued
    pub fn pending(&self) -> usize {
        self.state.borrow().waiters.len()
    }

    /// Run `waiter` now if the API is ready, otherwise queue it
    pub fn register_on_ready(&self, waiter: W) -> Registration {
        let mut state = self.state.borrow_mut();

        if state.ready {
            // Release the borrow so the waiter may use the gate itself.
            drop(state);
            debug!("API already ready, invoking waiter immediately");
            waiter.notify();
            return Registration::Invoked;
        }

        let id = WaiterId(state.next_id);
        state.next_id += 1;
        state.waiters.push_back((id, waiter));
        debug!(waiter = %id, pending = state.waiters.len(), "Waiter queued");

        Registration::Queued(id)
    }

    /// Like `register_on_ready`, but a waiter already queued (per `same`)
    /// is not queued twice; its existing id is returned instead.
    ///
    /// After readiness there is no queue, so the waiter runs as usual.
    pub fn register_unique_on_ready<F>(&self, waiter: W, same: F) -> Registration
    where
        F: Fn(&W, &W) -> bool,
    {
        let existing = {
            let state = self.state.borrow();
            if state.ready {
                None
            } else {
                state
                    .waiters
                    .iter()
                    .find(|(_, queued)| same(queued, &waiter))
                    .map(|(id, _)| *id)
            }
        };

        match existing {
            Some(id) => {
                debug!(waiter = %id, "Waiter already queued, ignoring duplicate");
                Registration::Queued(id)
            }
            None => self.register_on_ready(waiter),
        }
    }

    /// Is any queued waiter matching `pred`
    pub fn is_pending<F>(&self, mut pred: F) -> bool
    where
        F: FnMut(&W) -> bool,
    {
        self.state.borrow().waiters.iter().any(|(_, waiter)| pred(waiter))
    }

    /// Remove a queued waiter. Returns false if it already ran or was never queued.
    pub fn unregister_on_ready(&self, id: WaiterId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.waiters.len();
        state.waiters.retain(|(queued, _)| *queued != id);
        let removed = state.waiters.len() != before;

        if removed {
            debug!(waiter = %id, "Waiter unregistered");
        }
        removed
    }

    /// Remove every queued waiter matching `pred`, returning how many were removed
    pub fn unregister_where<F>(&self, mut pred: F) -> usize
    where
        F: FnMut(&W) -> bool,
    {
        let mut state = self.state.borrow_mut();
        let before = state.waiters.len();
        state.waiters.retain(|(_, waiter)| !pred(waiter));
        before - state.waiters.len()
    }

    /// Drop all queued waiters without invoking them
    pub fn clear(&self) -> usize {
        let mut state = self.state.borrow_mut();
        let dropped = state.waiters.len();
        state.waiters.clear();
        dropped
    }

    /// Readiness signal from the external script.
    ///
    /// Opens the gate and invokes queued waiters in registration order,
    /// one at a time, so a waiter that unregisters a later one prevents it
    /// from running. Returns the number of waiters invoked.
    ///
    /// If a waiter panics the rest still run, then the first panic is
    /// resumed.
    pub fn on_external_ready(&self) -> usize {
        let was_ready = {
            let mut state = self.state.borrow_mut();
            std::mem::replace(&mut state.ready, true)
        };

        let mut invoked = 0;
        let mut first_panic = None;
        loop {
            let next = self.state.borrow_mut().waiters.pop_front();
            let Some((id, waiter)) = next else {
                break;
            };
            debug!(waiter = %id, "Notifying waiter");
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| waiter.notify())) {
                warn!(waiter = %id, "Waiter panicked, continuing drain");
                first_panic.get_or_insert(payload);
            }
            invoked += 1;
        }

        if let Some(payload) = first_panic {
            panic::resume_unwind(payload);
        }

        if was_ready {
            debug!(invoked, "Readiness signalled again");
        } else {
            info!(invoked, "YouTube IFrame API ready");
        }
        invoked
    }
}

impl<W: Waiter> Default for ReadinessGate<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Waiter> std::fmt::Debug for ReadinessGate<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ReadinessGate")
            .field("ready", &state.ready)
            .field("pending", &state.waiters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Callback {
        let log = Rc::clone(log);
        Box::new(move || log.borrow_mut().push(name))
    }

    #[test]
    fn test_gate_starts_closed() {
        let gate: ReadinessGate = ReadinessGate::new();
        assert!(!gate.is_ready());
        assert_eq!(gate.pending(), 0);
    }

    #[test]
    fn test_queued_waiters_run_in_order() {
        let gate: ReadinessGate = ReadinessGate::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for name in ["a", "b", "c", "d"] {
            assert!(gate.register_on_ready(recorder(&log, name)).waiter_id().is_some());
        }
        assert!(log.borrow().is_empty());

        assert_eq!(gate.on_external_ready(), 4);
        assert_eq!(*log.borrow(), vec!["a", "b", "c", "d"]);
        assert_eq!(gate.pending(), 0);
    }

    #[test]
    fn test_register_after_ready_is_synchronous() {
        let gate: ReadinessGate = ReadinessGate::new();
        gate.on_external_ready();

        let hit = Rc::new(Cell::new(false));
        let flag = Rc::clone(&hit);
        let outcome = gate.register_on_ready(Box::new(move || flag.set(true)));

        assert_eq!(outcome, Registration::Invoked);
        assert!(hit.get());
        assert_eq!(gate.pending(), 0);
    }

    #[test]
    fn test_unregister_before_ready() {
        let gate: ReadinessGate = ReadinessGate::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        gate.register_on_ready(recorder(&log, "a"));
        let b = gate.register_on_ready(recorder(&log, "b")).waiter_id().unwrap();

        assert!(gate.unregister_on_ready(b));
        gate.on_external_ready();
        assert_eq!(*log.borrow(), vec!["a"]);
    }

    #[test]
    fn test_unregister_unknown_or_drained_is_noop() {
        let gate: ReadinessGate = ReadinessGate::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let a = gate.register_on_ready(recorder(&log, "a")).waiter_id().unwrap();
        gate.on_external_ready();

        assert!(!gate.unregister_on_ready(a));
        assert!(!gate.unregister_on_ready(WaiterId(999)));
        assert_eq!(*log.borrow(), vec!["a"]);
    }

    #[test]
    fn test_second_signal_drains_nothing_new() {
        let gate: ReadinessGate = ReadinessGate::new();
        let count = Rc::new(Cell::new(0));

        let c = Rc::clone(&count);
        gate.register_on_ready(Box::new(move || c.set(c.get() + 1)));

        assert_eq!(gate.on_external_ready(), 1);
        assert_eq!(gate.on_external_ready(), 0);
        assert_eq!(count.get(), 1);
        assert!(gate.is_ready());
    }

    #[test]
    fn test_waiter_can_register_during_drain() {
        let gate: Rc<ReadinessGate> = ReadinessGate::shared();
        let log = Rc::new(RefCell::new(Vec::new()));

        let inner_gate = Rc::clone(&gate);
        let inner_log = Rc::clone(&log);
        gate.register_on_ready(Box::new(move || {
            inner_log.borrow_mut().push("outer");
            let nested = recorder(&inner_log, "nested");
            assert_eq!(inner_gate.register_on_ready(nested), Registration::Invoked);
        }));
        gate.register_on_ready(recorder(&log, "after"));

        gate.on_external_ready();
        assert_eq!(*log.borrow(), vec!["outer", "nested", "after"]);
    }

    #[test]
    fn test_waiter_can_unregister_later_waiter() {
        let gate: Rc<ReadinessGate> = ReadinessGate::shared();
        let log = Rc::new(RefCell::new(Vec::new()));
        let target = Rc::new(Cell::new(None));

        let inner_gate = Rc::clone(&gate);
        let inner_target = Rc::clone(&target);
        gate.register_on_ready(Box::new(move || {
            if let Some(id) = inner_target.get() {
                inner_gate.unregister_on_ready(id);
            }
        }));
        target.set(gate.register_on_ready(recorder(&log, "victim")).waiter_id());
        gate.register_on_ready(recorder(&log, "survivor"));

        assert_eq!(gate.on_external_ready(), 2);
        assert_eq!(*log.borrow(), vec!["survivor"]);
    }

    #[test]
    fn test_panicking_waiter_does_not_strand_the_rest() {
        let gate: ReadinessGate = ReadinessGate::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        gate.register_on_ready(recorder(&log, "before"));
        gate.register_on_ready(Box::new(|| panic!("waiter failed")));
        gate.register_on_ready(recorder(&log, "after"));

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| gate.on_external_ready()));

        assert!(outcome.is_err());
        assert!(gate.is_ready());
        assert_eq!(gate.pending(), 0);
        assert_eq!(*log.borrow(), vec!["before", "after"]);

        // The gate stays usable afterwards.
        assert_eq!(gate.register_on_ready(recorder(&log, "late")), Registration::Invoked);
        assert_eq!(*log.borrow(), vec!["before", "after", "late"]);
    }

    struct Named(&'static str, Rc<RefCell<Vec<&'static str>>>);

    impl Waiter for Named {
        fn notify(self) {
            self.1.borrow_mut().push(self.0);
        }
    }

    fn same_name(a: &Named, b: &Named) -> bool {
        a.0 == b.0
    }

    #[test]
    fn test_unique_registration_skips_queued_duplicate() {
        let gate: ReadinessGate<Named> = ReadinessGate::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = gate.register_unique_on_ready(Named("f", Rc::clone(&log)), same_name);
        gate.register_unique_on_ready(Named("g", Rc::clone(&log)), same_name);
        let again = gate.register_unique_on_ready(Named("f", Rc::clone(&log)), same_name);

        assert_eq!(first, again);
        assert_eq!(gate.pending(), 2);
        assert!(gate.is_pending(|w| w.0 == "g"));

        assert_eq!(gate.on_external_ready(), 2);
        assert_eq!(*log.borrow(), vec!["f", "g"]);
        assert!(!gate.is_pending(|w| w.0 == "f"));
    }

    #[test]
    fn test_unique_registration_after_ready_runs_each_time() {
        let gate: ReadinessGate<Named> = ReadinessGate::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        gate.on_external_ready();

        for _ in 0..2 {
            let outcome = gate.register_unique_on_ready(Named("f", Rc::clone(&log)), same_name);
            assert_eq!(outcome, Registration::Invoked);
        }
        assert_eq!(*log.borrow(), vec!["f", "f"]);
    }

    #[test]
    fn test_clear_drops_without_invoking() {
        let gate: ReadinessGate = ReadinessGate::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        gate.register_on_ready(recorder(&log, "a"));
        gate.register_on_ready(recorder(&log, "b"));
        assert_eq!(gate.clear(), 2);

        gate.on_external_ready();
        assert!(log.borrow().is_empty());
    }
}
