use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::closure::Closure;

/// Identifies a scheduled callback. Stale handles are harmless to cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Deferred callbacks, one-shot or repeating.
///
/// Once `cancel` returns, the callback behind the handle never runs again.
pub trait Scheduler {
    fn schedule_once(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle;
    fn schedule_repeating(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> TimerHandle;
    fn cancel(&self, handle: TimerHandle);
}

enum Slot {
    Once(Timeout),
    Repeating(Interval),
}

impl Slot {
    fn cancel(self) -> Closure<dyn FnMut()> {
        match self {
            Slot::Once(timeout) => timeout.cancel(),
            Slot::Repeating(interval) => interval.cancel(),
        }
    }
}

#[derive(Default)]
struct Slots {
    next_id: u64,
    live: HashMap<u64, Slot>,
    // Closures of cancelled or fired timers. They can't be freed while they may
    // still be on the stack, so they wait here until the next timer fires.
    retired: Vec<Closure<dyn FnMut()>>,
}

impl Slots {
    fn next_handle(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// `setTimeout`/`setInterval` backed scheduler.
#[derive(Clone, Default)]
pub struct BrowserScheduler {
    slots: Rc<RefCell<Slots>>,
}

impl BrowserScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule_once(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let id = self.slots.borrow_mut().next_handle();
        let slots = Rc::downgrade(&self.slots);
        let timeout = Timeout::new(delay_ms, move || {
            if let Some(slots) = slots.upgrade() {
                let mut slots = slots.borrow_mut();
                slots.retired.clear();
                if let Some(slot) = slots.live.remove(&id) {
                    let closure = slot.cancel();
                    slots.retired.push(closure);
                }
            }
            callback();
        });
        self.slots.borrow_mut().live.insert(id, Slot::Once(timeout));
        TimerHandle(id)
    }

    fn schedule_repeating(&self, period_ms: u32, mut callback: Box<dyn FnMut()>) -> TimerHandle {
        let id = self.slots.borrow_mut().next_handle();
        let slots = Rc::downgrade(&self.slots);
        let interval = Interval::new(period_ms, move || {
            if let Some(slots) = slots.upgrade() {
                slots.borrow_mut().retired.clear();
            }
            callback();
        });
        self.slots.borrow_mut().live.insert(id, Slot::Repeating(interval));
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        let mut slots = self.slots.borrow_mut();
        if let Some(slot) = slots.live.remove(&handle.0) {
            let closure = slot.cancel();
            slots.retired.push(closure);
        }
    }
}

/// Wraps `f` so that a burst of calls runs it once, `wait_ms` after the last call.
pub fn debounce(wait_ms: u32, f: impl Fn() + 'static) -> impl FnMut() {
    let f = Rc::new(f);
    let mut pending: Option<Timeout> = None;
    move || {
        let f = f.clone();
        if let Some(previous) = pending.replace(Timeout::new(wait_ms, move || f())) {
            previous.cancel();
        }
    }
}

#[cfg(test)]
pub(crate) mod manual {
    use super::{Scheduler, TimerHandle};
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    enum Job {
        Once(Option<Box<dyn FnOnce()>>),
        Repeating(u32, Option<Box<dyn FnMut()>>),
    }

    struct Entry {
        due: u64,
        job: Job,
    }

    #[derive(Default)]
    struct Clock {
        now: u64,
        next_id: u64,
        entries: BTreeMap<u64, Entry>,
    }

    /// Virtual clock scheduler. Callbacks run only from `advance`.
    #[derive(Default)]
    pub(crate) struct ManualScheduler {
        clock: RefCell<Clock>,
    }

    impl ManualScheduler {
        pub(crate) fn now(&self) -> u64 {
            self.clock.borrow().now
        }

        pub(crate) fn live_repeating(&self) -> usize {
            self.clock
                .borrow()
                .entries
                .values()
                .filter(|e| matches!(e.job, Job::Repeating(..)))
                .count()
        }

        pub(crate) fn live_once(&self) -> usize {
            self.clock
                .borrow()
                .entries
                .values()
                .filter(|e| matches!(e.job, Job::Once(_)))
                .count()
        }

        /// Moves the clock forward by `ms`, firing everything that falls due in order.
        pub(crate) fn advance(&self, ms: u64) {
            let target = self.now() + ms;
            loop {
                let next = {
                    let clock = self.clock.borrow();
                    let next = clock
                        .entries
                        .iter()
                        .filter(|(_, e)| e.due <= target)
                        .min_by_key(|(id, e)| (e.due, **id))
                        .map(|(id, e)| (*id, e.due));
                    next
                };
                let Some((id, due)) = next else { break };
                self.clock.borrow_mut().now = due;
                self.fire(id);
            }
            self.clock.borrow_mut().now = target;
        }

        fn fire(&self, id: u64) {
            let job = {
                let mut clock = self.clock.borrow_mut();
                let once = match clock.entries.get(&id) {
                    Some(entry) => matches!(entry.job, Job::Once(_)),
                    None => return,
                };
                let job = if once {
                    clock.entries.remove(&id).map(|e| e.job)
                } else {
                    match clock.entries.get_mut(&id) {
                        Some(Entry { job: Job::Repeating(period, callback), .. }) => {
                            Some(Job::Repeating(*period, callback.take()))
                        }
                        _ => None,
                    }
                };
                job
            };
            match job {
                Some(Job::Once(Some(callback))) => callback(),
                Some(Job::Repeating(period, Some(mut callback))) => {
                    callback();
                    let mut clock = self.clock.borrow_mut();
                    let now = clock.now;
                    // Still there unless the callback cancelled itself.
                    if let Some(entry) = clock.entries.get_mut(&id) {
                        entry.due = now + u64::from(period);
                        entry.job = Job::Repeating(period, Some(callback));
                    }
                }
                _ => {}
            }
        }

        fn insert(&self, delay_ms: u32, job: Job) -> TimerHandle {
            let mut clock = self.clock.borrow_mut();
            clock.next_id += 1;
            let id = clock.next_id;
            let due = clock.now + u64::from(delay_ms);
            clock.entries.insert(id, Entry { due, job });
            TimerHandle(id)
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule_once(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
            self.insert(delay_ms, Job::Once(Some(callback)))
        }

        fn schedule_repeating(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> TimerHandle {
            self.insert(period_ms, Job::Repeating(period_ms, Some(callback)))
        }

        fn cancel(&self, handle: TimerHandle) {
            self.clock.borrow_mut().entries.remove(&handle.0);
        }
    }
}
