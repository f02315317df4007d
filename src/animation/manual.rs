//! Deterministic tick and timer sources.
//!
//! Nothing happens until the owner calls [`ManualTicker::tick`] or
//! [`ManualTimer::advance`]. Useful for headless rendering and for tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use super::ticker::{dispatch, TickCallback, TickSource};
use super::timer::{TimerFacility, TimerHandle};

// ---------------------------------------------------------------------------
// ManualTicker
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct ManualTicker {
    callbacks: RefCell<Vec<TickCallback>>,
    ticks: Cell<u64>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit one tick to every registered callback.
    pub fn tick(&self) {
        self.ticks.set(self.ticks.get() + 1);
        dispatch(&self.callbacks);
    }

    pub fn tick_n(&self, n: usize) {
        for _ in 0..n {
            self.tick();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.callbacks.borrow().len()
    }

    /// Number of ticks emitted so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks.get()
    }
}

impl TickSource for ManualTicker {
    fn add(&self, callback: TickCallback) {
        self.callbacks.borrow_mut().push(callback);
    }

    fn remove(&self, callback: &TickCallback) {
        self.callbacks
            .borrow_mut()
            .retain(|registered| !Rc::ptr_eq(registered, callback));
    }
}

// ---------------------------------------------------------------------------
// ManualTimer
// ---------------------------------------------------------------------------

struct Scheduled {
    handle: TimerHandle,
    due: Duration,
    callback: Box<dyn FnOnce()>,
}

/// A virtual clock starting at zero.
#[derive(Default)]
pub struct ManualTimer {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    queue: RefCell<Vec<Scheduled>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Move the clock forward by `by`, firing every timer that comes due.
    ///
    /// Timers fire in due-time order (ties in scheduling order), and each one
    /// observes [`now`](Self::now) equal to its due time. Timers scheduled by
    /// a firing callback also fire if they fall inside the window.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        while let Some(next) = self.pop_due(target) {
            self.now.set(next.due);
            (next.callback)();
        }
        self.now.set(target);
    }

    fn pop_due(&self, target: Duration) -> Option<Scheduled> {
        let mut queue = self.queue.borrow_mut();
        let idx = queue
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= target)
            .min_by_key(|(_, s)| (s.due, s.handle))
            .map(|(idx, _)| idx)?;
        Some(queue.remove(idx))
    }
}

impl TimerFacility for ManualTimer {
    fn schedule(&self, callback: Box<dyn FnOnce()>, delay: Duration) -> TimerHandle {
        let handle = TimerHandle::new(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.queue.borrow_mut().push(Scheduled {
            handle,
            due: self.now.get() + delay,
            callback,
        });
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        self.queue.borrow_mut().retain(|s| s.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_fire_in_due_order_with_clock_at_due_time() {
        let timer = Rc::new(ManualTimer::new());
        let log: Rc<RefCell<Vec<(u64, Duration)>>> = Rc::default();

        for (tag, ms) in [(1u64, 30u64), (2, 10), (3, 20)] {
            let log = Rc::clone(&log);
            let clock = Rc::downgrade(&timer);
            timer.schedule(
                Box::new(move || {
                    let now = clock.upgrade().map(|t| t.now()).unwrap_or_default();
                    log.borrow_mut().push((tag, now));
                }),
                Duration::from_millis(ms),
            );
        }

        timer.advance(Duration::from_millis(25));
        assert_eq!(
            *log.borrow(),
            vec![(2, Duration::from_millis(10)), (3, Duration::from_millis(20))]
        );
        assert_eq!(timer.now(), Duration::from_millis(25));
        assert_eq!(timer.pending_count(), 1);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let timer = ManualTimer::new();
        let fired = Rc::new(Cell::new(false));
        let f = Rc::clone(&fired);
        let handle = timer.schedule(Box::new(move || f.set(true)), Duration::from_millis(5));
        timer.cancel(handle);
        timer.cancel(handle);
        timer.advance(Duration::from_secs(1));
        assert!(!fired.get());
    }

    #[test]
    fn callback_removed_mid_tick_is_skipped() {
        let ticker = Rc::new(ManualTicker::new());
        let hits = Rc::new(Cell::new(0));

        let second: TickCallback = {
            let hits = Rc::clone(&hits);
            Rc::new(move || hits.set(hits.get() + 1))
        };
        let first: TickCallback = {
            let ticker = Rc::downgrade(&ticker);
            let second = Rc::clone(&second);
            Rc::new(move || {
                if let Some(ticker) = ticker.upgrade() {
                    ticker.remove(&second);
                }
            })
        };

        ticker.add(first);
        ticker.add(second);
        ticker.tick();
        assert_eq!(hits.get(), 0);
        assert_eq!(ticker.listener_count(), 1);
    }
}
