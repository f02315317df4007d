//! Tick and timer sources driven by the Tokio runtime.
//!
//! Both sources spawn `!Send` tasks with [`tokio::task::spawn_local`], so they
//! must be used from inside a [`tokio::task::LocalSet`] on a current-thread
//! runtime.
//!
//! # Example
//!
//! ```no_run
//! use std::rc::Rc;
//! use std::time::Duration;
//! use tarot_deck::animation::{DelayedFlagReset, TokioTimer};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let local = tokio::task::LocalSet::new();
//!     local
//!         .run_until(async {
//!             let reset = DelayedFlagReset::new(Rc::new(TokioTimer::new()));
//!             reset.trigger(None);
//!             tokio::time::sleep(Duration::from_millis(350)).await;
//!             assert!(!reset.is_stopping());
//!         })
//!         .await;
//! }
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::ticker::{dispatch, TickCallback, TickSource};
use super::timer::{TimerFacility, TimerHandle};

/// Frame period used by [`TokioTicker::default`] (about 60 frames per second).
pub const DEFAULT_FRAME_PERIOD: Duration = Duration::from_micros(16_667);

// ---------------------------------------------------------------------------
// TokioTicker
// ---------------------------------------------------------------------------

/// A tick source backed by [`tokio::time::interval`].
///
/// The interval task only runs while at least one callback is registered.
///
/// A panicking callback ends that tick's dispatch early and is logged at
/// `error` level. The loop keeps running, so the other listeners are ticked
/// again on the next period.
pub struct TokioTicker {
    period: Duration,
    callbacks: Rc<RefCell<Vec<TickCallback>>>,
    task: RefCell<Option<JoinHandle<()>>>,
}

impl TokioTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            callbacks: Rc::default(),
            task: RefCell::new(None),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn listener_count(&self) -> usize {
        self.callbacks.borrow().len()
    }

    fn spawn_loop(&self) -> JoinHandle<()> {
        let callbacks = Rc::clone(&self.callbacks);
        let period = self.period;
        tokio::task::spawn_local(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| dispatch(&callbacks))) {
                    log::error!("tick callback panicked: {}", panic_message(&*payload));
                }
            }
        })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "non-string panic payload"
    }
}

impl Default for TokioTicker {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_PERIOD)
    }
}

impl TickSource for TokioTicker {
    fn add(&self, callback: TickCallback) {
        self.callbacks.borrow_mut().push(callback);
        let mut task = self.task.borrow_mut();
        // A loop whose LocalSet went away has finished and must be replaced.
        if task.as_ref().map_or(true, |t| t.is_finished()) {
            *task = Some(self.spawn_loop());
            log::debug!("tick loop started ({:?} period)", self.period);
        }
    }

    fn remove(&self, callback: &TickCallback) {
        let now_empty = {
            let mut callbacks = self.callbacks.borrow_mut();
            callbacks.retain(|registered| !Rc::ptr_eq(registered, callback));
            callbacks.is_empty()
        };
        if now_empty {
            if let Some(task) = self.task.borrow_mut().take() {
                task.abort();
                log::debug!("tick loop stopped");
            }
        }
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// TokioTimer
// ---------------------------------------------------------------------------

/// A timer facility where every scheduled callback is a sleeping local task.
#[derive(Default)]
pub struct TokioTimer {
    next_id: Cell<u64>,
    tasks: Rc<RefCell<HashMap<u64, JoinHandle<()>>>>,
}

impl TokioTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl TimerFacility for TokioTimer {
    fn schedule(&self, callback: Box<dyn FnOnce()>, delay: Duration) -> TimerHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let tasks = Rc::clone(&self.tasks);
        let task = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            tasks.borrow_mut().remove(&id);
            callback();
        });
        self.tasks.borrow_mut().insert(id, task);
        TimerHandle::new(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        if let Some(task) = self.tasks.borrow_mut().remove(&handle.id()) {
            task.abort();
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for (_, task) in self.tasks.borrow_mut().drain() {
            task.abort();
        }
    }
}
