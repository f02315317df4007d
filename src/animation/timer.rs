use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use super::flag::Flag;
use crate::config::DEFAULT_SETTLE_DELAY;

/// Opaque handle to a scheduled one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// A one-shot timer service.
///
/// Implementations must not run `callback` from inside `schedule` itself;
/// it fires later, from the facility's own event loop.
pub trait TimerFacility {
    /// Run `callback` once after `delay`.
    fn schedule(&self, callback: Box<dyn FnOnce()>, delay: Duration) -> TimerHandle;

    /// Prevent a scheduled callback from running. Unknown or already-fired
    /// handles are ignored.
    fn cancel(&self, handle: TimerHandle);
}

// ---------------------------------------------------------------------------
// DelayedFlagReset
// ---------------------------------------------------------------------------

/// Debounced "stopping/animating" flag pair.
///
/// [`trigger`](Self::trigger) raises both flags and (re)arms a single reset
/// timer; the last trigger wins. When the timer fires both flags drop back to
/// `false`.
pub struct DelayedFlagReset {
    timer: Rc<dyn TimerFacility>,
    default_delay: Duration,
    is_stopping: Flag,
    is_animating: Flag,
    pending: Rc<Cell<Option<TimerHandle>>>,
}

impl DelayedFlagReset {
    /// Create a reset with the default settle delay (300 ms).
    pub fn new(timer: Rc<dyn TimerFacility>) -> Self {
        Self::with_delay(timer, DEFAULT_SETTLE_DELAY)
    }

    pub fn with_delay(timer: Rc<dyn TimerFacility>, default_delay: Duration) -> Self {
        Self {
            timer,
            default_delay,
            is_stopping: Flag::default(),
            is_animating: Flag::default(),
            pending: Rc::new(Cell::new(None)),
        }
    }

    /// Raise both flags and schedule their reset after `custom_delay`, or the
    /// default delay when `None`. A pending reset is cancelled first, so the
    /// delay window restarts from now.
    pub fn trigger(&self, custom_delay: Option<Duration>) {
        self.is_stopping.set(true);
        self.is_animating.set(true);

        if let Some(handle) = self.pending.take() {
            self.timer.cancel(handle);
        }

        let delay = custom_delay.unwrap_or(self.default_delay);
        let is_stopping = self.is_stopping.clone();
        let is_animating = self.is_animating.clone();
        let pending = Rc::clone(&self.pending);

        let handle = self.timer.schedule(
            Box::new(move || {
                is_stopping.set(false);
                is_animating.set(false);
                pending.set(None);
                log::debug!("settle timer fired; flags cleared");
            }),
            delay,
        );
        self.pending.set(Some(handle));
        log::debug!("settle timer armed for {:?}", delay);
    }

    pub fn is_stopping(&self) -> bool {
        self.is_stopping.get()
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating.get()
    }

    pub fn stopping_flag(&self) -> Flag {
        self.is_stopping.clone()
    }

    pub fn animating_flag(&self) -> Flag {
        self.is_animating.clone()
    }

    /// `true` while a reset timer is armed.
    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    pub fn default_delay(&self) -> Duration {
        self.default_delay
    }

    /// Cancel any armed reset timer. The flags keep their current values.
    pub fn dispose(&self) {
        if let Some(handle) = self.pending.take() {
            self.timer.cancel(handle);
        }
    }
}

impl Drop for DelayedFlagReset {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for DelayedFlagReset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayedFlagReset")
            .field("default_delay", &self.default_delay)
            .field("is_stopping", &self.is_stopping())
            .field("is_animating", &self.is_animating())
            .field("pending", &self.pending.get())
            .finish()
    }
}
