use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::flag::Flag;

/// A callback registered with a [`TickSource`]. Identity is the `Rc`
/// allocation: `remove` drops the entry that is pointer-equal to its argument.
pub type TickCallback = Rc<dyn Fn()>;

/// A per-frame notification source.
pub trait TickSource {
    /// Register `callback` to be invoked on every tick.
    fn add(&self, callback: TickCallback);

    /// Deregister `callback`. Removing a callback that is not registered is a
    /// no-op.
    fn remove(&self, callback: &TickCallback);
}

/// Invoke every callback in `callbacks` once.
///
/// Dispatch runs over a snapshot, so callbacks may add or remove listeners
/// while it runs. A listener removed mid-dispatch is skipped if it has not
/// been reached yet; one added mid-dispatch first fires on the next tick.
pub(crate) fn dispatch(callbacks: &RefCell<Vec<TickCallback>>) {
    let snapshot: Vec<TickCallback> = callbacks.borrow().clone();
    for callback in snapshot {
        let still_registered = callbacks
            .borrow()
            .iter()
            .any(|registered| Rc::ptr_eq(registered, &callback));
        if still_registered {
            callback();
        }
    }
}

// ---------------------------------------------------------------------------
// PeriodicCallbackController
// ---------------------------------------------------------------------------

/// Attaches a callback to a [`TickSource`] with idempotent start/stop.
///
/// The controller holds at most one registration at a time. Dropping it (or
/// calling [`dispose`](Self::dispose)) detaches the callback, so no
/// registration outlives the owner.
///
/// A panic inside the callback is not caught here; it unwinds through the
/// tick source's dispatch.
pub struct PeriodicCallbackController {
    source: Rc<dyn TickSource>,
    callback: Rc<dyn Fn()>,
    trampoline: RefCell<Option<TickCallback>>,
    running: Flag,
}

impl PeriodicCallbackController {
    pub fn new<F>(source: Rc<dyn TickSource>, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        Self {
            source,
            callback: Rc::new(callback),
            trampoline: RefCell::new(None),
            running: Flag::default(),
        }
    }

    /// Start invoking the callback on every tick. No-op while running.
    pub fn start(&self) {
        if self.running.get() || self.trampoline.borrow().is_some() {
            return;
        }

        let callback = Rc::clone(&self.callback);
        let trampoline: TickCallback = Rc::new(move || callback());
        self.source.add(Rc::clone(&trampoline));
        *self.trampoline.borrow_mut() = Some(trampoline);
        self.running.set(true);
        log::debug!("periodic callback attached to tick source");
    }

    /// Stop invoking the callback. No-op while idle.
    ///
    /// A tick that is already dispatching the callback is not interrupted.
    pub fn stop(&self) {
        let trampoline = self.trampoline.borrow_mut().take();
        if let Some(trampoline) = trampoline {
            self.source.remove(&trampoline);
            log::debug!("periodic callback detached from tick source");
        }
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// A shared view of the running state.
    pub fn running_flag(&self) -> Flag {
        self.running.clone()
    }

    /// Release the tick registration. Safe to call more than once.
    pub fn dispose(&self) {
        self.stop();
    }
}

impl Drop for PeriodicCallbackController {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for PeriodicCallbackController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeriodicCallbackController")
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}
