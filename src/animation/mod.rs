//! Lifecycle-bound animation helpers.
//!
//! The controllers here never talk to a global clock. They are handed a
//! [`TickSource`] or [`TimerFacility`] at construction, so a view can drive
//! them from its frame loop while tests drive them from [`ManualTicker`] and
//! [`ManualTimer`]. Everything is single-threaded (`Rc`/`Cell`) and `!Send`.
//!
//! Both controllers release their registration when dropped; `dispose()` does
//! the same thing eagerly.

pub mod flag;
pub mod manual;
pub mod ticker;
pub mod timer;
#[cfg(feature = "async")]
pub mod tokio_driver;

pub use flag::Flag;
pub use manual::{ManualTicker, ManualTimer};
pub use ticker::{PeriodicCallbackController, TickCallback, TickSource};
pub use timer::{DelayedFlagReset, TimerFacility, TimerHandle};
#[cfg(feature = "async")]
pub use tokio_driver::{TokioTicker, TokioTimer};
