#![forbid(unsafe_code)]

//! Padframe runtime.
//!
//! This crate ties the core event/input types and platform seams into the
//! per-frame reconciliation machine:
//!
//! - [`LifecycleMonitor`] - folds asynchronous OS notices into lifecycle flags
//! - [`SoftKeyboardBridge`] - overlay text entry replayed as key presses
//! - [`InputReconciler`] - merges pad, touch, and keyboard into one snapshot
//! - [`SurfaceManager`] - surface lifecycle, scale, and letterbox position
//! - [`Window`] - the orchestrator owning all of the above plus the pump
//! - [`fatal`] - the unrecoverable-error reporter
//!
//! # Role in Padframe
//! `padframe-runtime` is the orchestrator. It consumes platform events
//! through the seams in `padframe-core`, reconciles them once per
//! [`Window::pump`], and delegates presentation to the platform's GPU
//! backend.

pub mod clock;
pub mod fatal;
pub mod input;
pub mod keyboard;
pub mod monitor;
pub mod surface;
pub mod window;

pub use clock::FrameClock;
pub use input::{InputReconciler, ReconcileOutcome};
pub use keyboard::SoftKeyboardBridge;
pub use monitor::LifecycleMonitor;
pub use surface::{BACKING_SIZE, SurfaceError, SurfaceManager};
pub use window::Window;
