//! Cross-platform haptic feedback for games.
//!
//! This crate maps a small set of semantic feedback types onto native Android
//! vibration calls and native iOS feedback generators. Everything is routed
//! through a [`Dispatcher`], which picks a backend once at startup and never
//! surfaces an error to the caller: feedback is cosmetic, so failures are
//! logged and dropped.
//!
//! # Usage
//!
//! ```
//! use rumblekit_haptic::{Dispatcher, FeedbackType};
//!
//! let mut haptics = Dispatcher::detect();
//! haptics.initialize();
//! haptics.trigger(FeedbackType::Success);
//! haptics.release();
//! ```
//!
//! On Android the host has to hand over its `Context`; see
//! `sys::android::dispatcher_with_context`.

#![warn(missing_docs)]

pub mod android;
mod backend;
mod config;
mod controller;
mod dispatcher;
mod error;
pub mod ios;
pub mod pattern;
mod platform;
pub mod sys;
pub mod testing;

pub use backend::{HapticBackend, NoopBackend};
pub use config::HapticConfig;
pub use controller::VibrationController;
pub use dispatcher::Dispatcher;
pub use error::HapticError;
pub use pattern::{Pulse, Waveform};
pub use platform::Platform;

/// Semantic kinds of haptic feedback.
///
/// iOS plays these natively; Android approximates them with one-shots and
/// waveforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackType {
    /// A selection change, like a picker wheel tick.
    Selection,
    /// A task completed successfully.
    Success,
    /// A task produced a warning.
    Warning,
    /// A task failed.
    Failure,
    /// A lightweight impact.
    LightImpact,
    /// A medium impact.
    MediumImpact,
    /// A heavy impact.
    HeavyImpact,
}

impl FeedbackType {
    /// Every feedback type, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Selection,
        Self::Success,
        Self::Warning,
        Self::Failure,
        Self::LightImpact,
        Self::MediumImpact,
        Self::HeavyImpact,
    ];

    /// Looks a feedback type up by its position in [`FeedbackType::ALL`].
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}
