//! # Rumblekit
//!
//! Vibration and haptic feedback for games on iOS and Android.
//!
//! The feedback types follow Apple's haptic vocabulary (selection, success,
//! warning, failure and three impact strengths). iOS plays them natively;
//! Android approximates them with tuned one-shots and waveforms, falling back
//! to plain timed vibration on devices older than API 26.
//!
//! ## Features
//!
//! - `haptic` (default): the dispatcher, backends and native bindings.
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```rust
//! use rumblekit::haptic::{Dispatcher, FeedbackType, VibrationController};
//!
//! let mut controller = VibrationController::new(Dispatcher::detect());
//! controller.enabled = true;
//! controller.impact();
//! controller.feedback(FeedbackType::Success);
//! ```

#[cfg(feature = "haptic")]
pub use rumblekit_haptic as haptic;
