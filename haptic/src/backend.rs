use std::fmt;

use crate::{FeedbackType, HapticError, Platform};

/// A platform's way of turning feedback types into native calls.
///
/// Backends are selected once at startup and driven by the
/// [`Dispatcher`](crate::Dispatcher), which owns the initialization flag:
/// `initialize` is only called while uninitialized, `release` only while
/// initialized, and `trigger`/`vibrate` always run after `initialize`.
pub trait HapticBackend: Send + fmt::Debug {
    /// The platform this backend drives.
    fn platform(&self) -> Platform;

    /// Acquires native resources.
    ///
    /// # Errors
    /// Returns an error if the native call fails.
    fn initialize(&mut self) -> Result<(), HapticError> {
        Ok(())
    }

    /// Releases what [`HapticBackend::initialize`] acquired.
    ///
    /// # Errors
    /// Returns an error if the native call fails.
    fn release(&mut self) -> Result<(), HapticError> {
        Ok(())
    }

    /// Plays the given feedback.
    ///
    /// # Errors
    /// Returns an error if the native call fails.
    fn trigger(&mut self, feedback: FeedbackType) -> Result<(), HapticError>;

    /// Plays the platform's default medium-strength vibration.
    ///
    /// # Errors
    /// Returns an error if the native call fails.
    fn vibrate(&mut self) -> Result<(), HapticError>;

    /// Stops any vibration still playing.
    ///
    /// # Errors
    /// Returns an error if the native call fails.
    fn cancel(&mut self) -> Result<(), HapticError> {
        Ok(())
    }

    /// Human-readable OS version, if the platform reports one.
    fn os_version(&self) -> Option<String> {
        None
    }
}

/// Backend for platforms without haptics. Every call succeeds and does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopBackend;

impl HapticBackend for NoopBackend {
    fn platform(&self) -> Platform {
        Platform::Unsupported
    }

    fn trigger(&mut self, feedback: FeedbackType) -> Result<(), HapticError> {
        log::debug!("haptics unsupported, dropping {feedback:?}");
        Ok(())
    }

    fn vibrate(&mut self) -> Result<(), HapticError> {
        Ok(())
    }
}
