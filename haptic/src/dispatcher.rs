use crate::android::{AndroidBackend, Vibrator};
use crate::ios::{HapticsDriver, IosBackend};
use crate::{FeedbackType, HapticBackend, HapticConfig, HapticError, NoopBackend, Platform};

/// Entry point for game code.
///
/// Owns the selected backend and the "haptics initialized" flag. Nothing here
/// returns an error or panics: a failed native call is logged and dropped.
#[derive(Debug)]
pub struct Dispatcher {
    backend: Box<dyn HapticBackend>,
    initialized: bool,
}

impl Dispatcher {
    /// Wraps an already constructed backend.
    #[must_use]
    pub fn new(backend: Box<dyn HapticBackend>) -> Self {
        log::debug!("haptics backend selected for {:?}", backend.platform());
        Self {
            backend,
            initialized: false,
        }
    }

    /// A dispatcher that drops every request.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(Box::new(NoopBackend))
    }

    /// A dispatcher driving an Android vibrator service.
    #[must_use]
    pub fn android<V: Vibrator + 'static>(vibrator: V, config: HapticConfig) -> Self {
        Self::new(Box::new(AndroidBackend::new(vibrator, config)))
    }

    /// A dispatcher driving iOS feedback generators.
    #[must_use]
    pub fn ios<H: HapticsDriver + 'static>(driver: H) -> Self {
        Self::new(Box::new(IosBackend::new(driver)))
    }

    /// Picks a backend for the platform this binary runs on.
    ///
    /// iOS binds to the generator functions linked into the host app.
    /// Android needs the host's `Context`, so it is built through
    /// `sys::android::dispatcher_with_context` instead; here it, like every
    /// other platform, gets the no-op backend.
    #[must_use]
    pub fn detect() -> Self {
        Self::new(crate::sys::default_backend())
    }

    /// The platform the active backend drives.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.backend.platform()
    }

    /// Whether the active backend can play anything at all.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.platform().is_supported()
    }

    /// Whether native resources are currently held.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Prepares native haptic resources. Calling it again, or on an
    /// unsupported platform, is a no-op.
    pub fn initialize(&mut self) {
        if self.initialized || !self.is_supported() {
            return;
        }
        log::info!("initializing haptics");
        report("initialize", self.backend.initialize());
        self.initialized = true;
    }

    /// Releases native haptic resources. Safe to call when not initialized.
    pub fn release(&mut self) {
        if !self.initialized {
            return;
        }
        log::info!("releasing haptics");
        report("release", self.backend.release());
        self.initialized = false;
    }

    /// Plays the given feedback, initializing first if needed.
    pub fn trigger(&mut self, feedback: FeedbackType) {
        if !self.is_supported() {
            return;
        }
        self.initialize();
        log::debug!("haptic feedback {feedback:?}");
        report("trigger", self.backend.trigger(feedback));
    }

    /// Plays a plain medium-strength vibration.
    pub fn vibrate(&mut self) {
        if !self.is_supported() {
            return;
        }
        self.initialize();
        report("vibrate", self.backend.vibrate());
    }

    /// Stops any vibration still playing, where the platform allows it.
    pub fn cancel(&mut self) {
        report("cancel", self.backend.cancel());
    }

    /// OS version reported by the backend.
    #[must_use]
    pub fn os_version(&self) -> Option<String> {
        self.backend.os_version()
    }
}

fn report(action: &str, result: Result<(), HapticError>) {
    if let Err(e) = result {
        log::warn!("haptic {action} failed: {e}");
    }
}
