//! Native bindings for the platform backends.

#[cfg(target_os = "ios")]
pub mod apple;

/// Android platform implementation.
#[cfg(target_os = "android")]
pub mod android;

use crate::HapticBackend;

#[cfg(target_os = "ios")]
pub(crate) fn default_backend() -> Box<dyn HapticBackend> {
    Box::new(crate::ios::IosBackend::new(apple::ExternHaptics))
}

// Android needs a Context from the host, see `android::dispatcher_with_context`.
#[cfg(not(target_os = "ios"))]
pub(crate) fn default_backend() -> Box<dyn HapticBackend> {
    Box::new(crate::NoopBackend)
}
