use thiserror::Error;

/// Errors that can occur when driving the vibration hardware.
///
/// These only reach callers that use a backend directly. The
/// [`Dispatcher`](crate::Dispatcher) logs and drops them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HapticError {
    /// Haptic feedback is not supported on this platform.
    #[error("haptic feedback not supported")]
    NotSupported,

    /// Per-segment amplitudes were given for a different number of segments.
    #[error("pattern has {timings} timings but {amplitudes} amplitudes")]
    LengthMismatch {
        /// Number of timing entries.
        timings: usize,
        /// Number of amplitude entries.
        amplitudes: usize,
    },

    /// The repeat index points past the end of the pattern.
    #[error("repeat index {index} is out of bounds for a pattern of {len} entries")]
    InvalidRepeat {
        /// Requested repeat index.
        index: usize,
        /// Pattern length.
        len: usize,
    },

    /// A waveform needs at least one timing entry.
    #[error("vibration pattern is empty")]
    EmptyPattern,

    /// The native platform call failed.
    #[error("platform error: {0}")]
    Platform(String),

    /// The configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}
