//! Fixed vibration tables and validated waveforms.
//!
//! Android has no notion of a "success" or "failure" haptic, so those are
//! approximated with short on/off waveforms built from the three impact
//! pulses: success is light then heavy, warning is heavy then medium, failure
//! is medium, medium, heavy, light.

use serde::{Deserialize, Serialize};

use crate::HapticError;

/// Duration of a light pulse, in milliseconds.
pub const LIGHT_DURATION_MS: u64 = 20;
/// Duration of a medium pulse, in milliseconds.
pub const MEDIUM_DURATION_MS: u64 = 40;
/// Duration of a heavy pulse, in milliseconds.
pub const HEAVY_DURATION_MS: u64 = 80;

/// Amplitude of a light pulse.
pub const LIGHT_AMPLITUDE: u8 = 40;
/// Amplitude of a medium pulse.
pub const MEDIUM_AMPLITUDE: u8 = 120;
/// Amplitude of a heavy pulse.
pub const HEAVY_AMPLITUDE: u8 = 255;

/// A single vibration burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pulse {
    /// How long the motor runs, in milliseconds.
    pub duration_ms: u64,
    /// Motor strength; `0` is off, `255` is the strongest the device allows.
    pub amplitude: u8,
}

impl Pulse {
    /// Light impact pulse.
    pub const LIGHT: Self = Self::new(LIGHT_DURATION_MS, LIGHT_AMPLITUDE);
    /// Medium impact pulse.
    pub const MEDIUM: Self = Self::new(MEDIUM_DURATION_MS, MEDIUM_AMPLITUDE);
    /// Heavy impact pulse.
    pub const HEAVY: Self = Self::new(HEAVY_DURATION_MS, HEAVY_AMPLITUDE);

    /// Creates a pulse.
    #[must_use]
    pub const fn new(duration_ms: u64, amplitude: u8) -> Self {
        Self {
            duration_ms,
            amplitude,
        }
    }
}

/// A compile-time waveform: timings paired with per-segment amplitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    /// Segment durations in milliseconds. The first entry is the initial delay.
    pub timings: &'static [u64],
    /// Segment amplitudes, one per timing.
    pub amplitudes: &'static [u8],
}

/// Light then heavy.
pub const SUCCESS: Pattern = Pattern {
    timings: &[0, LIGHT_DURATION_MS, LIGHT_DURATION_MS, HEAVY_DURATION_MS],
    amplitudes: &[0, LIGHT_AMPLITUDE, 0, HEAVY_AMPLITUDE],
};

/// Heavy then medium.
pub const WARNING: Pattern = Pattern {
    timings: &[0, HEAVY_DURATION_MS, LIGHT_DURATION_MS, MEDIUM_DURATION_MS],
    amplitudes: &[0, HEAVY_AMPLITUDE, 0, MEDIUM_AMPLITUDE],
};

/// Medium, medium, heavy, light.
pub const FAILURE: Pattern = Pattern {
    timings: &[
        0,
        MEDIUM_DURATION_MS,
        LIGHT_DURATION_MS,
        MEDIUM_DURATION_MS,
        LIGHT_DURATION_MS,
        HEAVY_DURATION_MS,
        LIGHT_DURATION_MS,
        LIGHT_DURATION_MS,
    ],
    amplitudes: &[
        0,
        MEDIUM_AMPLITUDE,
        0,
        MEDIUM_AMPLITUDE,
        0,
        HEAVY_AMPLITUDE,
        0,
        LIGHT_AMPLITUDE,
    ],
};

/// A validated on/off waveform, ready to hand to a driver.
///
/// `timings[0]` is the delay before the motor first turns on; the following
/// entries alternate between on and off durations. When amplitudes are
/// present, segments with amplitude `0` are off regardless of position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waveform {
    timings: Vec<u64>,
    amplitudes: Option<Vec<u8>>,
    repeat: Option<usize>,
}

impl Waveform {
    /// Creates a waveform without per-segment amplitudes.
    ///
    /// `repeat` is the index to loop back to, or `None` to play once.
    ///
    /// # Errors
    /// Returns [`HapticError::EmptyPattern`] for empty timings and
    /// [`HapticError::InvalidRepeat`] if `repeat` is out of bounds.
    pub fn new(timings: Vec<u64>, repeat: Option<usize>) -> Result<Self, HapticError> {
        check_shape(&timings, repeat)?;
        Ok(Self {
            timings,
            amplitudes: None,
            repeat,
        })
    }

    /// Creates a waveform with one amplitude per timing.
    ///
    /// Mismatched lengths are rejected rather than truncated.
    ///
    /// # Errors
    /// Returns [`HapticError::LengthMismatch`] when the two slices differ in
    /// length, plus the errors of [`Waveform::new`].
    pub fn with_amplitudes(
        timings: Vec<u64>,
        amplitudes: Vec<u8>,
        repeat: Option<usize>,
    ) -> Result<Self, HapticError> {
        check_shape(&timings, repeat)?;
        if timings.len() != amplitudes.len() {
            return Err(HapticError::LengthMismatch {
                timings: timings.len(),
                amplitudes: amplitudes.len(),
            });
        }
        Ok(Self {
            timings,
            amplitudes: Some(amplitudes),
            repeat,
        })
    }

    /// Builds a one-time waveform from a fixed pattern.
    #[must_use]
    pub fn from_pattern(pattern: &Pattern) -> Self {
        Self {
            timings: pattern.timings.to_vec(),
            amplitudes: Some(pattern.amplitudes.to_vec()),
            repeat: None,
        }
    }

    /// Segment durations in milliseconds.
    #[must_use]
    pub fn timings(&self) -> &[u64] {
        &self.timings
    }

    /// Per-segment amplitudes, if any.
    #[must_use]
    pub fn amplitudes(&self) -> Option<&[u8]> {
        self.amplitudes.as_deref()
    }

    /// Index to loop back to, or `None` to play once.
    #[must_use]
    pub const fn repeat(&self) -> Option<usize> {
        self.repeat
    }

    /// The same waveform with amplitudes dropped, for devices that only
    /// understand on/off patterns.
    #[must_use]
    pub fn without_amplitudes(&self) -> Self {
        Self {
            timings: self.timings.clone(),
            amplitudes: None,
            repeat: self.repeat,
        }
    }

    /// Length of one pass through the waveform.
    #[must_use]
    pub fn total_duration_ms(&self) -> u64 {
        self.timings.iter().sum()
    }
}

fn check_shape(timings: &[u64], repeat: Option<usize>) -> Result<(), HapticError> {
    if timings.is_empty() {
        return Err(HapticError::EmptyPattern);
    }
    match repeat {
        Some(index) if index >= timings.len() => Err(HapticError::InvalidRepeat {
            index,
            len: timings.len(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_patterns_pair_every_timing_with_an_amplitude() {
        for pattern in [SUCCESS, WARNING, FAILURE] {
            assert_eq!(pattern.timings.len(), pattern.amplitudes.len());
            assert_eq!(pattern.timings[0], 0);
            assert_eq!(pattern.amplitudes[0], 0);
        }
    }

    #[test]
    fn failure_pattern_matches_table() {
        assert_eq!(FAILURE.timings, &[0, 40, 20, 40, 20, 80, 20, 20]);
        assert_eq!(FAILURE.amplitudes, &[0, 120, 0, 120, 0, 255, 0, 40]);
    }

    #[test]
    fn mismatched_amplitudes_are_rejected() {
        let err = Waveform::with_amplitudes(vec![0, 20, 20], vec![0, 40], None).unwrap_err();
        assert_eq!(
            err,
            HapticError::LengthMismatch {
                timings: 3,
                amplitudes: 2
            }
        );

        let err = Waveform::with_amplitudes(vec![0, 20], vec![0, 40, 0], None).unwrap_err();
        assert!(matches!(err, HapticError::LengthMismatch { .. }));
    }

    #[test]
    fn repeat_must_point_inside_the_pattern() {
        assert!(Waveform::new(vec![0, 10, 10], Some(2)).is_ok());
        assert_eq!(
            Waveform::new(vec![0, 10, 10], Some(3)).unwrap_err(),
            HapticError::InvalidRepeat { index: 3, len: 3 }
        );
    }

    #[test]
    fn empty_pattern_is_rejected() {
        assert_eq!(
            Waveform::new(Vec::new(), None).unwrap_err(),
            HapticError::EmptyPattern
        );
        assert_eq!(
            Waveform::with_amplitudes(Vec::new(), Vec::new(), None).unwrap_err(),
            HapticError::EmptyPattern
        );
    }

    #[test]
    fn dropping_amplitudes_keeps_timing() {
        let waveform = Waveform::from_pattern(&WARNING);
        let plain = waveform.without_amplitudes();
        assert_eq!(plain.amplitudes(), None);
        assert_eq!(plain.timings(), waveform.timings());
        assert_eq!(plain.total_duration_ms(), 140);
    }
}
