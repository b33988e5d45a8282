//! Android backend.
//!
//! Android vibrates a plain motor, so every feedback type is expressed as a
//! one-shot pulse or a waveform. Amplitude control only exists from API 26
//! (`android.os.VibrationEffect`); older devices get duration-only calls with
//! the same timings.
//!
//! Reference: <https://developer.android.com/reference/android/os/Vibrator>

use std::fmt;
use std::sync::OnceLock;

use crate::pattern::{self, Pattern};
use crate::{FeedbackType, HapticBackend, HapticConfig, HapticError, Platform, Pulse, Waveform};

/// First API level with `VibrationEffect` and amplitude control.
pub const AMPLITUDE_MIN_SDK: u32 = 26;

/// An effect built through `android.os.VibrationEffect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VibrationEffect {
    /// `VibrationEffect.createOneShot(long, int)`.
    OneShot {
        /// Duration in milliseconds.
        duration_ms: u64,
        /// Motor strength, 1 to 255.
        amplitude: u8,
    },
    /// `VibrationEffect.createWaveform(long[], int)` or
    /// `VibrationEffect.createWaveform(long[], int[], int)` when the waveform
    /// carries amplitudes.
    Waveform(Waveform),
}

/// The native vibrator service.
///
/// Implemented over JNI by `sys::android::JniVibrator`; tests use
/// [`RecordingVibrator`](crate::testing::RecordingVibrator).
pub trait Vibrator: Send + fmt::Debug {
    /// OS description in the form `"Android OS 8.0.0 / API-26 (...)"`.
    fn os_description(&self) -> Option<String>;

    /// `Vibrator.vibrate(long)`.
    ///
    /// # Errors
    /// Returns an error if the native call fails.
    fn vibrate(&mut self, duration_ms: u64) -> Result<(), HapticError>;

    /// `Vibrator.vibrate(long[], int)`, the pre-26 pattern call.
    ///
    /// # Errors
    /// Returns an error if the native call fails.
    fn vibrate_pattern(
        &mut self,
        timings: &[u64],
        repeat: Option<usize>,
    ) -> Result<(), HapticError>;

    /// `Vibrator.vibrate(VibrationEffect)`. Only valid from API 26.
    ///
    /// # Errors
    /// Returns an error if the native call fails.
    fn vibrate_effect(&mut self, effect: VibrationEffect) -> Result<(), HapticError>;

    /// `Vibrator.cancel()`.
    ///
    /// # Errors
    /// Returns an error if the native call fails.
    fn cancel(&mut self) -> Result<(), HapticError>;
}

/// Extracts the API level from an OS description.
///
/// The level is the run of digits, at most three, right after `API-`, so
/// `"Android OS 8.0.0 / API-26 (OPR6.170623.013/4283548)"` yields `26`. Dashes
/// in the release name before it are ignored.
#[must_use]
pub fn parse_sdk_version(description: &str) -> Option<u32> {
    let (_, rest) = description.split_once("API-")?;
    let digits: String = rest
        .chars()
        .take(3)
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Haptic backend for Android devices.
#[derive(Debug)]
pub struct AndroidBackend<V> {
    vibrator: V,
    config: HapticConfig,
    sdk_version: OnceLock<u32>,
}

impl<V: Vibrator> AndroidBackend<V> {
    /// Creates a backend around a vibrator service.
    pub fn new(vibrator: V, config: HapticConfig) -> Self {
        let sdk_version = OnceLock::new();
        if let Some(version) = config.android_sdk_version {
            let _ = sdk_version.set(version);
        }
        Self {
            vibrator,
            config,
            sdk_version,
        }
    }

    /// Device API level.
    ///
    /// Parsed from the OS description on first use and cached for the life of
    /// the backend. An unreadable description yields `0`, which keeps the
    /// backend on the pre-26 calls.
    pub fn sdk_version(&self) -> u32 {
        *self.sdk_version.get_or_init(|| {
            let description = self.vibrator.os_description();
            let version = description.as_deref().and_then(parse_sdk_version);
            match version {
                Some(version) => log::info!("android API level {version}"),
                None => log::warn!("could not read API level from {description:?}, assuming legacy"),
            }
            version.unwrap_or(0)
        })
    }

    /// Whether the device supports amplitudes and `VibrationEffect`.
    pub fn supports_amplitude(&self) -> bool {
        self.sdk_version() >= AMPLITUDE_MIN_SDK
    }

    /// Vibrates for `duration_ms` at the device's default strength.
    ///
    /// # Errors
    /// Returns an error if the native call fails.
    pub fn vibrate(&mut self, duration_ms: u64) -> Result<(), HapticError> {
        self.vibrator.vibrate(duration_ms)
    }

    /// Vibrates for `duration_ms` at `amplitude`.
    ///
    /// Falls back to [`AndroidBackend::vibrate`] below API 26, whatever the
    /// amplitude. From API 26 an amplitude of `0` means "off" and plays
    /// nothing, since `createOneShot` rejects it.
    ///
    /// # Errors
    /// Returns an error if the native call fails.
    pub fn vibrate_with_amplitude(
        &mut self,
        duration_ms: u64,
        amplitude: u8,
    ) -> Result<(), HapticError> {
        if !self.supports_amplitude() {
            log::debug!("amplitude unsupported, plain {duration_ms}ms vibration");
            return self.vibrator.vibrate(duration_ms);
        }
        if amplitude == 0 {
            return Ok(());
        }
        self.vibrator.vibrate_effect(VibrationEffect::OneShot {
            duration_ms,
            amplitude,
        })
    }

    /// Plays an on/off pattern. `repeat` is the index to loop back to.
    ///
    /// # Errors
    /// Returns an error if the pattern is invalid or the native call fails.
    pub fn vibrate_pattern(
        &mut self,
        timings: &[u64],
        repeat: Option<usize>,
    ) -> Result<(), HapticError> {
        let waveform = Waveform::new(timings.to_vec(), repeat)?;
        self.play(waveform)
    }

    /// Plays a pattern with one amplitude per segment.
    ///
    /// The two slices must have the same length; mismatches are rejected and
    /// nothing is played. Below API 26 the amplitudes are dropped and the
    /// timings played as a plain pattern.
    ///
    /// # Errors
    /// Returns [`HapticError::LengthMismatch`] for mismatched slices, or an
    /// error if the native call fails.
    pub fn vibrate_waveform(
        &mut self,
        timings: &[u64],
        amplitudes: &[u8],
        repeat: Option<usize>,
    ) -> Result<(), HapticError> {
        let waveform = Waveform::with_amplitudes(timings.to_vec(), amplitudes.to_vec(), repeat)?;
        self.play(waveform)
    }

    /// Stops any vibration in progress.
    ///
    /// # Errors
    /// Returns an error if the native call fails.
    pub fn cancel(&mut self) -> Result<(), HapticError> {
        self.vibrator.cancel()
    }

    fn play(&mut self, waveform: Waveform) -> Result<(), HapticError> {
        if self.supports_amplitude() {
            self.vibrator.vibrate_effect(VibrationEffect::Waveform(waveform))
        } else {
            let legacy = waveform.without_amplitudes();
            self.vibrator.vibrate_pattern(legacy.timings(), legacy.repeat())
        }
    }

    fn pulse(&mut self, pulse: Pulse) -> Result<(), HapticError> {
        self.vibrate_with_amplitude(pulse.duration_ms, pulse.amplitude)
    }

    fn pattern(&mut self, pattern: &Pattern) -> Result<(), HapticError> {
        self.play(Waveform::from_pattern(pattern))
    }
}

impl<V: Vibrator> HapticBackend for AndroidBackend<V> {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn trigger(&mut self, feedback: FeedbackType) -> Result<(), HapticError> {
        match feedback {
            FeedbackType::Selection | FeedbackType::LightImpact => self.pulse(self.config.light),
            FeedbackType::MediumImpact => self.pulse(self.config.medium),
            FeedbackType::HeavyImpact => self.pulse(self.config.heavy),
            FeedbackType::Success => self.pattern(&pattern::SUCCESS),
            FeedbackType::Warning => self.pattern(&pattern::WARNING),
            FeedbackType::Failure => self.pattern(&pattern::FAILURE),
        }
    }

    fn vibrate(&mut self) -> Result<(), HapticError> {
        self.vibrator.vibrate(self.config.medium.duration_ms)
    }

    fn cancel(&mut self) -> Result<(), HapticError> {
        self.vibrator.cancel()
    }

    fn os_version(&self) -> Option<String> {
        self.vibrator.os_description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingVibrator, VibratorCall};

    fn backend(sdk: u32) -> (AndroidBackend<RecordingVibrator>, RecordingVibrator) {
        let vibrator = RecordingVibrator::new(format!("Android OS / API-{sdk}"));
        let backend = AndroidBackend::new(vibrator.clone(), HapticConfig::default());
        (backend, vibrator)
    }

    #[test]
    fn parses_api_level_after_api_marker() {
        assert_eq!(
            parse_sdk_version("Android OS 8.0.0 / API-26 (OPR6.170623.013/4283548)"),
            Some(26)
        );
        assert_eq!(parse_sdk_version("Android OS 4.4.2 / API-19 (KOT49H)"), Some(19));
        assert_eq!(parse_sdk_version("Android OS 14 / API-34"), Some(34));
        assert_eq!(parse_sdk_version("Android OS 14"), None);
        assert_eq!(parse_sdk_version("API-"), None);
        assert_eq!(
            parse_sdk_version("Android OS 8.1.0-rc1 / API-27 (OPM1)"),
            Some(27)
        );
        assert_eq!(parse_sdk_version("Android OS 9-beta / API-28"), Some(28));
    }

    #[test]
    fn sdk_version_is_read_once() {
        let (backend, vibrator) = backend(30);
        assert_eq!(backend.sdk_version(), 30);
        assert_eq!(backend.sdk_version(), 30);
        assert_eq!(vibrator.description_reads(), 1);
    }

    #[test]
    fn configured_sdk_skips_os_query() {
        let vibrator = RecordingVibrator::new("garbage");
        let backend = AndroidBackend::new(
            vibrator.clone(),
            HapticConfig::default().with_android_sdk_version(28),
        );
        assert!(backend.supports_amplitude());
        assert_eq!(vibrator.description_reads(), 0);
    }

    #[test]
    fn unreadable_description_means_legacy() {
        let vibrator = RecordingVibrator::new("Android OS");
        let mut backend = AndroidBackend::new(vibrator.clone(), HapticConfig::default());
        assert_eq!(backend.sdk_version(), 0);
        backend.vibrate_with_amplitude(40, 120).unwrap();
        assert_eq!(vibrator.calls(), vec![VibratorCall::Vibrate(40)]);
    }

    #[test]
    fn zero_amplitude_one_shot_depends_on_api_level() {
        let (mut modern, modern_vibrator) = backend(30);
        modern.vibrate_with_amplitude(50, 0).unwrap();
        assert!(modern_vibrator.calls().is_empty());

        let (mut legacy, legacy_vibrator) = backend(25);
        legacy.vibrate_with_amplitude(50, 0).unwrap();
        assert_eq!(legacy_vibrator.calls(), vec![VibratorCall::Vibrate(50)]);
    }

    #[test]
    fn plain_pattern_uses_legacy_call_below_26() {
        let (mut backend, vibrator) = backend(24);
        backend.vibrate_pattern(&[0, 100, 50, 100], Some(0)).unwrap();
        assert_eq!(
            vibrator.calls(),
            vec![VibratorCall::Pattern {
                timings: vec![0, 100, 50, 100],
                repeat: Some(0)
            }]
        );
    }

    #[test]
    fn amplitude_downgrades_below_26() {
        let (mut backend, vibrator) = backend(25);
        backend.vibrate_with_amplitude(80, 255).unwrap();
        assert_eq!(vibrator.calls(), vec![VibratorCall::Vibrate(80)]);
    }

    #[test]
    fn amplitude_waveform_downgrades_to_same_timings() {
        let (mut backend, vibrator) = backend(21);
        backend
            .vibrate_waveform(&[0, 40, 20, 80], &[0, 120, 0, 255], Some(1))
            .unwrap();
        assert_eq!(
            vibrator.calls(),
            vec![VibratorCall::Pattern {
                timings: vec![0, 40, 20, 80],
                repeat: Some(1)
            }]
        );
    }

    #[test]
    fn plain_pattern_uses_effect_from_26() {
        let (mut backend, vibrator) = backend(26);
        backend.vibrate_pattern(&[0, 100, 50, 100], None).unwrap();
        assert_eq!(
            vibrator.calls(),
            vec![VibratorCall::Effect(VibrationEffect::Waveform(
                Waveform::new(vec![0, 100, 50, 100], None).unwrap()
            ))]
        );
    }

    #[test]
    fn mismatched_waveform_never_reaches_the_vibrator() {
        let (mut backend, vibrator) = backend(33);
        let err = backend
            .vibrate_waveform(&[0, 40, 20], &[0, 120], None)
            .unwrap_err();
        assert!(matches!(err, HapticError::LengthMismatch { .. }));
        assert!(vibrator.calls().is_empty());
    }

    #[test]
    fn default_vibration_is_duration_only() {
        let (mut backend, vibrator) = backend(33);
        HapticBackend::vibrate(&mut backend).unwrap();
        assert_eq!(vibrator.calls(), vec![VibratorCall::Vibrate(40)]);
    }

    #[test]
    fn impacts_use_configured_pulses() {
        let vibrator = RecordingVibrator::new("Android OS 13 / API-33");
        let config = HapticConfig {
            heavy: Pulse::new(120, 200),
            ..HapticConfig::default()
        };
        let mut backend = AndroidBackend::new(vibrator.clone(), config);
        backend.trigger(FeedbackType::HeavyImpact).unwrap();
        assert_eq!(
            vibrator.calls(),
            vec![VibratorCall::Effect(VibrationEffect::OneShot {
                duration_ms: 120,
                amplitude: 200
            })]
        );
    }

    #[test]
    fn cancel_reaches_the_vibrator() {
        let (mut backend, vibrator) = backend(33);
        backend.cancel().unwrap();
        assert_eq!(vibrator.calls(), vec![VibratorCall::Cancel]);
    }
}
