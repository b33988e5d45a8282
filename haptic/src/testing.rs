//! Recording drivers for tests and headless runs.
//!
//! Both doubles are cheap handles over shared state: clone one, give the
//! clone to a backend, and inspect the calls through the original.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::android::{VibrationEffect, Vibrator};
use crate::ios::{DeviceGeneration, HapticsDriver};
use crate::{FeedbackType, HapticError};

/// A call received by [`RecordingVibrator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VibratorCall {
    /// `vibrate(long)`.
    Vibrate(u64),
    /// `vibrate(long[], int)`.
    Pattern {
        /// Pattern timings.
        timings: Vec<u64>,
        /// Repeat index.
        repeat: Option<usize>,
    },
    /// `vibrate(VibrationEffect)`.
    Effect(VibrationEffect),
    /// `cancel()`.
    Cancel,
}

#[derive(Debug, Default)]
struct VibratorState {
    calls: Vec<VibratorCall>,
    description_reads: usize,
    failure: Option<String>,
}

/// A [`Vibrator`] that records every call instead of vibrating.
#[derive(Debug, Clone)]
pub struct RecordingVibrator {
    description: String,
    state: Arc<Mutex<VibratorState>>,
}

impl RecordingVibrator {
    /// Creates a vibrator reporting `description` as its OS string.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            state: Arc::default(),
        }
    }

    /// Makes every subsequent native call fail with `message`.
    #[must_use]
    pub fn failing(self, message: impl Into<String>) -> Self {
        self.lock().failure = Some(message.into());
        self
    }

    /// Calls received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<VibratorCall> {
        self.lock().calls.clone()
    }

    /// How often the OS description was queried.
    #[must_use]
    pub fn description_reads(&self) -> usize {
        self.lock().description_reads
    }

    fn lock(&self) -> MutexGuard<'_, VibratorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: VibratorCall) -> Result<(), HapticError> {
        let mut state = self.lock();
        if let Some(message) = &state.failure {
            return Err(HapticError::Platform(message.clone()));
        }
        state.calls.push(call);
        Ok(())
    }
}

impl Vibrator for RecordingVibrator {
    fn os_description(&self) -> Option<String> {
        self.lock().description_reads += 1;
        Some(self.description.clone())
    }

    fn vibrate(&mut self, duration_ms: u64) -> Result<(), HapticError> {
        self.record(VibratorCall::Vibrate(duration_ms))
    }

    fn vibrate_pattern(
        &mut self,
        timings: &[u64],
        repeat: Option<usize>,
    ) -> Result<(), HapticError> {
        self.record(VibratorCall::Pattern {
            timings: timings.to_vec(),
            repeat,
        })
    }

    fn vibrate_effect(&mut self, effect: VibrationEffect) -> Result<(), HapticError> {
        self.record(VibratorCall::Effect(effect))
    }

    fn cancel(&mut self) -> Result<(), HapticError> {
        self.record(VibratorCall::Cancel)
    }
}

/// A call received by [`RecordingHaptics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticsCall {
    /// `InstantiateFeedbackGenerators`.
    Instantiate,
    /// `ReleaseFeedbackGenerators`.
    Release,
    /// One of the seven generator calls.
    Play(FeedbackType),
    /// The generic system vibration.
    SystemVibrate,
}

/// A [`HapticsDriver`] that records every call.
#[derive(Debug, Clone)]
pub struct RecordingHaptics {
    generation: DeviceGeneration,
    calls: Arc<Mutex<Vec<HapticsCall>>>,
}

impl RecordingHaptics {
    /// Creates a driver pretending to run on `generation`.
    #[must_use]
    pub fn new(generation: DeviceGeneration) -> Self {
        Self {
            generation,
            calls: Arc::default(),
        }
    }

    /// Calls received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<HapticsCall> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<HapticsCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HapticsDriver for RecordingHaptics {
    fn instantiate_generators(&mut self) {
        self.lock().push(HapticsCall::Instantiate);
    }

    fn release_generators(&mut self) {
        self.lock().push(HapticsCall::Release);
    }

    fn play(&mut self, feedback: FeedbackType) {
        self.lock().push(HapticsCall::Play(feedback));
    }

    fn system_vibrate(&mut self) {
        self.lock().push(HapticsCall::SystemVibrate);
    }

    fn device_generation(&self) -> DeviceGeneration {
        self.generation
    }

    fn system_version(&self) -> Option<String> {
        Some("17.0.0".to_string())
    }
}
