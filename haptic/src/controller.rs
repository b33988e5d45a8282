use crate::{Dispatcher, FeedbackType};

/// Game-side owner of the haptics.
///
/// Initializes the generators when created and releases them when dropped.
/// `enabled` is the player's setting; while it is off, nothing reaches the
/// dispatcher.
#[derive(Debug)]
pub struct VibrationController {
    dispatcher: Dispatcher,
    /// Whether gameplay events should produce feedback.
    pub enabled: bool,
}

impl VibrationController {
    /// Takes over `dispatcher` and prepares its native resources.
    #[must_use]
    pub fn new(mut dispatcher: Dispatcher) -> Self {
        dispatcher.initialize();
        Self {
            dispatcher,
            enabled: false,
        }
    }

    /// Feedback for the ball hitting something.
    pub fn impact(&mut self) {
        self.feedback(FeedbackType::LightImpact);
    }

    /// Plays `feedback` if vibration is enabled.
    pub fn feedback(&mut self, feedback: FeedbackType) {
        if !self.enabled {
            return;
        }
        self.dispatcher.trigger(feedback);
    }

    /// The underlying dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

impl Drop for VibrationController {
    fn drop(&mut self) {
        self.dispatcher.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ios::DeviceGeneration;
    use crate::testing::{HapticsCall, RecordingHaptics};

    #[test]
    fn lifecycle_follows_the_controller() {
        let haptics = RecordingHaptics::new(DeviceGeneration::Other);
        let mut controller = VibrationController::new(Dispatcher::ios(haptics.clone()));
        assert!(controller.dispatcher().is_initialized());

        controller.impact();
        controller.enabled = true;
        controller.impact();
        drop(controller);

        assert_eq!(
            haptics.calls(),
            vec![
                HapticsCall::Instantiate,
                HapticsCall::Play(FeedbackType::LightImpact),
                HapticsCall::Release,
            ]
        );
    }
}
