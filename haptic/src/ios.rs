//! iOS backend.
//!
//! iOS plays every feedback type natively through `UIFeedbackGenerator`
//! subclasses, so this backend only routes the type to the matching native
//! call. Devices without a Taptic Engine get the generic system vibration.
//!
//! Reference: <https://developer.apple.com/documentation/uikit/uifeedbackgenerator>

use std::fmt;

use crate::{FeedbackType, HapticBackend, HapticError, Platform};

/// Hardware generations that matter for haptics support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceGeneration {
    /// iPhone 3G.
    IPhone3G,
    /// iPhone 3GS.
    IPhone3GS,
    /// iPhone 4.
    IPhone4,
    /// iPhone 4S.
    IPhone4S,
    /// iPhone 5.
    IPhone5,
    /// iPhone 5C.
    IPhone5C,
    /// iPhone 5S.
    IPhone5S,
    /// iPhone 6.
    IPhone6,
    /// iPhone 6 Plus.
    IPhone6Plus,
    /// iPhone 6S.
    IPhone6S,
    /// iPhone 6S Plus.
    IPhone6SPlus,
    /// iPod touch, first generation.
    IPodTouch1Gen,
    /// iPod touch, second generation.
    IPodTouch2Gen,
    /// iPod touch, third generation.
    IPodTouch3Gen,
    /// iPod touch, fourth generation.
    IPodTouch4Gen,
    /// Any other model, including everything newer than the above.
    Other,
}

impl DeviceGeneration {
    /// Maps a machine identifier such as `"iPhone8,1"` to a generation.
    #[must_use]
    pub fn from_machine_id(machine: &str) -> Self {
        match machine {
            "iPhone1,2" => Self::IPhone3G,
            "iPhone2,1" => Self::IPhone3GS,
            "iPhone3,1" | "iPhone3,2" | "iPhone3,3" => Self::IPhone4,
            "iPhone4,1" => Self::IPhone4S,
            "iPhone5,1" | "iPhone5,2" => Self::IPhone5,
            "iPhone5,3" | "iPhone5,4" => Self::IPhone5C,
            "iPhone6,1" | "iPhone6,2" => Self::IPhone5S,
            "iPhone7,2" => Self::IPhone6,
            "iPhone7,1" => Self::IPhone6Plus,
            "iPhone8,1" => Self::IPhone6S,
            "iPhone8,2" => Self::IPhone6SPlus,
            "iPod1,1" => Self::IPodTouch1Gen,
            "iPod2,1" => Self::IPodTouch2Gen,
            "iPod3,1" => Self::IPodTouch3Gen,
            "iPod4,1" => Self::IPodTouch4Gen,
            _ => Self::Other,
        }
    }

    /// Whether the device has feedback generator hardware.
    #[must_use]
    pub const fn supports_haptics(self) -> bool {
        matches!(self, Self::Other)
    }
}

/// The native haptics binding.
///
/// On device this is `sys::apple::ExternHaptics`, which calls the functions
/// linked in from the host app. Tests use
/// [`RecordingHaptics`](crate::testing::RecordingHaptics).
pub trait HapticsDriver: Send + fmt::Debug {
    /// `InstantiateFeedbackGenerators`.
    fn instantiate_generators(&mut self);

    /// `ReleaseFeedbackGenerators`.
    fn release_generators(&mut self);

    /// Calls the native function for `feedback`, e.g. `SuccessHaptic`.
    fn play(&mut self, feedback: FeedbackType);

    /// Generic system vibration, for devices without generators.
    fn system_vibrate(&mut self);

    /// The device's hardware generation. Queried on every trigger.
    fn device_generation(&self) -> DeviceGeneration;

    /// OS version as `"major.minor.patch"`.
    fn system_version(&self) -> Option<String>;
}

/// Haptic backend for iOS devices.
#[derive(Debug)]
pub struct IosBackend<H> {
    driver: H,
}

impl<H: HapticsDriver> IosBackend<H> {
    /// Creates a backend around a haptics binding.
    pub const fn new(driver: H) -> Self {
        Self { driver }
    }

    /// Whether this device can play generator feedback.
    pub fn haptics_supported(&self) -> bool {
        self.driver.device_generation().supports_haptics()
    }
}

impl<H: HapticsDriver> HapticBackend for IosBackend<H> {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn initialize(&mut self) -> Result<(), HapticError> {
        self.driver.instantiate_generators();
        Ok(())
    }

    fn release(&mut self) -> Result<(), HapticError> {
        self.driver.release_generators();
        Ok(())
    }

    fn trigger(&mut self, feedback: FeedbackType) -> Result<(), HapticError> {
        if self.haptics_supported() {
            self.driver.play(feedback);
        } else {
            log::debug!("no haptic engine, system vibration for {feedback:?}");
            self.driver.system_vibrate();
        }
        Ok(())
    }

    fn vibrate(&mut self) -> Result<(), HapticError> {
        self.trigger(FeedbackType::MediumImpact)
    }

    fn os_version(&self) -> Option<String> {
        self.driver.system_version()
    }
}
