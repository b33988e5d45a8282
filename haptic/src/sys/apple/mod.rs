//! iOS haptic bindings.
//!
//! The generator functions are plain C symbols provided by the host app (a
//! small Objective-C file wrapping `UISelectionFeedbackGenerator`,
//! `UINotificationFeedbackGenerator` and `UIImpactFeedbackGenerator`).

use std::ffi::CStr;

use objc2_foundation::NSProcessInfo;

use crate::FeedbackType;
use crate::ios::{DeviceGeneration, HapticsDriver};

/// `kSystemSoundID_Vibrate`.
const SYSTEM_SOUND_VIBRATE: u32 = 4095;

#[allow(non_snake_case)]
unsafe extern "C" {
    safe fn InstantiateFeedbackGenerators();
    safe fn ReleaseFeedbackGenerators();
    safe fn SelectionHaptic();
    safe fn SuccessHaptic();
    safe fn WarningHaptic();
    safe fn FailureHaptic();
    safe fn LightImpactHaptic();
    safe fn MediumImpactHaptic();
    safe fn HeavyImpactHaptic();
}

#[allow(non_snake_case)]
#[link(name = "AudioToolbox", kind = "framework")]
unsafe extern "C" {
    safe fn AudioServicesPlaySystemSound(sound: u32);
}

/// Driver calling the generator functions linked into the app.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExternHaptics;

impl HapticsDriver for ExternHaptics {
    fn instantiate_generators(&mut self) {
        InstantiateFeedbackGenerators();
    }

    fn release_generators(&mut self) {
        ReleaseFeedbackGenerators();
    }

    fn play(&mut self, feedback: FeedbackType) {
        match feedback {
            FeedbackType::Selection => SelectionHaptic(),
            FeedbackType::Success => SuccessHaptic(),
            FeedbackType::Warning => WarningHaptic(),
            FeedbackType::Failure => FailureHaptic(),
            FeedbackType::LightImpact => LightImpactHaptic(),
            FeedbackType::MediumImpact => MediumImpactHaptic(),
            FeedbackType::HeavyImpact => HeavyImpactHaptic(),
        }
    }

    fn system_vibrate(&mut self) {
        AudioServicesPlaySystemSound(SYSTEM_SOUND_VIBRATE);
    }

    fn device_generation(&self) -> DeviceGeneration {
        machine_id().map_or(DeviceGeneration::Other, |id| {
            DeviceGeneration::from_machine_id(&id)
        })
    }

    fn system_version(&self) -> Option<String> {
        let version = NSProcessInfo::processInfo().operatingSystemVersion();
        Some(format!(
            "{}.{}.{}",
            version.majorVersion, version.minorVersion, version.patchVersion
        ))
    }
}

/// Hardware model identifier, e.g. `"iPhone10,3"`.
fn machine_id() -> Option<String> {
    // SAFETY: utsname is plain C data; uname fills it and NUL-terminates each field.
    unsafe {
        let mut info: libc::utsname = std::mem::zeroed();
        if libc::uname(&mut info) != 0 {
            log::warn!("uname failed, assuming haptics are available");
            return None;
        }
        let machine = CStr::from_ptr(info.machine.as_ptr());
        Some(machine.to_string_lossy().into_owned())
    }
}
