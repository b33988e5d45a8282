use serde::{Deserialize, Serialize};

use crate::{HapticError, Pulse};

/// Startup configuration for the haptic backends.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use rumblekit_haptic::HapticConfig;
///
/// let config = HapticConfig::from_json(r#"{ "android_sdk_version": 29 }"#).unwrap();
/// assert_eq!(config.android_sdk_version, Some(29));
/// assert_eq!(config.heavy.amplitude, 255);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HapticConfig {
    /// Android API level. When unset it is parsed once from the OS
    /// description reported by the vibrator driver.
    pub android_sdk_version: Option<u32>,
    /// Pulse used for light impacts and selection ticks.
    pub light: Pulse,
    /// Pulse used for medium impacts.
    pub medium: Pulse,
    /// Pulse used for heavy impacts.
    pub heavy: Pulse,
}

impl Default for HapticConfig {
    fn default() -> Self {
        Self {
            android_sdk_version: None,
            light: Pulse::LIGHT,
            medium: Pulse::MEDIUM,
            heavy: Pulse::HEAVY,
        }
    }
}

impl HapticConfig {
    /// Parses a configuration from JSON.
    ///
    /// # Errors
    /// Returns [`HapticError::Config`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, HapticError> {
        serde_json::from_str(json).map_err(|e| HapticError::Config(e.to_string()))
    }

    /// Pins the Android API level instead of parsing it from the OS.
    #[must_use]
    pub const fn with_android_sdk_version(mut self, version: u32) -> Self {
        self.android_sdk_version = Some(version);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = HapticConfig::from_json("{}").unwrap();
        assert_eq!(config, HapticConfig::default());
        assert_eq!(config.light, Pulse::new(20, 40));
        assert_eq!(config.medium, Pulse::new(40, 120));
    }

    #[test]
    fn pulses_can_be_tuned() {
        let config = HapticConfig::from_json(
            r#"{ "medium": { "duration_ms": 55, "amplitude": 90 } }"#,
        )
        .unwrap();
        assert_eq!(config.medium, Pulse::new(55, 90));
        assert_eq!(config.heavy, Pulse::HEAVY);
    }

    #[test]
    fn out_of_range_amplitude_is_a_config_error() {
        let err = HapticConfig::from_json(r#"{ "light": { "duration_ms": 20, "amplitude": 300 } }"#)
            .unwrap_err();
        assert!(matches!(err, HapticError::Config(_)));
    }
}
