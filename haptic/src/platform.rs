/// Platforms a backend can be selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Android, driven through `android.os.Vibrator`.
    Android,
    /// iOS, driven through native feedback generators.
    Ios,
    /// Anything else. All feedback is dropped.
    Unsupported,
}

impl Platform {
    /// The platform this binary was built for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "android") {
            Self::Android
        } else if cfg!(target_os = "ios") {
            Self::Ios
        } else {
            Self::Unsupported
        }
    }

    /// Whether haptic feedback can be played at all.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}
