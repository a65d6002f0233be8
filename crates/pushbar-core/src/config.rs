#![forbid(unsafe_code)]

//! Construction-time configuration.

/// Options accepted when a controller is constructed.
///
/// Unknown options are ignored and missing ones default to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PushbarConfig {
    /// Create an overlay element that closes the active panel when clicked.
    pub overlay: bool,
    /// Mark the main content element with the blur class, if it exists.
    pub blur: bool,
}

impl PushbarConfig {
    /// Configuration with every option disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            overlay: false,
            blur: false,
        }
    }

    /// Set whether the dismiss overlay is created.
    #[must_use]
    pub const fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }

    /// Set whether the main content is blurred.
    #[must_use]
    pub const fn with_blur(mut self, blur: bool) -> Self {
        self.blur = blur;
        self
    }
}
