#![forbid(unsafe_code)]

//! Keyboard input as seen by the escape-key listener.

/// Legacy DOM `keyCode` for Escape.
pub const ESCAPE_KEY_CODE: u32 = 27;

/// A released key, reduced to what the binder routes on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    /// Any other key, carrying the DOM `key` value for logging.
    Other(String),
}

impl Key {
    /// Normalize a DOM keyboard event.
    ///
    /// Prefers the logical `key` value and falls back to the legacy numeric
    /// `keyCode`, which older browsers still report alone.
    #[must_use]
    pub fn from_dom(key: &str, key_code: u32) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            _ if key_code == ESCAPE_KEY_CODE => Self::Escape,
            _ => Self::Other(key.to_owned()),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_escape(&self) -> bool {
        matches!(self, Self::Escape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_by_key_name() {
        assert_eq!(Key::from_dom("Escape", 0), Key::Escape);
        assert_eq!(Key::from_dom("Esc", 0), Key::Escape);
    }

    #[test]
    fn escape_by_legacy_key_code() {
        assert!(Key::from_dom("", 27).is_escape());
        assert!(Key::from_dom("Unidentified", 27).is_escape());
    }

    #[test]
    fn other_keys_keep_their_name() {
        assert_eq!(Key::from_dom("Enter", 13), Key::Other("Enter".into()));
        assert!(!Key::from_dom("e", 69).is_escape());
    }
}
