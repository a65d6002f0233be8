#![forbid(unsafe_code)]

//! Marker names shared with external styling and application code.
//!
//! These strings are the boundary contract: host markup declares panels and
//! triggers with the `data-pushbar-*` attributes, and styling reacts to the
//! classes and root attribute the controller writes.

use bitflags::bitflags;

/// Attribute naming a panel element.
pub const PANEL_ID_ATTR: &str = "data-pushbar-id";
/// Attribute on an open-trigger naming the panel it toggles.
pub const TARGET_ATTR: &str = "data-pushbar-target";
/// Attribute on a close-trigger; the value is optional.
pub const CLOSE_ATTR: &str = "data-pushbar-close";

/// Semantic open marker on a panel.
pub const OPENED_CLASS: &str = "opened";
/// Transition marker on a panel. Set on open, never cleared.
pub const IS_OPEN_CLASS: &str = "is-open";
/// Marker on a trigger element while the panel it opened is open.
pub const TRIGGER_OPEN_CLASS: &str = "open";

/// Lock marker on the document root.
pub const LOCKED_CLASS: &str = "pushbar_locked";
/// Root attribute mirroring the active panel id.
pub const ACTIVE_ATTR: &str = "pushbar";

/// Class of the dismiss-on-click overlay element.
pub const OVERLAY_CLASS: &str = "pushbar_overlay";
/// Class locating the main content element.
pub const MAIN_CONTENT_CLASS: &str = "pushbar_main_content";
/// Blur marker applied to the main content element.
pub const BLUR_CLASS: &str = "pushbar_blur";

bitflags! {
    /// Per-panel presence markers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PanelMarkers: u8 {
        /// `opened`: the panel is currently open.
        const OPENED  = 0b01;
        /// `is-open`: the panel has been opened at least once.
        const IS_OPEN = 0b10;
    }
}

impl PanelMarkers {
    /// Class names for every marker in the set, in declaration order.
    pub fn class_names(self) -> impl Iterator<Item = &'static str> {
        [
            (Self::OPENED, OPENED_CLASS),
            (Self::IS_OPEN, IS_OPEN_CLASS),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
    }

    /// Rebuild a marker set from a class-membership predicate.
    pub fn from_classes(mut has_class: impl FnMut(&str) -> bool) -> Self {
        let mut markers = Self::empty();
        markers.set(Self::OPENED, has_class(OPENED_CLASS));
        markers.set(Self::IS_OPEN, has_class(IS_OPEN_CLASS));
        markers
    }
}

/// Quote a value for use inside a CSS attribute selector.
///
/// Backslashes and double quotes are escaped, and control characters are
/// written as hex escapes, so any id matches literally.
#[must_use]
pub fn css_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            c if c.is_control() => {
                out.push_str(&format!("\\{:x} ", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Selector for the panel element with the given id.
#[must_use]
pub fn panel_selector(id: &str) -> String {
    format!("[{PANEL_ID_ATTR}={}]", css_quote(id))
}

/// Selector for every element carrying `attr`, whatever its value.
#[must_use]
pub fn presence_selector(attr: &str) -> String {
    format!("[{attr}]")
}

/// Selector for the main content element.
#[must_use]
pub fn main_content_selector() -> String {
    format!(".{MAIN_CONTENT_CLASS}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_follow_flags() {
        let names: Vec<_> = PanelMarkers::all().class_names().collect();
        assert_eq!(names, vec!["opened", "is-open"]);
        let names: Vec<_> = PanelMarkers::IS_OPEN.class_names().collect();
        assert_eq!(names, vec!["is-open"]);
        assert_eq!(PanelMarkers::empty().class_names().count(), 0);
    }

    #[test]
    fn from_classes_reads_both_markers() {
        let markers = PanelMarkers::from_classes(|class| class == "is-open");
        assert_eq!(markers, PanelMarkers::IS_OPEN);
    }

    #[test]
    fn panel_selector_quotes_the_id() {
        assert_eq!(panel_selector("left"), r#"[data-pushbar-id="left"]"#);
        assert_eq!(
            panel_selector(r#"a"b\c"#),
            r#"[data-pushbar-id="a\"b\\c"]"#
        );
    }

    #[test]
    fn control_characters_are_hex_escaped() {
        assert_eq!(css_quote("a\nb"), "\"a\\a b\"");
    }

    #[test]
    fn presence_and_main_content_selectors() {
        assert_eq!(presence_selector(TARGET_ATTR), "[data-pushbar-target]");
        assert_eq!(main_content_selector(), ".pushbar_main_content");
    }
}
