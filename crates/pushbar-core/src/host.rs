#![forbid(unsafe_code)]

//! The page seen through the controller's eyes.
//!
//! [`PanelHost`] is the seam between the state machine and whatever holds the
//! panel elements. Hosts are looked up on every operation; the controller
//! never caches panel handles, so panels added or removed between calls are
//! tolerated.

use crate::binder::TriggerKind;
use crate::markers::PanelMarkers;
use crate::notify::PanelEvent;
use crate::panel::PanelId;

/// Root-level markers derived from stack state.
///
/// Hosts write this projection verbatim. Nothing else writes the root lock
/// class or the active-id attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootProjection<'a> {
    /// `pushbar_locked` class present.
    pub locked: bool,
    /// `pushbar` attribute value; `None` removes the attribute.
    pub active: Option<&'a PanelId>,
}

/// Page operations required by [`crate::PanelStackController`].
pub trait PanelHost {
    /// Handle to a panel element.
    type Panel;
    /// Handle to a trigger element.
    type Trigger: Clone;

    /// Find the panel whose id matches exactly.
    fn find_panel(&self, id: &PanelId) -> Option<Self::Panel>;

    /// Markers currently present on `panel`.
    fn panel_markers(&self, panel: &Self::Panel) -> PanelMarkers;

    /// Add `markers` to `panel`. Markers already present stay present.
    fn insert_panel_markers(&mut self, panel: &Self::Panel, markers: PanelMarkers);

    /// Remove `markers` from `panel`.
    fn remove_panel_markers(&mut self, panel: &Self::Panel, markers: PanelMarkers);

    /// Deliver a lifecycle notification on its panel.
    fn emit(&mut self, event: PanelEvent<'_, Self::Panel>);

    /// Write the root lock class and active-id attribute.
    fn project_root(&mut self, root: RootProjection<'_>);

    /// Every trigger of `kind` with its raw declared value.
    fn scan_triggers(&self, kind: TriggerKind) -> Vec<(Self::Trigger, Option<String>)>;

    /// Toggle the `open` class on a trigger element.
    fn set_trigger_open(&mut self, trigger: &Self::Trigger, open: bool);

    /// Create and attach the dismiss overlay.
    fn mount_overlay(&mut self);

    /// Apply the blur marker to the main content element.
    ///
    /// Returns `false` when there is no main content element.
    fn blur_main_content(&mut self) -> bool;
}
