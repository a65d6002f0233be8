#![forbid(unsafe_code)]

//! In-memory page host.
//!
//! [`MemoryHost`] models the parts of a page the controller touches: panels
//! with class markers, trigger elements, the root element, an optional main
//! content element and the overlay. It records every notification together
//! with the marker state visible at the moment of emission, which makes the
//! ordering guarantees observable without a browser.

use crate::binder::TriggerKind;
use crate::host::{PanelHost, RootProjection};
use crate::markers::PanelMarkers;
use crate::notify::{PanelEvent, PanelEventKind};
use crate::panel::PanelId;

/// Handle to a panel slot in a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelKey(usize);

/// Handle to a trigger in a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerKey(usize);

/// A notification as observed by a listener on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub kind: PanelEventKind,
    /// Id of the panel the event was dispatched on.
    pub panel: String,
    /// Whether the panel carried `opened` when the event fired.
    pub panel_opened: bool,
    /// Root lock marker when the event fired.
    pub root_locked: bool,
    /// Root active-id attribute when the event fired.
    pub root_active: Option<String>,
    pub bubbles: bool,
}

#[derive(Debug, Clone)]
struct MemoryPanel {
    id: String,
    markers: PanelMarkers,
}

#[derive(Debug, Clone)]
struct MemoryTrigger {
    kind: TriggerKind,
    value: Option<String>,
    open: bool,
}

/// Page host backed by plain collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    panels: Vec<Option<MemoryPanel>>,
    triggers: Vec<MemoryTrigger>,
    root_locked: bool,
    root_active: Option<String>,
    overlay: bool,
    main_content: Option<bool>,
    events: Vec<RecordedEvent>,
}

impl MemoryHost {
    /// Empty page: no panels, no triggers, no main content.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a panel element declaring `id`.
    ///
    /// Duplicate ids are allowed; lookup returns the first live match.
    pub fn add_panel(&mut self, id: &str) -> PanelKey {
        self.panels.push(Some(MemoryPanel {
            id: id.to_owned(),
            markers: PanelMarkers::empty(),
        }));
        PanelKey(self.panels.len() - 1)
    }

    /// Remove the first live panel declaring `id`. Returns whether one existed.
    pub fn remove_panel(&mut self, id: &str) -> bool {
        let slot = self
            .panels
            .iter_mut()
            .find(|slot| matches!(slot, Some(p) if p.id == id));
        match slot {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    /// Add a trigger element with its raw declared value.
    pub fn add_trigger(&mut self, kind: TriggerKind, value: Option<&str>) -> TriggerKey {
        self.triggers.push(MemoryTrigger {
            kind,
            value: value.map(str::to_owned),
            open: false,
        });
        TriggerKey(self.triggers.len() - 1)
    }

    /// Add the main content element (unblurred).
    pub fn add_main_content(&mut self) {
        self.main_content = Some(false);
    }

    /// Markers on the first live panel declaring `id`.
    #[must_use]
    pub fn markers_of(&self, id: &str) -> Option<PanelMarkers> {
        self.live_panels()
            .find(|(_, p)| p.id == id)
            .map(|(_, p)| p.markers)
    }

    /// Whether a trigger carries the `open` class.
    #[must_use]
    pub fn trigger_open(&self, trigger: TriggerKey) -> bool {
        self.triggers.get(trigger.0).is_some_and(|t| t.open)
    }

    /// Root lock marker.
    #[must_use]
    pub fn root_locked(&self) -> bool {
        self.root_locked
    }

    /// Root active-id attribute, if present.
    #[must_use]
    pub fn root_active(&self) -> Option<&str> {
        self.root_active.as_deref()
    }

    #[must_use]
    pub fn overlay_mounted(&self) -> bool {
        self.overlay
    }

    /// `None` without a main content element, else whether it is blurred.
    #[must_use]
    pub fn main_content_blurred(&self) -> Option<bool> {
        self.main_content
    }

    /// Notifications emitted so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Drain recorded notifications.
    pub fn take_events(&mut self) -> Vec<RecordedEvent> {
        std::mem::take(&mut self.events)
    }

    fn live_panels(&self) -> impl Iterator<Item = (usize, &MemoryPanel)> {
        self.panels
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|p| (idx, p)))
    }

    fn panel_mut(&mut self, key: PanelKey) -> Option<&mut MemoryPanel> {
        self.panels.get_mut(key.0).and_then(Option::as_mut)
    }
}

impl PanelHost for MemoryHost {
    type Panel = PanelKey;
    type Trigger = TriggerKey;

    fn find_panel(&self, id: &PanelId) -> Option<PanelKey> {
        self.live_panels()
            .find(|(_, p)| p.id == id.as_str())
            .map(|(idx, _)| PanelKey(idx))
    }

    fn panel_markers(&self, panel: &PanelKey) -> PanelMarkers {
        self.panels
            .get(panel.0)
            .and_then(Option::as_ref)
            .map_or(PanelMarkers::empty(), |p| p.markers)
    }

    fn insert_panel_markers(&mut self, panel: &PanelKey, markers: PanelMarkers) {
        if let Some(p) = self.panel_mut(*panel) {
            p.markers.insert(markers);
        }
    }

    fn remove_panel_markers(&mut self, panel: &PanelKey, markers: PanelMarkers) {
        if let Some(p) = self.panel_mut(*panel) {
            p.markers.remove(markers);
        }
    }

    fn emit(&mut self, event: PanelEvent<'_, PanelKey>) {
        let Some(panel) = self.panels.get(event.panel.0).and_then(Option::as_ref) else {
            return;
        };
        let recorded = RecordedEvent {
            kind: event.kind,
            panel: panel.id.clone(),
            panel_opened: panel.markers.contains(PanelMarkers::OPENED),
            root_locked: self.root_locked,
            root_active: self.root_active.clone(),
            bubbles: event.bubbles(),
        };
        self.events.push(recorded);
    }

    fn project_root(&mut self, root: RootProjection<'_>) {
        self.root_locked = root.locked;
        self.root_active = root.active.map(|id| id.as_str().to_owned());
    }

    fn scan_triggers(&self, kind: TriggerKind) -> Vec<(TriggerKey, Option<String>)> {
        self.triggers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == kind)
            .map(|(idx, t)| (TriggerKey(idx), t.value.clone()))
            .collect()
    }

    fn set_trigger_open(&mut self, trigger: &TriggerKey, open: bool) {
        if let Some(t) = self.triggers.get_mut(trigger.0) {
            t.open = open;
        }
    }

    fn mount_overlay(&mut self) {
        self.overlay = true;
    }

    fn blur_main_content(&mut self) -> bool {
        match self.main_content.as_mut() {
            Some(blurred) => {
                *blurred = true;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact_and_first_wins() {
        let mut host = MemoryHost::new();
        let first = host.add_panel("nav");
        host.add_panel("nav");
        host.add_panel("Nav");
        assert_eq!(host.find_panel(&PanelId::new("nav").unwrap()), Some(first));
        assert_eq!(host.find_panel(&PanelId::new("na").unwrap()), None);
    }

    #[test]
    fn removed_panel_no_longer_resolves() {
        let mut host = MemoryHost::new();
        let key = host.add_panel("nav");
        assert!(host.remove_panel("nav"));
        assert!(!host.remove_panel("nav"));
        assert_eq!(host.find_panel(&PanelId::new("nav").unwrap()), None);
        // Stale handles are harmless.
        host.insert_panel_markers(&key, PanelMarkers::OPENED);
        assert_eq!(host.panel_markers(&key), PanelMarkers::empty());
    }

    #[test]
    fn projection_writes_and_removes_root_attribute() {
        let mut host = MemoryHost::new();
        let id = PanelId::new("nav").unwrap();
        host.project_root(RootProjection {
            locked: true,
            active: Some(&id),
        });
        assert!(host.root_locked());
        assert_eq!(host.root_active(), Some("nav"));
        host.project_root(RootProjection {
            locked: false,
            active: None,
        });
        assert!(!host.root_locked());
        assert_eq!(host.root_active(), None);
    }

    #[test]
    fn scan_filters_by_kind() {
        let mut host = MemoryHost::new();
        let a = host.add_trigger(TriggerKind::Target, Some("a"));
        let c = host.add_trigger(TriggerKind::Close, None);
        assert_eq!(
            host.scan_triggers(TriggerKind::Target),
            vec![(a, Some("a".to_owned()))]
        );
        assert_eq!(host.scan_triggers(TriggerKind::Close), vec![(c, None)]);
    }

    #[test]
    fn take_events_drains() {
        let mut host = MemoryHost::new();
        let key = host.add_panel("nav");
        host.emit(PanelEvent {
            kind: PanelEventKind::Opening,
            panel: &key,
        });
        assert_eq!(host.take_events().len(), 1);
        assert!(host.events().is_empty());
    }
}
