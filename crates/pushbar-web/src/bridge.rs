#![forbid(unsafe_code)]

//! Conversions between JS-facing values and core types.

use std::cell::RefCell;

use pushbar_core::{PanelId, PushbarConfig, StackSnapshot};

/// Decode a configuration object serialized with `JSON.stringify`.
///
/// `None`, `null`, non-objects and malformed JSON all yield the default
/// configuration. Unknown keys are ignored.
#[must_use]
pub fn config_from_json(json: Option<&str>) -> PushbarConfig {
    let Some(json) = json else {
        return PushbarConfig::default();
    };
    match serde_json::from_str::<PushbarConfig>(json) {
        Ok(config) => config,
        Err(err) => {
            if json.trim() != "null" {
                tracing::warn!(error = %err, "pushbar config ignored");
            }
            PushbarConfig::default()
        }
    }
}

/// Encode a stack snapshot as JSON for `snapshotJson()`.
#[must_use]
pub fn snapshot_json(snapshot: &StackSnapshot) -> String {
    serde_json::to_string(snapshot).unwrap_or_else(|_| String::from("{}"))
}

/// Parse an id passed from JS. The empty string names no panel.
#[must_use]
pub fn panel_id_from_js(id: &str) -> Option<PanelId> {
    PanelId::new(id).ok()
}

/// Stack state as of the last completed controller call.
///
/// The controller stays mutably borrowed while notification listeners run,
/// so JS getters read this copy instead. Inside a listener it matches the
/// root markers, which are also written only once a transition finishes.
#[derive(Debug, Default)]
pub struct CommittedState {
    snapshot: RefCell<StackSnapshot>,
}

impl CommittedState {
    #[must_use]
    pub fn new(snapshot: StackSnapshot) -> Self {
        Self {
            snapshot: RefCell::new(snapshot),
        }
    }

    /// Replace the stored state after a call completes.
    pub fn commit(&self, snapshot: StackSnapshot) {
        *self.snapshot.borrow_mut() = snapshot;
    }

    #[must_use]
    pub fn active_id(&self) -> Option<String> {
        self.snapshot
            .borrow()
            .active
            .as_ref()
            .map(|id| id.as_str().to_owned())
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.snapshot.borrow().locked
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        snapshot_json(&self.snapshot.borrow())
    }
}
