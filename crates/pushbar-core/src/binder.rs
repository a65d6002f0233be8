#![forbid(unsafe_code)]

//! Event binding: markup-declared triggers, the overlay, and the escape key.
//!
//! Triggers are discovered once, when the controller is built. Each trigger
//! is a toggle: activating it closes its panel if the panel is open and
//! otherwise follows its kind's route.
//!
//! | Kind | Declared by | Panel open | Panel closed |
//! |---|---|---|---|
//! | [`TriggerKind::Target`] | `data-pushbar-target="id"` | close `id` | open `id` |
//! | [`TriggerKind::Close`] | `data-pushbar-close="id"` (or empty) | close `id` | inert |
//!
//! A close-trigger without an id acts on the active panel.

use crate::controller::{Ignored, PanelStackController, Transition};
use crate::host::PanelHost;
use crate::key::Key;
use crate::markers::{CLOSE_ATTR, PanelMarkers, TARGET_ATTR};
use crate::panel::PanelId;

/// The two trigger declarations recognized in markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    /// Opens (or closes, if open) the panel it names.
    Target,
    /// Closes the panel it names, or the active panel.
    Close,
}

impl TriggerKind {
    /// Scan order used when binding.
    pub const ALL: [Self; 2] = [Self::Target, Self::Close];

    /// Attribute carrying this declaration.
    #[must_use]
    pub const fn attribute(self) -> &'static str {
        match self {
            Self::Target => TARGET_ATTR,
            Self::Close => CLOSE_ATTR,
        }
    }
}

/// A parsed trigger declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerDecl {
    pub kind: TriggerKind,
    /// Declared panel, if the attribute value is non-empty.
    pub panel: Option<PanelId>,
}

impl TriggerDecl {
    /// Parse the raw attribute value of a trigger of `kind`.
    #[must_use]
    pub fn parse(kind: TriggerKind, raw: Option<&str>) -> Self {
        Self {
            kind,
            panel: PanelId::from_attribute(raw),
        }
    }

    /// Open-trigger for `panel`.
    #[must_use]
    pub fn target(panel: PanelId) -> Self {
        Self {
            kind: TriggerKind::Target,
            panel: Some(panel),
        }
    }

    /// Close-trigger, optionally naming a panel.
    #[must_use]
    pub fn close(panel: Option<PanelId>) -> Self {
        Self {
            kind: TriggerKind::Close,
            panel,
        }
    }
}

/// A discovered trigger element with its declaration.
#[derive(Debug, Clone)]
pub struct BoundTrigger<T> {
    pub handle: T,
    pub decl: TriggerDecl,
}

/// What an input event did, and whether its default action must be suppressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub prevent_default: bool,
    pub transition: Transition,
}

impl Activation {
    fn prevented(transition: Transition) -> Self {
        Self {
            prevent_default: true,
            transition,
        }
    }
}

impl<H: PanelHost> PanelStackController<H> {
    /// Discover triggers of every kind on the host.
    ///
    /// Called by [`PanelStackController::new`]. Calling it again replaces the
    /// bound set with whatever the host declares now.
    pub fn bind(&mut self) {
        self.triggers = TriggerKind::ALL
            .into_iter()
            .flat_map(|kind| {
                self.host
                    .scan_triggers(kind)
                    .into_iter()
                    .map(move |(handle, raw)| BoundTrigger {
                        handle,
                        decl: TriggerDecl::parse(kind, raw.as_deref()),
                    })
            })
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(triggers = self.triggers.len(), "pushbar triggers bound");
    }

    /// Triggers found by the last [`bind`](Self::bind).
    #[must_use]
    pub fn triggers(&self) -> &[BoundTrigger<H::Trigger>] {
        &self.triggers
    }

    /// Handle a click on the bound trigger at `index`.
    ///
    /// An out-of-range index is inert.
    pub fn activate_trigger(&mut self, index: usize) -> Activation {
        let Some(bound) = self.triggers.get(index).cloned() else {
            return Activation::prevented(self.ignore(Ignored::NoTarget));
        };
        self.activate(&bound.decl, Some(&bound.handle))
    }

    /// Route a trigger activation to the open or close path.
    ///
    /// The default action is always suppressed, including for triggers whose
    /// panel cannot be resolved. When `trigger` is given, its `open` class
    /// follows the outcome.
    pub fn activate(&mut self, decl: &TriggerDecl, trigger: Option<&H::Trigger>) -> Activation {
        let id = match decl.kind {
            TriggerKind::Target => decl.panel.clone(),
            TriggerKind::Close => decl
                .panel
                .clone()
                .or_else(|| self.stack.active().cloned()),
        };
        let Some(id) = id else {
            return Activation::prevented(self.ignore(Ignored::NoTarget));
        };
        let panel = match self.resolve(&id) {
            Ok(panel) => panel,
            Err(err) => return Activation::prevented(self.ignore(err.into())),
        };

        let opened = self
            .host
            .panel_markers(&panel)
            .contains(PanelMarkers::OPENED);
        let transition = match (opened, decl.kind) {
            (true, _) => self.close(&id),
            (false, TriggerKind::Target) => self.open(&id),
            (false, TriggerKind::Close) => self.ignore(Ignored::NotOpen(id)),
        };

        if let Some(trigger) = trigger {
            match transition {
                Transition::Opened { .. } => self.host.set_trigger_open(trigger, true),
                Transition::Closed { .. } => self.host.set_trigger_open(trigger, false),
                Transition::Ignored(_) => {}
            }
        }
        Activation::prevented(transition)
    }

    /// Handle a click on the dismiss overlay: close the active panel.
    pub fn overlay_click(&mut self) -> Activation {
        Activation::prevented(self.close_active())
    }

    /// Handle a released key.
    ///
    /// Acts only for Escape while the lock is engaged, closing the active
    /// panel so repeated presses unwind the stack one level at a time.
    pub fn key_up(&mut self, key: &Key) -> Activation {
        let reason = if !self.stack.is_locked() {
            Ignored::Unlocked
        } else if !key.is_escape() {
            Ignored::NotEscape
        } else {
            return Activation::prevented(self.close_active());
        };
        Activation {
            prevent_default: false,
            transition: self.ignore(reason),
        }
    }
}
