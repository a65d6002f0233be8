#![forbid(unsafe_code)]

//! Lifecycle notifications emitted on panels.
//!
//! Hosts deliver these on the panel element itself with bubbling enabled so
//! ancestors can observe them through ordinary event delegation.
//!
//! # Ordering
//!
//! - `opening` fires after the panel's `opened` marker is set and before the
//!   root lock / active-id markers change.
//! - `closing` fires before the `opened` marker is removed.

use crate::host::PanelHost;

/// DOM event name for [`PanelEventKind::Opening`].
pub const OPENING_EVENT: &str = "pushbar_opening";
/// DOM event name for [`PanelEventKind::Closing`].
pub const CLOSING_EVENT: &str = "pushbar_closing";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelEventKind {
    Opening,
    Closing,
}

impl PanelEventKind {
    /// Event name as dispatched to the page.
    #[must_use]
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::Opening => OPENING_EVENT,
            Self::Closing => CLOSING_EVENT,
        }
    }
}

/// Notification payload: the event kind and the affected panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelEvent<'a, P> {
    pub kind: PanelEventKind,
    pub panel: &'a P,
}

impl<'a, P> PanelEvent<'a, P> {
    /// Whether listeners should see the event bubble. Always true.
    #[must_use]
    pub const fn bubbles(&self) -> bool {
        true
    }
}

/// Emit an `opening` notification for `panel`.
pub fn dispatch_open<H: PanelHost>(host: &mut H, panel: &H::Panel) {
    host.emit(PanelEvent {
        kind: PanelEventKind::Opening,
        panel,
    });
}

/// Emit a `closing` notification for `panel`.
pub fn dispatch_close<H: PanelHost>(host: &mut H, panel: &H::Panel) {
    host.emit(PanelEvent {
        kind: PanelEventKind::Closing,
        panel,
    });
}
