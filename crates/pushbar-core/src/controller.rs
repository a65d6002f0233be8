#![forbid(unsafe_code)]

//! Panel stack controller: open/close transitions and marker projection.
//!
//! [`PanelStackController`] combines the [`PanelStack`] with a [`PanelHost`].
//! Each transition validates first (resolves the panel) and then mutates the
//! page and the stack in one uninterrupted pass, so a failed lookup leaves
//! everything untouched.
//!
//! # Invariants
//!
//! 1. **Lock mirrors activity**: after every call the root lock marker is
//!    engaged iff a panel is active.
//! 2. **LIFO**: closing restores the most recently displaced panel.
//! 3. **All-or-nothing**: an unresolvable id emits nothing and writes nothing.
//!
//! # Failure Modes
//!
//! - `close(id)` pops the trail whether or not `id` is the active panel. A
//!   panel closed out of order leaves the trail as it was minus its top entry.
//! - `close(id)` while nothing is active still emits `closing` and clears the
//!   `opened` marker on `id`; stack state is unchanged.

use std::fmt;

use crate::binder::BoundTrigger;
use crate::config::PushbarConfig;
use crate::host::{PanelHost, RootProjection};
use crate::markers::PanelMarkers;
use crate::notify;
use crate::panel::PanelId;
use crate::stack::{PanelStack, StackSnapshot};

/// Lookup failure for a panel id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No panel element carries this id.
    PanelNotFound(PanelId),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PanelNotFound(id) => write!(f, "no panel with id {:?}", id.as_str()),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Why a call changed nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ignored {
    /// The id resolved to no panel.
    UnknownPanel(PanelId),
    /// The call targets the active panel and none is active.
    NoActivePanel,
    /// A trigger declared no usable panel id.
    NoTarget,
    /// A close-trigger named a panel that is not open.
    NotOpen(PanelId),
    /// A key other than Escape was released.
    NotEscape,
    /// Escape was released while no panel held the lock.
    Unlocked,
    /// Another transition was still running.
    Busy,
}

impl From<ResolveError> for Ignored {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::PanelNotFound(id) => Self::UnknownPanel(id),
        }
    }
}

/// Result of a controller operation.
///
/// Purely informational: dropping it is always fine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// `id` is now active; `previous` was pushed onto the trail.
    Opened {
        id: PanelId,
        previous: Option<PanelId>,
    },
    /// `id` lost its `opened` marker; `restored` is now active.
    Closed {
        id: PanelId,
        restored: Option<PanelId>,
    },
    Ignored(Ignored),
}

impl Transition {
    /// Whether the call changed any state.
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Ignored(_))
    }
}

/// Stack-managing controller over a page host.
pub struct PanelStackController<H: PanelHost> {
    pub(crate) host: H,
    pub(crate) stack: PanelStack,
    pub(crate) config: PushbarConfig,
    pub(crate) triggers: Vec<BoundTrigger<H::Trigger>>,
}

impl<H: PanelHost> fmt::Debug for PanelStackController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelStackController")
            .field("stack", &self.stack)
            .field("config", &self.config)
            .field("triggers", &self.triggers.len())
            .finish_non_exhaustive()
    }
}

impl<H: PanelHost> PanelStackController<H> {
    /// Create a controller, apply `config` to the page, and bind triggers.
    ///
    /// The stack starts empty. Root markers are not touched until the first
    /// transition.
    pub fn new(host: H, config: PushbarConfig) -> Self {
        let mut controller = Self {
            host,
            stack: PanelStack::new(),
            config,
            triggers: Vec::new(),
        };

        if config.overlay {
            controller.host.mount_overlay();
            #[cfg(feature = "tracing")]
            tracing::debug!("pushbar overlay mounted");
        }
        if config.blur {
            let _blurred = controller.host.blur_main_content();
            #[cfg(feature = "tracing")]
            tracing::debug!(blurred = _blurred, "pushbar main content blur");
        }

        controller.bind();
        controller
    }

    /// Resolve `id` against the host.
    pub fn resolve(&self, id: &PanelId) -> Result<H::Panel, ResolveError> {
        self.host
            .find_panel(id)
            .ok_or_else(|| ResolveError::PanelNotFound(id.clone()))
    }

    /// Open the panel named `id` and make it active.
    ///
    /// Marks the panel `opened` and `is-open`, emits `opening`, then pushes the
    /// previously active panel onto the trail and engages the lock.
    pub fn open(&mut self, id: &PanelId) -> Transition {
        let panel = match self.resolve(id) {
            Ok(panel) => panel,
            Err(err) => return self.ignore(err.into()),
        };
        #[cfg(feature = "tracing")]
        let _span = self.trace_transition("open", id);

        self.host
            .insert_panel_markers(&panel, PanelMarkers::OPENED | PanelMarkers::IS_OPEN);
        notify::dispatch_open(&mut self.host, &panel);

        let previous = self.stack.push(id.clone());
        self.sync_root();

        #[cfg(feature = "tracing")]
        tracing::debug!(previous = ?previous, "pushbar opened");
        Transition::Opened {
            id: id.clone(),
            previous,
        }
    }

    /// Close the panel named `id` and restore the previous panel.
    ///
    /// Emits `closing` while the panel is still `opened`, removes `opened`
    /// (leaving `is-open`), then pops one trail entry into the active slot.
    pub fn close(&mut self, id: &PanelId) -> Transition {
        let panel = match self.resolve(id) {
            Ok(panel) => panel,
            Err(err) => return self.ignore(err.into()),
        };
        #[cfg(feature = "tracing")]
        let _span = self.trace_transition("close", id);

        notify::dispatch_close(&mut self.host, &panel);
        self.host.remove_panel_markers(&panel, PanelMarkers::OPENED);

        let restored = self.stack.pop().cloned();
        self.sync_root();

        #[cfg(feature = "tracing")]
        tracing::debug!(restored = ?restored, "pushbar closed");
        Transition::Closed {
            id: id.clone(),
            restored,
        }
    }

    /// Close whichever panel is active.
    pub fn close_active(&mut self) -> Transition {
        match self.stack.active().cloned() {
            Some(id) => self.close(&id),
            None => self.ignore(Ignored::NoActivePanel),
        }
    }

    /// Whether the panel named `id` carries the `opened` marker.
    ///
    /// Unknown ids are not open.
    #[must_use]
    pub fn is_open(&self, id: &PanelId) -> bool {
        self.resolve(id)
            .map(|panel| self.host.panel_markers(&panel).contains(PanelMarkers::OPENED))
            .unwrap_or(false)
    }

    // --- State Queries ---

    /// Currently active panel id.
    #[inline]
    #[must_use]
    pub fn active_id(&self) -> Option<&PanelId> {
        self.stack.active()
    }

    /// Trail of previously active ids, most recent last.
    #[inline]
    #[must_use]
    pub fn trail(&self) -> &[PanelId] {
        self.stack.trail()
    }

    /// Whether the page lock is engaged.
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.stack.is_locked()
    }

    /// Owned copy of the stack state.
    #[must_use]
    pub fn snapshot(&self) -> StackSnapshot {
        self.stack.snapshot()
    }

    /// Configuration the controller was built with.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> PushbarConfig {
        self.config
    }

    /// Get a reference to the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Get a mutable reference to the host.
    ///
    /// **Warning**: writing root markers directly desyncs them from the stack
    /// until the next transition.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the controller, returning its host.
    pub fn into_host(self) -> H {
        self.host
    }

    pub(crate) fn sync_root(&mut self) {
        let root = RootProjection {
            locked: self.stack.is_locked(),
            active: self.stack.active(),
        };
        self.host.project_root(root);
    }

    pub(crate) fn ignore(&self, reason: Ignored) -> Transition {
        #[cfg(feature = "tracing")]
        tracing::trace!(reason = ?reason, "pushbar call ignored");
        Transition::Ignored(reason)
    }

    #[cfg(feature = "tracing")]
    fn trace_transition(&self, operation: &'static str, id: &PanelId) -> tracing::span::EnteredSpan {
        tracing::debug_span!(
            "pushbar.transition",
            operation,
            panel = id.as_str(),
            trail_depth = self.stack.trail().len()
        )
        .entered()
    }
}


#[cfg(all(test, feature = "tracing"))]
mod tracing_tests {
    use super::*;
    use crate::MemoryHost;
    use std::sync::{Arc, Mutex};
    use tracing::Subscriber;
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{Context, SubscriberExt};

    #[derive(Debug, Default)]
    struct TransitionTraceState {
        operations: Vec<String>,
        panels: Vec<String>,
    }

    struct TransitionTraceCapture {
        state: Arc<Mutex<TransitionTraceState>>,
    }

    impl<S> Layer<S> for TransitionTraceCapture
    where
        S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
    {
        fn on_new_span(
            &self,
            attrs: &tracing::span::Attributes<'_>,
            _id: &tracing::Id,
            _ctx: Context<'_, S>,
        ) {
            if attrs.metadata().name() != "pushbar.transition" {
                return;
            }

            #[derive(Default)]
            struct TransitionVisitor {
                operation: Option<String>,
                panel: Option<String>,
            }

            impl tracing::field::Visit for TransitionVisitor {
                fn record_debug(
                    &mut self,
                    field: &tracing::field::Field,
                    value: &dyn std::fmt::Debug,
                ) {
                    let text = format!("{value:?}").trim_matches('"').to_owned();
                    match field.name() {
                        "operation" => self.operation = Some(text),
                        "panel" => self.panel = Some(text),
                        _ => {}
                    }
                }

                fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                    match field.name() {
                        "operation" => self.operation = Some(value.to_owned()),
                        "panel" => self.panel = Some(value.to_owned()),
                        _ => {}
                    }
                }
            }

            let mut visitor = TransitionVisitor::default();
            attrs.record(&mut visitor);

            let mut state = self.state.lock().expect("trace state lock");
            if let Some(operation) = visitor.operation {
                state.operations.push(operation);
            }
            if let Some(panel) = visitor.panel {
                state.panels.push(panel);
            }
        }
    }

    #[test]
    fn transitions_enter_spans_with_operation_and_panel() {
        let state = Arc::new(Mutex::new(TransitionTraceState::default()));
        let subscriber = tracing_subscriber::registry().with(TransitionTraceCapture {
            state: Arc::clone(&state),
        });
        let _guard = tracing::subscriber::set_default(subscriber);
        tracing::callsite::rebuild_interest_cache();

        let mut host = MemoryHost::new();
        host.add_panel("a");
        let mut ctrl = PanelStackController::new(host, PushbarConfig::default());
        let a = PanelId::new("a").unwrap();
        ctrl.open(&a);
        ctrl.open(&PanelId::new("ghost").unwrap());
        ctrl.close(&a);

        tracing::callsite::rebuild_interest_cache();
        let snapshot = state.lock().expect("trace state lock");
        assert_eq!(snapshot.operations, vec!["open", "close"]);
        assert_eq!(snapshot.panels, vec!["a", "a"]);
    }
}
