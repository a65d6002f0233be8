#![forbid(unsafe_code)]

//! Core: the panel stack state machine behind stacked slide-in panels.
//!
//! # Role in Pushbar
//! `pushbar-core` owns every piece of state the page cares about: which panel
//! is active, the trail of panels it displaced, and whether the page is
//! locked. It never touches a concrete DOM. Instead it drives a
//! [`PanelHost`], which the browser binding (`pushbar-web`) implements over
//! `web-sys` and [`MemoryHost`] implements in memory.
//!
//! # Primary responsibilities
//! - **Stack Manager** ([`PanelStackController::open`] / [`PanelStackController::close`]):
//!   push-before-overwrite, pop-on-close.
//! - **Event Binder** ([`binder`]): trigger discovery, toggle routing, overlay
//!   dismissal and escape-key unwinding.
//! - **Notifier** ([`notify`]): `opening` / `closing` notifications and the
//!   one-way projection of root markers.
//!
//! # Failure model
//! The only failure is a panel id that resolves to nothing. Such calls change
//! nothing, emit nothing, and report [`Transition::Ignored`].

pub mod binder;
pub mod config;
pub mod controller;
pub mod host;
pub mod key;
pub mod markers;
pub mod memory;
pub mod notify;
pub mod panel;
pub mod stack;

pub use binder::{Activation, TriggerDecl, TriggerKind};
pub use config::PushbarConfig;
pub use controller::{Ignored, PanelStackController, ResolveError, Transition};
pub use host::{PanelHost, RootProjection};
pub use key::Key;
pub use markers::PanelMarkers;
pub use memory::MemoryHost;
pub use notify::{PanelEvent, PanelEventKind};
pub use panel::{PanelId, PanelIdError};
pub use stack::{PanelStack, StackSnapshot};
