#![forbid(unsafe_code)]

//! Browser binding for pushbar.
//!
//! This crate provides `Pushbar`, a `wasm-bindgen`-exported class that
//! wraps a [`pushbar_core::PanelStackController`] over the live DOM:
//!
//! - `DomHost` implements [`pushbar_core::PanelHost`] with `web-sys`.
//! - Click listeners are attached to every `data-pushbar-target` /
//!   `data-pushbar-close` element found at construction, to the overlay when
//!   configured, and a `keyup` listener to the document for Escape.
//! - Listeners are never removed; the controller lives as long as the page.
//!
//! The JS-facing conversions in [`bridge`] are plain Rust and tested natively.

pub mod bridge;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use dom::DomHost;
#[cfg(target_arch = "wasm32")]
pub use wasm::Pushbar;
