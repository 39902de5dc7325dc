//! Upload widget wrapper.
//!
//! Owns the option set and the trigger control, opens the hosted widget on
//! activation and turns its single completion callback into a published
//! [`CompletionEvent`](cloudwidget_core::CompletionEvent). The browser binding
//! is only compiled for `wasm32`.

pub mod host;
pub mod trigger;
pub mod widget;

#[cfg(target_arch = "wasm32")]
pub mod browser;

pub use host::{CompletionCallback, UploadHost};
pub use trigger::TriggerButton;
pub use widget::UploadWidget;

#[cfg(target_arch = "wasm32")]
pub use browser::{attach_to_button, BrowserUploadHost};
