//! Cloudwidget Core Library
//!
//! This crate provides the typed upload models, the result normalizer that turns
//! the hosted widget's loosely structured callback payload into those models,
//! the completion event channel, the upload options store, configuration and
//! error types shared by the widget wrapper and the CLI.

pub mod config;
pub mod error;
pub mod events;
pub mod json;
pub mod models;
pub mod normalizer;
pub mod options;

// Re-export commonly used types
pub use config::WidgetConfig;
pub use error::{LogLevel, WidgetError};
pub use events::{EventChannel, EventType, Subscription, UPLOAD_FINISHED};
pub use models::{CompletionEvent, Region, UploadRecord};
pub use normalizer::{normalize, NormalizedPayload};
pub use options::UploadOptions;
