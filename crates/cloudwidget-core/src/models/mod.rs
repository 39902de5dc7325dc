//! Data models for uploaded assets and completion events.

mod event;
mod upload;

pub use event::CompletionEvent;
pub use upload::{Region, RegionSlots, UploadRecord};
