//! Test helpers: an in-memory upload host that records opens and lets the
//! test decide when and how the widget calls back.

use std::cell::RefCell;

use cloudwidget_core::WidgetError;
use cloudwidget_web::{CompletionCallback, UploadHost};
use serde_json::Value;

#[derive(Default)]
pub struct FakeHost {
    pending: RefCell<Option<CompletionCallback>>,
    opened_with: RefCell<Vec<Value>>,
    unavailable: bool,
}

impl FakeHost {
    /// Host whose script never loaded.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.pending.borrow().is_some()
    }

    pub fn opened_with(&self) -> Vec<Value> {
        self.opened_with.borrow().clone()
    }

    /// Invokes the pending completion callback, as the widget does on close.
    pub fn close(&self, error: Option<Value>, result: Option<Value>) -> anyhow::Result<()> {
        let callback = self
            .pending
            .borrow_mut()
            .take()
            .expect("upload widget was not opened");
        callback(error, result)
    }

    /// Drops the pending callback without invoking it.
    pub fn abandon(&self) {
        self.pending.borrow_mut().take();
    }
}

impl UploadHost for FakeHost {
    fn open(&self, options: &Value, on_close: CompletionCallback) -> Result<(), WidgetError> {
        if self.unavailable {
            return Err(WidgetError::HostUnavailable(
                "window.cloudinary is not loaded".to_string(),
            ));
        }
        self.opened_with.borrow_mut().push(options.clone());
        *self.pending.borrow_mut() = Some(on_close);
        Ok(())
    }
}
