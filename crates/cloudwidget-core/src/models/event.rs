use serde::Serialize;
use serde_json::Value as JsonValue;

use super::upload::UploadRecord;
use crate::events::{EventType, UPLOAD_FINISHED};
use crate::json::present;
use crate::normalizer::{normalize, NormalizedPayload};

/// Event published once per widget close, on success or error.
///
/// `is_error` is derived from `error_message` at construction, so the two can
/// never disagree. Records and an error may both be present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionEvent {
    is_error: bool,
    error_message: Option<String>,
    records: Vec<UploadRecord>,
    /// Untouched `result` argument of the widget callback.
    raw_result: Option<JsonValue>,
    /// Untouched `error` argument of the widget callback.
    raw_error: Option<JsonValue>,
}

impl CompletionEvent {
    pub fn new(
        records: Vec<UploadRecord>,
        error_message: Option<String>,
        raw_result: Option<JsonValue>,
        raw_error: Option<JsonValue>,
    ) -> Self {
        Self {
            is_error: error_message.is_some(),
            error_message,
            records,
            raw_result,
            raw_error,
        }
    }

    /// Normalizes the widget's `(error, result)` callback arguments into an event.
    ///
    /// JSON `null` arguments are treated as absent.
    pub fn from_callback(raw_error: Option<JsonValue>, raw_result: Option<JsonValue>) -> Self {
        let raw_error = present(raw_error);
        let raw_result = present(raw_result);
        let NormalizedPayload {
            error_message,
            records,
        } = normalize(raw_error.as_ref(), raw_result.as_ref());
        Self::new(records, error_message, raw_result, raw_error)
    }

    pub fn event_type(&self) -> EventType {
        UPLOAD_FINISHED
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn records(&self) -> &[UploadRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<UploadRecord> {
        self.records
    }

    pub fn raw_result(&self) -> Option<&JsonValue> {
        self.raw_result.as_ref()
    }

    pub fn raw_error(&self) -> Option<&JsonValue> {
        self.raw_error.as_ref()
    }
}
