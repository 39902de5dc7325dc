//! Contract with the hosted upload widget.

use cloudwidget_core::WidgetError;
use serde_json::Value;

/// Completion callback handed to the host: `(error, result)`.
///
/// `FnOnce` because the widget reports exactly once per open. An `Err` is a
/// listener failure and goes back to whoever invoked the callback.
pub type CompletionCallback = Box<dyn FnOnce(Option<Value>, Option<Value>) -> anyhow::Result<()>>;

/// A widget implementation that can be opened with an options object.
///
/// `open` must return without waiting for the user; `on_close` is invoked
/// later from the host's event loop. A host that never calls back simply
/// produces no event.
pub trait UploadHost {
    fn open(&self, options: &Value, on_close: CompletionCallback) -> Result<(), WidgetError>;
}

/// Reads one callback argument as received from a script host in its
/// serialized form. Missing text, `null` and malformed text are all absent.
pub fn parse_callback_argument(text: Option<&str>) -> Option<Value> {
    let text = text?;
    match serde_json::from_str(text) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(error = %err, "Upload widget callback argument is not JSON");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_callback_argument_values() {
        assert_eq!(
            parse_callback_argument(Some(r#"{"message":"Upload aborted"}"#)),
            Some(json!({ "message": "Upload aborted" }))
        );
        assert_eq!(
            parse_callback_argument(Some(r#"[{"public_id":"a"}]"#)),
            Some(json!([{ "public_id": "a" }]))
        );
    }

    #[test]
    fn test_parse_callback_argument_absent() {
        // undefined, functions and symbols stringify to nothing
        assert_eq!(parse_callback_argument(None), None);
        assert_eq!(parse_callback_argument(Some("null")), None);
        assert_eq!(parse_callback_argument(Some("{not json")), None);
    }
}
