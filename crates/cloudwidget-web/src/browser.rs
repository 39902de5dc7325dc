//! Browser binding for the hosted widget script (`window.cloudinary`).
//!
//! JSON crosses the JS boundary as text through `JSON.stringify`/`JSON.parse`.

use std::rc::Rc;

use cloudwidget_core::WidgetError;
use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::host::{parse_callback_argument, CompletionCallback, UploadHost};
use crate::trigger::TriggerButton;
use crate::widget::UploadWidget;

/// Calls `window.cloudinary.openUploadWidget(options, callback)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserUploadHost;

impl UploadHost for BrowserUploadHost {
    fn open(&self, options: &Value, on_close: CompletionCallback) -> Result<(), WidgetError> {
        let window = web_sys::window()
            .ok_or_else(|| WidgetError::HostUnavailable("No window object available".to_string()))?;

        let cloudinary = js_sys::Reflect::get(&window, &JsValue::from_str("cloudinary"))
            .map_err(|e| WidgetError::HostUnavailable(format!("{:?}", e)))?;
        if cloudinary.is_undefined() || cloudinary.is_null() {
            return Err(WidgetError::HostUnavailable(
                "window.cloudinary is not loaded".to_string(),
            ));
        }

        let open_fn: js_sys::Function =
            js_sys::Reflect::get(&cloudinary, &JsValue::from_str("openUploadWidget"))
                .map_err(|e| WidgetError::HostUnavailable(format!("{:?}", e)))?
                .dyn_into()
                .map_err(|_| {
                    WidgetError::HostUnavailable(
                        "cloudinary.openUploadWidget is not a function".to_string(),
                    )
                })?;

        let options = js_sys::JSON::parse(&serde_json::to_string(options)?)
            .map_err(|e| WidgetError::HostInvocation(format!("Failed to pass options: {:?}", e)))?;

        // Freed by wasm-bindgen after its single invocation.
        let callback = Closure::once_into_js(
            move |error: JsValue, result: JsValue| -> Result<(), JsValue> {
                on_close(js_to_json(&error), js_to_json(&result))
                    .map_err(|e| JsValue::from_str(&format!("{:#}", e)))
            },
        );

        open_fn
            .call2(&cloudinary, &options, &callback)
            .map_err(|e| WidgetError::HostInvocation(format!("{:?}", e)))?;
        Ok(())
    }
}

/// `None` for `null`/`undefined` or values JSON cannot represent.
fn js_to_json(value: &JsValue) -> Option<Value> {
    if value.is_null() || value.is_undefined() {
        return None;
    }
    // `JSON.stringify` yields `undefined` for functions and symbols.
    let text = js_sys::JSON::stringify(value).ok()?.as_string();
    parse_callback_argument(text.as_deref())
}

/// Renders the trigger into `button`, keeps it in sync with later trigger
/// changes and opens the widget on click.
pub fn attach_to_button<H>(
    widget: Rc<UploadWidget<H>>,
    button: &web_sys::HtmlElement,
) -> Result<(), WidgetError>
where
    H: UploadHost + 'static,
{
    let element = button.clone();
    widget.observe_trigger(move |trigger| render_trigger(&element, trigger))?;

    let handler = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_event| {
        if let Err(err) = widget.click() {
            tracing::warn!(error = %err, "Upload widget did not open");
        }
    });
    button
        .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
        .map_err(|e| WidgetError::HostInvocation(format!("{:?}", e)))?;
    // The listener lives as long as the button.
    handler.forget();
    Ok(())
}

fn render_trigger(button: &web_sys::HtmlElement, trigger: &TriggerButton) {
    button.set_inner_html(&trigger.html());
    if let Err(err) = button.toggle_attribute_with_force("disabled", !trigger.is_enabled()) {
        tracing::warn!(error = ?err, "Failed to update upload button state");
    }
}
