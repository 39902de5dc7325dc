//! Upload options handed verbatim to the hosted widget.
//!
//! The store is an ordered JSON object. Typed setters cover the documented
//! widget options; passing `None` stores an explicit `null` under the key.
//! Values are never validated here.

use serde_json::{Map, Value};

use crate::error::WidgetError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadOptions {
    options: Map<String, Value>,
}

fn string_or_null(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |s| Value::String(s.to_string()))
}

fn list_or_null(values: Option<&[&str]>) -> Value {
    values.map_or(Value::Null, |values| {
        Value::Array(
            values
                .iter()
                .map(|v| Value::String((*v).to_string()))
                .collect(),
        )
    })
}

fn number_or_null<T: Into<serde_json::Number>>(value: Option<T>) -> Value {
    value.map_or(Value::Null, |n| Value::Number(n.into()))
}

fn float_or_null(value: Option<f64>) -> Value {
    value
        .and_then(serde_json::Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

fn bool_or_null(value: Option<bool>) -> Value {
    value.map_or(Value::Null, Value::Bool)
}

fn object_or_null(value: Option<Map<String, Value>>) -> Value {
    value.map_or(Value::Null, Value::Object)
}

impl UploadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing options object. Anything other than a JSON object is rejected.
    pub fn from_value(value: Value) -> Result<Self, WidgetError> {
        match value {
            Value::Object(options) => Ok(Self { options }),
            other => Err(WidgetError::InvalidOptions(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Replaces every option at once. `None` clears the store.
    pub fn set_options(&mut self, options: Option<Map<String, Value>>) -> &mut Self {
        self.options = options.unwrap_or_default();
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.options = Map::new();
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.options.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.options.remove(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Snapshot passed to the widget on open.
    pub fn to_value(&self) -> Value {
        Value::Object(self.options.clone())
    }

    /// Cloud name of the account. Example: `demo`.
    pub fn cloud_name(&mut self, cloud_name: Option<&str>) -> &mut Self {
        self.set("cloud_name", string_or_null(cloud_name))
    }

    /// Unsigned upload preset defined for the account.
    pub fn upload_preset(&mut self, upload_preset: Option<&str>) -> &mut Self {
        self.set("upload_preset", string_or_null(upload_preset))
    }

    /// Source tabs: `local`, `url`, `camera`.
    pub fn sources(&mut self, sources: Option<&[&str]>) -> &mut Self {
        self.set("sources", list_or_null(sources))
    }

    pub fn default_source(&mut self, default_source: Option<&str>) -> &mut Self {
        self.set("default_source", string_or_null(default_source))
    }

    /// Allow several files per open. The callback fires once all of them finish.
    pub fn multiple(&mut self, multiple: Option<bool>) -> &mut Self {
        self.set("multiple", bool_or_null(multiple))
    }

    pub fn max_files(&mut self, max_files: Option<u32>) -> &mut Self {
        self.set("max_files", number_or_null(max_files))
    }

    /// Interactive cropping mode, e.g. `server`. Forces single-file uploads.
    pub fn cropping(&mut self, cropping: Option<&str>) -> &mut Self {
        self.set("cropping", string_or_null(cropping))
    }

    /// Width/height ratio enforced on the crop selection.
    pub fn cropping_aspect_ratio(&mut self, ratio: Option<f64>) -> &mut Self {
        self.set("cropping_aspect_ratio", float_or_null(ratio))
    }

    /// Initial crop box size as a proportion of the image (0.1 to 1.0).
    pub fn cropping_default_selection_ratio(&mut self, ratio: Option<f64>) -> &mut Self {
        self.set("cropping_default_selection_ratio", float_or_null(ratio))
    }

    pub fn public_id(&mut self, public_id: Option<&str>) -> &mut Self {
        self.set("public_id", string_or_null(public_id))
    }

    pub fn folder(&mut self, folder: Option<&str>) -> &mut Self {
        self.set("folder", string_or_null(folder))
    }

    pub fn tags(&mut self, tags: Option<&[&str]>) -> &mut Self {
        self.set("tags", list_or_null(tags))
    }

    /// `auto`, `image` or `raw`.
    pub fn resource_type(&mut self, resource_type: Option<&str>) -> &mut Self {
        self.set("resource_type", string_or_null(resource_type))
    }

    /// Context metadata, e.g. `{ "alt": "my_alt", "caption": "my_caption" }`.
    pub fn context(&mut self, context: Option<Map<String, Value>>) -> &mut Self {
        self.set("context", object_or_null(context))
    }

    pub fn client_allowed_formats(&mut self, formats: Option<&[&str]>) -> &mut Self {
        self.set("client_allowed_formats", list_or_null(formats))
    }

    /// Client-side size limit in bytes.
    pub fn max_file_size(&mut self, max_file_size: Option<u64>) -> &mut Self {
        self.set("max_file_size", number_or_null(max_file_size))
    }

    pub fn max_image_width(&mut self, max_image_width: Option<u32>) -> &mut Self {
        self.set("max_image_width", number_or_null(max_image_width))
    }

    pub fn max_image_height(&mut self, max_image_height: Option<u32>) -> &mut Self {
        self.set("max_image_height", number_or_null(max_image_height))
    }

    /// CSS selector of the form receiving hidden identifier fields.
    pub fn form(&mut self, form: Option<&str>) -> &mut Self {
        self.set("form", string_or_null(form))
    }

    pub fn field_name(&mut self, field_name: Option<&str>) -> &mut Self {
        self.set("field_name", string_or_null(field_name))
    }

    /// CSS selector of the thumbnail container.
    pub fn thumbnails(&mut self, thumbnails: Option<&str>) -> &mut Self {
        self.set("thumbnails", string_or_null(thumbnails))
    }

    pub fn thumbnail_transformation(
        &mut self,
        transformation: Option<Map<String, Value>>,
    ) -> &mut Self {
        self.set("thumbnail_transformation", object_or_null(transformation))
    }

    pub fn button_class(&mut self, button_class: Option<&str>) -> &mut Self {
        self.set("button_class", string_or_null(button_class))
    }

    pub fn button_caption(&mut self, button_caption: Option<&str>) -> &mut Self {
        self.set("button_caption", string_or_null(button_caption))
    }

    /// `default`, `white`, `minimal` or `purple`.
    pub fn theme(&mut self, theme: Option<&str>) -> &mut Self {
        self.set("theme", string_or_null(theme))
    }

    /// CSS URL or inline CSS overriding the theme.
    pub fn stylesheet(&mut self, stylesheet: Option<&str>) -> &mut Self {
        self.set("stylesheet", string_or_null(stylesheet))
    }

    pub fn keep_widget_open(&mut self, keep_widget_open: Option<bool>) -> &mut Self {
        self.set("keep_widget_open", bool_or_null(keep_widget_open))
    }

    pub fn show_powered_by(&mut self, show_powered_by: Option<bool>) -> &mut Self {
        self.set("show_powered_by", bool_or_null(show_powered_by))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_setters_chain_and_keep_insertion_order() {
        let mut options = UploadOptions::new();
        options
            .cloud_name(Some("demo"))
            .upload_preset(Some("a5vxnzbp"))
            .sources(Some(&["local", "url"][..]))
            .multiple(Some(false))
            .max_files(Some(3))
            .cropping_aspect_ratio(Some(0.5));

        assert_eq!(
            options.to_value(),
            json!({
                "cloud_name": "demo",
                "upload_preset": "a5vxnzbp",
                "sources": ["local", "url"],
                "multiple": false,
                "max_files": 3,
                "cropping_aspect_ratio": 0.5
            })
        );
        let keys: Vec<_> = options.as_map().keys().cloned().collect();
        assert_eq!(keys[0], "cloud_name");
        assert_eq!(keys[5], "cropping_aspect_ratio");
    }

    #[test]
    fn test_none_stores_null() {
        let mut options = UploadOptions::new();
        options.folder(Some("user_photos")).folder(None).tags(None);
        assert_eq!(options.get("folder"), Some(&Value::Null));
        assert_eq!(options.get("tags"), Some(&Value::Null));
    }

    #[test]
    fn test_non_finite_ratio_stores_null() {
        let mut options = UploadOptions::new();
        options.cropping_default_selection_ratio(Some(f64::NAN));
        assert_eq!(
            options.get("cropping_default_selection_ratio"),
            Some(&Value::Null)
        );
    }

    #[test]
    fn test_set_options_none_clears() {
        let mut options = UploadOptions::new();
        options.theme(Some("white"));
        options.set_options(None);
        assert!(options.is_empty());

        let mut replacement = Map::new();
        replacement.insert("theme".to_string(), json!("minimal"));
        options.set_options(Some(replacement));
        assert_eq!(options.get("theme"), Some(&json!("minimal")));
    }

    #[test]
    fn test_from_value_requires_object() {
        let options = UploadOptions::from_value(json!({ "cloud_name": "demo" })).unwrap();
        assert_eq!(options.get("cloud_name"), Some(&json!("demo")));

        let err = UploadOptions::from_value(json!(["demo"])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_OPTIONS");
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_context_and_transformation_objects() {
        let mut context = Map::new();
        context.insert("alt".to_string(), json!("my_alt"));
        let mut transformation = Map::new();
        transformation.insert("width".to_string(), json!(200));
        transformation.insert("crop".to_string(), json!("fill"));

        let mut options = UploadOptions::new();
        options
            .context(Some(context))
            .thumbnail_transformation(Some(transformation));

        assert_eq!(options.get("context"), Some(&json!({ "alt": "my_alt" })));
        assert_eq!(
            options.get("thumbnail_transformation"),
            Some(&json!({ "width": 200, "crop": "fill" }))
        );
    }
}
