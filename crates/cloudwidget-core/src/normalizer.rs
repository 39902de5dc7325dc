//! Result normalization for the upload widget callback.
//!
//! The widget reports `(error, result)` as loosely structured JSON whose shape
//! depends on the widget version, upload mode and enabled features (cropping,
//! face detection). [`normalize`] maps it onto [`UploadRecord`]s without ever
//! failing: anything that cannot be read is left unset.

use serde_json::{Map, Value};

use crate::json::{safe_integer, safe_long, safe_string};
use crate::models::{Region, RegionSlots, UploadRecord};

/// Output of [`normalize`]: the error message and the records in widget order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedPayload {
    pub error_message: Option<String>,
    pub records: Vec<UploadRecord>,
}

/// Normalizes one widget callback payload.
///
/// `records` holds one entry per object element of `raw_result`, in array
/// order. Non-object elements are dropped. A `raw_result` that is not an array
/// yields no records.
pub fn normalize(raw_error: Option<&Value>, raw_result: Option<&Value>) -> NormalizedPayload {
    let error_message = extract_error_message(raw_error);
    let records = parse_records(raw_result);

    tracing::debug!(
        records = records.len(),
        has_error = error_message.is_some(),
        "Normalized upload widget payload"
    );

    NormalizedPayload {
        error_message,
        records,
    }
}

/// Reads `message` from the error object when it is a JSON string.
///
/// An error object without a string message yields `None`.
pub fn extract_error_message(raw_error: Option<&Value>) -> Option<String> {
    let error = raw_error?;
    let message = safe_string(error.get("message"));
    if message.is_none() && !error.is_null() {
        tracing::debug!("Upload widget error carries no string message");
    }
    message
}

/// Converts the result array into records, skipping non-object elements.
pub fn parse_records(raw_result: Option<&Value>) -> Vec<UploadRecord> {
    let Some(raw_result) = raw_result else {
        return Vec::new();
    };
    let Some(items) = raw_result.as_array() else {
        if !raw_result.is_null() {
            tracing::debug!("Upload widget result is not an array, ignoring it");
        }
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item.as_object() {
            Some(object) => Some(parse_record(object)),
            None => {
                tracing::debug!(index, "Skipping non-object upload result element");
                None
            }
        })
        .collect()
}

/// Builds one record from a result element.
pub fn parse_record(object: &Map<String, Value>) -> UploadRecord {
    let (custom_coordinates, face_coordinates) = parse_coordinates(object.get("coordinates"));

    UploadRecord {
        public_id: safe_string(object.get("public_id")),
        secure_url: safe_string(object.get("secure_url")),
        thumbnail_url: safe_string(object.get("thumbnail_url")),
        url: safe_string(object.get("url")),
        delivery_type: safe_string(object.get("type")),
        version: safe_string(object.get("version")),
        width: safe_integer(object.get("width")),
        height: safe_integer(object.get("height")),
        format: safe_string(object.get("format")),
        resource_type: safe_string(object.get("resource_type")),
        signature: safe_string(object.get("signature")),
        bytes: safe_long(object.get("bytes")),
        original_filename: safe_string(object.get("original_filename")),
        etag: safe_string(object.get("etag")),
        path: safe_string(object.get("path")),
        created_at: safe_string(object.get("created_at")),
        tags: parse_tags(object.get("tags")),
        custom_coordinates,
        face_coordinates,
    }
}

/// `None` unless `tags` is an array. Non-string entries stay as `None` slots.
fn parse_tags(value: Option<&Value>) -> Option<Vec<Option<String>>> {
    let tags = value?.as_array()?;
    Some(tags.iter().map(|tag| safe_string(Some(tag))).collect())
}

/// Returns `(custom, faces)` from the `coordinates` object.
///
/// `faces` falls back to `face` when it is missing or not an array.
fn parse_coordinates(value: Option<&Value>) -> (Option<RegionSlots>, Option<RegionSlots>) {
    let Some(coordinates) = value.and_then(Value::as_object) else {
        return (None, None);
    };

    let custom = parse_region_slots(coordinates.get("custom"));

    let faces = coordinates
        .get("faces")
        .filter(|faces| faces.is_array())
        .or_else(|| coordinates.get("face"));
    let faces = parse_region_slots(faces);

    (custom, faces)
}

/// One slot per source element, so output length equals input length.
fn parse_region_slots(value: Option<&Value>) -> Option<RegionSlots> {
    let entries = value?.as_array()?;
    Some(
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let region = parse_region(entry);
                if region.is_none() {
                    tracing::debug!(index, "Leaving unusable coordinate tuple unset");
                }
                region
            })
            .collect(),
    )
}

/// Reads `[x, y, width, height]`; extra trailing entries are ignored.
fn parse_region(entry: &Value) -> Option<Region> {
    let tuple = entry.as_array().filter(|tuple| tuple.len() >= 4)?;
    Some(Region {
        x: safe_integer(tuple.first()),
        y: safe_integer(tuple.get(1)),
        width: safe_integer(tuple.get(2)),
        height: safe_integer(tuple.get(3)),
    })
}
