use chrono::{DateTime, Utc};
use serde::Serialize;

/// Bounding box of a custom crop region or a detected face.
///
/// Each side is read independently from the widget's `[x, y, width, height]`
/// tuple, so a non-numeric entry leaves only that side unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Region {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
        }
    }
}

/// Region list as reported by the widget.
///
/// Slots keep their position in the source array; an entry that was not a
/// usable tuple is `None` at that index.
pub type RegionSlots = Vec<Option<Region>>;

/// Typed metadata for one uploaded asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UploadRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Delivery type (`upload`, `private`, `authenticated`, ...), the widget's `type` key.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub delivery_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<i64>,
    /// `None` when the widget sent no tag array; a non-string tag is `None` in its slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_coordinates: Option<RegionSlots>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_coordinates: Option<RegionSlots>,
}

impl UploadRecord {
    /// Upload timestamp parsed as RFC 3339, if present and well formed.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_created_at_utc_parses_widget_timestamp() {
        let record = UploadRecord {
            created_at: Some("2016-03-01T12:30:45Z".to_string()),
            ..Default::default()
        };
        assert_eq!(
            record.created_at_utc(),
            Some(Utc.with_ymd_and_hms(2016, 3, 1, 12, 30, 45).unwrap())
        );
    }

    #[test]
    fn test_created_at_utc_absent_or_malformed() {
        assert_eq!(UploadRecord::default().created_at_utc(), None);
        let record = UploadRecord {
            created_at: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert_eq!(record.created_at_utc(), None);
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let record = UploadRecord {
            public_id: Some("sample".to_string()),
            delivery_type: Some("upload".to_string()),
            tags: Some(vec![]),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "public_id": "sample", "type": "upload", "tags": [] })
        );
    }
}
