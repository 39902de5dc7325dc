//! Configuration module
//!
//! Account-level defaults for the upload widget, read from the environment
//! (and a `.env` file when present) and turned into an initial option set.

use std::env;

use validator::Validate;

use crate::error::WidgetError;
use crate::options::UploadOptions;

const DEFAULT_SOURCES: &str = "local,url,camera";

#[derive(Clone, Debug, Validate)]
pub struct WidgetConfig {
    #[validate(length(min = 1, message = "CLOUDINARY_CLOUD_NAME must not be empty"))]
    pub cloud_name: String,
    #[validate(length(min = 1, message = "CLOUDINARY_UPLOAD_PRESET must not be empty"))]
    pub upload_preset: String,
    pub folder: Option<String>,
    pub sources: Vec<String>,
    pub multiple: Option<bool>,
    #[validate(range(min = 1, message = "CLOUDINARY_MAX_FILES must be a positive number"))]
    pub max_files: Option<u32>,
}

impl WidgetConfig {
    pub fn from_env() -> Result<Self, WidgetError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (environment, test fixtures).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WidgetError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cloud_name = lookup("CLOUDINARY_CLOUD_NAME")
            .ok_or_else(|| WidgetError::Config("CLOUDINARY_CLOUD_NAME must be set".to_string()))?;
        let upload_preset = lookup("CLOUDINARY_UPLOAD_PRESET").ok_or_else(|| {
            WidgetError::Config("CLOUDINARY_UPLOAD_PRESET must be set".to_string())
        })?;

        let sources = lookup("CLOUDINARY_SOURCES")
            .unwrap_or_else(|| DEFAULT_SOURCES.to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let multiple = match lookup("CLOUDINARY_MULTIPLE") {
            Some(raw) => Some(raw.trim().to_lowercase().parse().map_err(|_| {
                WidgetError::Config("CLOUDINARY_MULTIPLE must be true or false".to_string())
            })?),
            None => None,
        };

        let max_files = match lookup("CLOUDINARY_MAX_FILES") {
            Some(raw) => Some(raw.trim().parse().map_err(|_| {
                WidgetError::Config("CLOUDINARY_MAX_FILES must be a positive number".to_string())
            })?),
            None => None,
        };

        let config = Self {
            cloud_name,
            upload_preset,
            folder: lookup("CLOUDINARY_FOLDER").filter(|f| !f.trim().is_empty()),
            sources,
            multiple,
            max_files,
        };
        config.validate()?;
        Ok(config)
    }

    /// Initial option set for a widget. Unset optional values are left out.
    pub fn to_options(&self) -> UploadOptions {
        let mut options = UploadOptions::new();
        options
            .cloud_name(Some(self.cloud_name.as_str()))
            .upload_preset(Some(self.upload_preset.as_str()));

        let sources: Vec<&str> = self.sources.iter().map(String::as_str).collect();
        options.sources(Some(sources.as_slice()));

        if let Some(folder) = &self.folder {
            options.folder(Some(folder.as_str()));
        }
        if let Some(multiple) = self.multiple {
            options.multiple(Some(multiple));
        }
        if let Some(max_files) = self.max_files {
            options.max_files(Some(max_files));
        }
        options
    }
}
