use majex_api_types::{AssetCategory, SiteAsset};
use reqwest::multipart::Form;

use crate::http::ApiError;
use crate::upload::{ImageUpload, multipart_form};

/// Fields of the admin create/edit asset form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetForm {
    pub key: String,
    pub category: AssetCategory,
    pub label: String,
    pub alt_text: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub image: Option<ImageUpload>,
}

impl AssetForm {
    pub fn new(key: impl Into<String>, category: AssetCategory, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            category,
            label: label.into(),
            alt_text: None,
            sort_order: 0,
            is_active: true,
            image: None,
        }
    }

    /// Pre-fill an edit form from an existing record. The key is carried
    /// over unchanged since it cannot be edited.
    pub fn from_asset(asset: &SiteAsset) -> Self {
        Self {
            key: asset.key.clone(),
            category: asset.category,
            label: asset.label.clone(),
            alt_text: asset.alt_text.clone(),
            sort_order: asset.sort_order,
            is_active: asset.is_active,
            image: None,
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        validate_key(&self.key)?;
        if self.label.trim().is_empty() {
            return Err(ApiError::invalid_input("asset label is required"));
        }
        Ok(())
    }

    pub(crate) fn into_multipart(self, method_override: Option<&'static str>) -> Result<Form, ApiError> {
        let mut fields = vec![
            ("key", self.key),
            ("category", self.category.as_str().to_string()),
            ("label", self.label),
            ("alt_text", self.alt_text.unwrap_or_default()),
            ("sort_order", self.sort_order.to_string()),
            ("is_active", self.is_active.to_string()),
        ];
        fields.retain(|(name, value)| *name != "alt_text" || !value.is_empty());
        multipart_form(fields, self.image, method_override)
    }
}

/// Keys are lowercase ASCII letters, digits and hyphens, e.g. `partner-rti`.
pub fn validate_key(key: &str) -> Result<(), ApiError> {
    if key.is_empty() {
        return Err(ApiError::invalid_input("asset key is required"));
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        return Err(ApiError::invalid_input(format!(
            "asset key `{key}` contains `{bad}`; use lowercase letters, digits and hyphens"
        )));
    }
    Ok(())
}
