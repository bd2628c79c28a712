//! Image files attached to admin forms.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::http::{ApiError, METHOD_OVERRIDE_FIELD};

/// Form field carrying the uploaded image.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            ApiError::invalid_input(format!("failed to read {}: {err}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload.bin");
        let upload = Self::new(file_name, bytes);
        if !upload.is_image() {
            return Err(ApiError::invalid_input(format!(
                "{} is not an image ({})",
                path.display(),
                upload.content_type
            )));
        }
        Ok(upload)
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    fn into_part(self) -> Result<Part, ApiError> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)
            .map_err(ApiError::from)
    }
}

/// Assemble a multipart body from text fields and an optional image.
/// `method_override` adds the `_method` field used for updates.
pub fn multipart_form(
    fields: Vec<(&'static str, String)>,
    image: Option<ImageUpload>,
    method_override: Option<&'static str>,
) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for (name, value) in fields {
        form = form.text(name, value);
    }
    if let Some(image) = image {
        form = form.part(IMAGE_FIELD, image.into_part()?);
    }
    if let Some(method) = method_override {
        form = form.text(METHOD_OVERRIDE_FIELD, method);
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(ImageUpload::new("logo.png", vec![]).content_type, "image/png");
        assert_eq!(ImageUpload::new("codival.svg", vec![]).content_type, "image/svg+xml");
        assert!(!ImageUpload::new("notes.txt", vec![]).is_image());
    }

    #[tokio::test]
    async fn non_images_are_refused() {
        let dir = tempfile::TempDir::new().expect("tmp dir");
        let path = dir.path().join("brief.pdf");
        std::fs::write(&path, b"%PDF").expect("write");
        let err = ImageUpload::from_path(&path).await.expect_err("not an image");
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}
