use url::{ParseError, Url};

/// Turns backend-provided image addresses into absolute URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrls {
    base: Url,
}

impl AssetUrls {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute (`https://…`) and embedded (`data:…`) addresses pass through;
    /// relative ones are prefixed with the base address.
    pub fn resolve(&self, raw: &str) -> String {
        if raw.starts_with("//") {
            return format!("{}:{raw}", self.base.scheme());
        }
        match Url::parse(raw) {
            Err(ParseError::RelativeUrlWithoutBase) => format!(
                "{}/{}",
                self.base.as_str().trim_end_matches('/'),
                raw.trim_start_matches('/')
            ),
            _ => raw.to_string(),
        }
    }
}
