use async_trait::async_trait;
use majex_api_types::{AssetCatalog, ReorderItem, ReorderRequest, SiteAsset};
use reqwest::Method;
use serde_json::json;

use super::AssetForm;
use crate::http::{ApiClient, ApiError};

/// Remote side of the asset service.
#[async_trait]
pub trait AssetBackend: Send + Sync {
    /// Active assets grouped by category.
    async fn fetch_catalog(&self) -> Result<AssetCatalog, ApiError>;

    /// Every asset, active or not.
    async fn list_all(&self) -> Result<Vec<SiteAsset>, ApiError>;

    async fn create(&self, form: AssetForm) -> Result<SiteAsset, ApiError>;

    async fn update(&self, id: u64, form: AssetForm) -> Result<SiteAsset, ApiError>;

    async fn delete(&self, id: u64) -> Result<(), ApiError>;

    async fn toggle(&self, id: u64) -> Result<SiteAsset, ApiError>;

    async fn reorder(&self, items: Vec<ReorderItem>) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct HttpAssetBackend {
    api: ApiClient,
}

impl HttpAssetBackend {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AssetBackend for HttpAssetBackend {
    async fn fetch_catalog(&self) -> Result<AssetCatalog, ApiError> {
        self.api.get("assets").await
    }

    async fn list_all(&self) -> Result<Vec<SiteAsset>, ApiError> {
        Ok(self.api.get_list("admin/assets").await?.items)
    }

    async fn create(&self, form: AssetForm) -> Result<SiteAsset, ApiError> {
        let form = form.into_multipart(None)?;
        self.api.post_multipart("admin/assets", form).await
    }

    async fn update(&self, id: u64, form: AssetForm) -> Result<SiteAsset, ApiError> {
        let form = form.into_multipart(Some("PUT"))?;
        self.api
            .post_multipart(&format!("admin/assets/{id}"), form)
            .await
    }

    async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.api.delete(&format!("admin/assets/{id}")).await
    }

    async fn toggle(&self, id: u64) -> Result<SiteAsset, ApiError> {
        self.api
            .send_json(Method::PATCH, &format!("admin/assets/{id}/toggle"), &json!({}))
            .await
    }

    async fn reorder(&self, items: Vec<ReorderItem>) -> Result<(), ApiError> {
        self.api
            .send_json_unit(Method::PATCH, "admin/assets/reorder", &ReorderRequest { items })
            .await
    }
}
