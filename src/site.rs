//! Composition root: every service wired to one session store, one
//! navigator and one backend client.

use std::sync::Arc;

use majex_api_types::{AssetCatalog, User};
use tracing::{debug, info};
use url::Url;

use crate::assets::{AssetService, AssetUrls, FallbackTable, HttpAssetBackend};
use crate::auth::{AuthService, RouteGuard};
use crate::config::Settings;
use crate::contacts::ContactService;
use crate::events::EventService;
use crate::http::{ApiClient, ApiError};
use crate::routes::NavigationHistory;
use crate::session::{FileSessionStore, SessionStore};

#[derive(Clone)]
pub struct Site {
    pub navigator: Arc<NavigationHistory>,
    pub sessions: Arc<dyn SessionStore>,
    pub api: ApiClient,
    pub assets: AssetService,
    pub auth: AuthService,
    pub guard: RouteGuard,
    pub events: EventService,
    pub contacts: ContactService,
}

impl Site {
    /// Wire the site from settings, persisting the session to the
    /// configured file.
    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        let sessions: Arc<dyn SessionStore> =
            Arc::new(FileSessionStore::new(settings.session.path.clone()));
        Self::build(
            &settings.api.base_url,
            &settings.api.asset_base_url,
            settings.assets.fallback_table(),
            sessions,
        )
    }

    pub fn build(
        api_base: &Url,
        asset_base: &Url,
        fallbacks: FallbackTable,
        sessions: Arc<dyn SessionStore>,
    ) -> Result<Self, ApiError> {
        let navigator = Arc::new(NavigationHistory::new());
        let api = ApiClient::new(api_base, Arc::clone(&sessions), navigator.clone())?;
        let assets = AssetService::new(
            Arc::new(HttpAssetBackend::new(api.clone())),
            AssetUrls::new(asset_base.clone()),
            fallbacks,
        );

        Ok(Self {
            guard: RouteGuard::new(Arc::clone(&sessions), navigator.clone()),
            auth: AuthService::new(api.clone()),
            events: EventService::new(api.clone()),
            contacts: ContactService::new(api.clone()),
            navigator,
            sessions,
            api,
            assets,
        })
    }

    /// Startup hook: load the asset catalog once.
    pub async fn start(&self) -> Arc<AssetCatalog> {
        let catalog = self.assets.load_all().await;
        info!(
            api = %self.api.base(),
            assets = catalog.len(),
            "Site started"
        );
        catalog
    }

    /// Startup hook for the admin session: a persisted token is checked
    /// against the backend and the stored user refreshed. A rejected token is
    /// discarded, leaving the site signed out.
    pub async fn resume(&self) -> Result<Option<User>, ApiError> {
        if !self.auth.is_authenticated() {
            debug!("No stored session to resume");
            return Ok(None);
        }
        let user = self.auth.restore().await?;
        match &user {
            Some(user) => info!(user_id = user.id, "Session resumed"),
            None => info!("Stored session expired"),
        }
        Ok(user)
    }
}
