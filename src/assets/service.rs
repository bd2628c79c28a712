use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

use futures::future::{BoxFuture, FutureExt, Shared};
use majex_api_types::{AssetCatalog, AssetCategory, ReorderItem, SiteAsset};
use metrics::counter;
use tracing::{debug, info, warn};

use super::{AssetBackend, AssetForm, AssetUrls, FallbackTable};
use crate::http::ApiError;
use crate::lock;

pub(crate) const METRIC_CATALOG_FETCH_TOTAL: &str = "majex_asset_catalog_fetch_total";
pub(crate) const METRIC_FALLBACK_TOTAL: &str = "majex_asset_fallback_total";
pub(crate) const METRIC_INVALIDATION_TOTAL: &str = "majex_asset_cache_invalidation_total";

type CatalogFetch = Shared<BoxFuture<'static, Arc<AssetCatalog>>>;

enum CacheState {
    Unloaded,
    Loading { epoch: u64, fetch: CatalogFetch },
    Loaded(Arc<AssetCatalog>),
}

struct Inner {
    backend: Arc<dyn AssetBackend>,
    urls: AssetUrls,
    fallbacks: FallbackTable,
    state: RwLock<CacheState>,
    next_epoch: AtomicU64,
}

/// Resolves asset keys to image URLs from a lazily loaded catalog.
///
/// Lookups never touch the network: they read whatever snapshot is cached and
/// fall back to static paths meanwhile. Clones share the same cache.
#[derive(Clone)]
pub struct AssetService {
    inner: Arc<Inner>,
}

impl AssetService {
    pub fn new(backend: Arc<dyn AssetBackend>, urls: AssetUrls, fallbacks: FallbackTable) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend,
                urls,
                fallbacks,
                state: RwLock::new(CacheState::Unloaded),
                next_epoch: AtomicU64::new(0),
            }),
        }
    }

    pub fn urls(&self) -> &AssetUrls {
        &self.inner.urls
    }

    pub fn fallbacks(&self) -> &FallbackTable {
        &self.inner.fallbacks
    }

    /// Load the catalog once. Callers arriving while a fetch is in flight
    /// join it; later callers get the stored snapshot. A failed fetch yields
    /// an empty catalog that stays cached until the next invalidation.
    pub async fn load_all(&self) -> Arc<AssetCatalog> {
        let fetch = {
            let mut state = lock::write(&self.inner.state, "assets.load_all");
            match &*state {
                CacheState::Loaded(catalog) => return Arc::clone(catalog),
                CacheState::Loading { fetch, .. } => fetch.clone(),
                CacheState::Unloaded => self.begin_fetch(&mut state),
            }
        };
        fetch.await
    }

    /// Resolved image URL for `key`: the uploaded image when the catalog has
    /// one, otherwise the static fallback, otherwise the placeholder.
    pub fn get_url(&self, key: &str) -> String {
        let uploaded = self.snapshot().and_then(|catalog| {
            catalog
                .find(key)
                .and_then(|asset| asset.url.as_deref())
                .filter(|url| !url.trim().is_empty())
                .map(|url| self.inner.urls.resolve(url))
        });
        uploaded.unwrap_or_else(|| {
            counter!(METRIC_FALLBACK_TOTAL).increment(1);
            self.inner.fallbacks.resolve(key).to_string()
        })
    }

    pub fn get_asset(&self, key: &str) -> Option<SiteAsset> {
        self.snapshot()?.find(key).cloned()
    }

    /// Assets of `category` in backend order.
    pub fn get_by_category(&self, category: AssetCategory) -> Vec<SiteAsset> {
        self.snapshot()
            .map(|catalog| catalog.category(category).to_vec())
            .unwrap_or_default()
    }

    /// The cached catalog, if one is loaded. Never starts a fetch.
    pub fn cached(&self) -> Option<Arc<AssetCatalog>> {
        match &*lock::read(&self.inner.state, "assets.cached") {
            CacheState::Loaded(catalog) => Some(Arc::clone(catalog)),
            _ => None,
        }
    }

    pub fn invalidate_cache(&self) {
        let mut state = lock::write(&self.inner.state, "assets.invalidate");
        *state = CacheState::Unloaded;
        counter!(METRIC_INVALIDATION_TOTAL).increment(1);
        debug!("Asset cache invalidated");
    }

    /// Full admin listing including inactive assets. Not cached.
    pub async fn admin_list(&self) -> Result<Vec<SiteAsset>, ApiError> {
        self.inner.backend.list_all().await
    }

    pub async fn create(&self, form: AssetForm) -> Result<SiteAsset, ApiError> {
        form.validate()?;
        self.mutate("create", self.inner.backend.create(form)).await
    }

    pub async fn update(&self, id: u64, form: AssetForm) -> Result<SiteAsset, ApiError> {
        form.validate()?;
        self.mutate("update", self.inner.backend.update(id, form))
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.mutate("delete", self.inner.backend.delete(id)).await
    }

    pub async fn toggle(&self, id: u64) -> Result<SiteAsset, ApiError> {
        self.mutate("toggle", self.inner.backend.toggle(id)).await
    }

    pub async fn reorder(&self, items: Vec<ReorderItem>) -> Result<(), ApiError> {
        if items.is_empty() {
            return Err(ApiError::invalid_input("nothing to reorder"));
        }
        self.mutate("reorder", self.inner.backend.reorder(items))
            .await
    }

    async fn mutate<T>(
        &self,
        op: &'static str,
        call: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        match call.await {
            Ok(value) => {
                info!(op, "Asset change saved");
                self.invalidate_cache();
                Ok(value)
            }
            Err(err) => {
                warn!(op, error = %err, "Asset change rejected");
                Err(err)
            }
        }
    }

    /// Current snapshot for a synchronous lookup. An unloaded cache kicks off
    /// a background fetch when a runtime is available.
    fn snapshot(&self) -> Option<Arc<AssetCatalog>> {
        {
            let state = lock::read(&self.inner.state, "assets.snapshot");
            match &*state {
                CacheState::Loaded(catalog) => return Some(Arc::clone(catalog)),
                CacheState::Loading { .. } => return None,
                CacheState::Unloaded => {}
            }
        }
        self.refresh_in_background();
        None
    }

    fn refresh_in_background(&self) {
        if tokio::runtime::Handle::try_current().is_err() {
            return;
        }
        let mut state = lock::write(&self.inner.state, "assets.refresh");
        if matches!(*state, CacheState::Unloaded) {
            let _ = self.begin_fetch(&mut state);
        }
    }

    /// Install a new in-flight fetch. Inside a runtime the fetch is also
    /// driven by its own task, so it settles even if every caller awaiting
    /// it goes away.
    fn begin_fetch(&self, state: &mut CacheState) -> CatalogFetch {
        let epoch = self.inner.next_epoch.fetch_add(1, Ordering::Relaxed);
        let backend = Arc::clone(&self.inner.backend);
        let owner = Arc::downgrade(&self.inner);

        let fetch = async move {
            let catalog = match backend.fetch_catalog().await {
                Ok(catalog) => {
                    counter!(METRIC_CATALOG_FETCH_TOTAL, "result" => "ok").increment(1);
                    info!(epoch, assets = catalog.len(), "Asset catalog loaded");
                    catalog
                }
                Err(err) => {
                    counter!(METRIC_CATALOG_FETCH_TOTAL, "result" => "error").increment(1);
                    warn!(epoch, error = %err, "Asset catalog unavailable; serving fallbacks");
                    AssetCatalog::default()
                }
            };
            let catalog = Arc::new(catalog);
            settle(&owner, epoch, &catalog);
            catalog
        }
        .boxed()
        .shared();

        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let driver = fetch.clone();
            runtime.spawn(async move {
                driver.await;
            });
        }

        *state = CacheState::Loading {
            epoch,
            fetch: fetch.clone(),
        };
        fetch
    }
}

/// Store a finished fetch unless the cache moved on while it was in flight.
fn settle(owner: &Weak<Inner>, epoch: u64, catalog: &Arc<AssetCatalog>) {
    let Some(inner) = owner.upgrade() else {
        return;
    };
    let mut state = lock::write(&inner.state, "assets.settle");
    match &*state {
        CacheState::Loading { epoch: current, .. } if *current == epoch => {
            *state = CacheState::Loaded(Arc::clone(catalog));
        }
        _ => debug!(epoch, "Discarding catalog fetched before an invalidation"),
    }
}
