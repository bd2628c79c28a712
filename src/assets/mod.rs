//! Site image slots: catalog cache, key lookups and admin management.

mod backend;
mod fallbacks;
mod form;
mod service;
mod urls;

pub use backend::{AssetBackend, HttpAssetBackend};
pub use fallbacks::{DEFAULT_PLACEHOLDER, FallbackTable};
pub use form::{AssetForm, validate_key};
pub use service::AssetService;
pub(crate) use service::{
    METRIC_CATALOG_FETCH_TOTAL, METRIC_FALLBACK_TOTAL, METRIC_INVALIDATION_TOTAL,
};
pub use urls::AssetUrls;
