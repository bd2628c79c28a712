//! Site image slots ("assets") and the grouped public catalog.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

/// Fixed grouping of site assets. Ordering follows page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Logo,
    Hero,
    About,
    Services,
    Partner,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 5] = [
        AssetCategory::Logo,
        AssetCategory::Hero,
        AssetCategory::About,
        AssetCategory::Services,
        AssetCategory::Partner,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetCategory::Logo => "logo",
            AssetCategory::Hero => "hero",
            AssetCategory::About => "about",
            AssetCategory::Services => "services",
            AssetCategory::Partner => "partner",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetCategory {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        AssetCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| UnknownVariant::new("asset category", value))
    }
}

/// One manageable image slot.
///
/// `url` stays `None` until an image is uploaded and may be relative to the
/// backend origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteAsset {
    pub id: u64,
    pub key: String,
    pub category: AssetCategory,
    pub label: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Active assets grouped by category, each group in backend order.
///
/// Missing categories are simply absent; the map never holds a key the
/// backend did not send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetCatalog {
    groups: BTreeMap<AssetCategory, Vec<SiteAsset>>,
}

impl AssetCatalog {
    pub fn new(groups: BTreeMap<AssetCategory, Vec<SiteAsset>>) -> Self {
        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    /// Total number of assets across all categories.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn category(&self, category: AssetCategory) -> &[SiteAsset] {
        self.groups
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Search every category for `key`.
    pub fn find(&self, key: &str) -> Option<&SiteAsset> {
        self.groups
            .values()
            .flat_map(|assets| assets.iter())
            .find(|asset| asset.key == key)
    }

    pub fn groups(&self) -> impl Iterator<Item = (AssetCategory, &[SiteAsset])> {
        self.groups
            .iter()
            .map(|(category, assets)| (*category, assets.as_slice()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderItem {
    pub id: u64,
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub items: Vec<ReorderItem>,
}
