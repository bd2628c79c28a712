//! Response wrapper used by every backend endpoint.

use serde::{Deserialize, Serialize};

/// `{ "success": bool, "message": "...", "data": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// A decoded list payload. When the backend paginates, the paginator metadata
/// is kept; a bare array decodes with `total == items.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub last_page: u64,
    pub total: u64,
}

impl<T> Page<T> {
    /// A single page holding every item.
    pub fn complete(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self {
            items,
            current_page: 1,
            last_page: 1,
            total,
        }
    }

    pub fn has_more(&self) -> bool {
        self.current_page < self.last_page
    }
}
