//! Request and response types shared between the MAJEX site client and its
//! command-line surface.
//!
//! The backend wraps every payload in an [`Envelope`]; the shapes here are the
//! `data` members once unwrapped.

pub mod assets;
pub mod auth;
pub mod contacts;
pub mod envelope;
pub mod events;

pub use assets::{AssetCatalog, AssetCategory, ReorderItem, ReorderRequest, SiteAsset};
pub use auth::{LoginRequest, LoginSuccess, User};
pub use contacts::{ContactForm, ContactMessage, ContactStats, ContactStatus, StatusUpdate};
pub use envelope::{Envelope, Page};
pub use events::{Event, EventStatus, EventWrite};

use thiserror::Error;

/// Returned when a textual enumeration value does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
