use majex_api_types::{ContactStats, Event, EventStatus};
use serde::Serialize;

use crate::contacts::ContactService;
use crate::events::EventService;
use crate::http::ApiError;

/// Headline figures of the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub events: u64,
    pub published_events: u64,
    pub draft_events: u64,
    pub contacts: ContactStats,
    /// Percentage of messages marked replied, rounded half up.
    pub reply_rate: u64,
}

impl DashboardSummary {
    pub fn from_parts(events: &[Event], contacts: ContactStats) -> Self {
        let count = |status| events.iter().filter(|event| event.status == status).count() as u64;
        Self {
            events: events.len() as u64,
            published_events: count(EventStatus::Published),
            draft_events: count(EventStatus::Draft),
            contacts,
            reply_rate: reply_rate(&contacts),
        }
    }

    pub async fn load(events: &EventService, contacts: &ContactService) -> Result<Self, ApiError> {
        let (page, stats) = tokio::try_join!(events.list(), contacts.stats())?;
        Ok(Self::from_parts(&page.items, stats))
    }
}

pub fn reply_rate(stats: &ContactStats) -> u64 {
    if stats.total == 0 {
        return 0;
    }
    (200 * stats.replied + stats.total) / (2 * stats.total)
}
