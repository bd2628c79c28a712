//! Events shown on the public agenda and managed from the dashboard.

use majex_api_types::{Event, EventStatus, EventWrite, Page};
use reqwest::Method;
use serde_json::json;
use time::OffsetDateTime;
use tracing::info;

use crate::http::{ApiClient, ApiError};
use crate::upload::{ImageUpload, multipart_form};

#[derive(Clone)]
pub struct EventService {
    api: ApiClient,
}

impl EventService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Page<Event>, ApiError> {
        self.api.get_list("events").await
    }

    pub async fn get(&self, id: u64) -> Result<Event, ApiError> {
        self.api.get(&format!("events/{id}")).await
    }

    /// JSON when no image is attached, multipart otherwise.
    pub async fn create(
        &self,
        event: &EventWrite,
        image: Option<ImageUpload>,
    ) -> Result<Event, ApiError> {
        validate(event)?;
        let created: Event = match image {
            Some(image) => {
                let form = multipart_form(event.form_fields(), Some(image), None)?;
                self.api.post_multipart("events", form).await?
            }
            None => self.api.send_json(Method::POST, "events", event).await?,
        };
        info!(event_id = ?created.id, title = %created.title, "Event created");
        Ok(created)
    }

    /// Multipart updates go out as `POST` with a `PUT` override.
    pub async fn update(
        &self,
        id: u64,
        event: &EventWrite,
        image: Option<ImageUpload>,
    ) -> Result<Event, ApiError> {
        validate(event)?;
        let path = format!("events/{id}");
        let updated = match image {
            Some(image) => {
                let form = multipart_form(event.form_fields(), Some(image), Some("PUT"))?;
                self.api.post_multipart(&path, form).await?
            }
            None => self.api.send_json(Method::PUT, &path, event).await?,
        };
        info!(event_id = id, "Event updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.api.delete(&format!("events/{id}")).await?;
        info!(event_id = id, "Event deleted");
        Ok(())
    }

    pub async fn publish(&self, id: u64) -> Result<Event, ApiError> {
        self.transition(id, "publish").await
    }

    pub async fn cancel(&self, id: u64) -> Result<Event, ApiError> {
        self.transition(id, "cancel").await
    }

    /// Public agenda: published events after `now`, soonest first.
    pub async fn upcoming(
        &self,
        now: OffsetDateTime,
        kind: Option<&str>,
    ) -> Result<Vec<Event>, ApiError> {
        let page = self.list().await?;
        Ok(upcoming_events(page.items, now, kind))
    }

    async fn transition(&self, id: u64, action: &'static str) -> Result<Event, ApiError> {
        let event: Event = self
            .api
            .send_json(Method::POST, &format!("events/{id}/{action}"), &json!({}))
            .await?;
        info!(event_id = id, action, status = %event.status, "Event status changed");
        Ok(event)
    }
}

/// Filter and sort for the public agenda. Events whose date cannot be
/// parsed are left out.
pub fn upcoming_events(events: Vec<Event>, now: OffsetDateTime, kind: Option<&str>) -> Vec<Event> {
    let mut upcoming: Vec<(OffsetDateTime, Event)> = events
        .into_iter()
        .filter(|event| event.status == EventStatus::Published)
        .filter(|event| kind.is_none_or(|kind| event.kind == kind))
        .filter_map(|event| event.starts_at().map(|start| (start, event)))
        .filter(|(start, _)| *start > now)
        .collect();
    upcoming.sort_by_key(|(start, _)| *start);
    upcoming.into_iter().map(|(_, event)| event).collect()
}

fn validate(event: &EventWrite) -> Result<(), ApiError> {
    for (field, value) in [
        ("title", &event.title),
        ("description", &event.description),
        ("type", &event.kind),
        ("location", &event.location),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::invalid_input(format!("event {field} is required")));
        }
    }
    if majex_api_types::events::parse_event_date(&event.date).is_none() {
        return Err(ApiError::invalid_input(format!(
            "event date `{}` is not a recognised date",
            event.date
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn event(id: u64, kind: &str, date: &str, status: EventStatus) -> Event {
        Event {
            id: Some(id),
            title: format!("Event {id}"),
            description: "Atelier".into(),
            kind: kind.into(),
            date: date.into(),
            end_date: None,
            location: "Abidjan".into(),
            max_participants: None,
            current_participants: None,
            price: None,
            formatted_price: None,
            image_url: None,
            status,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn agenda_keeps_future_published_events_in_date_order() {
        let now = datetime!(2025-06-01 12:00 UTC);
        let events = vec![
            event(1, "formation", "2025-07-10 09:00:00", EventStatus::Published),
            event(2, "seminaire", "2025-06-15 09:00:00", EventStatus::Published),
            event(3, "formation", "2025-05-01 09:00:00", EventStatus::Published),
            event(4, "formation", "2025-06-20 09:00:00", EventStatus::Draft),
            event(5, "formation", "not a date", EventStatus::Published),
        ];

        let ids: Vec<_> = upcoming_events(events.clone(), now, None)
            .into_iter()
            .filter_map(|event| event.id)
            .collect();
        assert_eq!(ids, vec![2, 1]);

        let formations: Vec<_> = upcoming_events(events, now, Some("formation"))
            .into_iter()
            .filter_map(|event| event.id)
            .collect();
        assert_eq!(formations, vec![1]);
    }

    #[test]
    fn writes_need_the_mandatory_fields() {
        let mut write = EventWrite {
            title: "Séminaire RH".into(),
            description: "Gestion des talents".into(),
            kind: "seminaire".into(),
            date: "2025-09-01T09:00".into(),
            end_date: None,
            location: "Abidjan".into(),
            max_participants: Some(40),
            price: None,
            status: EventStatus::Draft,
            image_url: None,
        };
        assert!(validate(&write).is_ok());

        write.date = "demain".into();
        assert!(matches!(validate(&write), Err(ApiError::InvalidInput(_))));

        write.date = "2025-09-01".into();
        write.location = " ".into();
        assert!(matches!(validate(&write), Err(ApiError::InvalidInput(_))));
    }
}
