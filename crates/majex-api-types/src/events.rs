//! Training sessions, seminars and ceremonies published on the site.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::UnknownVariant;

const SQL_DATETIME: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const FORM_DATETIME: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");
const PLAIN_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
    Completed,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(EventStatus::Draft),
            "published" => Ok(EventStatus::Published),
            "cancelled" => Ok(EventStatus::Cancelled),
            "completed" => Ok(EventStatus::Completed),
            other => Err(UnknownVariant::new("event status", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    pub location: String,
    #[serde(default)]
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub current_participants: Option<u32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default)]
    pub formatted_price: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub status: EventStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Event {
    /// Start instant parsed from `date`; `None` when the backend sent a format
    /// this client does not understand.
    pub fn starts_at(&self) -> Option<OffsetDateTime> {
        parse_event_date(&self.date)
    }
}

/// Writable subset of [`Event`] sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventWrite {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl EventWrite {
    /// Non-empty text fields in the order the backend form expects them.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("type", self.kind.clone()),
            ("date", self.date.clone()),
        ];
        if let Some(end) = &self.end_date {
            fields.push(("end_date", end.clone()));
        }
        fields.push(("location", self.location.clone()));
        if let Some(max) = self.max_participants {
            fields.push(("max_participants", max.to_string()));
        }
        if let Some(price) = self.price {
            fields.push(("price", price.to_string()));
        }
        fields.push(("status", self.status.as_str().to_string()));
        if let Some(url) = &self.image_url {
            fields.push(("image_url", url.clone()));
        }
        fields.retain(|(_, value)| !value.is_empty());
        fields
    }
}

/// Accepts the date shapes the backend and the admin form produce.
pub fn parse_event_date(value: &str) -> Option<OffsetDateTime> {
    let value = value.trim();
    if let Ok(parsed) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(parsed);
    }
    if let Ok(parsed) = PrimitiveDateTime::parse(value, SQL_DATETIME) {
        return Some(parsed.assume_utc());
    }
    if let Ok(parsed) = PrimitiveDateTime::parse(value, FORM_DATETIME) {
        return Some(parsed.assume_utc());
    }
    Date::parse(value, PLAIN_DATE)
        .ok()
        .map(|date| date.midnight().assume_utc())
}

// Decimal columns arrive as JSON strings ("15000.00") on some endpoints.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(value)) => Ok(Some(value)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
