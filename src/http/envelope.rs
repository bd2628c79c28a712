//! Boundary decoding of backend envelopes.
//!
//! Each payload shape has exactly one decoder. A body that matches none of
//! the accepted shapes is a decode error; nothing is guessed.

use majex_api_types::{Envelope, Page};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiError;

/// `{ success, message?, data: T }` → `T`.
pub fn decode_object<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ApiError> {
    // Failure envelopes frequently omit `data`, so check the flag first.
    if let Ok(Acknowledgement {
        success: Some(false),
        message,
    }) = serde_json::from_slice(body)
    {
        return Err(ApiError::rejected(status, message));
    }
    let envelope: Envelope<T> = serde_json::from_slice(body)
        .map_err(|err| ApiError::decode(format!("unexpected response envelope: {err}")))?;
    if envelope.success {
        Ok(envelope.data)
    } else {
        Err(ApiError::rejected(status, envelope.message))
    }
}

/// `{ success, data: [T] }` or `{ success, data: { data: [T], ...paginator } }`.
pub fn decode_list<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<Page<T>, ApiError> {
    let data: Value = decode_object(status, body)?;
    match data {
        Value::Array(_) => {
            let items: Vec<T> = serde_json::from_value(data)
                .map_err(|err| ApiError::decode(format!("invalid list item: {err}")))?;
            Ok(Page::complete(items))
        }
        Value::Object(ref object) if object.get("data").is_some_and(Value::is_array) => {
            let paginator: Paginator<T> = serde_json::from_value(data)
                .map_err(|err| ApiError::decode(format!("invalid paginated list: {err}")))?;
            Ok(paginator.into_page())
        }
        other => Err(ApiError::decode(format!(
            "expected a list or a paginated list, found {}",
            describe(&other)
        ))),
    }
}

/// Bodies of bodiless successes (`204`, `{ "success": true }`) are ignored
/// unless they explicitly report failure.
pub fn decode_unit(status: StatusCode, body: &[u8]) -> Result<(), ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }
    match serde_json::from_slice::<Acknowledgement>(body) {
        Ok(Acknowledgement {
            success: Some(false),
            message,
        }) => Err(ApiError::rejected(status, message)),
        _ => Ok(()),
    }
}

/// Pulls `message` out of an error body, if the backend sent one.
pub fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<Acknowledgement>(body)
        .ok()
        .and_then(|ack| ack.message)
        .filter(|message| !message.trim().is_empty())
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object without a `data` array",
    }
}

#[derive(Debug, Deserialize)]
struct Acknowledgement {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct Paginator<T> {
    data: Vec<T>,
    #[serde(default)]
    current_page: Option<u64>,
    #[serde(default)]
    last_page: Option<u64>,
    #[serde(default)]
    total: Option<u64>,
}

impl<T> Paginator<T> {
    fn into_page(self) -> Page<T> {
        let total = self.total.unwrap_or(self.data.len() as u64);
        let current_page = self.current_page.unwrap_or(1);
        Page {
            items: self.data,
            current_page,
            last_page: self.last_page.unwrap_or(current_page),
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u64,
    }

    #[test]
    fn bare_array_decodes_as_single_page() {
        let page: Page<Item> =
            decode_list(StatusCode::OK, br#"{"success":true,"data":[{"id":1},{"id":2}]}"#)
                .expect("list");
        assert_eq!(page.items, vec![Item { id: 1 }, Item { id: 2 }]);
        assert_eq!(page.total, 2);
        assert!(!page.has_more());
    }

    #[test]
    fn paginator_keeps_metadata() {
        let body = br#"{"success":true,"data":{"current_page":1,"last_page":3,"per_page":2,"total":5,"data":[{"id":9}]}}"#;
        let page: Page<Item> = decode_list(StatusCode::OK, body).expect("paginated");
        assert_eq!(page.items, vec![Item { id: 9 }]);
        assert_eq!(page.total, 5);
        assert!(page.has_more());
    }

    #[test]
    fn unknown_list_shape_fails_loudly() {
        let err = decode_list::<Item>(StatusCode::OK, br#"{"success":true,"data":{"items":[]}}"#)
            .expect_err("ambiguous shape");
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn unsuccessful_envelope_is_rejected_with_message() {
        let err = decode_object::<Item>(
            StatusCode::OK,
            r#"{"success":false,"message":"Compte désactivé"}"#.as_bytes(),
        )
        .expect_err("rejected");
        assert_eq!(err.user_message(), "Compte désactivé");
    }

    #[test]
    fn unit_bodies_are_lenient_unless_they_report_failure() {
        assert!(decode_unit(StatusCode::NO_CONTENT, b"").is_ok());
        assert!(decode_unit(StatusCode::OK, br#"{"success":true}"#).is_ok());
        assert!(decode_unit(StatusCode::OK, br#"{"success":false,"message":"no"}"#).is_err());
    }
}
