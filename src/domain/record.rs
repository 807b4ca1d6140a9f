use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Date format used on the wire and in form inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Opaque identifier assigned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A managed user as returned by the service. Every field is mandatory, so a
/// partial payload fails to deserialize instead of entering the list cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(deserialize_with = "deserialize_dob")]
    pub dob: NaiveDate,
}

impl Record {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Short label used by selectors and log lines.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.username, self.full_name())
    }
}

/// Payload for `POST /users`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub dob: NaiveDate,
}

impl fmt::Debug for CreationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreationRequest")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("dob", &self.dob)
            .finish()
    }
}

/// Partial payload for `PUT /users/{id}`. Unset members are left out of the
/// JSON body entirely; username and password cannot be expressed here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
}

impl UpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.dob.is_none()
    }

    /// Applies the present members onto `record`.
    pub fn apply_to(&self, record: &mut Record) {
        if let Some(first_name) = &self.first_name {
            record.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            record.last_name = last_name.clone();
        }
        if let Some(dob) = self.dob {
            record.dob = dob;
        }
    }
}

/// Parses a calendar date from either `YYYY-MM-DD` or a full timestamp, the
/// latter being what browser clients tend to send for date pickers.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.date_naive());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|stamp| stamp.date())
}

fn deserialize_dob<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date of birth `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn record_uses_wire_field_names() {
        let record: Record = serde_json::from_value(json!({
            "id": "7",
            "username": "al",
            "firstName": "Al",
            "lastName": "Ng",
            "dob": "1990-01-01"
        }))
        .unwrap();
        assert_eq!(record.id.as_str(), "7");
        assert_eq!(record.first_name, "Al");
        assert_eq!(record.dob, date(1990, 1, 1));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["lastName"], "Ng");
        assert_eq!(value["dob"], "1990-01-01");
    }

    #[test]
    fn record_accepts_timestamp_dob() {
        let record: Record = serde_json::from_value(json!({
            "id": "1",
            "username": "bo",
            "firstName": "Bo",
            "lastName": "Li",
            "dob": "1985-06-15T00:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(record.dob, date(1985, 6, 15));
    }

    #[test]
    fn partial_record_is_rejected() {
        let parsed = serde_json::from_value::<Record>(json!({
            "id": "1",
            "username": "bo",
            "firstName": "Bo"
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn update_request_omits_absent_fields() {
        let request = UpdateRequest {
            first_name: Some("Alan".into()),
            ..UpdateRequest::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "firstName": "Alan" })
        );
    }

    #[test]
    fn creation_request_debug_hides_password() {
        let request = CreationRequest {
            username: "al".into(),
            password: "hunter2".into(),
            first_name: "Al".into(),
            last_name: "Ng".into(),
            dob: date(1990, 1, 1),
        };
        let rendered = format!("{request:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date(" 2024-02-29 "), Some(date(2024, 2, 29)));
    }
}
