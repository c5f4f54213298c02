//! Event Records
//!
//! An event is a listed activity with scheduling, contact and descriptive
//! metadata. Three shapes exist:
//!
//! - [`EventDraft`] - what a user fills in on the event form
//! - [`EventDocument`] - what is stored in the `events` collection
//!   (the draft plus the organising user's id)
//! - [`Event`] - a stored document read back, carrying its backend id
//!
//! Field names on the wire follow the collection's established layout
//! (`starttime`, `endtime`, `meetinglink`, `contactemail`), dates are
//! `YYYY-MM-DD` and clock times are `HH:MM`.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::shared::document::Document;
use crate::shared::error::SharedError;

/// Event fields supplied by the organiser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(rename = "starttime", with = "clock_time")]
    pub start_time: NaiveTime,
    #[serde(rename = "endtime", with = "clock_time")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "meetinglink", default)]
    pub meeting_link: String,
    #[serde(rename = "contactemail", default)]
    pub contact_email: String,
    /// Colour tag, `#rrggbb`
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl EventDraft {
    /// Check the draft at the input boundary.
    ///
    /// Rules: non-empty name, end date not before start date, end time not
    /// before start time on a single-day event, contact email empty or
    /// containing `@`, colour empty or `#rrggbb`.
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.name.trim().is_empty() {
            return Err(SharedError::validation("name", "Event name cannot be empty"));
        }
        if self.end < self.start {
            return Err(SharedError::validation("end", "Event cannot end before it starts"));
        }
        if self.end == self.start && self.end_time < self.start_time {
            return Err(SharedError::validation(
                "endtime",
                "Event cannot end before it starts",
            ));
        }
        let email = self.contact_email.trim();
        if !email.is_empty() && !email.contains('@') {
            return Err(SharedError::validation(
                "contactemail",
                "Contact email is badly formatted",
            ));
        }
        if !self.color.is_empty() && parse_hex_color(&self.color).is_none() {
            return Err(SharedError::validation("color", "Colour must look like #rrggbb"));
        }
        Ok(())
    }

    /// Trim text fields and tidy the tag list.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.location = self.location.trim().to_string();
        self.meeting_link = self.meeting_link.trim().to_string();
        self.contact_email = self.contact_email.trim().to_string();
        self.tags = normalize_tags(self.tags);
        self
    }
}

/// Stored body of an event document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDocument {
    /// User id of the organiser
    pub organisation: String,
    #[serde(flatten)]
    pub details: EventDraft,
}

/// An event read back from the `events` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub organisation: String,
    #[serde(flatten)]
    pub details: EventDraft,
}

impl Event {
    /// Attach the document id to its decoded body
    pub fn from_document(doc: &Document) -> Result<Self, SharedError> {
        let body: EventDocument = doc.decode()?;
        Ok(Self {
            id: doc.id.clone(),
            organisation: body.organisation,
            details: body.details,
        })
    }

    pub fn is_organised_by(&self, user_id: &str) -> bool {
        self.organisation == user_id
    }

    pub fn to_document(&self) -> EventDocument {
        EventDocument {
            organisation: self.organisation.clone(),
            details: self.details.clone(),
        }
    }
}

/// Split comma-separated tag input into a tidy tag list
pub fn tags_from_input(input: &str) -> Vec<String> {
    normalize_tags(input.split(',').map(str::to_string).collect())
}

/// Trim tags, drop empties and case-insensitive duplicates (first spelling wins)
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.to_lowercase()))
        .collect()
}

/// Parse `#rrggbb` into RGB bytes
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

pub fn format_hex_color(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Parse `HH:MM` (seconds tolerated) into a clock time
pub fn parse_clock_time(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, clock_time::FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
}

/// Serde adapter storing times as `HH:MM`
mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock_time(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::document::to_fields;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn draft() -> EventDraft {
        EventDraft {
            name: "Art Walk".to_string(),
            start: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
            start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
            description: "monthly art walk downtown".to_string(),
            location: "Downtown".to_string(),
            meeting_link: String::new(),
            contact_email: "hello@artwalk.org".to_string(),
            color: "#ff8800".to_string(),
            tags: vec!["art".to_string(), "culture".to_string()],
        }
    }

    #[test]
    fn test_wire_field_names() {
        let doc = EventDocument {
            organisation: "u1".to_string(),
            details: draft(),
        };
        let fields = to_fields(&doc).unwrap();
        assert_eq!(fields["starttime"], "18:00");
        assert_eq!(fields["endtime"], "20:30");
        assert_eq!(fields["start"], "2024-05-03");
        assert_eq!(fields["contactemail"], "hello@artwalk.org");
        assert_eq!(fields["organisation"], "u1");
        assert!(fields.get("start_time").is_none());
    }

    #[test]
    fn test_from_document_attaches_id() {
        let data = to_fields(&json!({
            "name": "Jazz Night",
            "start": "2024-06-01",
            "end": "2024-06-01",
            "starttime": "21:00:00",
            "endtime": "23:00",
            "organisation": "u2",
            "tags": ["music"]
        }))
        .unwrap();
        let event = Event::from_document(&Document::new("e9", data)).unwrap();

        assert_eq!(event.id, "e9");
        assert_eq!(event.organisation, "u2");
        assert_eq!(event.details.start_time, NaiveTime::from_hms_opt(21, 0, 0).unwrap());
        assert_eq!(event.details.description, "");
        assert!(event.is_organised_by("u2"));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let mut d = draft();
        d.name = "   ".to_string();
        assert_eq!(d.validate().unwrap_err().field(), Some("name"));
    }

    #[test]
    fn test_validate_rejects_backwards_dates() {
        let mut d = draft();
        d.end = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert_eq!(d.validate().unwrap_err().field(), Some("end"));

        let mut d = draft();
        d.end_time = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
        assert_eq!(d.validate().unwrap_err().field(), Some("endtime"));
    }

    #[test]
    fn test_validate_contact_email_and_color() {
        let mut d = draft();
        d.contact_email = "not-an-email".to_string();
        assert_eq!(d.validate().unwrap_err().field(), Some("contactemail"));

        let mut d = draft();
        d.color = "orange".to_string();
        assert_eq!(d.validate().unwrap_err().field(), Some("color"));

        let mut d = draft();
        d.contact_email.clear();
        d.color.clear();
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_tags_from_input() {
        assert_eq!(
            tags_from_input(" Art, culture,, art ,Music "),
            vec!["Art".to_string(), "culture".to_string(), "Music".to_string()]
        );
        assert!(tags_from_input("  ").is_empty());
    }

    #[test]
    fn test_hex_color_round_trip() {
        assert_eq!(parse_hex_color("#ff8800"), Some([0xff, 0x88, 0x00]));
        assert_eq!(format_hex_color([0xff, 0x88, 0x00]), "#ff8800");
        assert_eq!(parse_hex_color("ff8800"), None);
        assert_eq!(parse_hex_color("#ff88"), None);
    }

    #[test]
    fn test_signed_color_channels_are_rejected() {
        assert_eq!(parse_hex_color("#+f+f+f"), None);
        assert_eq!(parse_hex_color("#12345g"), None);

        let mut d = draft();
        d.color = "#+f+f+f".to_string();
        assert_eq!(d.validate().unwrap_err().field(), Some("color"));
    }
}
