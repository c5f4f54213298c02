//! Form buffers edited by the views.
//!
//! egui binds text inputs to `String`s, so dates, times and tags are held as
//! text here and only parsed when the form is submitted.

use chrono::{Duration, Local, NaiveDate, NaiveTime};

use crate::shared::error::SharedError;
use crate::shared::event::{
    format_hex_color, parse_clock_time, parse_hex_color, tags_from_input, Event, EventDraft,
};
use crate::shared::profile::AccountDetails;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const DEFAULT_COLOR: [u8; 3] = [0x5C, 0x3A, 0x2C];

/// Create/edit event form
#[derive(Debug, Clone, PartialEq)]
pub struct EventFormState {
    /// Id of the event being edited; `None` when creating
    pub editing: Option<String>,
    pub name: String,
    pub start: String,
    pub end: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
    pub location: String,
    pub meeting_link: String,
    pub contact_email: String,
    pub color: [u8; 3],
    /// Comma-separated
    pub tags: String,
}

impl EventFormState {
    /// Empty form for a new event starting tomorrow evening
    pub fn blank() -> Self {
        let tomorrow = Local::now().date_naive() + Duration::days(1);
        Self::blank_on(tomorrow)
    }

    pub fn blank_on(date: NaiveDate) -> Self {
        let day = date.format(DATE_FORMAT).to_string();
        Self {
            editing: None,
            name: String::new(),
            start: day.clone(),
            end: day,
            start_time: "18:00".to_string(),
            end_time: "20:00".to_string(),
            description: String::new(),
            location: String::new(),
            meeting_link: String::new(),
            contact_email: String::new(),
            color: DEFAULT_COLOR,
            tags: String::new(),
        }
    }

    /// Prefill from a stored event
    pub fn from_event(event: &Event) -> Self {
        let details = &event.details;
        Self {
            editing: Some(event.id.clone()),
            name: details.name.clone(),
            start: details.start.format(DATE_FORMAT).to_string(),
            end: details.end.format(DATE_FORMAT).to_string(),
            start_time: details.start_time.format(TIME_FORMAT).to_string(),
            end_time: details.end_time.format(TIME_FORMAT).to_string(),
            description: details.description.clone(),
            location: details.location.clone(),
            meeting_link: details.meeting_link.clone(),
            contact_email: details.contact_email.clone(),
            color: parse_hex_color(&details.color).unwrap_or(DEFAULT_COLOR),
            tags: details.tags.join(", "),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Parse the text fields into a draft. Field rules beyond parsing are
    /// checked by the store.
    pub fn to_draft(&self) -> Result<EventDraft, SharedError> {
        let draft = EventDraft {
            name: self.name.clone(),
            start: parse_date("start", &self.start)?,
            end: parse_date("end", &self.end)?,
            start_time: parse_time("starttime", &self.start_time)?,
            end_time: parse_time("endtime", &self.end_time)?,
            description: self.description.clone(),
            location: self.location.clone(),
            meeting_link: self.meeting_link.clone(),
            contact_email: self.contact_email.clone(),
            color: format_hex_color(self.color),
            tags: tags_from_input(&self.tags),
        };
        Ok(draft.normalized())
    }
}

impl Default for EventFormState {
    fn default() -> Self {
        Self::blank()
    }
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, SharedError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| SharedError::validation(field, "Dates must look like YYYY-MM-DD"))
}

fn parse_time(field: &str, raw: &str) -> Result<NaiveTime, SharedError> {
    parse_clock_time(raw).map_err(|_| SharedError::validation(field, "Times must look like HH:MM"))
}

/// Account-details form; blank fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountFormState {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl AccountFormState {
    pub fn to_details(&self) -> Result<AccountDetails, SharedError> {
        if self.password != self.confirm_password {
            return Err(SharedError::validation("password", "Passwords do not match"));
        }
        let non_blank = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        Ok(AccountDetails {
            email: non_blank(&self.email),
            password: non_blank(&self.password),
        })
    }

    pub fn clear_passwords(&mut self) {
        self.password.clear();
        self.confirm_password.clear();
    }
}
