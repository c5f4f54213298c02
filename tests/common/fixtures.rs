//! Event and account fixtures

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use eventboard::client::{MemoryBackend, NoticeLog, Store};
use eventboard::shared::event::EventDraft;
use eventboard::shared::profile::{LoginForm, SignupForm};

pub const PASSWORD: &str = "secret123";

pub fn draft(name: &str, description: &str, location: &str, tags: &[&str]) -> EventDraft {
    EventDraft {
        name: name.to_string(),
        start: NaiveDate::from_ymd_opt(2026, 6, 12).unwrap(),
        end: NaiveDate::from_ymd_opt(2026, 6, 12).unwrap(),
        start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
        description: description.to_string(),
        location: location.to_string(),
        meeting_link: String::new(),
        contact_email: String::new(),
        color: "#336699".to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    }
}

pub fn art_walk() -> EventDraft {
    draft(
        "Art Walk",
        "monthly art walk downtown",
        "Downtown",
        &["art", "culture"],
    )
}

/// Matches "meetup" in its name, description and tags
pub fn meetup() -> EventDraft {
    draft(
        "Rust meetup",
        "community meetup tonight",
        "Library",
        &["meetup"],
    )
}

pub fn jazz_night() -> EventDraft {
    draft("Jazz Night", "live music at the docks", "Harbour", &["music"])
}

pub fn signup_form(name: &str, email: &str) -> SignupForm {
    SignupForm {
        name: name.to_string(),
        description: format!("{} likes events", name),
        email: email.to_string(),
        password: PASSWORD.to_string(),
    }
}

pub fn login_form(email: &str, password: &str) -> LoginForm {
    LoginForm {
        email: email.to_string(),
        password: password.to_string(),
    }
}

/// Store over a fresh in-memory backend, collecting notices
pub fn memory_store() -> (Arc<Store<MemoryBackend>>, NoticeLog) {
    let notices = NoticeLog::new();
    let store = Arc::new(Store::new(MemoryBackend::new(), Arc::new(notices.clone())));
    (store, notices)
}

/// Store with `name` signed up and signed in; the notice log starts empty
pub async fn signed_in_store(name: &str, email: &str) -> (Arc<Store<MemoryBackend>>, NoticeLog) {
    let (store, notices) = memory_store();
    store.signup(signup_form(name, email)).await.unwrap();
    notices.drain();
    (store, notices)
}
