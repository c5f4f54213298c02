//! Event Search
//!
//! Linear keyword search over a fetched event list. Name, description and
//! location are lowercased and split on whitespace; tags are compared whole.
//! An event matches when any of its tokens equals any search term, and each
//! matching event appears once in the result, in the order it was fetched.
//! There is no index and no ranking.

use crate::shared::event::Event;

/// Lowercased search terms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerms(Vec<String>);

impl SearchTerms {
    /// Build terms from individual words; blanks and repeats are dropped
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if !term.is_empty() && !out.contains(&term) {
                out.push(term);
            }
        }
        Self(out)
    }

    /// Split free-form search input on whitespace
    pub fn parse(input: &str) -> Self {
        Self::new(input.split_whitespace())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|term| term == token)
    }
}

/// Event field that produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedField {
    Name,
    Description,
    Tags,
    Location,
}

fn any_token_matches(text: &str, terms: &SearchTerms) -> bool {
    text.to_lowercase()
        .split_whitespace()
        .any(|token| terms.contains(token))
}

/// Every field of `event` that matches at least one term
pub fn matched_fields(event: &Event, terms: &SearchTerms) -> Vec<MatchedField> {
    let details = &event.details;
    let mut fields = Vec::new();
    if any_token_matches(&details.name, terms) {
        fields.push(MatchedField::Name);
    }
    if any_token_matches(&details.description, terms) {
        fields.push(MatchedField::Description);
    }
    if details
        .tags
        .iter()
        .any(|tag| terms.contains(&tag.trim().to_lowercase()))
    {
        fields.push(MatchedField::Tags);
    }
    if any_token_matches(&details.location, terms) {
        fields.push(MatchedField::Location);
    }
    fields
}

pub fn matches(event: &Event, terms: &SearchTerms) -> bool {
    !terms.is_empty() && !matched_fields(event, terms).is_empty()
}

/// Union of all events with at least one matching field, in input order
pub fn search_events(events: &[Event], terms: &SearchTerms) -> Vec<Event> {
    if terms.is_empty() {
        return Vec::new();
    }
    events
        .iter()
        .filter(|event| matches(event, terms))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::event::EventDraft;
    use chrono::{NaiveDate, NaiveTime};

    fn event(id: &str, name: &str, description: &str, tags: &[&str], location: &str) -> Event {
        Event {
            id: id.to_string(),
            organisation: "u1".to_string(),
            details: EventDraft {
                name: name.to_string(),
                start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                description: description.to_string(),
                location: location.to_string(),
                meeting_link: String::new(),
                contact_email: String::new(),
                color: String::new(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
            },
        }
    }

    #[test]
    fn test_terms_are_lowercased_and_deduplicated() {
        let terms = SearchTerms::parse("  Art  walk ART ");
        assert_eq!(terms.as_slice(), &["art".to_string(), "walk".to_string()]);
    }

    #[test]
    fn test_art_walk_matches_tags_and_description() {
        let art_walk = event(
            "e1",
            "Art Walk",
            "monthly art walk downtown",
            &["art", "culture"],
            "Downtown",
        );
        let fields = matched_fields(&art_walk, &SearchTerms::new(["art"]));
        assert_eq!(
            fields,
            vec![MatchedField::Name, MatchedField::Description, MatchedField::Tags]
        );

        let results = search_events(&[art_walk.clone()], &SearchTerms::new(["art"]));
        assert_eq!(results, vec![art_walk.clone()]);

        assert!(search_events(&[art_walk], &SearchTerms::new(["jazz"])).is_empty());
    }

    #[test]
    fn test_match_is_whole_token() {
        let e = event("e1", "Artistry", "", &[], "Smart Park");
        assert!(!matches(&e, &SearchTerms::new(["art"])));
    }

    #[test]
    fn test_tag_and_location_case_insensitive() {
        let e = event("e1", "Gig", "", &["Jazz"], "Old Town Hall");
        assert_eq!(
            matched_fields(&e, &SearchTerms::new(["JAZZ", "TOWN"])),
            vec![MatchedField::Tags, MatchedField::Location]
        );
    }

    #[test]
    fn test_empty_terms_match_nothing() {
        let e = event("e1", "Art Walk", "art", &["art"], "art");
        assert!(search_events(&[e], &SearchTerms::default()).is_empty());
    }

    #[test]
    fn test_results_keep_fetch_order() {
        let events = vec![
            event("a", "Book club", "", &[], ""),
            event("b", "Art Walk", "", &[], ""),
            event("c", "Book fair", "", &["art"], ""),
        ];
        let ids: Vec<String> = search_events(&events, &SearchTerms::new(["book", "art"]))
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
