//! Store state and the mutations that write it

use crate::shared::event::Event;
use crate::shared::profile::UserProfile;

/// Everything the views render from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    /// Last fetched event list, in backend order
    pub events: Vec<Event>,
    /// Result of the last search
    pub searched_events: Vec<Event>,
    pub user_profile: Option<UserProfile>,
    pub user_id: Option<String>,
}

/// Named state updates. `Store::commit` is the only place they are applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetEvents(Vec<Event>),
    SetSearchedEvents(Vec<Event>),
    SetUserProfile(Option<UserProfile>),
    SetUserId(Option<String>),
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::SetEvents(_) => "set_events",
            Mutation::SetSearchedEvents(_) => "set_searched_events",
            Mutation::SetUserProfile(_) => "set_user_profile",
            Mutation::SetUserId(_) => "set_user_id",
        }
    }
}

impl State {
    pub(crate) fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::SetEvents(events) => self.events = events,
            Mutation::SetSearchedEvents(events) => self.searched_events = events,
            Mutation::SetUserProfile(profile) => self.user_profile = profile,
            Mutation::SetUserId(user_id) => self.user_id = user_id,
        }
    }

    /// Events organised by the signed-in user
    pub fn own_events(&self) -> Vec<Event> {
        match &self.user_id {
            Some(uid) => self
                .events
                .iter()
                .filter(|event| event.is_organised_by(uid))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_sets_only_named_slice() {
        let mut state = State::default();
        state.apply(Mutation::SetUserId(Some("u1".to_string())));
        assert_eq!(state.user_id.as_deref(), Some("u1"));
        assert!(state.user_profile.is_none());
        assert!(state.events.is_empty());

        state.apply(Mutation::SetUserId(None));
        assert_eq!(state, State::default());
    }

    #[test]
    fn test_own_events_without_user_is_empty() {
        assert!(State::default().own_events().is_empty());
    }
}
