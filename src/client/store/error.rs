use thiserror::Error;

use crate::client::adapter::AdapterError;
use crate::shared::error::SharedError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Why a store action failed. The display text is what the user is shown.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error(transparent)]
    Backend(#[from] AdapterError),

    #[error(transparent)]
    Validation(#[from] SharedError),

    #[error("You need to be logged in to do that.")]
    NotAuthenticated,

    #[error("Request was made for user {requested} but {current} is signed in")]
    UserMismatch { requested: String, current: String },

    #[error("No profile found for user {0}")]
    ProfileMissing(String),

    #[error("Event {0} does not exist")]
    EventNotFound(String),

    #[error("Only the organiser can change event {0}")]
    NotOwner(String),
}

impl StoreError {
    pub fn is_wrong_password(&self) -> bool {
        matches!(self, StoreError::Backend(AdapterError::WrongPassword))
    }
}
