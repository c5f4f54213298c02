/**
 * Document Handlers
 *
 * - `GET /api/collections/{collection}` - list (events only)
 * - `POST /api/collections/{collection}` - add under a new id
 * - `GET /api/collections/{collection}/{id}` - read one
 * - `PUT /api/collections/{collection}/{id}` - create or overwrite
 * - `PATCH /api/collections/{collection}/{id}` - merge top-level fields
 * - `DELETE /api/collections/{collection}/{id}` - delete (idempotent)
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::backend::documents::{db, Collection, ORGANISATION_FIELD};
use crate::backend::error::BackendError;
use crate::backend::middleware::{AuthUser, AuthenticatedUser};
use crate::backend::server::state::AppState;
use crate::shared::api::CreatedResponse;
use crate::shared::document::{merge_fields, Document, Fields};

fn organiser(data: &Fields) -> Option<&str> {
    data.get(ORGANISATION_FIELD).and_then(Value::as_str)
}

/// The caller must be the stored event's organiser
fn check_organiser(stored: &Fields, user: &AuthenticatedUser, id: &str) -> Result<(), BackendError> {
    if organiser(stored) == Some(user.user_id.as_str()) {
        Ok(())
    } else {
        Err(BackendError::permission_denied(format!(
            "Only the organiser can change event {}",
            id
        )))
    }
}

/// A new event must name the caller as organiser
fn check_new_event(data: &Fields, user: &AuthenticatedUser) -> Result<(), BackendError> {
    if organiser(data) == Some(user.user_id.as_str()) {
        Ok(())
    } else {
        Err(BackendError::permission_denied(
            "New events must be organised by the signed-in user",
        ))
    }
}

/// Profile documents belong to the account with the same id
fn check_profile_owner(user: &AuthenticatedUser, id: &str) -> Result<(), BackendError> {
    if user.user_id == id {
        Ok(())
    } else {
        Err(BackendError::permission_denied("Profiles are private to their owner"))
    }
}

fn missing(collection: Collection, id: &str) -> BackendError {
    BackendError::not_found(format!("No document {}/{}", collection.as_str(), id))
}

pub async fn list_documents(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> Result<Json<Vec<Document>>, BackendError> {
    match Collection::from_name(&collection)? {
        Collection::Events => Ok(Json(db::list_documents(&state.pool, Collection::Events.as_str()).await?)),
        Collection::Users => Err(BackendError::permission_denied("Listing profiles is not allowed")),
    }
}

pub async fn create_document(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    AuthUser(user): AuthUser,
    Json(data): Json<Fields>,
) -> Result<(StatusCode, Json<CreatedResponse>), BackendError> {
    let collection = Collection::from_name(&collection)?;
    match collection {
        Collection::Events => check_new_event(&data, &user)?,
        Collection::Users => {
            return Err(BackendError::permission_denied(
                "Profiles are stored under the account id",
            ))
        }
    }

    let id = Uuid::new_v4().simple().to_string();
    db::upsert_document(&state.pool, collection.as_str(), &id, &data).await?;
    tracing::debug!("Created {}/{}", collection.as_str(), id);

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn get_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    user: Option<AuthUser>,
) -> Result<Json<Document>, BackendError> {
    let collection = Collection::from_name(&collection)?;
    if collection == Collection::Users {
        let AuthUser(user) = user.ok_or_else(|| BackendError::unauthenticated("Sign in to read profiles"))?;
        check_profile_owner(&user, &id)?;
    }

    db::get_document(&state.pool, collection.as_str(), &id)
        .await?
        .map(Json)
        .ok_or_else(|| missing(collection, &id))
}

pub async fn set_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    AuthUser(user): AuthUser,
    Json(mut data): Json<Fields>,
) -> Result<StatusCode, BackendError> {
    let collection = Collection::from_name(&collection)?;
    match collection {
        Collection::Events => match db::get_document(&state.pool, collection.as_str(), &id).await? {
            Some(stored) => {
                check_organiser(&stored.data, &user, &id)?;
                if let Some(organisation) = stored.data.get(ORGANISATION_FIELD) {
                    data.insert(ORGANISATION_FIELD.to_string(), organisation.clone());
                }
            }
            None => check_new_event(&data, &user)?,
        },
        Collection::Users => check_profile_owner(&user, &id)?,
    }

    db::upsert_document(&state.pool, collection.as_str(), &id, &data).await?;
    tracing::debug!("Set {}/{}", collection.as_str(), id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    AuthUser(user): AuthUser,
    Json(changes): Json<Fields>,
) -> Result<StatusCode, BackendError> {
    let collection = Collection::from_name(&collection)?;
    if collection == Collection::Users {
        check_profile_owner(&user, &id)?;
    }

    let mut stored = db::get_document(&state.pool, collection.as_str(), &id)
        .await?
        .ok_or_else(|| missing(collection, &id))?;

    if collection == Collection::Events {
        check_organiser(&stored.data, &user, &id)?;
        let organisation = stored.data.get(ORGANISATION_FIELD).cloned();
        merge_fields(&mut stored.data, changes);
        if let Some(organisation) = organisation {
            stored.data.insert(ORGANISATION_FIELD.to_string(), organisation);
        }
    } else {
        merge_fields(&mut stored.data, changes);
    }

    db::upsert_document(&state.pool, collection.as_str(), &id, &stored.data).await?;
    tracing::debug!("Updated {}/{}", collection.as_str(), id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    AuthUser(user): AuthUser,
) -> Result<StatusCode, BackendError> {
    let collection = Collection::from_name(&collection)?;
    match collection {
        Collection::Events => {
            if let Some(stored) = db::get_document(&state.pool, collection.as_str(), &id).await? {
                check_organiser(&stored.data, &user, &id)?;
            }
        }
        Collection::Users => check_profile_owner(&user, &id)?,
    }

    if db::delete_document(&state.pool, collection.as_str(), &id).await? {
        tracing::debug!("Deleted {}/{}", collection.as_str(), id);
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(id: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: id.to_string(),
            email: format!("{}@example.com", id),
        }
    }

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_organiser_rules() {
        let stored = fields(json!({"name": "Jam", "organisation": "u1"}));
        assert!(check_organiser(&stored, &user("u1"), "e1").is_ok());
        assert!(check_organiser(&stored, &user("u2"), "e1").is_err());
        assert!(check_organiser(&Fields::new(), &user("u1"), "e1").is_err());
    }

    #[test]
    fn test_new_event_requires_caller_as_organiser() {
        assert!(check_new_event(&fields(json!({"organisation": "u1"})), &user("u1")).is_ok());
        assert!(check_new_event(&fields(json!({"organisation": "u2"})), &user("u1")).is_err());
        assert!(check_new_event(&Fields::new(), &user("u1")).is_err());
    }

    #[test]
    fn test_profile_owner() {
        assert!(check_profile_owner(&user("u1"), "u1").is_ok());
        assert!(check_profile_owner(&user("u1"), "u2").is_err());
    }
}
