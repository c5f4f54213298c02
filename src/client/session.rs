//! Session bootstrap
//!
//! The auth provider reports the signed-in user on a change stream. The first
//! report decides how the app starts: with a restored session or on the login
//! view. [`AuthStateMachine`] turns each report into a [`Transition`] and
//! flags the one that initializes the app; [`drive_session`] applies them to
//! the store.

use std::sync::{Arc, PoisonError, RwLock};

use futures_util::StreamExt;
use tokio_stream::wrappers::WatchStream;

use crate::client::adapter::{AuthProvider, Backend};
use crate::client::store::Store;
use crate::shared::profile::AuthUser;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthPhase {
    /// No report from the provider yet
    #[default]
    Uninitialized,
    Anonymous,
    Authenticated(AuthUser),
}

impl AuthPhase {
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            AuthPhase::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: AuthPhase,
    pub to: AuthPhase,
    /// Set on the first transition out of `Uninitialized`, and only then
    pub initialize: bool,
}

impl Transition {
    /// A session that existed has ended
    pub fn signed_out(&self) -> bool {
        matches!(self.from, AuthPhase::Authenticated(_)) && self.to == AuthPhase::Anonymous
    }
}

#[derive(Debug, Default)]
pub struct AuthStateMachine {
    phase: AuthPhase,
    initialized: bool,
}

impl AuthStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &AuthPhase {
        &self.phase
    }

    pub fn on_auth_change(&mut self, user: Option<AuthUser>) -> Transition {
        let to = match user {
            Some(user) => AuthPhase::Authenticated(user),
            None => AuthPhase::Anonymous,
        };
        let from = std::mem::replace(&mut self.phase, to.clone());
        let initialize = !self.initialized;
        self.initialized = true;
        Transition {
            from,
            to,
            initialize,
        }
    }
}

/// Read side of the current auth phase, shared with the views
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    phase: Arc<RwLock<AuthPhase>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.phase() != AuthPhase::Uninitialized
    }

    fn set(&self, phase: AuthPhase) {
        *self.phase.write().unwrap_or_else(PoisonError::into_inner) = phase;
    }
}

/// Apply one transition to the store
pub async fn apply_transition<B: Backend>(store: &Store<B>, transition: &Transition) {
    if transition.initialize {
        match &transition.to {
            AuthPhase::Authenticated(user) => {
                tracing::info!(uid = %user.uid, "restoring session");
                if let Err(err) = store.fetch_user_profile(user).await {
                    tracing::debug!(uid = %user.uid, error = %err, "session restore left signed out");
                }
            }
            _ => store.redirect_if_guarded(),
        }
    } else if transition.to == AuthPhase::Anonymous {
        if transition.signed_out() {
            store.clear_session();
        }
        store.redirect_if_guarded();
    }
}

/// Follow the provider's auth changes for as long as it reports them.
///
/// `on_mount` runs once, after the initializing transition has been applied.
pub async fn drive_session<B, F>(store: Arc<Store<B>>, handle: SessionHandle, on_mount: F)
where
    B: Backend,
    F: FnOnce() + Send,
{
    let mut changes = WatchStream::new(store.backend().auth().subscribe());
    let mut machine = AuthStateMachine::new();
    let mut on_mount = Some(on_mount);

    while let Some(user) = changes.next().await {
        let transition = machine.on_auth_change(user);
        tracing::debug!(from = ?transition.from, to = ?transition.to, "auth state changed");
        apply_transition(&store, &transition).await;
        handle.set(transition.to.clone());

        if transition.initialize {
            if let Some(mount) = on_mount.take() {
                mount();
            }
        }
    }
    tracing::debug!("auth change stream closed");
}
