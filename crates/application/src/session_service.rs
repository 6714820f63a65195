//! Session state with an explicit lifecycle.
//!
//! A [`SessionService`] starts `Pending`, resolves once to `Anonymous` or
//! `Authenticated`, and returns to `Anonymous` at sign-out. Views subscribe
//! to changes instead of reading the session ambiently. The process-wide
//! [`SessionRegistry`] holds one service per signed-in account.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use servicedesk_core::{Principal, Role, UserId};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Observable session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Session resolution has not finished.
    Pending,
    /// No principal is signed in.
    Anonymous,
    /// A principal is signed in.
    Authenticated(Principal),
}

impl SessionState {
    /// Returns the signed-in principal, if any.
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Authenticated(principal) => Some(principal),
            Self::Pending | Self::Anonymous => None,
        }
    }

    /// Returns whether the state was resolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl From<Option<Principal>> for SessionState {
    fn from(value: Option<Principal>) -> Self {
        value.map_or(Self::Anonymous, Self::Authenticated)
    }
}

/// Application service holding the current session.
#[derive(Clone)]
pub struct SessionService {
    sender: Arc<watch::Sender<SessionState>>,
}

impl SessionService {
    /// Creates the service in the `Pending` state. Call once at startup.
    #[must_use]
    pub fn start() -> Self {
        let (sender, _) = watch::channel(SessionState::Pending);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn current(&self) -> SessionState {
        self.sender.borrow().clone()
    }

    /// Returns a receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.sender.subscribe()
    }

    /// Finishes session resolution with the restored principal, if any.
    pub fn resolve(&self, principal: Option<Principal>) {
        self.publish(SessionState::from(principal));
    }

    /// Establishes a session for `principal`.
    pub fn sign_in(&self, principal: Principal) {
        info!(user_id = %principal.id(), role = %principal.role(), "session established");
        self.publish(SessionState::Authenticated(principal));
    }

    /// Tears the session down.
    pub fn sign_out(&self) {
        if let Some(principal) = self.current().principal() {
            info!(user_id = %principal.id(), "session closed");
        }
        self.publish(SessionState::Anonymous);
    }

    fn publish(&self, state: SessionState) {
        self.sender.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            *current = state;
            true
        });
    }
}

/// Live sessions of every signed-in account. Created once at startup.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    accounts: Arc<RwLock<HashMap<UserId, SessionService>>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Establishes the session of `principal`'s account.
    ///
    /// A first sign-in resolves a new service; later ones replace the
    /// principal of the live service so its followers rescope.
    pub fn sign_in(&self, principal: Principal) -> SessionService {
        let (service, opened) = {
            let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);
            match accounts.get(&principal.id()) {
                Some(service) => (service.clone(), false),
                None => {
                    let service = SessionService::start();
                    accounts.insert(principal.id(), service.clone());
                    (service, true)
                }
            }
        };

        if opened {
            debug!(user_id = %principal.id(), "account session opened");
            service.resolve(Some(principal));
        } else {
            service.sign_in(principal);
        }
        service
    }

    /// Returns the live state behind a principal restored from a session cookie.
    ///
    /// Accounts without a live session are `Anonymous`, and a live session
    /// wins over the restored principal, so role changes apply at once.
    #[must_use]
    pub fn current(&self, restored: Option<&Principal>) -> SessionState {
        restored
            .and_then(|principal| self.service(principal.id()))
            .map_or(SessionState::Anonymous, |service| service.current())
    }

    /// Returns a receiver for the account session of `user_id`, if one is live.
    #[must_use]
    pub fn subscribe(&self, user_id: UserId) -> Option<watch::Receiver<SessionState>> {
        self.service(user_id).map(|service| service.subscribe())
    }

    /// Re-signs a live account session with `role`. Returns whether one was live.
    pub fn change_role(&self, user_id: UserId, role: Role) -> bool {
        let Some(service) = self.service(user_id) else {
            return false;
        };
        let Some(principal) = service.current().principal().map(|current| current.with_role(role))
        else {
            return false;
        };

        service.sign_in(principal);
        true
    }

    /// Ends the account session of `user_id`. Views following it are torn down.
    pub fn sign_out(&self, user_id: UserId) -> Option<Principal> {
        let service = self
            .accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&user_id)?;
        let principal = service.current().principal().cloned();
        service.sign_out();
        principal
    }

    fn service(&self, user_id: UserId) -> Option<SessionService> {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user_id)
            .cloned()
    }
}

/// View whose contents depend on who is signed in.
#[async_trait]
pub trait SessionBound: Send + Sync {
    /// Re-fetches for a new principal when identity or role changed.
    async fn rescope(&self, principal: Principal);

    /// Ends the view lifetime.
    fn teardown(&self);

    /// Returns a token cancelled when the view is torn down.
    fn lifetime(&self) -> CancellationToken;
}

/// Keeps `view` in step with the session until sign-out or teardown.
///
/// A new principal rescopes the view; sign-out tears it down.
pub fn follow_session<V>(
    view: Arc<V>,
    mut sessions: watch::Receiver<SessionState>,
) -> JoinHandle<()>
where
    V: SessionBound + 'static,
{
    let lifetime = view.lifetime();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                () = lifetime.cancelled() => break,
                changed = sessions.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }

            let state = sessions.borrow_and_update().clone();
            match state {
                SessionState::Authenticated(principal) => view.rescope(principal).await,
                SessionState::Anonymous => {
                    debug!("session ended, tearing view down");
                    view.teardown();
                    break;
                }
                SessionState::Pending => {}
            }
        }
    })
}
