//! Process-wide session state
//!
//! The signed-in session is held in a [`SessionStore`]. Views that depend on
//! it take a [`SessionSubscription`] for as long as they are open; dropping the
//! subscription unsubscribes.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::errors::ConsoleError;
use crate::http::client::HttpClient;
use crate::models::user::{Session, User};

/// Source of the current session, for testability
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn fetch_session(&self) -> Result<Option<Session>, ConsoleError>;
}

#[async_trait]
impl SessionProvider for HttpClient {
    async fn fetch_session(&self) -> Result<Option<Session>, ConsoleError> {
        self.get_session().await
    }
}

/// Known session state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// Not fetched yet
    #[default]
    Unknown,
    SignedOut,
    SignedIn(Session),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::SignedIn(session) => Some(&session.user),
            _ => None,
        }
    }
}

pub struct SessionStore<P: SessionProvider + ?Sized> {
    provider: Arc<P>,
    state: watch::Sender<SessionState>,
}

impl<P: SessionProvider + ?Sized> SessionStore<P> {
    pub fn new(provider: Arc<P>) -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        Self { provider, state }
    }

    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Number of open subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.state.receiver_count()
    }

    pub fn subscribe(&self) -> SessionSubscription {
        debug!("Session subscriber added");
        SessionSubscription {
            receiver: self.state.subscribe(),
        }
    }

    /// Fetch the session from the auth provider and publish it
    pub async fn refresh(&self) -> Result<SessionState, ConsoleError> {
        let state = match self.provider.fetch_session().await? {
            Some(session) if !session.is_expired(Utc::now()) => SessionState::SignedIn(session),
            Some(_) => {
                info!("Session expired");
                SessionState::SignedOut
            }
            None => SessionState::SignedOut,
        };
        self.state.send_replace(state.clone());
        Ok(state)
    }

    /// Forget the session, e.g. after the backend rejected it
    pub fn sign_out(&self) {
        self.state.send_replace(SessionState::SignedOut);
    }

    async fn resolved(&self) -> Result<SessionState, ConsoleError> {
        match self.current() {
            SessionState::Unknown => self.refresh().await,
            state => Ok(state),
        }
    }

    /// The signed-in user, fetching the session on first use
    pub async fn require_user(&self) -> Result<User, ConsoleError> {
        match self.resolved().await? {
            SessionState::SignedIn(session) if !session.is_expired(Utc::now()) => Ok(session.user),
            _ => Err(ConsoleError::Unauthorized(
                "Sign in on the dashboard and set LANG_SESSION_TOKEN".to_string(),
            )),
        }
    }

    /// The signed-in user, who must be an admin
    pub async fn require_admin(&self) -> Result<User, ConsoleError> {
        let user = self.require_user().await?;
        if !user.is_admin() {
            return Err(ConsoleError::Forbidden(format!(
                "{} is not an admin",
                user.display_name()
            )));
        }
        Ok(user)
    }
}

/// Live view of the session store
pub struct SessionSubscription {
    receiver: watch::Receiver<SessionState>,
}

impl SessionSubscription {
    pub fn current(&self) -> SessionState {
        self.receiver.borrow().clone()
    }

    /// Wait for the next published state; `None` once the store is gone
    pub async fn changed(&mut self) -> Option<SessionState> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        debug!("Session subscriber removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{Role, SessionInfo};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeProvider {
        session: Option<Session>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SessionProvider for FakeProvider {
        async fn fetch_session(&self) -> Result<Option<Session>, ConsoleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.session.clone())
        }
    }

    fn session(role: Role, expires_in_secs: i64) -> Session {
        Session {
            session: SessionInfo {
                id: Some("s1".to_string()),
                expires_at: Utc::now() + chrono::Duration::seconds(expires_in_secs),
            },
            user: User {
                id: "u1".to_string(),
                name: Some("Ada".to_string()),
                email: "ada@example.com".to_string(),
                role,
                image: None,
                created_at: None,
            },
        }
    }

    fn store(session: Option<Session>) -> SessionStore<FakeProvider> {
        SessionStore::new(Arc::new(FakeProvider {
            session,
            calls: AtomicUsize::new(0),
        }))
    }

    #[tokio::test]
    async fn test_session_fetched_once() {
        let store = store(Some(session(Role::User, 3600)));
        store.require_user().await.unwrap();
        store.require_user().await.unwrap();
        assert_eq!(store.provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_admin_gate() {
        let store = store(Some(session(Role::User, 3600)));
        assert!(matches!(
            store.require_admin().await,
            Err(ConsoleError::Forbidden(_))
        ));

        let store = self::store(Some(session(Role::Admin, 3600)));
        assert!(store.require_admin().await.unwrap().is_admin());
    }

    #[tokio::test]
    async fn test_expired_session_is_signed_out() {
        let store = store(Some(session(Role::Admin, -10)));
        assert_eq!(store.refresh().await.unwrap(), SessionState::SignedOut);
        assert!(matches!(
            store.require_user().await,
            Err(ConsoleError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_subscription_lifecycle() {
        let store = store(None);
        let mut subscription = store.subscribe();
        assert_eq!(store.subscriber_count(), 1);

        store.refresh().await.unwrap();
        assert_eq!(subscription.changed().await, Some(SessionState::SignedOut));

        drop(subscription);
        assert_eq!(store.subscriber_count(), 0);
    }
}
