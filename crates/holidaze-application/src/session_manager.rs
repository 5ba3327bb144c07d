//! The session state machine.
//!
//! `SessionManager` owns the single authenticated-identity record and its
//! durability across restarts. There are two states, anonymous and
//! authenticated; login/register success moves one way, logout the other,
//! and a failure never leaves a half-populated session behind: the store is
//! written before memory, so an interrupted login keeps the prior state
//! intact.

use holidaze_core::auth::{AuthApi, RegistrationForm};
use holidaze_core::{HolidazeError, Result, Session, SessionStore, SharedToken};
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// Manages the authenticated session and its lifecycle.
///
/// The manager is the only writer of the session record, the shared token
/// cell, and the persisted store; everything else takes synchronous
/// snapshots through [`current`](Self::current).
pub struct SessionManager {
    /// In-memory observable state, `None` when anonymous
    current: RwLock<Option<Session>>,
    /// The remote authentication operations (mocked in tests)
    auth: Arc<dyn AuthApi>,
    /// Durable storage surviving restarts
    store: Arc<dyn SessionStore>,
    /// Bearer token cell read by the gateway
    token: Arc<SharedToken>,
}

impl SessionManager {
    pub fn new(
        auth: Arc<dyn AuthApi>,
        store: Arc<dyn SessionStore>,
        token: Arc<SharedToken>,
    ) -> Self {
        Self {
            current: RwLock::new(None),
            auth,
            store,
            token,
        }
    }

    /// Rehydrates the persisted session on startup.
    ///
    /// A missing record means anonymous; an unreadable record is logged and
    /// treated the same, so a corrupt file never blocks startup.
    pub async fn restore(&self) -> Option<Session> {
        match self.store.load().await {
            Ok(Some(session)) => {
                self.token.set(&session.access_token);
                *self.current.write().expect("session lock poisoned") = Some(session.clone());
                info!(name = %session.name, "restored session");
                Some(session)
            }
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "failed to restore persisted session, starting anonymous");
                None
            }
        }
    }

    /// Exchanges credentials for an authenticated session.
    ///
    /// On success the session is persisted and becomes current. A rejection
    /// surfaces as `Authentication` carrying the server's message, and the
    /// prior state, authenticated or not, is untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let session = self
            .auth
            .login(email, password)
            .await
            .map_err(|err| match err {
                HolidazeError::Rejected { message, .. } => HolidazeError::Authentication(message),
                other => other,
            })?;

        let session = self.persist(session).await?;
        info!(name = %session.name, "logged in");
        Ok(session)
    }

    /// Registers an account and immediately logs in with the same
    /// credentials; registration alone yields no token.
    ///
    /// Local rules run first and a violation never reaches the network.
    pub async fn register(&self, form: &RegistrationForm) -> Result<Session> {
        let registration = form.validate()?;

        self.auth
            .register(&registration)
            .await
            .map_err(|err| match err {
                HolidazeError::Rejected { message, .. } => HolidazeError::Registration(message),
                other => other,
            })?;

        self.login(&registration.email, &registration.password).await
    }

    /// Drops the session, the token, and the persisted record. Never fails:
    /// a store error is logged and the in-memory state is cleared anyway.
    pub async fn logout(&self) {
        *self.current.write().expect("session lock poisoned") = None;
        self.token.clear();

        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "failed to clear persisted session");
        }
        info!("logged out");
    }

    /// Replaces the avatar on the current profile and re-persists the
    /// session. A rejection surfaces as `ProfileUpdate` and the stored
    /// avatar stays unchanged.
    pub async fn update_avatar(&self, url: &str) -> Result<Session> {
        let session = self
            .current()
            .ok_or_else(|| HolidazeError::ProfileUpdate("no active session".into()))?;

        let avatar = self
            .auth
            .update_avatar(&session.name, url)
            .await
            .map_err(|err| match err {
                HolidazeError::Rejected { message, .. } => HolidazeError::ProfileUpdate(message),
                other => other,
            })?;

        let mut updated = session;
        updated.avatar = Some(avatar);
        self.persist(updated).await
    }

    /// Synchronous snapshot of the current session.
    pub fn current(&self) -> Option<Session> {
        self.current.read().expect("session lock poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().expect("session lock poisoned").is_some()
    }

    /// Store first, then memory: when persistence fails the state machine
    /// has not transitioned.
    async fn persist(&self, session: Session) -> Result<Session> {
        self.store.save(&session).await.map_err(|err| HolidazeError::Io {
            message: format!("failed to persist session: {err:#}"),
        })?;

        self.token.set(&session.access_token);
        *self.current.write().expect("session lock poisoned") = Some(session.clone());
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use holidaze_core::auth::Registration;
    use holidaze_core::Media;
    use holidaze_infrastructure::TomlSessionStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// AuthApi double: scripted results, call counters.
    #[derive(Default)]
    struct MockAuthApi {
        login_calls: AtomicUsize,
        register_calls: AtomicUsize,
        avatar_calls: AtomicUsize,
        reject_login: Option<HolidazeError>,
        reject_register: Option<HolidazeError>,
        reject_avatar: Option<HolidazeError>,
        token: String,
    }

    impl MockAuthApi {
        fn succeeding(token: &str) -> Self {
            Self {
                token: token.into(),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl AuthApi for MockAuthApi {
        async fn login(&self, email: &str, _password: &str) -> Result<Session> {
            self.login_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = &self.reject_login {
                return Err(err.clone());
            }
            Ok(Session {
                name: email.split('@').next().unwrap_or("user").to_string(),
                email: email.to_string(),
                venue_manager: false,
                access_token: self.token.clone(),
                avatar: None,
            })
        }

        async fn register(&self, _registration: &Registration) -> Result<()> {
            self.register_calls.fetch_add(1, Ordering::SeqCst);
            match &self.reject_register {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }

        async fn update_avatar(&self, _profile_name: &str, url: &str) -> Result<Media> {
            self.avatar_calls.fetch_add(1, Ordering::SeqCst);
            match &self.reject_avatar {
                Some(err) => Err(err.clone()),
                None => Ok(Media::new(url)),
            }
        }
    }

    struct Harness {
        _dir: TempDir,
        auth: Arc<MockAuthApi>,
        store: Arc<TomlSessionStore>,
        token: Arc<SharedToken>,
        manager: SessionManager,
    }

    fn harness(auth: MockAuthApi) -> Harness {
        let dir = TempDir::new().unwrap();
        let auth = Arc::new(auth);
        let store = Arc::new(TomlSessionStore::new(dir.path()).unwrap());
        let token = Arc::new(SharedToken::new());
        let manager = SessionManager::new(auth.clone(), store.clone(), token.clone());
        Harness {
            _dir: dir,
            auth,
            store,
            token,
            manager,
        }
    }

    fn rejected(status: u16, message: &str) -> HolidazeError {
        HolidazeError::Rejected {
            status,
            message: message.into(),
        }
    }

    #[tokio::test]
    async fn login_persists_token_across_a_reload() {
        let h = harness(MockAuthApi::succeeding("token-T"));

        let session = h.manager.login("alice@stud.noroff.no", "password123").await.unwrap();
        assert_eq!(session.access_token, "token-T");
        assert_eq!(h.token.get().as_deref(), Some("token-T"));
        assert!(h.manager.is_authenticated());

        // Simulated reload: a fresh manager over the same store.
        let reloaded = SessionManager::new(
            h.auth.clone(),
            h.store.clone(),
            Arc::new(SharedToken::new()),
        );
        let restored = reloaded.restore().await.unwrap();
        assert_eq!(restored.access_token, "token-T");
    }

    #[tokio::test]
    async fn rejected_login_surfaces_the_server_message_and_keeps_state() {
        let h = harness(MockAuthApi {
            reject_login: Some(rejected(401, "Invalid credentials")),
            ..MockAuthApi::default()
        });

        let err = h
            .manager
            .login("alice@stud.noroff.no", "wrong")
            .await
            .unwrap_err();

        assert_eq!(err, HolidazeError::Authentication("Invalid credentials".into()));
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!h.manager.is_authenticated());
        assert!(h.token.get().is_none());
        assert!(h.store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn logout_clears_memory_and_store() {
        let h = harness(MockAuthApi::succeeding("token-T"));
        h.manager.login("alice@stud.noroff.no", "password123").await.unwrap();

        h.manager.logout().await;

        assert!(h.manager.current().is_none());
        assert!(h.token.get().is_none());
        assert!(h.store.load().await.unwrap().is_none());

        // Logging out while anonymous is a no-op, not an error.
        h.manager.logout().await;
    }

    #[tokio::test]
    async fn register_validates_locally_before_any_network_call() {
        let h = harness(MockAuthApi::succeeding("token-T"));

        let form = RegistrationForm {
            name: "alice".into(),
            email: "alice@stud.noroff.no".into(),
            password: "password123".into(),
            confirm_password: "different123".into(),
            venue_manager: false,
        };

        let err = h.manager.register(&form).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(h.auth.register_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.auth.login_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn register_success_logs_in_with_the_same_credentials() {
        let h = harness(MockAuthApi::succeeding("token-T"));

        let form = RegistrationForm {
            name: "alice".into(),
            email: "alice@stud.noroff.no".into(),
            password: "password123".into(),
            confirm_password: "password123".into(),
            venue_manager: true,
        };

        let session = h.manager.register(&form).await.unwrap();
        assert_eq!(session.access_token, "token-T");
        assert_eq!(h.auth.register_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.auth.login_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejected_registration_leaves_no_session() {
        let h = harness(MockAuthApi {
            reject_register: Some(rejected(400, "Profile already exists")),
            token: "token-T".into(),
            ..MockAuthApi::default()
        });

        let form = RegistrationForm {
            name: "alice".into(),
            email: "alice@stud.noroff.no".into(),
            password: "password123".into(),
            confirm_password: "password123".into(),
            venue_manager: false,
        };

        let err = h.manager.register(&form).await.unwrap_err();
        assert_eq!(
            err,
            HolidazeError::Registration("Profile already exists".into())
        );
        assert!(!h.manager.is_authenticated());
        assert_eq!(h.auth.login_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn avatar_update_mutates_session_and_repersists() {
        let h = harness(MockAuthApi::succeeding("token-T"));
        h.manager.login("alice@stud.noroff.no", "password123").await.unwrap();

        let updated = h
            .manager
            .update_avatar("https://example.com/new.jpg")
            .await
            .unwrap();
        assert_eq!(
            updated.avatar,
            Some(Media::new("https://example.com/new.jpg"))
        );

        let persisted = h.store.load().await.unwrap().unwrap();
        assert_eq!(persisted.avatar, Some(Media::new("https://example.com/new.jpg")));
    }

    #[tokio::test]
    async fn rejected_avatar_update_keeps_the_old_avatar() {
        let h = harness(MockAuthApi {
            reject_avatar: Some(rejected(400, "Image is not accessible")),
            token: "token-T".into(),
            ..MockAuthApi::default()
        });
        h.manager.login("alice@stud.noroff.no", "password123").await.unwrap();

        let err = h
            .manager
            .update_avatar("https://example.com/broken.jpg")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            HolidazeError::ProfileUpdate("Image is not accessible".into())
        );
        assert!(h.manager.current().unwrap().avatar.is_none());
    }

    #[tokio::test]
    async fn avatar_update_without_a_session_is_rejected_locally() {
        let h = harness(MockAuthApi::succeeding("token-T"));

        let err = h
            .manager
            .update_avatar("https://example.com/a.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, HolidazeError::ProfileUpdate(_)));
        assert_eq!(h.auth.avatar_calls.load(Ordering::SeqCst), 0);
    }
}
