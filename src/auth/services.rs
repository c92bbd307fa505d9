use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::auth::dto::{LoginRequest, ProfileUpdate, PublicUser, RegisterRequest};
use crate::auth::error::AuthError;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::{next_user_id, User};
use crate::config::AppConfig;
use crate::storage::{CredentialStore, CURRENT_USER_KEY};

/// Mock authentication service over an injected [`CredentialStore`]. Each
/// operation awaits a fixed simulated round-trip before touching the store.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    config: Arc<AppConfig>,
    seed: User,
}

impl AuthService {
    /// Builds the service. The seed demo account lives here, outside the
    /// store, and is consulted before any persisted lookup.
    pub fn new(store: Arc<dyn CredentialStore>, config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let now = OffsetDateTime::now_utc();
        let seed = User {
            id: "1".into(),
            email: normalize_email(&config.demo.email),
            name: "Demo User".into(),
            avatar: None,
            password_hash: hash_password(&config.demo.password)?,
            email_verified: true,
            created_at: now,
            updated_at: now,
        };
        Ok(Self {
            store,
            config,
            seed,
        })
    }

    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> Result<PublicUser, AuthError> {
        self.simulate_delay(self.config.latency.auth_ms).await;

        let email = normalize_email(&request.email);
        let Some(user) = self.find_user(&email).await else {
            warn!(email = %email, "login for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(&request.password, &user.password_hash)? {
            warn!(email = %email, user_id = %user.id, "login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %user.id, email = %user.email, "user logged in");
        Ok(PublicUser::from(&user))
    }

    #[instrument(skip(self, request))]
    pub async fn register(&self, request: RegisterRequest) -> Result<PublicUser, AuthError> {
        self.simulate_delay(self.config.latency.auth_ms).await;

        let email = normalize_email(&request.email);
        if self.find_user(&email).await.is_some() {
            warn!(email = %email, "email already registered");
            return Err(AuthError::UserExists);
        }

        // Two concurrent registers for the same email can both pass the
        // check above; last write wins.
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: next_user_id(),
            email,
            name: request.name,
            avatar: None,
            password_hash: hash_password(&request.password)?,
            email_verified: false,
            created_at: now,
            updated_at: now,
        };
        user.persist(self.store.as_ref()).await?;

        info!(user_id = %user.id, email = %user.email, "user registered");
        Ok(PublicUser::from(&user))
    }

    /// Clears the locally cached current-user slot. There is no server-side
    /// session to invalidate.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.simulate_delay(self.config.latency.logout_ms).await;
        self.store.remove(CURRENT_USER_KEY).await?;
        info!("current user cleared");
        Ok(())
    }

    /// Placeholder until persistent sessions exist; always resolves absent.
    pub async fn get_current_user(&self) -> Result<Option<PublicUser>, AuthError> {
        Ok(None)
    }

    #[instrument(skip(self, updates))]
    pub async fn update_profile(
        &self,
        email: &str,
        updates: ProfileUpdate,
    ) -> Result<PublicUser, AuthError> {
        self.simulate_delay(self.config.latency.auth_ms).await;

        let email = normalize_email(email);
        let Some(mut user) = self.find_user(&email).await else {
            warn!(email = %email, "profile update for unknown user");
            return Err(AuthError::UserNotFound);
        };

        if let Some(name) = updates.name {
            user.name = name;
        }
        if let Some(avatar) = updates.avatar {
            user.avatar = Some(avatar);
        }
        user.updated_at = OffsetDateTime::now_utc();
        user.persist(self.store.as_ref()).await?;

        info!(user_id = %user.id, email = %user.email, "profile updated");
        Ok(PublicUser::from(&user))
    }

    /// Seed account first, then the persisted store.
    async fn find_user(&self, email: &str) -> Option<User> {
        if self.seed.email == email {
            return Some(self.seed.clone());
        }
        User::find_by_email(self.store.as_ref(), email).await
    }

    async fn simulate_delay(&self, ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
