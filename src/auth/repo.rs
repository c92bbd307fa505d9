use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::storage::{get_json, set_json, CredentialStore};

/// Full user record as persisted in the credential store. Only
/// [`crate::auth::dto::PublicUser`] crosses the auth boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub password_hash: String,
    pub email_verified: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl User {
    /// Looks up a persisted user. `email` must already be normalized; a
    /// record that fails to parse degrades to a miss.
    pub async fn find_by_email(store: &dyn CredentialStore, email: &str) -> Option<User> {
        get_json(store, email).await
    }

    /// Writes the full record under its normalized email key.
    pub async fn persist(&self, store: &dyn CredentialStore) -> anyhow::Result<()> {
        set_json(store, &self.email, self).await
    }
}

/// Mints a time-derived opaque id. Uniqueness is best effort; records are
/// keyed by email, not id.
pub(crate) fn next_user_id() -> String {
    OffsetDateTime::now_utc().unix_timestamp_nanos().to_string()
}
