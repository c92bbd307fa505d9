use thiserror::Error;

/// Domain failures surfaced to callers. Unknown email and wrong password
/// collapse into the same `InvalidCredentials` value so a login failure
/// does not reveal whether the account exists.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User already exists with this email")]
    UserExists,
    #[error("User not found")]
    UserNotFound,
    /// Store write or hashing failure, propagated unmodified.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
