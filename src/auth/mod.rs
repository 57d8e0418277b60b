//! Student sign-in and the locally mirrored session.

mod backend;
mod service;

pub use backend::{AuthBackend, RestAuthBackend};
pub use service::AuthService;

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::api::ApiError;

/// Sign-in and session failures. `Display` is the message shown to the user.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    #[error("No active session")]
    NoSession,
    #[error("Session expired, please sign in again")]
    SessionExpired,
    #[error("Enrollment number and password are required")]
    InvalidInput,
    #[error("Enrollment number not found")]
    EnrollmentNotFound,
    #[error("Account is inactive")]
    Inactive,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Could not create a secure session token")]
    Token,
    #[error("Session expiry is out of range")]
    ExpiryOutOfRange,
    #[error("An unexpected error occurred: {0}")]
    Backend(#[from] ApiError),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Enrollment numbers are compared trimmed and uppercased.
pub fn normalize_enrollment(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// SHA-256 of `ENROLLMENT:password`, lowercase hex.
pub fn hash_password(enrollment_no: &str, password: &str) -> String {
    let digest = Sha256::digest(format!("{enrollment_no}:{password}").as_bytes());
    hex::encode(digest)
}

/// 256 random bits, hex encoded.
pub(crate) fn new_session_token() -> AuthResult<String> {
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes).map_err(|e| {
        log::error!("getrandom failed: {e}");
        AuthError::Token
    })?;
    Ok(hex::encode(bytes))
}
