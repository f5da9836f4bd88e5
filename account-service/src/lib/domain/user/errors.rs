use thiserror::Error;

use crate::domain::user::models::MIN_PASSWORD_LENGTH;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username must be between 3 and 20 characters: minimum {min}, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username must be between 3 and 20 characters: maximum {max}, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Username may only contain letters, digits, and underscore")]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Please enter a valid email address: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all account operations.
///
/// Validation and business-rule failures carry the client-facing message;
/// only `Storage` is considered unexpected and is never shown to clients
/// verbatim.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Please add all fields")]
    MissingFields,

    #[error(transparent)]
    InvalidEmail(#[from] EmailError),

    #[error("Password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    WeakPassword,

    #[error(transparent)]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid token subject: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("User with this email already exists")]
    DuplicateEmail,

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not authorized")]
    Unauthenticated,

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Storage(String),
}
