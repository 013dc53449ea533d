use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

use crate::domain::errors::ErrorClass;
use crate::domain::page::PaginationError;

/// Error for IdentityId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for FullName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Full name must be at least {min} characters long")]
    TooShort { min: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format")]
    InvalidFormat,
}

/// Top-level error for registration, login and identity lookups
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Please use a valid email address")]
    DisposableEmailRejected,

    #[error("Email already exists")]
    EmailTaken,

    #[error("Invalid full name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid identity ID: {0}")]
    InvalidIdentityId(#[from] IdentityIdError),

    #[error("Invalid pagination: {0}")]
    InvalidPage(#[from] PaginationError),

    #[error("Identity not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<EmailError> for IdentityError {
    fn from(_: EmailError) -> Self {
        IdentityError::InvalidEmailFormat
    }
}

impl From<anyhow::Error> for IdentityError {
    fn from(err: anyhow::Error) -> Self {
        IdentityError::Unknown(err.to_string())
    }
}

impl IdentityError {
    pub fn class(&self) -> ErrorClass {
        match self {
            IdentityError::PasswordMismatch
            | IdentityError::InvalidEmailFormat
            | IdentityError::DisposableEmailRejected
            | IdentityError::InvalidName(_)
            | IdentityError::InvalidIdentityId(_)
            | IdentityError::InvalidPage(_) => ErrorClass::Validation,
            IdentityError::InvalidCredentials => ErrorClass::Authentication,
            IdentityError::EmailTaken => ErrorClass::Conflict,
            IdentityError::NotFound(_) => ErrorClass::NotFound,
            IdentityError::Password(_)
            | IdentityError::Token(_)
            | IdentityError::DatabaseError(_)
            | IdentityError::Unknown(_) => ErrorClass::Internal,
        }
    }
}
