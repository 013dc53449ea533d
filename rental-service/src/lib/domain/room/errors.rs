use thiserror::Error;

use crate::domain::errors::ErrorClass;
use crate::domain::page::PaginationError;

/// Error for RoomId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoomIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for room listing operations
#[derive(Debug, Clone, Error)]
pub enum RoomError {
    #[error("Invalid room ID: {0}")]
    InvalidRoomId(#[from] RoomIdError),

    /// A listing field is out of range.
    #[error("{0}")]
    Invalid(String),

    #[error("Room not found: {0}")]
    NotFound(String),

    #[error("You do not have permission to modify this room")]
    NotOwner,

    #[error("Invalid pagination: {0}")]
    InvalidPage(#[from] PaginationError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for RoomError {
    fn from(err: anyhow::Error) -> Self {
        RoomError::Unknown(err.to_string())
    }
}

impl RoomError {
    pub fn class(&self) -> ErrorClass {
        match self {
            RoomError::Invalid(_) | RoomError::InvalidPage(_) => ErrorClass::Validation,
            // Malformed ids are reported like missing rooms.
            RoomError::InvalidRoomId(_) | RoomError::NotFound(_) => ErrorClass::NotFound,
            RoomError::NotOwner => ErrorClass::Authorization,
            RoomError::DatabaseError(_) | RoomError::Unknown(_) => ErrorClass::Internal,
        }
    }
}
