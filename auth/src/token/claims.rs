use serde::Deserialize;
use serde::Serialize;

use crate::rbac::Role;

/// Who a token is issued to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl Subject {
    pub fn new(id: impl ToString, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.to_string(),
            email: email.into(),
            role,
        }
    }
}

/// Claim set embedded in a session token.
///
/// Field order is the serialized key order: `sub`, `email`, `role`, `iat`, `exp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimSet {
    /// Subject (identity identifier)
    pub sub: String,

    pub email: String,

    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl ClaimSet {
    /// Build the claims for `subject`, valid from `issued_at` for `validity_secs`.
    pub fn new(subject: &Subject, issued_at: i64, validity_secs: i64) -> Self {
        Self {
            sub: subject.id.clone(),
            email: subject.email.clone(),
            role: subject.role,
            iat: issued_at,
            exp: issued_at + validity_secs,
        }
    }

    pub fn subject(&self) -> Subject {
        Subject {
            id: self.sub.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp > self.exp
    }
}
