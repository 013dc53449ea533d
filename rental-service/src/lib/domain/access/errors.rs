use auth::Role;
use auth::TokenRejection;
use thiserror::Error;

use crate::domain::errors::ErrorClass;

/// Terminal outcome of a refused request.
///
/// The variants are for logs; clients only ever see the [`ErrorClass`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessDenied {
    /// No policy is declared for the operation.
    #[error("No access policy declared for {method} {route}")]
    Undeclared { method: String, route: String },

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Unauthenticated: {0}")]
    Unauthenticated(TokenRejection),

    /// Token is valid but its identity no longer exists.
    #[error("Identity no longer exists")]
    IdentityGone,

    #[error("Role {role} is not permitted")]
    Forbidden { role: Role },

    #[error("Identity lookup failed: {0}")]
    Store(String),
}

impl AccessDenied {
    pub fn class(&self) -> ErrorClass {
        match self {
            AccessDenied::MissingToken
            | AccessDenied::Unauthenticated(_)
            | AccessDenied::IdentityGone => ErrorClass::Authentication,
            AccessDenied::Undeclared { .. } | AccessDenied::Forbidden { .. } => {
                ErrorClass::Authorization
            }
            AccessDenied::Store(_) => ErrorClass::Internal,
        }
    }
}
