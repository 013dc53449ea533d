//! Authentication and authorization primitives.
//!
//! - Password hashing (Argon2id)
//! - Signed session tokens (HS256, three-segment JWT layout)
//! - Roles and access policies
//! - Authentication coordination
//!
//! The library holds no storage and no request handling; services resolve
//! identities themselves and call into these types.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Role, Subject, TokenCodec};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let subject = Subject::new("user123", "alice@example.com", Role::Customer);
//! let token = codec.issue(&subject, Duration::hours(24)).unwrap();
//! let claims = codec.verify(&token).unwrap();
//! assert_eq!(claims.subject(), subject);
//! ```
//!
//! ## Access Policies
//! ```
//! use auth::{AccessPolicy, Role};
//!
//! let policy = AccessPolicy::roles([Role::Admin, Role::Collaborator]).unwrap();
//! assert!(policy.permits(Role::Collaborator));
//! assert!(!policy.permits(Role::Customer));
//! ```

pub mod authenticator;
pub mod password;
pub mod rbac;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use password::PasswordCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use rbac::AccessPolicy;
pub use rbac::Role;
pub use token::ClaimSet;
pub use token::Subject;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenRejection;
