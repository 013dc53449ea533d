use chrono::Duration;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::ClaimSet;
use crate::token::Subject;
use crate::token::TokenCodec;
use crate::token::TokenError;
use crate::token::TokenRejection;

/// Plaintext behind the digest that unknown accounts are checked against.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    decoy_hash: String,
    token_codec: TokenCodec,
    token_validity: Duration,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `password_hasher` - Hasher used for both registration and login
    /// * `token_secret` - Secret key for token signing
    /// * `token_validity` - Lifetime of issued tokens
    pub fn new(password_hasher: PasswordHasher, token_secret: &[u8], token_validity: Duration) -> Self {
        let decoy_hash = password_hasher.hash(DECOY_PASSWORD).unwrap_or_default();

        Self {
            password_hasher,
            decoy_hash,
            token_codec: TokenCodec::new(token_secret),
            token_validity,
        }
    }

    pub fn token_validity(&self) -> Duration {
        self.token_validity
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match, or the stored hash is unreadable
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &Subject,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.generate_token(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Runs a full verification against a digest produced at the configured
    /// cost, so the rejection takes as long as a wrong password would.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        self.password_hasher.verify(password, &self.decoy_hash);
        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without password verification.
    pub fn generate_token(&self, subject: &Subject) -> Result<String, TokenError> {
        self.token_codec.issue(subject, self.token_validity)
    }

    /// Validate and decode a session token.
    pub fn validate_token(&self, token: &str) -> Result<ClaimSet, TokenRejection> {
        self.token_codec.verify(token)
    }
}
