use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::ClaimSet;
use super::claims::Subject;
use super::errors::TokenError;
use super::errors::TokenRejection;

/// Session token codec.
///
/// Tokens follow the three-segment JWT convention
/// (`base64url(header).base64url(payload).base64url(signature)`) signed with
/// HS256, so any standard verifier holding the secret can check them.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a new codec with a secret key.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for `subject`, valid for `validity` from now.
    pub fn issue(&self, subject: &Subject, validity: Duration) -> Result<String, TokenError> {
        self.issue_at(subject, validity, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (Unix seconds).
    pub fn issue_at(
        &self,
        subject: &Subject,
        validity: Duration,
        now: i64,
    ) -> Result<String, TokenError> {
        let claims = ClaimSet::new(subject, now, validity.num_seconds());

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    /// * `Malformed` - Not three segments, or a segment is not valid base64url/JSON
    /// * `BadSignature` - Signature mismatch or unexpected algorithm
    /// * `Expired` - Signature is valid but `exp` has passed
    pub fn verify(&self, token: &str) -> Result<ClaimSet, TokenRejection> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as if the current time were `now` (Unix seconds).
    pub fn verify_at(&self, token: &str, now: i64) -> Result<ClaimSet, TokenRejection> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header, _, _] = segments.as_slice() else {
            return Err(TokenRejection::Malformed);
        };

        match header_algorithm(header)?.parse::<Algorithm>() {
            Ok(algorithm) if algorithm == self.algorithm => {}
            _ => return Err(TokenRejection::BadSignature),
        }

        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against `now`, after the signature.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        let claims = decode::<ClaimSet>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| rejection(e.kind()))?;

        if claims.is_expired(now) {
            return Err(TokenRejection::Expired);
        }

        Ok(claims)
    }
}

/// Read `alg` from the raw header segment.
///
/// jsonwebtoken cannot deserialize headers naming algorithms it does not
/// implement, such as `none`.
fn header_algorithm(segment: &str) -> Result<String, TokenRejection> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenRejection::Malformed)?;
    let header: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|_| TokenRejection::Malformed)?;

    header
        .get("alg")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or(TokenRejection::Malformed)
}

fn rejection(kind: &ErrorKind) -> TokenRejection {
    match kind {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenRejection::BadSignature,
        ErrorKind::ExpiredSignature => TokenRejection::Expired,
        _ => TokenRejection::Malformed,
    }
}
