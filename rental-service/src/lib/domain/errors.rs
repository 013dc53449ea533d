/// Coarse classification shared by every domain error.
///
/// Inbound adapters pick status codes and client-facing messages from the
/// class alone, so the internal reason never decides what a caller sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad input shape or content; the caller can fix the request.
    Validation,
    /// Missing, bad or expired credential; the caller must re-authenticate.
    Authentication,
    /// Valid identity lacking the required role or ownership.
    Authorization,
    /// Duplicate unique key.
    Conflict,
    NotFound,
    Internal,
}
