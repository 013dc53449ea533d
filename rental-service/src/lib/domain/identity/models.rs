use std::fmt;
use std::str::FromStr;

use auth::Role;
use auth::Subject;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::identity::errors::EmailError;
use crate::identity::errors::IdentityIdError;
use crate::identity::errors::NameError;

/// Identity aggregate entity.
///
/// One registered principal. The password hash is produced by the password
/// hasher and never leaves the domain; callers receive a [`Profile`].
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: IdentityId,
    pub full_name: FullName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Claims subject for tokens issued to this identity.
    pub fn subject(&self) -> Subject {
        Subject::new(self.id, self.email.as_str(), self.role)
    }
}

/// Identity unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityId(pub Uuid);

impl IdentityId {
    /// Generate a new random identity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdentityIdError> {
        Uuid::parse_str(s)
            .map(IdentityId)
            .map_err(|e| IdentityIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Full name value type
///
/// Stored trimmed; at least 2 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    const MIN_LENGTH: usize = 2;

    pub fn new(full_name: &str) -> Result<Self, NameError> {
        let trimmed = full_name.trim();
        if trimmed.chars().count() < Self::MIN_LENGTH {
            return Err(NameError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Email address type
///
/// Always held in normalized form (trimmed, lowercase), which makes equality
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trim and lowercase a raw email without validating it.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// Normalize and validate an email address.
    ///
    /// The address must parse per RFC 5322 and its domain must contain a dot
    /// with characters on both sides (`user@host` alone is refused).
    ///
    /// # Errors
    /// * `InvalidFormat` - Structural check failed
    pub fn new(raw: &str) -> Result<Self, EmailError> {
        let normalized = Self::normalize(raw);

        let parsed = email_address::EmailAddress::from_str(&normalized)
            .map_err(|_| EmailError::InvalidFormat)?;

        let domain = parsed.domain();
        let dotted = domain
            .rsplit_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty());
        if !dotted || normalized.chars().any(char::is_whitespace) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Part after the `@`.
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map(|(_, d)| d).unwrap_or_default()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity without its password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: IdentityId,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Identity> for Profile {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            full_name: identity.full_name.as_str().to_string(),
            email: identity.email.as_str().to_string(),
            role: identity.role,
            created_at: identity.created_at,
            updated_at: identity.updated_at,
        }
    }
}

/// Raw registration input.
///
/// Fields stay unvalidated strings: the service checks them in a fixed order
/// so the first failing rule decides the rejection.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Privileged creation of an ADMIN identity.
#[derive(Debug, Clone)]
pub struct CreateAdminCommand {
    pub full_name: Option<String>,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub profile: Profile,
    pub token: String,
}

/// Number of identities per role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub admins: u64,
    pub collaborators: u64,
    pub customers: u64,
}

impl RoleCounts {
    pub fn total(&self) -> u64 {
        self.admins + self.collaborators + self.customers
    }

    pub fn add(&mut self, role: Role, count: u64) {
        match role {
            Role::Admin => self.admins += count,
            Role::Collaborator => self.collaborators += count,
            Role::Customer => self.customers += count,
        }
    }
}

/// Rules applied to self-service registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationPolicy {
    /// Domain fragments that mark throwaway mailboxes; matched as substrings.
    pub blocked_email_domains: Vec<String>,
}

impl RegistrationPolicy {
    pub fn is_blocked(&self, email: &EmailAddress) -> bool {
        let domain = email.domain();
        self.blocked_email_domains
            .iter()
            .any(|blocked| domain.contains(blocked.to_lowercase().as_str()))
    }
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        Self {
            blocked_email_domains: vec![
                "tempmail".to_string(),
                "guerrillamail".to_string(),
                "10minutemail".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let email = EmailAddress::new("  New@Test.COM ").unwrap();
        assert_eq!(email.as_str(), "new@test.com");
        assert_eq!(email.domain(), "test.com");
        assert_eq!(email, EmailAddress::new("new@test.com").unwrap());
    }

    #[test]
    fn test_email_structure() {
        for invalid in [
            "not-an-email",
            "@test.com",
            "user@",
            "user@localhost",
            "user@domain.",
            "us er@test.com",
            "",
        ] {
            assert_eq!(
                EmailAddress::new(invalid),
                Err(EmailError::InvalidFormat),
                "{:?}",
                invalid
            );
        }
        assert!(EmailAddress::new("first.last+tag@sub.example.co").is_ok());
    }

    #[test]
    fn test_full_name_trimmed() {
        assert_eq!(FullName::new("  Ana  ").unwrap().as_str(), "Ana");
        assert_eq!(
            FullName::new(" A "),
            Err(NameError::TooShort { min: 2 })
        );
        assert!(FullName::new("Lê").is_ok());
    }

    #[test]
    fn test_disposable_domains() {
        let policy = RegistrationPolicy::default();
        assert!(policy.is_blocked(&EmailAddress::new("x@tempmail.org").unwrap()));
        assert!(policy.is_blocked(&EmailAddress::new("x@mail.guerrillamail.com").unwrap()));
        assert!(policy.is_blocked(&EmailAddress::new("x@10minutemail.net").unwrap()));
        assert!(!policy.is_blocked(&EmailAddress::new("x@example.com").unwrap()));
    }

    #[test]
    fn test_profile_strips_hash() {
        let now = Utc::now();
        let identity = Identity {
            id: IdentityId::new(),
            full_name: FullName::new("Alice Nguyen").unwrap(),
            email: EmailAddress::new("alice@example.com").unwrap(),
            password_hash: "$argon2id$hash".to_string(),
            role: Role::Customer,
            created_at: now,
            updated_at: now,
        };

        let profile = Profile::from(&identity);
        assert_eq!(profile.email, "alice@example.com");
        assert_eq!(profile.role, Role::Customer);
        assert_eq!(identity.subject().id, identity.id.to_string());
    }

    #[test]
    fn test_role_counts() {
        let mut counts = RoleCounts::default();
        counts.add(Role::Admin, 1);
        counts.add(Role::Customer, 4);
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.collaborators, 0);
    }
}
