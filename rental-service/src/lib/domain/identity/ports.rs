use async_trait::async_trait;
use auth::Role;

use crate::domain::page::Page;
use crate::domain::page::PageRequest;
use crate::identity::errors::IdentityError;
use crate::identity::models::CreateAdminCommand;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;
use crate::identity::models::LoginCommand;
use crate::identity::models::LoginOutcome;
use crate::identity::models::Profile;
use crate::identity::models::RegisterCommand;
use crate::identity::models::RegistrationOutcome;
use crate::identity::models::RoleCounts;

/// Port for registration, login and identity administration.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a CUSTOMER identity. Does not log the caller in.
    ///
    /// # Errors
    /// * `PasswordMismatch` - Password and confirmation differ
    /// * `InvalidEmailFormat` - Email fails the structural check
    /// * `DisposableEmailRejected` - Email domain is denylisted
    /// * `EmailTaken` - Email already registered (case-insensitive)
    /// * `InvalidName` - Trimmed full name shorter than 2 characters
    async fn register(&self, command: RegisterCommand)
        -> Result<RegistrationOutcome, IdentityError>;

    /// Verify credentials and issue a session token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, IdentityError>;

    /// Create an ADMIN identity. Callers must already hold the ADMIN role.
    ///
    /// # Errors
    /// * `InvalidEmailFormat` - Email fails the structural check
    /// * `EmailTaken` - Email already registered
    async fn create_admin(&self, command: CreateAdminCommand) -> Result<Profile, IdentityError>;

    /// # Errors
    /// * `NotFound` - Identity does not exist
    async fn get_profile(&self, id: &IdentityId) -> Result<Profile, IdentityError>;

    /// Newest identities first, optionally restricted to one role.
    async fn list_identities(
        &self,
        page: PageRequest,
        role: Option<Role>,
    ) -> Result<Page<Profile>, IdentityError>;

    async fn identity_stats(&self) -> Result<RoleCounts, IdentityError>;
}

/// Lookup and insertion of stored identities.
///
/// Each call is a single-document operation; email uniqueness is enforced by
/// the store itself and surfaces as `EmailTaken` from `insert`.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new identity.
    ///
    /// # Errors
    /// * `EmailTaken` - Another identity holds the same email, ignoring case
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Retrieve identity by identifier.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError>;

    /// Retrieve identity by email, ignoring case.
    async fn find_by_email_case_insensitive(
        &self,
        email: &str,
    ) -> Result<Option<Identity>, IdentityError>;

    /// Page through identities, newest first.
    ///
    /// # Returns
    /// The page's identities and the total matching count
    async fn list(
        &self,
        page: &PageRequest,
        role: Option<Role>,
    ) -> Result<(Vec<Identity>, u64), IdentityError>;

    async fn count_by_role(&self) -> Result<RoleCounts, IdentityError>;
}
