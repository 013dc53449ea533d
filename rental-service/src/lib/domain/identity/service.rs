use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Role;
use chrono::Utc;

use crate::domain::page::Page;
use crate::domain::page::PageRequest;
use crate::identity::errors::IdentityError;
use crate::identity::models::CreateAdminCommand;
use crate::identity::models::EmailAddress;
use crate::identity::models::FullName;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;
use crate::identity::models::LoginCommand;
use crate::identity::models::LoginOutcome;
use crate::identity::models::Profile;
use crate::identity::models::RegisterCommand;
use crate::identity::models::RegistrationOutcome;
use crate::identity::models::RegistrationPolicy;
use crate::identity::models::RoleCounts;
use crate::identity::ports::AuthServicePort;
use crate::identity::ports::CredentialStore;

const DEFAULT_ADMIN_NAME: &str = "Admin User";

/// Domain service for registration and login.
///
/// Holds no per-request state. Password hashing and verification are CPU
/// bound and run on the blocking pool.
pub struct AuthService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
    registration: RegistrationPolicy,
}

impl<CS> AuthService<CS>
where
    CS: CredentialStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Identity persistence implementation
    /// * `authenticator` - Password hasher and token codec
    /// * `registration` - Self-service registration rules
    pub fn new(
        store: Arc<CS>,
        authenticator: Arc<Authenticator>,
        registration: RegistrationPolicy,
    ) -> Self {
        Self {
            store,
            authenticator,
            registration,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, IdentityError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| IdentityError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(IdentityError::from)
    }

    async fn insert_identity(
        &self,
        full_name: FullName,
        email: EmailAddress,
        password: String,
        role: Role,
    ) -> Result<Identity, IdentityError> {
        let password_hash = self.hash_password(password).await?;
        let now = Utc::now();

        let identity = Identity {
            id: IdentityId::new(),
            full_name,
            email,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        };

        self.store.insert(identity).await
    }
}

#[async_trait]
impl<CS> AuthServicePort for AuthService<CS>
where
    CS: CredentialStore,
{
    async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<RegistrationOutcome, IdentityError> {
        if command.password != command.confirm_password {
            return Err(IdentityError::PasswordMismatch);
        }

        let email = EmailAddress::new(&command.email)?;

        if self.registration.is_blocked(&email) {
            return Err(IdentityError::DisposableEmailRejected);
        }

        if self
            .store
            .find_by_email_case_insensitive(email.as_str())
            .await?
            .is_some()
        {
            return Err(IdentityError::EmailTaken);
        }

        let full_name = FullName::new(&command.full_name)?;

        let identity = self
            .insert_identity(full_name, email, command.password, Role::Customer)
            .await?;

        tracing::info!(identity_id = %identity.id, role = %identity.role, "Identity registered");

        Ok(RegistrationOutcome {
            success: true,
            message: "User registered successfully".to_string(),
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, IdentityError> {
        let email = EmailAddress::normalize(&command.email);

        let authenticator = Arc::clone(&self.authenticator);

        let Some(identity) = self.store.find_by_email_case_insensitive(&email).await? else {
            let password = command.password;
            tokio::task::spawn_blocking(move || authenticator.reject_unknown(&password))
                .await
                .map_err(|e| {
                    IdentityError::Unknown(format!("Password verification task failed: {}", e))
                })?;

            tracing::info!(reason = "unknown_email", "Login rejected");
            return Err(IdentityError::InvalidCredentials);
        };

        let stored_hash = identity.password_hash.clone();
        let subject = identity.subject();
        let password = command.password;

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &subject)
        })
        .await
        .map_err(|e| IdentityError::Unknown(format!("Password verification task failed: {}", e)))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::info!(reason = "wrong_password", "Login rejected");
                IdentityError::InvalidCredentials
            }
            AuthenticationError::TokenError(err) => IdentityError::Token(err),
        })?;

        tracing::info!(identity_id = %identity.id, role = %identity.role, "Login succeeded");

        Ok(LoginOutcome {
            profile: Profile::from(&identity),
            token: result.access_token,
        })
    }

    async fn create_admin(&self, command: CreateAdminCommand) -> Result<Profile, IdentityError> {
        let email = EmailAddress::new(&command.email)?;
        let full_name = FullName::new(command.full_name.as_deref().unwrap_or(DEFAULT_ADMIN_NAME))?;

        if self
            .store
            .find_by_email_case_insensitive(email.as_str())
            .await?
            .is_some()
        {
            return Err(IdentityError::EmailTaken);
        }

        let identity = self
            .insert_identity(full_name, email, command.password, Role::Admin)
            .await?;

        tracing::info!(identity_id = %identity.id, "Admin identity created");

        Ok(Profile::from(&identity))
    }

    async fn get_profile(&self, id: &IdentityId) -> Result<Profile, IdentityError> {
        self.store
            .find_by_id(id)
            .await?
            .map(|identity| Profile::from(&identity))
            .ok_or(IdentityError::NotFound(id.to_string()))
    }

    async fn list_identities(
        &self,
        page: PageRequest,
        role: Option<Role>,
    ) -> Result<Page<Profile>, IdentityError> {
        let (identities, total) = self.store.list(&page, role).await?;

        Ok(Page::new(identities, total, page).map(|identity| Profile::from(&identity)))
    }

    async fn identity_stats(&self) -> Result<RoleCounts, IdentityError> {
        self.store.count_by_role().await
    }
}
