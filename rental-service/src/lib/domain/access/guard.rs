use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessPolicy;
use auth::Authenticator;
use auth::TokenRejection;
use http::Method;

use crate::access::errors::AccessDenied;
use crate::access::models::Access;
use crate::access::models::AccessPolicies;
use crate::access::models::Principal;
use crate::identity::models::IdentityId;
use crate::identity::ports::CredentialStore;

/// Port for request-time access decisions.
#[async_trait]
pub trait AccessGuardPort: Send + Sync + 'static {
    /// Decide whether a request may reach the operation registered under
    /// `method` + `route`.
    ///
    /// # Arguments
    /// * `authorization` - Raw `Authorization` header value, if any
    ///
    /// # Errors
    /// * `Undeclared` - No policy registered for the operation
    /// * `MissingToken` - No bearer credential on a protected operation
    /// * `Unauthenticated` - Token malformed, forged or expired
    /// * `IdentityGone` - Token subject no longer exists
    /// * `Forbidden` - Role not in the permitted set
    async fn authorize(
        &self,
        method: &Method,
        route: &str,
        authorization: Option<&str>,
    ) -> Result<Access, AccessDenied>;
}

/// Access guard evaluating declared policies against bearer tokens.
pub struct AccessGuard<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
    policies: AccessPolicies,
}

impl<CS> AccessGuard<CS>
where
    CS: CredentialStore,
{
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>, policies: AccessPolicies) -> Self {
        Self {
            store,
            authenticator,
            policies,
        }
    }

    /// Evaluate one policy: token extraction, verification, identity
    /// re-resolution, then the role check.
    pub async fn evaluate(
        &self,
        policy: &AccessPolicy,
        authorization: Option<&str>,
    ) -> Result<Access, AccessDenied> {
        if policy.is_public() {
            return Ok(Access::Public);
        }

        let token = authorization
            .and_then(bearer_token)
            .ok_or(AccessDenied::MissingToken)?;

        let claims = self
            .authenticator
            .validate_token(token)
            .map_err(AccessDenied::Unauthenticated)?;

        let id = IdentityId::from_string(&claims.sub)
            .map_err(|_| AccessDenied::Unauthenticated(TokenRejection::Malformed))?;

        self.store
            .find_by_id(&id)
            .await
            .map_err(|e| AccessDenied::Store(e.to_string()))?
            .ok_or(AccessDenied::IdentityGone)?;

        if !policy.permits(claims.role) {
            return Err(AccessDenied::Forbidden { role: claims.role });
        }

        Ok(Access::Granted(Principal {
            id,
            email: claims.email,
            role: claims.role,
        }))
    }
}

#[async_trait]
impl<CS> AccessGuardPort for AccessGuard<CS>
where
    CS: CredentialStore,
{
    async fn authorize(
        &self,
        method: &Method,
        route: &str,
        authorization: Option<&str>,
    ) -> Result<Access, AccessDenied> {
        let policy = self
            .policies
            .policy_for(method, route)
            .ok_or_else(|| AccessDenied::Undeclared {
                method: method.to_string(),
                route: route.to_string(),
            })?;

        self.evaluate(policy, authorization).await
    }
}

/// Token from a `Bearer <token>` header value. The scheme is matched
/// case-insensitively; any other scheme yields `None`.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
