use std::collections::HashMap;

use auth::AccessPolicy;
use auth::Role;
use http::Method;

use crate::identity::models::IdentityId;

/// Verified caller attached to an allowed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: IdentityId,
    pub email: String,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Allowed outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Public operation; credentials were not inspected.
    Public,
    Granted(Principal),
}

/// Access policy per operation, keyed by HTTP method and route template.
///
/// Operations missing from the table are denied.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicies {
    policies: HashMap<(Method, String), AccessPolicy>,
}

impl AccessPolicies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(mut self, method: Method, route: &str, policy: AccessPolicy) -> Self {
        self.policies.insert((method, route.to_string()), policy);
        self
    }

    pub fn policy_for(&self, method: &Method, route: &str) -> Option<&AccessPolicy> {
        self.policies.get(&(method.clone(), route.to_string()))
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
