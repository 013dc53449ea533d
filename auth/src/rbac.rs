use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Role carried by every identity and embedded in its tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Collaborator,
    Customer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Collaborator, Role::Customer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Collaborator => "COLLABORATOR",
            Role::Customer => "CUSTOMER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Access rule attached to a protected operation.
///
/// A role set is never empty: use `AccessPolicy::roles`, which refuses an
/// empty list, or `AccessPolicy::authenticated` for "any signed-in role".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPolicy {
    /// No identity required.
    Public,
    /// Caller must hold one of these roles.
    Roles(BTreeSet<Role>),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("An access policy must permit at least one role")]
pub struct EmptyRoleSet;

impl AccessPolicy {
    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Result<Self, EmptyRoleSet> {
        let roles: BTreeSet<Role> = roles.into_iter().collect();
        if roles.is_empty() {
            return Err(EmptyRoleSet);
        }
        Ok(Self::Roles(roles))
    }

    pub fn only(role: Role) -> Self {
        Self::Roles(BTreeSet::from([role]))
    }

    /// Any authenticated identity, whatever its role.
    pub fn authenticated() -> Self {
        Self::Roles(Role::ALL.into_iter().collect())
    }

    pub fn is_public(&self) -> bool {
        matches!(self, AccessPolicy::Public)
    }

    /// Whether `role` satisfies this policy. Public policies admit everyone.
    pub fn permits(&self, role: Role) -> bool {
        match self {
            AccessPolicy::Public => true,
            AccessPolicy::Roles(roles) => roles.contains(&role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(
            serde_json::to_string(&Role::Collaborator).unwrap(),
            "\"COLLABORATOR\""
        );
        assert_eq!(
            serde_json::from_str::<Role>("\"CUSTOMER\"").unwrap(),
            Role::Customer
        );
        assert!(serde_json::from_str::<Role>("\"ROOT\"").is_err());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("Collaborator".parse::<Role>(), Ok(Role::Collaborator));
        assert_eq!(
            "superuser".parse::<Role>(),
            Err(UnknownRole("superuser".to_string()))
        );
    }

    #[test]
    fn test_empty_role_set_rejected() {
        assert_eq!(AccessPolicy::roles(Vec::<Role>::new()), Err(EmptyRoleSet));
    }

    #[test]
    fn test_permits() {
        let policy = AccessPolicy::roles([Role::Admin, Role::Collaborator]).unwrap();
        assert!(policy.permits(Role::Admin));
        assert!(policy.permits(Role::Collaborator));
        assert!(!policy.permits(Role::Customer));

        assert!(AccessPolicy::only(Role::Admin).permits(Role::Admin));
        assert!(!AccessPolicy::only(Role::Admin).permits(Role::Customer));
        assert!(AccessPolicy::authenticated().permits(Role::Customer));
        assert!(AccessPolicy::Public.permits(Role::Customer));
    }
}
