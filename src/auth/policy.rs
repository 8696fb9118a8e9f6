//! Authorization policy
//!
//! A single transport-independent decision function: given the caller's
//! role and the role a route requires, allow or deny. The HTTP middleware
//! is only a thin adapter over this.

/// Caller role as embedded in token claims
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Parse a role claim string. Unknown values are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

/// Role a route requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredRole {
    /// Any authenticated caller
    Authenticated,
    /// Admin callers only
    Admin,
}

/// Decide whether `role` satisfies `required`.
pub fn authorize(role: Role, required: RequiredRole) -> bool {
    match required {
        RequiredRole::Authenticated => true,
        RequiredRole::Admin => role == Role::Admin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_any_role_is_authenticated() {
        assert!(authorize(Role::Admin, RequiredRole::Authenticated));
        assert!(authorize(Role::User, RequiredRole::Authenticated));
    }

    #[test]
    fn test_admin_routes_require_admin() {
        assert!(authorize(Role::Admin, RequiredRole::Admin));
        assert!(!authorize(Role::User, RequiredRole::Admin));
    }
}
