//! Authenticated actor identity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::jwt::Claims;

/// Actor role
///
/// Admins satisfy every role requirement; customers and shop operators only
/// their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Shop,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Shop => "shop",
            Self::Admin => "admin",
        }
    }

    /// Whether an actor with this role satisfies `required`
    pub fn allows(&self, required: Role) -> bool {
        *self == required || *self == Role::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "shop" => Ok(Self::Shop),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unrecognized role: {other}")),
        }
    }
}

/// Authenticated user extracted from a validated token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
    /// Shop operated by this user, when role is `shop`
    pub shop_id: Option<i64>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl TryFrom<Claims> for CurrentUser {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| format!("non-numeric subject: {}", claims.sub))?;
        let role = claims.role.parse::<Role>()?;
        Ok(Self {
            id,
            username: claims.username,
            role,
            shop_id: claims.shop_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_satisfies_every_role() {
        assert!(Role::Admin.allows(Role::Customer));
        assert!(Role::Admin.allows(Role::Shop));
        assert!(Role::Admin.allows(Role::Admin));
    }

    #[test]
    fn shop_does_not_satisfy_admin() {
        assert!(!Role::Shop.allows(Role::Admin));
        assert!(!Role::Customer.allows(Role::Shop));
        assert!(Role::Shop.allows(Role::Shop));
    }
}
