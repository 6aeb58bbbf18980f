//! Role → capability mapping. This table is the single source of truth for
//! what a session may do; both the HTTP handlers and the `/auth/me` payload
//! consumed by UI affordances go through it.

use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    /// Role strings come from the users table. Anything unrecognized maps to
    /// `None`, which the policy treats as no access; it never fails.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "editor" => Some(Self::Editor),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub struct Capabilities {
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_toggle_pin: bool,
    pub can_delete: bool,
}

impl Capabilities {
    pub const NONE: Self = Self {
        can_view: false,
        can_create: false,
        can_edit: false,
        can_toggle_pin: false,
        can_delete: false,
    };
}

pub fn capabilities(role: Option<Role>) -> Capabilities {
    match role {
        Some(Role::Admin) => Capabilities {
            can_view: true,
            can_create: true,
            can_edit: true,
            can_toggle_pin: true,
            can_delete: true,
        },
        Some(Role::Editor) => Capabilities {
            can_view: true,
            can_create: true,
            can_edit: true,
            can_toggle_pin: true,
            can_delete: false,
        },
        Some(Role::Viewer) => Capabilities {
            can_view: true,
            can_create: false,
            can_edit: false,
            can_toggle_pin: false,
            can_delete: false,
        },
        None => Capabilities::NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_has_full_access() {
        let caps = capabilities(Some(Role::Admin));
        assert!(caps.can_view);
        assert!(caps.can_create);
        assert!(caps.can_edit);
        assert!(caps.can_toggle_pin);
        assert!(caps.can_delete);
    }

    #[test]
    fn editor_can_do_everything_but_delete() {
        let caps = capabilities(Some(Role::Editor));
        assert!(caps.can_view);
        assert!(caps.can_create);
        assert!(caps.can_edit);
        assert!(caps.can_toggle_pin);
        assert!(!caps.can_delete);
    }

    #[test]
    fn viewer_is_read_only() {
        let caps = capabilities(Some(Role::Viewer));
        assert!(caps.can_view);
        assert!(!caps.can_create);
        assert!(!caps.can_edit);
        assert!(!caps.can_toggle_pin);
        assert!(!caps.can_delete);
    }

    #[test]
    fn missing_role_has_no_access() {
        assert_eq!(capabilities(None), Capabilities::NONE);
    }

    #[test]
    fn unknown_role_strings_parse_to_none() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("editor"), Some(Role::Editor));
        assert_eq!(Role::parse("viewer"), Some(Role::Viewer));
        assert_eq!(Role::parse("owner"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("Admin"), None);
    }

    #[test]
    fn role_round_trips_through_display() {
        for role in [Role::Admin, Role::Editor, Role::Viewer] {
            assert_eq!(Role::parse(&role.to_string()), Some(role));
        }
    }
}
