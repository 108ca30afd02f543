use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::ids::ProfileId;

/// Access level of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::User, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Human label used by role pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(ModelError::UnknownRole(other.to_string())),
        }
    }
}

/// Application-level user record, distinct from the authentication identity
/// it is linked to. `email` is copied from the identity and is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Profile {
    pub id: ProfileId,
    pub role: Role,
    pub full_name: String,
    pub badge_number: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub email: String,
}

impl Profile {
    /// The fields an in-place edit is allowed to write back.
    pub fn changes(&self) -> ProfileChanges {
        ProfileChanges {
            role: self.role,
            full_name: self.full_name.clone(),
            badge_number: self
                .badge_number
                .as_deref()
                .and_then(normalize_badge),
        }
    }
}

/// Row inserted into the profiles collection after an identity is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewProfileRow {
    pub id: ProfileId,
    pub role: Role,
    pub full_name: String,
    pub badge_number: Option<String>,
}

/// Fixed field set written by a profile update. Email is never part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileChanges {
    pub role: Role,
    pub full_name: String,
    pub badge_number: Option<String>,
}

/// Empty badge input is stored as absent, not as an empty string.
pub fn normalize_badge(input: &str) -> Option<String> {
    if input.is_empty() {
        None
    } else {
        Some(input.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" user ".parse::<Role>(), Ok(Role::User));
        assert!(matches!(
            "owner".parse::<Role>(),
            Err(ModelError::UnknownRole(raw)) if raw == "owner"
        ));
    }

    #[test]
    fn changes_map_empty_badge_to_none() {
        let profile = Profile {
            id: ProfileId::new("p1"),
            role: Role::Admin,
            full_name: "Ada".into(),
            badge_number: Some(String::new()),
            email: "ada@example.com".into(),
        };

        let changes = profile.changes();
        assert_eq!(changes.badge_number, None);
        assert_eq!(changes.role, Role::Admin);
        assert_eq!(changes.full_name, "Ada");
    }

    #[test]
    fn whitespace_badge_is_kept() {
        assert_eq!(normalize_badge(" "), Some(" ".to_string()));
        assert_eq!(normalize_badge(""), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn profile_round_trips_wire_names() {
        let json = serde_json::json!({
            "id": "1",
            "role": "user",
            "full_name": "Bea",
            "badge_number": null,
            "email": "b@x.com"
        });
        let profile: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.id.as_str(), "1");
        assert_eq!(profile.badge_number, None);
        assert_eq!(serde_json::to_value(&profile.role).unwrap(), "user");
    }
}
