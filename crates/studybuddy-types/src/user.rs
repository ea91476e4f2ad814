//! user type and the role that gates what a user may do.
//!
//! studybuddy knows three kinds of account: students, faculty and
//! superadmins. faculty and superadmins together are "staff".

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl UserId {
    /// the id as the signed integer stored in the database.
    pub fn as_i64(self) -> i64 {
        self.0 as i64
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id as u64)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// the role of a user.
///
/// a single enum instead of independent staff/superuser flags, so a
/// superadmin is always staff as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// regular student. may upload only with an active uploader approval.
    #[default]
    Student,
    /// faculty member. uploads are approved immediately, reviews uploads.
    Faculty,
    /// superadmin. everything faculty can do, plus role management.
    #[serde(rename = "superadmin")]
    SuperAdmin,
}

impl Role {
    /// faculty and superadmins are staff.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Faculty | Role::SuperAdmin)
    }

    /// whether this role may manage other users' roles.
    pub fn is_superadmin(self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// the string stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::SuperAdmin => "superadmin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "faculty" => Ok(Role::Faculty),
            "superadmin" => Ok(Role::SuperAdmin),
            other => Err(Error::UnknownRole(other.to_string())),
        }
    }
}

/// a studybuddy account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// unique identifier.
    pub id: UserId,

    /// login name, unique.
    pub username: String,

    /// given name.
    pub first_name: String,

    /// family name.
    pub last_name: String,

    /// contact email.
    pub email: Option<String>,

    /// what the user is allowed to do.
    pub role: Role,

    /// when the user joined.
    pub created_at: DateTime<Utc>,

    /// when the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// create a new student with the given username.
    pub fn new(id: UserId, username: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            first_name: String::new(),
            last_name: String::new(),
            email: None,
            role: Role::Student,
            created_at: now,
            updated_at: now,
        }
    }

    /// create a new user with an explicit role.
    pub fn with_role(id: UserId, username: String, role: Role) -> Self {
        Self {
            role,
            ..Self::new(id, username)
        }
    }

    /// whether the user is faculty or superadmin.
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }

    /// whether the user is a superadmin.
    pub fn is_superadmin(&self) -> bool {
        self.role.is_superadmin()
    }

    /// "first last", trimmed. empty if neither name is set.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// full name, falling back to the username.
    pub fn display(&self) -> String {
        let full = self.full_name();
        if full.is_empty() {
            self.username.clone()
        } else {
            full
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_staff_flags() {
        assert!(!Role::Student.is_staff());
        assert!(Role::Faculty.is_staff());
        assert!(Role::SuperAdmin.is_staff());

        assert!(!Role::Student.is_superadmin());
        assert!(!Role::Faculty.is_superadmin());
        assert!(Role::SuperAdmin.is_superadmin());
    }

    #[test]
    fn test_role_string_roundtrip() {
        for role in [Role::Student, Role::Faculty, Role::SuperAdmin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("staff".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_matches_db_strings() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"superadmin\"");
        let role: Role = serde_json::from_str("\"faculty\"").unwrap();
        assert_eq!(role, Role::Faculty);
    }

    #[test]
    fn test_user_display_falls_back_to_username() {
        let mut user = User::new(UserId(1), "ada".to_string());
        assert_eq!(user.display(), "ada");

        user.first_name = "Ada".to_string();
        assert_eq!(user.display(), "Ada");

        user.last_name = "Lovelace".to_string();
        assert_eq!(user.display(), "Ada Lovelace");
    }

    #[test]
    fn test_new_user_is_student() {
        let user = User::new(UserId(1), "ada".to_string());
        assert_eq!(user.role, Role::Student);
        assert!(!user.is_staff());

        let faculty = User::with_role(UserId(2), "grace".to_string(), Role::Faculty);
        assert!(faculty.is_staff());
        assert!(!faculty.is_superadmin());
    }
}
