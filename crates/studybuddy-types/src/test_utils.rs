//! test utilities for creating test users and resources.
//!
//! this module provides builder patterns for creating test instances
//! of studybuddy types without needing to specify all fields.

use chrono::Utc;

use crate::{Resource, ResourceId, ResourceStatus, ResourceType, Role, SubjectId, User, UserId};

/// builder for creating test [`User`] instances.
///
/// # example
/// ```
/// use studybuddy_types::{Role, test_utils::TestUserBuilder};
///
/// let student = TestUserBuilder::new("ada").build();
/// let faculty = TestUserBuilder::new("grace").with_role(Role::Faculty).build();
/// assert!(faculty.is_staff());
/// ```
#[derive(Debug, Clone)]
pub struct TestUserBuilder {
    id: u64,
    username: String,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    role: Role,
}

impl TestUserBuilder {
    /// create a new builder for a student with the given username.
    ///
    /// the id is left at 0 so the database assigns one.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: 0,
            username: username.into(),
            first_name: None,
            last_name: None,
            email: None,
            role: Role::Student,
        }
    }

    /// set an explicit id.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    /// set the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// shorthand for `.with_role(Role::Faculty)`.
    pub fn faculty(self) -> Self {
        self.with_role(Role::Faculty)
    }

    /// shorthand for `.with_role(Role::SuperAdmin)`.
    pub fn superadmin(self) -> Self {
        self.with_role(Role::SuperAdmin)
    }

    /// set first and last name.
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    /// set email. defaults to `{username}@example.edu`.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// build the [`User`].
    pub fn build(self) -> User {
        let now = Utc::now();
        let email = self
            .email
            .unwrap_or_else(|| format!("{}@example.edu", self.username));

        User {
            id: UserId(self.id),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: Some(email),
            role: self.role,
            username: self.username,
            created_at: now,
            updated_at: now,
        }
    }
}

/// build a resource owned by `uploaded_by` with the given status.
pub fn test_resource(
    subject_id: SubjectId,
    uploaded_by: UserId,
    status: ResourceStatus,
) -> Resource {
    Resource {
        id: ResourceId(0),
        subject_id,
        title: "lecture notes".to_string(),
        file: "resources/0000000000000000_notes.pdf".to_string(),
        resource_type: ResourceType::Note,
        description: None,
        status,
        uploaded_by: Some(uploaded_by),
        uploaded_at: Utc::now(),
    }
}
