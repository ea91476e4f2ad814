//! account creation and api keys.

use tracing::{info, warn};

use studybuddy_db::Database;
use studybuddy_types::{ApiKey, ApiKeySecret, Email, Role, User, UserId, Username};

use crate::engine::Workflow;
use crate::error::{Result, WorkflowError};
use crate::policy;

/// details for a new account.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub username: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

impl<D: Database> Workflow<D> {
    /// self-service sign up. always creates a student.
    ///
    /// an email is required and must not be used by another account, ignoring
    /// case.
    pub async fn register_student(&self, registration: Registration) -> Result<User> {
        let email = registration
            .email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| WorkflowError::Validation("email is required".to_string()))?;
        let email =
            Email::new(email).map_err(|e| WorkflowError::Validation(format!("email: {e}")))?;

        if self.db().get_user_by_email(&email.lowercase()).await?.is_some() {
            return Err(WorkflowError::Validation(
                "an account with that email already exists".to_string(),
            ));
        }

        let user = self
            .new_account(&registration, Some(email), Role::Student)
            .await?;
        info!(user_id = %user.id, username = %user.username, "student registered");
        Ok(user)
    }

    /// create a faculty account on behalf of a superadmin.
    pub async fn create_faculty(&self, caller: &User, registration: Registration) -> Result<User> {
        policy::require_superadmin(caller, "create faculty accounts")?;

        let email = registration
            .email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .map(Email::new)
            .transpose()
            .map_err(|e| WorkflowError::Validation(format!("email: {e}")))?;

        let user = self
            .new_account(&registration, email, Role::Faculty)
            .await?;
        info!(
            user_id = %user.id,
            username = %user.username,
            by = %caller.id,
            "faculty account created"
        );
        Ok(user)
    }

    async fn new_account(
        &self,
        registration: &Registration,
        email: Option<Email>,
        role: Role,
    ) -> Result<User> {
        let username = Username::new(registration.username.trim())
            .map_err(|e| WorkflowError::Validation(format!("username: {e}")))?;
        let first_name = policy::validate_person_name("first name", &registration.first_name)?;
        let last_name = policy::validate_person_name("last name", &registration.last_name)?;

        if self
            .db()
            .get_user_by_username(username.as_str())
            .await?
            .is_some()
        {
            return Err(taken(&username));
        }

        let mut user = User::with_role(UserId(0), username.as_str().to_string(), role);
        user.first_name = first_name;
        user.last_name = last_name;
        user.email = email.map(Email::into_inner);

        match self.db().create_user(&user).await {
            Ok(created) => Ok(created),
            Err(studybuddy_db::Error::AlreadyExists(_)) => Err(taken(&username)),
            Err(e) => Err(e.into()),
        }
    }

    /// make sure a superadmin named `username` exists.
    ///
    /// creates the account, or elevates an existing one. running it again
    /// changes nothing.
    pub async fn ensure_superadmin(&self, username: &str, email: Option<&str>) -> Result<User> {
        if let Some(mut existing) = self.db().get_user_by_username(username.trim()).await? {
            if existing.role == Role::SuperAdmin {
                return Ok(existing);
            }
            existing.role = Role::SuperAdmin;
            let updated = self.db().update_user(&existing).await?;
            warn!(user_id = %updated.id, "existing user elevated to superadmin");
            return Ok(updated);
        }

        let registration = Registration {
            username: username.to_string(),
            email: email.map(str::to_string),
            ..Default::default()
        };
        let email = email
            .filter(|e| !e.trim().is_empty())
            .map(Email::new)
            .transpose()
            .map_err(|e| WorkflowError::Validation(format!("email: {e}")))?;

        let user = self
            .new_account(&registration, email, Role::SuperAdmin)
            .await?;
        info!(user_id = %user.id, username = %user.username, "superadmin created");
        Ok(user)
    }

    /// mint an api key for a user. the secret is only available here.
    pub async fn issue_api_key(
        &self,
        user_id: UserId,
        name: &str,
        expiration_days: u32,
    ) -> Result<(ApiKeySecret, ApiKey)> {
        let user = self.require_user(user_id).await?;

        let secret = ApiKeySecret::generate();
        let key = ApiKey::from_secret(&secret, name.to_string(), user.id)
            .expires_in_days(expiration_days);
        let stored = self.db().create_api_key(&key).await?;

        info!(user_id = %user.id, key_id = stored.id, "api key issued");
        Ok((secret, stored))
    }
}

fn taken(username: &Username) -> WorkflowError {
    WorkflowError::Validation(format!("username {:?} is already taken", username.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use studybuddy_db::StudybuddyDb;
    use studybuddy_types::test_utils::TestUserBuilder;

    fn registration(username: &str, email: &str) -> Registration {
        Registration {
            username: username.to_string(),
            email: Some(email.to_string()),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }
    }

    async fn workflow() -> Workflow<StudybuddyDb> {
        Workflow::new(StudybuddyDb::new_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_register_student() {
        let wf = workflow().await;
        let user = wf
            .register_student(registration("ada", "Ada@Example.edu"))
            .await
            .unwrap();
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.full_name(), "Ada Lovelace");

        let err = wf
            .register_student(registration("ada", "other@example.edu"))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));

        // emails are compared ignoring case
        let err = wf
            .register_student(registration("ada2", "ada@example.EDU"))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_validation() {
        let wf = workflow().await;

        let mut missing_email = registration("bob", "");
        missing_email.email = None;
        assert!(wf.register_student(missing_email).await.is_err());

        assert!(
            wf.register_student(registration("bob", "not-an-email"))
                .await
                .is_err()
        );
        assert!(
            wf.register_student(registration("bad name", "bob@example.edu"))
                .await
                .is_err()
        );

        let mut long_name = registration("bob", "bob@example.edu");
        long_name.first_name = "x".repeat(31);
        let err = wf.register_student(long_name).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_faculty_requires_superadmin() {
        let wf = workflow().await;
        let admin = wf.ensure_superadmin("root", None).await.unwrap();
        let student = wf
            .register_student(registration("stu", "stu@example.edu"))
            .await
            .unwrap();

        let err = wf
            .create_faculty(&student, registration("prof", "prof@example.edu"))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::PermissionDenied(_)));

        let prof = wf
            .create_faculty(&admin, registration("prof", "prof@example.edu"))
            .await
            .unwrap();
        assert_eq!(prof.role, Role::Faculty);
    }

    #[tokio::test]
    async fn test_ensure_superadmin_is_idempotent() {
        let wf = workflow().await;
        let first = wf.ensure_superadmin("root", Some("root@example.edu")).await.unwrap();
        let second = wf.ensure_superadmin("root", None).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.role, Role::SuperAdmin);

        let existing = wf
            .db()
            .create_user(&TestUserBuilder::new("dean").faculty().build())
            .await
            .unwrap();
        let elevated = wf.ensure_superadmin("dean", None).await.unwrap();
        assert_eq!(elevated.id, existing.id);
        assert_eq!(elevated.role, Role::SuperAdmin);
    }

    #[tokio::test]
    async fn test_issue_api_key() {
        let wf = workflow().await;
        let user = wf
            .register_student(registration("ada", "ada@example.edu"))
            .await
            .unwrap();

        let (secret, key) = wf.issue_api_key(user.id, "laptop", 30).await.unwrap();
        assert!(key.verify(&secret));
        assert!(key.expiration.is_some());

        let stored = wf
            .db()
            .get_api_key_by_selector(secret.selector())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.user_id, user.id);

        let err = wf.issue_api_key(UserId(999), "ghost", 0).await.unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound(_)));
    }
}
