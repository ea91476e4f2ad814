//! departments, subjects, tutorials and the resource listings built on them.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use studybuddy_db::Database;
use studybuddy_types::{
    Department, DepartmentId, Resource, ResourceId, ResourceStatus, ResourceType, Subject,
    SubjectId, TutorialId, TutorialKind, TutorialSuggestion, User,
};

use crate::engine::Workflow;
use crate::error::{Result, WorkflowError};
use crate::policy;

/// a department and its subjects grouped by semester, ascending.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentDetail {
    pub department: Department,
    pub semesters: BTreeMap<i32, Vec<Subject>>,
}

/// everything shown on a subject page.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectDetail {
    pub subject: Subject,
    pub department: Department,
    /// approved student and faculty notes.
    pub notes: Vec<Resource>,
    /// approved previous year questions.
    pub pyqs: Vec<Resource>,
    /// approved faculty material.
    pub faculty_notes: Vec<Resource>,
    pub tutorials: Vec<TutorialSuggestion>,
    /// whether the caller holds an active uploader approval.
    pub is_approved_uploader: bool,
    /// resources on this page the caller bookmarked.
    pub bookmarked_ids: Vec<ResourceId>,
}

/// a tutorial suggestion as submitted.
#[derive(Debug, Clone)]
pub struct NewTutorial {
    pub subject_id: SubjectId,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    pub kind: TutorialKind,
}

impl<D: Database> Workflow<D> {
    /// all departments by name.
    pub async fn list_departments(&self) -> Result<Vec<Department>> {
        Ok(self.db().list_departments().await?)
    }

    pub async fn department_detail(&self, id: DepartmentId) -> Result<DepartmentDetail> {
        let department = self
            .db()
            .get_department(id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("department {id}")))?;

        let mut semesters: BTreeMap<i32, Vec<Subject>> = BTreeMap::new();
        for subject in self.db().list_subjects(id).await? {
            semesters.entry(subject.semester).or_default().push(subject);
        }

        Ok(DepartmentDetail {
            department,
            semesters,
        })
    }

    /// the subject page as seen by `caller`.
    pub async fn subject_detail(&self, caller: &User, id: SubjectId) -> Result<SubjectDetail> {
        let subject = self.require_subject(id).await?;
        let department = self
            .db()
            .get_department(subject.department_id)
            .await?
            .ok_or_else(|| {
                WorkflowError::NotFound(format!("department {}", subject.department_id))
            })?;

        let approved = self
            .db()
            .list_resources_for_subject(id, None, Some(ResourceStatus::Approved))
            .await?;
        let (mut notes, mut pyqs, mut faculty_notes) = (Vec::new(), Vec::new(), Vec::new());
        for resource in approved {
            match resource.resource_type {
                ResourceType::Note => notes.push(resource),
                ResourceType::Pyq => pyqs.push(resource),
                ResourceType::Faculty => faculty_notes.push(resource),
            }
        }

        let tutorials = self.db().list_tutorials(id).await?;
        let is_approved_uploader = self
            .db()
            .get_uploader(caller.id)
            .await?
            .is_some_and(|u| u.is_active);

        let mut bookmarked_ids = self.db().bookmarked_resource_ids(caller.id).await?;
        bookmarked_ids.retain(|rid| {
            notes
                .iter()
                .chain(&pyqs)
                .chain(&faculty_notes)
                .any(|r| r.id == *rid)
        });
        bookmarked_ids.sort();

        debug!(subject_id = %id, user_id = %caller.id, "subject page loaded");
        Ok(SubjectDetail {
            subject,
            department,
            notes,
            pyqs,
            faculty_notes,
            tutorials,
            is_approved_uploader,
            bookmarked_ids,
        })
    }

    /// uploads waiting for review, newest first.
    pub async fn list_pending(&self, caller: &User) -> Result<Vec<Resource>> {
        policy::require_staff(caller, "review uploads")?;
        Ok(self
            .db()
            .list_resources_by_status(ResourceStatus::Pending)
            .await?)
    }

    /// a subject's resources of one type.
    ///
    /// `status` defaults to approved. only staff may list other statuses.
    pub async fn list_by_subject_and_type(
        &self,
        caller: &User,
        subject: SubjectId,
        resource_type: ResourceType,
        status: Option<ResourceStatus>,
    ) -> Result<Vec<Resource>> {
        let status = status.unwrap_or(ResourceStatus::Approved);
        if status != ResourceStatus::Approved {
            policy::require_staff(caller, "list unapproved resources")?;
        }
        self.require_subject(subject).await?;

        Ok(self
            .db()
            .list_resources_for_subject(subject, Some(resource_type), Some(status))
            .await?)
    }

    /// everything the caller uploaded, in any status.
    pub async fn my_uploads(&self, caller: &User) -> Result<Vec<Resource>> {
        Ok(self.db().list_resources_by_uploader(caller.id).await?)
    }

    pub async fn create_department(
        &self,
        caller: &User,
        name: &str,
        description: Option<String>,
    ) -> Result<Department> {
        policy::require_superadmin(caller, "create departments")?;
        let name = policy::validate_catalog_name(name)?;

        let mut department = Department::new(name.clone());
        department.description = description.filter(|d| !d.trim().is_empty());

        let created = self
            .db()
            .create_department(&department)
            .await
            .map_err(|e| {
                duplicate_as_validation(e, format!("department {name:?} already exists"))
            })?;
        info!(department_id = %created.id, name = %created.name, "department created");
        Ok(created)
    }

    pub async fn create_subject(
        &self,
        caller: &User,
        department_id: DepartmentId,
        name: &str,
        semester: i32,
    ) -> Result<Subject> {
        policy::require_superadmin(caller, "create subjects")?;
        let name = policy::validate_catalog_name(name)?;
        let semester = policy::validate_semester(semester)?;

        if self.db().get_department(department_id).await?.is_none() {
            return Err(WorkflowError::NotFound(format!("department {department_id}")));
        }

        let created = self
            .db()
            .create_subject(&Subject::new(department_id, name.clone(), semester))
            .await
            .map_err(|e| {
                duplicate_as_validation(
                    e,
                    format!("subject {name:?} already exists in semester {semester}"),
                )
            })?;
        info!(subject_id = %created.id, department_id = %department_id, "subject created");
        Ok(created)
    }

    /// suggest an external tutorial for a subject.
    pub async fn add_tutorial(
        &self,
        caller: &User,
        new: NewTutorial,
    ) -> Result<TutorialSuggestion> {
        if !self.may_upload(caller).await? {
            warn!(user_id = %caller.id, "tutorial refused, user is not an approved uploader");
            return Err(WorkflowError::PermissionDenied(
                "you are not approved to add tutorials".to_string(),
            ));
        }

        let title = policy::validate_title(&new.title)?;
        let link = policy::validate_link(&new.link)?;
        self.require_subject(new.subject_id).await?;

        let tutorial = TutorialSuggestion {
            id: TutorialId(0),
            subject_id: new.subject_id,
            title,
            description: new.description.filter(|d| !d.trim().is_empty()),
            link,
            kind: new.kind,
            added_by: Some(caller.id),
            created_at: Utc::now(),
        };

        let created = self.db().create_tutorial(&tutorial).await?;
        info!(tutorial_id = %created.id, user_id = %caller.id, "tutorial added");
        Ok(created)
    }

    /// delete a tutorial. its author and staff may do this.
    pub async fn delete_tutorial(&self, caller: &User, id: TutorialId) -> Result<()> {
        let tutorial = self
            .db()
            .get_tutorial(id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("tutorial {id}")))?;

        if !policy::can_remove(caller, tutorial.added_by) {
            warn!(tutorial_id = %id, user_id = %caller.id, "delete refused");
            return Err(WorkflowError::PermissionDenied(
                "only the author or faculty can delete this tutorial".to_string(),
            ));
        }

        self.db().delete_tutorial(id).await?;
        warn!(tutorial_id = %id, user_id = %caller.id, "tutorial deleted");
        Ok(())
    }
}

fn duplicate_as_validation(err: studybuddy_db::Error, message: String) -> WorkflowError {
    match err {
        studybuddy_db::Error::AlreadyExists(_) => WorkflowError::Validation(message),
        other => other.into(),
    }
}
