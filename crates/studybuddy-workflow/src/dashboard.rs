//! staff dashboard: counts, user search and role listings.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use studybuddy_db::Database;
use studybuddy_types::{ApprovedUploader, Page, Role, User};

use crate::engine::Workflow;
use crate::error::Result;
use crate::policy;

/// headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub departments: u64,
    pub subjects: u64,
    pub resources: u64,
    pub pending: u64,
}

/// ordering of the user listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserSort {
    #[default]
    NameAsc,
    NameDesc,
    Newest,
    Oldest,
}

impl UserSort {
    /// parse a sort key. missing means name ascending; anything unrecognised
    /// means oldest first.
    pub fn parse(key: Option<&str>) -> Self {
        match key {
            None | Some("name_asc") => UserSort::NameAsc,
            Some("name_desc") => UserSort::NameDesc,
            Some("newest") => UserSort::Newest,
            Some(_) => UserSort::Oldest,
        }
    }

    fn compare(self, a: &User, b: &User) -> Ordering {
        match self {
            UserSort::NameAsc => name_key(a).cmp(&name_key(b)),
            UserSort::NameDesc => name_key(b).cmp(&name_key(a)),
            UserSort::Newest => b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)),
            UserSort::Oldest => a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)),
        }
    }
}

fn name_key(user: &User) -> (String, String, String) {
    (
        user.first_name.to_lowercase(),
        user.last_name.to_lowercase(),
        user.username.to_lowercase(),
    )
}

/// a user in the dashboard listing with their uploader approval, if any.
#[derive(Debug, Clone, Serialize)]
pub struct UserRow {
    pub user: User,
    pub uploader: Option<ApprovedUploader>,
}

/// an approval record with the student it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct UploaderRow {
    pub uploader: ApprovedUploader,
    pub student: User,
}

/// case-insensitive substring match over the searchable user fields.
pub fn matches_query(user: &User, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    [
        Some(user.username.as_str()),
        Some(user.first_name.as_str()),
        Some(user.last_name.as_str()),
        user.email.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&query))
}

impl<D: Database> Workflow<D> {
    pub async fn dashboard_stats(&self, caller: &User) -> Result<DashboardStats> {
        policy::require_staff(caller, "view the dashboard")?;
        let counts = self.db().catalog_counts().await?;
        Ok(DashboardStats {
            departments: counts.departments,
            subjects: counts.subjects,
            resources: counts.resources,
            pending: counts.pending,
        })
    }

    /// search every user except superadmins and the caller.
    pub async fn search_users(
        &self,
        caller: &User,
        query: &str,
        sort: UserSort,
        page: usize,
    ) -> Result<Page<UserRow>> {
        policy::require_staff(caller, "view the dashboard")?;

        let mut users: Vec<User> = self
            .db()
            .list_users()
            .await?
            .into_iter()
            .filter(|u| !u.is_superadmin() && u.id != caller.id)
            .filter(|u| matches_query(u, query))
            .collect();
        users.sort_by(|a, b| sort.compare(a, b));

        let mut approvals: HashMap<_, _> = self
            .db()
            .list_uploaders(false)
            .await?
            .into_iter()
            .map(|u| (u.student_id, u))
            .collect();

        debug!(user_id = %caller.id, matches = users.len(), "user search");
        Ok(Page::paginate(users, page).map(|user| UserRow {
            uploader: approvals.remove(&user.id),
            user,
        }))
    }

    /// students who could be made faculty.
    pub async fn promotion_candidates(
        &self,
        caller: &User,
        query: &str,
        page: usize,
    ) -> Result<Page<User>> {
        policy::require_staff(caller, "view the dashboard")?;

        let mut users: Vec<User> = self
            .db()
            .list_users_by_role(Role::Student)
            .await?
            .into_iter()
            .filter(|u| matches_query(u, query))
            .collect();
        users.sort_by(|a, b| UserSort::NameAsc.compare(a, b));

        Ok(Page::paginate(users, page))
    }

    /// every approval record, active or not, newest first.
    pub async fn approved_uploaders(&self, caller: &User) -> Result<Vec<UploaderRow>> {
        policy::require_staff(caller, "view the dashboard")?;

        let mut rows = Vec::new();
        for uploader in self.db().list_uploaders(false).await? {
            // approval records cascade with their student, so this only
            // misses rows deleted mid-listing
            if let Some(student) = self.db().get_user(uploader.student_id).await? {
                rows.push(UploaderRow { uploader, student });
            }
        }
        Ok(rows)
    }

    /// faculty members, not counting superadmins.
    pub async fn faculty_list(&self, caller: &User) -> Result<Vec<User>> {
        policy::require_staff(caller, "view the dashboard")?;
        let mut faculty = self.db().list_users_by_role(Role::Faculty).await?;
        faculty.sort_by(|a, b| UserSort::NameAsc.compare(a, b));
        Ok(faculty)
    }
}
