//! database layer for studybuddy.
//!
//! this crate provides persistent storage for:
//! - Users and their API Keys
//! - Departments and Subjects
//! - Resources and Tutorial Suggestions
//! - Approved Uploader records
//! - Bookmarks
//!
//! uniqueness rules (usernames, department names, one approval per student,
//! one bookmark per user and resource) are enforced by unique indexes and
//! surface as [`Error::AlreadyExists`].

#![warn(missing_docs)]

mod entity;
mod error;
mod migration;

pub use error::Error;

use std::future::Future;

use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database as SeaOrmDatabase, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use sea_orm_migration::MigratorTrait;

use studybuddy_types::{
    ApiKey, ApprovedUploader, Bookmark, Config, Department, DepartmentId, Resource, ResourceId,
    ResourceStatus, ResourceType, Role, Subject, SubjectId, TutorialId, TutorialSuggestion, User,
    UserId,
};

/// result type for database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// row counts shown on the staff dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    /// number of departments.
    pub departments: u64,
    /// number of subjects.
    pub subjects: u64,
    /// number of resources in any status.
    pub resources: u64,
    /// number of resources waiting for review.
    pub pending: u64,
}

/// database trait for studybuddy storage operations.
///
/// this trait abstracts over different database backends (sqlite, postgresql).
/// users, resources, tutorials and bookmarks are deleted physically so the
/// foreign key rules (cascade, set null) apply. api keys are soft-deleted.
pub trait Database: Send + Sync {
    // ─── Health Check ─────────────────────────────────────────────────────────

    /// ping the database to verify connectivity.
    ///
    /// returns `ok(())` if the database is reachable, `err` otherwise.
    /// used for health checks with a recommended timeout of 1 second.
    fn ping(&self) -> impl Future<Output = Result<()>> + Send;

    // ─── User Operations ─────────────────────────────────────────────────────

    /// create a new user. returns the created user with its assigned id.
    fn create_user(&self, user: &User) -> impl Future<Output = Result<User>> + Send;

    /// get a user by id.
    fn get_user(&self, id: UserId) -> impl Future<Output = Result<Option<User>>> + Send;

    /// get a user by exact username.
    fn get_user_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>>> + Send;

    /// get a user by email, compared case-insensitively.
    fn get_user_by_email(&self, email: &str) -> impl Future<Output = Result<Option<User>>> + Send;

    /// list all users, oldest first.
    fn list_users(&self) -> impl Future<Output = Result<Vec<User>>> + Send;

    /// list users with the given role, oldest first.
    fn list_users_by_role(&self, role: Role) -> impl Future<Output = Result<Vec<User>>> + Send;

    /// update an existing user. also bumps `updated_at`.
    fn update_user(&self, user: &User) -> impl Future<Output = Result<User>> + Send;

    /// delete a user. their api keys, bookmarks and approval record go with
    /// them; their resources and tutorials lose the owner reference.
    fn delete_user(&self, id: UserId) -> impl Future<Output = Result<()>> + Send;

    // ─── ApiKey Operations ───────────────────────────────────────────────────

    /// store a new api key. returns the key with its assigned id.
    fn create_api_key(&self, key: &ApiKey) -> impl Future<Output = Result<ApiKey>> + Send;

    /// get a live api key by its selector.
    fn get_api_key_by_selector(
        &self,
        selector: &str,
    ) -> impl Future<Output = Result<Option<ApiKey>>> + Send;

    /// get a live api key by id.
    fn get_api_key_by_id(&self, id: u64) -> impl Future<Output = Result<Option<ApiKey>>> + Send;

    /// list live api keys belonging to a user.
    fn list_api_keys(&self, user_id: UserId) -> impl Future<Output = Result<Vec<ApiKey>>> + Send;

    /// soft-delete an api key.
    fn delete_api_key(&self, id: u64) -> impl Future<Output = Result<()>> + Send;

    /// record that an api key was just used.
    fn touch_api_key(&self, id: u64) -> impl Future<Output = Result<()>> + Send;

    // ─── Catalog Operations ──────────────────────────────────────────────────

    /// create a department. duplicate names fail with `AlreadyExists`.
    fn create_department(
        &self,
        dept: &Department,
    ) -> impl Future<Output = Result<Department>> + Send;

    /// get a department by id.
    fn get_department(
        &self,
        id: DepartmentId,
    ) -> impl Future<Output = Result<Option<Department>>> + Send;

    /// list all departments ordered by name.
    fn list_departments(&self) -> impl Future<Output = Result<Vec<Department>>> + Send;

    /// create a subject. duplicate (department, name, semester) fails with
    /// `AlreadyExists`.
    fn create_subject(&self, subject: &Subject) -> impl Future<Output = Result<Subject>> + Send;

    /// get a subject by id.
    fn get_subject(&self, id: SubjectId) -> impl Future<Output = Result<Option<Subject>>> + Send;

    /// list a department's subjects ordered by semester, then name.
    fn list_subjects(
        &self,
        department: DepartmentId,
    ) -> impl Future<Output = Result<Vec<Subject>>> + Send;

    /// row counts for the dashboard.
    fn catalog_counts(&self) -> impl Future<Output = Result<CatalogCounts>> + Send;

    // ─── Resource Operations ─────────────────────────────────────────────────

    /// create a resource. returns it with its assigned id.
    fn create_resource(&self, resource: &Resource) -> impl Future<Output = Result<Resource>> + Send;

    /// get a resource by id.
    fn get_resource(&self, id: ResourceId)
    -> impl Future<Output = Result<Option<Resource>>> + Send;

    /// overwrite an existing resource.
    fn update_resource(&self, resource: &Resource) -> impl Future<Output = Result<Resource>> + Send;

    /// delete a resource and its bookmarks.
    fn delete_resource(&self, id: ResourceId) -> impl Future<Output = Result<()>> + Send;

    /// list a subject's resources, newest first, optionally narrowed by type
    /// and status.
    fn list_resources_for_subject(
        &self,
        subject: SubjectId,
        resource_type: Option<ResourceType>,
        status: Option<ResourceStatus>,
    ) -> impl Future<Output = Result<Vec<Resource>>> + Send;

    /// list resources in a given status across all subjects, newest first.
    fn list_resources_by_status(
        &self,
        status: ResourceStatus,
    ) -> impl Future<Output = Result<Vec<Resource>>> + Send;

    /// list resources uploaded by a user, newest first.
    fn list_resources_by_uploader(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Resource>>> + Send;

    // ─── ApprovedUploader Operations ─────────────────────────────────────────

    /// get the approval record for a student, active or not.
    fn get_uploader(
        &self,
        student: UserId,
    ) -> impl Future<Output = Result<Option<ApprovedUploader>>> + Send;

    /// create an approval record. a second record for the same student fails
    /// with `AlreadyExists`.
    fn create_uploader(
        &self,
        record: &ApprovedUploader,
    ) -> impl Future<Output = Result<ApprovedUploader>> + Send;

    /// overwrite an existing approval record.
    fn update_uploader(
        &self,
        record: &ApprovedUploader,
    ) -> impl Future<Output = Result<ApprovedUploader>> + Send;

    /// list approval records, newest first.
    fn list_uploaders(
        &self,
        active_only: bool,
    ) -> impl Future<Output = Result<Vec<ApprovedUploader>>> + Send;

    // ─── Tutorial Operations ─────────────────────────────────────────────────

    /// create a tutorial suggestion.
    fn create_tutorial(
        &self,
        tutorial: &TutorialSuggestion,
    ) -> impl Future<Output = Result<TutorialSuggestion>> + Send;

    /// get a tutorial suggestion by id.
    fn get_tutorial(
        &self,
        id: TutorialId,
    ) -> impl Future<Output = Result<Option<TutorialSuggestion>>> + Send;

    /// list a subject's tutorials, newest first.
    fn list_tutorials(
        &self,
        subject: SubjectId,
    ) -> impl Future<Output = Result<Vec<TutorialSuggestion>>> + Send;

    /// delete a tutorial suggestion.
    fn delete_tutorial(&self, id: TutorialId) -> impl Future<Output = Result<()>> + Send;

    // ─── Bookmark Operations ─────────────────────────────────────────────────

    /// get the bookmark for a (user, resource) pair.
    fn get_bookmark(
        &self,
        user_id: UserId,
        resource_id: ResourceId,
    ) -> impl Future<Output = Result<Option<Bookmark>>> + Send;

    /// create a bookmark. a duplicate fails with `AlreadyExists`.
    fn create_bookmark(&self, bookmark: &Bookmark) -> impl Future<Output = Result<Bookmark>> + Send;

    /// delete a bookmark by id.
    fn delete_bookmark(&self, id: u64) -> impl Future<Output = Result<()>> + Send;

    /// the resources a user bookmarked, most recently bookmarked first.
    fn list_bookmarked_resources(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Resource>>> + Send;

    /// ids of every resource a user bookmarked.
    fn bookmarked_resource_ids(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<ResourceId>>> + Send;
}

/// the main database implementation using sea-orm.
#[derive(Clone)]
pub struct StudybuddyDb {
    conn: DatabaseConnection,
}

impl StudybuddyDb {
    /// create a new database connection from config.
    pub async fn new(config: &Config) -> Result<Self> {
        let url = Self::build_connection_url(&config.database)?;
        let conn: DatabaseConnection = SeaOrmDatabase::connect(&url)
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let db = Self { conn };

        // enable WAL mode for sqlite if configured
        if config.database.db_type == "sqlite" && config.database.sqlite.write_ahead_log {
            db.enable_wal_mode().await?;
        }

        db.migrate().await?;
        Ok(db)
    }

    /// enable write-ahead logging mode for sqlite.
    ///
    /// must be called before any writes.
    async fn enable_wal_mode(&self) -> Result<()> {
        use sea_orm::ConnectionTrait;
        self.conn
            .execute_unprepared("PRAGMA journal_mode=WAL")
            .await
            .map_err(|e| Error::Connection(format!("failed to enable WAL mode: {}", e)))?;
        tracing::info!("sqlite WAL mode enabled");
        Ok(())
    }

    /// get the current sqlite journal mode.
    #[cfg(test)]
    async fn get_journal_mode(&self) -> Result<String> {
        use sea_orm::{ConnectionTrait, FromQueryResult};

        #[derive(FromQueryResult)]
        struct JournalMode {
            journal_mode: String,
        }

        let row = self
            .conn
            .query_one(sea_orm::Statement::from_string(
                sea_orm::DatabaseBackend::Sqlite,
                "PRAGMA journal_mode".to_string(),
            ))
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        match row {
            Some(row) => Ok(JournalMode::from_query_result(&row, "")?.journal_mode),
            None => Ok(String::new()),
        }
    }

    /// build a sea-orm compatible connection url from config.
    fn build_connection_url(config: &studybuddy_types::DatabaseConfig) -> Result<String> {
        match config.db_type.as_str() {
            "sqlite" => {
                let path = if config.connection_string.starts_with("sqlite:") {
                    config.connection_string.clone()
                } else {
                    format!("sqlite:{}", config.connection_string)
                };
                // add ?mode=rwc to create file if it doesn't exist
                if path.contains('?') {
                    Ok(path)
                } else {
                    Ok(format!("{}?mode=rwc", path))
                }
            }
            "postgres" | "postgresql" => Ok(config.connection_string.clone()),
            other => Err(Error::InvalidData(format!(
                "unsupported database type: {}",
                other
            ))),
        }
    }

    /// create an in-memory sqlite database for testing.
    pub async fn new_in_memory() -> Result<Self> {
        let conn: DatabaseConnection = SeaOrmDatabase::connect("sqlite::memory:")
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let db = Self { conn };
        db.migrate().await?;
        Ok(db)
    }

    /// run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        migration::Migrator::up(&self.conn, None)
            .await
            .map_err(|e| Error::Migration(e.to_string()))?;
        Ok(())
    }
}

impl Database for StudybuddyDb {
    // health check

    async fn ping(&self) -> Result<()> {
        use sea_orm::ConnectionTrait;
        self.conn
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;
        Ok(())
    }

    // user operations

    async fn create_user(&self, user: &User) -> Result<User> {
        let model: entity::user::ActiveModel = user.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let result = entity::user::Entity::find_by_id(id.as_i64())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let result = entity::user::Entity::find()
            .filter(entity::user::Column::Username.eq(username))
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = entity::user::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(entity::user::Column::Email)))
                    .eq(email.to_lowercase()),
            )
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let results = entity::user::Entity::find()
            .order_by_asc(entity::user::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>> {
        let results = entity::user::Entity::find()
            .filter(entity::user::Column::Role.eq(role.as_str()))
            .order_by_asc(entity::user::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        let mut user = user.clone();
        user.updated_at = Utc::now();
        let model: entity::user::ActiveModel = (&user).into();
        let result = model.update(&self.conn).await?;
        Ok(result.into())
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        entity::user::Entity::delete_by_id(id.as_i64())
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    // apikey operations

    async fn create_api_key(&self, key: &ApiKey) -> Result<ApiKey> {
        let model: entity::api_key::ActiveModel = key.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn get_api_key_by_selector(&self, selector: &str) -> Result<Option<ApiKey>> {
        let result = entity::api_key::Entity::find()
            .filter(entity::api_key::Column::Selector.eq(selector))
            .filter(entity::api_key::Column::DeletedAt.is_null())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn get_api_key_by_id(&self, id: u64) -> Result<Option<ApiKey>> {
        let result = entity::api_key::Entity::find_by_id(id as i64)
            .filter(entity::api_key::Column::DeletedAt.is_null())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_api_keys(&self, user_id: UserId) -> Result<Vec<ApiKey>> {
        let results = entity::api_key::Entity::find()
            .filter(entity::api_key::Column::UserId.eq(user_id.as_i64()))
            .filter(entity::api_key::Column::DeletedAt.is_null())
            .order_by_asc(entity::api_key::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn delete_api_key(&self, id: u64) -> Result<()> {
        entity::api_key::Entity::update_many()
            .col_expr(entity::api_key::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(entity::api_key::Column::Id.eq(id as i64))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    async fn touch_api_key(&self, id: u64) -> Result<()> {
        entity::api_key::Entity::update_many()
            .col_expr(entity::api_key::Column::LastUsedAt, Expr::value(Utc::now()))
            .filter(entity::api_key::Column::Id.eq(id as i64))
            .filter(entity::api_key::Column::DeletedAt.is_null())
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    // catalog operations

    async fn create_department(&self, dept: &Department) -> Result<Department> {
        let model: entity::department::ActiveModel = dept.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn get_department(&self, id: DepartmentId) -> Result<Option<Department>> {
        let result = entity::department::Entity::find_by_id(id.as_i64())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_departments(&self) -> Result<Vec<Department>> {
        let results = entity::department::Entity::find()
            .order_by_asc(entity::department::Column::Name)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn create_subject(&self, subject: &Subject) -> Result<Subject> {
        let model: entity::subject::ActiveModel = subject.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn get_subject(&self, id: SubjectId) -> Result<Option<Subject>> {
        let result = entity::subject::Entity::find_by_id(id.as_i64())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_subjects(&self, department: DepartmentId) -> Result<Vec<Subject>> {
        let results = entity::subject::Entity::find()
            .filter(entity::subject::Column::DepartmentId.eq(department.as_i64()))
            .order_by_asc(entity::subject::Column::Semester)
            .order_by_asc(entity::subject::Column::Name)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn catalog_counts(&self) -> Result<CatalogCounts> {
        let departments = entity::department::Entity::find()
            .count(&self.conn)
            .await?;
        let subjects = entity::subject::Entity::find().count(&self.conn).await?;
        let resources = entity::resource::Entity::find().count(&self.conn).await?;
        let pending = entity::resource::Entity::find()
            .filter(entity::resource::Column::Status.eq(ResourceStatus::Pending.as_str()))
            .count(&self.conn)
            .await?;

        Ok(CatalogCounts {
            departments,
            subjects,
            resources,
            pending,
        })
    }

    // resource operations

    async fn create_resource(&self, resource: &Resource) -> Result<Resource> {
        let model: entity::resource::ActiveModel = resource.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn get_resource(&self, id: ResourceId) -> Result<Option<Resource>> {
        let result = entity::resource::Entity::find_by_id(id.as_i64())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn update_resource(&self, resource: &Resource) -> Result<Resource> {
        let model: entity::resource::ActiveModel = resource.into();
        let result = model.update(&self.conn).await?;
        Ok(result.into())
    }

    async fn delete_resource(&self, id: ResourceId) -> Result<()> {
        entity::resource::Entity::delete_by_id(id.as_i64())
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    async fn list_resources_for_subject(
        &self,
        subject: SubjectId,
        resource_type: Option<ResourceType>,
        status: Option<ResourceStatus>,
    ) -> Result<Vec<Resource>> {
        let mut query = entity::resource::Entity::find()
            .filter(entity::resource::Column::SubjectId.eq(subject.as_i64()));

        if let Some(resource_type) = resource_type {
            query = query.filter(entity::resource::Column::ResourceType.eq(resource_type.as_str()));
        }
        if let Some(status) = status {
            query = query.filter(entity::resource::Column::Status.eq(status.as_str()));
        }

        let results = query
            .order_by_desc(entity::resource::Column::UploadedAt)
            .order_by_desc(entity::resource::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn list_resources_by_status(&self, status: ResourceStatus) -> Result<Vec<Resource>> {
        let results = entity::resource::Entity::find()
            .filter(entity::resource::Column::Status.eq(status.as_str()))
            .order_by_desc(entity::resource::Column::UploadedAt)
            .order_by_desc(entity::resource::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn list_resources_by_uploader(&self, user_id: UserId) -> Result<Vec<Resource>> {
        let results = entity::resource::Entity::find()
            .filter(entity::resource::Column::UploadedBy.eq(user_id.as_i64()))
            .order_by_desc(entity::resource::Column::UploadedAt)
            .order_by_desc(entity::resource::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    // approved uploader operations

    async fn get_uploader(&self, student: UserId) -> Result<Option<ApprovedUploader>> {
        let result = entity::approved_uploader::Entity::find()
            .filter(entity::approved_uploader::Column::StudentId.eq(student.as_i64()))
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn create_uploader(&self, record: &ApprovedUploader) -> Result<ApprovedUploader> {
        let model: entity::approved_uploader::ActiveModel = record.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn update_uploader(&self, record: &ApprovedUploader) -> Result<ApprovedUploader> {
        let model: entity::approved_uploader::ActiveModel = record.into();
        let result = model.update(&self.conn).await?;
        Ok(result.into())
    }

    async fn list_uploaders(&self, active_only: bool) -> Result<Vec<ApprovedUploader>> {
        let mut query = entity::approved_uploader::Entity::find();
        if active_only {
            query = query.filter(entity::approved_uploader::Column::IsActive.eq(true));
        }

        let results = query
            .order_by_desc(entity::approved_uploader::Column::CreatedAt)
            .order_by_desc(entity::approved_uploader::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    // tutorial operations

    async fn create_tutorial(&self, tutorial: &TutorialSuggestion) -> Result<TutorialSuggestion> {
        let model: entity::tutorial::ActiveModel = tutorial.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn get_tutorial(&self, id: TutorialId) -> Result<Option<TutorialSuggestion>> {
        let result = entity::tutorial::Entity::find_by_id(id.as_i64())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_tutorials(&self, subject: SubjectId) -> Result<Vec<TutorialSuggestion>> {
        let results = entity::tutorial::Entity::find()
            .filter(entity::tutorial::Column::SubjectId.eq(subject.as_i64()))
            .order_by_desc(entity::tutorial::Column::CreatedAt)
            .order_by_desc(entity::tutorial::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn delete_tutorial(&self, id: TutorialId) -> Result<()> {
        entity::tutorial::Entity::delete_by_id(id.as_i64())
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    // bookmark operations

    async fn get_bookmark(
        &self,
        user_id: UserId,
        resource_id: ResourceId,
    ) -> Result<Option<Bookmark>> {
        let result = entity::bookmark::Entity::find()
            .filter(entity::bookmark::Column::UserId.eq(user_id.as_i64()))
            .filter(entity::bookmark::Column::ResourceId.eq(resource_id.as_i64()))
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn create_bookmark(&self, bookmark: &Bookmark) -> Result<Bookmark> {
        let model: entity::bookmark::ActiveModel = bookmark.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn delete_bookmark(&self, id: u64) -> Result<()> {
        entity::bookmark::Entity::delete_by_id(id as i64)
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    async fn list_bookmarked_resources(&self, user_id: UserId) -> Result<Vec<Resource>> {
        let rows = entity::bookmark::Entity::find()
            .filter(entity::bookmark::Column::UserId.eq(user_id.as_i64()))
            .order_by_desc(entity::bookmark::Column::CreatedAt)
            .order_by_desc(entity::bookmark::Column::Id)
            .find_also_related(entity::resource::Entity)
            .all(&self.conn)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(_, resource)| resource)
            .map(Into::into)
            .collect())
    }

    async fn bookmarked_resource_ids(&self, user_id: UserId) -> Result<Vec<ResourceId>> {
        let results = entity::bookmark::Entity::find()
            .filter(entity::bookmark::Column::UserId.eq(user_id.as_i64()))
            .all(&self.conn)
            .await?;
        Ok(results
            .into_iter()
            .map(|b| ResourceId(b.resource_id as u64))
            .collect())
    }
}
