//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod approvals;
mod assignments;
mod internships;
mod registry;
mod submissions;
mod tasks;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{PortalError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, &config.database).await?
        } else {
            Self::connect_generic(&db_url, &config.database).await?
        };

        Self::migrate(&db).await?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 运行迁移
    async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .map_err(|e| PortalError::database_operation(format!("数据库迁移失败: {e}")))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PortalError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PortalError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 内存 SQLite，仅用于测试
    ///
    /// 单连接且不回收，否则每个新连接都会得到一个空库。
    #[cfg(test)]
    pub(crate) async fn connect_in_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| PortalError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("SQLite 连接失败: {e}")))?;

        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);
        Self::migrate(&db).await?;
        Ok(Self { db })
    }

    /// 文件 SQLite（WAL、多连接），用于并发测试
    #[cfg(test)]
    pub(crate) async fn connect_file(path: &std::path::Path, pool_size: u32) -> Result<Self> {
        let config = DatabaseConfig {
            url: path.display().to_string(),
            pool_size,
            timeout: 10,
        };
        let db_url = Self::build_database_url(&config.url)?;
        let db = Self::connect_sqlite(&db_url, &config).await?;
        Self::migrate(&db).await?;
        Ok(Self { db })
    }
}

// Storage trait 实现
use crate::models::{
    actors::entities::Actor,
    internships::{
        entities::{ApprovalAudit, Internship},
        requests::{CreateInternshipRequest, InternshipListQuery},
        responses::InternshipListResponse,
    },
    registry::{
        entities::{Department, Faculty, Student},
        requests::{CreateDepartmentRequest, CreateFacultyRequest, CreateStudentRequest},
    },
    submissions::entities::Submission,
    tasks::{
        entities::{Task, TaskOrigin},
        requests::CreateTaskRequest,
        responses::CreateTaskResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 基础档案模块
    async fn create_department(&self, req: CreateDepartmentRequest) -> Result<Department> {
        self.create_department_impl(req).await
    }

    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>> {
        self.get_department_by_id_impl(id).await
    }

    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(req).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn list_students_by_department(&self, department_id: i64) -> Result<Vec<Student>> {
        self.list_students_by_department_impl(department_id).await
    }

    async fn set_student_internship_completion(
        &self,
        id: i64,
        did_internship: bool,
    ) -> Result<Option<Student>> {
        self.set_student_internship_completion_impl(id, did_internship)
            .await
    }

    async fn create_faculty(&self, req: CreateFacultyRequest) -> Result<Faculty> {
        self.create_faculty_impl(req).await
    }

    async fn get_faculty_by_id(&self, id: i64) -> Result<Option<Faculty>> {
        self.get_faculty_by_id_impl(id).await
    }

    // 实习模块
    async fn create_internship(
        &self,
        created_by: i64,
        req: CreateInternshipRequest,
    ) -> Result<Internship> {
        self.create_internship_impl(created_by, req).await
    }

    async fn get_internship_by_id(&self, id: i64) -> Result<Option<Internship>> {
        self.get_internship_by_id_impl(id).await
    }

    async fn list_internships_with_pagination(
        &self,
        query: InternshipListQuery,
    ) -> Result<InternshipListResponse> {
        self.list_internships_with_pagination_impl(query).await
    }

    // 分配模块
    async fn assign_student(&self, internship_id: i64, student_id: i64) -> Result<bool> {
        self.assign_student_impl(internship_id, student_id).await
    }

    async fn assign_faculty(&self, internship_id: i64, faculty_id: i64) -> Result<bool> {
        self.assign_faculty_impl(internship_id, faculty_id).await
    }

    async fn unassign_student(&self, internship_id: i64, student_id: i64) -> Result<Option<i64>> {
        self.unassign_student_impl(internship_id, student_id).await
    }

    async fn unassign_faculty(&self, internship_id: i64, faculty_id: i64) -> Result<bool> {
        self.unassign_faculty_impl(internship_id, faculty_id).await
    }

    async fn list_assigned_students(&self, internship_id: i64) -> Result<Vec<i64>> {
        self.list_assigned_students_impl(internship_id).await
    }

    async fn list_assigned_faculty(&self, internship_id: i64) -> Result<Vec<i64>> {
        self.list_assigned_faculty_impl(internship_id).await
    }

    // 审批模块
    async fn toggle_approval(
        &self,
        internship_id: i64,
        actor: &Actor,
    ) -> Result<Option<Internship>> {
        self.toggle_approval_impl(internship_id, actor).await
    }

    async fn list_approval_history(&self, internship_id: i64) -> Result<Vec<ApprovalAudit>> {
        self.list_approval_history_impl(internship_id).await
    }

    // 任务模块
    async fn create_task(
        &self,
        origin: TaskOrigin,
        issued_by: i64,
        req: CreateTaskRequest,
    ) -> Result<CreateTaskResponse> {
        self.create_task_impl(origin, issued_by, req).await
    }

    async fn get_task_by_id(&self, id: i64) -> Result<Option<Task>> {
        self.get_task_by_id_impl(id).await
    }

    async fn list_tasks(&self, internship_id: i64, origin: TaskOrigin) -> Result<Vec<Task>> {
        self.list_tasks_impl(internship_id, origin).await
    }

    async fn list_tasks_for_student(
        &self,
        internship_id: i64,
        student_id: i64,
    ) -> Result<Vec<Task>> {
        self.list_tasks_for_student_impl(internship_id, student_id)
            .await
    }

    // 提交模块
    async fn upsert_submission(
        &self,
        task_id: i64,
        student_id: i64,
        student_name: &str,
        file_ref: &str,
    ) -> Result<Submission> {
        self.upsert_submission_impl(task_id, student_id, student_name, file_ref)
            .await
    }

    async fn grade_submission(
        &self,
        id: i64,
        grade: f64,
        graded_by: i64,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(id, grade, graded_by).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn list_task_submissions(&self, task_id: i64) -> Result<Vec<Submission>> {
        self.list_task_submissions_impl(task_id).await
    }

    async fn list_student_submissions(
        &self,
        student_id: i64,
        task_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        self.list_student_submissions_impl(student_id, task_ids)
            .await
    }
}

/// 测试数据构造
#[cfg(test)]
pub(crate) mod fixtures {
    use super::SeaOrmStorage;
    use crate::models::internships::{entities::Internship, requests::CreateInternshipRequest};
    use crate::models::registry::{
        entities::{Department, Faculty, Student},
        requests::{CreateDepartmentRequest, CreateFacultyRequest, CreateStudentRequest},
    };
    use crate::storage::Storage;
    use chrono::NaiveDate;

    pub async fn storage() -> SeaOrmStorage {
        SeaOrmStorage::connect_in_memory().await.unwrap()
    }

    pub async fn department(storage: &SeaOrmStorage, code: &str) -> Department {
        storage
            .create_department(CreateDepartmentRequest {
                name: format!("Department {code}"),
                code: code.to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn student(
        storage: &SeaOrmStorage,
        department_id: i64,
        registration_number: &str,
        batch: &str,
        section: &str,
    ) -> Student {
        storage
            .create_student(CreateStudentRequest {
                department_id,
                name: format!("Student {registration_number}"),
                batch: batch.to_string(),
                section: section.to_string(),
                registration_number: registration_number.to_string(),
                did_internship: false,
            })
            .await
            .unwrap()
    }

    pub async fn faculty(storage: &SeaOrmStorage, department_id: i64, email: &str) -> Faculty {
        storage
            .create_faculty(CreateFacultyRequest {
                department_id,
                name: format!("Faculty {email}"),
                email: email.to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn internship(storage: &SeaOrmStorage) -> Internship {
        storage
            .create_internship(
                900,
                CreateInternshipRequest {
                    host_institution: "Acme Robotics".to_string(),
                    category: "Engineering".to_string(),
                    start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2025, 8, 31).unwrap(),
                },
            )
            .await
            .unwrap()
    }
}
