use async_trait::async_trait;

use crate::model::department::{Department, NewDepartment};

pub mod memory;
pub mod mysql;

pub use memory::InMemoryDepartmentRepository;
pub use mysql::MySqlDepartmentRepository;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("department {0} not found")]
    NotFound(u64),

    #[error("{0}")]
    Validation(String),

    #[error("database error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("department store unavailable: {0}")]
    Unavailable(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Storage for department records.
///
/// Every listing is ordered by id ascending.
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<Department>>;

    async fn find_by_id(&self, id: u64) -> RepositoryResult<Option<Department>>;

    /// Departments whose name contains `fragment`, ignoring case.
    /// An empty fragment returns every department.
    async fn find_by_name_containing_ignore_case(
        &self,
        fragment: &str,
    ) -> RepositoryResult<Vec<Department>>;

    async fn create(&self, department: NewDepartment) -> RepositoryResult<Department>;

    async fn update(&self, id: u64, department: NewDepartment) -> RepositoryResult<Department>;

    async fn delete_by_id(&self, id: u64) -> RepositoryResult<()>;

    async fn count(&self) -> RepositoryResult<u64>;
}

fn validate(department: &NewDepartment) -> RepositoryResult<String> {
    department
        .validated_name()
        .map_err(RepositoryError::Validation)
}
