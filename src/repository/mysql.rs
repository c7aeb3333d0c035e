use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::{debug, instrument};

use super::{DepartmentRepository, RepositoryError, RepositoryResult, validate};
use crate::model::department::{Department, NewDepartment};
use crate::search::like_pattern;

/// Department store backed by the `departments` MySQL table.
#[derive(Clone)]
pub struct MySqlDepartmentRepository {
    pool: MySqlPool,
}

impl MySqlDepartmentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentRepository for MySqlDepartmentRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Department>> {
        let departments =
            sqlx::query_as::<_, Department>("SELECT id, name FROM departments ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(departments)
    }

    async fn find_by_id(&self, id: u64) -> RepositoryResult<Option<Department>> {
        let department =
            sqlx::query_as::<_, Department>("SELECT id, name FROM departments WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(department)
    }

    #[instrument(skip(self))]
    async fn find_by_name_containing_ignore_case(
        &self,
        fragment: &str,
    ) -> RepositoryResult<Vec<Department>> {
        let sql = r#"
            SELECT id, name
            FROM departments
            WHERE LOWER(name) COLLATE utf8mb4_bin LIKE ? ESCAPE '\\'
            ORDER BY id
        "#;
        let pattern = like_pattern(fragment);
        debug!(sql = %sql, pattern = %pattern, "Searching departments");

        let departments = sqlx::query_as::<_, Department>(sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;

        Ok(departments)
    }

    #[instrument(skip(self))]
    async fn create(&self, department: NewDepartment) -> RepositoryResult<Department> {
        let name = validate(&department)?;

        let result = sqlx::query("INSERT INTO departments (name) VALUES (?)")
            .bind(&name)
            .execute(&self.pool)
            .await?;

        Ok(Department {
            id: result.last_insert_id(),
            name,
        })
    }

    #[instrument(skip(self))]
    async fn update(&self, id: u64, department: NewDepartment) -> RepositoryResult<Department> {
        let name = validate(&department)?;

        let mut tx = self.pool.begin().await?;

        // Row lock is held until commit, so a concurrent delete waits for us
        let locked = sqlx::query_scalar::<_, u64>(
            "SELECT id FROM departments WHERE id = ? FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            return Err(RepositoryError::NotFound(id));
        }

        sqlx::query("UPDATE departments SET name = ? WHERE id = ?")
            .bind(&name)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Department { id, name })
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: u64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM departments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }

        Ok(())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM departments")
            .fetch_one(&self.pool)
            .await?;

        Ok(total as u64)
    }
}
