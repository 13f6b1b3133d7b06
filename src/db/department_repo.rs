use sqlx::PgPool;

use crate::models::department::Department;

const COLUMNS: &str = "department_id, name";

pub struct DepartmentRepo;

impl DepartmentRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments ORDER BY department_id");
        sqlx::query_as::<_, Department>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments WHERE department_id = $1");
        sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM departments WHERE department_id = $1)",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    pub async fn create(pool: &PgPool, name: &str) -> Result<Department, sqlx::Error> {
        let query = format!("INSERT INTO departments (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Department>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Overwrites every column of the row. Returns `false` when no row was
    /// written.
    pub async fn update(pool: &PgPool, id: i32, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE departments SET name = $2 WHERE department_id = $1")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deletes the department and, through the foreign key, its employees.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM departments WHERE department_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
