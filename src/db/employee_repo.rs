use sqlx::PgPool;

use crate::models::employee::{
    Employee, EmployeeDepartmentRow, EmployeeFields, EmployeeWithDepartment,
};

const COLUMNS: &str = "employee_id, name, date_of_birth, age, salary, department_id";

/// Employees joined with their department in a single query.
const SELECT_WITH_DEPARTMENT: &str = "SELECT e.employee_id, e.name, e.date_of_birth, e.age, \
     e.salary, e.department_id, d.name AS department_name \
     FROM employees e \
     JOIN departments d ON d.department_id = e.department_id";

pub struct EmployeeRepo;

impl EmployeeRepo {
    pub async fn list_with_department(
        pool: &PgPool,
    ) -> Result<Vec<EmployeeWithDepartment>, sqlx::Error> {
        let query = format!("{SELECT_WITH_DEPARTMENT} ORDER BY e.employee_id");
        let rows = sqlx::query_as::<_, EmployeeDepartmentRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(EmployeeWithDepartment::from).collect())
    }

    pub async fn find_with_department(
        pool: &PgPool,
        id: i32,
    ) -> Result<Option<EmployeeWithDepartment>, sqlx::Error> {
        let query = format!("{SELECT_WITH_DEPARTMENT} WHERE e.employee_id = $1");
        let row = sqlx::query_as::<_, EmployeeDepartmentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(EmployeeWithDepartment::from))
    }

    pub async fn exists(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM employees WHERE employee_id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn create(pool: &PgPool, fields: &EmployeeFields) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees (name, date_of_birth, age, salary, department_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(&fields.name)
            .bind(fields.date_of_birth)
            .bind(fields.age)
            .bind(fields.salary)
            .bind(fields.department_id)
            .fetch_one(pool)
            .await
    }

    /// Overwrites every column of the row. Returns `false` when no row was
    /// written.
    pub async fn update(
        pool: &PgPool,
        id: i32,
        fields: &EmployeeFields,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE employees SET
                name = $2,
                date_of_birth = $3,
                age = $4,
                salary = $5,
                department_id = $6
             WHERE employee_id = $1",
        )
        .bind(id)
        .bind(&fields.name)
        .bind(fields.date_of_birth)
        .bind(fields.age)
        .bind(fields.salary)
        .bind(fields.department_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE employee_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
