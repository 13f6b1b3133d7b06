use actix_web::http::header;
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use log::{info, warn};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::db::{DepartmentRepo, EmployeeRepo};
use crate::errors::{is_foreign_key_violation, AppError};
use crate::models::employee::{date_of_birth, EmployeeFields, EmployeeWithDepartment};
use crate::utils::age;
use crate::utils::validation::validate_payload;

const INVALID_DEPARTMENT: &str = "Invalid Department ID.";

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    #[serde(default)]
    employee_id: i32,
    #[validate(length(min = 1))]
    name: String,
    #[serde(default, deserialize_with = "date_of_birth::deserialize")]
    date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    age: i32,
    salary: Decimal,
    department_id: i32,
}

impl EmployeePayload {
    /// Column values to store, with the age recomputed from the date of birth.
    fn into_fields(self, today: NaiveDate) -> EmployeeFields {
        EmployeeFields {
            age: age::derive_age(self.date_of_birth, self.age, today),
            // NUMERIC(18,2) rounds half away from zero.
            salary: self
                .salary
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            name: self.name,
            date_of_birth: self.date_of_birth,
            department_id: self.department_id,
        }
    }
}

fn invalid_department() -> AppError {
    AppError::BadRequest(INVALID_DEPARTMENT.to_string())
}

/// The department can vanish between the existence check and the save.
fn map_save_error(err: sqlx::Error) -> AppError {
    if is_foreign_key_violation(&err) {
        invalid_department()
    } else {
        AppError::from(err)
    }
}

pub async fn get_employees(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let employees = EmployeeRepo::list_with_department(&**pool).await?;
    Ok(HttpResponse::Ok().json(employees))
}

pub async fn get_employee(
    pool: web::Data<PgPool>,
    employee_id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let employee_id = employee_id.into_inner();
    let employee = EmployeeRepo::find_with_department(&**pool, employee_id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee", employee_id))?;
    Ok(HttpResponse::Ok().json(employee))
}

pub async fn create_employee(
    pool: web::Data<PgPool>,
    new_employee: web::Json<EmployeePayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*new_employee)?;
    let new_employee = new_employee.into_inner();

    let department = DepartmentRepo::find_by_id(&**pool, new_employee.department_id)
        .await?
        .ok_or_else(invalid_department)?;

    let fields = new_employee.into_fields(age::today());
    let employee = EmployeeRepo::create(&**pool, &fields)
        .await
        .map_err(map_save_error)?;
    info!(
        "Created employee {} in department {}",
        employee.employee_id, department.department_id
    );

    let location = format!("/api/employees/{}", employee.employee_id);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(EmployeeWithDepartment {
            employee,
            department,
        }))
}

pub async fn update_employee(
    pool: web::Data<PgPool>,
    employee_id: web::Path<i32>,
    updates: web::Json<EmployeePayload>,
) -> Result<HttpResponse, AppError> {
    let employee_id = employee_id.into_inner();
    if employee_id != updates.employee_id {
        return Err(AppError::id_mismatch(employee_id, updates.employee_id));
    }
    validate_payload(&*updates)?;
    let updates = updates.into_inner();

    if !DepartmentRepo::exists(&**pool, updates.department_id).await? {
        return Err(invalid_department());
    }

    let fields = updates.into_fields(age::today());
    let updated = EmployeeRepo::update(&**pool, employee_id, &fields)
        .await
        .map_err(map_save_error)?;

    if !updated {
        let still_exists = EmployeeRepo::exists(&**pool, employee_id).await?;
        warn!("Update of employee {} wrote no row", employee_id);
        return Err(AppError::stale_write("Employee", employee_id, still_exists));
    }

    Ok(HttpResponse::NoContent().finish())
}

pub async fn delete_employee(
    pool: web::Data<PgPool>,
    employee_id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let employee_id = employee_id.into_inner();
    if !EmployeeRepo::exists(&**pool, employee_id).await? {
        return Err(AppError::not_found("Employee", employee_id));
    }

    if !EmployeeRepo::delete(&**pool, employee_id).await? {
        return Err(AppError::not_found("Employee", employee_id));
    }
    info!("Deleted employee {}", employee_id);

    Ok(HttpResponse::NoContent().finish())
}
