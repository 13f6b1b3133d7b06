use actix_web::http::header;
use actix_web::{web, HttpResponse};
use log::{info, warn};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::db::DepartmentRepo;
use crate::errors::AppError;
use crate::utils::validation::validate_payload;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPayload {
    #[serde(default)]
    department_id: i32,
    #[validate(length(min = 1))]
    name: String,
}

pub async fn get_departments(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let departments = DepartmentRepo::list(&**pool).await?;
    Ok(HttpResponse::Ok().json(departments))
}

pub async fn get_department(
    pool: web::Data<PgPool>,
    department_id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let department_id = department_id.into_inner();
    let department = DepartmentRepo::find_by_id(&**pool, department_id)
        .await?
        .ok_or_else(|| AppError::not_found("Department", department_id))?;
    Ok(HttpResponse::Ok().json(department))
}

pub async fn create_department(
    pool: web::Data<PgPool>,
    new_department: web::Json<DepartmentPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*new_department)?;

    let department = DepartmentRepo::create(&**pool, &new_department.name).await?;
    info!("Created department {}", department.department_id);

    Ok(HttpResponse::Created()
        .insert_header((
            header::LOCATION,
            format!("/api/departments/{}", department.department_id),
        ))
        .json(department))
}

pub async fn update_department(
    pool: web::Data<PgPool>,
    department_id: web::Path<i32>,
    updates: web::Json<DepartmentPayload>,
) -> Result<HttpResponse, AppError> {
    let department_id = department_id.into_inner();
    if department_id != updates.department_id {
        return Err(AppError::id_mismatch(department_id, updates.department_id));
    }
    validate_payload(&*updates)?;

    if !DepartmentRepo::update(&**pool, department_id, &updates.name).await? {
        let still_exists = DepartmentRepo::exists(&**pool, department_id).await?;
        warn!("Update of department {} wrote no row", department_id);
        return Err(AppError::stale_write("Department", department_id, still_exists));
    }

    Ok(HttpResponse::NoContent().finish())
}

pub async fn delete_department(
    pool: web::Data<PgPool>,
    department_id: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let department_id = department_id.into_inner();
    if !DepartmentRepo::exists(&**pool, department_id).await? {
        return Err(AppError::not_found("Department", department_id));
    }

    if !DepartmentRepo::delete(&**pool, department_id).await? {
        return Err(AppError::not_found("Department", department_id));
    }
    info!("Deleted department {}", department_id);

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> DepartmentPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn long_names_pass_validation() {
        let department = payload(json!({ "name": "x".repeat(101) }));
        assert!(validate_payload(&department).is_ok());
    }

    #[test]
    fn empty_name_fails_validation() {
        let department = payload(json!({ "name": "" }));
        assert!(matches!(
            validate_payload(&department),
            Err(AppError::BadRequest(_))
        ));
    }
}
