pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod utils;

use actix_web::web;

use crate::errors::AppError;

/// Registers the `/api/departments` and `/api/employees` resources.
///
/// The caller supplies the `web::Data<PgPool>` the handlers read from.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::resource("/api/departments")
            .route(web::get().to(handlers::department::get_departments))
            .route(web::post().to(handlers::department::create_department)),
    )
    .service(
        web::resource("/api/departments/{id}")
            .route(web::get().to(handlers::department::get_department))
            .route(web::put().to(handlers::department::update_department))
            .route(web::delete().to(handlers::department::delete_department)),
    )
    .service(
        web::resource("/api/employees")
            .route(web::get().to(handlers::employee::get_employees))
            .route(web::post().to(handlers::employee::create_employee)),
    )
    .service(
        web::resource("/api/employees/{id}")
            .route(web::get().to(handlers::employee::get_employee))
            .route(web::put().to(handlers::employee::update_employee))
            .route(web::delete().to(handlers::employee::delete_employee)),
    );
}
