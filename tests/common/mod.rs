#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// A pool that never connects until a query runs. Requests rejected before
/// touching the store work against it without a database.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://postgres@127.0.0.1:1/unused")
        .expect("lazy pool URL must parse")
}

pub async fn body_json<B: MessageBody>(response: ServiceResponse<B>) -> serde_json::Value {
    test::read_body_json(response).await
}

pub fn location<B>(response: &ServiceResponse<B>) -> String {
    response
        .headers()
        .get("location")
        .expect("Missing Location header")
        .to_str()
        .unwrap()
        .to_string()
}
