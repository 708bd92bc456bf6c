//! Customer HTTP handlers.
//!
//! - POST /api/customers - Register a customer
//! - GET /api/customers/{id} - Get a customer by id

use crate::{
    error::AppError,
    extract::AppJson,
    models::customer::{CustomerRequest, CustomerResponse},
    services::customer_service,
    store::SharedStore,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// Register a customer.
///
/// # Response
///
/// - **Success (201 Created)**: The stored customer, without password
/// - **Error (400)**: Invalid fields, or CPF/email already registered
pub async fn create_customer(
    State(store): State<SharedStore>,
    AppJson(request): AppJson<CustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), AppError> {
    let customer = customer_service::register_customer(store.as_ref(), request).await?;

    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Get a customer by id. Unknown ids answer 400, like unknown credits.
pub async fn get_customer(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerResponse>, AppError> {
    let customer = customer_service::find_customer(store.as_ref(), id).await?;

    Ok(Json(customer.into()))
}
