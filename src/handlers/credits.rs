//! Credit HTTP handlers.
//!
//! This module implements the credit-related API endpoints:
//! - POST /api/credits - Create a credit for a customer
//! - GET /api/credits?customerId={id} - List a customer's credits
//! - GET /api/credits/{creditCode}?customerId={id} - Get a credit by code

use crate::{
    error::AppError,
    extract::AppJson,
    models::credit::{CreditRequest, CreditSummary, CreditView, CustomerQuery},
    services::credit_service,
    store::SharedStore,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

/// Create a credit.
///
/// # Request Body
///
/// ```json
/// {
///   "creditValue": 500.0,
///   "dayFirstOfInstallment": "2024-04-22",
///   "numberOfInstallments": 4,
///   "customerId": 1
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: Returns the created credit
/// - **Error (400)**: Unknown customer or invalid fields
pub async fn create_credit(
    State(store): State<SharedStore>,
    AppJson(request): AppJson<CreditRequest>,
) -> Result<(StatusCode, Json<CreditView>), AppError> {
    let (credit, customer) = credit_service::create_credit(store.as_ref(), request).await?;

    Ok((StatusCode::CREATED, Json(CreditView::new(credit, &customer))))
}

/// List the credits of a customer.
///
/// # Response
///
/// - **Success (200 OK)**: Array of credit summaries, empty when the customer
///   has none (or does not exist)
///
/// ```json
/// [
///   {
///     "creditCode": "9b0b4a6e-0f5e-4a4e-8f57-7b3c3f3f8c11",
///     "creditValue": "500.00",
///     "numberOfInstallments": 4
///   }
/// ]
/// ```
pub async fn list_credits(
    State(store): State<SharedStore>,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<Vec<CreditSummary>>, AppError> {
    let credits = credit_service::list_credits(store.as_ref(), query.customer_id).await?;

    let summaries: Vec<CreditSummary> = credits.into_iter().map(Into::into).collect();

    Ok(Json(summaries))
}

/// Get a credit by its code.
///
/// # Response
///
/// - **Success (200 OK)**: The credit, with its owner's id, email and income
/// - **Error (400)**: Unknown code, or the credit belongs to another customer
pub async fn get_credit(
    State(store): State<SharedStore>,
    Path(credit_code): Path<Uuid>,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<CreditView>, AppError> {
    let view =
        credit_service::find_credit_by_code(store.as_ref(), credit_code, query.customer_id).await?;

    Ok(Json(view))
}
