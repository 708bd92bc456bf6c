//! Credit service - creation and lookup rules for credits.
//!
//! # Rules
//!
//! - A credit can only be created for a customer that exists.
//! - A credit fetched by code must belong to the customer named by the caller.
//!
//! Not-found and wrong-owner share the same error variant and differ only in
//! their message.

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        credit::{Credit, CreditRequest, CreditView, MAX_INSTALLMENTS, NewCredit, STATUS_IN_PROGRESS},
        customer::Customer,
    },
    services::amount,
    store::Store,
};

/// Create a credit for an existing customer.
///
/// # Process
///
/// 1. Validate value and number of installments
/// 2. Resolve the customer
/// 3. Generate a fresh credit code and persist the credit
///
/// # Errors
///
/// - `Validation`: invalid fields or unknown customer (nothing is persisted)
/// - `Database`: the store failed
pub async fn create_credit(
    store: &dyn Store,
    request: CreditRequest,
) -> Result<(Credit, Customer), AppError> {
    if request.credit_value <= BigDecimal::from(0) {
        return Err(AppError::validation("Credit value must be positive"));
    }
    amount::ensure_storable("creditValue", &request.credit_value)?;

    if !(1..=MAX_INSTALLMENTS).contains(&request.number_of_installments) {
        return Err(AppError::validation(format!(
            "Number of installments must be between 1 and {MAX_INSTALLMENTS}"
        )));
    }

    let customer = store
        .find_customer_by_id(request.customer_id)
        .await?
        .ok_or_else(|| {
            AppError::validation(format!("Customer {} not found", request.customer_id))
        })?;

    let credit = store
        .save_credit(NewCredit {
            credit_code: Uuid::new_v4(),
            credit_value: request.credit_value,
            day_first_installment: request.day_first_of_installment,
            number_of_installments: request.number_of_installments,
            status: STATUS_IN_PROGRESS.to_string(),
            customer_id: customer.id,
        })
        .await?;

    tracing::info!(
        "Credit {} created for customer {}",
        credit.credit_code,
        customer.id
    );
    Ok((credit, customer))
}

/// Fetch a credit by code on behalf of `customer_id`.
///
/// # Errors
///
/// - `Validation`: the code does not exist, or the credit belongs to another customer
/// - `Database`: the store failed
pub async fn find_credit_by_code(
    store: &dyn Store,
    code: Uuid,
    customer_id: i64,
) -> Result<CreditView, AppError> {
    let credit = store
        .find_credit_by_code(code)
        .await?
        .ok_or_else(|| AppError::validation(format!("Credit code {code} not found")))?;

    if credit.customer_id != customer_id {
        return Err(AppError::validation(format!(
            "Credit {code} does not belong to customer {customer_id}"
        )));
    }

    // Both stores refuse credits whose customer does not exist.
    let customer = store
        .find_customer_by_id(credit.customer_id)
        .await?
        .ok_or_else(|| {
            AppError::validation(format!("Customer {} not found", credit.customer_id))
        })?;

    Ok(CreditView::new(credit, &customer))
}

/// All credits of `customer_id`, oldest first. Unknown customers yield an empty list.
pub async fn list_credits(store: &dyn Store, customer_id: i64) -> Result<Vec<Credit>, AppError> {
    store.list_credits_by_customer(customer_id).await
}
