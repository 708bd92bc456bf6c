//! Credit data models and API request/response types.
//!
//! This module defines:
//! - `Credit`: Database entity representing a credit granted to a customer
//! - `CreditRequest`: Request body for creating a credit
//! - `NewCredit`: Validated credit handed to the store
//! - `CreditView`: Detailed response for creation and lookup by code
//! - `CreditSummary`: Entry of the per-customer listing

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::customer::Customer;

/// Status assigned to every newly created credit.
pub const STATUS_IN_PROGRESS: &str = "IN_PROGRESS";

/// Upper bound on the number of installments of a single credit.
pub const MAX_INSTALLMENTS: i32 = 48;

/// Represents a credit record from the database.
///
/// # Database Table
///
/// Maps to the `credits` table. Each credit:
/// - Has an internal numeric `id` and an external `credit_code`
/// - References exactly one customer (via `customer_id`)
/// - Is never updated after insertion
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credit {
    /// Identifier assigned by the store
    pub id: i64,

    /// Random UUIDv4 used by clients to look the credit up
    ///
    /// Unique across the store (UNIQUE constraint in PostgreSQL).
    pub credit_code: Uuid,

    /// Amount granted, always positive
    pub credit_value: BigDecimal,

    pub day_first_installment: NaiveDate,

    pub number_of_installments: i32,

    /// Always `IN_PROGRESS` on creation; the column also admits `APPROVED` and `REJECT`
    pub status: String,

    /// Foreign key to the owning customer
    pub customer_id: i64,

    pub created_at: DateTime<Utc>,
}

/// Request body for creating a credit.
///
/// # JSON Example
///
/// ```json
/// {
///   "creditValue": 500.0,
///   "dayFirstOfInstallment": "2024-04-22",
///   "numberOfInstallments": 4,
///   "customerId": 1
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditRequest {
    pub credit_value: BigDecimal,
    pub day_first_of_installment: NaiveDate,
    pub number_of_installments: i32,
    pub customer_id: i64,
}

/// Credit ready to be persisted, code already generated.
#[derive(Debug, Clone)]
pub struct NewCredit {
    pub credit_code: Uuid,
    pub credit_value: BigDecimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub status: String,
    pub customer_id: i64,
}

/// Detailed credit representation.
///
/// Returned when a credit is created and when it is fetched by code.
/// Carries the owner's id so callers can confirm the relationship.
///
/// # JSON Example
///
/// ```json
/// {
///   "creditCode": "9b0b4a6e-0f5e-4a4e-8f57-7b3c3f3f8c11",
///   "creditValue": "500.00",
///   "dayFirstOfInstallment": "2024-04-22",
///   "numberOfInstallments": 4,
///   "status": "IN_PROGRESS",
///   "customerId": 1,
///   "emailCustomer": "joe@gmail.com",
///   "incomeCustomer": "1000.00"
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditView {
    pub credit_code: Uuid,
    pub credit_value: BigDecimal,
    pub day_first_of_installment: NaiveDate,
    pub number_of_installments: i32,
    pub status: String,
    pub customer_id: i64,
    pub email_customer: String,
    pub income_customer: BigDecimal,
}

impl CreditView {
    /// Combine a credit with the customer that owns it.
    pub fn new(credit: Credit, customer: &Customer) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            day_first_of_installment: credit.day_first_installment,
            number_of_installments: credit.number_of_installments,
            status: credit.status,
            customer_id: credit.customer_id,
            email_customer: customer.email.clone(),
            income_customer: customer.income.clone(),
        }
    }
}

/// Short credit representation used by the per-customer listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSummary {
    pub credit_code: Uuid,
    pub credit_value: BigDecimal,
    pub number_of_installments: i32,
}

impl From<Credit> for CreditSummary {
    fn from(credit: Credit) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
        }
    }
}

/// Query string carrying the customer a credit request is scoped to.
///
/// `GET /api/credits?customerId=1`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerQuery {
    pub customer_id: i64,
}
