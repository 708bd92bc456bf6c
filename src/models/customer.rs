//! Customer data models and API request/response types.
//!
//! This module defines:
//! - `Customer`: Database entity representing a registered customer
//! - `CustomerRequest`: Request body for registering a customer
//! - `NewCustomer`: Validated registration handed to the store
//! - `CustomerResponse`: Response body returned to clients

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a customer record from the database.
///
/// # Database Table
///
/// Maps to the `customers` table. `cpf` and `email` are unique.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Customer {
    /// Identifier assigned by the store on creation
    pub id: i64,

    pub first_name: String,

    pub last_name: String,

    /// CPF, digits only (11 characters)
    pub cpf: String,

    pub email: String,

    /// Argon2id hash of the password in PHC string format
    ///
    /// The plain password is never stored nor returned.
    pub password_hash: String,

    pub zip_code: String,

    pub street: String,

    /// Declared monthly income
    pub income: BigDecimal,

    pub created_at: DateTime<Utc>,
}

/// Request body for registering a customer.
///
/// # JSON Example
///
/// ```json
/// {
///   "firstName": "nome",
///   "lastName": "sobrenome",
///   "cpf": "78240212034",
///   "email": "joe@gmail.com",
///   "password": "senhaconfiavel",
///   "zipCode": "986412",
///   "street": "rua tranquila",
///   "income": 1000.0
/// }
/// ```
///
/// # Validation
///
/// - `firstName`, `lastName`: non-empty
/// - `cpf`: valid check digits, punctuation allowed
/// - `email`: `local@domain.tld`
/// - `income`: zero or more
/// - `password`, `zipCode`, `street`: optional, default to empty
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub street: String,
    pub income: BigDecimal,
}

/// Customer registration that already passed validation.
///
/// `cpf` is normalized to digits only and the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    pub password_hash: String,
    pub zip_code: String,
    pub street: String,
    pub income: BigDecimal,
}

/// Response body for customer endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 1,
///   "firstName": "nome",
///   "lastName": "sobrenome",
///   "cpf": "78240212034",
///   "email": "joe@gmail.com",
///   "income": "1000.00",
///   "zipCode": "986412",
///   "street": "rua tranquila"
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    pub income: BigDecimal,
    pub zip_code: String,
    pub street: String,
}

/// Drops the password digest and timestamps.
impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            cpf: customer.cpf,
            email: customer.email,
            income: customer.income,
            zip_code: customer.zip_code,
            street: customer.street,
        }
    }
}
