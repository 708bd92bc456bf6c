//! Customer service - registration and lookup of customers.
//!
//! Registration normalizes and validates the request, hashes the password
//! and hands a [`NewCustomer`] to the store.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use bigdecimal::BigDecimal;

use crate::{
    error::AppError,
    models::customer::{Customer, CustomerRequest, NewCustomer},
    services::amount,
    store::Store,
};

/// Register a customer.
///
/// # Errors
///
/// - `Validation`: a field is invalid, or the CPF/email is already registered
/// - `Database`: the store failed
pub async fn register_customer(
    store: &dyn Store,
    request: CustomerRequest,
) -> Result<Customer, AppError> {
    let first_name = request.first_name.trim();
    let last_name = request.last_name.trim();
    if first_name.is_empty() || last_name.is_empty() {
        return Err(AppError::validation("First and last name are required"));
    }

    let cpf = normalize_cpf(&request.cpf)
        .ok_or_else(|| AppError::validation(format!("Invalid CPF: {}", request.cpf)))?;

    let email = request.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(AppError::validation(format!(
            "Invalid email: {}",
            request.email
        )));
    }

    if request.income < BigDecimal::from(0) {
        return Err(AppError::validation("Income must not be negative"));
    }
    amount::ensure_storable("income", &request.income)?;

    let password_hash = hash_password(&request.password)?;

    let customer = store
        .save_customer(NewCustomer {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            cpf,
            email,
            password_hash,
            zip_code: request.zip_code.trim().to_string(),
            street: request.street.trim().to_string(),
            income: request.income,
        })
        .await?;

    tracing::info!("Customer {} registered", customer.id);
    Ok(customer)
}

/// Fetch a customer by id, failing with `Validation` when it does not exist.
pub async fn find_customer(store: &dyn Store, id: i64) -> Result<Customer, AppError> {
    store
        .find_customer_by_id(id)
        .await?
        .ok_or_else(|| AppError::validation(format!("Customer {id} not found")))
}

/// Strip `.`, `-` and spaces and check the two CPF check digits.
///
/// Returns the 11 digits on success.
fn normalize_cpf(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | ' '))
        .collect();

    let digits: Vec<u32> = cleaned
        .chars()
        .map(|c| c.to_digit(10))
        .collect::<Option<_>>()?;

    if digits.len() != 11 || digits.iter().all(|d| *d == digits[0]) {
        return None;
    }

    if check_digit(&digits[..9]) != digits[9] || check_digit(&digits[..10]) != digits[10] {
        return None;
    }

    Some(cleaned)
}

/// Weighted mod-11 check digit over `digits`, weights counting down to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let weight_start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight_start - i as u32))
        .sum();

    match sum % 11 {
        0 | 1 => 0,
        rest => 11 - rest,
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Argon2id hash of the password with a fresh random salt, in PHC string format.
fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}
