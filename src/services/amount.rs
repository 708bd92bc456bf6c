//! Monetary amount checks shared by the services.
//!
//! Amounts are stored as `NUMERIC(15, 2)`: at most two fractional digits and
//! an absolute value below 10^13. Anything else is refused up front so both
//! stores keep exactly what the client sent.

use bigdecimal::BigDecimal;

use crate::error::AppError;

/// Fractional digits kept by the `NUMERIC(15, 2)` columns.
pub const MAX_SCALE: i64 = 2;

/// Integer digits kept by the `NUMERIC(15, 2)` columns.
const MAX_INTEGER_DIGITS: u32 = 13;

/// Fail with `Validation` when `value` does not fit the amount columns.
///
/// `field` names the amount in the error message.
pub fn ensure_storable(field: &str, value: &BigDecimal) -> Result<(), AppError> {
    let (_, scale) = value.normalized().as_bigint_and_exponent();
    if scale > MAX_SCALE {
        return Err(AppError::validation(format!(
            "{field} must have at most {MAX_SCALE} decimal places"
        )));
    }

    let limit = BigDecimal::from(10_i64.pow(MAX_INTEGER_DIGITS));
    if value.abs() >= limit {
        return Err(AppError::validation(format!(
            "{field} must be less than 10^{MAX_INTEGER_DIGITS}"
        )));
    }

    Ok(())
}
