//! HTTP request handlers (route handlers).
//!
//! Each handler extracts the request data, delegates to a service and turns
//! the result into a JSON response.

/// Credit endpoints
pub mod credits;
/// Customer endpoints
pub mod customers;
pub mod health;
