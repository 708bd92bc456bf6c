//! Data models representing database entities and API payloads.

/// Credits granted to customers
pub mod credit;
/// Registered customers
pub mod customer;
