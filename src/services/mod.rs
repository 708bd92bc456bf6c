//! Business logic services.
//!
//! Services hold the validation rules and talk to storage through the
//! [`Store`](crate::store::Store) trait they are handed.

pub mod amount;
pub mod credit_service;
pub mod customer_service;
