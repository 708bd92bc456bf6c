//! Storage capability used by the services.
//!
//! Services never reach for a global repository. They receive a `&dyn Store`
//! and the HTTP layer shares one `Arc<dyn Store>` through axum state.
//!
//! Two implementations exist:
//! - [`postgres::PgStore`]: PostgreSQL through sqlx
//! - [`memory::MemoryStore`]: process memory, used when no database is configured

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        credit::{Credit, NewCredit},
        customer::{Customer, NewCustomer},
    },
};

pub mod memory;
pub mod postgres;

/// Shared handle placed in axum state.
pub type SharedStore = Arc<dyn Store>;

/// Persistence operations for customers and credits.
///
/// Lookups return `Ok(None)` when nothing matches; `Err` is reserved for
/// failures of the store itself.
#[async_trait]
pub trait Store: Send + Sync {
    /// Persist a customer and return it with its assigned id.
    ///
    /// A duplicate CPF or email fails with [`AppError::Validation`].
    async fn save_customer(&self, customer: NewCustomer) -> Result<Customer, AppError>;

    async fn find_customer_by_id(&self, id: i64) -> Result<Option<Customer>, AppError>;

    /// Persist a credit and return it with its assigned id.
    ///
    /// A duplicate credit code, or a `customer_id` with no matching customer,
    /// fails with [`AppError::Validation`].
    async fn save_credit(&self, credit: NewCredit) -> Result<Credit, AppError>;

    async fn find_credit_by_code(&self, code: Uuid) -> Result<Option<Credit>, AppError>;

    /// All credits of a customer, oldest first. Unknown customers yield an empty list.
    async fn list_credits_by_customer(&self, customer_id: i64) -> Result<Vec<Credit>, AppError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;

    /// Short name reported by the health check.
    fn backend(&self) -> &'static str;
}
