//! In-memory store.
//!
//! Keeps customers and credits in vectors behind a `tokio::sync::RwLock`.
//! Ids are assigned sequentially starting at 1, like a `BIGSERIAL` column.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        credit::{Credit, NewCredit},
        customer::{Customer, NewCustomer},
    },
    store::Store,
};

#[derive(Debug, Default)]
struct Tables {
    customers: Vec<Customer>,
    credits: Vec<Credit>,
}

/// Store living entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn save_customer(&self, customer: NewCustomer) -> Result<Customer, AppError> {
        let mut tables = self.tables.write().await;

        if tables.customers.iter().any(|c| c.cpf == customer.cpf) {
            return Err(AppError::validation("CPF already registered"));
        }
        if tables.customers.iter().any(|c| c.email == customer.email) {
            return Err(AppError::validation("Email already registered"));
        }

        let saved = Customer {
            id: tables.customers.len() as i64 + 1,
            first_name: customer.first_name,
            last_name: customer.last_name,
            cpf: customer.cpf,
            email: customer.email,
            password_hash: customer.password_hash,
            zip_code: customer.zip_code,
            street: customer.street,
            income: customer.income,
            created_at: Utc::now(),
        };
        tables.customers.push(saved.clone());

        Ok(saved)
    }

    async fn find_customer_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn save_credit(&self, credit: NewCredit) -> Result<Credit, AppError> {
        let mut tables = self.tables.write().await;

        if !tables.customers.iter().any(|c| c.id == credit.customer_id) {
            return Err(AppError::validation(format!(
                "Customer {} not found",
                credit.customer_id
            )));
        }
        if tables
            .credits
            .iter()
            .any(|c| c.credit_code == credit.credit_code)
        {
            return Err(AppError::validation(format!(
                "Credit code {} already exists",
                credit.credit_code
            )));
        }

        let saved = Credit {
            id: tables.credits.len() as i64 + 1,
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            day_first_installment: credit.day_first_installment,
            number_of_installments: credit.number_of_installments,
            status: credit.status,
            customer_id: credit.customer_id,
            created_at: Utc::now(),
        };
        tables.credits.push(saved.clone());

        Ok(saved)
    }

    async fn find_credit_by_code(&self, code: Uuid) -> Result<Option<Credit>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .credits
            .iter()
            .find(|c| c.credit_code == code)
            .cloned())
    }

    async fn list_credits_by_customer(&self, customer_id: i64) -> Result<Vec<Credit>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .credits
            .iter()
            .filter(|c| c.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
