//! PostgreSQL store backed by a sqlx connection pool.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        credit::{Credit, NewCredit},
        customer::{Customer, NewCustomer},
    },
    store::Store,
};

const CUSTOMER_COLUMNS: &str =
    "id, first_name, last_name, cpf, email, password_hash, zip_code, street, income, created_at";

const CREDIT_COLUMNS: &str = "id, credit_code, credit_value, day_first_installment, \
     number_of_installments, status, customer_id, created_at";

/// Store that reads and writes the `customers` and `credits` tables.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Turn a unique-constraint violation into a client error, keep everything else.
fn map_unique_violation(err: sqlx::Error, message: impl FnOnce(Option<&str>) -> String) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::Validation(message(db_err.constraint()));
        }
    }
    AppError::Database(err)
}

#[async_trait]
impl Store for PgStore {
    async fn save_customer(&self, customer: NewCustomer) -> Result<Customer, AppError> {
        let query = format!(
            r#"
            INSERT INTO customers (first_name, last_name, cpf, email, password_hash, zip_code, street, income)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CUSTOMER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Customer>(&query)
            .bind(customer.first_name)
            .bind(customer.last_name)
            .bind(customer.cpf)
            .bind(customer.email)
            .bind(customer.password_hash)
            .bind(customer.zip_code)
            .bind(customer.street)
            .bind(customer.income)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                map_unique_violation(err, |constraint| match constraint {
                    Some(name) if name.contains("email") => "Email already registered".to_string(),
                    Some(name) if name.contains("cpf") => "CPF already registered".to_string(),
                    _ => "Customer already registered".to_string(),
                })
            })
    }

    async fn find_customer_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        let query = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1");

        let customer = sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    async fn save_credit(&self, credit: NewCredit) -> Result<Credit, AppError> {
        let query = format!(
            r#"
            INSERT INTO credits (
                credit_code,
                credit_value,
                day_first_installment,
                number_of_installments,
                status,
                customer_id
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CREDIT_COLUMNS}
            "#
        );

        let code = credit.credit_code;
        let customer_id = credit.customer_id;
        sqlx::query_as::<_, Credit>(&query)
            .bind(credit.credit_code)
            .bind(credit.credit_value)
            .bind(credit.day_first_installment)
            .bind(credit.number_of_installments)
            .bind(credit.status)
            .bind(credit.customer_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                let orphan = matches!(
                    &err,
                    sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation()
                );
                if orphan {
                    AppError::Validation(format!("Customer {customer_id} not found"))
                } else {
                    map_unique_violation(err, |_| format!("Credit code {code} already exists"))
                }
            })
    }

    async fn find_credit_by_code(&self, code: Uuid) -> Result<Option<Credit>, AppError> {
        let query = format!("SELECT {CREDIT_COLUMNS} FROM credits WHERE credit_code = $1");

        let credit = sqlx::query_as::<_, Credit>(&query)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(credit)
    }

    async fn list_credits_by_customer(&self, customer_id: i64) -> Result<Vec<Credit>, AppError> {
        let query = format!(
            "SELECT {CREDIT_COLUMNS} FROM credits WHERE customer_id = $1 ORDER BY created_at, id"
        );

        let credits = sqlx::query_as::<_, Credit>(&query)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(credits)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
