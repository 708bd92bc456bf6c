//! Credit API - customers and the credits granted to them.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Storage**: [`store::Store`] trait, implemented for PostgreSQL (sqlx)
//!   and for process memory
//! - **Format**: JSON requests/responses, camelCase field names
//!
//! # Routes
//!
//! - `POST /api/customers`, `GET /api/customers/{id}`
//! - `POST /api/credits`, `GET /api/credits?customerId=`,
//!   `GET /api/credits/{creditCode}?customerId=`
//! - `GET /health`

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::store::SharedStore;

/// Build the HTTP router on top of `store`.
pub fn app(store: SharedStore) -> Router {
    let api_routes = Router::<SharedStore>::new()
        .route(
            "/api/customers",
            post(handlers::customers::create_customer),
        )
        .route(
            "/api/customers/{id}",
            get(handlers::customers::get_customer),
        )
        .route(
            "/api/credits",
            post(handlers::credits::create_credit).get(handlers::credits::list_credits),
        )
        .route(
            "/api/credits/{credit_code}",
            get(handlers::credits::get_credit),
        );

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
