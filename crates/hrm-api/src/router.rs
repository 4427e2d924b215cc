// ============================================================================
// HRM API - Router
// File: crates/hrm-api/src/router.rs
// ============================================================================

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::{auth, email_templates, employees, health, invoices, organizations, users};
use crate::state::AppState;

/// Builds the full route table. The server binary adds the CORS, request-id,
/// tracing and timeout layers.
pub fn api_router(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route(
            "/organizations",
            post(organizations::create_organization).get(organizations::list_organizations),
        )
        .route("/organizations/{id}", get(organizations::get_organization))
        .route(
            "/organizations/{id}/subscription",
            put(organizations::update_subscription),
        )
        .route("/users", post(users::create_user))
        .route(
            "/employees",
            post(employees::create_employee).get(employees::list_employees),
        )
        .route("/employees/{id}", get(employees::get_employee))
        .route(
            "/invoices",
            post(invoices::create_invoice).get(invoices::list_invoices),
        )
        .route(
            "/invoices/{id}",
            get(invoices::get_invoice)
                .put(invoices::update_invoice)
                .delete(invoices::delete_invoice),
        )
        .route("/invoices/{id}/status", patch(invoices::update_invoice_status))
        .route("/invoices/{id}/pdf", get(invoices::download_invoice_pdf))
        .route("/invoices/{id}/send", post(invoices::send_invoice))
        .route(
            "/email-templates",
            post(email_templates::create_template).get(email_templates::list_templates),
        )
        .route(
            "/email-templates/{id}",
            get(email_templates::get_template)
                .put(email_templates::update_template)
                .delete(email_templates::delete_template),
        );

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", v1)
        .with_state(state)
}
