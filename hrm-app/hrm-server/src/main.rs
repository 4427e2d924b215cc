// ============================================================================
// HRM Server - Entry Point
// File: hrm-app/hrm-server/src/main.rs
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::{error, info};

use hrm_api::{api_router, AppState};
use hrm_core::services::{
    AuthService, EmailTemplateService, EmployeeService, InvoiceDeliveryService, InvoiceService,
    ModuleGate, OrganizationService, UserService,
};
use hrm_infrastructure::{
    create_pool, run_migrations, LopdfInvoiceRenderer, PgEmailTemplateRepository, PgEmployeeRepository,
    PgInvoiceRepository, PgOrganizationRepository, PgUserRepository, SmtpMailTransport,
};
use hrm_security::JwtService;
use hrm_shared::config::AppConfig;
use hrm_shared::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenv();

    // Initialize telemetry; the guard flushes buffered logs on exit
    let _guard = init_telemetry();

    info!("HRM Server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to database and apply migrations
    info!("Connecting to database...");
    let pool = create_pool(&config.database).await?;
    run_migrations(&pool).await?;
    info!("Database connection established.");

    // Repositories
    let organizations = Arc::new(PgOrganizationRepository::new(pool.clone()));
    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let employees = Arc::new(PgEmployeeRepository::new(pool.clone()));
    let invoice_repo = Arc::new(PgInvoiceRepository::new(pool.clone()));
    let template_repo = Arc::new(PgEmailTemplateRepository::new(pool));

    // Gateways
    let renderer = Arc::new(LopdfInvoiceRenderer::new());
    let transport = Arc::new(SmtpMailTransport::new(&config.mail)?);

    // Services
    let jwt = JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    );
    let gate = ModuleGate::new(organizations.clone());
    let invoices = Arc::new(InvoiceService::new(invoice_repo.clone(), gate.clone()));
    let templates = Arc::new(EmailTemplateService::new(template_repo, gate.clone()));

    let state = AppState {
        auth: Arc::new(AuthService::new(users.clone(), jwt)),
        organizations: Arc::new(OrganizationService::new(organizations)),
        users: Arc::new(UserService::new(users.clone())),
        employees: Arc::new(EmployeeService::new(employees, users, gate)),
        delivery: Arc::new(InvoiceDeliveryService::new(
            invoices.clone(),
            invoice_repo,
            templates.clone(),
            renderer,
            transport,
        )),
        invoices,
        templates,
    };

    // Build router
    let cors_origin: HeaderValue = config.app.cors_origin.parse()?;
    let app = api_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(cors_origin)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(config.app.request_timeout_secs)))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("{} listening on {} ({})", config.app.name, addr, config.app.env);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HRM Server stopped");
    Ok(())
}

fn dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to read .env: {}", e);
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
