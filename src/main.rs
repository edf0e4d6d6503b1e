mod api_doc;
mod auth;
mod cache;
mod cart;
mod db;
mod growth;
mod investor;
mod notification;
mod order;
mod plan;
mod product;
mod revenue;
mod routes;
mod schema_ext;
mod shop;
mod whatsapp;

use axum::http::{header, Method};
use axum::{routing::get, Router};
use dotenv::dotenv;
use redis::Client;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::cache::redis::RedisCache;
use crate::growth::controller::GrowthState;
use crate::growth::monitor::{threshold_from_env, RevenueMonitor};
use crate::growth::scanner::PerformanceScanner;
use crate::notification::service::NotificationService;
use crate::revenue::service::RevenueService;
use crate::whatsapp::service::WhatsAppClient;

const DEFAULT_BASE_URL: &str = "http://localhost:9500";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    tracing_subscriber::fmt::init();

    // Load .env file if it exists
    dotenv().ok();

    // Create connection pool
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&std::env::var("DATABASE_URL")?)
        .await?;

    // Check if the database is initialized
    if !db::check_db_initialized(&pool).await {
        db::init_db(&pool).await?;
    }

    // Initialize Redis cache if configured
    let redis_cache = match std::env::var("REDIS_URL").ok() {
        Some(url) => {
            info!("Initializing Redis cache with URL: {}", url);
            match Client::open(url) {
                Ok(client) => Some(RedisCache::new(client)),
                Err(e) => {
                    error!("Failed to connect to Redis: {}", e);
                    None
                }
            }
        }
        None => {
            info!("No Redis URL configured, proceeding without cache");
            None
        }
    };

    // The pipeline self-addresses the WhatsApp gateway endpoint
    let base_url = std::env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let whatsapp_client = WhatsAppClient::new(&base_url)?;

    let revenue_threshold = threshold_from_env();
    info!("Revenue threshold configured at {}", revenue_threshold);

    // Shared services
    let notification_service = Arc::new(NotificationService::new(pool.clone()));
    let revenue_service = Arc::new(RevenueService::new(
        pool.clone(),
        redis_cache.clone(),
        revenue_threshold,
    ));

    let growth_state = GrowthState {
        scanner: Arc::new(PerformanceScanner::new(
            pool.clone(),
            notification_service.clone(),
            whatsapp_client.clone(),
        )),
        monitor: Arc::new(RevenueMonitor::new(
            pool.clone(),
            notification_service.clone(),
            whatsapp_client.clone(),
            revenue_threshold,
        )),
    };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // Build the router
    let app = Router::new()
        // API documentation
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Health routes
        .merge(routes::health::routes(pool.clone()))
        // Auth routes
        .merge(routes::auth::routes(pool.clone()))
        // Product catalog routes
        .merge(routes::products::routes(pool.clone(), redis_cache.clone()))
        // Vendor shop routes
        .merge(routes::shops::routes(pool.clone()))
        // Cart and checkout routes
        .merge(routes::cart::routes(pool.clone()))
        .merge(routes::orders::routes(pool.clone()))
        // Weekly plan routes
        .merge(routes::plans::routes(pool.clone()))
        // Investor routes
        .merge(routes::investments::routes(pool.clone()))
        // Notification routes
        .merge(routes::notifications::routes(notification_service.clone()))
        // Messaging gateway stub
        .merge(routes::whatsapp::routes())
        // Growth pipeline triggers
        .merge(routes::growth::routes(growth_state))
        // Revenue routes
        .merge(routes::revenue::routes(revenue_service))
        // Admin routes
        .merge(routes::admin::routes(pool.clone()))
        // Welcome route
        .route("/", get(|| async { "Welcome to the BizGrow Backend API" }))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Try different ports
    let mut port = 9500;
    let max_tries = 5;
    for attempt in 1..=max_tries {
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        match axum::Server::try_bind(&addr) {
            Ok(server) => {
                info!("Server started at http://localhost:{}", port);
                info!("API documentation: http://localhost:{}/docs", port);
                return server
                    .serve(app.into_make_service())
                    .await
                    .map_err(|e| e.into());
            }
            Err(_) => {
                if attempt == max_tries {
                    return Err("Failed to bind to any port".into());
                }
                port += 1;
            }
        }
    }

    Err("Failed to bind to any port".into())
}
