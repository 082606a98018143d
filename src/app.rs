use std::sync::Arc;

use axum::routing::{any, get, post};
use axum::{middleware, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::auth::require_auth;
use crate::services::upstream::UpstreamClient;

/// Shared handler state. The upstream client sits behind a trait object so
/// tests can point it at a stub backend.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn UpstreamClient>,
}

pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(application_routes())
        .merge(category_routes())
        .merge(company_routes())
        .merge(dimension_routes())
        .merge(make_routes())
        .merge(purchase_order_routes())
        .merge(voucher_routes())
        .merge(proxy_routes())
        .layer(middleware::from_fn(require_auth))
        .with_state(state);

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/login", post(handlers::session::login_post))
        // Protected API
        .merge(api)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn application_routes() -> Router<AppState> {
    use handlers::applications;

    Router::new()
        .route(
            "/api/applications",
            get(applications::list).post(applications::create),
        )
        .route(
            "/api/applications/:id",
            get(applications::get)
                .put(applications::update)
                .delete(applications::remove),
        )
}

fn category_routes() -> Router<AppState> {
    use handlers::categories;

    Router::new()
        .route(
            "/api/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/api/categories/:id",
            get(categories::get)
                .put(categories::update)
                .delete(categories::remove),
        )
}

fn company_routes() -> Router<AppState> {
    use handlers::companies;

    Router::new()
        .route("/api/companies", get(companies::list).post(companies::create))
        .route(
            "/api/companies/:id",
            get(companies::get)
                .put(companies::update)
                .delete(companies::remove),
        )
}

fn dimension_routes() -> Router<AppState> {
    use handlers::dimensions;

    Router::new()
        .route(
            "/api/dimensions",
            get(dimensions::list).post(dimensions::create),
        )
        .route(
            "/api/dimensions/:id",
            get(dimensions::get)
                .put(dimensions::update)
                .delete(dimensions::remove),
        )
}

fn make_routes() -> Router<AppState> {
    use handlers::makes;

    Router::new()
        .route("/api/makes", get(makes::list).post(makes::create))
        .route(
            "/api/makes/:id",
            get(makes::get).put(makes::update).delete(makes::remove),
        )
}

fn purchase_order_routes() -> Router<AppState> {
    use handlers::purchase_orders;

    Router::new()
        .route(
            "/api/purchase-orders",
            get(purchase_orders::list).post(purchase_orders::create),
        )
        // Numbering is owned by the upstream service; the static segment
        // takes priority over :id
        .route(
            "/api/purchase-orders/next-number",
            get(handlers::proxy::purchase_order_next_number),
        )
        .route(
            "/api/purchase-orders/:id",
            get(purchase_orders::get)
                .put(purchase_orders::update)
                .delete(purchase_orders::remove),
        )
}

fn voucher_routes() -> Router<AppState> {
    use handlers::vouchers;

    Router::new()
        .route("/api/vouchers", get(vouchers::list).post(vouchers::create))
        .route(
            "/api/vouchers/clear-post-dated",
            post(handlers::proxy::voucher_clear_post_dated),
        )
        .route(
            "/api/vouchers/:id",
            get(vouchers::get).put(vouchers::update).delete(vouchers::remove),
        )
}

fn proxy_routes() -> Router<AppState> {
    use handlers::proxy;

    Router::new()
        // Brands and models are owned wholesale by the upstream service
        .route("/api/brands", any(proxy::brands_collection))
        .route("/api/brands/:id", any(proxy::brands_record))
        .route("/api/models", any(proxy::models_collection))
        .route("/api/models/:id", any(proxy::models_record))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Inventory API",
        "version": version,
        "description": "Inventory management REST API built with Rust (Axum)",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "login": "/auth/login (public - token acquisition)",
            "applications": "/api/applications[/:id] (protected)",
            "categories": "/api/categories[/:id] (protected)",
            "companies": "/api/companies[/:id] (protected)",
            "dimensions": "/api/dimensions[/:id] (protected)",
            "makes": "/api/makes[/:id] (protected)",
            "purchase_orders": "/api/purchase-orders[/:id] (protected)",
            "vouchers": "/api/vouchers[/:id] (protected)",
            "brands": "/api/brands[/:id] (protected, proxied upstream)",
            "models": "/api/models[/:id] (protected, proxied upstream)",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
