pub mod domain;
pub mod handlers;
pub mod shared;
pub mod system;
pub mod usecases;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, Method};
    use axum::middleware;
    use axum::{
        routing::{delete, get, post},
        Router,
    };
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};

    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config)?;

    shared::data::db::initialize_database(db_path.to_str())
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    // System tables + first-start defaults
    system::initialization::apply_system_migration().await?;
    system::initialization::ensure_admin_user_exists().await?;
    domain::a003_site_settings::service::ensure_default_settings().await?;

    // Permissive CORS; also answers the browser preflight for the public
    // order form and the notify-order function endpoint
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/system/auth/change-password",
            post(system::handlers::auth::change_password)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // PUBLIC STOREFRONT ROUTES
        // ========================================
        .route("/api/products", get(handlers::a001_product::list_available))
        .route("/api/products/:id", get(handlers::a001_product::get_by_id))
        .route(
            "/api/site-settings",
            get(handlers::a003_site_settings::get_settings),
        )
        // Order intake: the only public write
        .route("/api/orders", post(handlers::a002_order::create_order))
        // UseCase u101: order notification function endpoint
        .route(
            "/api/u101/notify-order",
            post(handlers::usecases::u101_notify_order),
        )
        // ========================================
        // ADMIN ROUTES (JWT required)
        // ========================================
        .route(
            "/api/admin/products",
            get(handlers::a001_product::list_all)
                .post(handlers::a001_product::upsert)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/admin/products/:id",
            delete(handlers::a001_product::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/admin/orders",
            get(handlers::a002_order::list_orders)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/admin/orders/:id",
            get(handlers::a002_order::get_order_detail)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/admin/orders/:id/status",
            post(handlers::a002_order::update_status)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/admin/orders/:id/resend-notification",
            post(handlers::a002_order::resend_notification)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/admin/site-settings",
            get(handlers::a003_site_settings::get_settings_admin)
                .post(handlers::a003_site_settings::save_settings)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors);

    let addr: SocketAddr = ([0, 0, 0, 0], config.server.port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", config.server.port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
