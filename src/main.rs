mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::routes as auth_routes;
use crate::features::auth::services::{AuthService, TokenService};
use crate::features::categories::{
    routes as categories_routes, seed, CategoriesState, CategoryDeletionService, CategoryService,
    CategoryStatisticsService,
};
use crate::features::content::{routes as content_routes, ContentService};
use crate::features::health::{routes as health_routes, HealthService};
use crate::features::search::{routes as search_routes, SearchIndexService};
use crate::features::series::{routes as series_routes, SeriesService};
use crate::features::tasks::TaskWorker;
use crate::features::users::{routes as users_routes, UserService};
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully (debug={})", config.app.debug);

    // Create database connection pool; an unreachable database is fatal
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Seed the default category set (no-op once any category exists)
    if seed::ensure_default_categories(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Category seeding failed: {}", e))?
    {
        tracing::info!("Default categories seeded");
    }

    // Initialize auth services
    let token_service = Arc::new(TokenService::new(config.auth.clone()));
    let user_service = Arc::new(UserService::new(pool.clone()));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_service),
        Arc::clone(&token_service),
    ));
    tracing::info!("Auth services initialized");

    // Optional bootstrap admin for fresh installations
    if let Some(password) = &config.auth.bootstrap_admin_password {
        if user_service
            .ensure_bootstrap_admin(password)
            .await
            .map_err(|e| anyhow::anyhow!("Bootstrap admin creation failed: {}", e))?
        {
            tracing::info!("Bootstrap admin account created");
        }
    }

    // Initialize Category Services
    let category_service = Arc::new(CategoryService::new(pool.clone()));
    let statistics_service = Arc::new(CategoryStatisticsService::new(pool.clone()));
    let deletion_service = Arc::new(CategoryDeletionService::new(pool.clone()));
    let categories_state = CategoriesState {
        categories: Arc::clone(&category_service),
        statistics: Arc::clone(&statistics_service),
        deletion: Arc::clone(&deletion_service),
    };
    tracing::info!("Category services initialized");

    // Initialize Content Service
    let content_service = Arc::new(ContentService::new(pool.clone()));
    tracing::info!("Content service initialized");

    // Initialize Series Service
    let series_service = Arc::new(SeriesService::new(pool.clone()));
    tracing::info!("Series service initialized");

    // Initialize Search Index Service
    let search_service = Arc::new(SearchIndexService::new(pool.clone()));
    tracing::info!("Search index service initialized");

    // Initialize Health Service
    let health_service = Arc::new(HealthService::new(
        pool.clone(),
        config.app.name.clone(),
        config.app.version.clone(),
    ));
    tracing::info!("Health service initialized");

    // Spawn the background task worker draining the outbox
    let task_worker = TaskWorker::new(
        pool.clone(),
        config.worker.clone(),
        Arc::clone(&statistics_service),
        Arc::clone(&search_service),
    );
    tokio::spawn(async move {
        task_worker.run().await;
    });
    tracing::info!("Background task worker spawned");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require JWT authentication)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes())
        .merge(users_routes::routes(user_service))
        .merge(categories_routes::protected_routes(categories_state.clone()))
        .merge(content_routes::protected_routes(Arc::clone(&content_service)))
        .merge(series_routes::protected_routes(Arc::clone(&series_service)))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&token_service),
            middleware::auth_middleware,
        ));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(auth_routes::public_routes(auth_service))
        .merge(categories_routes::public_routes(categories_state))
        .merge(content_routes::public_routes(
            content_service,
            Arc::clone(&token_service),
        ))
        .merge(series_routes::public_routes(series_service))
        .merge(search_routes::routes(search_service))
        .merge(health_routes::routes(health_service));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Uncaught panics become a generic 500 envelope
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
