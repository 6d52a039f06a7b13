mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware, server};
use crate::features::admin::{routes as admin_routes, services::AdminService};
use crate::features::attachments::{routes as attachments_routes, services::AttachmentService};
use crate::features::auth;
use crate::features::auth::routes as auth_routes;
use crate::features::categories::repository::PgCategoryRepository;
use crate::features::categories::{routes as categories_routes, services::CategoryService};
use crate::features::posts::{routes as posts_routes, services::PostService};
use crate::features::roles::routes as roles_routes;
use crate::modules::links::{LinkBuilder, SiteLinkBuilder};
use crate::modules::storage::{FileStore, FileStores, LocalStorage, MinIOClient};
use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
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

    tracing::info!(
        "Configuration loaded (worker_threads={}, pid={})",
        worker_threads,
        std::process::id()
    );

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Initialize auth
    let jwks_client = Arc::new(auth::JwksClient::new(
        &config.auth.issuer,
        config.auth.jwks_cache_ttl,
    ));
    let jwt_validator = Arc::new(auth::JwtValidator::new(
        jwks_client,
        config.auth.issuer.clone(),
        config.auth.audience.clone(),
        config.auth.roles_claim.clone(),
        config.auth.jwt_leeway,
    ));
    tracing::info!(
        "Auth configuration initialized (roles claim: {})",
        config.auth.roles_claim
    );

    // Link builder for every absolute URL handed out by the API
    let links: Arc<dyn LinkBuilder> = Arc::new(
        SiteLinkBuilder::new(config.app.public_url.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize link builder: {}", e))?,
    );
    tracing::info!("Link builder initialized for {}", config.app.public_url);

    // Initialize file stores (local disk always, MinIO when configured)
    let local_store: Arc<dyn FileStore> = Arc::new(LocalStorage::new(&config.storage.local_root));
    let cloud_store: Option<Arc<dyn FileStore>> = match &config.storage.minio {
        Some(minio) => {
            let client = MinIOClient::new(minio)
                .map_err(|e| anyhow::anyhow!("Failed to initialize MinIO client: {}", e))?;
            tracing::info!("MinIO client initialized for bucket: {}", minio.bucket);
            let store: Arc<dyn FileStore> = Arc::new(client);
            Some(store)
        }
        None => {
            tracing::info!("MinIO not configured; cloud attachments are unavailable");
            None
        }
    };
    let file_stores = FileStores::new(local_store, cloud_store);
    tracing::info!(
        "Local storage rooted at {}",
        config.storage.local_root.display()
    );

    // Initialize Category Service
    let category_repository = Arc::new(PgCategoryRepository::new(pool.clone()));
    let category_service = Arc::new(CategoryService::new(
        pool.clone(),
        category_repository,
        Arc::clone(&links),
        config.content.category_max_depth,
    ));
    tracing::info!(
        "Category service initialized (max depth: {})",
        config.content.category_max_depth
    );

    // Initialize Post Service
    let post_service = Arc::new(PostService::new(
        pool.clone(),
        Arc::clone(&category_service),
        Arc::clone(&links),
        config.content.default_page_size,
    ));
    tracing::info!("Post service initialized");

    // Initialize Attachment Service
    let attachment_service = Arc::new(AttachmentService::new(
        pool.clone(),
        file_stores,
        Arc::clone(&links),
        config.storage.default_location,
        config.storage.attachments_container.clone(),
        config.storage.placeholder_path.clone(),
    ));
    tracing::info!("Attachment service initialized");

    // Initialize Admin Service
    let admin_service = Arc::new(AdminService::new(pool.clone()));
    tracing::info!("Admin service initialized");

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
            .layer(from_fn_with_state(
                Arc::new(credentials),
                middleware::basic_auth_middleware,
            ))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require JWT authentication)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes())
        .merge(roles_routes::protected_routes())
        .merge(attachments_routes::protected_routes(Arc::clone(
            &attachment_service,
        )))
        .nest(
            "/api/admin",
            admin_routes::routes(Arc::clone(&admin_service)),
        )
        .route_layer(from_fn_with_state(
            jwt_validator,
            middleware::auth_middleware,
        ));

    // Health check (no auth required)
    let health_route = Router::new()
        .route("/health", axum::routing::get(health_check))
        .with_state(pool.clone());

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(roles_routes::public_routes())
        .merge(categories_routes::routes(category_service))
        .merge(posts_routes::routes(post_service))
        .merge(attachments_routes::public_routes(attachment_service));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
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
    let listener = server::bind_listener(socket_addr)?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Liveness plus database reachability; 503 while the pool cannot reach Postgres
async fn health_check(State(pool): State<PgPool>) -> StatusCode {
    match database::ping(&pool).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
