mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::{BackendMode, Config};
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::auth::clients::{HttpMemberDirectory, InMemoryMemberDirectory, MemberDirectory};
use crate::features::auth::{self, routes as auth_routes, AuthLinks, SessionService};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::inquiries::{routes as inquiries_routes, InquiryService};
use crate::features::navigation::{routes as navigation_routes, AppRoute, RouteGate};
use crate::features::profile::{routes as profile_routes, ProfileService};
use crate::features::reports::{
    routes as reports_routes, DraftService, ReportService, SimulatedClassifier,
};
use crate::features::resources::{routes as resources_routes, ResourceService};
use crate::modules::backend::{HttpRecordStore, InMemoryRecordStore, RecordStore};
use crate::shared::constants::DRAFT_SWEEP_INTERVAL_SECS;
use crate::shared::random::{RandomSource, ThreadRandom};
use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
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

    tracing::info!("Configuration loaded successfully");

    // Managed backend: record store + member directory
    let (record_store, member_directory): (Arc<dyn RecordStore>, Arc<dyn MemberDirectory>) =
        match config.backend.mode {
            BackendMode::Http => {
                let store = HttpRecordStore::new(&config.backend)
                    .map_err(|e| anyhow::anyhow!("Failed to create backend client: {}", e))?;
                let members = HttpMemberDirectory::new(&config.backend)
                    .map_err(|e| anyhow::anyhow!("Failed to create member client: {}", e))?;
                tracing::info!("Backend client initialized for {}", config.backend.base_url);
                (Arc::new(store), Arc::new(members))
            }
            BackendMode::Memory => {
                tracing::warn!("BACKEND_MODE=memory: records are kept in memory and lost on restart");
                (
                    Arc::new(InMemoryRecordStore::new()),
                    Arc::new(InMemoryMemberDirectory::new()),
                )
            }
        };

    // Initialize auth
    let jwks_client = Arc::new(auth::JwksClient::new(
        &config.auth.jwks_url,
        config.auth.jwks_cache_ttl,
    ));
    let jwt_validator = Arc::new(auth::JwtValidator::new(
        jwks_client,
        config.auth.issuer.clone(),
        config.auth.audience.clone(),
        config.auth.jwt_leeway,
    ));
    let auth_links = Arc::new(AuthLinks::new(&config.auth, &config.app));
    let session_service = Arc::new(SessionService::new(
        Arc::clone(&member_directory),
        auth_links,
    ));
    tracing::info!("Auth configuration initialized");

    // Simulated parts of the submission pipeline draw from the thread RNG
    let random: Arc<dyn RandomSource> = Arc::new(ThreadRandom);

    // Initialize Report Services
    let report_service = Arc::new(ReportService::new(Arc::clone(&record_store)));
    let classifier = Arc::new(SimulatedClassifier::new(
        config.pipeline.classification_delay,
        Arc::clone(&random),
    ));
    let draft_service = Arc::new(DraftService::new(
        classifier,
        Arc::clone(&random),
        Arc::clone(&report_service),
        config.pipeline.clone(),
    ));
    tracing::info!(
        "Report services initialized (classification delay {:?})",
        config.pipeline.classification_delay
    );

    {
        let draft_service = Arc::clone(&draft_service);
        tokio::spawn(async move {
            draft_service
                .run_expiry_sweep(std::time::Duration::from_secs(DRAFT_SWEEP_INTERVAL_SECS))
                .await;
        });
        tracing::info!(
            "Report draft expiry sweep spawned (ttl {:?}, {} open drafts per member)",
            config.pipeline.draft_ttl,
            config.pipeline.max_open_drafts_per_member
        );
    }

    let resource_service = Arc::new(ResourceService::new(Arc::clone(&record_store)));
    let inquiry_service = Arc::new(InquiryService::new(Arc::clone(&record_store)));
    let dashboard_service = Arc::new(DashboardService::new(
        Arc::clone(&record_store),
        Arc::clone(&random),
        Arc::clone(&session_service),
    ));
    let profile_service = Arc::new(ProfileService::new(Arc::clone(&member_directory)));
    tracing::info!("Feature services initialized");

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

    // Member-only routes, each gated with the access rules of its page
    let gate = |route: AppRoute| RouteGate::new(route, Arc::clone(&session_service));
    let member_routes = Router::new()
        .merge(reports_routes::draft_routes(
            draft_service,
            gate(AppRoute::Report),
        ))
        .merge(dashboard_routes::routes(
            dashboard_service,
            gate(AppRoute::Dashboard),
        ))
        .merge(profile_routes::routes(profile_service, gate(AppRoute::Profile)));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (member context optional)
    let public_routes = Router::new()
        .merge(auth_routes::routes(Arc::clone(&session_service)))
        .merge(navigation_routes::routes(Arc::clone(&session_service)))
        .merge(reports_routes::routes(report_service))
        .merge(resources_routes::routes(resource_service))
        .merge(inquiries_routes::routes(inquiry_service));

    let app = Router::new()
        .merge(member_routes)
        .merge(public_routes)
        // Any bearer token is resolved once, before routing decisions
        .layer(axum::middleware::from_fn_with_state(
            jwt_validator,
            middleware::member_session_middleware,
        ))
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .merge(swagger)
        .merge(health_route)
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
