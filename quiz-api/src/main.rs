use axum::{
    extract::State,
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use quiz_app::domain::{QuizRequest, QuizResult};
use quiz_app::{AppConfig, AppContext};
use quiz_errors::AppError;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let app = match AppContext::from_config(&config)
        .and_then(|ctx| build_router(ctx, &config.allowed_origin))
    {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Listening on http://{}", config.server_addr);
    tracing::info!("CORS origin: {}", config.allowed_origin);

    let listener = tokio::net::TcpListener::bind(config.server_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped");
}

fn build_router(ctx: AppContext, allowed_origin: &str) -> Result<Router, AppError> {
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .map_err(|e| AppError::Config(format!("Invalid CORS origin {}: {}", allowed_origin, e)))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Ok(Router::new()
        .route("/generate-quiz", post(generate_quiz))
        .route("/health", get(|| async { "ok" }))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx))
}

async fn generate_quiz(
    State(ctx): State<AppContext>,
    Json(request): Json<QuizRequest>,
) -> Result<Json<QuizResult>, AppError> {
    tracing::info!("Quiz requested for {}", request.url);

    match ctx.generate_quiz.execute(&request).await {
        Ok(quiz) => Ok(Json(quiz)),
        Err(e) => {
            if e.is_content_error() {
                tracing::warn!("Content unavailable for {}: {}", request.url, e);
            } else {
                tracing::error!("Quiz generation failed for {}: {}", request.url, e);
            }
            Err(e)
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
