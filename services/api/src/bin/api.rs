//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{FileProgressRepository, OpenAiIconAdapter, OpenAiTimeAdapter},
    config::Config,
    engine::Engine,
    error::ApiError,
    web::{
        create_reminder_handler, delete_reminder_handler, get_progress_handler,
        get_reminder_handler, list_reminders_handler, rest::ApiDoc, state::AppState,
        suggest_icon_handler, suggest_time_handler, update_reminder_handler,
    },
};
use async_openai::{config::OpenAIConfig, Client};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use reminder_core::domain::UserProgress;
use reminder_core::ports::ProgressRepository;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Load the Persisted Progress Snapshot ---
    let progress_repo = Arc::new(FileProgressRepository::new(config.progress_path.clone()));
    let progress = match progress_repo.load().await {
        Ok(Some(progress)) => {
            info!(
                "Loaded user progress snapshot: {} XP, {}-day streak",
                progress.xp, progress.current_streak
            );
            progress
        }
        Ok(None) => {
            info!("No progress snapshot found at {:?}, starting fresh", config.progress_path);
            UserProgress::default()
        }
        Err(e) => {
            // Best-effort durability in the other direction too: an unreadable
            // snapshot must not keep the server from starting.
            warn!("Could not load progress snapshot ({e}), starting fresh");
            UserProgress::default()
        }
    };
    let engine = Arc::new(Engine::new(progress_repo.clone(), progress));

    // --- 3. Initialize Suggestion Adapters ---
    let openai_config = match &config.openai_api_key {
        Some(key) => OpenAIConfig::new().with_api_key(key),
        None => {
            warn!("OPENAI_API_KEY not set; suggestion endpoints will serve local fallbacks");
            OpenAIConfig::new()
        }
    };
    let openai_client = Client::with_config(openai_config);

    let icon_adapter = Arc::new(OpenAiIconAdapter::new(
        openai_client.clone(),
        config.suggestion_model.clone(),
    ));
    let time_adapter = Arc::new(OpenAiTimeAdapter::new(
        openai_client.clone(),
        config.suggestion_model.clone(),
    ));

    // --- 4. Build the Shared AppState ---
    let app_state = AppState {
        engine,
        config: config.clone(),
        icon_adapter,
        time_adapter,
    };

    let cors = CorsLayer::new()
        .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    let api_router = Router::new()
        .route(
            "/reminders",
            get(list_reminders_handler).post(create_reminder_handler),
        )
        .route(
            "/reminders/{id}",
            get(get_reminder_handler)
                .put(update_reminder_handler)
                .delete(delete_reminder_handler),
        )
        .route("/progress", get(get_progress_handler))
        .route("/suggestions/icon", post(suggest_icon_handler))
        .route("/suggestions/time", post(suggest_time_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
