use anyhow::Context;
use axum::Router;
use storage::{Database, MemoryStore};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod extract;
mod features;
mod routes;
mod state;

use config::Config;
use features::{athletes, categories, training_centers};
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(title = "WorkoutApi"),
    paths(
        routes::health,
        categories::handlers::create_category,
        categories::handlers::list_categories,
        categories::handlers::get_category,
        training_centers::handlers::create_training_center,
        training_centers::handlers::list_training_centers,
        training_centers::handlers::get_training_center,
        athletes::handlers::create_athlete,
        athletes::handlers::list_athletes,
        athletes::handlers::get_athlete,
        athletes::handlers::update_athlete,
        athletes::handlers::delete_athlete,
    ),
    components(
        schemas(
            storage::dto::category::CreateCategoryRequest,
            storage::dto::category::CategoryResponse,
            storage::dto::training_center::CreateTrainingCenterRequest,
            storage::dto::training_center::TrainingCenterResponse,
            storage::dto::athlete::CreateAthleteRequest,
            storage::dto::athlete::UpdateAthleteRequest,
            storage::dto::athlete::AthleteSummaryResponse,
            storage::dto::athlete::AthleteResponse,
            storage::dto::common::NameRef,
            storage::dto::common::PaginationMeta,
        )
    ),
    tags(
        (name = "atletas", description = "Athlete registration and maintenance"),
        (name = "categorias", description = "Athlete categories"),
        (name = "centro_treinamento", description = "Training centers"),
        (name = "health", description = "Liveness probe"),
    )
)]
struct ApiDoc;

async fn connect_store(config: &Config) -> anyhow::Result<AppState> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, using the in-memory store; data is lost on exit");
        return Ok(AppState::new(MemoryStore::new()));
    };

    tracing::info!(
        "Connecting to database at: {}",
        database_url.split('@').next_back().unwrap_or("unknown")
    );
    let db = Database::new(database_url, config.database_max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    Ok(AppState::new(db))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting WorkoutApi");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let state = connect_store(&config).await?;

    let bind_address = config.bind_address();
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    // Docs are matched first; everything else goes to the trailing-slash
    // tolerant API router.
    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(routes::normalize(routes::router(state)));

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/health",
            "/categorias/",
            "/categorias/{id}",
            "/centro_treinamento/",
            "/centro_treinamento/{id}",
            "/atletas/",
            "/atletas/{id}",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }
}
