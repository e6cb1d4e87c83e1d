use anyhow::Context;
use bookit::logging::init_tracing;
use bookit::router::init_router;
use bookit::state::init_app_state;
use bookit_config::{DatabaseConfig, ServerConfig};
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let server_config = ServerConfig::from_env();
    init_tracing(&server_config.log_dir).context("Failed to initialize logging")?;

    let state = init_app_state(&DatabaseConfig::from_env())
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&state.db)
        .await
        .context("Failed to run migrations")?;

    let app = init_router(state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!("Server running on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", address);
    tracing::info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
