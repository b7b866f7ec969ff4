//! Bank marketing prediction service.
//!
//! One process serves both the scoring endpoint and the frontend bundle:
//!
//! ```text
//! -------------------------------------------------------------
//! |                       axum Router                         |
//! |                                                           |
//! |  POST /predict  ->  ClientRecord::from_json               |
//! |                     -> TrainedModel::predict_record       |
//! |                     -> {"prediction", "probability"}      |
//! |                                                           |
//! |  anything else  ->  ServeDir(static_dir)                  |
//! |                     fallback: static_dir/index.html       |
//! -------------------------------------------------------------
//! ```
//!
//! The model is read from disk once in [`run`] and shared read-only by all
//! requests through [`AppState`].

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use anyhow::Context;
use axum::Router;
use axum::routing::post;
use bank_learning::TrainedModel;
use std::path::Path;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;

/// Assemble the router: the prediction route plus the static fallback.
pub fn build_app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/predict", post(routes::predict))
        .fallback_service(routes::spa_service(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Load the model, bind the listener and serve until Ctrl+C or SIGTERM.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let model = TrainedModel::load(&config.model)
        .with_context(|| format!("failed to load model '{}'", config.model.display()))?;
    let model_info = model.get_info();
    info!(
        "Model predicts '{}' from {} input columns ({} encoded features), held-out accuracy {:.4}",
        model_info.target_column,
        model_info.feature_names.len(),
        model_info.n_features_out,
        model_info.accuracy
    );
    debug!("Class labels: {:?}", model_info.class_labels);

    if !config.static_dir.join("index.html").is_file() {
        tracing::warn!(
            "No index.html under {}, non-API paths will return 404",
            config.static_dir.display()
        );
    }

    let app = build_app(AppState::new(model), &config.static_dir);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
