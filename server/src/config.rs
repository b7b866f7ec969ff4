//! Command-line configuration of the prediction service.
//!
//! Every flag has a default, so `bank-server` with no arguments serves
//! `bank_marketing_model.json` and `frontend/dist` on `127.0.0.1:5000`.

use bank_learning::DEFAULT_MODEL_PATH;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about = "Serve term-deposit predictions over HTTP",
    long_about = "Loads a model written by bank-train and answers POST /predict. \
                  Any other path is served from the static bundle, falling back \
                  to its index.html."
)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 5000)]
    pub port: u16,

    /// Model artifact produced by bank-train
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Root of the prebuilt single-page app
    #[arg(long, default_value = "frontend/dist")]
    pub static_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    /// `host:port` as passed to the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
