//! HTTP route handlers.
//!
//! - **predict**: `POST /predict` scoring endpoint
//! - **static_files**: the SPA bundle served for every other path

pub mod predict;
pub mod static_files;

pub use predict::predict;
pub use static_files::spa_service;
