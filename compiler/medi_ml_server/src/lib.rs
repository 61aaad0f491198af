//! HTTP front end for `medi_diagnose`
//!
//! Routes:
//! - `GET /health`
//! - `GET /api/symptoms`
//! - `POST /api/predict`

pub mod api;
pub mod config;
pub mod error;

pub use api::{router, AppState};
pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
