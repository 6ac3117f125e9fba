//! Shared HTTP client for the Task Mate backend.
//!
//! Every call goes to `$APP_API_URL/api`, carries `Content-Type: application/json`
//! and forwards the backend's cookies. Failures of any kind come back as one
//! [`ApiError`] shape.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod normalizer;
pub mod telemetry;

use std::sync::LazyLock;

pub use crate::{
	client::{ApiClient, ApiRequest},
	config::ClientConfig,
	envelope::ApiResponse,
	error::{ApiError, ApiResult},
};

static API: LazyLock<ApiClient> = LazyLock::new(|| {
	ApiClient::new(&ClientConfig::from_env()).expect("HTTP client backend should initialize")
});

/// The process-wide client, configured from the environment on first use
pub fn api() -> &'static ApiClient {
	&API
}
