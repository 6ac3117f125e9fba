use http::StatusCode;
use serde::{Deserialize, Serialize};

pub type ApiResult<T> = Result<T, ApiError>;

/// The one error shape every failed call is reduced to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message} (status {status})")]
pub struct ApiError {
	pub message: String,
	pub status:  u16,
}

impl ApiError {
	pub fn new(message: impl Into<String>, status: u16) -> Self {
		Self {
			message: message.into(),
			status,
		}
	}

	/// None when the backend reported a status outside of 100..=999
	pub fn status_code(&self) -> Option<StatusCode> {
		StatusCode::from_u16(self.status).ok()
	}

	pub fn is_client_error(&self) -> bool {
		(400..500).contains(&self.status)
	}

	pub fn is_server_error(&self) -> bool {
		(500..600).contains(&self.status)
	}
}
