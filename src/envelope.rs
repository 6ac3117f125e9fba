use serde::{Deserialize, Serialize};

/// Wrapper the backend puts around every payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
	#[serde(default)]
	pub success:   bool,
	pub message:   Option<String>,
	pub data:      Option<T>,
	// Server local time, kept verbatim
	pub timestamp: Option<String>,
	pub status:    Option<u16>,
}

impl<T> ApiResponse<T> {
	pub fn into_data(self) -> Option<T> {
		self.data
	}
}
