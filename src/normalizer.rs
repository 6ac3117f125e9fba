use reqwest::Response;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

pub const FALLBACK_STATUS: u16 = 500;

/// Everything known about a call that did not succeed
#[derive(Debug, Clone, Default)]
pub struct Failure {
	/// Message of the underlying transport or HTTP error
	pub message:  String,
	/// None when no response was received at all
	pub response: Option<FailedResponse>,
}

#[derive(Debug, Clone, Default)]
pub struct FailedResponse {
	pub status: u16,
	pub body:   Vec<u8>,
}

impl Failure {
	pub fn transport(message: impl Into<String>) -> Self {
		Self {
			message:  message.into(),
			response: None,
		}
	}

	pub fn http(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self {
			message:  format!("Request failed with status code {status}"),
			response: Some(FailedResponse {
				status,
				body: body.into(),
			}),
		}
	}
}

impl From<&reqwest::Error> for Failure {
	fn from(e: &reqwest::Error) -> Self {
		Self {
			message:  e.to_string(),
			response: e.status().map(|status| FailedResponse {
				status: status.as_u16(),
				body:   vec![],
			}),
		}
	}
}

/// Message and status the backend put into its error body, if any
#[derive(Debug, Default, PartialEq, Eq)]
struct BodyFields {
	message: Option<String>,
	status:  Option<u16>,
}

impl BodyFields {
	fn parse(body: &[u8]) -> Self {
		let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) else {
			return Self::default();
		};
		Self {
			message: map
				.get("message")
				.and_then(Value::as_str)
				.filter(|m| !m.is_empty())
				.map(ToOwned::to_owned),
			status:  map
				.get("status")
				.and_then(Value::as_u64)
				.and_then(|s| u16::try_from(s).ok())
				.filter(|s| *s != 0),
		}
	}
}

/// Reduces any failure to an [`ApiError`], preferring what the backend said over what the transport saw
pub fn normalize(failure: Failure) -> ApiError {
	let body = failure
		.response
		.as_ref()
		.map(|r| BodyFields::parse(&r.body))
		.unwrap_or_default();
	let http_status = failure.response.as_ref().map(|r| r.status).filter(|s| *s != 0);

	ApiError {
		message: body.message.unwrap_or(failure.message),
		status:  body.status.or(http_status).unwrap_or(FALLBACK_STATUS),
	}
}

/// Runs on every outcome of the shared client. Successes are returned untouched.
pub async fn intercept(outcome: Result<Response, reqwest::Error>) -> ApiResult<Response> {
	let response = match outcome {
		Ok(response) => response,
		Err(e) => return Err(normalize(Failure::from(&e))),
	};

	let status = response.status();
	if status.is_success() {
		return Ok(response);
	}

	// An unreadable body simply contributes nothing
	let body = response.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
	Err(normalize(Failure::http(status.as_u16(), body)))
}

pub trait ReqwestToApiError<T> {
	fn convert_err(self) -> ApiResult<T>;
}

impl<T> ReqwestToApiError<T> for Result<T, reqwest::Error> {
	fn convert_err(self) -> ApiResult<T> {
		self.map_err(|e| normalize(Failure::from(&e)))
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn backend_fields_win() {
		let e = normalize(Failure::http(404, r#"{"message":"not found","status":404}"#));
		assert_eq!(e, ApiError::new("not found", 404));
	}

	#[test]
	fn body_status_beats_http_status() {
		let e = normalize(Failure::http(400, r#"{"success":false,"message":"Validation failed","status":422}"#));
		assert_eq!(e, ApiError::new("Validation failed", 422));
	}

	#[test]
	fn missing_message_uses_underlying_error() {
		let e = normalize(Failure::http(409, r#"{"status":409}"#));
		assert_eq!(e, ApiError::new("Request failed with status code 409", 409));
	}

	#[test]
	fn missing_body_status_uses_http_status() {
		let e = normalize(Failure::http(401, r#"{"message":"User not found"}"#));
		assert_eq!(e, ApiError::new("User not found", 401));
	}

	#[test]
	fn empty_500_body() {
		let e = normalize(Failure::http(500, ""));
		assert_eq!(e, ApiError::new("Request failed with status code 500", 500));
	}

	#[test]
	fn no_response_defaults_to_500() {
		let e = normalize(Failure::transport("timeout of 5000ms exceeded"));
		assert_eq!(e, ApiError::new("timeout of 5000ms exceeded", 500));
	}

	#[test]
	fn empty_and_zero_fields_count_as_absent() {
		let e = normalize(Failure::http(503, r#"{"message":"","status":0}"#));
		assert_eq!(e, ApiError::new("Request failed with status code 503", 503));
	}

	#[test]
	fn mistyped_fields_are_ignored() {
		let e = normalize(Failure::http(502, r#"{"message":{"nested":true},"status":"bad"}"#));
		assert_eq!(e, ApiError::new("Request failed with status code 502", 502));

		let e = normalize(Failure::http(418, r#"{"status":70000}"#));
		assert_eq!(e.status, 418);
	}

	#[test]
	fn non_json_body_is_ignored() {
		let e = normalize(Failure::http(502, "<html>Bad Gateway</html>"));
		assert_eq!(e, ApiError::new("Request failed with status code 502", 502));

		let e = normalize(Failure::http(400, r#"["message"]"#));
		assert_eq!(e.message, "Request failed with status code 400");
	}

	#[test]
	fn body_fields_parse() {
		assert_eq!(
			BodyFields::parse(br#"{"message":"m","status":201}"#),
			BodyFields {
				message: Some("m".into()),
				status:  Some(201),
			}
		);
		assert_eq!(BodyFields::parse(b""), BodyFields::default());
	}
}
