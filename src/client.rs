use std::time::Duration;

use color_eyre::{eyre::WrapErr, Result};
use http::{header::CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, Method};
use reqwest::{Body, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::{
	config::ClientConfig,
	envelope::ApiResponse,
	error::ApiResult,
	normalizer::{intercept, ReqwestToApiError},
};

/// Client bound to the backend's `/api` root. Cheap to clone, safe to share.
#[derive(Debug, Clone)]
pub struct ApiClient {
	http:     Client,
	base_url: String,
}

impl ApiClient {
	pub fn new(config: &ClientConfig) -> Result<Self> {
		let mut headers = HeaderMap::new();
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

		// The cookie store forwards whatever session cookies the backend hands out
		let http = Client::builder()
			.default_headers(headers)
			.cookie_store(true)
			.build()
			.wrap_err("failed to build HTTP client")?;

		let base_url = config.base_url();
		debug!("API client rooted at {base_url}");
		Ok(Self { http, base_url })
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Absolute URLs are taken as-is, anything else hangs off the base URL
	pub fn resolve(&self, path: &str) -> String {
		if path.is_empty() {
			return self.base_url.clone();
		}
		if is_absolute(path) {
			return path.to_owned();
		}
		format!(
			"{}/{}",
			self.base_url.trim_end_matches('/'),
			path.trim_start_matches('/')
		)
	}

	pub fn request(&self, method: Method, path: &str) -> ApiRequest {
		// Malformed URLs surface from send() as a normalized error
		ApiRequest {
			inner: self.http.request(method, self.resolve(path)),
		}
	}

	pub fn get(&self, path: &str) -> ApiRequest {
		self.request(Method::GET, path)
	}

	pub fn post(&self, path: &str) -> ApiRequest {
		self.request(Method::POST, path)
	}

	pub fn put(&self, path: &str) -> ApiRequest {
		self.request(Method::PUT, path)
	}

	pub fn patch(&self, path: &str) -> ApiRequest {
		self.request(Method::PATCH, path)
	}

	pub fn delete(&self, path: &str) -> ApiRequest {
		self.request(Method::DELETE, path)
	}

	pub fn head(&self, path: &str) -> ApiRequest {
		self.request(Method::HEAD, path)
	}
}

fn is_absolute(path: &str) -> bool {
	let Some((scheme, _)) = path.split_once("://") else {
		return false;
	};
	let mut chars = scheme.chars();
	chars.next().is_some_and(|c| c.is_ascii_alphabetic())
		&& chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// A pending call. Mirrors [`RequestBuilder`], but every outcome passes through the normalizer.
#[derive(Debug)]
pub struct ApiRequest {
	inner: RequestBuilder,
}

impl ApiRequest {
	pub fn header<K, V>(self, key: K, value: V) -> Self
	where
		HeaderName: TryFrom<K>,
		<HeaderName as TryFrom<K>>::Error: Into<http::Error>,
		HeaderValue: TryFrom<V>,
		<HeaderValue as TryFrom<V>>::Error: Into<http::Error>, {
		Self {
			inner: self.inner.header(key, value),
		}
	}

	pub fn query<T: Serialize + ?Sized>(self, query: &T) -> Self {
		Self {
			inner: self.inner.query(query),
		}
	}

	pub fn json<T: Serialize + ?Sized>(self, json: &T) -> Self {
		Self {
			inner: self.inner.json(json),
		}
	}

	pub fn body<T: Into<Body>>(self, body: T) -> Self {
		Self {
			inner: self.inner.body(body),
		}
	}

	pub fn timeout(self, timeout: Duration) -> Self {
		Self {
			inner: self.inner.timeout(timeout),
		}
	}

	pub async fn send(self) -> ApiResult<Response> {
		intercept(self.inner.send().await).await
	}

	pub async fn send_json<T: DeserializeOwned>(self) -> ApiResult<T> {
		self.send().await?.json::<T>().await.convert_err()
	}

	/// Decodes the backend's `{success, message, data, timestamp, status}` wrapper
	pub async fn send_envelope<T: DeserializeOwned>(self) -> ApiResult<ApiResponse<T>> {
		self.send_json().await
	}
}
