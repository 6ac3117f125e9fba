use std::env;

use color_eyre::{eyre::WrapErr, Result};
use tracing::warn;
use url::Url;

pub const APP_API_URL_VAR: &str = "APP_API_URL";
pub const API_SUFFIX: &str = "/api";
pub const FALLBACK_APP_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
	app_url: Url,
}

impl ClientConfig {
	pub fn new(app_url: &str) -> Result<Self> {
		let app_url = Url::parse(app_url).wrap_err_with(|| format!("invalid application URL {app_url:?}"))?;
		Ok(Self { app_url })
	}

	/// Reads [`APP_API_URL_VAR`] once, falling back to [`FALLBACK_APP_URL`] so that construction never fails
	pub fn from_env() -> Self {
		Self::from_value(env::var(APP_API_URL_VAR).ok().as_deref())
	}

	fn from_value(value: Option<&str>) -> Self {
		match value.map(Self::new) {
			Some(Ok(config)) => config,
			Some(Err(e)) => {
				warn!("{APP_API_URL_VAR} is malformed, using {FALLBACK_APP_URL}: {e:#}");
				Self::fallback()
			},
			None => {
				warn!("{APP_API_URL_VAR} is not set, using {FALLBACK_APP_URL}");
				Self::fallback()
			},
		}
	}

	fn fallback() -> Self {
		Self {
			app_url: Url::parse(FALLBACK_APP_URL).expect("fallback URL is valid"),
		}
	}

	pub fn app_url(&self) -> &Url {
		&self.app_url
	}

	pub fn base_url(&self) -> String {
		format!("{}{API_SUFFIX}", self.app_url.as_str().trim_end_matches('/'))
	}
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self::fallback()
	}
}
