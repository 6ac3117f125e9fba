use color_eyre::{eyre::eyre, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

/// Sets up `RUST_LOG`-filtered logging and colored error reports for the host application.
/// Call once, early in `main`.
pub fn install() -> Result<()> {
	let filter = EnvFilter::from_default_env().add_directive(LevelFilter::INFO.into());
	fmt()
		.with_env_filter(filter)
		.try_init()
		.map_err(|e| eyre!("failed to install tracing subscriber: {e}"))?;

	color_eyre::install()
}
