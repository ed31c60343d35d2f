use serde::{Deserialize, Deserializer};
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AppConfig {
	pub telemetry: TelemetryConfig,
	pub server: ServerConfig,
	#[serde(default)]
	pub static_resources: Vec<StaticResourceConfig>,
}

impl AppConfig {
	/// Loads the embedded defaults, then `config.toml` (if present), then environment variables
	/// prefixed with `DICOM_ARCHIVE`, e.g. `DICOM_ARCHIVE_SERVER__HTTP__PORT=8081`.
	pub fn new() -> Result<Self, config::ConfigError> {
		use config::Config;
		let s = Config::builder()
			.add_source(config::File::from_str(
				include_str!("defaults.toml"),
				config::FileFormat::Toml,
			))
			.add_source(config::File::with_name("config.toml").required(false))
			.add_source(
				config::Environment::with_prefix("DICOM_ARCHIVE")
					.prefix_separator("_")
					.separator("__"),
			)
			.build()?;

		s.try_deserialize()
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TelemetryConfig {
	/// Default log level. `RUST_LOG` takes precedence.
	#[serde(deserialize_with = "deserialize_level")]
	pub level: Level,
	/// Sentry DSN. Error tracking is disabled when unset.
	pub sentry: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
	pub http: HttpServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HttpServerConfig {
	// The interface the server will be listening on
	pub interface: IpAddr,
	pub port: u16,
	pub graceful_shutdown: bool,
	/// In seconds.
	pub request_timeout: u64,
}

/// A directory of the local filesystem exposed below an URI.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StaticResourceConfig {
	pub base_path: String,
	pub root: PathBuf,
	#[serde(default)]
	pub list_directory: bool,
}

fn deserialize_level<'de, D>(deserializer: D) -> Result<Level, D::Error>
where
	D: Deserializer<'de>,
{
	let level = String::deserialize(deserializer)?;
	Level::from_str(&level).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
	use super::*;
	use config::{Config, File, FileFormat};

	fn load(toml: &str) -> Result<AppConfig, config::ConfigError> {
		Config::builder()
			.add_source(File::from_str(include_str!("defaults.toml"), FileFormat::Toml))
			.add_source(File::from_str(toml, FileFormat::Toml))
			.build()?
			.try_deserialize()
	}

	#[test]
	fn defaults() {
		let config = load("").unwrap();
		assert_eq!(config.telemetry.level, Level::INFO);
		assert_eq!(config.telemetry.sentry, None);
		assert_eq!(config.server.http.port, 8080);
		assert!(config.server.http.graceful_shutdown);
		assert!(config.static_resources.is_empty());
	}

	#[test]
	fn static_resources() {
		let config = load(
			r#"
			[telemetry]
			level = "debug"

			[[static-resources]]
			base-path = "/app"
			root = "/var/www"
			list-directory = true

			[[static-resources]]
			base-path = "/docs"
			root = "/usr/share/doc"
			"#,
		)
		.unwrap();

		assert_eq!(config.telemetry.level, Level::DEBUG);
		assert_eq!(config.static_resources.len(), 2);
		assert_eq!(config.static_resources[0].base_path, "/app");
		assert!(config.static_resources[0].list_directory);
		assert_eq!(config.static_resources[1].root, PathBuf::from("/usr/share/doc"));
		assert!(!config.static_resources[1].list_directory);
	}

	#[test]
	fn invalid_level() {
		assert!(load("[telemetry]\nlevel = \"loud\"").is_err());
	}
}
