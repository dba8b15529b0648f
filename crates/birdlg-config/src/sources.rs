// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML file, environment and command line.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::error::ConfigError;
use crate::layer::BirdlgConfigLayer;
use crate::listen::split_list;
use crate::sections::{FrontendConfigLayer, LoggingConfigLayer, ProxyConfigLayer};

/// Default location of the shared config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/birdlg/birdlg.toml";

/// Later sources override earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
	CommandLine = 80,
}

/// One place configuration can come from.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<BirdlgConfigLayer, ConfigError>;
}

/// Compiled-in defaults. Every section starts empty and `finalize` fills in
/// the documented defaults.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<BirdlgConfigLayer, ConfigError> {
		Ok(BirdlgConfigLayer::default())
	}
}

/// `birdlg.toml` with `[proxy]`, `[frontend]` and `[logging]` tables.
///
/// The system file is optional. A file named with `--config` must exist.
pub struct TomlSource {
	path: PathBuf,
	required: bool,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: true,
		}
	}

	pub fn system() -> Self {
		Self {
			path: PathBuf::from(SYSTEM_CONFIG_PATH),
			required: false,
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<BirdlgConfigLayer, ConfigError> {
		let content = match std::fs::read_to_string(&self.path) {
			Ok(content) => content,
			Err(e) if e.kind() == ErrorKind::NotFound && !self.required => {
				debug!(path = %self.path.display(), "no config file");
				return Ok(BirdlgConfigLayer::default());
			}
			Err(source) => {
				return Err(ConfigError::FileRead {
					path: self.path.clone(),
					source,
				})
			}
		};

		toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
			path: self.path.clone(),
			source,
		})
	}
}

/// Process environment.
///
/// `BIRD_SOCKET` and `ALLOWED_IPS` keep their historical names; everything
/// else is `BIRDLG_*`. `BIRDLG_LISTEN` applies to whichever binary reads it.
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<BirdlgConfigLayer, ConfigError> {
		let proxy = ProxyConfigLayer {
			bird_socket: env_var("BIRD_SOCKET"),
			listen: env_var("BIRDLG_LISTEN"),
			allowed_ips: env_list("ALLOWED_IPS"),
			peering: env_var("BIRDLG_PEERING"),
			templates: env_var("BIRDLG_TEMPLATES"),
			traceroute_bin: env_var("BIRDLG_TRACEROUTE_BIN"),
		};
		let frontend = FrontendConfigLayer {
			servers: env_list("BIRDLG_SERVERS"),
			domain: env_var("BIRDLG_DOMAIN"),
			proxy_port: env_parse("BIRDLG_PROXY_PORT")?,
			listen: env_var("BIRDLG_LISTEN"),
			timeout_secs: env_parse("BIRDLG_TIMEOUT_SECS")?,
		};
		let logging = LoggingConfigLayer {
			level: env_var("BIRDLG_LOG_LEVEL"),
			json: env_var("BIRDLG_LOG_JSON").map(|v| v == "1" || v.eq_ignore_ascii_case("true")),
		};

		Ok(BirdlgConfigLayer {
			proxy: Some(proxy),
			frontend: Some(frontend),
			logging: Some(logging),
		})
	}
}

/// Command-line flags, already shaped as a layer by the binary.
pub struct OverrideSource(pub BirdlgConfigLayer);

impl ConfigSource for OverrideSource {
	fn name(&self) -> &'static str {
		"command-line"
	}

	fn precedence(&self) -> Precedence {
		Precedence::CommandLine
	}

	fn load(&self) -> Result<BirdlgConfigLayer, ConfigError> {
		Ok(self.0.clone())
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_list(name: &str) -> Option<Vec<String>> {
	env_var(name).map(|v| split_list(&v))
}

fn env_parse<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
	env_var(name)
		.map(|v| {
			v.parse().map_err(|_| ConfigError::InvalidValue {
				key: name.to_string(),
				message: format!("cannot parse '{v}'"),
			})
		})
		.transpose()
}
