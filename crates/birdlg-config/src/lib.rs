// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the birdlg proxy and frontend.
//!
//! Layers are merged with precedence defaults < TOML file < environment <
//! command line, then finalized into the resolved config of one binary.
//!
//! # Usage
//!
//! ```ignore
//! use birdlg_config::{load_proxy_config, BirdlgConfigLayer};
//!
//! let config = load_proxy_config(None, BirdlgConfigLayer::default())?;
//! println!("proxy listening on {}", config.proxy.listen);
//! ```

pub mod error;
pub mod layer;
pub mod listen;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::BirdlgConfigLayer;
pub use sections::*;
pub use sources::{
	ConfigSource, DefaultsSource, EnvSource, OverrideSource, Precedence, TomlSource,
};

use std::path::PathBuf;
use tracing::{debug, info};

/// Resolved configuration of the per-node proxy.
#[derive(Debug, Clone)]
pub struct ProxyServiceConfig {
	pub proxy: ProxyConfig,
	pub logging: LoggingConfig,
}

/// Resolved configuration of the frontend.
#[derive(Debug, Clone)]
pub struct FrontendServiceConfig {
	pub frontend: FrontendConfig,
	pub logging: LoggingConfig,
}

/// Merge all sources. `config_path` replaces the system config file.
pub fn load_layers(
	config_path: Option<PathBuf>,
	overrides: BirdlgConfigLayer,
) -> Result<BirdlgConfigLayer, ConfigError> {
	let toml = match config_path {
		Some(path) => TomlSource::new(path),
		None => TomlSource::system(),
	};
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(toml),
		Box::new(EnvSource),
		Box::new(OverrideSource(overrides)),
	];

	sources.sort_by_key(|s| s.precedence());

	let mut merged = BirdlgConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}
	Ok(merged)
}

pub fn load_proxy_config(
	config_path: Option<PathBuf>,
	overrides: BirdlgConfigLayer,
) -> Result<ProxyServiceConfig, ConfigError> {
	finalize_proxy(load_layers(config_path, overrides)?)
}

pub fn load_frontend_config(
	config_path: Option<PathBuf>,
	overrides: BirdlgConfigLayer,
) -> Result<FrontendServiceConfig, ConfigError> {
	finalize_frontend(load_layers(config_path, overrides)?)
}

/// Finalize the proxy half of a merged layer.
pub fn finalize_proxy(layer: BirdlgConfigLayer) -> Result<ProxyServiceConfig, ConfigError> {
	let proxy = layer.proxy.unwrap_or_default().finalize()?;
	let logging = layer.logging.unwrap_or_default().finalize();

	info!(
		listen = %proxy.listen,
		bird_socket = %proxy.bird_socket.display(),
		allowed_ips = proxy.allowed_ips.len(),
		peering_enabled = proxy.peering.is_some(),
		"proxy configuration loaded"
	);

	Ok(ProxyServiceConfig { proxy, logging })
}

/// Finalize the frontend half of a merged layer.
pub fn finalize_frontend(layer: BirdlgConfigLayer) -> Result<FrontendServiceConfig, ConfigError> {
	let frontend = layer.frontend.unwrap_or_default().finalize()?;
	let logging = layer.logging.unwrap_or_default().finalize();

	info!(
		listen = %frontend.listen,
		servers = frontend.servers.len(),
		domain = %frontend.domain,
		proxy_port = frontend.proxy_port,
		"frontend configuration loaded"
	);

	Ok(FrontendServiceConfig { frontend, logging })
}
