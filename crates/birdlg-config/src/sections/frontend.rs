// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Frontend configuration section.

use crate::error::ConfigError;
use crate::listen::parse_listen;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_FRONTEND_LISTEN: &str = ":5000";
pub const DEFAULT_PROXY_PORT: u16 = 8000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FrontendConfigLayer {
	pub servers: Option<Vec<String>>,
	pub domain: Option<String>,
	pub proxy_port: Option<u16>,
	pub listen: Option<String>,
	pub timeout_secs: Option<u64>,
}

impl FrontendConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.servers.is_some() {
			self.servers = other.servers;
		}
		if other.domain.is_some() {
			self.domain = other.domain;
		}
		if other.proxy_port.is_some() {
			self.proxy_port = other.proxy_port;
		}
		if other.listen.is_some() {
			self.listen = other.listen;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
	}

	pub fn finalize(self) -> Result<FrontendConfig, ConfigError> {
		let servers: Vec<String> = self
			.servers
			.unwrap_or_default()
			.into_iter()
			.map(|s| s.trim().to_string())
			.filter(|s| !s.is_empty())
			.collect();
		if servers.is_empty() {
			return Err(ConfigError::Validation(
				"no servers configured, set BIRDLG_SERVERS or frontend.servers".to_string(),
			));
		}
		if let Some(bad) = servers.iter().find(|s| s.contains(['+', '/'])) {
			return Err(ConfigError::InvalidValue {
				key: "frontend.servers".to_string(),
				message: format!("server name '{bad}' may not contain '+' or '/'"),
			});
		}

		let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
		if timeout_secs == 0 {
			return Err(ConfigError::InvalidValue {
				key: "frontend.timeout_secs".to_string(),
				message: "timeout must be at least one second".to_string(),
			});
		}

		Ok(FrontendConfig {
			servers,
			domain: self.domain.unwrap_or_default(),
			proxy_port: self.proxy_port.unwrap_or(DEFAULT_PROXY_PORT),
			listen: parse_listen(
				"frontend.listen",
				self.listen.as_deref().unwrap_or(DEFAULT_FRONTEND_LISTEN),
			)?,
			timeout: Duration::from_secs(timeout_secs),
		})
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrontendConfig {
	pub servers: Vec<String>,
	pub domain: String,
	pub proxy_port: u16,
	pub listen: SocketAddr,
	pub timeout: Duration,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn with_servers(servers: &[&str]) -> FrontendConfigLayer {
		FrontendConfigLayer {
			servers: Some(servers.iter().map(|s| s.to_string()).collect()),
			..Default::default()
		}
	}

	#[test]
	fn test_default_values() {
		let config = with_servers(&["fra1"]).finalize().unwrap();
		assert_eq!(config.servers, vec!["fra1"]);
		assert_eq!(config.domain, "");
		assert_eq!(config.proxy_port, 8000);
		assert_eq!(config.listen, "0.0.0.0:5000".parse().unwrap());
		assert_eq!(config.timeout, Duration::from_secs(120));
	}

	#[test]
	fn test_servers_required() {
		let err = FrontendConfigLayer::default().finalize().unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));

		let err = with_servers(&["", " "]).finalize().unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}

	#[test]
	fn test_server_names_cannot_split_paths() {
		let err = with_servers(&["fra1+sjc1"]).finalize().unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { .. }));
	}

	#[test]
	fn test_merge_overwrites() {
		let mut base = with_servers(&["fra1"]);
		base.merge(FrontendConfigLayer {
			servers: Some(vec!["sjc1".to_string()]),
			domain: Some("lg.example.net".to_string()),
			..Default::default()
		});
		assert_eq!(base.servers, Some(vec!["sjc1".to_string()]));
		assert_eq!(base.domain.as_deref(), Some("lg.example.net"));
	}

	#[test]
	fn test_deserialize_empty() {
		let layer: FrontendConfigLayer = toml::from_str("").unwrap();
		assert_eq!(layer, FrontendConfigLayer::default());
	}
}
