// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-node proxy configuration section.

use crate::error::ConfigError;
use crate::listen::{parse_ip_list, parse_listen};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_BIRD_SOCKET: &str = "/var/run/bird/bird.ctl";
pub const DEFAULT_PROXY_LISTEN: &str = ":8000";
pub const DEFAULT_TEMPLATES: &str = "templates";
pub const DEFAULT_TRACEROUTE_BIN: &str = "traceroute";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProxyConfigLayer {
	pub bird_socket: Option<String>,
	pub listen: Option<String>,
	pub allowed_ips: Option<Vec<String>>,
	pub peering: Option<String>,
	pub templates: Option<String>,
	pub traceroute_bin: Option<String>,
}

impl ProxyConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.bird_socket.is_some() {
			self.bird_socket = other.bird_socket;
		}
		if other.listen.is_some() {
			self.listen = other.listen;
		}
		if other.allowed_ips.is_some() {
			self.allowed_ips = other.allowed_ips;
		}
		if other.peering.is_some() {
			self.peering = other.peering;
		}
		if other.templates.is_some() {
			self.templates = other.templates;
		}
		if other.traceroute_bin.is_some() {
			self.traceroute_bin = other.traceroute_bin;
		}
	}

	pub fn finalize(self) -> Result<ProxyConfig, ConfigError> {
		let listen = parse_listen(
			"proxy.listen",
			self.listen.as_deref().unwrap_or(DEFAULT_PROXY_LISTEN),
		)?;
		let allowed_ips = parse_ip_list("proxy.allowed_ips", &self.allowed_ips.unwrap_or_default())?;

		Ok(ProxyConfig {
			bird_socket: PathBuf::from(
				self
					.bird_socket
					.unwrap_or_else(|| DEFAULT_BIRD_SOCKET.to_string()),
			),
			listen,
			allowed_ips,
			peering: self.peering.filter(|p| !p.is_empty()).map(PathBuf::from),
			templates: PathBuf::from(self.templates.unwrap_or_else(|| DEFAULT_TEMPLATES.to_string())),
			traceroute_bin: self
				.traceroute_bin
				.unwrap_or_else(|| DEFAULT_TRACEROUTE_BIN.to_string()),
		})
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProxyConfig {
	pub bird_socket: PathBuf,
	pub listen: SocketAddr,
	/// Empty means every source address is allowed.
	pub allowed_ips: Vec<IpAddr>,
	/// Peering document; peering is disabled when unset.
	pub peering: Option<PathBuf>,
	pub templates: PathBuf,
	pub traceroute_bin: String,
}
