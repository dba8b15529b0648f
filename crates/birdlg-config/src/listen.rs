// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Parsing of listen addresses and address lists.

use crate::error::ConfigError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, ToSocketAddrs};

/// Parse a listen address. `:port` binds all interfaces; hostnames are
/// resolved and the first address wins.
pub fn parse_listen(key: &str, value: &str) -> Result<SocketAddr, ConfigError> {
	let invalid = |message: String| ConfigError::InvalidValue {
		key: key.to_string(),
		message,
	};
	let value = value.trim();

	if let Some(port) = value.strip_prefix(':') {
		let port: u16 = port
			.parse()
			.map_err(|_| invalid(format!("invalid port in '{value}'")))?;
		return Ok(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)));
	}

	if let Ok(addr) = value.parse::<SocketAddr>() {
		return Ok(addr);
	}

	value
		.to_socket_addrs()
		.map_err(|e| invalid(format!("cannot resolve '{value}': {e}")))?
		.next()
		.ok_or_else(|| invalid(format!("'{value}' resolved to no address")))
}

/// Parse a comma separated list of IP addresses. Empty entries are skipped.
pub fn parse_ip_list(key: &str, entries: &[String]) -> Result<Vec<IpAddr>, ConfigError> {
	entries
		.iter()
		.map(|entry| entry.trim())
		.filter(|entry| !entry.is_empty())
		.map(|entry| {
			entry.parse().map_err(|_| ConfigError::InvalidValue {
				key: key.to_string(),
				message: format!("invalid IP address '{entry}'"),
			})
		})
		.collect()
}

/// Split a comma separated value into trimmed, non-empty entries.
pub fn split_list(value: &str) -> Vec<String> {
	value
		.split(',')
		.map(|s| s.trim().to_string())
		.filter(|s| !s.is_empty())
		.collect()
}
