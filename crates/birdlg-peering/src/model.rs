// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Peering documents as exchanged with peers and rendered into templates.

use crate::error::PeeringConfigError;
use crate::keys::WgKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::path::Path;

/// One side of a peering session.
///
/// Optional fields serialize as `null` so templates can always reference
/// them; a `null` renders as nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointOfPresence {
	#[serde(default)]
	pub name: String,

	#[serde(default)]
	pub asn: u32,

	/// WireGuard endpoint, `host` or `host:port`.
	#[serde(rename = "wg", default)]
	pub endpoint: String,

	#[serde(rename = "priv", default)]
	pub private_key: Option<WgKey>,

	#[serde(rename = "publ", default)]
	pub public_key: Option<WgKey>,

	#[serde(default)]
	pub ipv4: Option<Ipv4Addr>,

	#[serde(default)]
	pub ipv6: Option<Ipv6Addr>,

	/// Link-local address used for the BGP session over the tunnel.
	#[serde(default)]
	pub link: Option<Ipv6Addr>,

	#[serde(default)]
	pub note: String,

	#[serde(default)]
	pub loc: String,
}

/// BGP community tags describing the link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Communities {
	#[serde(rename = "Latency", default)]
	pub latency: u32,

	#[serde(rename = "Bandwidth", default)]
	pub bandwidth: u32,
}

/// A fully resolved peering, seen from the side named `Alice`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Peering {
	#[serde(rename = "Alice", default)]
	pub alice: PointOfPresence,

	#[serde(rename = "Bob", default)]
	pub bob: PointOfPresence,

	#[serde(flatten)]
	pub communities: Communities,
}

impl Peering {
	/// Read the operator's peering document from disk.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, PeeringConfigError> {
		let path = path.as_ref();
		let content = std::fs::read(path).map_err(|source| PeeringConfigError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		serde_json::from_slice(&content).map_err(|source| PeeringConfigError::Decode {
			path: path.to_path_buf(),
			source,
		})
	}

	/// Resolve an untrusted request against the operator's own POP.
	///
	/// Only `Alice.link` is taken from the request, and only when it is a
	/// link-local unicast address.
	pub fn resolve(trusted: &PointOfPresence, request: PeeringRequest) -> Self {
		let mut alice = trusted.clone();
		if let Some(link) = request.alice.link_local() {
			alice.link = Some(link);
		}
		Self {
			alice,
			bob: request.bob,
			communities: request.communities,
		}
	}

	/// The same peering seen from the other side.
	pub fn swapped(&self) -> Self {
		Self {
			alice: self.bob.clone(),
			bob: self.alice.clone(),
			communities: self.communities,
		}
	}

	/// Replace both private keys with the placeholder.
	pub fn masked(mut self) -> Self {
		self.alice.private_key = Some(WgKey::masked());
		self.bob.private_key = Some(WgKey::masked());
		self
	}
}

/// Body of `POST /peering` as sent by a prospective peer.
#[derive(Debug, Clone, Deserialize)]
pub struct PeeringRequest {
	#[serde(rename = "Alice", default)]
	pub alice: AliceHints,

	#[serde(rename = "Bob")]
	pub bob: PointOfPresence,

	#[serde(flatten)]
	pub communities: Communities,
}

/// The parts of the peer's idea of our POP that we are willing to read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AliceHints {
	#[serde(default)]
	pub link: Option<String>,
}

impl AliceHints {
	pub fn link_local(&self) -> Option<Ipv6Addr> {
		self
			.link
			.as_deref()
			.and_then(|link| link.trim().parse::<Ipv6Addr>().ok())
			.filter(is_link_local_unicast)
	}
}

/// `fe80::/10`
pub fn is_link_local_unicast(addr: &Ipv6Addr) -> bool {
	(addr.segments()[0] & 0xffc0) == 0xfe80
}

/// A WireGuard endpoint split into host and optional port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
	pub host: String,
	pub port: Option<u16>,
}

impl Endpoint {
	/// Accepts `host`, `host:port`, `[v6]`, `[v6]:port` and a bare IPv6
	/// address. Returns `None` for an empty host or an unparsable port.
	pub fn parse(value: &str) -> Option<Self> {
		let value = value.trim();

		if let Some(rest) = value.strip_prefix('[') {
			let (host, tail) = rest.split_once(']')?;
			let port = match tail {
				"" => None,
				tail => Some(parse_port(tail.strip_prefix(':')?)?),
			};
			return Self::new(host, port);
		}

		match value.matches(':').count() {
			0 => Self::new(value, None),
			1 => {
				let (host, port) = value.split_once(':')?;
				Self::new(host, Some(parse_port(port)?))
			}
			_ => Self::new(value, None),
		}
	}

	pub fn with_port(self, port: u16) -> Self {
		Self {
			port: Some(port),
			..self
		}
	}

	fn new(host: &str, port: Option<u16>) -> Option<Self> {
		(!host.is_empty()).then(|| Self {
			host: host.to_string(),
			port,
		})
	}
}

fn parse_port(value: &str) -> Option<u16> {
	value.parse::<u16>().ok().filter(|port| *port != 0)
}

impl fmt::Display for Endpoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.port {
			Some(port) if self.host.contains(':') => write!(f, "[{}]:{port}", self.host),
			Some(port) => write!(f, "{}:{port}", self.host),
			None => f.write_str(&self.host),
		}
	}
}
