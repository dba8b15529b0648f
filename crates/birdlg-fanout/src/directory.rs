// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use url::Url;

/// The fixed set of nodes the frontend may talk to and how to reach them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDirectory {
	nodes: Vec<String>,
	domain: String,
	proxy_port: u16,
}

impl NodeDirectory {
	pub fn new(nodes: Vec<String>, domain: impl Into<String>, proxy_port: u16) -> Self {
		Self {
			nodes,
			domain: domain.into(),
			proxy_port,
		}
	}

	/// Nodes in configuration order.
	pub fn nodes(&self) -> &[String] {
		&self.nodes
	}

	pub fn domain(&self) -> &str {
		&self.domain
	}

	pub fn proxy_port(&self) -> u16 {
		self.proxy_port
	}

	pub fn is_allowed(&self, node: &str) -> bool {
		self.nodes.iter().any(|n| n == node)
	}

	/// `<node>.<domain>`, or the node name alone when no domain is set.
	pub fn host(&self, node: &str) -> String {
		if self.domain.is_empty() {
			node.to_string()
		} else {
			format!("{node}.{}", self.domain)
		}
	}

	/// `http://<host>:<port>/<endpoint>`
	pub fn endpoint_url(&self, node: &str, endpoint: &str) -> Result<Url, url::ParseError> {
		Url::parse(&format!(
			"http://{}:{}/{endpoint}",
			self.host(node),
			self.proxy_port
		))
	}

	/// Endpoint URL with the command as the `q` parameter.
	pub fn query_url(
		&self,
		node: &str,
		endpoint: &str,
		command: &str,
	) -> Result<Url, url::ParseError> {
		let mut url = self.endpoint_url(node, endpoint)?;
		url.query_pairs_mut().append_pair("q", command);
		Ok(url)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn directory(domain: &str) -> NodeDirectory {
		NodeDirectory::new(
			vec!["fra1".to_string(), "sjc1".to_string()],
			domain,
			8000,
		)
	}

	#[test]
	fn query_url_encodes_command() {
		let url = directory("lg.example.net")
			.query_url("fra1", "bird", "show route for 172.20.0.0/14 all")
			.unwrap();
		assert_eq!(
			url.as_str(),
			"http://fra1.lg.example.net:8000/bird?q=show+route+for+172.20.0.0%2F14+all"
		);
	}

	#[test]
	fn empty_domain_uses_node_as_host() {
		let url = directory("").endpoint_url("fra1", "peering").unwrap();
		assert_eq!(url.as_str(), "http://fra1:8000/peering");
	}

	#[test]
	fn allow_list_is_exact() {
		let dir = directory("lg.example.net");
		assert!(dir.is_allowed("fra1"));
		assert!(!dir.is_allowed("fra"));
		assert!(!dir.is_allowed("evil.com/x"));
	}

	proptest! {
		/// The proxy sees exactly the command the frontend was given.
		#[test]
		fn query_parses_back(command in "\\PC{0,64}") {
			let url = directory("").query_url("sjc1", "bird", &command).unwrap();
			let (key, value) = url.query_pairs().next().unwrap();
			prop_assert_eq!(key, "q");
			prop_assert_eq!(value, command);
		}
	}
}
