// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::directory::NodeDirectory;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};
use url::Url;

/// Result text for a node that is not in the directory.
pub const INVALID_SERVER: &str = "request failed: invalid server\n";

/// Result text substituted for an empty answer.
pub const EMPTY_RESPONSE: &str = "node returned empty response, please refresh to try again.";

/// Sends one command to many nodes concurrently.
#[derive(Clone)]
pub struct FanoutAggregator {
	client: Client,
	directory: Arc<NodeDirectory>,
}

impl FanoutAggregator {
	pub fn new(directory: NodeDirectory, timeout: Duration) -> Self {
		Self::with_client(birdlg_common_http::node_client(timeout), directory)
	}

	pub fn with_client(client: Client, directory: NodeDirectory) -> Self {
		Self {
			client,
			directory: Arc::new(directory),
		}
	}

	pub fn directory(&self) -> &NodeDirectory {
		&self.directory
	}

	pub(crate) fn client(&self) -> &Client {
		&self.client
	}

	/// Query every node in `nodes` and return one non-empty string per node,
	/// in the order given. Failures become text in the node's slot.
	#[instrument(skip(self, nodes), fields(nodes = nodes.len()))]
	pub async fn dispatch(&self, nodes: &[String], endpoint: &str, command: &str) -> Vec<String> {
		let (tx, mut rx) = mpsc::channel::<(usize, String)>(nodes.len().max(1));

		for (index, node) in nodes.iter().enumerate() {
			let tx = tx.clone();
			let client = self.client.clone();
			let target = self
				.directory
				.is_allowed(node)
				.then(|| self.directory.query_url(node, endpoint, command));
			let node = node.clone();

			tokio::spawn(async move {
				let text = match target {
					None => {
						warn!(%node, "rejected node outside directory");
						INVALID_SERVER.to_string()
					}
					Some(Err(e)) => format!("request failed: {e}\n"),
					Some(Ok(url)) => fetch(&client, url).await,
				};
				let _ = tx.send((index, text)).await;
			});
		}
		drop(tx);

		let mut results = vec![String::new(); nodes.len()];
		for _ in 0..nodes.len() {
			let Some((index, text)) = rx.recv().await else {
				break;
			};
			results[index] = text;
		}

		for result in &mut results {
			if result.is_empty() {
				*result = EMPTY_RESPONSE.to_string();
			}
		}
		results
	}
}

async fn fetch(client: &Client, url: Url) -> String {
	debug!(%url, "querying node");
	let response = match client.get(url).send().await {
		Ok(response) => response,
		Err(e) => return format!("request failed: {e}\n"),
	};
	match response.text().await {
		Ok(text) => text,
		Err(e) => format!("request failed: {e}\n"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::extract::Query;
	use axum::http::HeaderMap;
	use axum::routing::get;
	use axum::Router;
	use std::collections::HashMap;
	use std::net::SocketAddr;
	use tokio::net::TcpListener;

	/// Answers `<host>: <q>`, slowly for `slow.*`, with nothing for `mute.*`.
	async fn node(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> String {
		let host = headers
			.get("host")
			.and_then(|h| h.to_str().ok())
			.unwrap_or_default()
			.split('.')
			.next()
			.unwrap_or_default()
			.to_string();
		if host == "slow" {
			tokio::time::sleep(Duration::from_millis(200)).await;
		}
		if host == "mute" {
			return String::new();
		}
		format!("{host}: {}\n", params.get("q").cloned().unwrap_or_default())
	}

	async fn spawn_nodes() -> SocketAddr {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		let app = Router::new().route("/bird", get(node));
		tokio::spawn(async move {
			axum::serve(listener, app).await.unwrap();
		});
		addr
	}

	fn aggregator(addr: SocketAddr, nodes: &[&str]) -> FanoutAggregator {
		let mut builder = birdlg_common_http::builder().timeout(Duration::from_secs(5));
		for node in nodes {
			builder = builder.resolve(&format!("{node}.lg.test"), addr);
		}
		// reachable by name, nothing listening there
		let dead: SocketAddr = format!("127.0.0.2:{}", addr.port()).parse().unwrap();
		builder = builder.resolve("dead.lg.test", dead);

		let mut configured: Vec<String> = nodes.iter().map(|n| n.to_string()).collect();
		configured.push("dead".to_string());
		FanoutAggregator::with_client(
			builder.build().unwrap(),
			NodeDirectory::new(configured, "lg.test", addr.port()),
		)
	}

	fn names(nodes: &[&str]) -> Vec<String> {
		nodes.iter().map(|n| n.to_string()).collect()
	}

	#[tokio::test]
	async fn results_keep_request_order() {
		let addr = spawn_nodes().await;
		let agg = aggregator(addr, &["slow", "fast"]);

		let results = agg
			.dispatch(&names(&["slow", "fast"]), "bird", "show protocols")
			.await;
		assert_eq!(results, vec!["slow: show protocols\n", "fast: show protocols\n"]);
	}

	#[tokio::test]
	async fn unknown_node_gets_invalid_server() {
		let addr = spawn_nodes().await;
		let agg = aggregator(addr, &["a", "c"]);

		let results = agg.dispatch(&names(&["a", "b", "c"]), "bird", "show status").await;
		assert_eq!(results.len(), 3);
		assert_eq!(results[0], "a: show status\n");
		assert_eq!(results[1], INVALID_SERVER);
		assert_eq!(results[2], "c: show status\n");
	}

	#[tokio::test]
	async fn transport_error_is_reported_in_slot() {
		let addr = spawn_nodes().await;
		let agg = aggregator(addr, &["a"]);

		let results = agg.dispatch(&names(&["dead", "a"]), "bird", "show status").await;
		assert!(results[0].starts_with("request failed: "), "{}", results[0]);
		assert!(results[0].ends_with('\n'));
		assert_eq!(results[1], "a: show status\n");
	}

	#[tokio::test]
	async fn empty_answer_is_replaced() {
		let addr = spawn_nodes().await;
		let agg = aggregator(addr, &["mute"]);

		let results = agg.dispatch(&names(&["mute"]), "bird", "show status").await;
		assert_eq!(results, vec![EMPTY_RESPONSE]);
	}

	#[tokio::test]
	async fn every_slot_is_filled() {
		let addr = spawn_nodes().await;
		let agg = aggregator(addr, &["a", "slow", "mute"]);

		let nodes = names(&["mute", "dead", "x", "slow", "a", "a"]);
		let results = agg.dispatch(&nodes, "bird", "show status").await;
		assert_eq!(results.len(), nodes.len());
		assert!(results.iter().all(|r| !r.is_empty()));
		assert_eq!(results[4], results[5]);
	}

	#[tokio::test]
	async fn no_nodes_no_results() {
		let addr = spawn_nodes().await;
		let agg = aggregator(addr, &[]);
		assert!(agg.dispatch(&[], "bird", "show status").await.is_empty());
	}
}
