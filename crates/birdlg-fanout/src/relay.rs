// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Pass-through of peering requests to a node's proxy.

use crate::aggregator::FanoutAggregator;
use crate::error::{RelayError, Result};
use reqwest::header::CONTENT_TYPE;
use tracing::instrument;

/// Status and body exactly as the node answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
	pub status: u16,
	pub body: String,
}

impl FanoutAggregator {
	/// `GET /peering` on `node`.
	#[instrument(skip(self))]
	pub async fn fetch_peering(&self, node: &str) -> Result<RelayResponse> {
		let url = self.peering_url(node)?;
		let response = self.client().get(url).send().await?;
		read(response).await
	}

	/// `POST /peering` on `node` with `body` as JSON.
	#[instrument(skip(self, body), fields(len = body.len()))]
	pub async fn submit_peering(&self, node: &str, body: Vec<u8>) -> Result<RelayResponse> {
		let url = self.peering_url(node)?;
		let response = self
			.client()
			.post(url)
			.header(CONTENT_TYPE, "application/json")
			.body(body)
			.send()
			.await?;
		read(response).await
	}

	fn peering_url(&self, node: &str) -> Result<url::Url> {
		if !self.directory().is_allowed(node) {
			return Err(RelayError::UnknownNode(node.to_string()));
		}
		Ok(self.directory().endpoint_url(node, "peering")?)
	}
}

async fn read(response: reqwest::Response) -> Result<RelayResponse> {
	let status = response.status().as_u16();
	let body = response.text().await?;
	Ok(RelayResponse { status, body })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::directory::NodeDirectory;
	use axum::routing::get;
	use axum::Router;
	use std::time::Duration;
	use tokio::net::TcpListener;

	async fn spawn_node() -> std::net::SocketAddr {
		let app = Router::new().route(
			"/peering",
			get(|| async { r#"{"Alice":{"name":"LG_NODE"}}"# }).post(|body: String| async move {
				(
					axum::http::StatusCode::INTERNAL_SERVER_ERROR,
					format!(r#"{{"Error":"echo {body}","Files":null}}"#),
				)
			}),
		);
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		tokio::spawn(async move {
			axum::serve(listener, app).await.unwrap();
		});
		addr
	}

	fn aggregator(addr: std::net::SocketAddr) -> FanoutAggregator {
		let client = birdlg_common_http::builder()
			.timeout(Duration::from_secs(5))
			.resolve("fra1.lg.test", addr)
			.build()
			.unwrap();
		FanoutAggregator::with_client(
			client,
			NodeDirectory::new(vec!["fra1".to_string()], "lg.test", addr.port()),
		)
	}

	#[tokio::test]
	async fn get_is_relayed_verbatim() {
		let agg = aggregator(spawn_node().await);
		let response = agg.fetch_peering("fra1").await.unwrap();
		assert_eq!(response.status, 200);
		assert_eq!(response.body, r#"{"Alice":{"name":"LG_NODE"}}"#);
	}

	#[tokio::test]
	async fn post_keeps_node_status() {
		let agg = aggregator(spawn_node().await);
		let response = agg.submit_peering("fra1", b"{}".to_vec()).await.unwrap();
		assert_eq!(response.status, 500);
		assert_eq!(response.body, r#"{"Error":"echo {}","Files":null}"#);
	}

	#[tokio::test]
	async fn unknown_node_is_rejected_locally() {
		let agg = aggregator(spawn_node().await);
		let err = agg.fetch_peering("sjc1").await.unwrap_err();
		assert!(matches!(err, RelayError::UnknownNode(ref n) if n == "sjc1"));
		assert_eq!(err.to_string(), "unknown server: sjc1");
	}
}
