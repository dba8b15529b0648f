// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Source address allow-list.

use crate::error::ProxyError;
use crate::state::AppState;
use axum::{
	extract::{ConnectInfo, Request, State},
	middleware::Next,
	response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use tracing::debug;

/// Reject requests from addresses outside the configured allow-list.
/// IPv4-mapped IPv6 peers are compared as IPv4.
pub async fn access_layer(
	State(state): State<AppState>,
	ConnectInfo(peer): ConnectInfo<SocketAddr>,
	request: Request,
	next: Next,
) -> Response {
	if state.allowed_ips.is_empty() {
		return next.run(request).await;
	}

	let ip = peer.ip().to_canonical();
	if state.allowed_ips.contains(&ip) {
		next.run(request).await
	} else {
		debug!(%ip, path = %request.uri().path(), "rejected request from address outside allow-list");
		ProxyError::InvalidRequest.into_response()
	}
}
