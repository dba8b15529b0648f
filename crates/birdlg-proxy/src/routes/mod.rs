// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod bird;
pub mod peering;
pub mod traceroute;

use crate::access::access_layer;
use crate::error::ProxyError;
use crate::state::AppState;
use axum::{middleware::from_fn_with_state, routing::any, Router};
use serde::Deserialize;

/// `?q=` as sent by the frontend.
#[derive(Debug, Default, Deserialize)]
pub struct QueryParams {
	#[serde(default)]
	pub q: String,
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/bird", any(bird::query))
		.route("/bird6", any(bird::query))
		.route("/traceroute", any(traceroute::trace))
		.route("/traceroute6", any(traceroute::trace))
		.route("/peering", any(peering::peering))
		.fallback(invalid_request)
		.layer(from_fn_with_state(state.clone(), access_layer))
		.with_state(state)
}

async fn invalid_request() -> ProxyError {
	ProxyError::InvalidRequest
}
