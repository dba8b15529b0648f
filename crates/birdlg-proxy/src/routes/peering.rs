// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::error::ProxyError;
use crate::state::AppState;
use axum::{
	body::Bytes,
	extract::State,
	http::{Method, StatusCode},
	response::{IntoResponse, Response},
	Json,
};
use birdlg_peering::PeeringResponse;
use tracing::{instrument, warn};

/// GET /peering returns the masked local document, POST /peering provisions.
pub async fn peering(State(state): State<AppState>, method: Method, body: Bytes) -> Response {
	let Some(engine) = state.peering.as_ref() else {
		return ProxyError::InvalidRequest.into_response();
	};

	match method {
		Method::GET => Json(engine.public_view()).into_response(),
		Method::POST => provision(engine, &body).await,
		_ => ProxyError::InvalidRequest.into_response(),
	}
}

#[instrument(skip_all, fields(len = body.len()))]
async fn provision(engine: &birdlg_peering::ProvisioningEngine, body: &[u8]) -> Response {
	match engine.provision(body).await {
		Ok(files) => Json(PeeringResponse::success(files)).into_response(),
		Err(e) => {
			warn!(error = %e, "peering request failed");
			let status = if e.is_reload() {
				StatusCode::INTERNAL_SERVER_ERROR
			} else {
				StatusCode::OK
			};
			(status, Json(PeeringResponse::failure(e))).into_response()
		}
	}
}
