// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use super::QueryParams;
use crate::error::{ProxyError, Result};
use crate::state::AppState;
use crate::traceroute::is_valid_target;
use axum::extract::{Query, State};
use tracing::instrument;

/// GET /traceroute?q=<target>
#[instrument(skip_all, fields(target = %params.q))]
pub async fn trace(
	State(state): State<AppState>,
	Query(params): Query<QueryParams>,
) -> Result<String> {
	let target = params.q.trim();
	if !is_valid_target(target) {
		return Err(ProxyError::InvalidRequest);
	}
	Ok(state.tracer.trace(target).await?)
}
