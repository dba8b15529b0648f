// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
};
use birdlg_bird::BirdError;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Body of every rejected request.
pub const INVALID_REQUEST: &str = "Invalid Request\n";

#[derive(Debug, Error)]
pub enum TraceError {
	#[error("failed to run {program}: {source}")]
	Spawn {
		program: String,
		#[source]
		source: std::io::Error,
	},

	#[error("traceroute timed out after {0:?}")]
	Timeout(Duration),
}

#[derive(Debug, Error)]
pub enum ProxyError {
	#[error("invalid request")]
	InvalidRequest,

	#[error(transparent)]
	Bird(#[from] BirdError),

	#[error(transparent)]
	Trace(#[from] TraceError),
}

pub type Result<T> = std::result::Result<T, ProxyError>;

impl IntoResponse for ProxyError {
	fn into_response(self) -> Response {
		match self {
			ProxyError::InvalidRequest => {
				(StatusCode::INTERNAL_SERVER_ERROR, INVALID_REQUEST).into_response()
			}
			other => {
				warn!(error = %other, "request failed");
				(StatusCode::INTERNAL_SERVER_ERROR, format!("{other}\n")).into_response()
			}
		}
	}
}
