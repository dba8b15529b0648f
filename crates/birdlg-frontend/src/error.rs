// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
};
use birdlg_fanout::RelayError;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum FrontendError {
	#[error("unknown action: {0}")]
	UnknownAction(String),

	#[error(transparent)]
	Relay(#[from] RelayError),
}

pub type Result<T> = std::result::Result<T, FrontendError>;

impl IntoResponse for FrontendError {
	fn into_response(self) -> Response {
		match self {
			FrontendError::UnknownAction(_) | FrontendError::Relay(RelayError::UnknownNode(_)) => {
				(StatusCode::NOT_FOUND, self.to_string()).into_response()
			}
			FrontendError::Relay(e) => {
				warn!(error = %e, "peering relay failed");
				(StatusCode::BAD_GATEWAY, format!("request failed: {e}\n")).into_response()
			}
		}
	}
}
