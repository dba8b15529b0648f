// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
	#[error("unknown server: {0}")]
	UnknownNode(String),

	#[error("invalid node URL: {0}")]
	InvalidUrl(#[from] url::ParseError),

	#[error("request failed: {0}")]
	Request(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, RelayError>;
