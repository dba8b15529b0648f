// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BirdError {
	#[error("failed to connect to control socket {}: {source}", path.display())]
	Connection {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("control socket protocol error: {0}")]
	Protocol(String),

	#[error("control socket I/O error: {0}")]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BirdError>;
