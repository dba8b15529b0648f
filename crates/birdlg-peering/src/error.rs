// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use birdlg_bird::BirdError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while handling one peering request.
#[derive(Debug, Error)]
pub enum ProvisionError {
	#[error("invalid peering request: {0}")]
	Decode(#[from] serde_json::Error),

	#[error("UDP port {port} is unavailable: {source}")]
	PortUnavailable {
		port: u16,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid identifier: {0}")]
	InvalidIdentifier(String),

	#[error("invalid endpoint in local configuration: {0:?}")]
	InvalidEndpoint(String),

	#[error("failed to render template {template}: {source}")]
	TemplateRender {
		template: String,
		#[source]
		source: handlebars::RenderError,
	},

	#[error("failed to write {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("daemon reload failed: {0}")]
	Reload(#[source] BirdError),

	#[error("provisioning task failed: {0}")]
	Task(#[from] tokio::task::JoinError),
}

impl ProvisionError {
	/// Failures that happen after every file was rendered.
	pub fn is_reload(&self) -> bool {
		matches!(self, ProvisionError::Reload(_))
	}
}

/// Failures while loading the template directory.
#[derive(Debug, Error)]
pub enum TemplateError {
	#[error("failed to read template {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse template {}: {source}", path.display())]
	Parse {
		path: PathBuf,
		#[source]
		source: Box<handlebars::TemplateError>,
	},
}

/// Failures while loading the operator's own peering configuration.
#[derive(Debug, Error)]
pub enum PeeringConfigError {
	#[error("failed to read peering config {}: {source}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to decode peering config {}: {source}", path.display())]
	Decode {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("local endpoint {0:?} is not host or host:port")]
	InvalidEndpoint(String),

	#[error(transparent)]
	Templates(#[from] TemplateError),
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
