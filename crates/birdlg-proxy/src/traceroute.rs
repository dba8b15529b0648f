// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::error::TraceError;
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument};

pub const DEFAULT_TRACE_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs a trace towards a host and returns its printable output.
#[async_trait]
pub trait TraceRunner: Send + Sync {
	async fn trace(&self, target: &str) -> Result<String, TraceError>;
}

/// Runs an external traceroute program with the target as its only argument.
#[derive(Debug, Clone)]
pub struct CommandTracer {
	program: String,
	timeout: Duration,
}

impl CommandTracer {
	pub fn new(program: impl Into<String>) -> Self {
		Self {
			program: program.into(),
			timeout: DEFAULT_TRACE_TIMEOUT,
		}
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}
}

#[async_trait]
impl TraceRunner for CommandTracer {
	#[instrument(skip(self), fields(program = %self.program))]
	async fn trace(&self, target: &str) -> Result<String, TraceError> {
		let run = Command::new(&self.program)
			.arg(target)
			.kill_on_drop(true)
			.output();

		let output = tokio::time::timeout(self.timeout, run)
			.await
			.map_err(|_| TraceError::Timeout(self.timeout))?
			.map_err(|source| TraceError::Spawn {
				program: self.program.clone(),
				source,
			})?;

		if !output.status.success() {
			debug!(status = ?output.status, "traceroute exited unsuccessfully");
		}

		let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
		text.push_str(&String::from_utf8_lossy(&output.stderr));
		Ok(text)
	}
}

/// A host name or address, never an option.
pub fn is_valid_target(target: &str) -> bool {
	!target.is_empty()
		&& target.len() <= 253
		&& !target.starts_with('-')
		&& target
			.bytes()
			.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b':' | b'-' | b'_'))
}
