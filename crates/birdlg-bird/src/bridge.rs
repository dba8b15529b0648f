// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::error::Result;
use crate::session::ControlSession;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWrite;
use tracing::{info, instrument};

/// Runs read-only commands against the daemon, one session per call.
///
/// Sessions are never shared, so concurrent queries each get their own
/// connection to the control socket.
#[derive(Debug, Clone)]
pub struct QueryBridge {
	socket_path: PathBuf,
}

impl QueryBridge {
	pub fn new(socket_path: impl Into<PathBuf>) -> Self {
		Self {
			socket_path: socket_path.into(),
		}
	}

	pub fn socket_path(&self) -> &Path {
		&self.socket_path
	}

	/// Run `command` in a restricted session and stream the formatted reply
	/// into `out`.
	#[instrument(skip(self, out), fields(socket = %self.socket_path.display()))]
	pub async fn query<W>(&self, command: &str, out: &mut W) -> Result<()>
	where
		W: AsyncWrite + Unpin,
	{
		let mut session = ControlSession::open(&self.socket_path).await?;
		session.run_query(command, out).await
	}

	/// Collect the whole reply before returning it. A daemon that fails
	/// partway yields an error rather than a truncated reply, so HTTP callers
	/// can still answer with an error status.
	pub async fn query_to_string(&self, command: &str) -> Result<String> {
		let mut out = Vec::new();
		self.query(command, &mut out).await?;
		Ok(String::from_utf8_lossy(&out).into_owned())
	}

	/// Ask the daemon to reload its configuration. This is an operator
	/// action, so the session is not restricted.
	#[instrument(skip(self), fields(socket = %self.socket_path.display()))]
	pub async fn reconfigure(&self) -> Result<()> {
		let mut session = ControlSession::open(&self.socket_path).await?;
		session.reconfigure().await?;
		info!("daemon reconfigured");
		Ok(())
	}
}
