// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! A single connection to the BIRD control socket.

use crate::error::{BirdError, Result};
use crate::line::{ReplyLine, MAX_LINE_LEN};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tracing::{debug, instrument, warn};

/// Downgrades the session to read-only introspection for its lifetime.
pub const RESTRICT: &str = "restrict";

/// Asks the daemon to re-read its configuration.
pub const CONFIGURE: &str = "configure";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
	Unrestricted,
	Restricted,
	Closed,
}

/// One connection, one reader and one writer.
///
/// User commands are only accepted once the session is [`SessionMode::Restricted`].
/// Any I/O or framing failure closes the session; nothing is retried.
pub struct ControlSession<S = UnixStream> {
	stream: BufReader<S>,
	mode: SessionMode,
}

impl ControlSession<UnixStream> {
	#[instrument(skip_all, fields(socket = %path.as_ref().display()))]
	pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let stream = UnixStream::connect(path)
			.await
			.map_err(|source| BirdError::Connection {
				path: path.to_path_buf(),
				source,
			})?;
		debug!("connected to control socket");
		Ok(Self::from_stream(stream))
	}
}

impl<S> ControlSession<S>
where
	S: AsyncRead + AsyncWrite + Unpin,
{
	pub fn from_stream(stream: S) -> Self {
		Self {
			stream: BufReader::new(stream),
			mode: SessionMode::Unrestricted,
		}
	}

	pub fn mode(&self) -> SessionMode {
		self.mode
	}

	/// Read one reply line of at most [`MAX_LINE_LEN`] bytes.
	pub async fn read_line(&mut self) -> Result<ReplyLine> {
		self.ensure_open()?;

		let mut raw = Vec::with_capacity(128);
		let read = (&mut self.stream)
			.take(MAX_LINE_LEN as u64)
			.read_until(b'\n', &mut raw)
			.await;

		if let Err(e) = read {
			self.mode = SessionMode::Closed;
			return Err(e.into());
		}

		if raw.last() != Some(&b'\n') {
			self.mode = SessionMode::Closed;
			let reason = if raw.len() >= MAX_LINE_LEN {
				format!("no newline within {MAX_LINE_LEN} bytes")
			} else if raw.is_empty() {
				"connection closed by daemon".to_string()
			} else {
				"connection closed mid-line".to_string()
			};
			return Err(BirdError::Protocol(reason));
		}

		Ok(ReplyLine::parse(&raw))
	}

	/// Write `text` followed by a newline.
	pub async fn send_line(&mut self, text: &str) -> Result<()> {
		self.ensure_open()?;

		let stream = self.stream.get_mut();
		let result = async {
			stream.write_all(text.as_bytes()).await?;
			stream.write_all(b"\n").await?;
			stream.flush().await
		}
		.await;

		if let Err(e) = result {
			self.mode = SessionMode::Closed;
			return Err(e.into());
		}
		Ok(())
	}

	/// Send `restrict` and consume its single reply line.
	pub async fn restrict(&mut self) -> Result<()> {
		self.send_line(RESTRICT).await?;
		let reply = self.read_line().await?;
		if reply.is_error() {
			self.mode = SessionMode::Closed;
			return Err(BirdError::Protocol(format!(
				"daemon refused restrict: {}",
				reply.text().trim_end()
			)));
		}
		debug!(code = ?reply.code().map(|c| c.value()), "session restricted");
		self.mode = SessionMode::Restricted;
		Ok(())
	}

	/// Send a user command and forward the reply to `out` up to the first
	/// terminal line.
	pub async fn query<W>(&mut self, command: &str, out: &mut W) -> Result<()>
	where
		W: AsyncWrite + Unpin,
	{
		if self.mode != SessionMode::Restricted {
			return Err(BirdError::Protocol(format!(
				"refusing to send command on {:?} session",
				self.mode
			)));
		}

		self.send_line(command).await?;
		loop {
			let line = self.read_line().await?;
			if let Some(text) = line.payload() {
				out.write_all(text.as_bytes()).await?;
			}
			if line.is_terminal() {
				break;
			}
		}
		out.flush().await?;
		Ok(())
	}

	/// Full query sequence on a fresh connection: discard the welcome line,
	/// restrict, then run `command`.
	pub async fn run_query<W>(&mut self, command: &str, out: &mut W) -> Result<()>
	where
		W: AsyncWrite + Unpin,
	{
		self.read_line().await?;
		self.restrict().await?;
		self.query(command, out).await
	}

	/// Discard the welcome line, send `configure` and consume its reply.
	///
	/// BIRD announces `0002-Reading configuration from ...` before the
	/// outcome, so lines are read until a coded line without the `-`
	/// separator. That last line decides success.
	pub async fn reconfigure(&mut self) -> Result<()> {
		self.read_line().await?;
		self.send_line(CONFIGURE).await?;
		let reply = loop {
			let line = self.read_line().await?;
			if line.code().is_some() && !line.is_continued() {
				break line;
			}
			debug!(line = %line.text().trim_end(), "configure progress");
		};
		if reply.is_error() {
			warn!(reply = %reply.text().trim_end(), "daemon rejected configure");
			return Err(BirdError::Protocol(format!(
				"configure failed: {}",
				reply.text().trim_end()
			)));
		}
		Ok(())
	}

	pub fn close(&mut self) {
		self.mode = SessionMode::Closed;
	}

	fn ensure_open(&self) -> Result<()> {
		if self.mode == SessionMode::Closed {
			return Err(BirdError::Protocol("session is closed".to_string()));
		}
		Ok(())
	}
}
