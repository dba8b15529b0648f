// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reply line framing.

use std::fmt;

/// Longest line accepted from the daemon, newline included.
pub const MAX_LINE_LEN: usize = 1024;

/// Four digit BIRD status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplyCode(u16);

impl ReplyCode {
	pub fn new(value: u16) -> Option<Self> {
		(value <= 9999).then_some(Self(value))
	}

	pub fn value(self) -> u16 {
		self.0
	}

	pub fn first_digit(self) -> u16 {
		self.0 / 1000
	}

	/// No more lines follow a reply carrying this code.
	pub fn is_terminal(self) -> bool {
		matches!(self.first_digit(), 0 | 8 | 9)
	}

	/// 8xxx are runtime errors, 9xxx are parse errors.
	pub fn is_error(self) -> bool {
		matches!(self.first_digit(), 8 | 9)
	}
}

impl fmt::Display for ReplyCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:04}", self.0)
	}
}

/// One line read from the control socket with its framing removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyLine {
	code: Option<ReplyCode>,
	separator: Option<u8>,
	text: String,
}

impl ReplyLine {
	/// Parse a raw line as read from the socket, trailing newline included.
	///
	/// A line carries a status code when it has at least five bytes before the
	/// newline and the first four are ASCII digits; the code and the separator
	/// byte after it are stripped; the separator is kept for
	/// [`ReplyLine::is_continued`]. Any other line is a continuation and only a
	/// leading space marker is stripped.
	pub fn parse(raw: &[u8]) -> Self {
		let body_len = raw.strip_suffix(b"\n").map_or(raw.len(), <[u8]>::len);

		if body_len > 4 && raw[..4].iter().all(u8::is_ascii_digit) {
			let value = raw[..4]
				.iter()
				.fold(0u16, |acc, digit| acc * 10 + u16::from(digit - b'0'));
			return Self {
				code: Some(ReplyCode(value)),
				separator: Some(raw[4]),
				text: String::from_utf8_lossy(&raw[5..]).into_owned(),
			};
		}

		let rest = raw.strip_prefix(b" ").unwrap_or(raw);
		Self {
			code: None,
			separator: None,
			text: String::from_utf8_lossy(rest).into_owned(),
		}
	}

	pub fn code(&self) -> Option<ReplyCode> {
		self.code
	}

	/// Text after the framing, trailing newline included.
	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn is_terminal(&self) -> bool {
		self.code.is_some_and(ReplyCode::is_terminal)
	}

	pub fn is_error(&self) -> bool {
		self.code.is_some_and(ReplyCode::is_error)
	}

	/// `-` after the code: the same reply goes on with the next line, as in
	/// `0002-Reading configuration from ...`.
	pub fn is_continued(&self) -> bool {
		self.separator == Some(b'-')
	}

	/// Text that should reach the caller, if any.
	///
	/// Coded lines with nothing after the separator carry no output.
	/// Continuation lines are always forwarded, blank ones included.
	pub fn payload(&self) -> Option<&str> {
		match self.code {
			Some(_) if self.text.trim_end_matches('\n').is_empty() => None,
			_ => Some(&self.text),
		}
	}
}
