// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client side of the BIRD control socket.
//!
//! BIRD speaks a line-oriented protocol over a Unix stream socket. Every reply
//! line starts with a four digit status code and a separator, or with a single
//! space when it continues the previous code. This crate provides:
//! - [`ReplyLine`] framing and terminal-line classification
//! - [`ControlSession`], one connection with the `restrict` handshake
//! - [`QueryBridge`], the per-request entry point used by the HTTP layer
//!
//! # Example
//!
//! ```ignore
//! use birdlg_bird::QueryBridge;
//!
//! let bridge = QueryBridge::new("/var/run/bird/bird.ctl");
//! let output = bridge.query_to_string("show protocols").await?;
//! ```

pub mod bridge;
pub mod error;
pub mod line;
pub mod session;

pub use bridge::QueryBridge;
pub use error::{BirdError, Result};
pub use line::{ReplyCode, ReplyLine, MAX_LINE_LEN};
pub use session::{ControlSession, SessionMode, CONFIGURE, RESTRICT};
