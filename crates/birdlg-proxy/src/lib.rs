// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-node HTTP proxy in front of the BIRD control socket.

pub mod access;
pub mod error;
pub mod routes;
pub mod state;
pub mod traceroute;

pub use error::{ProxyError, TraceError, INVALID_REQUEST};
pub use routes::create_router;
pub use state::{create_app_state, AppState};
pub use traceroute::{CommandTracer, TraceRunner};
