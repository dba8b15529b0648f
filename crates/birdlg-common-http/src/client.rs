// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Client builder carrying the birdlg User-Agent. Tests use it to pin node
/// names to loopback with `resolve`.
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Client used by the frontend to reach node proxies. `timeout` bounds each
/// request, body included.
pub fn node_client(timeout: Duration) -> Client {
	builder()
		.timeout(timeout)
		.build()
		.expect("failed to build HTTP client")
}

/// `birdlg/<version>`
pub fn user_agent() -> String {
	format!("birdlg/{}", env!("CARGO_PKG_VERSION"))
}
