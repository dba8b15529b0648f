// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use birdlg_config::FrontendConfig;
use birdlg_fanout::{FanoutAggregator, NodeDirectory};

#[derive(Clone)]
pub struct AppState {
	pub aggregator: FanoutAggregator,
}

impl AppState {
	pub fn new(aggregator: FanoutAggregator) -> Self {
		Self { aggregator }
	}

	/// Configured nodes, in configuration order.
	pub fn nodes(&self) -> &[String] {
		self.aggregator.directory().nodes()
	}
}

pub fn create_app_state(config: &FrontendConfig) -> AppState {
	let directory = NodeDirectory::new(
		config.servers.clone(),
		config.domain.clone(),
		config.proxy_port,
	);
	AppState::new(FanoutAggregator::new(directory, config.timeout))
}
