// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::traceroute::{CommandTracer, TraceRunner};
use birdlg_bird::QueryBridge;
use birdlg_config::ProxyConfig;
use birdlg_peering::{Peering, PeeringConfigError, ProvisioningEngine, Reloader, TemplateSet};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
	pub bridge: Arc<QueryBridge>,
	/// Present only when a peering document is configured.
	pub peering: Option<Arc<ProvisioningEngine>>,
	pub tracer: Arc<dyn TraceRunner>,
	/// Empty allows everyone.
	pub allowed_ips: Arc<[IpAddr]>,
}

impl AppState {
	pub fn new(bridge: QueryBridge, tracer: Arc<dyn TraceRunner>) -> Self {
		Self {
			bridge: Arc::new(bridge),
			peering: None,
			tracer,
			allowed_ips: Arc::from(Vec::new()),
		}
	}

	pub fn with_peering(mut self, engine: ProvisioningEngine) -> Self {
		self.peering = Some(Arc::new(engine));
		self
	}

	pub fn with_allowed_ips(mut self, allowed_ips: Vec<IpAddr>) -> Self {
		self.allowed_ips = Arc::from(allowed_ips);
		self
	}
}

/// Build the state for a configured proxy. Reads the peering document and
/// templates when peering is enabled.
pub fn create_app_state(config: &ProxyConfig) -> Result<AppState, PeeringConfigError> {
	let bridge = QueryBridge::new(&config.bird_socket);
	let tracer = Arc::new(CommandTracer::new(&config.traceroute_bin));
	let mut state =
		AppState::new(bridge.clone(), tracer).with_allowed_ips(config.allowed_ips.clone());

	if let Some(path) = &config.peering {
		let stored = Peering::load(path)?;
		let templates = TemplateSet::load(&config.templates)?;
		info!(
			peering = %path.display(),
			templates = templates.len(),
			"automated peering enabled"
		);
		let reloader: Arc<dyn Reloader> = Arc::new(bridge);
		state = state.with_peering(ProvisioningEngine::new(stored, templates, reloader)?);
	}

	Ok(state)
}
