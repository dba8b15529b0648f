// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::error::{PeeringConfigError, ProvisionError, Result};
use crate::identifier::validate_peer;
use crate::model::{Endpoint, Peering, PeeringRequest, PointOfPresence};
use crate::port::{derive_port, probe_udp_port};
use crate::template::TemplateSet;
use async_trait::async_trait;
use birdlg_bird::{BirdError, QueryBridge};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// Asks the routing daemon to pick up newly written configuration.
#[async_trait]
pub trait Reloader: Send + Sync {
	async fn reload(&self) -> std::result::Result<(), BirdError>;
}

#[async_trait]
impl Reloader for QueryBridge {
	async fn reload(&self) -> std::result::Result<(), BirdError> {
		self.reconfigure().await
	}
}

/// Wire envelope returned by `POST /peering`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeeringResponse {
	#[serde(rename = "Error")]
	pub error: String,

	#[serde(rename = "Files")]
	pub files: Option<BTreeMap<String, String>>,
}

impl PeeringResponse {
	pub fn success(files: BTreeMap<String, String>) -> Self {
		Self {
			error: String::new(),
			files: Some(files),
		}
	}

	pub fn failure(error: impl fmt::Display) -> Self {
		Self {
			error: error.to_string(),
			files: None,
		}
	}
}

/// Turns peering requests into local configuration files plus the peer's
/// half of the configuration.
pub struct ProvisioningEngine {
	local: Arc<PointOfPresence>,
	stored: Arc<Peering>,
	templates: Arc<TemplateSet>,
	reloader: Arc<dyn Reloader>,
	serialize: Mutex<()>,
}

impl ProvisioningEngine {
	pub fn new(
		stored: Peering,
		templates: TemplateSet,
		reloader: Arc<dyn Reloader>,
	) -> std::result::Result<Self, PeeringConfigError> {
		if Endpoint::parse(&stored.alice.endpoint).is_none() {
			return Err(PeeringConfigError::InvalidEndpoint(stored.alice.endpoint));
		}
		if templates.is_empty() {
			warn!("no peering templates found, requests will only reload the daemon");
		}
		Ok(Self {
			local: Arc::new(stored.alice.clone()),
			stored: Arc::new(stored),
			templates: Arc::new(templates),
			reloader,
			serialize: Mutex::new(()),
		})
	}

	/// The stored configuration with private keys masked.
	pub fn public_view(&self) -> Peering {
		(*self.stored).clone().masked()
	}

	/// Decode and provision a raw request body.
	pub async fn provision(&self, body: &[u8]) -> Result<BTreeMap<String, String>> {
		let request: PeeringRequest = serde_json::from_slice(body)?;
		self.provision_request(request).await
	}

	#[instrument(skip(self, request), fields(peer = %request.bob.name, peer_asn = request.bob.asn))]
	pub async fn provision_request(
		&self,
		request: PeeringRequest,
	) -> Result<BTreeMap<String, String>> {
		let mut local = Peering::resolve(&self.local, request);

		let _guard = self.serialize.lock().await;

		let port = self.assign_port(&mut local)?;
		probe_udp_port(port)
			.await
			.map_err(|source| ProvisionError::PortUnavailable { port, source })?;

		validate_peer(&local.bob)?;

		let peer = local.swapped().masked();
		let templates = Arc::clone(&self.templates);
		let files =
			tokio::task::spawn_blocking(move || templates.render_all(&local, &peer)).await??;

		self.reloader.reload().await.map_err(ProvisionError::Reload)?;

		info!(port, files = files.len(), "peering provisioned");
		Ok(files)
	}

	/// Reuse the stored port or derive one from the peer's ASN, and write it
	/// into the local endpoint.
	fn assign_port(&self, local: &mut Peering) -> Result<u16> {
		let endpoint = Endpoint::parse(&local.alice.endpoint)
			.ok_or_else(|| ProvisionError::InvalidEndpoint(local.alice.endpoint.clone()))?;
		let port = endpoint.port.unwrap_or_else(|| derive_port(local.bob.asn));
		local.alice.endpoint = endpoint.with_port(port).to_string();
		Ok(port)
	}
}
