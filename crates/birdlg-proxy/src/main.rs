// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! birdlg-proxy binary.

use birdlg_config::listen::split_list;
use birdlg_config::{BirdlgConfigLayer, LoggingConfig, ProxyConfigLayer};
use birdlg_proxy::{create_app_state, create_router};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Looking-glass proxy for one BIRD node.
#[derive(Parser, Debug)]
#[command(name = "birdlg-proxy", about = "Looking-glass proxy for one BIRD node", version)]
struct Args {
	/// TOML config file (default /etc/birdlg/birdlg.toml)
	#[arg(long)]
	config: Option<PathBuf>,

	/// Socket file for bird (env BIRD_SOCKET)
	#[arg(long)]
	bird: Option<String>,

	/// Listen address (env BIRDLG_LISTEN)
	#[arg(long)]
	listen: Option<String>,

	/// IPs allowed to access this proxy, separated by commas (env ALLOWED_IPS)
	#[arg(long)]
	allowed: Option<String>,

	/// Peering config file; peering is disabled without it (env BIRDLG_PEERING)
	#[arg(long)]
	peering: Option<String>,

	/// Template directory (env BIRDLG_TEMPLATES)
	#[arg(long)]
	templates: Option<String>,

	/// Traceroute program (env BIRDLG_TRACEROUTE_BIN)
	#[arg(long)]
	traceroute_bin: Option<String>,
}

impl Args {
	fn overrides(&self) -> BirdlgConfigLayer {
		BirdlgConfigLayer {
			proxy: Some(ProxyConfigLayer {
				bird_socket: self.bird.clone(),
				listen: self.listen.clone(),
				allowed_ips: self.allowed.as_deref().map(split_list),
				peering: self.peering.clone(),
				templates: self.templates.clone(),
				traceroute_bin: self.traceroute_bin.clone(),
			}),
			..Default::default()
		}
	}
}

fn init_tracing(logging: &LoggingConfig) {
	let registry = tracing_subscriber::registry().with(
		tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| logging.level.clone().into()),
	);
	if logging.json {
		registry.with(tracing_subscriber::fmt::layer().json()).init();
	} else {
		registry.with(tracing_subscriber::fmt::layer()).init();
	}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = birdlg_config::load_proxy_config(args.config.clone(), args.overrides())?;
	init_tracing(&config.logging);

	let state = create_app_state(&config.proxy)?;
	let app = create_router(state).layer(TraceLayer::new_for_http());

	tracing::info!(
		listen = %config.proxy.listen,
		bird_socket = %config.proxy.bird_socket.display(),
		"starting birdlg-proxy"
	);

	let listener = tokio::net::TcpListener::bind(config.proxy.listen).await?;

	tokio::select! {
		result = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("received shutdown signal");
		}
	}

	tracing::info!("proxy shutdown complete");
	Ok(())
}
