// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! birdlg-frontend binary.

use birdlg_config::listen::split_list;
use birdlg_config::{BirdlgConfigLayer, FrontendConfigLayer, LoggingConfig};
use birdlg_frontend::{create_app_state, create_router};
use clap::Parser;
use std::path::PathBuf;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Looking-glass frontend for a set of BIRD nodes.
#[derive(Parser, Debug)]
#[command(name = "birdlg-frontend", about = "Looking-glass frontend for a set of BIRD nodes", version)]
struct Args {
	/// TOML config file (default /etc/birdlg/birdlg.toml)
	#[arg(long)]
	config: Option<PathBuf>,

	/// Node names separated by commas (env BIRDLG_SERVERS)
	#[arg(long)]
	servers: Option<String>,

	/// Domain appended to node names (env BIRDLG_DOMAIN)
	#[arg(long)]
	domain: Option<String>,

	/// Port of the node proxies (env BIRDLG_PROXY_PORT)
	#[arg(long)]
	proxy_port: Option<u16>,

	/// Listen address (env BIRDLG_LISTEN)
	#[arg(long)]
	listen: Option<String>,

	/// Per-node request timeout in seconds (env BIRDLG_TIMEOUT_SECS)
	#[arg(long)]
	timeout_secs: Option<u64>,
}

impl Args {
	fn overrides(&self) -> BirdlgConfigLayer {
		BirdlgConfigLayer {
			frontend: Some(FrontendConfigLayer {
				servers: self.servers.as_deref().map(split_list),
				domain: self.domain.clone(),
				proxy_port: self.proxy_port,
				listen: self.listen.clone(),
				timeout_secs: self.timeout_secs,
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

	dotenvy::dotenv().ok();

	let config = birdlg_config::load_frontend_config(args.config.clone(), args.overrides())?;
	init_tracing(&config.logging);

	let state = create_app_state(&config.frontend);
	let app = create_router(state).layer(TraceLayer::new_for_http());

	tracing::info!(
		listen = %config.frontend.listen,
		servers = ?config.frontend.servers,
		domain = %config.frontend.domain,
		"starting birdlg-frontend"
	);

	let listener = tokio::net::TcpListener::bind(config.frontend.listen).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("received shutdown signal");
		}
	}

	tracing::info!("frontend shutdown complete");
	Ok(())
}
