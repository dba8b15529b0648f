// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod peering;
pub mod query;

use crate::state::AppState;
use axum::{routing::get, Router};

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/", get(query::index))
		.route("/redir", get(query::redirect_form))
		.route("/new_peer/{server}", get(peering::fetch).post(peering::submit))
		.route("/{action}/{servers}", get(query::action))
		.route("/{action}/{servers}/{*args}", get(query::action))
		.with_state(state)
}
