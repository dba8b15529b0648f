// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::command::Action;
use crate::error::Result;
use crate::state::AppState;
use axum::{
	extract::{Path, Query, State},
	http::{header::LOCATION, StatusCode},
	response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

/// `/<action>/<node+node+...>[/<args>]`
#[derive(Debug, Deserialize)]
pub struct ActionPath {
	pub action: String,
	pub servers: String,
	#[serde(default)]
	pub args: String,
}

/// Navigation form fields.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectForm {
	#[serde(default)]
	pub action: String,
	#[serde(default)]
	pub server: String,
	#[serde(default)]
	pub target: String,
}

/// Every configured node's summary.
pub async fn index(State(state): State<AppState>) -> Response {
	found(format!("/summary/{}", state.nodes().join("+")))
}

/// Turn the navigation form into an action URL.
pub async fn redirect_form(Query(form): Query<RedirectForm>) -> Response {
	if form.action == Action::Summary.name() {
		found(format!("/{}/{}", form.action, form.server))
	} else {
		found(format!("/{}/{}/{}", form.action, form.server, form.target))
	}
}

#[instrument(skip_all, fields(action = %path.action, servers = %path.servers))]
pub async fn action(State(state): State<AppState>, Path(path): Path<ActionPath>) -> Result<String> {
	let action: Action = path.action.parse()?;
	let nodes: Vec<String> = path.servers.split('+').map(str::to_string).collect();
	let command = action.command(&path.args);

	let results = state
		.aggregator
		.dispatch(&nodes, action.endpoint(), &command)
		.await;
	Ok(render_sections(&nodes, &command, &results))
}

/// One `<node>: <command>` section per node, separated by a blank line.
pub fn render_sections(nodes: &[String], command: &str, results: &[String]) -> String {
	let mut output = String::new();
	for (node, result) in nodes.iter().zip(results) {
		if !output.is_empty() {
			output.push('\n');
		}
		output.push_str(&format!("{node}: {command}\n"));
		output.push_str(result);
		if !result.ends_with('\n') {
			output.push('\n');
		}
	}
	output
}

fn found(location: String) -> Response {
	(StatusCode::FOUND, [(LOCATION, location)]).into_response()
}
