// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use super::QueryParams;
use crate::error::{ProxyError, Result};
use crate::state::AppState;
use axum::extract::{Query, State};
use chrono::{Local, NaiveDate};
use tracing::instrument;

const SHOW_PROTOCOLS: &str = "show protocols";

/// GET /bird?q=<command>
///
/// The reply is buffered: headers are only sent once the daemon has
/// finished, so a failure mid-reply still becomes a 500.
#[instrument(skip_all, fields(command = %params.q))]
pub async fn query(
	State(state): State<AppState>,
	Query(params): Query<QueryParams>,
) -> Result<String> {
	if params.q.is_empty() {
		return Err(ProxyError::InvalidRequest);
	}

	let mut output = state.bridge.query_to_string(&params.q).await?;
	if state.peering.is_some() && params.q == SHOW_PROTOCOLS {
		output.push_str(&peering_form_line(Local::now().date_naive()));
	}
	Ok(output)
}

/// Pseudo protocol row advertising automated peering.
pub fn peering_form_line(date: NaiveDate) -> String {
	format!(
		"new_peer BGP automated open {} Peer with me in a minute!\n",
		date.format("%Y-%m-%d")
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn form_line_uses_iso_date() {
		let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
		assert_eq!(
			peering_form_line(date),
			"new_peer BGP automated open 2024-03-09 Peer with me in a minute!\n"
		);
	}
}
