// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Relay of `/new_peer/<node>` to the node's `/peering`.

use crate::error::Result;
use crate::state::AppState;
use axum::{
	body::Bytes,
	extract::{Path, State},
	http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
	response::{IntoResponse, Response},
};
use birdlg_fanout::RelayResponse;
use tracing::instrument;

#[instrument(skip(state))]
pub async fn fetch(State(state): State<AppState>, Path(server): Path<String>) -> Result<Response> {
	let relayed = state.aggregator.fetch_peering(&server).await?;
	Ok(verbatim(relayed))
}

/// Accepts either a raw JSON body or an HTML form carrying it in `json`.
#[instrument(skip(state, headers, body), fields(len = body.len()))]
pub async fn submit(
	State(state): State<AppState>,
	Path(server): Path<String>,
	headers: HeaderMap,
	body: Bytes,
) -> Result<Response> {
	let payload = peering_payload(&headers, &body);
	let relayed = state.aggregator.submit_peering(&server, payload).await?;
	Ok(verbatim(relayed))
}

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A form without a `json` field relays an empty body, which the node
/// rejects as malformed.
fn peering_payload(headers: &HeaderMap, body: &[u8]) -> Vec<u8> {
	let is_form = headers
		.get(CONTENT_TYPE)
		.and_then(|v| v.to_str().ok())
		.is_some_and(|v| v.starts_with(FORM_CONTENT_TYPE));
	if !is_form {
		return body.to_vec();
	}
	url::form_urlencoded::parse(body)
		.find(|(key, _)| key == "json")
		.map(|(_, value)| value.into_owned().into_bytes())
		.unwrap_or_default()
}

fn verbatim(relayed: RelayResponse) -> Response {
	let status = StatusCode::from_u16(relayed.status).unwrap_or(StatusCode::BAD_GATEWAY);
	(status, [(CONTENT_TYPE, "application/json")], relayed.body).into_response()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn form_headers() -> HeaderMap {
		let mut headers = HeaderMap::new();
		headers.insert(
			CONTENT_TYPE,
			"application/x-www-form-urlencoded; charset=UTF-8".parse().unwrap(),
		);
		headers
	}

	#[test]
	fn raw_body_passes_through() {
		let body = br#"{"Bob":{"name":"PEER"}}"#;
		assert_eq!(peering_payload(&HeaderMap::new(), body), body.to_vec());
	}

	#[test]
	fn form_json_field_is_decoded() {
		let body = b"submit=1&json=%7B%22Bob%22%3A%7B%22name%22%3A%22PEER%22%7D%7D";
		assert_eq!(
			peering_payload(&form_headers(), body),
			br#"{"Bob":{"name":"PEER"}}"#.to_vec()
		);
	}

	#[test]
	fn form_without_json_field_is_empty() {
		assert!(peering_payload(&form_headers(), b"name=PEER").is_empty());
	}
}
