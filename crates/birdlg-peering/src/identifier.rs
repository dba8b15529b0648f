// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Checks on peer-supplied strings that end up in file names and daemon
//! configuration.

use crate::error::{ProvisionError, Result};
use crate::model::PointOfPresence;

/// Non-empty and only `[A-Za-z0-9_]`.
pub fn is_identifier(value: &str) -> bool {
	!value.is_empty()
		&& value
			.bytes()
			.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

pub fn validate_peer(bob: &PointOfPresence) -> Result<()> {
	if !is_identifier(&bob.name) {
		return Err(ProvisionError::InvalidIdentifier(format!(
			"name {:?} must match [A-Za-z0-9_]+",
			bob.name
		)));
	}
	if !bob.loc.is_empty() && !is_identifier(&bob.loc) {
		return Err(ProvisionError::InvalidIdentifier(format!(
			"loc {:?} must match [A-Za-z0-9_]+",
			bob.loc
		)));
	}
	Ok(())
}

/// A rendered file name must be one plain path component.
pub fn validate_file_name(name: &str) -> Result<()> {
	let plain = !name.is_empty()
		&& name != "."
		&& name != ".."
		&& !name.contains(['/', '\\', '\0']);
	if plain {
		Ok(())
	} else {
		Err(ProvisionError::InvalidIdentifier(format!(
			"rendered file name {name:?} is not a plain file name"
		)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn peer(name: &str, loc: &str) -> PointOfPresence {
		PointOfPresence {
			name: name.to_string(),
			loc: loc.to_string(),
			..Default::default()
		}
	}

	#[test]
	fn accepts_plain_names() {
		assert!(validate_peer(&peer("KIOUBIT_DN42", "")).is_ok());
		assert!(validate_peer(&peer("peer1", "de_fra")).is_ok());
	}

	#[test]
	fn rejects_bad_names() {
		for name in ["", "../etc", "a b", "peer;reload", "naïve"] {
			assert!(
				matches!(validate_peer(&peer(name, "")), Err(ProvisionError::InvalidIdentifier(_))),
				"name {name:?}"
			);
		}
	}

	#[test]
	fn rejects_bad_loc() {
		assert!(validate_peer(&peer("peer", "fra/1")).is_err());
	}

	#[test]
	fn file_names() {
		assert!(validate_file_name("PEER.conf").is_ok());
		assert!(validate_file_name("wg-peer_1.conf").is_ok());
		for name in ["", ".", "..", "a/b", "..\\x", "a\0b"] {
			assert!(validate_file_name(name).is_err(), "name {name:?}");
		}
	}

	proptest! {
		/// Anything that passes the identifier check is a safe file name.
		#[test]
		fn identifiers_are_safe_file_names(name in "\\PC{0,24}") {
			if is_identifier(&name) {
				prop_assert!(validate_file_name(&name).is_ok());
			}
		}
	}
}
