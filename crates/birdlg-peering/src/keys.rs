// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use base64::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Placeholder that replaces private keys in anything handed to a peer.
pub const MASKED_PRIVATE_KEY: &str = "<private key>";

pub const WG_KEY_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum KeyError {
	#[error("invalid base64: {0}")]
	InvalidBase64(#[from] base64::DecodeError),

	#[error("invalid wireguard key size: {0} != {WG_KEY_LEN}")]
	InvalidLength(usize),
}

/// A base64-encoded WireGuard key as it appears in configuration files.
///
/// Deserialization accepts well-formed keys and the mask placeholder.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WgKey(String);

impl WgKey {
	pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
		let raw = BASE64_STANDARD.decode(encoded)?;
		if raw.len() != WG_KEY_LEN {
			return Err(KeyError::InvalidLength(raw.len()));
		}
		Ok(Self(encoded.to_string()))
	}

	pub fn masked() -> Self {
		Self(MASKED_PRIVATE_KEY.to_string())
	}

	pub fn is_masked(&self) -> bool {
		self.0 == MASKED_PRIVATE_KEY
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for WgKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_masked() {
			f.write_str("WgKey(<masked>)")
		} else {
			f.write_str("WgKey(<redacted>)")
		}
	}
}

impl<'de> Deserialize<'de> for WgKey {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let encoded = String::deserialize(deserializer)?;
		if encoded == MASKED_PRIVATE_KEY {
			return Ok(Self::masked());
		}
		Self::from_base64(&encoded).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const KEY: &str = "YWxpY2UtcHJpdmF0ZS1rZXktMDEyMzQ1Njc4OWFiY2Q=";

	#[test]
	fn accepts_32_byte_key() {
		let key = WgKey::from_base64(KEY).unwrap();
		assert_eq!(key.as_str(), KEY);
		assert!(!key.is_masked());
	}

	#[test]
	fn rejects_wrong_length() {
		let err = WgKey::from_base64("c2hvcnQ=").unwrap_err();
		assert!(matches!(err, KeyError::InvalidLength(5)));
	}

	#[test]
	fn rejects_bad_base64() {
		assert!(matches!(
			WgKey::from_base64("not base64!"),
			Err(KeyError::InvalidBase64(_))
		));
	}

	#[test]
	fn deserializes_placeholder_as_masked() {
		let key: WgKey = serde_json::from_str("\"<private key>\"").unwrap();
		assert!(key.is_masked());
	}

	#[test]
	fn debug_never_prints_key() {
		let key = WgKey::from_base64(KEY).unwrap();
		assert!(!format!("{key:?}").contains(KEY));
	}
}
