// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::sections::{FrontendConfigLayer, LoggingConfigLayer, ProxyConfigLayer};
use serde::{Deserialize, Serialize};

/// One source's view of the configuration file, `[proxy]`, `[frontend]`
/// and `[logging]` tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BirdlgConfigLayer {
	pub proxy: Option<ProxyConfigLayer>,
	pub frontend: Option<FrontendConfigLayer>,
	pub logging: Option<LoggingConfigLayer>,
}

impl BirdlgConfigLayer {
	pub fn merge(&mut self, other: Self) {
		merge_section(&mut self.proxy, other.proxy, ProxyConfigLayer::merge);
		merge_section(&mut self.frontend, other.frontend, FrontendConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_section<T>(base: &mut Option<T>, other: Option<T>, merge: fn(&mut T, T)) {
	match (base.as_mut(), other) {
		(Some(base), Some(other)) => merge(base, other),
		(None, Some(other)) => *base = Some(other),
		(_, None) => {}
	}
}
