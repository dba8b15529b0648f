// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fan a looking-glass command out to many node proxies and collect the
//! answers in request order.

pub mod aggregator;
pub mod directory;
pub mod error;
pub mod relay;

pub use aggregator::{FanoutAggregator, EMPTY_RESPONSE, INVALID_SERVER};
pub use directory::NodeDirectory;
pub use error::{RelayError, Result};
pub use relay::RelayResponse;
