// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod frontend;
mod logging;
mod proxy;

pub use frontend::{FrontendConfig, FrontendConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use proxy::{ProxyConfig, ProxyConfigLayer};
