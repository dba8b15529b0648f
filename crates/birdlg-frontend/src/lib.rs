// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Operator-facing looking glass. Expands URL actions into BIRD commands,
//! fans them out to the node proxies and relays peering requests.

pub mod command;
pub mod error;
pub mod routes;
pub mod state;

pub use command::Action;
pub use error::{FrontendError, Result};
pub use routes::create_router;
pub use state::{create_app_state, AppState};
