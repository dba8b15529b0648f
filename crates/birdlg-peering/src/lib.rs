// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Automated peering.
//!
//! A prospective peer posts its half of a WireGuard + BGP session. The
//! [`ProvisioningEngine`] merges it with the operator's own POP, renders the
//! operator's templates into local configuration files, renders the same
//! templates from the peer's point of view (private keys masked) for the
//! response, and asks the routing daemon to reload.

pub mod engine;
pub mod error;
pub mod identifier;
pub mod keys;
pub mod model;
pub mod port;
pub mod template;

pub use engine::{PeeringResponse, ProvisioningEngine, Reloader};
pub use error::{PeeringConfigError, ProvisionError, Result, TemplateError};
pub use keys::{KeyError, WgKey, MASKED_PRIVATE_KEY};
pub use model::{Communities, Endpoint, Peering, PeeringRequest, PointOfPresence};
pub use port::derive_port;
pub use template::TemplateSet;
