// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Outbound HTTP for birdlg. Every request from the frontend to a node proxy
//! goes through a client built here.

mod client;

pub use client::{builder, node_client, user_agent};
