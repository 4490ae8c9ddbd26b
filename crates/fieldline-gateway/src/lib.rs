// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for inbound SMS webhooks.
//!
//! The webhook contract is acknowledgement-first: whatever the business
//! outcome (job created, message dropped, no tenant provisioned), the
//! upstream transport gets a well-formed success response so it never
//! retry-storms a malformed request. Only a persistence failure produces a
//! non-success status.

pub mod auth;
pub mod handlers;
pub mod server;

pub use server::{build_router, start_server, GatewayState, ServerConfig};
