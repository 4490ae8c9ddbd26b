// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound SMS transport and the reminder dispatch flow.
//!
//! The transport is the abstract `send(to, body)` capability; the Twilio
//! implementation here is the production one. The reminder sweep is a
//! threshold query plus a loop of sends with no retries — a failed send is
//! logged and picked up again on the next sweep because the job stays
//! unmarked.

pub mod reminders;
pub mod twilio;

pub use twilio::TwilioTransport;
