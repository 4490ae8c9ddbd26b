// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core types, errors, and adapter traits for the Fieldline CRM service.
//!
//! Fieldline turns inbound SMS/call events into attributed Job records for
//! the owning tenant. This crate holds the shared vocabulary: the error
//! type, the domain records, phone normalization, and the traits the
//! storage and transport crates implement.

pub mod error;
pub mod phone;
pub mod traits;
pub mod types;

pub use error::FieldlineError;
pub use phone::PhoneNumber;
pub use traits::store::Store;
pub use traits::transport::SmsTransport;
