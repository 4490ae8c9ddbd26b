// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits implemented by the storage and transport crates.

pub mod store;
pub mod transport;
