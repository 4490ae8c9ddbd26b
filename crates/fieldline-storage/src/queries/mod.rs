// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query operations, one module per table group.

pub mod companies;
pub mod jobs;
pub mod lead_sources;
