// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Phone number normalization into E.164-like form.
//!
//! Lead-source routing matches on exact strings, so every number must pass
//! through here before it touches storage. The normalizer handles
//! North-American 10/11-digit inputs plus numbers that already carry a `+`
//! prefix; anything else is rejected rather than mis-normalized. Non-NANP
//! numbers without a leading `+` are out of scope by design.

use serde::{Deserialize, Serialize};

/// A phone number in E.164-like form: `+` followed by 1-15 digits.
///
/// Can only be obtained through [`PhoneNumber::normalize`], so holding one
/// is proof the number is in canonical, comparable form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize a raw phone string into canonical form.
    ///
    /// Rules, in order:
    /// 1. strip every non-digit character;
    /// 2. exactly 10 digits: domestic number, prefix `+1`;
    /// 3. exactly 11 digits with a leading `1`: prefix `+`;
    /// 4. otherwise, if the raw input starts with `+`: pass through
    ///    unchanged (assumed already international);
    /// 5. otherwise: `None` — the message cannot be attributed by number.
    ///
    /// Idempotent: normalizing an already-normalized number returns it
    /// unchanged.
    pub fn normalize(raw: Option<&str>) -> Option<PhoneNumber> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }

        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.len() == 10 {
            return Some(PhoneNumber(format!("+1{digits}")));
        }
        if digits.len() == 11 && digits.starts_with('1') {
            return Some(PhoneNumber(format!("+{digits}")));
        }
        if raw.starts_with('+') {
            return Some(PhoneNumber(raw.to_string()));
        }
        None
    }

    /// The canonical string form, e.g. `+14075551234`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the canonical string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
