// SPDX-FileCopyrightText: 2026 Fieldline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Short human-facing job identifiers.

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_LEN: usize = 6;

/// Generate a random job code: 6 characters from a 36-char uppercase
/// alphabet (36^6 ≈ 2.2 billion combinations).
///
/// Collisions are negligible at CRM volumes; the UNIQUE constraint on the
/// jobs table catches the astronomically unlucky case as a storage error.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
