// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC GlobalId generation
//!
//! IFC stores a 128-bit GUID as 22 characters of a custom base-64 alphabet:
//! the first character carries the top 2 bits, the remaining 21 carry 6 bits
//! each.

use uuid::Uuid;

const ALPHABET: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_$";

/// Length of a compressed GlobalId
pub const GLOBAL_ID_LEN: usize = 22;

/// Generate a fresh random GlobalId
pub fn new_global_id() -> String {
    compress(Uuid::new_v4().as_u128())
}

/// Compress a 128-bit value into the 22-character IFC form
pub fn compress(value: u128) -> String {
    let mut out = String::with_capacity(GLOBAL_ID_LEN);
    out.push(ALPHABET[((value >> 126) & 0x3) as usize] as char);
    for i in 1..GLOBAL_ID_LEN {
        let shift = 126 - 6 * i;
        out.push(ALPHABET[((value >> shift) & 0x3F) as usize] as char);
    }
    out
}

/// Expand a 22-character GlobalId back into its 128-bit value
pub fn expand(global_id: &str) -> Option<u128> {
    if global_id.len() != GLOBAL_ID_LEN {
        return None;
    }
    let mut value: u128 = 0;
    for (i, c) in global_id.bytes().enumerate() {
        let digit = ALPHABET.iter().position(|&a| a == c)? as u128;
        if i == 0 && digit > 3 {
            return None;
        }
        value = (value << if i == 0 { 0 } else { 6 }) | digit;
    }
    Some(value)
}
