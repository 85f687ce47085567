// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Colour conversions between packed integers, hex strings and RGB triples

use ifc_gen_model::ColourRgb;
use thiserror::Error;

/// Malformed colour input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("Invalid hex colour '{0}', expected #RRGGBB")]
    Format(String),
}

/// Packed `0xRRGGBB` to a normalized triple (bits above 24 are ignored)
pub fn int_to_rgb(color: u32) -> ColourRgb {
    ColourRgb::new(
        ((color >> 16) & 0xFF) as f64 / 255.0,
        ((color >> 8) & 0xFF) as f64 / 255.0,
        (color & 0xFF) as f64 / 255.0,
    )
}

/// Normalized triple back to a packed `0xRRGGBB`
pub fn rgb_to_int(rgb: &ColourRgb) -> u32 {
    let [r, g, b] = channels(rgb);
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// `#RRGGBB` (case-insensitive) to a normalized triple
pub fn hex_to_rgb(hex: &str) -> Result<ColourRgb, ColorError> {
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
        .ok_or_else(|| ColorError::Format(hex.to_string()))?;
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| v as f64 / 255.0)
            .map_err(|_| ColorError::Format(hex.to_string()))
    };
    Ok(ColourRgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Normalized triple to upper-case `#RRGGBB`
pub fn rgb_to_hex(rgb: &ColourRgb) -> String {
    let [r, g, b] = channels(rgb);
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

fn channels(rgb: &ColourRgb) -> [u8; 3] {
    [rgb.red, rgb.green, rgb.blue].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_int_to_rgb() {
        let rgb = int_to_rgb(0xC7C7C7);
        assert_relative_eq!(rgb.red, 199.0 / 255.0);
        let rgb = int_to_rgb(0xFF8000);
        assert_relative_eq!(rgb.red, 1.0);
        assert_relative_eq!(rgb.green, 128.0 / 255.0);
        assert_relative_eq!(rgb.blue, 0.0);
    }

    #[test]
    fn test_packed_round_trip() {
        for c in (0..=0xFF_FFFFu32).step_by(0x1_0101) {
            assert_eq!(rgb_to_int(&int_to_rgb(c)), c);
        }
        for c in [0, 1, 0xFF, 0x100, 0xFFFF, 0xC7C7C7, 0xFF_FFFF] {
            assert_eq!(rgb_to_int(&int_to_rgb(c)), c);
        }
    }

    #[test]
    fn test_hex_round_trip_normalizes_case() {
        for hex in ["#cccccc", "#CCCCCC", "#00ff7F", "#000000", "#FfFfFf", "#1a2B3c"] {
            assert_eq!(rgb_to_hex(&hex_to_rgb(hex).unwrap()), hex.to_uppercase());
        }
    }

    #[test]
    fn test_hex_rejects_malformed() {
        for bad in ["CCCCCC", "#CCC", "#CCCCCCC", "#GGGGGG", "", "#"] {
            assert_eq!(hex_to_rgb(bad), Err(ColorError::Format(bad.to_string())));
        }
    }
}
