//! Background color extraction from `.tmTheme` property lists.
//!
//! Only `settings[0].settings.background` is read. Hex values follow one
//! convention:
//!
//! - `#rgb` shorthand, each digit doubled (`#abc` is `#aabbcc`)
//! - `#rrggbb`
//! - `#rrggbbaa`, alpha trailing; the first six digits are the color and the
//!   alpha pair is ignored
//!
//! The leading `#` is optional. Any other shape is malformed.

use crate::common::{ParseError, SchemeResult};
use crate::lister::ResourceLister;
use crate::model::Rgb;
use plist::Value;
use std::io::Cursor;

/// Loads `id` through the lister and extracts its background color.
pub fn parse_background(lister: &dyn ResourceLister, id: &str) -> SchemeResult<Rgb> {
    let bytes = lister.read_resource(id)?;
    let rgb = parse_background_bytes(&bytes)?;
    Ok(rgb)
}

/// Extracts the background color from raw theme content (XML or binary plist).
pub fn parse_background_bytes(bytes: &[u8]) -> Result<Rgb, ParseError> {
    let plist = Value::from_reader(Cursor::new(bytes))
        .map_err(|e| ParseError::Malformed(format!("not a property list: {e}")))?;

    let root = plist
        .as_dictionary()
        .ok_or_else(|| ParseError::Malformed("root is not a dictionary".to_string()))?;

    let background = root
        .get("settings")
        .and_then(Value::as_array)
        .and_then(|settings| settings.first())
        .and_then(Value::as_dictionary)
        .and_then(|first| first.get("settings"))
        .and_then(Value::as_dictionary)
        .and_then(|global| global.get("background"))
        .ok_or(ParseError::NoBackground)?;

    let hex = background
        .as_string()
        .ok_or_else(|| ParseError::Malformed("background is not a string".to_string()))?;

    parse_hex_color(hex)
}

/// Parses a hex color string per the module convention.
pub fn parse_hex_color(value: &str) -> Result<Rgb, ParseError> {
    let hex = value.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ParseError::Malformed(format!(
            "invalid hex color '{value}'"
        )));
    }

    let channels: [String; 3] = match hex.len() {
        3 => {
            let mut digits = hex.chars().map(|c| c.to_string().repeat(2));
            [
                digits.next().unwrap_or_default(),
                digits.next().unwrap_or_default(),
                digits.next().unwrap_or_default(),
            ]
        }
        6 | 8 => [
            hex[0..2].to_string(),
            hex[2..4].to_string(),
            hex[4..6].to_string(),
        ],
        len => {
            return Err(ParseError::Malformed(format!(
                "hex color '{value}' has {len} digits (expected 3, 6 or 8)"
            )));
        }
    };

    let channel = |digits: &str| {
        u8::from_str_radix(digits, 16)
            .map_err(|e| ParseError::Malformed(format!("invalid channel '{digits}': {e}")))
    };

    Ok(Rgb::new(
        channel(&channels[0])?,
        channel(&channels[1])?,
        channel(&channels[2])?,
    ))
}
