//! Catalog file format parsers.
//!
//! Supported formats:
//! - [`agf`]: Zemax AGF, line-oriented text
//! - [`xml`]: CodeV-style XML glass catalogs
//!
//! Both produce a [`ParsedCatalog`]: the records in file order plus the
//! diagnostics collected on the way. Neither stops at a malformed record.

pub mod agf;
pub mod xml;

use glasscat_optics::Glass;

use crate::diagnostics::Diagnostics;

/// Records and diagnostics read from one catalog file.
#[derive(Debug, Default)]
pub struct ParsedCatalog {
    pub supplier: String,
    pub glasses: Vec<Glass>,
    pub diagnostics: Diagnostics,
}

/// Decode catalog bytes into text.
///
/// Zemax writes AGF files as UTF-16 with a byte-order mark; other tools
/// write UTF-8 or a Latin-1 code page. Invalid UTF-8 sequences are replaced
/// rather than rejected.
pub fn decode_text(bytes: &[u8]) -> String {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8_lossy(rest).into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// Parse every whitespace-separated token as a number.
///
/// Returns the offending token on failure.
pub(crate) fn parse_numbers(text: &str) -> Result<Vec<f64>, String> {
    text.split_whitespace()
        .map(|token| token.parse::<f64>().map_err(|_| token.to_string()))
        .collect()
}
