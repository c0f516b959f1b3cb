//! Color token normalization
//!
//! Turns the raw tokens of a `color=` capture into [`CanonicalColor`]s.
//! Token order is the rendering palette order (`${c1}` is the first token)
//! so it is never changed.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// `#RRGGBB`
const COLOR_RGB_LEN: usize = 7;
/// `#RRGGBBAA`
const COLOR_RGBA_LEN: usize = 9;

/// A palette entry in canonical form.
///
/// Serializes externally tagged (`"Reset"`, `{"Rgb": {...}}`,
/// `{"AnsiValue": 4}`), which is also what the YAML writer emits as tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalColor {
    /// Terminal default foreground (`fg`).
    Reset,
    /// Terminal default background (`bg`).
    Bg,
    /// A 24-bit color.
    Rgb { r: u8, g: u8, b: u8 },
    /// A 256-color palette index.
    AnsiValue(u8),
}

impl CanonicalColor {
    /// Classify and normalize one raw token.
    pub fn from_token(token: &str) -> Result<Self> {
        let token = strip_quotes(token);

        match token {
            "fg" => return Ok(Self::Reset),
            "bg" => return Ok(Self::Bg),
            _ => {}
        }

        if token.len() == COLOR_RGB_LEN || token.len() == COLOR_RGBA_LEN {
            return parse_hex(token);
        }

        token
            .parse::<u8>()
            .map(Self::AnsiValue)
            .map_err(|_| Error::MalformedInteger {
                token: token.to_string(),
            })
    }
}

/// Normalize every whitespace-delimited token of a color capture.
pub fn normalize_colors<'a, I>(tokens: I) -> Result<Vec<CanonicalColor>>
where
    I: IntoIterator<Item = &'a str>,
{
    tokens.into_iter().map(CanonicalColor::from_token).collect()
}

/// Remove one leading and one trailing quote character, independently.
fn strip_quotes(token: &str) -> &str {
    let token = token
        .strip_prefix('"')
        .or_else(|| token.strip_prefix('\''))
        .unwrap_or(token);
    token
        .strip_suffix('"')
        .or_else(|| token.strip_suffix('\''))
        .unwrap_or(token)
}

fn parse_hex(token: &str) -> Result<CanonicalColor> {
    let malformed = || Error::MalformedColor {
        token: token.to_string(),
    };

    let digits = token.strip_prefix('#').ok_or_else(malformed)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed());
    }

    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| malformed());
    Ok(CanonicalColor::Rgb {
        r: byte(0)?,
        g: byte(2)?,
        b: byte(4)?,
    })
}
