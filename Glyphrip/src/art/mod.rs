//! Art path: embedded glyph records
//!
//! One host file carries at most one record. [`parse_art`] runs the matcher,
//! normalizes the color tokens and the body, and assembles an [`ArtRecord`].

pub mod body;
pub mod colors;
pub mod matcher;
mod types;

use std::path::Path;

pub use body::{GlyphBody, Segment};
pub use colors::{CanonicalColor, normalize_colors};
pub use matcher::{Capture, PartialMatch, RawRecord, RecordMatch, match_record};
pub use types::{ArtOutcome, ArtRecord, SkipReason};

use crate::error::Result;
use crate::options::ExtractOptions;

/// Extract the art record from the text of one host file.
///
/// A file without a record is not an error; it yields
/// [`ArtOutcome::Skipped`].
pub fn parse_art(text: &str, options: &ExtractOptions) -> Result<ArtOutcome> {
    let raw = match match_record(text) {
        RecordMatch::Found(raw) => raw,
        RecordMatch::Partial(partial) => {
            return Ok(ArtOutcome::Skipped(SkipReason::Incomplete(partial)));
        }
        RecordMatch::Absent => return Ok(ArtOutcome::Skipped(SkipReason::NoRecord)),
    };

    let mut names = raw.aliases()?;
    if options.lowercase_names {
        names.iter_mut().for_each(|name| *name = name.to_lowercase());
    }

    let colors = normalize_colors(raw.color_tokens())?;
    let body = GlyphBody::normalize(&raw.body_lines())?;

    Ok(ArtOutcome::Parsed(ArtRecord {
        names,
        width: body.width(),
        colors,
        body: body.into_lines(),
    }))
}

/// Read and extract one host file. Errors carry the file path.
pub fn parse_art_file(path: &Path, options: &ExtractOptions) -> Result<ArtOutcome> {
    let text = std::fs::read_to_string(path).map_err(|e| crate::Error::from(e).in_file(path))?;
    let outcome = parse_art(&text, options).map_err(|e| e.in_file(path))?;

    match &outcome {
        ArtOutcome::Parsed(record) => {
            tracing::info!("Parsed {}", record.names.join("/"));
        }
        ArtOutcome::Skipped(reason) => {
            tracing::info!("Ignored {}: {}", path.display(), reason);
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const FEDORA: &str = r##"
fedora = AsciiArt(match=r'''"fedora"''', color='fg "#3c6eb4"', ascii=r"""
${c2}  _____
${c1} /  __)${c2}\:
""")
"##;

    #[test]
    fn test_end_to_end_record() {
        let ArtOutcome::Parsed(art) = parse_art(FEDORA, &ExtractOptions::default()).unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(art.names, vec!["fedora"]);
        assert_eq!(
            art.colors,
            vec![
                CanonicalColor::Reset,
                CanonicalColor::Rgb { r: 60, g: 110, b: 180 }
            ]
        );
        assert_eq!(art.width, 9);
        assert_eq!(art.body, vec!["${c2}  _____  ", "${c1} /  __)${c2}\\;"]);
    }

    #[test]
    fn test_lowercase_option() {
        let text = "match='Arch | ARCHCRAFT', color='1', ascii='''\nx\n'''";
        let options = ExtractOptions::new().with_lowercase_names(true);
        let ArtOutcome::Parsed(art) = parse_art(text, &options).unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(art.names, vec!["arch", "archcraft"]);
    }

    #[test]
    fn test_empty_palette_record() {
        let text = "match='A', color='', ascii='''\nx\n'''";
        let ArtOutcome::Parsed(art) = parse_art(text, &ExtractOptions::default()).unwrap() else {
            panic!("expected a record");
        };
        assert!(art.colors.is_empty());
        assert!(crate::output::art_to_yaml(&[art]).contains("  colors: []\n"));
    }

    #[test]
    fn test_skip_without_record() {
        let outcome = parse_art("print('hello')", &ExtractOptions::default()).unwrap();
        assert_eq!(outcome, ArtOutcome::Skipped(SkipReason::NoRecord));
    }

    #[test]
    fn test_blank_body_is_structural() {
        let text = "match='A', color='1', ascii='''\n   \n'''";
        assert!(matches!(
            parse_art(text, &ExtractOptions::default()),
            Err(Error::EmptyBody)
        ));
    }

    #[test]
    fn test_bad_color_fails_record() {
        let text = "match='A', color='1 blue', ascii='''\nx\n'''";
        let err = parse_art(text, &ExtractOptions::default()).unwrap_err();
        assert_eq!(err.stage(), "malformed-token");
    }
}
