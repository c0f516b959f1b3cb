//! Art document writer
//!
//! Emits the exact block-sequence layout consumed downstream:
//!
//! ```yaml
//! - name: ['Fedora', 'RFRemix']
//!   width: 37
//!   colors:
//!     - Reset
//!     - !Rgb
//!       r: 60
//!       g: 110
//!       b: 180
//!   art: |-
//!     ...
//! ```

use std::io::Write;

use crate::art::body::render_lines;
use crate::art::{ArtRecord, CanonicalColor};
use crate::error::Result;

/// Indentation of art lines under the `art:` key.
const ART_INDENT: &str = "    ";

/// Write `records` as an art document.
pub fn write_art_yaml<W: Write>(records: &[ArtRecord], writer: &mut W) -> Result<()> {
    for record in records {
        write_record(record, writer)?;
    }
    Ok(())
}

/// Render `records` as an art document string.
pub fn art_to_yaml(records: &[ArtRecord]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_art_yaml(records, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_record<W: Write>(record: &ArtRecord, w: &mut W) -> Result<()> {
    writeln!(w, "- name: {}", flow_names(&record.names))?;
    writeln!(w, "  width: {}", record.width)?;

    if record.colors.is_empty() {
        writeln!(w, "  colors: []")?;
    } else {
        writeln!(w, "  colors:")?;
        for color in &record.colors {
            match color {
                CanonicalColor::Reset => writeln!(w, "    - Reset")?,
                CanonicalColor::Bg => writeln!(w, "    - Bg")?,
                CanonicalColor::Rgb { r, g, b } => {
                    writeln!(w, "    - !Rgb")?;
                    writeln!(w, "      r: {r}")?;
                    writeln!(w, "      g: {g}")?;
                    writeln!(w, "      b: {b}")?;
                }
                CanonicalColor::AnsiValue(code) => writeln!(w, "    - !AnsiValue {code}")?,
            }
        }
    }

    // A leading space on the first line would be read as deeper indentation.
    let header = if record.body.first().is_some_and(|line| line.starts_with(' ')) {
        "|2-"
    } else {
        "|-"
    };
    writeln!(w, "  art: {header}")?;
    writeln!(w, "{}", render_lines(&record.body, ART_INDENT))?;
    Ok(())
}

/// `['a', 'b']` with single quotes doubled inside names.
fn flow_names(names: &[String]) -> String {
    let quoted: Vec<String> = names
        .iter()
        .map(|name| format!("'{}'", name.replace('\'', "''")))
        .collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_layout() {
        let record = ArtRecord {
            names: vec!["Fedora".into(), "RFRemix".into()],
            width: 4,
            colors: vec![
                CanonicalColor::Reset,
                CanonicalColor::Rgb { r: 60, g: 110, b: 180 },
                CanonicalColor::AnsiValue(4),
            ],
            body: vec!["${c1}ab;c".into(), "de  ".into()],
        };
        let expected = "\
- name: ['Fedora', 'RFRemix']
  width: 4
  colors:
    - Reset
    - !Rgb
      r: 60
      g: 110
      b: 180
    - !AnsiValue 4
  art: |-
    ${c1}ab;c
    de  \n";
        assert_eq!(art_to_yaml(&[record]), expected);
    }

    #[test]
    fn test_indented_first_line_gets_indicator() {
        let record = ArtRecord {
            names: vec!["Tux's".into()],
            width: 2,
            colors: vec![],
            body: vec![" a".into(), "bb".into()],
        };
        let yaml = art_to_yaml(&[record]);
        assert!(yaml.starts_with("- name: ['Tux''s']\n"));
        assert!(yaml.contains("  colors: []\n"));
        assert!(yaml.ends_with("  art: |2-\n     a\n    bb\n"));
    }
}
