//! Glyph body normalization
//!
//! Computes the visible width of an art body, pads every line to it and
//! swaps `:` for `;` (the YAML consumer reads `:` as a mapping delimiter).
//! `${cN}` color markers are zero-width at render time and never count
//! toward the width.

use std::borrow::Cow;

use crate::error::{Error, Result};

const MARKER_OPEN: &str = "${c";

/// A normalized glyph body: padded, substituted lines of equal visible width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBody {
    width: usize,
    lines: Vec<String>,
}

impl GlyphBody {
    /// Normalize raw body lines.
    ///
    /// # Errors
    /// Returns [`Error::EmptyBody`] when there are no lines.
    pub fn normalize<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        if lines.is_empty() {
            return Err(Error::EmptyBody);
        }

        let width = lines
            .iter()
            .map(|line| visible_len(line.as_ref().trim_end()))
            .max()
            .unwrap_or_default();

        let lines = lines
            .iter()
            .map(|line| pad_line(&line.as_ref().trim_end().replace(':', ";"), width))
            .collect();

        Ok(Self { width, lines })
    }

    /// Widest visible line, in columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The padded lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Take the padded lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Join `lines`, prefixing each with `indent`.
pub fn render_lines<S: AsRef<str>>(lines: &[S], indent: &str) -> String {
    lines
        .iter()
        .map(|line| format!("{indent}{}", line.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn pad_line(line: &str, width: usize) -> String {
    let visible = visible_len(line);
    let mut padded = String::with_capacity(line.len() + width.saturating_sub(visible));
    padded.push_str(line);
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(visible)));
    padded
}

/// Column count of `line` with color markers removed.
pub fn visible_len(line: &str) -> usize {
    strip_markers(line).chars().count()
}

/// Remove every `${c<digits>}` marker from `line`.
pub fn strip_markers(line: &str) -> Cow<'_, str> {
    if !line.contains(MARKER_OPEN) {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(start) = rest.find(MARKER_OPEN) {
        out.push_str(&rest[..start]);
        match marker_at(&rest[start..]) {
            Some((_, len)) => rest = &rest[start + len..],
            None => {
                out.push_str(MARKER_OPEN);
                rest = &rest[start + MARKER_OPEN.len()..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Parse a marker at the start of `text`: `(color index, byte length)`.
fn marker_at(text: &str) -> Option<(usize, usize)> {
    let digits = text.strip_prefix(MARKER_OPEN)?;
    let n = digits.bytes().take_while(u8::is_ascii_digit).count();
    if n == 0 || digits.as_bytes().get(n) != Some(&b'}') {
        return None;
    }
    let index = digits[..n].parse().ok()?;
    Some((index, MARKER_OPEN.len() + n + 1))
}

/// A run of art text drawn in one palette color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 1-based palette index from the preceding `${cN}` marker, or `None`
    /// for text before the first marker.
    pub color: Option<usize>,
    /// The text up to the next marker.
    pub text: String,
}

/// Split art text into colored segments at each `${cN}` marker.
pub fn segments(art: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut color = None;
    let mut text = String::new();
    let mut rest = art;

    while let Some(start) = rest.find(MARKER_OPEN) {
        text.push_str(&rest[..start]);
        match marker_at(&rest[start..]) {
            Some((index, len)) => {
                if !text.is_empty() {
                    out.push(Segment {
                        color,
                        text: std::mem::take(&mut text),
                    });
                }
                color = Some(index);
                rest = &rest[start + len..];
            }
            None => {
                text.push_str(MARKER_OPEN);
                rest = &rest[start + MARKER_OPEN.len()..];
            }
        }
    }
    text.push_str(rest);
    if !text.is_empty() {
        out.push(Segment { color, text });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_ignores_markers_and_trailing_space() {
        let body = GlyphBody::normalize(&["${c1}abc   ", "${c2}ab${c1}cdef"]).unwrap();
        assert_eq!(body.width(), 6);
        assert_eq!(body.lines(), ["${c1}abc   ", "${c2}ab${c1}cdef"]);
    }

    #[test]
    fn test_every_line_is_padded_to_width() {
        let body = GlyphBody::normalize(&["a", "abcd", ""]).unwrap();
        assert_eq!(body.width(), 4);
        for line in body.lines() {
            assert_eq!(line.chars().count(), 4);
        }
    }

    #[test]
    fn test_colon_becomes_semicolon() {
        let body = GlyphBody::normalize(&["a:b::", "xyz"]).unwrap();
        assert_eq!(body.lines(), ["a;b;;", "xyz  "]);
    }

    #[test]
    fn test_empty_body_fails() {
        let lines: [&str; 0] = [];
        assert!(matches!(GlyphBody::normalize(&lines), Err(Error::EmptyBody)));
    }

    #[test]
    fn test_render_indents() {
        let body = GlyphBody::normalize(&["ab", "c"]).unwrap();
        assert_eq!(render_lines(body.lines(), "    "), "    ab\n    c ");
    }

    #[test]
    fn test_strip_markers_leaves_lookalikes() {
        assert_eq!(strip_markers("${c12}x${c}y${cz}"), "x${c}y${cz}");
        assert_eq!(visible_len("é${c1}é"), 2);
    }

    #[test]
    fn test_segments() {
        let segs = segments("lead${c1}one\n${c2}two${c1}");
        assert_eq!(
            segs,
            vec![
                Segment { color: None, text: "lead".into() },
                Segment { color: Some(1), text: "one\n".into() },
                Segment { color: Some(2), text: "two".into() },
            ]
        );
    }
}
