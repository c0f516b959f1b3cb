//! Record matcher for embedded art declarations
//!
//! Host files declare one art record as three keyword arguments:
//!
//! ```text
//! match=r'''"Fedora"* | "RFRemix"*''', color='fg "#3c6eb4"', ascii=r"""
//! ${c1}...
//! """
//! ```
//!
//! The scanner finds the first `match=` anchor from which all three captures
//! can be read. Everything else in the file is ignored. When no anchor yields
//! a full record, the furthest partial attempt is reported so callers can
//! tell which capture failed.

use crate::error::{Error, Result};

/// The three captures of an art record, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capture {
    /// Display name aliases (`match=`).
    Names,
    /// Color tokens (`color=`).
    Colors,
    /// Triple-quoted glyph body (`ascii=`).
    Body,
}

impl Capture {
    /// Keyword that introduces this capture.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Names => "match",
            Self::Colors => "color",
            Self::Body => "ascii",
        }
    }
}

/// Raw, untyped text of a matched record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// Name capture, surrounding whitespace trimmed.
    pub names: &'a str,
    /// Color capture, surrounding whitespace trimmed.
    pub colors: &'a str,
    /// Body capture, exactly as written between the delimiters.
    pub body: &'a str,
}

impl<'a> RawRecord<'a> {
    /// Split the name capture into aliases.
    ///
    /// Quote and emphasis characters are removed, the text is split on `|`
    /// and every alias is trimmed. Empty aliases are dropped.
    pub fn aliases(&self) -> Result<Vec<String>> {
        split_names(self.names)
    }

    /// Whitespace-delimited color tokens, left to right.
    pub fn color_tokens(&self) -> impl Iterator<Item = &'a str> {
        self.colors.split_whitespace()
    }

    /// Body lines with leading and trailing blank lines removed.
    #[must_use]
    pub fn body_lines(&self) -> Vec<&'a str> {
        let lines: Vec<&str> = self.body.lines().collect();
        let start = lines.iter().position(|l| !l.trim().is_empty());
        let end = lines.iter().rposition(|l| !l.trim().is_empty());
        match (start, end) {
            (Some(start), Some(end)) => lines[start..=end].to_vec(),
            _ => Vec::new(),
        }
    }
}

/// A record anchor was found but one capture could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialMatch {
    /// The capture that failed.
    pub failed: Capture,
    /// Byte offset where the failed capture was expected.
    pub offset: usize,
}

impl std::fmt::Display for PartialMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}=' capture unreadable at byte {}",
            self.failed.keyword(),
            self.offset
        )
    }
}

/// Outcome of scanning one host file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordMatch<'a> {
    /// A complete record.
    Found(RawRecord<'a>),
    /// At least one anchor, but no complete record.
    Partial(PartialMatch),
    /// No `match=` anchor anywhere in the text.
    Absent,
}

/// Scan `text` for the first complete art record.
#[must_use]
pub fn match_record(text: &str) -> RecordMatch<'_> {
    let mut furthest: Option<PartialMatch> = None;

    for anchor in anchors(text) {
        match Scanner::new(text, anchor).record() {
            Ok(raw) => return RecordMatch::Found(raw),
            Err(partial) => {
                if furthest.is_none_or(|f| partial.failed > f.failed) {
                    furthest = Some(partial);
                }
            }
        }
    }

    furthest.map_or(RecordMatch::Absent, RecordMatch::Partial)
}

/// Split raw name text into trimmed aliases.
pub fn split_names(raw: &str) -> Result<Vec<String>> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '\'' | '"' | '*'))
        .collect();

    let names: Vec<String> = cleaned
        .split('|')
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        return Err(Error::EmptyNames);
    }
    Ok(names)
}

fn is_quote(b: u8) -> bool {
    b == b'\'' || b == b'"'
}

fn is_ident(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Byte offsets of every `match` keyword that is followed by `=`.
fn anchors(text: &str) -> impl Iterator<Item = usize> + '_ {
    let bytes = text.as_bytes();
    text.match_indices(Capture::Names.keyword())
        .map(|(i, _)| i)
        .filter(move |&i| i == 0 || !is_ident(bytes[i - 1]))
        .filter(move |&i| Scanner::new(text, i).keyword(Capture::Names.keyword()))
}

struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, pos: usize) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos,
        }
    }

    fn record(mut self) -> std::result::Result<RawRecord<'a>, PartialMatch> {
        let fail = |failed, offset| PartialMatch { failed, offset };

        if !self.keyword(Capture::Names.keyword()) {
            return Err(fail(Capture::Names, self.pos));
        }
        self.raw_prefix();
        let names_at = self.pos;
        let names = self
            .quoted_region(Capture::Colors.keyword())
            .ok_or_else(|| fail(Capture::Names, names_at))?;

        let colors_at = self.pos;
        let colors = self
            .quoted_region(Capture::Body.keyword())
            .ok_or_else(|| fail(Capture::Colors, colors_at))?;

        let body_at = self.pos;
        self.raw_prefix();
        let body = self.triple_quoted().ok_or_else(|| fail(Capture::Body, body_at))?;

        Ok(RawRecord {
            names: names.trim(),
            colors: colors.trim(),
            body,
        })
    }

    fn skip_ws(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    /// Consume `kw`, optional whitespace and `=`, then trailing whitespace.
    fn keyword(&mut self, kw: &str) -> bool {
        let start = self.pos;
        if !self.text[self.pos..].starts_with(kw) {
            return false;
        }
        self.pos += kw.len();
        self.skip_ws();
        if self.bytes.get(self.pos) != Some(&b'=') {
            self.pos = start;
            return false;
        }
        self.pos += 1;
        self.skip_ws();
        true
    }

    fn raw_prefix(&mut self) {
        if matches!(self.bytes.get(self.pos), Some(b'r' | b'R'))
            && self.bytes.get(self.pos + 1).copied().is_some_and(is_quote)
        {
            self.pos += 1;
        }
    }

    fn quote_run(&mut self, max: usize) -> usize {
        let mut n = 0;
        while n < max && self.bytes.get(self.pos).copied().is_some_and(is_quote) {
            self.pos += 1;
            n += 1;
        }
        n
    }

    /// A 1-3 quote run, then [`Self::lazy_region`]. Shorter opening runs are
    /// tried when the longest one finds no close, so `''` reads as empty.
    fn quoted_region(&mut self, next: &str) -> Option<&'a str> {
        let open = self.pos;
        let run = self.quote_run(3);
        (1..=run).rev().find_map(|n| {
            self.pos = open + n;
            self.lazy_region(next)
        })
    }

    /// Shortest region, possibly empty, followed by a 1-3 quote run, a comma
    /// and the `next` keyword. Leaves the scanner after the keyword's `=`.
    fn lazy_region(&mut self, next: &str) -> Option<&'a str> {
        let start = self.pos;
        let mut search = start;

        while let Some(rel) = self.text.get(search..).and_then(|rest| rest.find(',')) {
            let comma = search + rel;
            search = comma + 1;

            let mut close = comma;
            while close > start && self.bytes[close - 1].is_ascii_whitespace() {
                close -= 1;
            }
            let mut run = 0;
            while close > start + run && run < 3 && is_quote(self.bytes[close - run - 1]) {
                run += 1;
            }
            if run == 0 {
                continue;
            }
            let end = close - run;

            let mut after = Scanner::new(self.text, comma + 1);
            after.skip_ws();
            if after.keyword(next) {
                self.pos = after.pos;
                return Some(&self.text[start..end]);
            }
        }
        None
    }

    /// A `"""` or `'''` delimited region, closed by the same delimiter.
    fn triple_quoted(&mut self) -> Option<&'a str> {
        let delim = self.text.get(self.pos..self.pos + 3)?;
        if delim != "\"\"\"" && delim != "'''" {
            return None;
        }
        let start = self.pos + 3;
        let end = start + self.text[start..].find(delim)?;
        self.pos = end + 3;
        Some(&self.text[start..end])
    }
}
