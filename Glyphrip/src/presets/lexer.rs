//! Tokenizer for preset host files
//!
//! Understands enough of the host language's lexical grammar to walk past
//! anything in the file: comments, every string quoting and prefix form,
//! numbers, identifiers and punctuation. Newlines are only emitted outside
//! brackets, where they end a statement.

use std::fmt;

use crate::error::{Error, Result};

/// Two-character operators that must not be split into single punctuation.
const OPERATORS: [&str; 16] = [
    "**", "//", "==", "!=", "<=", ">=", "->", ":=", "+=", "-=", "*=", "/=", "<<", ">>", "|=", "&=",
];

/// A lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword.
    Name(String),
    /// String literal, prefix removed and escapes decoded.
    Str(String),
    /// Numeric literal as written.
    Number(String),
    /// Single punctuation or operator character.
    Punct(char),
    /// Multi-character operator.
    Op(&'static str),
    /// End of a logical line.
    Newline,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "name '{name}'"),
            Self::Str(s) => write!(f, "string {s:?}"),
            Self::Number(n) => write!(f, "number {n}"),
            Self::Punct(c) => write!(f, "'{c}'"),
            Self::Op(op) => write!(f, "'{op}'"),
            Self::Newline => write!(f, "end of line"),
        }
    }
}

/// A token with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    /// Whether this token is the punctuation character `c`.
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }
}

/// Tokenize a whole host file.
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    Lexer::new(text).run()
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    depth: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
            depth: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>> {
        while let Some(c) = self.chars.next() {
            match c {
                '\n' => {
                    let open_line =
                        self.tokens.last().is_some_and(|t| t.kind != TokenKind::Newline);
                    if self.depth == 0 && open_line {
                        self.push(TokenKind::Newline);
                    }
                    self.line += 1;
                }
                '#' => self.skip_comment(),
                '\\' if self.chars.peek() == Some(&'\n') => {
                    self.chars.next();
                    self.line += 1;
                }
                c if c.is_whitespace() => {}
                '\'' | '"' => {
                    let s = self.string(c, false)?;
                    self.push(TokenKind::Str(s));
                }
                c if c.is_alphabetic() || c == '_' => self.word(c)?,
                c if c.is_ascii_digit() => self.number(c),
                '.' if self.chars.peek().is_some_and(char::is_ascii_digit) => self.number(c),
                c => self.punct(c),
            }
        }
        Ok(self.tokens)
    }

    fn push(&mut self, kind: TokenKind) {
        self.tokens.push(Token { kind, line: self.line });
    }

    fn skip_comment(&mut self) {
        while self.chars.next_if(|&c| c != '\n').is_some() {}
    }

    /// Identifier, or a string prefix (`r`, `b`, `u`, `f` and pairs) glued
    /// to a quote.
    fn word(&mut self, first: char) -> Result<()> {
        let mut word = String::from(first);
        while let Some(c) = self.chars.next_if(|&c| c.is_alphanumeric() || c == '_') {
            word.push(c);
        }

        if let Some(&quote) = self.chars.peek() {
            if (quote == '\'' || quote == '"') && is_string_prefix(&word) {
                self.chars.next();
                let raw = word.to_ascii_lowercase().contains('r');
                let s = self.string(quote, raw)?;
                self.push(TokenKind::Str(s));
                return Ok(());
            }
        }
        self.push(TokenKind::Name(word));
        Ok(())
    }

    fn number(&mut self, first: char) {
        let mut number = String::from(first);
        let mut prev = first;
        while let Some(c) = self.chars.next_if(|&c| {
            let exponent_sign = matches!(c, '+' | '-') && matches!(prev, 'e' | 'E');
            c.is_ascii_alphanumeric() || matches!(c, '_' | '.') || exponent_sign
        }) {
            number.push(c);
            prev = c;
        }
        self.push(TokenKind::Number(number));
    }

    fn punct(&mut self, c: char) {
        if let Some(&next) = self.chars.peek() {
            let pair: String = [c, next].iter().collect();
            if let Some(op) = OPERATORS.iter().copied().find(|op| *op == pair) {
                self.chars.next();
                self.push(TokenKind::Op(op));
                return;
            }
        }

        match c {
            '(' | '[' | '{' => self.depth += 1,
            ')' | ']' | '}' => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
        self.push(TokenKind::Punct(c));
    }

    /// Read a string body after its first quote character.
    fn string(&mut self, quote: char, raw: bool) -> Result<String> {
        let start_line = self.line;
        let unterminated = || Error::UnterminatedString { line: start_line };

        let triple = if self.chars.next_if_eq(&quote).is_some() {
            if self.chars.next_if_eq(&quote).is_some() {
                true
            } else {
                // Empty string.
                return Ok(String::new());
            }
        } else {
            false
        };

        let mut out = String::new();
        loop {
            let c = self.chars.next().ok_or_else(unterminated)?;
            match c {
                '\n' if !triple => return Err(unterminated()),
                '\n' => {
                    self.line += 1;
                    out.push(c);
                }
                '\\' => {
                    let next = self.chars.next().ok_or_else(unterminated)?;
                    if next == '\n' {
                        self.line += 1;
                    }
                    if raw {
                        out.push('\\');
                        out.push(next);
                    } else {
                        self.escape(next, &mut out);
                    }
                }
                c if c == quote => {
                    if !triple {
                        return Ok(out);
                    }
                    if self.chars.next_if_eq(&quote).is_some() {
                        if self.chars.next_if_eq(&quote).is_some() {
                            return Ok(out);
                        }
                        out.push(quote);
                    }
                    out.push(quote);
                }
                c => out.push(c),
            }
        }
    }

    fn escape(&mut self, c: char, out: &mut String) {
        match c {
            '\n' => {}
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            '\\' | '\'' | '"' => out.push(c),
            'x' => self.hex_escape(c, 2, out),
            'u' => self.hex_escape(c, 4, out),
            'U' => self.hex_escape(c, 8, out),
            c => {
                out.push('\\');
                out.push(c);
            }
        }
    }

    fn hex_escape(&mut self, marker: char, digits: usize, out: &mut String) {
        let mut hex = String::with_capacity(digits);
        while hex.len() < digits {
            match self.chars.next_if(char::is_ascii_hexdigit) {
                Some(d) => hex.push(d),
                None => break,
            }
        }
        match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
            Some(decoded) if hex.len() == digits => out.push(decoded),
            _ => {
                out.push('\\');
                out.push(marker);
                out.push_str(&hex);
            }
        }
    }
}

fn is_string_prefix(word: &str) -> bool {
    word.len() <= 2
        && word
            .chars()
            .all(|c| matches!(c.to_ascii_lowercase(), 'r' | 'b' | 'u' | 'f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_basic_tokens() {
        assert_eq!(
            kinds("x = f(1, 'a')"),
            vec![
                TokenKind::Name("x".into()),
                TokenKind::Punct('='),
                TokenKind::Name("f".into()),
                TokenKind::Punct('('),
                TokenKind::Number("1".into()),
                TokenKind::Punct(','),
                TokenKind::Str("a".into()),
                TokenKind::Punct(')'),
            ]
        );
    }

    #[test]
    fn test_newlines_only_outside_brackets() {
        let kinds = kinds("a = [\n1,\n2\n]\nb\n\n");
        let newlines = kinds.iter().filter(|k| **k == TokenKind::Newline).count();
        assert_eq!(newlines, 2);
    }

    #[test]
    fn test_comments_and_continuations() {
        assert_eq!(
            kinds("a \\\n  # 'not a string\n"),
            vec![TokenKind::Name("a".into()), TokenKind::Newline]
        );
    }

    #[test]
    fn test_string_forms() {
        assert_eq!(
            kinds(r#"r'\d' "a\tb" '''x'y''' b"" """q""""#),
            vec![
                TokenKind::Str(r"\d".into()),
                TokenKind::Str("a\tb".into()),
                TokenKind::Str("x'y".into()),
                TokenKind::Str(String::new()),
                TokenKind::Str("q".into()),
            ]
        );
    }

    #[test]
    fn test_escapes() {
        assert_eq!(kinds(r"'\x41é\q'"), vec![TokenKind::Str("Aé\\q".into())]);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("def f() -> dict: **k"),
            vec![
                TokenKind::Name("def".into()),
                TokenKind::Name("f".into()),
                TokenKind::Punct('('),
                TokenKind::Punct(')'),
                TokenKind::Op("->"),
                TokenKind::Name("dict".into()),
                TokenKind::Punct(':'),
                TokenKind::Op("**"),
                TokenKind::Name("k".into()),
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(
            tokenize("x = 1\ny = 'abc\n"),
            Err(Error::UnterminatedString { line: 2 })
        ));
        assert!(matches!(
            tokenize("'''abc"),
            Err(Error::UnterminatedString { line: 1 })
        ));
    }

    #[test]
    fn test_line_numbers() {
        let tokens = tokenize("a\n'''x\ny'''\nb").unwrap();
        assert_eq!(tokens.last().map(|t| t.line), Some(4));
    }
}
