//! Binding locator and expression parser
//!
//! Finds the `NAME = {...}` (or `NAME: annotation = {...}`) statement in a
//! token stream, splits the dict into entries and parses each entry value
//! into an [`Expr`]. Anything outside the closed grammar is rejected as an
//! unsupported expression instead of being guessed at.

use super::ast::Expr;
use super::lexer::{Token, TokenKind};
use crate::error::{Error, Result};

/// Keywords that start or continue expression forms outside the grammar.
const UNSUPPORTED_KEYWORDS: [&str; 11] = [
    "if", "else", "for", "in", "is", "not", "and", "or", "lambda", "await", "yield",
];

/// Deepest expression tree accepted. Brackets, calls and attribute links
/// each add one level.
pub const MAX_NESTING: usize = 100;

/// Find the top-level binding `name` and return the tokens between its
/// dict braces.
///
/// # Errors
/// [`Error::BindingNotFound`] when no statement assigns `name`,
/// [`Error::NotADict`] when the assigned value is not a `{...}` literal.
pub fn locate_binding<'a>(tokens: &'a [Token], name: &str) -> Result<&'a [Token]> {
    for i in 0..tokens.len() {
        let at_statement_start = i == 0 || tokens[i - 1].kind == TokenKind::Newline;
        let is_target = matches!(&tokens[i].kind, TokenKind::Name(n) if n == name);
        if !(at_statement_start && is_target) {
            continue;
        }
        let Some(value) = assigned_value(tokens, i + 1) else {
            continue;
        };

        if !tokens.get(value).is_some_and(|t| t.is_punct('{')) {
            return Err(Error::NotADict {
                name: name.to_string(),
            });
        }
        let close = matching_close(tokens, value).ok_or_else(|| Error::UnexpectedToken {
            line: tokens[value].line,
            found: "unclosed '{'".to_string(),
        })?;
        tracing::debug!("Found binding '{}' at line {}", name, tokens[i].line);
        return Ok(&tokens[value + 1..close]);
    }

    Err(Error::BindingNotFound {
        name: name.to_string(),
    })
}

/// Index of the first value token after `=` (skipping an annotation), or
/// `None` when the statement is not a plain assignment.
fn assigned_value(tokens: &[Token], mut pos: usize) -> Option<usize> {
    let first = tokens.get(pos)?;
    if first.is_punct('=') {
        return Some(pos + 1);
    }
    if !first.is_punct(':') {
        return None;
    }

    let mut depth = 0usize;
    pos += 1;
    while let Some(token) = tokens.get(pos) {
        match token.kind {
            TokenKind::Newline => return None,
            TokenKind::Punct('(' | '[' | '{') => depth += 1,
            TokenKind::Punct(')' | ']' | '}') => depth = depth.saturating_sub(1),
            TokenKind::Punct('=') if depth == 0 => return Some(pos + 1),
            _ => {}
        }
        pos += 1;
    }
    None
}

fn matching_close(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::Punct('(' | '[' | '{') => depth += 1,
            TokenKind::Punct(')' | ']' | '}') => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// One `key: value` entry of the preset dict, still as tokens.
#[derive(Debug, Clone, Copy)]
pub struct RawEntry<'a> {
    /// Position in the dict, 0-based.
    pub index: usize,
    /// Tokens before the entry's first top-level `:`.
    pub key: &'a [Token],
    /// Tokens after the `:`, or `None` when the entry has no colon.
    pub value: Option<&'a [Token]>,
}

impl RawEntry<'_> {
    /// The entry's key. Only string literal keys are accepted.
    pub fn key(&self) -> Result<String> {
        if self.key.is_empty() {
            return Err(Error::UnsupportedExpression("missing dictionary key".to_string()));
        }
        self.key
            .iter()
            .map(|token| match &token.kind {
                TokenKind::Str(s) => Ok(s.as_str()),
                _ => Err(Error::UnsupportedExpression(
                    "non-string dictionary key".to_string(),
                )),
            })
            .collect()
    }

    /// The key, or a positional label when the key is unusable.
    pub fn label(&self) -> String {
        self.key()
            .unwrap_or_else(|_| format!("<entry {}>", self.index + 1))
    }
}

/// Split dict body tokens into entries at top-level commas.
pub fn split_entries(body: &[Token]) -> Vec<RawEntry<'_>> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, token) in body.iter().enumerate() {
        match token.kind {
            TokenKind::Punct('(' | '[' | '{') => depth += 1,
            TokenKind::Punct(')' | ']' | '}') => depth = depth.saturating_sub(1),
            TokenKind::Punct(',') if depth == 0 => {
                segments.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&body[start..]);

    segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(index, segment)| {
            let colon = top_level_colon(segment);
            RawEntry {
                index,
                key: colon.map_or(segment, |c| &segment[..c]),
                value: colon.map(|c| &segment[c + 1..]),
            }
        })
        .collect()
}

fn top_level_colon(tokens: &[Token]) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::Punct('(' | '[' | '{') => depth += 1,
            TokenKind::Punct(')' | ']' | '}') => depth = depth.saturating_sub(1),
            TokenKind::Punct(':') if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Parse one complete expression from `tokens`.
pub fn parse_expr(tokens: &[Token]) -> Result<Expr> {
    if tokens.is_empty() {
        return Err(Error::UnsupportedExpression("empty expression".to_string()));
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    match parser.next() {
        Some(token) => Err(stray(token)),
        None => Ok(expr),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn end_of_input(&self) -> Error {
        Error::UnexpectedToken {
            line: self.tokens.last().map_or(0, |t| t.line),
            found: "end of input".to_string(),
        }
    }

    /// Go one level deeper into the tree being built.
    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(Error::UnsupportedExpression(format!(
                "expression nested deeper than {MAX_NESTING} levels"
            )));
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr> {
        let base = self.depth;
        let mut expr = self.primary()?;
        loop {
            match self.peek().map(|t| &t.kind) {
                Some(TokenKind::Punct('.')) => {
                    self.enter()?;
                    self.pos += 1;
                    match self.next() {
                        Some(Token {
                            kind: TokenKind::Name(attr),
                            ..
                        }) => expr = Expr::attribute(expr, attr.clone()),
                        Some(token) => return Err(unexpected(token)),
                        None => return Err(self.end_of_input()),
                    }
                }
                Some(TokenKind::Punct('(')) => {
                    self.enter()?;
                    self.pos += 1;
                    let (args, _) = self.sequence(')')?;
                    expr = Expr::call(expr, args);
                }
                Some(TokenKind::Punct('[')) => {
                    return Err(Error::UnsupportedExpression(format!(
                        "subscript of {}",
                        expr.describe()
                    )));
                }
                _ => {
                    self.depth = base;
                    return Ok(expr);
                }
            }
        }
    }

    fn primary(&mut self) -> Result<Expr> {
        let token = self.next().ok_or_else(|| self.end_of_input())?;
        match &token.kind {
            TokenKind::Str(first) => {
                let mut s = first.clone();
                while let Some(TokenKind::Str(more)) = self.peek().map(|t| &t.kind) {
                    s.push_str(more);
                    self.pos += 1;
                }
                Ok(Expr::Str(s))
            }
            TokenKind::Number(raw) => parse_int(raw, false).map(Expr::Int),
            TokenKind::Punct('-') => match self.next() {
                Some(Token {
                    kind: TokenKind::Number(raw),
                    ..
                }) => parse_int(raw, true).map(Expr::Int),
                Some(_) => Err(Error::UnsupportedExpression(
                    "unary minus on a non-number".to_string(),
                )),
                None => Err(self.end_of_input()),
            },
            TokenKind::Name(name) if UNSUPPORTED_KEYWORDS.contains(&name.as_str()) => Err(
                Error::UnsupportedExpression(format!("'{name}' expression")),
            ),
            TokenKind::Name(name) => Ok(Expr::Name(name.clone())),
            TokenKind::Punct('[') => Ok(Expr::List(self.sequence(']')?.0)),
            TokenKind::Punct('(') => {
                let (mut items, trailing_comma) = self.sequence(')')?;
                if items.len() == 1 && !trailing_comma {
                    Ok(items.remove(0))
                } else {
                    Ok(Expr::Tuple(items))
                }
            }
            TokenKind::Punct('{') => Err(Error::UnsupportedExpression(
                "dict or set literal".to_string(),
            )),
            TokenKind::Punct('*') | TokenKind::Op("**") => Err(Error::UnsupportedExpression(
                "argument unpacking".to_string(),
            )),
            _ => Err(unexpected(token)),
        }
    }

    /// Comma-separated expressions up to `close`. Returns the items and
    /// whether the last one was followed by a comma.
    fn sequence(&mut self, close: char) -> Result<(Vec<Expr>, bool)> {
        self.enter()?;
        let items = self.sequence_items(close)?;
        self.depth -= 1;
        Ok(items)
    }

    fn sequence_items(&mut self, close: char) -> Result<(Vec<Expr>, bool)> {
        let mut items = Vec::new();
        let mut trailing_comma = false;

        loop {
            if self.peek().is_some_and(|t| t.is_punct(close)) {
                self.pos += 1;
                return Ok((items, trailing_comma));
            }
            if let (Some(Token { kind: TokenKind::Name(name), .. }), Some(eq)) =
                (self.peek(), self.tokens.get(self.pos + 1))
            {
                if eq.is_punct('=') {
                    return Err(Error::UnsupportedExpression(format!(
                        "keyword argument '{name}'"
                    )));
                }
            }

            items.push(self.expr()?);
            match self.next() {
                Some(token) if token.is_punct(',') => trailing_comma = true,
                Some(token) if token.is_punct(close) => return Ok((items, false)),
                Some(token) => return Err(stray(token)),
                None => return Err(self.end_of_input()),
            }
        }
    }
}

fn unexpected(token: &Token) -> Error {
    Error::UnexpectedToken {
        line: token.line,
        found: token.kind.to_string(),
    }
}

/// Error for a token found after a complete expression.
fn stray(token: &Token) -> Error {
    match &token.kind {
        TokenKind::Name(name) if UNSUPPORTED_KEYWORDS.contains(&name.as_str()) => {
            Error::UnsupportedExpression(format!("'{name}' expression"))
        }
        TokenKind::Op(op) => Error::UnsupportedExpression(format!("operator '{op}'")),
        TokenKind::Punct(c) if "+-*/%@<>|&^~=:".contains(*c) => {
            Error::UnsupportedExpression(format!("operator '{c}'"))
        }
        _ => unexpected(token),
    }
}

fn parse_int(raw: &str, negative: bool) -> Result<i64> {
    let malformed = || Error::MalformedInteger {
        token: if negative {
            format!("-{raw}")
        } else {
            raw.to_string()
        },
    };

    let digits = raw.replace('_', "");
    let lower = digits.to_ascii_lowercase();
    let (radix, body) = if let Some(hex) = lower.strip_prefix("0x") {
        (16, hex)
    } else if let Some(oct) = lower.strip_prefix("0o") {
        (8, oct)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        (2, bin)
    } else {
        (10, lower.as_str())
    };

    let value = i64::from_str_radix(body, radix).map_err(|_| malformed())?;
    Ok(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::lexer::tokenize;

    fn expr(text: &str) -> Result<Expr> {
        parse_expr(&tokenize(text).unwrap())
    }

    fn s(text: &str) -> Expr {
        Expr::Str(text.to_string())
    }

    #[test]
    fn test_locate_plain_and_annotated_binding() {
        let tokens = tokenize("import x\nPRESETS = {'a': ['#fff']}\n").unwrap();
        assert_eq!(split_entries(locate_binding(&tokens, "PRESETS").unwrap()).len(), 1);

        let text = "PRESETS: dict[str, ColorProfile] = {\n    'a': [],\n    'b': [],\n}\n";
        let tokens = tokenize(text).unwrap();
        let entries = split_entries(locate_binding(&tokens, "PRESETS").unwrap());
        let keys: Vec<_> = entries.iter().map(RawEntry::label).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_binding_must_start_a_statement() {
        let tokens = tokenize("print(PRESETS)\nx.PRESETS = {}\n").unwrap();
        assert!(matches!(
            locate_binding(&tokens, "PRESETS"),
            Err(Error::BindingNotFound { .. })
        ));
    }

    #[test]
    fn test_binding_not_a_dict() {
        let tokens = tokenize("PRESETS = load()\n").unwrap();
        assert!(matches!(
            locate_binding(&tokens, "PRESETS"),
            Err(Error::NotADict { .. })
        ));
    }

    #[test]
    fn test_entry_without_string_key_is_labelled() {
        let tokens = tokenize("{'a': [], KEY: [], **extra}").unwrap();
        let entries = split_entries(&tokens[1..tokens.len() - 1]);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].label(), "<entry 2>");
        assert!(entries[2].value.is_none());
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(expr("'a' \"b\"").unwrap(), s("ab"));
        assert_eq!(expr("-3").unwrap(), Expr::Int(-3));
        assert_eq!(expr("0x1_0").unwrap(), Expr::Int(16));
        assert_eq!(expr("(1)").unwrap(), Expr::Int(1));
        assert_eq!(expr("(1,)").unwrap(), Expr::Tuple(vec![Expr::Int(1)]));
        assert_eq!(
            expr("['a', ('b', 2),]").unwrap(),
            Expr::List(vec![s("a"), Expr::Tuple(vec![s("b"), Expr::Int(2)])])
        );
    }

    #[test]
    fn test_parse_chained_calls() {
        let parsed = expr("ColorProfile(['a']).with_weights([2])").unwrap();
        assert_eq!(
            parsed,
            Expr::call(
                Expr::attribute(
                    Expr::call(Expr::Name("ColorProfile".into()), vec![Expr::List(vec![s("a")])]),
                    "with_weights"
                ),
                vec![Expr::List(vec![Expr::Int(2)])]
            )
        );
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}'a'{}", "[".repeat(10_000), "]".repeat(10_000));
        let err = expr(&deep).unwrap_err();
        assert!(err.to_string().contains("nested deeper"), "{err}");

        let chain = format!("P(['a']){}", ".m([1])".repeat(10_000));
        assert_eq!(expr(&chain).unwrap_err().stage(), "unsupported-expression");

        let ok = format!("{}'a'{}", "[".repeat(MAX_NESTING - 1), "]".repeat(MAX_NESTING - 1));
        assert!(expr(&ok).is_ok());
    }

    #[test]
    fn test_unsupported_shapes() {
        for text in [
            "f(x=1)",
            "x[0]",
            "{'a': 1}",
            "a + b",
            "[c for c in cs]",
            "a if b else c",
            "lambda: 1",
            "f(*args)",
        ] {
            let err = expr(text).unwrap_err();
            assert_eq!(err.stage(), "unsupported-expression", "{text}: {err}");
        }
    }

    #[test]
    fn test_malformed_numbers() {
        assert!(matches!(expr("1.5"), Err(Error::MalformedInteger { .. })));
        assert!(matches!(expr("[1, 2e3]"), Err(Error::MalformedInteger { .. })));
    }

    #[test]
    fn test_unclosed_list() {
        assert!(matches!(expr("['a', 'b'"), Err(Error::UnexpectedToken { .. })));
    }
}
