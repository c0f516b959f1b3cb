//! Expression tree of the construction grammar

/// An expression in the closed literal/constructor grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// String literal (adjacent literals already concatenated).
    Str(String),
    /// Integer literal.
    Int(i64),
    /// Bare identifier.
    Name(String),
    /// `[a, b, ...]`
    List(Vec<Expr>),
    /// `(a, b, ...)`
    Tuple(Vec<Expr>),
    /// `func(args...)`, positional arguments only.
    Call { func: Box<Expr>, args: Vec<Expr> },
    /// `value.attr`
    Attribute { value: Box<Expr>, attr: String },
}

impl Expr {
    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Str(_) => "string literal".to_string(),
            Self::Int(_) => "integer literal".to_string(),
            Self::Name(name) => format!("identifier '{name}'"),
            Self::List(_) => "list".to_string(),
            Self::Tuple(_) => "tuple".to_string(),
            Self::Call { func, .. } => format!("call to {}", func.describe()),
            Self::Attribute { attr, .. } => format!("attribute '.{attr}'"),
        }
    }

    pub(crate) fn call(func: Expr, args: Vec<Expr>) -> Self {
        Self::Call {
            func: Box::new(func),
            args,
        }
    }

    pub(crate) fn attribute(value: Expr, attr: impl Into<String>) -> Self {
        Self::Attribute {
            value: Box::new(value),
            attr: attr.into(),
        }
    }
}
