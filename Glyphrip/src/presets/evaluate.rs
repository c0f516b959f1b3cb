//! Literal evaluation and preset classification

use super::ast::Expr;
use super::expand::expand;
use crate::error::{Error, Result};

/// A fully evaluated literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Str(String),
    Int(i64),
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
}

impl Literal {
    fn describe(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
        }
    }

    fn items(&self) -> Option<&[Literal]> {
        match self {
            Self::List(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    fn strings(&self) -> Option<Vec<String>> {
        self.items()?
            .iter()
            .map(|item| match item {
                Self::Str(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    fn ints(&self) -> Option<Vec<i64>> {
        self.items()?
            .iter()
            .map(|item| match item {
                Self::Int(n) => Some(*n),
                _ => None,
            })
            .collect()
    }
}

/// Evaluate a flattened expression. Identifiers, attributes and calls that
/// survived flattening are rejected. Recursion follows the tree, which the
/// parser caps at [`MAX_NESTING`](super::parser::MAX_NESTING) levels.
pub fn evaluate(expr: &Expr) -> Result<Literal> {
    match expr {
        Expr::Str(s) => Ok(Literal::Str(s.clone())),
        Expr::Int(n) => Ok(Literal::Int(*n)),
        Expr::List(items) => items.iter().map(evaluate).collect::<Result<_>>().map(Literal::List),
        Expr::Tuple(items) => items.iter().map(evaluate).collect::<Result<_>>().map(Literal::Tuple),
        other => Err(Error::UnsupportedExpression(other.describe())),
    }
}

/// The value of one preset, before run-length expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetValue {
    /// A plain color sequence.
    Flat(Vec<String>),
    /// A `(values, counts)` pair.
    Weighted { values: Vec<String>, counts: Vec<usize> },
}

impl PresetValue {
    /// The flat color sequence, expanding weighted values.
    pub fn into_sequence(self) -> Result<Vec<String>> {
        match self {
            Self::Flat(values) => Ok(values),
            Self::Weighted { values, counts } => expand(&values, &counts),
        }
    }
}

impl TryFrom<Literal> for PresetValue {
    type Error = Error;

    fn try_from(literal: Literal) -> Result<Self> {
        if let Some(values) = literal.strings() {
            return Ok(Self::Flat(values));
        }

        if let Literal::Tuple(pair) = &literal {
            if let [values, counts] = pair.as_slice() {
                if let (Some(values), Some(counts)) = (values.strings(), counts.ints()) {
                    let counts = counts
                        .into_iter()
                        .map(|count| {
                            usize::try_from(count).map_err(|_| Error::NegativeCount { count })
                        })
                        .collect::<Result<_>>()?;
                    return Ok(Self::Weighted { values, counts });
                }
            }
        }

        Err(Error::UnsupportedExpression(format!(
            "{} is neither a color sequence nor a (colors, weights) pair",
            literal.describe()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(items: &[&str]) -> Literal {
        Literal::List(items.iter().map(|s| Literal::Str((*s).to_string())).collect())
    }

    fn ints(items: &[i64]) -> Literal {
        Literal::List(items.iter().copied().map(Literal::Int).collect())
    }

    #[test]
    fn test_flat_list_and_tuple() {
        assert_eq!(
            PresetValue::try_from(strs(&["#a", "#b"])).unwrap(),
            PresetValue::Flat(vec!["#a".into(), "#b".into()])
        );
        let tuple = Literal::Tuple(vec![Literal::Str("#a".into()), Literal::Str("#b".into())]);
        assert!(matches!(PresetValue::try_from(tuple), Ok(PresetValue::Flat(_))));
    }

    #[test]
    fn test_weighted_pair() {
        let pair = Literal::Tuple(vec![strs(&["red", "blue"]), ints(&[2, 3])]);
        let value = PresetValue::try_from(pair).unwrap();
        assert_eq!(
            value.into_sequence().unwrap(),
            vec!["red", "red", "blue", "blue", "blue"]
        );
    }

    #[test]
    fn test_negative_count() {
        let pair = Literal::Tuple(vec![strs(&["red"]), ints(&[-1])]);
        let err = PresetValue::try_from(pair).unwrap_err();
        assert!(matches!(err, Error::NegativeCount { count: -1 }));
        assert_eq!(err.stage(), "malformed-token");
    }

    #[test]
    fn test_other_shapes_unsupported() {
        for literal in [
            Literal::Str("#a".into()),
            ints(&[1, 2]),
            Literal::Tuple(vec![strs(&["a"]), ints(&[1]), ints(&[1])]),
            Literal::List(vec![strs(&["a"])]),
        ] {
            assert!(matches!(
                PresetValue::try_from(literal),
                Err(Error::UnsupportedExpression(_))
            ));
        }
    }

    #[test]
    fn test_evaluate_rejects_leftover_names() {
        let expr = Expr::List(vec![Expr::Name("RED".into())]);
        assert!(matches!(evaluate(&expr), Err(Error::UnsupportedExpression(_))));
    }

    #[test]
    fn test_mismatched_pair_fails_on_expansion() {
        let pair = Literal::Tuple(vec![strs(&["a", "b"]), ints(&[1])]);
        let value = PresetValue::try_from(pair).unwrap();
        assert!(matches!(
            value.into_sequence(),
            Err(Error::RunLengthMismatch { values: 2, counts: 1 })
        ));
    }
}
