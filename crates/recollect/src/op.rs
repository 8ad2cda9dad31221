//! Comparison operators for where-family filters.
//!
//! The [`Operator`] enum is the closed set of operators the predicate engine
//! understands. Operators are usually written as strings (`"=="`, `"<>"`,
//! `"LIKE"`); anything unrecognized falls back to strict equality.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Comparison operator for a predicate.
///
/// - **Equality**: `LooseEq` (`==`), `StrictEq` (`===`)
/// - **Inequality**: `LooseNe` (`!=`, `<>`), `StrictNe` (`!==`)
/// - **Ordering**: `Lt`, `Lte`, `Gt`, `Gte`
/// - **Pattern**: `Like` (SQL-style `%` and `_`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    /// `==`: equality after coercion.
    LooseEq,
    /// `===`: equality without coercion. Also the fallback.
    #[default]
    StrictEq,
    /// `!=` or `<>`: negated loose equality.
    LooseNe,
    /// `!==`: negated strict equality.
    StrictNe,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `LIKE`: case-insensitive SQL pattern match on strings.
    Like,
}

impl Operator {
    /// Parses an operator string. Unrecognized input yields `StrictEq`.
    ///
    /// `LIKE` is accepted in any letter case.
    pub fn parse(text: &str) -> Operator {
        match text {
            "==" => Operator::LooseEq,
            "===" => Operator::StrictEq,
            "!=" | "<>" => Operator::LooseNe,
            "!==" => Operator::StrictNe,
            "<" => Operator::Lt,
            "<=" => Operator::Lte,
            ">" => Operator::Gt,
            ">=" => Operator::Gte,
            _ if text.eq_ignore_ascii_case("like") => Operator::Like,
            _ => {
                tracing::trace!(operator = text, "unknown operator, using strict equality");
                Operator::StrictEq
            }
        }
    }

    /// Returns `true` for the four ordering operators.
    pub fn is_ordering(self) -> bool {
        matches!(self, Operator::Lt | Operator::Lte | Operator::Gt | Operator::Gte)
    }

    /// Returns `true` for the negated operators.
    pub fn is_negation(self) -> bool {
        matches!(self, Operator::LooseNe | Operator::StrictNe)
    }

    /// Evaluates an ordering operator given the result of comparing the
    /// property to the value. Non-ordering operators return `false`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Operator::Lt => ordering == Ordering::Less,
            Operator::Lte => ordering != Ordering::Greater,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Gte => ordering != Ordering::Less,
            _ => false,
        }
    }

    /// Returns the canonical spelling of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::LooseEq => "==",
            Operator::StrictEq => "===",
            Operator::LooseNe => "!=",
            Operator::StrictNe => "!==",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Like => "LIKE",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Operator::parse(s))
    }
}

impl From<&str> for Operator {
    fn from(s: &str) -> Self {
        Operator::parse(s)
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Operator::parse(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_operators() {
        assert_eq!(Operator::parse("=="), Operator::LooseEq);
        assert_eq!(Operator::parse("==="), Operator::StrictEq);
        assert_eq!(Operator::parse("!="), Operator::LooseNe);
        assert_eq!(Operator::parse("<>"), Operator::LooseNe);
        assert_eq!(Operator::parse("!=="), Operator::StrictNe);
        assert_eq!(Operator::parse("<"), Operator::Lt);
        assert_eq!(Operator::parse("<="), Operator::Lte);
        assert_eq!(Operator::parse(">"), Operator::Gt);
        assert_eq!(Operator::parse(">="), Operator::Gte);
        assert_eq!(Operator::parse("LIKE"), Operator::Like);
        assert_eq!(Operator::parse("like"), Operator::Like);
    }

    #[test]
    fn unknown_operators_fall_back_to_strict_equality() {
        assert_eq!(Operator::parse("~="), Operator::StrictEq);
        assert_eq!(Operator::parse(""), Operator::StrictEq);
        assert_eq!(Operator::parse("= ="), Operator::StrictEq);
        assert_eq!("contains".parse::<Operator>(), Ok(Operator::StrictEq));
    }

    #[test]
    fn ordering_evaluation() {
        assert!(Operator::Lt.eval_ordering(Ordering::Less));
        assert!(!Operator::Lt.eval_ordering(Ordering::Equal));
        assert!(Operator::Lte.eval_ordering(Ordering::Equal));
        assert!(!Operator::Lte.eval_ordering(Ordering::Greater));
        assert!(Operator::Gt.eval_ordering(Ordering::Greater));
        assert!(!Operator::Gt.eval_ordering(Ordering::Equal));
        assert!(Operator::Gte.eval_ordering(Ordering::Equal));
        assert!(!Operator::Gte.eval_ordering(Ordering::Less));
        assert!(!Operator::LooseEq.eval_ordering(Ordering::Equal));
    }

    #[test]
    fn classification() {
        assert!(Operator::Gte.is_ordering());
        assert!(!Operator::Like.is_ordering());
        assert!(Operator::StrictNe.is_negation());
        assert!(!Operator::StrictEq.is_negation());
    }

    #[test]
    fn display_round_trips() {
        for op in [
            Operator::LooseEq,
            Operator::StrictEq,
            Operator::LooseNe,
            Operator::StrictNe,
            Operator::Lt,
            Operator::Lte,
            Operator::Gt,
            Operator::Gte,
            Operator::Like,
        ] {
            assert_eq!(Operator::parse(&op.to_string()), op);
        }
    }

    #[test]
    fn serde_uses_symbols() {
        let op: Operator = serde_json::from_str(r#""<>""#).unwrap();
        assert_eq!(op, Operator::LooseNe);
        assert_eq!(serde_json::to_string(&Operator::Like).unwrap(), r#""LIKE""#);
    }
}
