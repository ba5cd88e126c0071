//! Row predicates

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Six-way comparison applied by `TableSession::filter`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    LessThan,
    GreaterThan,
    EqualTo,
    LessOrEqualTo,
    GreaterOrEqualTo,
    NotEqualTo,
}

impl Predicate {
    /// Whether a stored value ordered `ordering` against the threshold passes
    ///
    /// Unordered pairs (NaN) only satisfy `NotEqualTo`.
    pub fn matches(self, ordering: Option<Ordering>) -> bool {
        match (self, ordering) {
            (Predicate::NotEqualTo, ord) => ord != Some(Ordering::Equal),
            (_, None) => false,
            (Predicate::LessThan, Some(ord)) => ord == Ordering::Less,
            (Predicate::GreaterThan, Some(ord)) => ord == Ordering::Greater,
            (Predicate::EqualTo, Some(ord)) => ord == Ordering::Equal,
            (Predicate::LessOrEqualTo, Some(ord)) => ord != Ordering::Greater,
            (Predicate::GreaterOrEqualTo, Some(ord)) => ord != Ordering::Less,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Predicate::LessThan => "<",
            Predicate::GreaterThan => ">",
            Predicate::EqualTo => "=",
            Predicate::LessOrEqualTo => "<=",
            Predicate::GreaterOrEqualTo => ">=",
            Predicate::NotEqualTo => "!=",
        }
    }

    /// Split `a>=3` into (`a`, `>=`, `3`)
    pub fn split_condition(condition: &str) -> Option<(&str, Predicate, &str)> {
        // Two-character operators first so `<=` is not read as `<`
        const OPERATORS: [&str; 7] = ["<=", ">=", "!=", "==", "<", ">", "="];

        OPERATORS.iter().find_map(|op| {
            let (column, value) = condition.split_once(op)?;
            let predicate = op.parse().ok()?;
            Some((column.trim(), predicate, value.trim()))
        })
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Predicate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(Predicate::LessThan),
            ">" => Ok(Predicate::GreaterThan),
            "=" | "==" => Ok(Predicate::EqualTo),
            "<=" => Ok(Predicate::LessOrEqualTo),
            ">=" => Ok(Predicate::GreaterOrEqualTo),
            "!=" => Ok(Predicate::NotEqualTo),
            other => Err(format!("unknown operator '{}'", other)),
        }
    }
}
