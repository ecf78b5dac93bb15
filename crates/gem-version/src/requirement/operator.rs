//! Operator types for requirement specifiers

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::RequirementError;
use crate::Version;

/// Comparison operators accepted in a requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (=)
    Equal,
    /// Not equal (!=)
    NotEqual,
    /// Greater than (>)
    GreaterThan,
    /// Less than (<)
    LessThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Pessimistic (~>): at least the version, below its next bump
    Pessimistic,
}

/// Tokens in the order they must be tried, so `>` never shadows `>=`
const PRECEDENCE: [Operator; 7] = [
    Operator::NotEqual,
    Operator::GreaterThanOrEqual,
    Operator::LessThanOrEqual,
    Operator::Pessimistic,
    Operator::GreaterThan,
    Operator::LessThan,
    Operator::Equal,
];

impl Operator {
    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThanOrEqual => "<=",
            Operator::Pessimistic => "~>",
        }
    }

    /// All operators, longest tokens first
    pub fn precedence_order() -> &'static [Operator] {
        &PRECEDENCE
    }

    /// Get all supported operator tokens, longest first
    pub fn supported_operators() -> &'static [&'static str] {
        &["!=", ">=", "<=", "~>", ">", "<", "="]
    }

    /// Check `candidate` against a requirement on `required`
    pub fn is_satisfied(&self, required: &Version, candidate: &Version) -> bool {
        let ord = required.compare(candidate);

        match self {
            Operator::Equal => ord == Ordering::Equal,
            Operator::NotEqual => ord != Ordering::Equal,
            Operator::GreaterThan => ord == Ordering::Less,
            Operator::LessThan => ord == Ordering::Greater,
            Operator::GreaterThanOrEqual => ord != Ordering::Greater,
            Operator::LessThanOrEqual => ord != Ordering::Less,
            Operator::Pessimistic => {
                if ord == Ordering::Greater {
                    return false;
                }

                match required.release().bump() {
                    Ok(upper) => upper.release().compare(candidate) == Ordering::Greater,
                    Err(err) => {
                        log::debug!("Rejected ~> {} for {}: {}", required, candidate, err);
                        false
                    }
                }
            }
        }
    }
}

impl FromStr for Operator {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PRECEDENCE
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| RequirementError::InvalidOperator(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
