//! A single operator + version restriction

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Operator, RequirementError};
use crate::version::VERSION_PATTERN;
use crate::Version;

lazy_static! {
    static ref REQUIREMENT_RE: Regex = {
        let operators: Vec<String> = Operator::supported_operators()
            .iter()
            .map(|op| regex::escape(op))
            .collect();

        Regex::new(&format!(
            r"^\s*({})?\s*({})\s*$",
            operators.join("|"),
            VERSION_PATTERN
        ))
        .unwrap()
    };

    static ref DEFAULT_REQUIREMENT: RequirementSpecifier = RequirementSpecifier {
        operator: Operator::GreaterThanOrEqual,
        version: Version::from_segments(&["0"]),
    };

    static ref DEFAULT_PRERELEASE_REQUIREMENT: RequirementSpecifier = RequirementSpecifier {
        operator: Operator::GreaterThanOrEqual,
        version: Version::from_segments(&["0", "a"]),
    };
}

/// Anchored requirement grammar, as reported in parse errors
pub(crate) fn requirement_pattern() -> &'static str {
    REQUIREMENT_RE.as_str()
}

/// One restriction such as `>= 1.2` or `~> 3.0`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RequirementSpecifier {
    operator: Operator,
    version: Version,
}

impl RequirementSpecifier {
    pub fn new(operator: Operator, version: Version) -> Self {
        RequirementSpecifier { operator, version }
    }

    /// `>= 0`, the requirement that matches every release
    pub fn default_requirement() -> &'static RequirementSpecifier {
        &DEFAULT_REQUIREMENT
    }

    /// `>= 0.a`, the requirement that also matches every prerelease
    pub fn default_prerelease_requirement() -> &'static RequirementSpecifier {
        &DEFAULT_PRERELEASE_REQUIREMENT
    }

    /// Parse a requirement such as `> 1.3.5`. A bare version implies `=`.
    ///
    /// `>= 0` and `>= 0.a` resolve to the shared default specifiers and come
    /// back borrowed; everything else is owned.
    pub fn parse(requirement: &str) -> Result<Cow<'static, RequirementSpecifier>, RequirementError> {
        let malformed = || RequirementError::MalformedRequirement {
            requirement: requirement.to_string(),
            pattern: requirement_pattern().to_string(),
        };

        let captures = match REQUIREMENT_RE.captures(requirement) {
            Some(captures) => captures,
            None => {
                log::debug!("Rejected malformed requirement {:?}", requirement);
                return Err(malformed());
            }
        };

        let operator = match captures.get(1) {
            Some(op) => op.as_str().parse::<Operator>()?,
            None => Operator::Equal,
        };
        let raw_version = captures.get(2).ok_or_else(malformed)?.as_str();

        if operator == Operator::GreaterThanOrEqual {
            if raw_version == DEFAULT_REQUIREMENT.version.as_str() {
                return Ok(Cow::Borrowed(Self::default_requirement()));
            }
            if raw_version == DEFAULT_PRERELEASE_REQUIREMENT.version.as_str() {
                return Ok(Cow::Borrowed(Self::default_prerelease_requirement()));
            }
        }

        let version = Version::parse(raw_version)?;
        log::trace!("Parsed requirement {:?} as {} {}", requirement, operator, version);

        Ok(Cow::Owned(RequirementSpecifier { operator, version }))
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Check whether `version` satisfies this restriction
    pub fn is_satisfied_by(&self, version: &Version) -> bool {
        self.operator.is_satisfied(&self.version, version)
    }
}

impl fmt::Display for RequirementSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator, self.version)
    }
}

impl FromStr for RequirementSpecifier {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequirementSpecifier::parse(s).map(Cow::into_owned)
    }
}

impl TryFrom<String> for RequirementSpecifier {
    type Error = RequirementError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RequirementSpecifier> for String {
    fn from(specifier: RequirementSpecifier) -> Self {
        specifier.to_string()
    }
}
