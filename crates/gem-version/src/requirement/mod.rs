//! Requirement types for version matching

mod operator;
#[allow(clippy::module_inception)]
mod requirement;
mod specifier;

use thiserror::Error;

use crate::VersionError;

pub use operator::Operator;
pub use requirement::Requirement;
pub use specifier::RequirementSpecifier;

/// Error type for requirement parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequirementError {
    #[error("Unable to parse requirement \"{requirement}\" with pattern {pattern}")]
    MalformedRequirement { requirement: String, pattern: String },
    #[error("Invalid operator \"{0}\"")]
    InvalidOperator(String),
    #[error(transparent)]
    Version(#[from] VersionError),
}
