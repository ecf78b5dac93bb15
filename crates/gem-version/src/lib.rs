//! Version ordering and requirement matching compatible with RubyGems
//!
//! This crate parses version strings, orders them the way `Gem::Version` does
//! and evaluates requirement sets such as `>= 1.2, < 2.0` against them.

mod gem;
pub mod requirement;
mod segment;
mod version;

pub use gem::Gem;
pub use requirement::{Operator, Requirement, RequirementError, RequirementSpecifier};
pub use segment::SegmentKind;
pub use version::{Version, VersionError, VERSION_PATTERN};
