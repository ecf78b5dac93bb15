//! Version values: parsing, ordering, bumping

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::segment::{self, SegmentKind};

/// Unanchored version grammar, shared with the requirement grammar
pub const VERSION_PATTERN: &str = r"[0-9]+(?:\.[0-9a-zA-Z]+)*(?:-[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*)?";

lazy_static! {
    static ref VERSION_RE: Regex = Regex::new(&format!(r"^\s*({})?\s*$", VERSION_PATTERN)).unwrap();
}

/// Error type for version handling
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Malformed version number string \"{0}\"")]
    MalformedVersion(String),
    #[error("Cannot bump version \"{0}\": no numeric segment left to increment")]
    InvalidBumpState(String),
}

/// A parsed version.
///
/// A version string is a series of numbers separated by periods. Each part is
/// compared as an integer, so `3.10` sorts above `3.2`. Any part containing
/// letters marks the version as a prerelease, which sorts below the release it
/// precedes. Mixed parts are split, so `1.0.a10` reads as `1.0.a.10`.
///
/// Newest to oldest:
///
/// 1. `1.0`
/// 2. `1.0.b1`, `1.0.a.2` (see [`Version::compare`] for how letters tie)
/// 3. `0.9`
///
/// Equality (`==`, [`Version::eql`]) is strict: `1` and `1.0` are different
/// values even though [`Version::compare`] orders them as equal. For that
/// reason `Version` does not implement `Ord`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    version: String,
}

impl Version {
    /// Parse and normalize a version string.
    ///
    /// Surrounding whitespace is dropped, blank input becomes `0`, and every
    /// `-` is rewritten to `.pre.` so `1.5-3` is stored as `1.5.pre.3`.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        if !VERSION_RE.is_match(input) {
            log::debug!("Rejected malformed version {:?}", input);
            return Err(VersionError::MalformedVersion(input.to_string()));
        }

        let trimmed = input.trim();
        let version = if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.replace('-', ".pre.")
        };

        log::trace!("Parsed version {:?} as {}", input, version);
        Ok(Version { version })
    }

    /// Parse a version string, returning `None` if it is malformed
    pub fn parse_opt(input: &str) -> Option<Self> {
        Self::parse(input).ok()
    }

    /// Build from segments already known to match the grammar
    pub(crate) fn from_segments(segments: &[&str]) -> Self {
        if segments.is_empty() {
            return Version {
                version: "0".to_string(),
            };
        }

        Version {
            version: segments.join("."),
        }
    }

    /// The normalized version string
    pub fn as_str(&self) -> &str {
        &self.version
    }

    pub fn segments(&self) -> Vec<&str> {
        segment::segments(&self.version)
    }

    /// The leading numeric segments and the remaining prerelease segments
    pub fn split_segments(&self) -> (Vec<&str>, Vec<&str>) {
        let segments = self.segments();
        let (numeric, alphabetic) = segment::split(&segments);
        (numeric.to_vec(), alphabetic.to_vec())
    }

    /// Segments with redundant trailing zeros removed; used for ordering only
    pub fn canonical_segments(&self) -> Vec<&str> {
        segment::canonical(&self.segments())
    }

    /// A version is a prerelease if it contains a letter
    pub fn is_prerelease(&self) -> bool {
        self.version.bytes().any(|b| b.is_ascii_alphabetic())
    }

    /// The release for this version (e.g. `1.2.0.a` -> `1.2.0`).
    /// Non-prerelease versions return themselves.
    pub fn release(&self) -> Version {
        if !self.is_prerelease() {
            return self.clone();
        }

        let segments = self.segments();
        Version::from_segments(&segment::release_segments(&segments))
    }

    /// Increment the next to last release number, dropping everything after it.
    ///
    /// `5.3.1` becomes `5.4`; prerelease parts are ignored, so `5.3.1.b.2` also
    /// becomes `5.4`. A single-segment version is incremented in place.
    pub fn bump(&self) -> Result<Version, VersionError> {
        let segments = self.segments();
        let mut release = segment::release_segments(&segments);

        if release.len() > 1 {
            release.pop();
        }

        let last = release
            .pop()
            .ok_or_else(|| VersionError::InvalidBumpState(self.version.clone()))?;
        let bumped = segment::increment(last)
            .ok_or_else(|| VersionError::InvalidBumpState(self.version.clone()))?;

        let mut joined = release.join(".");
        if !joined.is_empty() {
            joined.push('.');
        }
        joined.push_str(&bumped);

        Version::parse(&joined)
    }

    /// A recommended requirement string for use with `~>`
    pub fn approximate_recommendation(&self) -> String {
        let segments = self.segments();
        let mut release = segment::release_segments(&segments);

        release.truncate(2);
        while release.len() < 2 {
            release.push("0");
        }

        let mut recommendation = format!("~> {}", release.join("."));
        if self.is_prerelease() {
            recommendation.push_str(".a");
        }

        recommendation
    }

    /// Strict equality: `1.0` is not `eql` to `1`
    pub fn eql(&self, other: &Version) -> bool {
        self.version == other.version
    }

    /// Compare against `other` by canonical segments.
    ///
    /// The shorter side is padded with `0`. A letter sorts below a number at
    /// the same position. Two differently spelled letter segments tie and the
    /// next position decides, so `1.0.a.2` and `1.0.b.2` compare equal.
    pub fn compare(&self, other: &Version) -> Ordering {
        let lhs = self.canonical_segments();
        let rhs = other.canonical_segments();

        if self.version == other.version || lhs == rhs {
            return Ordering::Equal;
        }

        let limit = lhs.len().max(rhs.len());
        for i in 0..limit {
            let left = lhs.get(i).copied().unwrap_or("0");
            let right = rhs.get(i).copied().unwrap_or("0");

            if left == right {
                continue;
            }

            match (SegmentKind::of(left), SegmentKind::of(right)) {
                (SegmentKind::Alphabetic, SegmentKind::Numeric) => return Ordering::Less,
                (SegmentKind::Numeric, SegmentKind::Alphabetic) => return Ordering::Greater,
                (SegmentKind::Alphabetic, SegmentKind::Alphabetic) => continue,
                (SegmentKind::Numeric, SegmentKind::Numeric) => {
                    let ord = segment::compare_numeric(left, right);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
            }
        }

        Ordering::Equal
    }

    /// [`Version::compare`] as `-1`, `0` or `1`
    pub fn compare_i8(&self, other: &Version) -> i8 {
        self.compare(other) as i8
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Version::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.version
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.version
    }
}
