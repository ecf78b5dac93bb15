//! Segment extraction and canonicalization
//!
//! A version string is read as a sequence of segments: maximal runs of digits
//! or letters, with every separator dropped. All ordering decisions are made on
//! these segments, so the numeric/alphabetic classification lives here and
//! nowhere else.

use std::cmp::Ordering;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SEGMENT_RE: Regex = Regex::new(r"[0-9]+|[a-zA-Z]+").unwrap();
}

/// The two kinds of segment a version can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// A run of digits, compared as an integer
    Numeric,
    /// A run of letters, marking a prerelease
    Alphabetic,
}

impl SegmentKind {
    /// Classify a segment. Anything containing a letter is alphabetic.
    pub fn of(segment: &str) -> Self {
        if segment.bytes().any(|b| b.is_ascii_alphabetic()) {
            SegmentKind::Alphabetic
        } else {
            SegmentKind::Numeric
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, SegmentKind::Numeric)
    }

    pub fn is_alphabetic(&self) -> bool {
        matches!(self, SegmentKind::Alphabetic)
    }
}

/// Split a canonical version string into its segments, left to right
pub(crate) fn segments(version: &str) -> Vec<&str> {
    SEGMENT_RE.find_iter(version).map(|m| m.as_str()).collect()
}

/// The leading segments up to (excluding) the first alphabetic one
pub(crate) fn release_segments<'a>(segments: &[&'a str]) -> Vec<&'a str> {
    segments
        .iter()
        .take_while(|s| SegmentKind::of(s).is_numeric())
        .copied()
        .collect()
}

/// Split into the leading numeric run and everything from the first alphabetic segment on
pub(crate) fn split<'a, 'b>(segments: &'b [&'a str]) -> (&'b [&'a str], &'b [&'a str]) {
    let start = segments
        .iter()
        .position(|s| SegmentKind::of(s).is_alphabetic())
        .unwrap_or(segments.len());

    segments.split_at(start)
}

/// Segments with the trailing zeros of each run removed.
///
/// The numeric run and the alphabetic run are trimmed independently, so
/// `2.3.0.pre.0` loses both zeros while `2.3.pre.0.pre` keeps its inner zero.
pub(crate) fn canonical<'a>(segments: &[&'a str]) -> Vec<&'a str> {
    let (numeric, alphabetic) = split(segments);

    let mut canonical = Vec::with_capacity(segments.len());
    canonical.extend_from_slice(trim_trailing_zeros(numeric));
    canonical.extend_from_slice(trim_trailing_zeros(alphabetic));
    canonical
}

fn trim_trailing_zeros<'a, 'b>(run: &'b [&'a str]) -> &'b [&'a str] {
    let keep = run
        .iter()
        .rposition(|s| !is_zero(s))
        .map_or(0, |last| last + 1);

    &run[..keep]
}

fn is_zero(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b == b'0')
}

/// Compare two digit runs by integer value, without width limits
pub(crate) fn compare_numeric(left: &str, right: &str) -> Ordering {
    let left = strip_leading_zeros(left);
    let right = strip_leading_zeros(right);

    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

fn strip_leading_zeros(digits: &str) -> &str {
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        "0"
    } else {
        stripped
    }
}

/// Add one to a digit run. Returns `None` when the input is not a digit run.
pub(crate) fn increment(digits: &str) -> Option<String> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut bytes = strip_leading_zeros(digits).as_bytes().to_vec();
    for byte in bytes.iter_mut().rev() {
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            return String::from_utf8(bytes).ok();
        }
    }

    // every digit carried over
    bytes.insert(0, b'1');
    String::from_utf8(bytes).ok()
}
