//! Gem facade providing high-level version operations

use crate::{Requirement, Version};

/// String-level helpers for callers that do not hold parsed values
pub struct Gem;

impl Gem {
    /// Check if a version satisfies every requirement.
    /// Malformed input never satisfies anything.
    pub fn satisfies<S: AsRef<str>>(version: &str, requirements: &[S]) -> bool {
        let version = match Version::parse(version) {
            Ok(v) => v,
            Err(_) => return false,
        };

        let requirement = match Requirement::parse(requirements) {
            Ok(r) => r,
            Err(_) => return false,
        };

        requirement.is_satisfied_by(&version)
    }

    /// Return all versions that satisfy the given requirements, in input order
    pub fn satisfied_by<S: AsRef<str>>(versions: &[&str], requirements: &[S]) -> Vec<String> {
        let requirement = match Requirement::parse(requirements) {
            Ok(r) => r,
            Err(_) => return Vec::new(),
        };

        versions
            .iter()
            .filter_map(|v| {
                let parsed = Version::parse(v).ok()?;
                if requirement.is_satisfied_by(&parsed) {
                    Some(v.to_string())
                } else {
                    None
                }
            })
            .collect()
    }

    /// Sort versions oldest first, dropping malformed ones
    pub fn sort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, true)
    }

    /// Sort versions newest first, dropping malformed ones
    pub fn rsort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Vec<String> {
        let mut parsed: Vec<(Version, usize)> = versions
            .iter()
            .enumerate()
            .filter_map(|(i, v)| Some((Version::parse(v).ok()?, i)))
            .collect();

        // stable, so versions that compare equal keep their input order
        parsed.sort_by(|(a, _), (b, _)| {
            let cmp = a.compare(b);
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        parsed
            .into_iter()
            .map(|(_, i)| versions[i].to_string())
            .collect()
    }
}
