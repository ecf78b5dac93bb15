//! Requirement - a conjunction of requirement specifiers

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Operator, RequirementError, RequirementSpecifier};
use crate::Version;

/// A set of one or more version restrictions, all of which must hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Requirement {
    specifiers: Vec<Cow<'static, RequirementSpecifier>>,
}

impl Requirement {
    /// Parse every requirement string; the first failure is returned unchanged
    pub fn parse<I, S>(requirements: I) -> Result<Self, RequirementError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let specifiers = requirements
            .into_iter()
            .map(|requirement| RequirementSpecifier::parse(requirement.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Requirement { specifiers })
    }

    /// A requirement that only holds `>= 0`
    pub fn default_requirement() -> Self {
        Requirement {
            specifiers: vec![Cow::Borrowed(RequirementSpecifier::default_requirement())],
        }
    }

    /// A requirement that only holds `>= 0.a`
    pub fn default_prerelease_requirement() -> Self {
        Requirement {
            specifiers: vec![Cow::Borrowed(RequirementSpecifier::default_prerelease_requirement())],
        }
    }

    /// Append more restrictions.
    ///
    /// Each new restriction is checked against every existing one in turn. It
    /// is skipped when it shares that one's operator or its version compares
    /// equal, and appended otherwise, so it can land once per dissimilar
    /// existing restriction. Nothing is appended to an empty requirement.
    ///
    /// All inputs are parsed before anything is appended; on error the
    /// requirement is left untouched.
    pub fn concat<I, S>(&mut self, requirements: I) -> Result<&mut Self, RequirementError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = requirements
            .into_iter()
            .map(|requirement| RequirementSpecifier::parse(requirement.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        for candidate in parsed {
            let registered_count = self.specifiers.len();

            for index in 0..registered_count {
                let registered = &self.specifiers[index];
                if registered.operator() == candidate.operator()
                    || candidate.version().compare(registered.version()) == Ordering::Equal
                {
                    log::debug!("Skipping requirement {} against {}", candidate, registered);
                    continue;
                }

                log::debug!("Appending requirement {} after {}", candidate, registered);
                self.specifiers.push(candidate.clone());
            }
        }

        Ok(self)
    }

    pub fn specifiers(&self) -> impl Iterator<Item = &RequirementSpecifier> {
        self.specifiers.iter().map(|specifier| &**specifier)
    }

    pub fn len(&self) -> usize {
        self.specifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specifiers.is_empty()
    }

    /// True for a single `>=` restriction whose version compares equal to `0.a`
    pub fn has_none(&self) -> bool {
        match self.specifiers.as_slice() {
            [only] => {
                let prerelease_default = RequirementSpecifier::default_prerelease_requirement();
                only.operator() == RequirementSpecifier::default_requirement().operator()
                    && only.version().compare(prerelease_default.version()) == Ordering::Equal
            }
            _ => false,
        }
    }

    /// True if the requirement pins one exact version
    pub fn is_exact(&self) -> bool {
        matches!(self.specifiers.as_slice(), [only] if only.operator() == Operator::Equal)
    }

    /// True if any restriction names a prerelease
    pub fn is_prerelease(&self) -> bool {
        self.specifiers().any(|specifier| specifier.version().is_prerelease())
    }

    /// False only for a lone open-ended `>` or `<` restriction
    pub fn is_specific(&self) -> bool {
        match self.specifiers.as_slice() {
            [only] => !matches!(only.operator(), Operator::GreaterThan | Operator::LessThan),
            _ => true,
        }
    }

    /// True if `version` satisfies every restriction
    pub fn is_satisfied_by(&self, version: &Version) -> bool {
        self.specifiers().all(|specifier| specifier.is_satisfied_by(version))
    }

    /// Each restriction rendered as `<op> <version>`
    pub fn as_list(&self) -> Vec<String> {
        self.specifiers().map(|specifier| specifier.to_string()).collect()
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_list().join(", "))
    }
}

impl TryFrom<Vec<String>> for Requirement {
    type Error = RequirementError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Requirement::parse(value)
    }
}

impl From<Requirement> for Vec<String> {
    fn from(requirement: Requirement) -> Self {
        requirement.as_list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(input: &str) -> Version {
        Version::parse(input).unwrap()
    }

    fn req(requirements: &[&str]) -> Requirement {
        Requirement::parse(requirements).unwrap()
    }

    #[test]
    fn test_parse() {
        let requirement = req(&[">= 1.3.5"]);
        assert_eq!(requirement.len(), 1);
        assert_eq!(requirement.as_list(), vec![">= 1.3.5"]);

        let requirement = req(&["> 1.2", "< 1.4", "!= 1.3.3"]);
        assert_eq!(requirement.to_string(), "> 1.2, < 1.4, != 1.3.3");
    }

    #[test]
    fn test_parse_keeps_duplicates() {
        let requirement = req(&["> 1.2", "> 1.2"]);
        assert_eq!(requirement.len(), 2);
    }

    #[test]
    fn test_parse_propagates_first_error() {
        let err = Requirement::parse(["> 1.2", "1.", "~~ 2"]).unwrap_err();
        assert!(matches!(
            err,
            RequirementError::MalformedRequirement { ref requirement, .. } if requirement == "1."
        ));
    }

    #[test]
    fn test_is_satisfied_by() {
        assert!(!req(&[">= 1.3.5"]).is_satisfied_by(&v("1.0.6")));
        assert!(req(&[">= 1.3.5"]).is_satisfied_by(&v("1.3.5")));

        let requirement = req(&["> 1.2", "< 1.4", "!= 1.3.3"]);
        assert!(requirement.is_satisfied_by(&v("1.3.5")));
        assert!(!requirement.is_satisfied_by(&v("1.3.3")));
        assert!(!requirement.is_satisfied_by(&v("1.4")));
        assert!(!requirement.is_satisfied_by(&v("1.2")));

        assert!(req(&["~> 3.5"]).is_satisfied_by(&v("3.5.1")));
        assert!(!req(&["~> 3.5"]).is_satisfied_by(&v("3.4")));
    }

    #[test]
    fn test_empty_requirement() {
        let requirement = Requirement::parse(Vec::<String>::new()).unwrap();
        assert!(requirement.is_empty());
        assert!(requirement.is_satisfied_by(&v("0.1")));
        assert!(requirement.is_specific());
        assert!(!requirement.is_exact());
        assert!(!requirement.has_none());
        assert_eq!(requirement.to_string(), "");
    }

    #[test]
    fn test_is_exact() {
        assert!(req(&["= 1.0"]).is_exact());
        assert!(req(&["1.0"]).is_exact());
        assert!(!req(&[">= 1.0"]).is_exact());
        assert!(!req(&["= 1.0", "= 1.0"]).is_exact());
    }

    #[test]
    fn test_is_prerelease() {
        assert!(req(&["> 1.0", "< 2.0.rc1"]).is_prerelease());
        assert!(req(&["~> 1.5-3"]).is_prerelease());
        assert!(!req(&["> 1.0", "< 2.0"]).is_prerelease());
    }

    #[test]
    fn test_is_specific() {
        assert!(!req(&["> 1"]).is_specific());
        assert!(!req(&["< 1"]).is_specific());
        assert!(req(&[">= 1"]).is_specific());
        assert!(req(&["= 1"]).is_specific());
        assert!(req(&["~> 1"]).is_specific());
        assert!(req(&["> 1", "< 2"]).is_specific());
    }

    #[test]
    fn test_has_none_mixes_default_operator_with_prerelease_version() {
        // Inherited behavior: only a requirement equivalent to `>= 0.a` reports none.
        assert!(req(&[">= 0.a"]).has_none());
        assert!(Requirement::default_prerelease_requirement().has_none());
        assert!(req(&[">= 0.0.a"]).has_none());

        assert!(!req(&[">= 0"]).has_none());
        assert!(!Requirement::default_requirement().has_none());
        assert!(!req(&["> 0.a"]).has_none());
        assert!(!req(&[">= 0.a", "< 1"]).has_none());
    }

    #[test]
    fn test_concat_appends_dissimilar() {
        let mut requirement = req(&["> 1.0"]);
        requirement.concat(["< 2.0"]).unwrap();
        assert_eq!(requirement.as_list(), vec!["> 1.0", "< 2.0"]);
    }

    #[test]
    fn test_concat_skips_same_operator_or_equal_version() {
        let mut requirement = req(&["> 1.0"]);
        requirement.concat(["> 3", "<= 1.0", "= 1.0.0"]).unwrap();
        assert_eq!(requirement.as_list(), vec!["> 1.0"]);
    }

    #[test]
    fn test_concat_appends_once_per_dissimilar_specifier() {
        // Inherited behavior: the new restriction lands once per existing one it differs from.
        let mut requirement = req(&["> 1.0", "< 2.0"]);
        requirement.concat(["!= 1.5"]).unwrap();
        assert_eq!(requirement.as_list(), vec!["> 1.0", "< 2.0", "!= 1.5", "!= 1.5"]);
        assert!(requirement.is_satisfied_by(&v("1.6")));
        assert!(!requirement.is_satisfied_by(&v("1.5")));
    }

    #[test]
    fn test_concat_sees_earlier_appends() {
        let mut requirement = req(&["> 1.0"]);
        requirement.concat(["< 2.0", "< 1.8"]).unwrap();
        // `< 1.8` is skipped against `< 2.0` but appended against `> 1.0`
        assert_eq!(requirement.as_list(), vec!["> 1.0", "< 2.0", "< 1.8"]);
    }

    #[test]
    fn test_concat_on_empty_appends_nothing() {
        let mut requirement = Requirement::parse(Vec::<&str>::new()).unwrap();
        requirement.concat(["> 1.0"]).unwrap();
        assert!(requirement.is_empty());
    }

    #[test]
    fn test_concat_malformed_leaves_requirement_untouched() {
        let mut requirement = req(&["> 1.0"]);
        let result = requirement.concat(["< 2.0", "1."]);
        assert!(result.is_err());
        assert_eq!(requirement.as_list(), vec!["> 1.0"]);
    }

    #[test]
    fn test_concat_returns_self() {
        let mut requirement = req(&["> 1.0"]);
        let len = requirement.concat(["< 2.0"]).unwrap().len();
        assert_eq!(len, 2);
    }

    #[test]
    fn test_serde() {
        let requirement = req(&["~> 1.2", "!= 1.2.5"]);
        let json = serde_json::to_string(&requirement).unwrap();
        assert_eq!(json, r#"["~> 1.2","!= 1.2.5"]"#);

        let back: Requirement = serde_json::from_str(r#"["~>1.2", "!=1.2.5"]"#).unwrap();
        assert_eq!(back, requirement);

        assert!(serde_json::from_str::<Requirement>(r#"["~> 1."]"#).is_err());
    }
}
