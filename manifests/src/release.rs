use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Release channel of an uploaded version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionType {
    Alpha,
    Beta,
    #[default]
    Release,
}

impl VersionType {
    /// Parses the raw `release_type` input. An empty value is accepted and
    /// yields `None`; the default is applied when the payload is built.
    pub fn parse_opt(s: &str) -> Result<Option<Self>, ValidationError> {
        Ok(Some(match s {
            "" => return Ok(None),
            "alpha" => Self::Alpha,
            "beta" => Self::Beta,
            "release" => Self::Release,
            given => {
                return Err(ValidationError::InvalidReleaseType {
                    given: given.into(),
                });
            },
        }))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Release => "release",
        }
    }
}

impl Display for VersionType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test_case::test_case("", None; "empty is unset")]
    #[test_case::test_case("alpha", Some(VersionType::Alpha); "alpha")]
    #[test_case::test_case("beta", Some(VersionType::Beta); "beta")]
    #[test_case::test_case("release", Some(VersionType::Release); "release")]
    fn test_parse_ok(
        raw: &str,
        expect: Option<VersionType>,
    ) {
        assert_eq!(VersionType::parse_opt(raw).unwrap(), expect);
    }

    #[test_case::test_case("stable"; "unknown")]
    #[test_case::test_case("RELEASE"; "wrong case")]
    #[test_case::test_case(" "; "whitespace")]
    fn test_parse_err(raw: &str) {
        assert_eq!(
            VersionType::parse_opt(raw).unwrap_err(),
            ValidationError::InvalidReleaseType { given: raw.into() }
        );
    }

    #[test]
    fn test_default_is_release() {
        assert_eq!(VersionType::default(), VersionType::Release);
        assert_eq!(
            serde_json::to_value(VersionType::default()).unwrap(),
            serde_json::json!("release")
        );
    }
}
