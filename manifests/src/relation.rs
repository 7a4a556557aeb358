use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// How a version relates to another project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyType {
    Required,
    Optional,
    Incompatible,
    Embedded,
}

impl DependencyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::Incompatible => "incompatible",
            Self::Embedded => "embedded",
        }
    }
}

impl Display for DependencyType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "required" => Self::Required,
            "optional" => Self::Optional,
            "incompatible" => Self::Incompatible,
            "embedded" => Self::Embedded,
            given => {
                return Err(ValidationError::InvalidRelationType {
                    given: given.into(),
                });
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub project_id: String,
    pub dependency_type: DependencyType,
}

impl Relation {
    /// Parses a single `project_id:dependency_type` token. Segments after the
    /// second colon are ignored.
    pub fn parse(token: &str) -> Result<Self, ValidationError> {
        let mut parts = token.split(':');
        let project_id = parts.next().unwrap_or_default();

        let Some(kind) = parts.next() else {
            return Err(ValidationError::MissingRelationType {
                token: token.into(),
            });
        };

        Ok(Self {
            project_id: project_id.into(),
            dependency_type: kind.parse()?,
        })
    }

    /// Parses a comma separated relation list, skipping empty entries. Every
    /// invalid token is reported, not only the first.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, Vec<ValidationError>> {
        let mut relations = vec![];
        let mut errors = vec![];

        for token in raw.split(',').filter(|it| !it.is_empty()) {
            match Self::parse(token) {
                Ok(rel) => relations.push(rel),
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(relations)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test_case::test_case("required", DependencyType::Required; "required")]
    #[test_case::test_case("optional", DependencyType::Optional; "optional")]
    #[test_case::test_case("incompatible", DependencyType::Incompatible; "incompatible")]
    #[test_case::test_case("embedded", DependencyType::Embedded; "embedded")]
    fn test_dependency_type_ok(
        raw: &str,
        expect: DependencyType,
    ) {
        assert_eq!(raw.parse::<DependencyType>().unwrap(), expect);
        assert_eq!(expect.to_string(), raw);
    }

    #[test_case::test_case("Required"; "wrong case")]
    #[test_case::test_case("depends"; "unknown")]
    #[test_case::test_case(""; "empty")]
    #[test_case::test_case(" required"; "untrimmed")]
    fn test_dependency_type_err(raw: &str) {
        let err = raw.parse::<DependencyType>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidRelationType {
                given: raw.into()
            }
        );
    }

    #[test]
    fn test_parse_list_keeps_order_and_skips_empty() {
        let rels = Relation::parse_list("P1:required,,P2:embedded,").unwrap();
        assert_eq!(
            rels,
            vec![
                Relation {
                    project_id: "P1".into(),
                    dependency_type: DependencyType::Required,
                },
                Relation {
                    project_id: "P2".into(),
                    dependency_type: DependencyType::Embedded,
                },
            ]
        );
    }

    #[test]
    fn test_parse_list_empty() {
        assert!(Relation::parse_list("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_ignores_extra_segments() {
        let rel = Relation::parse("abc:optional:extra").unwrap();
        assert_eq!(rel.project_id, "abc");
        assert_eq!(rel.dependency_type, DependencyType::Optional);
    }

    #[test]
    fn test_parse_list_reports_every_bad_token() {
        let errs = Relation::parse_list("a:required,b:needs,c").unwrap_err();
        assert_eq!(
            errs,
            vec![
                ValidationError::InvalidRelationType {
                    given: "needs".into()
                },
                ValidationError::MissingRelationType { token: "c".into() },
            ]
        );
    }
}
