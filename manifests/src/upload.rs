use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Relation, ValidationError, ValidationErrors, VersionType};

/// Name of the multipart part that carries the artifact.
pub const FILE_PART: &str = "file";

/// Raw, unvalidated inputs exactly as the CI environment supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadInputs {
    pub file_path: String,
    pub name: String,
    pub version: String,
    pub changelog: String,
    pub relations: String,
    pub game_versions: String,
    pub release_type: String,
    pub loaders: String,
    pub featured: String,
    pub project_id: String,
    pub staging: String,
    pub new_project_body: String,
}

/// Case-insensitive `"true"`; anything else is false.
pub fn parse_flag(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Comma separated list with empty entries dropped. Order and duplicates are
/// preserved, entries are not trimmed.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter(|it| !it.is_empty())
        .map(String::from)
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.into())
    }
}

impl UploadInputs {
    /// Runs every check and either returns the parsed request or all of the
    /// problems found. Nothing here touches the network.
    pub fn validate(&self) -> Result<UploadRequest, ValidationErrors> {
        let mut errors = vec![];

        for (name, value) in [
            ("file_path", &self.file_path),
            ("name", &self.name),
            ("version", &self.version),
            ("game_versions", &self.game_versions),
            ("loaders", &self.loaders),
            ("featured", &self.featured),
            ("project_id", &self.project_id),
        ] {
            if value.is_empty() {
                errors.push(ValidationError::MissingInput { name });
            }
        }

        let file_path = PathBuf::from(&self.file_path);
        if !self.file_path.is_empty() && !file_path.is_file() {
            errors.push(ValidationError::MissingFile {
                path: file_path.clone(),
            });
        }

        let dependencies = Relation::parse_list(&self.relations).unwrap_or_else(|errs| {
            errors.extend(errs);
            vec![]
        });

        let version_type = VersionType::parse_opt(&self.release_type).unwrap_or_else(|err| {
            errors.push(err);
            None
        });

        if !errors.is_empty() {
            tracing::debug!("input validation failed with {} error(s)", errors.len());
            return Err(ValidationErrors::new(errors));
        }

        Ok(UploadRequest {
            name: self.name.clone(),
            version_number: self.version.clone(),
            changelog: non_empty(&self.changelog),
            dependencies,
            game_versions: split_list(&self.game_versions),
            version_type,
            loaders: split_list(&self.loaders),
            featured: parse_flag(&self.featured),
            project_id: self.project_id.clone(),
            file_path,
            staging: parse_flag(&self.staging),
            new_project_body: non_empty(&self.new_project_body),
        })
    }
}

/// A fully validated upload. Built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub name: String,
    pub version_number: String,
    pub changelog: Option<String>,
    pub dependencies: Vec<Relation>,
    pub game_versions: Vec<String>,
    pub version_type: Option<VersionType>,
    pub loaders: Vec<String>,
    pub featured: bool,
    pub project_id: String,
    pub file_path: PathBuf,
    pub staging: bool,
    pub new_project_body: Option<String>,
}

impl UploadRequest {
    pub fn payload(&self) -> VersionPayload<'_> {
        VersionPayload {
            name: &self.name,
            version_number: &self.version_number,
            changelog: self.changelog.as_deref(),
            dependencies: &self.dependencies,
            game_versions: &self.game_versions,
            version_type: self.version_type.unwrap_or_default(),
            loaders: &self.loaders,
            featured: self.featured,
            project_id: &self.project_id,
            file_parts: [FILE_PART],
        }
    }

    /// The follow-up description update, if a new body was supplied.
    pub fn project_update(&self) -> Option<ProjectUpdate> {
        self.new_project_body
            .as_ref()
            .map(|body| ProjectUpdate {
                project_id: self.project_id.clone(),
                body: body.clone(),
            })
    }

    pub fn file_name(&self) -> String {
        file_name_of(&self.file_path)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|it| it.to_string_lossy().into_owned())
        .unwrap_or_else(|| FILE_PART.into())
}

/// JSON document sent as the `data` part of the version upload.
#[derive(Serialize, Debug, PartialEq)]
pub struct VersionPayload<'a> {
    pub name: &'a str,
    pub version_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog: Option<&'a str>,
    pub dependencies: &'a [Relation],
    pub game_versions: &'a [String],
    pub version_type: VersionType,
    pub loaders: &'a [String],
    pub featured: bool,
    pub project_id: &'a str,
    pub file_parts: [&'static str; 1],
}

impl VersionPayload<'_> {
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProjectUpdate {
    #[serde(skip)]
    pub project_id: String,
    pub body: String,
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::DependencyType;

    fn inputs(file_path: &Path) -> UploadInputs {
        UploadInputs {
            file_path: file_path.to_string_lossy().into_owned(),
            name: "v1.0".into(),
            version: "1.0".into(),
            game_versions: "1.20,1.20.1".into(),
            loaders: "fabric".into(),
            featured: "false".into(),
            project_id: "abc123".into(),
            relations: "xyz999:required".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_payload() {
        let artifact = modup_testing::artifact("mod.jar", b"jar");
        let req = inputs(artifact.path()).validate().unwrap();

        let payload = serde_json::to_value(req.payload()).unwrap();
        assert_eq!(
            payload,
            json!({
                "name": "v1.0",
                "version_number": "1.0",
                "dependencies": [{"project_id": "xyz999", "dependency_type": "required"}],
                "game_versions": ["1.20", "1.20.1"],
                "version_type": "release",
                "loaders": ["fabric"],
                "featured": false,
                "project_id": "abc123",
                "file_parts": ["file"],
            })
        );
        assert_eq!(req.file_name(), "mod.jar");
        assert!(!req.staging);
        assert_eq!(req.project_update(), None);
    }

    #[test_case::test_case("TRUE", true; "upper")]
    #[test_case::test_case("True", true; "mixed")]
    #[test_case::test_case("true", true; "lower")]
    #[test_case::test_case("false", false; "false")]
    #[test_case::test_case("yes", false; "yes")]
    #[test_case::test_case("1", false; "one")]
    #[test_case::test_case(" true", false; "padded")]
    fn test_featured_flag(
        raw: &str,
        expect: bool,
    ) {
        let artifact = modup_testing::artifact("mod.jar", b"jar");
        let mut inp = inputs(artifact.path());
        inp.featured = raw.into();

        let req = inp.validate().unwrap();
        assert_eq!(req.featured, expect);
        assert_eq!(
            serde_json::to_value(req.payload()).unwrap()["featured"],
            json!(expect)
        );
    }

    #[test_case::test_case("", false; "unset")]
    #[test_case::test_case("TRUE", true; "upper")]
    #[test_case::test_case("false", false; "false")]
    fn test_staging_flag(
        raw: &str,
        expect: bool,
    ) {
        let artifact = modup_testing::artifact("mod.jar", b"jar");
        let mut inp = inputs(artifact.path());
        inp.staging = raw.into();
        assert_eq!(inp.validate().unwrap().staging, expect);
    }

    #[test_case::test_case("alpha", "alpha"; "alpha")]
    #[test_case::test_case("beta", "beta"; "beta")]
    #[test_case::test_case("release", "release"; "release")]
    #[test_case::test_case("", "release"; "defaulted")]
    fn test_version_type(
        raw: &str,
        expect: &str,
    ) {
        let artifact = modup_testing::artifact("mod.jar", b"jar");
        let mut inp = inputs(artifact.path());
        inp.release_type = raw.into();

        let req = inp.validate().unwrap();
        assert_eq!(req.payload().version_type.as_str(), expect);
    }

    #[test]
    fn test_changelog_and_project_body() {
        let artifact = modup_testing::artifact("mod.jar", b"jar");
        let mut inp = inputs(artifact.path());
        inp.changelog = "- fixed things".into();
        inp.new_project_body = "# My mod".into();

        let req = inp.validate().unwrap();
        let payload = serde_json::to_value(req.payload()).unwrap();
        assert_eq!(payload["changelog"], json!("- fixed things"));
        assert_eq!(
            req.project_update(),
            Some(ProjectUpdate {
                project_id: "abc123".into(),
                body: "# My mod".into(),
            })
        );
        assert_eq!(
            serde_json::to_value(req.project_update().unwrap()).unwrap(),
            json!({"body": "# My mod"})
        );
    }

    #[test]
    fn test_lists_keep_order_and_duplicates() {
        let artifact = modup_testing::artifact("mod.jar", b"jar");
        let mut inp = inputs(artifact.path());
        inp.game_versions = "1.20.1,,1.20,1.20.1".into();
        inp.loaders = "quilt,fabric".into();
        inp.relations = "a:optional,b:incompatible,c:embedded".into();

        let req = inp.validate().unwrap();
        assert_eq!(req.game_versions, vec!["1.20.1", "1.20", "1.20.1"]);
        assert_eq!(req.loaders, vec!["quilt", "fabric"]);
        assert_eq!(
            req.dependencies
                .iter()
                .map(|it| it.dependency_type)
                .collect::<Vec<_>>(),
            vec![
                DependencyType::Optional,
                DependencyType::Incompatible,
                DependencyType::Embedded
            ]
        );
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("build/mod.jar");

        let errs = inputs(&missing).validate().unwrap_err();
        assert_eq!(
            errs.errors(),
            &[ValidationError::MissingFile {
                path: missing.clone()
            }]
        );
        assert!(errs.to_string().contains(&missing.display().to_string()));
    }

    #[test]
    fn test_directory_is_not_an_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let errs = inputs(dir.path()).validate().unwrap_err();
        assert!(matches!(
            errs.errors(),
            [ValidationError::MissingFile { .. }]
        ));
    }

    #[test]
    fn test_all_errors_are_collected() {
        let dir = tempfile::tempdir().unwrap();
        let mut inp = inputs(&dir.path().join("nope.jar"));
        inp.relations = "xyz999:depends".into();
        inp.release_type = "stable".into();
        inp.name = String::new();

        let errs = inp.validate().unwrap_err();
        assert_eq!(errs.errors().len(), 4);
        assert_eq!(
            errs.errors()[0],
            ValidationError::MissingInput { name: "name" }
        );
        assert!(matches!(errs.errors()[1], ValidationError::MissingFile { .. }));
        assert_eq!(
            errs.errors()[2],
            ValidationError::InvalidRelationType {
                given: "depends".into()
            }
        );
        assert_eq!(
            errs.errors()[3],
            ValidationError::InvalidReleaseType {
                given: "stable".into()
            }
        );
    }

    #[test]
    fn test_required_inputs() {
        let errs = UploadInputs::default().validate().unwrap_err();
        let missing = errs
            .errors()
            .iter()
            .filter_map(|it| match it {
                ValidationError::MissingInput { name } => Some(*name),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(
            missing,
            vec![
                "file_path",
                "name",
                "version",
                "game_versions",
                "loaders",
                "featured",
                "project_id"
            ]
        );
        assert_eq!(errs.errors().len(), missing.len());
    }
}
