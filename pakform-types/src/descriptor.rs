use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::deployment::DeploymentOptions;
use crate::files::FilesOptions;
use crate::validate::{self, Violation};

/// The root packaging descriptor.
///
/// Field declaration order is the serialization order: root scalar fields
/// first, then `DeploymentOptions`, then `FilesOptions`. The preview pane
/// renders `to_json` output directly, so this order is a stable contract.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, TypedBuilder)]
#[serde(rename_all = "camelCase", default)]
pub struct PackagingDescriptor {
    #[builder(default = "untitled".into())]
    pub name: String,
    #[builder(default)]
    pub bundle_id: String,
    #[builder(default = "1.0.0".into())]
    pub version: String,
    #[builder(default)]
    pub actual_file_version: VersionFormat,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub homepage: Option<String>,
    /// Local path or download URL for the payload itself. Not validated.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub file: Option<String>,
    /// Must be a valid SPDX string.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub install_cmd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub uninstall_cmd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub docs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub check_ver: Option<CheckVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub auto_update: Option<AutoUpdate>,

    #[serde(rename = "DeploymentOptions")]
    #[builder(default)]
    pub deployment_options: DeploymentOptions,
    #[serde(rename = "FilesOptions")]
    #[builder(default)]
    pub files_options: FilesOptions,
}

impl Default for PackagingDescriptor {
    fn default() -> Self {
        PackagingDescriptor {
            name: "untitled".into(),
            bundle_id: String::new(),
            version: "1.0.0".into(),
            actual_file_version: VersionFormat::default(),
            description: None,
            homepage: None,
            file: None,
            license: None,
            url: None,
            install_cmd: None,
            uninstall_cmd: None,
            docs: None,
            check_ver: None,
            auto_update: None,
            deployment_options: DeploymentOptions::default(),
            files_options: FilesOptions::default(),
        }
    }
}

impl PackagingDescriptor {
    /// Parses a whole descriptor from JSON text. There is no partial merge:
    /// callers replace their in-memory document only on success.
    pub fn from_json(text: &str) -> Result<PackagingDescriptor, DocumentError> {
        serde_json::from_str(text).map_err(DocumentError::Parse)
    }

    /// Canonical pretty-printed JSON. Absent optional fields are omitted,
    /// never emitted as null.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(DocumentError::Serialize)
    }

    pub fn validate(&self) -> Result<(), Vec<Violation>> {
        validate::validate(self)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document is not well-formed JSON")]
    Parse(#[source] serde_json::Error),

    #[error("document could not be serialized")]
    Serialize(#[source] serde_json::Error),
}

/// How the version string is rendered into the published artifact name.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum VersionFormat {
    Version,
    DotVersion,
    DashVersion,
    Cleanv,
}

impl Default for VersionFormat {
    fn default() -> Self {
        VersionFormat::Version
    }
}

#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("Invalid value passed")]
pub struct ParseVersionFormatError;

impl FromStr for VersionFormat {
    type Err = ParseVersionFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "version" => Ok(VersionFormat::Version),
            "dotVersion" => Ok(VersionFormat::DotVersion),
            "dashVersion" => Ok(VersionFormat::DashVersion),
            "cleanv" => Ok(VersionFormat::Cleanv),
            _ => Err(ParseVersionFormatError {}),
        }
    }
}

impl fmt::Display for VersionFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            VersionFormat::Version => f.write_str("version"),
            VersionFormat::DotVersion => f.write_str("dotVersion"),
            VersionFormat::DashVersion => f.write_str("dashVersion"),
            VersionFormat::Cleanv => f.write_str("cleanv"),
        }
    }
}

/// Where to poll for new upstream releases, and how to read the version out
/// of the response body.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, TypedBuilder)]
pub struct CheckVersion {
    pub url: String,
    pub regex: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, TypedBuilder)]
pub struct AutoUpdate {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ViolationKind;

    #[test]
    fn default_document_has_no_violations() {
        let document = PackagingDescriptor::default();
        assert_eq!(document.validate(), Ok(()));
    }

    #[test]
    fn default_document_matches_canonical_values() {
        let document = PackagingDescriptor::default();
        assert_eq!(document.name, "untitled");
        assert_eq!(document.version, "1.0.0");
        assert_eq!(document.actual_file_version, VersionFormat::Version);

        let when = &document.deployment_options.when_to_install;
        assert_eq!(when.disk_space_required_in_kb, 0);
        assert_eq!(when.device_power_required, 50);
        assert_eq!(when.ram_required_in_mb, 512);

        let how = &document.deployment_options.how_to_install;
        assert_eq!(how.retry_count, 3);
        assert_eq!(how.retry_interval_in_minutes, 5);
        assert_eq!(how.install_timeout_in_minutes, 30);
        assert_eq!(how.installer_reboot_exit_code, "0,3010");
        assert_eq!(how.installer_success_exit_code, "0");
    }

    #[test]
    fn round_trip_preserves_validity() {
        let document = PackagingDescriptor::default();
        let text = document.to_json().unwrap();
        let reloaded = PackagingDescriptor::from_json(&text).unwrap();

        assert_eq!(reloaded, document);
        assert_eq!(reloaded.validate(), document.validate());
    }

    #[test]
    fn serialization_order_is_scalars_then_deployment_then_files() {
        let text = PackagingDescriptor::default().to_json().unwrap();

        let deployment = text.find("\"DeploymentOptions\"").unwrap();
        let files = text.find("\"FilesOptions\"").unwrap();
        assert!(deployment < files);

        for key in &["\"name\"", "\"bundleId\"", "\"version\"", "\"actualFileVersion\""] {
            assert!(text.find(key).unwrap() < deployment, "{} after DeploymentOptions", key);
        }
    }

    #[test]
    fn malformed_text_is_a_parse_failure() {
        let err = PackagingDescriptor::from_json("{not valid").unwrap_err();
        match err {
            DocumentError::Parse(_) => {}
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn empty_name_and_low_retry_count_are_the_only_violations() {
        let text = r#"{
            "name": "",
            "version": "1.0.0",
            "DeploymentOptions": {
                "HowToInstall": { "RetryCount": 0 }
            }
        }"#;
        let document = PackagingDescriptor::from_json(text).unwrap();
        let violations = document.validate().unwrap_err();

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].path, "name");
        assert_eq!(violations[0].kind, ViolationKind::Required);
        assert_eq!(
            violations[1].path,
            "DeploymentOptions.HowToInstall.RetryCount"
        );
        assert_eq!(violations[1].kind, ViolationKind::BelowMinimum { min: 1 });
    }

    #[test]
    fn partially_specified_document_takes_defaults_elsewhere() {
        let document = PackagingDescriptor::from_json(r#"{ "name": "7zip" }"#).unwrap();
        assert_eq!(document.name, "7zip");
        assert_eq!(document.version, "1.0.0");
        assert_eq!(
            document.deployment_options.how_to_install.retry_count,
            3
        );
    }

    #[test]
    fn absent_optionals_are_not_serialized() {
        let text = PackagingDescriptor::default().to_json().unwrap();
        assert!(!text.contains("\"homepage\""));
        assert!(!text.contains("\"checkVer\""));
        assert!(!text.contains("null"));
    }

    #[test]
    fn malformed_urls_are_flagged_per_field() {
        let mut document = PackagingDescriptor::default();
        document.homepage = Some("not a url".into());
        document.docs = Some("https://example.com/docs".into());

        let violations = document.validate().unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "homepage");
        assert_eq!(violations[0].kind, ViolationKind::MalformedUrl);
    }

    #[test]
    fn version_format_parses_its_wire_names() {
        assert_eq!("cleanv".parse::<VersionFormat>().unwrap(), VersionFormat::Cleanv);
        assert_eq!(VersionFormat::DashVersion.to_string(), "dashVersion");
        assert!("semver".parse::<VersionFormat>().is_err());
    }
}
