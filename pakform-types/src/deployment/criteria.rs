use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// One detection rule in the `DefiningCriteria` list.
///
/// `LogicalCondition` describes how the entry combines with the *next* one
/// in the list; the last entry conventionally carries `End`. The list is
/// never auto-repaired: ordering and logic are the author's responsibility.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Criterion {
    pub logical_condition: LogicalCondition,
    #[serde(flatten)]
    pub check: CriterionCheck,
}

impl Criterion {
    /// A freshly-initialized entry of the given kind, combining with `End`.
    pub fn new(kind: CriteriaKind) -> Criterion {
        Criterion {
            logical_condition: LogicalCondition::End,
            check: CriterionCheck::fresh(kind),
        }
    }

    pub fn kind(&self) -> CriteriaKind {
        self.check.kind()
    }

    /// Replaces the payload with a freshly-initialized one for `kind`,
    /// discarding the old payload regardless of its type. The logical
    /// condition survives the retype.
    pub fn retype(&mut self, kind: CriteriaKind) {
        self.check = CriterionCheck::fresh(kind);
    }
}

impl Default for Criterion {
    fn default() -> Self {
        Criterion::new(CriteriaKind::AppExists)
    }
}

/// The three mutually exclusive detection payloads. Only the active
/// variant's payload exists; there are no null-filled siblings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "CriteriaType")]
pub enum CriterionCheck {
    AppExists {
        #[serde(rename = "AppCriteria")]
        app_criteria: AppCriteria,
    },
    FileExists {
        #[serde(rename = "FileCriteria")]
        file_criteria: FileCriteria,
    },
    RegistryExists {
        #[serde(rename = "RegistryCriteria")]
        registry_criteria: RegistryCriteria,
    },
}

impl CriterionCheck {
    pub fn fresh(kind: CriteriaKind) -> CriterionCheck {
        match kind {
            CriteriaKind::AppExists => CriterionCheck::AppExists {
                app_criteria: AppCriteria::default(),
            },
            CriteriaKind::FileExists => CriterionCheck::FileExists {
                file_criteria: FileCriteria::default(),
            },
            CriteriaKind::RegistryExists => CriterionCheck::RegistryExists {
                registry_criteria: RegistryCriteria::default(),
            },
        }
    }

    pub fn kind(&self) -> CriteriaKind {
        match self {
            CriterionCheck::AppExists { .. } => CriteriaKind::AppExists,
            CriterionCheck::FileExists { .. } => CriteriaKind::FileExists,
            CriterionCheck::RegistryExists { .. } => CriteriaKind::RegistryExists,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default, TypedBuilder)]
#[serde(rename_all = "PascalCase", default)]
pub struct AppCriteria {
    #[builder(default)]
    pub application_identifier: String,
    #[builder(default)]
    pub version_condition: VersionCondition,
    #[builder(default)]
    pub major_version: u32,
    #[builder(default)]
    pub minor_version: u32,
    #[builder(default)]
    pub revision_number: u32,
    #[builder(default)]
    pub build_number: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default, TypedBuilder)]
#[serde(rename_all = "PascalCase", default)]
pub struct FileCriteria {
    #[builder(default)]
    pub path: String,
    #[builder(default)]
    pub version_condition: VersionCondition,
    #[builder(default)]
    pub major_version: u32,
    #[builder(default)]
    pub minor_version: u32,
    #[builder(default)]
    pub revision_number: u32,
    #[builder(default)]
    pub build_number: u32,
    #[builder(default)]
    pub modified_on: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default, TypedBuilder)]
#[serde(rename_all = "PascalCase", default)]
pub struct RegistryCriteria {
    #[builder(default)]
    pub path: String,
    #[builder(default)]
    pub key_name: String,
    #[builder(default)]
    pub key_type: RegistryKeyType,
    #[builder(default)]
    pub key_value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalCondition {
    End,
    And,
    Or,
}

impl Default for LogicalCondition {
    fn default() -> Self {
        LogicalCondition::End
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionCondition {
    Any,
    EqualTo,
    NotEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThanOrEqualTo,
}

impl Default for VersionCondition {
    fn default() -> Self {
        VersionCondition::Any
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryKeyType {
    String,
    Binary,
    DWord,
    Qword,
    MultiString,
    ExpandableString,
    Version,
}

impl Default for RegistryKeyType {
    fn default() -> Self {
        RegistryKeyType::String
    }
}

/// Discriminant-only mirror of [`CriterionCheck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriteriaKind {
    AppExists,
    FileExists,
    RegistryExists,
}

#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("Invalid value passed")]
pub struct ParseCriteriaKindError;

impl FromStr for CriteriaKind {
    type Err = ParseCriteriaKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AppExists" => Ok(CriteriaKind::AppExists),
            "FileExists" => Ok(CriteriaKind::FileExists),
            "RegistryExists" => Ok(CriteriaKind::RegistryExists),
            _ => Err(ParseCriteriaKindError {}),
        }
    }
}

impl fmt::Display for CriteriaKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CriteriaKind::AppExists => f.write_str("AppExists"),
            CriteriaKind::FileExists => f.write_str("FileExists"),
            CriteriaKind::RegistryExists => f.write_str("RegistryExists"),
        }
    }
}
