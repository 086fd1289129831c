use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::criteria::Criterion;

/// How the deployment agent decides that the install has completed.
///
/// Exactly one variant's payload exists at a time; switching the
/// discriminant goes through the resolver, which installs a fresh payload
/// for the target variant rather than leaving the abandoned one behind.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "IdentifyApplicationBy")]
pub enum InstallCompletion {
    DefiningCriteria(CriteriaCompletion),
    UseCustomScript(ScriptCompletion),
}

impl InstallCompletion {
    pub fn strategy(&self) -> CompletionStrategy {
        match self {
            InstallCompletion::DefiningCriteria(_) => CompletionStrategy::DefiningCriteria,
            InstallCompletion::UseCustomScript(_) => CompletionStrategy::UseCustomScript,
        }
    }

    pub fn criteria(&self) -> Option<&CriteriaCompletion> {
        match self {
            InstallCompletion::DefiningCriteria(v) => Some(v),
            _ => None,
        }
    }

    pub fn criteria_mut(&mut self) -> Option<&mut CriteriaCompletion> {
        match self {
            InstallCompletion::DefiningCriteria(v) => Some(v),
            _ => None,
        }
    }

    pub fn custom_script(&self) -> Option<&CompletionScript> {
        match self {
            InstallCompletion::UseCustomScript(v) => Some(&v.custom_script),
            _ => None,
        }
    }
}

impl Default for InstallCompletion {
    fn default() -> Self {
        InstallCompletion::DefiningCriteria(CriteriaCompletion::default())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default, TypedBuilder)]
#[serde(rename_all = "PascalCase", default)]
pub struct CriteriaCompletion {
    #[builder(default)]
    pub use_additional_criteria: bool,
    #[builder(default)]
    pub defining_criteria: Vec<Criterion>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default, TypedBuilder)]
#[serde(rename_all = "PascalCase", default)]
pub struct ScriptCompletion {
    #[builder(default)]
    pub custom_script: CompletionScript,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, TypedBuilder)]
#[serde(rename_all = "PascalCase", default)]
pub struct CompletionScript {
    #[builder(default)]
    pub script_type: ScriptType,
    #[builder(default)]
    pub command_to_run_script: String,
    #[builder(default)]
    pub custom_script_file_blob_id: u32,
    #[builder(default)]
    pub success_exit_code: i32,
}

impl Default for CompletionScript {
    fn default() -> Self {
        CompletionScript {
            script_type: ScriptType::default(),
            command_to_run_script: String::new(),
            custom_script_file_blob_id: 0,
            success_exit_code: 0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptType {
    JScript,
    PowerShell,
    VBScript,
}

impl Default for ScriptType {
    fn default() -> Self {
        ScriptType::PowerShell
    }
}

/// Discriminant-only mirror of [`InstallCompletion`], used to request a
/// strategy switch without carrying a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionStrategy {
    DefiningCriteria,
    UseCustomScript,
}

#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("Invalid value passed")]
pub struct ParseCompletionStrategyError;

impl FromStr for CompletionStrategy {
    type Err = ParseCompletionStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DefiningCriteria" => Ok(CompletionStrategy::DefiningCriteria),
            "UseCustomScript" => Ok(CompletionStrategy::UseCustomScript),
            _ => Err(ParseCompletionStrategyError {}),
        }
    }
}

impl fmt::Display for CompletionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CompletionStrategy::DefiningCriteria => f.write_str("DefiningCriteria"),
            CompletionStrategy::UseCustomScript => f.write_str("UseCustomScript"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_variant_serializes_with_tag_and_no_script_payload() {
        let completion = InstallCompletion::default();
        let value = serde_json::to_value(&completion).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object["IdentifyApplicationBy"], "DefiningCriteria");
        assert_eq!(object["UseAdditionalCriteria"], false);
        assert!(object.contains_key("DefiningCriteria"));
        assert!(!object.contains_key("CustomScript"));
    }

    #[test]
    fn script_variant_serializes_with_tag_and_no_criteria_payload() {
        let completion = InstallCompletion::UseCustomScript(ScriptCompletion::default());
        let value = serde_json::to_value(&completion).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object["IdentifyApplicationBy"], "UseCustomScript");
        assert!(object.contains_key("CustomScript"));
        assert!(!object.contains_key("DefiningCriteria"));
        assert!(!object.contains_key("UseAdditionalCriteria"));
    }

    #[test]
    fn tagged_union_round_trips() {
        let completion = InstallCompletion::UseCustomScript(ScriptCompletion {
            custom_script: CompletionScript::builder()
                .script_type(ScriptType::VBScript)
                .command_to_run_script("cscript check.vbs".into())
                .custom_script_file_blob_id(42)
                .build(),
        });

        let text = serde_json::to_string(&completion).unwrap();
        let reloaded: InstallCompletion = serde_json::from_str(&text).unwrap();
        assert_eq!(reloaded, completion);
    }
}
