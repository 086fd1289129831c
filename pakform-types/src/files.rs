use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use typed_builder::TypedBuilder;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default, TypedBuilder)]
#[serde(rename_all = "PascalCase", default)]
pub struct FilesOptions {
    #[builder(default)]
    pub app_dependencies_list: Vec<String>,
    #[builder(default)]
    pub app_transform_list: Vec<String>,
    #[builder(default)]
    pub app_patches_list: Vec<String>,
    #[builder(default)]
    pub application_uninstall_process: UninstallProcess,
}

/// How the package is removed again. `Standard` relies on the platform's
/// own uninstall path and carries no payload on the wire.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(into = "UninstallProcessRepr", try_from = "UninstallProcessRepr")]
pub enum UninstallProcess {
    Standard,
    CustomScript(UninstallScript),
}

impl UninstallProcess {
    pub fn custom_script(&self) -> Option<&UninstallScript> {
        match self {
            UninstallProcess::CustomScript(v) => Some(v),
            UninstallProcess::Standard => None,
        }
    }
}

impl Default for UninstallProcess {
    fn default() -> Self {
        UninstallProcess::Standard
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default, TypedBuilder)]
#[serde(rename_all = "PascalCase", default)]
pub struct UninstallScript {
    #[builder(default)]
    pub uninstall_command: String,
    #[builder(default)]
    pub uninstall_script_blob_id: u32,
}

/// Wire shape of [`UninstallProcess`]: a `UseCustomScript` discriminant with
/// an optional `CustomScript` payload beside it.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "PascalCase", default)]
struct UninstallProcessRepr {
    use_custom_script: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_script: Option<UninstallScript>,
}

impl From<UninstallProcess> for UninstallProcessRepr {
    fn from(value: UninstallProcess) -> Self {
        match value {
            UninstallProcess::Standard => UninstallProcessRepr {
                use_custom_script: false,
                custom_script: None,
            },
            UninstallProcess::CustomScript(script) => UninstallProcessRepr {
                use_custom_script: true,
                custom_script: Some(script),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("CustomScript is required when UseCustomScript is true")]
pub struct MissingUninstallScript;

impl TryFrom<UninstallProcessRepr> for UninstallProcess {
    type Error = MissingUninstallScript;

    fn try_from(repr: UninstallProcessRepr) -> Result<Self, Self::Error> {
        match (repr.use_custom_script, repr.custom_script) {
            (true, Some(script)) => Ok(UninstallProcess::CustomScript(script)),
            (true, None) => Err(MissingUninstallScript),
            // A stale payload beside a false discriminant is dropped.
            (false, _) => Ok(UninstallProcess::Standard),
        }
    }
}
