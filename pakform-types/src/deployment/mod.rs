pub mod completion;
pub mod criteria;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

pub use completion::InstallCompletion;
pub use criteria::Criterion;

/// The three deployment sub-sections. All three are always present in a
/// descriptor, even when left at their defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default, TypedBuilder)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeploymentOptions {
    #[builder(default)]
    pub when_to_install: WhenToInstall,
    #[builder(default)]
    pub how_to_install: HowToInstall,
    #[builder(default)]
    pub when_to_call_install_complete: InstallCompletion,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, TypedBuilder)]
#[serde(rename_all = "PascalCase", default)]
pub struct WhenToInstall {
    /// Ordered, opaque contingency identifiers. Order is user-controlled.
    #[builder(default)]
    pub data_contingencies: Vec<String>,
    #[builder(default)]
    pub disk_space_required_in_kb: u64,
    #[builder(default = 50)]
    pub device_power_required: u32,
    #[builder(default = 512)]
    pub ram_required_in_mb: u32,
}

impl Default for WhenToInstall {
    fn default() -> Self {
        WhenToInstall {
            data_contingencies: Vec::new(),
            disk_space_required_in_kb: 0,
            device_power_required: 50,
            ram_required_in_mb: 512,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, TypedBuilder)]
#[serde(rename_all = "PascalCase", default)]
pub struct HowToInstall {
    #[builder(default)]
    pub install_context: InstallContext,
    #[builder(default)]
    pub install_command: String,
    #[builder(default)]
    pub admin_privileges: bool,
    #[builder(default)]
    pub device_restart: DeviceRestart,
    #[builder(default = 3)]
    pub retry_count: u32,
    #[builder(default = 5)]
    pub retry_interval_in_minutes: u32,
    #[builder(default = 30)]
    pub install_timeout_in_minutes: u32,
    /// Comma-separated exit codes that signal "installed, reboot required".
    #[builder(default = "0,3010".into())]
    pub installer_reboot_exit_code: String,
    #[builder(default = "0".into())]
    pub installer_success_exit_code: String,
}

impl Default for HowToInstall {
    fn default() -> Self {
        HowToInstall {
            install_context: InstallContext::default(),
            install_command: String::new(),
            admin_privileges: false,
            device_restart: DeviceRestart::default(),
            retry_count: 3,
            retry_interval_in_minutes: 5,
            install_timeout_in_minutes: 30,
            installer_reboot_exit_code: "0,3010".into(),
            installer_success_exit_code: "0".into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, Hash)]
pub enum InstallContext {
    Device,
    User,
}

impl Default for InstallContext {
    fn default() -> Self {
        InstallContext::Device
    }
}

#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("Invalid value passed")]
pub struct ParseInstallContextError;

impl FromStr for InstallContext {
    type Err = ParseInstallContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Device" => Ok(InstallContext::Device),
            "User" => Ok(InstallContext::User),
            _ => Err(ParseInstallContextError {}),
        }
    }
}

impl fmt::Display for InstallContext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InstallContext::Device => f.write_str("Device"),
            InstallContext::User => f.write_str("User"),
        }
    }
}

impl PartialEq for InstallContext {
    fn eq(&self, other: &InstallContext) -> bool {
        match (*self, *other) {
            (InstallContext::Device, InstallContext::Device) => true,
            (InstallContext::User, InstallContext::User) => true,
            _ => false,
        }
    }
}

impl PartialOrd for InstallContext {
    fn partial_cmp(&self, other: &InstallContext) -> Option<Ordering> {
        Some(self.cmp(&other))
    }
}

impl Ord for InstallContext {
    fn cmp(&self, other: &InstallContext) -> Ordering {
        match (*self, *other) {
            (InstallContext::Device, InstallContext::Device) => Ordering::Equal,
            (InstallContext::User, InstallContext::User) => Ordering::Equal,
            (InstallContext::Device, InstallContext::User) => Ordering::Less,
            (InstallContext::User, InstallContext::Device) => Ordering::Greater,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceRestart {
    DoNotRestart,
    ForceRestart,
    RestartIfNeeded,
}

impl Default for DeviceRestart {
    fn default() -> Self {
        DeviceRestart::DoNotRestart
    }
}
