use std::fmt;

use url::Url;

use crate::descriptor::PackagingDescriptor;

pub const DEVICE_POWER_MIN: u32 = 1;
pub const DEVICE_POWER_MAX: u32 = 100;
pub const RETRY_COUNT_MIN: u32 = 1;
pub const RETRY_COUNT_MAX: u32 = 10;
pub const RETRY_INTERVAL_MIN: u32 = 1;
pub const RETRY_INTERVAL_MAX: u32 = 10;

/// A single field-level schema violation. Non-fatal: the document stays
/// editable; only export is gated on an empty violation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path of serialized key names, e.g.
    /// `DeploymentOptions.HowToInstall.RetryCount`.
    pub path: String,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViolationKind {
    #[error("a non-empty value is required")]
    Required,

    #[error("must be at least {min}")]
    BelowMinimum { min: u32 },

    #[error("must be at most {max}")]
    AboveMaximum { max: u32 },

    #[error("must be a well-formed absolute URL")]
    MalformedUrl,
}

/// Checks every constraint the type system cannot express. Violations come
/// back in serialization order, one entry per offending field.
pub fn validate(document: &PackagingDescriptor) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();

    check_required(&mut violations, "name", &document.name);
    check_required(&mut violations, "version", &document.version);

    check_url(&mut violations, "homepage", document.homepage.as_deref());
    check_url(&mut violations, "url", document.url.as_deref());
    check_url(&mut violations, "docs", document.docs.as_deref());
    if let Some(check_ver) = &document.check_ver {
        check_url(&mut violations, "checkVer.url", Some(&check_ver.url));
    }
    if let Some(auto_update) = &document.auto_update {
        check_url(&mut violations, "autoUpdate.url", Some(&auto_update.url));
    }

    let when = &document.deployment_options.when_to_install;
    check_bounds(
        &mut violations,
        "DeploymentOptions.WhenToInstall.DevicePowerRequired",
        when.device_power_required,
        DEVICE_POWER_MIN,
        DEVICE_POWER_MAX,
    );

    let how = &document.deployment_options.how_to_install;
    check_bounds(
        &mut violations,
        "DeploymentOptions.HowToInstall.RetryCount",
        how.retry_count,
        RETRY_COUNT_MIN,
        RETRY_COUNT_MAX,
    );
    check_bounds(
        &mut violations,
        "DeploymentOptions.HowToInstall.RetryIntervalInMinutes",
        how.retry_interval_in_minutes,
        RETRY_INTERVAL_MIN,
        RETRY_INTERVAL_MAX,
    );

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_required(out: &mut Vec<Violation>, path: &str, value: &str) {
    if value.is_empty() {
        out.push(Violation {
            path: path.into(),
            kind: ViolationKind::Required,
        });
    }
}

fn check_url(out: &mut Vec<Violation>, path: &str, value: Option<&str>) {
    if let Some(value) = value {
        // Url::parse only accepts absolute URLs; relative references fail.
        if Url::parse(value).is_err() {
            out.push(Violation {
                path: path.into(),
                kind: ViolationKind::MalformedUrl,
            });
        }
    }
}

fn check_bounds(out: &mut Vec<Violation>, path: &str, value: u32, min: u32, max: u32) {
    if value < min {
        out.push(Violation {
            path: path.into(),
            kind: ViolationKind::BelowMinimum { min },
        });
    } else if value > max {
        out.push(Violation {
            path: path.into(),
            kind: ViolationKind::AboveMaximum { max },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violations_arrive_in_serialization_order() {
        let mut document = PackagingDescriptor::default();
        document.name = String::new();
        document.auto_update = Some(crate::descriptor::AutoUpdate { url: "nope".into() });
        document.deployment_options.when_to_install.device_power_required = 0;
        document.deployment_options.how_to_install.retry_interval_in_minutes = 99;

        let violations = validate(&document).unwrap_err();
        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "name",
                "autoUpdate.url",
                "DeploymentOptions.WhenToInstall.DevicePowerRequired",
                "DeploymentOptions.HowToInstall.RetryIntervalInMinutes",
            ]
        );
        assert_eq!(violations[3].kind, ViolationKind::AboveMaximum { max: 10 });
    }

    #[test]
    fn bounds_are_inclusive() {
        let mut document = PackagingDescriptor::default();
        document.deployment_options.when_to_install.device_power_required = 100;
        document.deployment_options.how_to_install.retry_count = 1;
        document.deployment_options.how_to_install.retry_interval_in_minutes = 10;
        assert_eq!(validate(&document), Ok(()));
    }

    #[test]
    fn violation_display_names_the_field() {
        let violation = Violation {
            path: "DeploymentOptions.HowToInstall.RetryCount".into(),
            kind: ViolationKind::BelowMinimum { min: 1 },
        };
        assert_eq!(
            violation.to_string(),
            "DeploymentOptions.HowToInstall.RetryCount: must be at least 1"
        );
    }
}
