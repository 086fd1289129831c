pub mod deployment;
pub mod descriptor;
pub mod files;
pub mod validate;

pub use descriptor::{DocumentError, PackagingDescriptor, VersionFormat};
pub use validate::{Violation, ViolationKind};
