use pakform_types::{DocumentError, PackagingDescriptor, Violation};

/// Filename stem used when the document's `name` is empty.
pub const FALLBACK_STEM: &str = "packaging";

/// The bytes and suggested filename handed to an export collaborator
/// (file writer, clipboard, download).
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("document has {} unresolved validation failure(s)", .0.len())]
    Invalid(Vec<Violation>),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

pub fn suggested_filename(document: &PackagingDescriptor) -> String {
    let stem = if document.name.is_empty() {
        FALLBACK_STEM
    } else {
        document.name.as_str()
    };
    format!("{}.json", stem)
}
