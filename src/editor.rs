use log::{debug, warn};

use pakform_types::{DocumentError, PackagingDescriptor, Violation};

use crate::draft::{DraftError, DraftStore, DRAFT_KEY};
use crate::export::{suggested_filename, ExportArtifact, ExportError};

/// A single-document editing session. Every operation is synchronous and
/// applies in the order it is issued; there is no concurrent mutation path.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    document: PackagingDescriptor,
}

impl std::ops::Deref for Editor {
    type Target = PackagingDescriptor;

    fn deref(&self) -> &Self::Target {
        &self.document
    }
}

impl Editor {
    pub fn new() -> Editor {
        Editor::default()
    }

    pub fn with_document(document: PackagingDescriptor) -> Editor {
        Editor { document }
    }

    pub fn document(&self) -> &PackagingDescriptor {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut PackagingDescriptor {
        &mut self.document
    }

    /// Replaces the session's document wholesale with the parsed `text`.
    /// On a parse failure the current document is left untouched.
    pub fn load_json(&mut self, text: &str) -> Result<(), DocumentError> {
        let document = PackagingDescriptor::from_json(text)?;
        debug!("replacing session document with `{}`", document.name);
        self.document = document;
        Ok(())
    }

    /// Canonical JSON for the live preview. Available regardless of any
    /// outstanding validation failures.
    pub fn preview(&self) -> Result<String, DocumentError> {
        self.document.to_json()
    }

    pub fn validate(&self) -> Result<(), Vec<Violation>> {
        self.document.validate()
    }

    /// Serializes the document for export. Blocked while any validation
    /// failure is outstanding.
    pub fn export(&self) -> Result<ExportArtifact, ExportError> {
        if let Err(violations) = self.document.validate() {
            warn!("export blocked by {} validation failure(s)", violations.len());
            return Err(ExportError::Invalid(violations));
        }

        let body = self.document.to_json()?;
        Ok(ExportArtifact {
            filename: suggested_filename(&self.document),
            bytes: body.into_bytes(),
        })
    }

    pub fn save_draft(&self, store: &mut dyn DraftStore) -> Result<(), DraftError> {
        let snapshot = self.document.to_json()?;
        store.write(DRAFT_KEY, &snapshot)
    }

    /// Restores the last saved draft, falling back to the default document
    /// when no draft exists or the stored snapshot no longer parses.
    pub fn restore_draft(&mut self, store: &dyn DraftStore) -> Result<(), DraftError> {
        match store.read(DRAFT_KEY)? {
            Some(snapshot) => match PackagingDescriptor::from_json(&snapshot) {
                Ok(document) => self.document = document,
                Err(e) => {
                    warn!("stored draft is unreadable, starting fresh: {}", e);
                    self.document = PackagingDescriptor::default();
                }
            },
            None => self.document = PackagingDescriptor::default(),
        }
        Ok(())
    }
}

/// Re-indents arbitrary JSON text (the preview pane's Format action).
pub fn reformat(text: &str) -> Result<String, DocumentError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(DocumentError::Parse)?;
    serde_json::to_string_pretty(&value).map_err(DocumentError::Serialize)
}
