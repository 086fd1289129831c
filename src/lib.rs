pub mod document;
pub mod draft;
pub mod editor;
pub mod export;
pub mod resolver;

pub use draft::{DraftError, DraftStore, MemoryDraftStore, DRAFT_KEY};
pub use editor::{reformat, Editor};
pub use export::{ExportArtifact, ExportError};
pub use resolver::IndexOutOfRange;

pub trait Request {
    type Error;
    type Partial;

    fn new_from_user_input(partial: Self::Partial) -> Result<Self, Self::Error>
    where
        Self: Sized;
}
