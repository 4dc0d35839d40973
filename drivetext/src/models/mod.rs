mod extraction;
mod file;

pub use extraction::{ExtractionResult, FormatCategory};
pub use file::{DriveFile, DriveItem, FileFacet, FolderFacet, ParentReference};
