pub mod manifest;
pub mod version_file;

pub use manifest::{fetch_document, CatalogEntry, Latest, ReleaseCatalog, LATEST};
pub use version_file::{
    AssetIndexRef, DownloadArtifact, LibraryArtifact, LibraryDownloads, LibraryEntry,
    VersionDownloads, VersionManifest,
};
