//! Error type shared by the loaders, adapters and the frame driver.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while assembling or driving a demo.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An asset file could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A glTF document could not be imported.
    #[error("failed to import glTF `{path}`: {source}")]
    Gltf {
        /// The path that was requested.
        path: PathBuf,
        /// The importer error.
        #[source]
        source: gltf::Error,
    },
    /// A glTF accessor the model needs is missing.
    #[error("glTF `{path}` is missing {what}")]
    MissingData {
        /// The path that was requested.
        path: PathBuf,
        /// A description of the missing piece.
        what: String,
    },
    /// The bytes of a font file are not a usable TrueType/OpenType font.
    #[error("`{path}` is not a valid font")]
    InvalidFont {
        /// The path that was requested.
        path: PathBuf,
    },
    /// A background load was dropped before it produced a result.
    #[error("asset load `{0}` was canceled")]
    Canceled(String),
    /// An adapter failed while updating a frame.
    #[error("adapter `{label}` failed: {reason}")]
    Adapter {
        /// Label of the faulty adapter.
        label: String,
        /// What went wrong.
        reason: String,
    },
}

impl Error {
    /// Builds an adapter fault.
    pub fn adapter(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Adapter {
            label: label.into(),
            reason: reason.into(),
        }
    }
}
