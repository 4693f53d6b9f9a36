//! Land-cover loading error types.

/// Errors that can occur while loading a land-cover manifest.
///
/// Shader generation itself never fails; problems found while generating are
/// reported as [`Diagnostic`](crate::Diagnostic)s instead.
#[derive(Debug, thiserror::Error)]
pub enum LandCoverError {
    /// Failed to read the manifest from disk.
    #[error("failed to read land cover manifest: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse land cover manifest: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Two resources in the same library share a name.
    #[error("duplicate resource \"{resource}\" in library \"{library}\"")]
    DuplicateResource {
        /// Name of the library being initialized.
        library: String,
        /// The repeated resource name.
        resource: String,
    },
}
