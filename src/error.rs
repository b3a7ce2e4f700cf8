use std::path::PathBuf;

/// The error type of the [`MplsPlaylist::from`] method.
///
/// [`MplsPlaylist::from`]: ../mpls/struct.MplsPlaylist.html#method.from
#[derive(Debug, thiserror::Error)]
pub enum MplsError {
    /// An I/O error occurred during parsing.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Failed to parse the byte stream as valid MPLS.
    #[error("failed to parse byte stream as valid MPLS")]
    Parse,
}

/// Reasons a disc scan could not produce a [`DiscStructure`].
///
/// [`DiscStructure`]: ../types/struct.DiscStructure.html
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to read disc structure: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing disc directory: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("scan worker failed: {0}")]
    Worker(String),
}

/// Failure to read the disc title from the `META/DL` metadata file.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    #[error("failed to read metadata file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse metadata file: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("no title found")]
    MissingTitle,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
}
