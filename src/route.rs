//! How an incoming playback path is handled.
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackRoute {
    /// Scan the disc and let feature selection pick a playlist.
    Select(PathBuf),
    /// A playlist file, played as is without rescanning.
    Direct(PathBuf),
    /// Not disc media.
    Passthrough(PathBuf),
}

impl PlaybackRoute {
    pub fn path(&self) -> &Path {
        match self {
            PlaybackRoute::Select(p) | PlaybackRoute::Direct(p) | PlaybackRoute::Passthrough(p) => p,
        }
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case(ext))
}

/// Paths this short name a drive or volume root.
fn is_volume_root(path: &Path) -> bool {
    path.as_os_str().len() < 4
}

/// The disc index below a drive or volume root.
pub fn disc_index(root: &Path) -> PathBuf {
    root.join("BDMV").join("index.bdmv")
}

pub fn route(path: &Path) -> PlaybackRoute {
    let path = if is_volume_root(path) {
        disc_index(path)
    } else {
        path.to_path_buf()
    };

    if has_extension(&path, "bdmv") || has_extension(&path, "m2ts") {
        PlaybackRoute::Select(path)
    } else if has_extension(&path, "mpls") {
        PlaybackRoute::Direct(path)
    } else {
        PlaybackRoute::Passthrough(path)
    }
}

fn in_bdmv_stream(path: &Path) -> bool {
    let names: Vec<&str> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(n) => n.to_str(),
            _ => None,
        })
        .collect();
    names
        .windows(2)
        .any(|w| w[0].eq_ignore_ascii_case("bdmv") && w[1].eq_ignore_ascii_case("stream"))
}

/// Whether a path should be played through disc feature selection at all:
/// playlists, disc indexes, streams inside `BDMV/STREAM`, and volume roots
/// holding a disc.
pub fn handles_path(path: &Path) -> bool {
    if is_volume_root(path) {
        return disc_index(path).is_file();
    }
    has_extension(path, "mpls")
        || has_extension(path, "bdmv")
        || (has_extension(path, "m2ts") && in_bdmv_stream(path))
}
