//! Scanning a disc directory tree into a [`DiscStructure`].
//!
//! [`DiscStructure`]: ../types/struct.DiscStructure.html
use crate::config::ScanOptions;
use crate::error::ScanError;
use crate::meta::disc_title;
use crate::mpls::MplsPlaylist;
use crate::types::DiscStructure;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Produces the structure of the disc a path belongs to.
pub trait DiscScanner: Send + Sync {
    fn scan(&self, path: &Path) -> Result<DiscStructure, ScanError>;
}

/// Scans a `BDMV` tree, reading every playlist in `BDMV/PLAYLIST`.
#[derive(Debug, Clone, Default)]
pub struct BdmvScanner {
    options: ScanOptions,
}

impl BdmvScanner {
    pub fn new(options: ScanOptions) -> Self {
        BdmvScanner { options }
    }
}

fn has_name(path: &Path, name: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.eq_ignore_ascii_case(name))
}

/// A child directory of `dir` called `name`, ignoring case.
pub(crate) fn child_dir(dir: &Path, name: &str) -> Option<PathBuf> {
    child(dir, name, Path::is_dir)
}

/// A file in `dir` called `name`, ignoring case.
pub(crate) fn child_file(dir: &Path, name: &str) -> Option<PathBuf> {
    child(dir, name, Path::is_file)
}

fn child(dir: &Path, name: &str, kind: fn(&Path) -> bool) -> Option<PathBuf> {
    let exact = dir.join(name);
    if kind(&exact) {
        return Some(exact);
    }
    std::fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|e| e.path())
        .find(|p| kind(p) && has_name(p, name))
}

/// The `BDMV` directory `path` is in, or the one right below it.
pub fn find_bdmv(path: &Path) -> Result<PathBuf, ScanError> {
    if let Some(bdmv) = path
        .ancestors()
        .find(|a| has_name(a, "BDMV") && a.is_dir())
    {
        return Ok(bdmv.to_path_buf());
    }
    child_dir(path, "BDMV").ok_or_else(|| ScanError::MissingDirectory(path.join("BDMV")))
}

impl DiscScanner for BdmvScanner {
    fn scan(&self, path: &Path) -> Result<DiscStructure, ScanError> {
        tracing::info!("Scanning bluray structure: {}", path.display());
        let bdmv = find_bdmv(path)?;
        let playlist_dir = child_dir(&bdmv, "PLAYLIST")
            .ok_or_else(|| ScanError::MissingDirectory(bdmv.join("PLAYLIST")))?;

        let mut disc = DiscStructure::new(disc_title(&bdmv), &playlist_dir);
        for entry in std::fs::read_dir(&playlist_dir)? {
            let file = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    tracing::warn!("Skipping entry in {}: {}", playlist_dir.display(), e);
                    continue;
                }
            };
            let is_mpls = file
                .extension()
                .and_then(|e| e.to_str())
                .map_or(false, |e| e.eq_ignore_ascii_case("mpls"));
            if !is_mpls || !file.is_file() {
                continue;
            }
            let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!("Skipping playlist with non UTF-8 name: {}", file.display());
                continue;
            };

            match File::open(&file)
                .map_err(Into::into)
                .and_then(|f| MplsPlaylist::from(BufReader::new(f)))
            {
                Ok(mpls) => {
                    let playlist = mpls.to_playlist(name, &self.options);
                    tracing::debug!(
                        "{}: {:.0}s, {} chapters, loops={}, valid={}",
                        name,
                        playlist.total_length_secs,
                        playlist.chapters.len(),
                        playlist.has_loops,
                        playlist.is_valid
                    );
                    disc.insert(playlist);
                }
                Err(e) => tracing::warn!("Skipping playlist {}: {}", file.display(), e),
            }
        }

        Ok(disc)
    }
}

/// Runs `scanner` on a blocking worker and waits for it without holding up
/// the calling task.
pub async fn scan_disc(
    scanner: Arc<dyn DiscScanner>,
    path: PathBuf,
) -> Result<DiscStructure, ScanError> {
    tokio::task::spawn_blocking(move || scanner.scan(&path))
        .await
        .map_err(|e| ScanError::Worker(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn bdmv_from_any_depth() {
        let dir = TempDir::new().unwrap();
        let bdmv = dir.path().join("BDMV");
        std::fs::create_dir_all(bdmv.join("STREAM")).unwrap();

        assert_eq!(find_bdmv(dir.path()).unwrap(), bdmv);
        assert_eq!(find_bdmv(&bdmv.join("index.bdmv")).unwrap(), bdmv);
        assert_eq!(find_bdmv(&bdmv.join("STREAM").join("00001.m2ts")).unwrap(), bdmv);
    }

    #[test]
    fn lowercase_bdmv() {
        let dir = TempDir::new().unwrap();
        let bdmv = dir.path().join("bdmv");
        std::fs::create_dir_all(&bdmv).unwrap();
        assert_eq!(find_bdmv(dir.path()).unwrap(), bdmv);
    }

    #[test]
    fn missing_playlist_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("BDMV")).unwrap();
        let err = BdmvScanner::default().scan(dir.path()).unwrap_err();
        assert!(matches!(err, ScanError::MissingDirectory(p) if p.ends_with("PLAYLIST")));
    }

    #[test]
    fn not_a_disc() {
        let dir = TempDir::new().unwrap();
        let err = BdmvScanner::default().scan(dir.path()).unwrap_err();
        assert!(matches!(err, ScanError::MissingDirectory(_)));
    }
}
