//! Turns a playback request into the file that is actually played.
use crate::config::Settings;
use crate::disambiguation::{dialog_heading, Disambiguation, FeaturePrompt, Outcome};
use crate::refresh::{request_refresh_rate, RefreshRateChanger};
use crate::route::{route, PlaybackRoute};
use crate::scan::{scan_disc, BdmvScanner, DiscScanner};
use crate::selector::{select_candidates, Candidates};
use crate::types::{Chapter, Playlist};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackPlan {
    /// Play `path`, with `chapters` as the chapter list if one was chosen.
    Play { path: PathBuf, chapters: Vec<Chapter> },
    /// The user backed out of the feature dialog; nothing is played.
    Cancelled,
}

impl PlaybackPlan {
    fn unchanged(path: PathBuf) -> Self {
        PlaybackPlan::Play {
            path,
            chapters: Vec::new(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            PlaybackPlan::Play { path, .. } => Some(path),
            PlaybackPlan::Cancelled => None,
        }
    }
}

/// Picks the feature playlist of a disc before playback starts.
pub struct FeatureSelection {
    scanner: Arc<dyn DiscScanner>,
    settings: Settings,
}

impl FeatureSelection {
    pub fn new(scanner: Arc<dyn DiscScanner>, settings: Settings) -> Self {
        FeatureSelection { scanner, settings }
    }

    /// Uses the built-in `BDMV` scanner configured from `settings`.
    pub fn with_settings(settings: Settings) -> Self {
        let scanner = Arc::new(BdmvScanner::new(settings.scan.clone()));
        FeatureSelection::new(scanner, settings)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Decides what to play for `path`.
    ///
    /// Any failure to read the disc falls back to playing `path` unchanged.
    pub async fn prepare(
        &self,
        path: &Path,
        prompt: &mut dyn FeaturePrompt,
        refresh: &dyn RefreshRateChanger,
    ) -> PlaybackPlan {
        let path = match route(path) {
            PlaybackRoute::Select(path) => path,
            PlaybackRoute::Direct(path) | PlaybackRoute::Passthrough(path) => {
                return PlaybackPlan::unchanged(path)
            }
        };

        let disc = match scan_disc(Arc::clone(&self.scanner), path.clone()).await {
            Ok(disc) => disc,
            Err(e) => {
                tracing::error!("Failed to scan {}: {}", path.display(), e);
                return PlaybackPlan::unchanged(path);
            }
        };

        let playlist = match select_candidates(&disc, self.settings.min_feature_length_secs) {
            Candidates::NoContent => return PlaybackPlan::unchanged(path),
            Candidates::Single(playlist) => playlist,
            Candidates::Ambiguous(candidates) => {
                let heading = dialog_heading(&disc.title);
                match Disambiguation::new(candidates).run(&heading, prompt) {
                    Outcome::Selected(playlist) => playlist,
                    Outcome::Cancelled => return PlaybackPlan::Cancelled,
                }
            }
        };

        let path = disc.playlist_path(&playlist);
        self.play(path, playlist, refresh)
    }

    fn play(
        &self,
        path: PathBuf,
        playlist: Playlist,
        refresh: &dyn RefreshRateChanger,
    ) -> PlaybackPlan {
        tracing::info!(
            "Selected: Playlist={}, Chapters={}",
            playlist.name,
            playlist.chapters.len()
        );
        if self.settings.auto_refresh_rate {
            request_refresh_rate(playlist.primary_frame_rate(), &path, refresh);
        }
        PlaybackPlan::Play {
            path,
            chapters: playlist.chapters,
        }
    }
}
