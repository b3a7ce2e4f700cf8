use std::{
    collections::BTreeMap,
    fmt::Debug,
    path::{Path, PathBuf},
};
use uuid::Uuid;

/// The scanned structure of a disc.
///
/// Produced once per scan by a [`DiscScanner`] and owned by whoever triggered
/// the scan. Playlists are keyed by their file name (e.g. `"00800.mpls"`).
///
/// [`DiscScanner`]: ../scan/trait.DiscScanner.html
#[derive(Debug, Clone, Default)]
pub struct DiscStructure {
    /// The disc title from the metadata file, empty if there is none.
    pub title: String,
    pub playlists: BTreeMap<String, Playlist>,
    /// The directory containing the playlist files.
    pub playlist_directory: PathBuf,
}

impl DiscStructure {
    pub fn new(title: impl Into<String>, playlist_directory: impl Into<PathBuf>) -> Self {
        DiscStructure {
            title: title.into(),
            playlists: BTreeMap::new(),
            playlist_directory: playlist_directory.into(),
        }
    }

    /// Adds a playlist, replacing any previous playlist with the same name.
    pub fn insert(&mut self, playlist: Playlist) {
        self.playlists.insert(playlist.name.clone(), playlist);
    }

    /// The path a chosen playlist is played back from.
    pub fn playlist_path(&self, playlist: &Playlist) -> PathBuf {
        self.playlist_directory.join(&playlist.name)
    }

    pub fn playlist_directory(&self) -> &Path {
        &self.playlist_directory
    }
}

/// A playable sequence on the disc: the main feature, a menu loop, a
/// trailer and so on.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    pub name: String,
    pub is_valid: bool,
    /// Never negative.
    pub total_length_secs: f64,
    pub has_loops: bool,
    pub chapters: Vec<Chapter>,
    pub video_streams: Vec<VideoStreamInfo>,
}

impl Playlist {
    /// Creates a valid, loop-free playlist without chapters or video streams.
    pub fn new(name: impl Into<String>, total_length_secs: f64) -> Self {
        Playlist {
            name: name.into(),
            is_valid: true,
            total_length_secs: total_length_secs.max(0.0),
            has_loops: false,
            chapters: Vec::new(),
            video_streams: Vec::new(),
        }
    }

    /// The frame rate of the primary video stream, if the playlist has one.
    pub fn primary_frame_rate(&self) -> Option<FrameRate> {
        self.video_streams.first().map(|v| v.frame_rate)
    }
}

/// A chapter marker, relative to the start of its playlist.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Chapter {
    pub offset: TimeStamp,
}

impl Chapter {
    pub fn seconds(&self) -> f64 {
        self.offset.seconds()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VideoStreamInfo {
    pub frame_rate: FrameRate,
}

/// The frame rates a Blu-ray video stream can declare.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FrameRate {
    Unknown,
    Fps23_976,
    Fps24,
    Fps25,
    Fps29_97,
    Fps50,
    Fps59_94,
}

/// A time stamp, relative to some System Time Clock sequence, expressed in 45 KHz.
///
/// To get a floating-point value in seconds, you can use the [`seconds`] method.
///
/// [`seconds`]: #method.seconds
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeStamp(pub u32);

impl TimeStamp {
    /// Returns this time stamp in units of seconds.
    pub fn seconds(&self) -> f64 {
        (self.0 as f64) / 45_000f64
    }
}

impl Debug for TimeStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeStamp")
            .field("raw", &self.0)
            .field("secs", &self.seconds())
            .finish()
    }
}

/// Identity of a decoding back-end (a DirectShow class id on the host).
pub type FilterId = Uuid;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StreamKind {
    Audio,
    Subtitle,
}

/// A track label as reported by the filter that exposes the track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDescriptor {
    pub raw_name: String,
    pub filter: FilterId,
    /// Windows locale id, `0` if the filter reported none.
    pub locale_id: u32,
    pub kind: StreamKind,
}

impl StreamDescriptor {
    pub fn audio(raw_name: impl Into<String>, filter: FilterId) -> Self {
        StreamDescriptor {
            raw_name: raw_name.into(),
            filter,
            locale_id: 0,
            kind: StreamKind::Audio,
        }
    }

    pub fn subtitle(raw_name: impl Into<String>, filter: FilterId) -> Self {
        StreamDescriptor {
            raw_name: raw_name.into(),
            filter,
            locale_id: 0,
            kind: StreamKind::Subtitle,
        }
    }

    pub fn with_locale(mut self, locale_id: u32) -> Self {
        self.locale_id = locale_id;
        self
    }
}

/// Normalized values for one track.
///
/// `audio_type` is only set for audio tracks, `display_name` only for
/// subtitle tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStream {
    pub language: String,
    pub audio_type: Option<String>,
    pub display_name: Option<String>,
}
