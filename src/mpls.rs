//! Movie playlist (MPLS) files.
//!
//! Only the parts of the file that feature selection needs are kept: the
//! play items with their in/out times and primary video streams, and the
//! playlist marks. The MPLS file format is not officially documented; the
//! layout follows the third-party specs in the [lw/BluRay] repository and
//! the [bdinfo/mpls] Wikibooks page.
//!
//! [lw/BluRay]: https://github.com/lw/BluRay/wiki/MPLS
//! [bdinfo/mpls]: https://en.wikibooks.org/wiki/User:Bdinfo/mpls
use crate::config::ScanOptions;
use crate::error::MplsError;
use crate::parser::parse_mpls;
use crate::types::{Chapter, FrameRate, Playlist, TimeStamp, VideoStreamInfo};
use std::collections::HashSet;
use std::io::Read;

/// A parsed movie playlist.
#[derive(Debug, Clone)]
pub struct MplsPlaylist {
    pub play_items: Vec<PlayItem>,
    pub marks: Vec<PlayListMark>,
}

#[derive(Debug, Clone)]
pub struct PlayItem {
    pub clip: Clip,
    pub in_time: TimeStamp,
    pub out_time: TimeStamp,
    pub angles: Vec<Clip>,
    /// Frame rates of the item's primary video streams, in stream order.
    pub primary_video: Vec<FrameRate>,
}

impl PlayItem {
    pub fn duration(&self) -> TimeStamp {
        TimeStamp(self.out_time.0.saturating_sub(self.in_time.0))
    }
}

/// A clip file, also known as a segment.
///
/// This identifies the playable stream file. `file_name` consists of 5 numbers
/// (e.g. "00055"), and `codec_id` of 4 letters which will usually be "M2TS" on
/// blu-rays.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clip {
    pub file_name: String,
    pub codec_id: String,
}

#[derive(Debug, Copy, Clone)]
pub struct PlayListMark {
    pub mark_type: MarkType,
    /// Index of the play item this mark points into.
    pub play_item: u16,
    pub time_stamp: TimeStamp,
    pub duration: Option<TimeStamp>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarkType {
    EntryPoint,
    LinkPoint,
    Unknown,
}

impl MplsPlaylist {
    /// Attempts to parse a movie playlist from the given reader.
    pub fn from<R: Read>(mut reader: R) -> Result<MplsPlaylist, MplsError> {
        let bytes = {
            let mut buffer = Vec::new();
            reader.read_to_end(&mut buffer)?;
            buffer
        };

        MplsPlaylist::parse(&bytes)
    }

    pub fn parse(bytes: &[u8]) -> Result<MplsPlaylist, MplsError> {
        parse_mpls(bytes)
            .map_err(|_| MplsError::Parse)
            .map(|(_, m)| m)
    }

    /// The summed duration of all play items.
    pub fn total_length(&self) -> TimeStamp {
        TimeStamp(
            self.play_items
                .iter()
                .fold(0u32, |acc, p| acc.saturating_add(p.duration().0)),
        )
    }

    /// Entry-point marks, as offsets from the start of the playlist.
    ///
    /// Marks pointing at a play item that doesn't exist are dropped.
    pub fn chapters(&self) -> Vec<Chapter> {
        let mut starts = Vec::with_capacity(self.play_items.len());
        let mut elapsed = 0u32;
        for item in &self.play_items {
            starts.push(elapsed);
            elapsed = elapsed.saturating_add(item.duration().0);
        }

        self.marks
            .iter()
            .filter(|m| m.mark_type == MarkType::EntryPoint)
            .filter_map(|m| {
                let idx = m.play_item as usize;
                let item = self.play_items.get(idx)?;
                let into_item = m.time_stamp.0.saturating_sub(item.in_time.0);
                Some(Chapter {
                    offset: TimeStamp(starts[idx].saturating_add(into_item)),
                })
            })
            .collect()
    }

    /// Whether the same stretch of a clip is played more than once.
    pub fn has_loops(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.play_items.len());
        self.play_items
            .iter()
            .any(|p| !seen.insert((&p.clip.file_name, p.in_time)))
    }

    /// The primary video streams of the first play item.
    pub fn video_streams(&self) -> Vec<VideoStreamInfo> {
        self.play_items
            .first()
            .map(|p| {
                p.primary_video
                    .iter()
                    .map(|&frame_rate| VideoStreamInfo { frame_rate })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Summarizes this playlist for feature selection.
    pub fn to_playlist(&self, name: impl Into<String>, options: &ScanOptions) -> Playlist {
        let total_length_secs = self.total_length().seconds();
        let has_loops = self.has_loops();
        let is_valid = !(options.filter_short && total_length_secs < options.short_length_secs)
            && !(options.filter_looping && has_loops)
            && !self.play_items.is_empty();

        Playlist {
            name: name.into(),
            is_valid,
            total_length_secs,
            has_loops,
            chapters: self.chapters(),
            video_streams: self.video_streams(),
        }
    }
}
