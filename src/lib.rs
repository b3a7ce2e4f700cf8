//! Blu-ray main feature selection.
//!
//! Discs often carry dozens of playlists: the main feature, menu loops,
//! trailers, seamless-branching variants of the same film. Given a path into
//! a disc, this crate scans its `BDMV/PLAYLIST` directory, ranks the
//! playlists, and either picks the feature outright or asks the user through
//! a [`FeaturePrompt`] which one to play. Once a playlist is chosen, its
//! primary video frame rate can be handed to a [`RefreshRateChanger`].
//!
//! Separately, [`StreamResolver`] turns the raw audio and subtitle track names
//! reported by known demultiplexer filters into language and codec fields,
//! and [`select_tracks`] picks the initial tracks from the preferred
//! languages.
//!
//! The entry point for playback is [`FeatureSelection::prepare`].
//!
//! [`FeaturePrompt`]: disambiguation/trait.FeaturePrompt.html
//! [`RefreshRateChanger`]: refresh/trait.RefreshRateChanger.html
//! [`StreamResolver`]: resolver/struct.StreamResolver.html
//! [`select_tracks`]: tracks/fn.select_tracks.html
//! [`FeatureSelection::prepare`]: playback/struct.FeatureSelection.html#method.prepare
//!
//! # Examples
//! ```no_run
//! use bdselect::{FeaturePrompt, FeatureSelection, NoRefreshRateChange, PlaybackPlan, Settings};
//! use std::path::Path;
//!
//! struct FirstEntry;
//!
//! impl FeaturePrompt for FirstEntry {
//!     fn choose(&mut self, _heading: &str, _entries: &[String]) -> i32 {
//!         1
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let selection = FeatureSelection::with_settings(Settings::default());
//! let plan = selection
//!     .prepare(Path::new("/media/disc/BDMV/index.bdmv"), &mut FirstEntry, &NoRefreshRateChange)
//!     .await;
//! if let PlaybackPlan::Play { path, chapters } = plan {
//!     println!("{} ({} chapters)", path.display(), chapters.len());
//! }
//! # }
//! ```
pub mod config;
pub mod disambiguation;
pub mod error;
pub mod locale;
pub mod meta;
pub mod mpls;
mod parser;
pub mod playback;
pub mod refresh;
pub mod resolver;
pub mod route;
pub mod scan;
pub mod selector;
pub mod tracks;
pub mod types;

pub use config::{Settings, ScanOptions};
pub use disambiguation::{Disambiguation, FeaturePrompt, Outcome};
pub use error::*;
pub use mpls::MplsPlaylist;
pub use playback::{FeatureSelection, PlaybackPlan};
pub use refresh::{NoRefreshRateChange, RefreshRateChanger};
pub use resolver::{FilterCapability, FilterRegistry, StreamResolver};
pub use route::{handles_path, route, PlaybackRoute};
pub use scan::{BdmvScanner, DiscScanner};
pub use selector::{select_candidates, Candidates, FeatureCandidates};
pub use tracks::{select_tracks, TrackSelection};
pub use types::*;
