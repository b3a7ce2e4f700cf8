//! Lets the user pick the feature when more than one playlist qualifies.
//!
//! The heuristic subset is shown first. If it hides candidates, a trailing
//! "show all" entry expands the list to every candidate once; after that it
//! is not offered again. Selections are 1-based, anything below 1 cancels.
use crate::selector::FeatureCandidates;
use crate::types::Playlist;

pub const SHOW_ALL_LABEL: &str = "List all features...";
pub const DEFAULT_HEADING: &str = "Bluray: Select Feature";

/// The dialog collaborator.
pub trait FeaturePrompt {
    /// Shows `entries` under `heading` and returns the 1-based index of the
    /// chosen entry. Values below 1 mean the user backed out.
    fn choose(&mut self, heading: &str, entries: &[String]) -> i32;
}

#[derive(Debug, Clone, PartialEq)]
pub enum State {
    Presenting {
        subset: Vec<Playlist>,
        hidden_exists: bool,
    },
    /// The user asked for every candidate; the next presentation shows them.
    Expanded,
    Selected(Playlist),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Selected(Playlist),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct Disambiguation {
    all: Vec<Playlist>,
    state: State,
}

impl Disambiguation {
    pub fn new(candidates: FeatureCandidates) -> Self {
        let hidden_exists = candidates.hidden_exists();
        Disambiguation {
            all: candidates.all,
            state: State::Presenting {
                subset: candidates.heuristic,
                hidden_exists,
            },
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Selected(_) | State::Cancelled)
    }

    /// The entry labels for the next round, re-entering the full list after
    /// an expansion. Empty once finished.
    pub fn present(&mut self) -> Vec<String> {
        if self.state == State::Expanded {
            self.state = State::Presenting {
                subset: self.all.clone(),
                hidden_exists: false,
            };
        }

        match &self.state {
            State::Presenting {
                subset,
                hidden_exists,
            } => {
                let mut entries: Vec<String> = subset
                    .iter()
                    .enumerate()
                    .map(|(i, p)| feature_label(i + 1, p))
                    .collect();
                if *hidden_exists {
                    entries.push(SHOW_ALL_LABEL.to_string());
                }
                entries
            }
            _ => Vec::new(),
        }
    }

    /// Applies the user's answer to the current presentation.
    ///
    /// An index past the last entry leaves the presentation as it is.
    pub fn choose(&mut self, selection: i32) -> &State {
        let State::Presenting {
            subset,
            hidden_exists,
        } = &self.state
        else {
            return &self.state;
        };

        if selection < 1 {
            tracing::debug!("User cancelled dialog.");
            self.state = State::Cancelled;
            return &self.state;
        }

        let idx = selection as usize;
        if idx <= subset.len() {
            self.state = State::Selected(subset[idx - 1].clone());
        } else if *hidden_exists && idx == subset.len() + 1 {
            self.state = State::Expanded;
        } else {
            tracing::warn!("Ignoring out of range selection {}", selection);
        }
        &self.state
    }

    /// Drives the prompt until a playlist is chosen or the user cancels.
    pub fn run(mut self, heading: &str, prompt: &mut dyn FeaturePrompt) -> Outcome {
        loop {
            let entries = self.present();
            let selection = prompt.choose(heading, &entries);
            match self.choose(selection) {
                State::Selected(p) => return Outcome::Selected(p.clone()),
                State::Cancelled => return Outcome::Cancelled,
                State::Presenting { .. } | State::Expanded => continue,
            }
        }
    }
}

/// `HH:MM:SS` of a clock duration; the hour wraps after a day.
pub fn format_duration(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!(
        "{:02}:{:02}:{:02}",
        (total / 3600) % 24,
        (total / 60) % 60,
        total % 60
    )
}

/// `Feature #2, 12 Chapters (01:47:05)`
pub fn feature_label(ordinal: usize, playlist: &Playlist) -> String {
    let chapters = playlist.chapters.len();
    format!(
        "Feature #{}, {} Chapter{} ({})",
        ordinal,
        chapters,
        if chapters > 1 { "s" } else { "" },
        format_duration(playlist.total_length_secs)
    )
}

/// The disc title without characters the dialog font can't draw.
pub fn dialog_heading(title: &str) -> String {
    let heading: String = title
        .chars()
        .filter(|&c| {
            c.is_alphanumeric() || c == '_' || c.is_whitespace() || "*%$+,.-:!?()".contains(c)
        })
        .collect();
    let heading = heading.trim();
    if heading.is_empty() {
        DEFAULT_HEADING.to_string()
    } else {
        heading.to_string()
    }
}
