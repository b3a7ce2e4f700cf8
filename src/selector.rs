//! Picks out the playlists that could be the main feature.
use crate::types::{DiscStructure, Playlist};
use std::collections::HashSet;

/// The outcome of ranking a disc's playlists.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidates {
    /// No valid playlist; play the original path unchanged.
    NoContent,
    /// Exactly one candidate, no need to ask.
    Single(Playlist),
    /// More than one candidate; the user has to pick.
    Ambiguous(FeatureCandidates),
}

/// Candidates that need disambiguation.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCandidates {
    /// Every ranked, deduplicated candidate.
    pub all: Vec<Playlist>,
    /// The probable features among `all`. Never empty.
    pub heuristic: Vec<Playlist>,
}

impl FeatureCandidates {
    /// Whether the heuristic hides some of the candidates.
    pub fn hidden_exists(&self) -> bool {
        self.all.len() > self.heuristic.len()
    }
}

/// Valid playlists, longest first, without structural duplicates.
///
/// Equal lengths keep their input order. Two playlists are duplicates when
/// name, length and chapter count all match; the first one wins.
pub fn rank_candidates<'a>(playlists: impl IntoIterator<Item = &'a Playlist>) -> Vec<Playlist> {
    let mut ranked: Vec<&Playlist> = playlists.into_iter().filter(|p| p.is_valid).collect();
    ranked.sort_by(|a, b| b.total_length_secs.total_cmp(&a.total_length_secs));

    let mut seen = HashSet::with_capacity(ranked.len());
    ranked
        .into_iter()
        .filter(|&p| {
            seen.insert((
                p.name.as_str(),
                p.total_length_secs.to_bits(),
                p.chapters.len(),
            ))
        })
        .cloned()
        .collect()
}

/// Chapters or feature length, and no loops.
pub fn is_probable_feature(playlist: &Playlist, min_feature_length_secs: f64) -> bool {
    (playlist.chapters.len() > 1 || playlist.total_length_secs >= min_feature_length_secs)
        && !playlist.has_loops
}

/// The probable features among `candidates`, or all of them if none qualify.
pub fn heuristic_subset(candidates: &[Playlist], min_feature_length_secs: f64) -> Vec<Playlist> {
    let subset: Vec<Playlist> = candidates
        .iter()
        .filter(|p| is_probable_feature(p, min_feature_length_secs))
        .cloned()
        .collect();

    if subset.is_empty() {
        candidates.to_vec()
    } else {
        subset
    }
}

pub fn select_candidates(disc: &DiscStructure, min_feature_length_secs: f64) -> Candidates {
    let mut all = rank_candidates(disc.playlists.values());
    match all.len() {
        0 => {
            tracing::info!("No playlists found, bypassing dialog.");
            Candidates::NoContent
        }
        1 => {
            tracing::info!("Found one valid playlist, bypassing dialog.");
            Candidates::Single(all.remove(0))
        }
        n => {
            tracing::info!("Found {} playlists, showing selection dialog.", n);
            let heuristic = heuristic_subset(&all, min_feature_length_secs);
            Candidates::Ambiguous(FeatureCandidates { all, heuristic })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_FEATURE_LENGTH_SECS;
    use crate::types::{Chapter, TimeStamp};

    fn playlist(name: &str, secs: f64, chapters: usize, loops: bool) -> Playlist {
        let mut p = Playlist::new(name, secs);
        p.has_loops = loops;
        p.chapters = (0..chapters)
            .map(|i| Chapter {
                offset: TimeStamp(i as u32 * 45_000),
            })
            .collect();
        p
    }

    fn names(playlists: &[Playlist]) -> Vec<&str> {
        playlists.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn sorted_longest_first_and_stable() {
        let input = vec![
            playlist("a", 100.0, 0, false),
            playlist("b", 300.0, 0, false),
            playlist("c", 100.0, 0, false),
            playlist("d", 200.0, 0, false),
        ];
        assert_eq!(names(&rank_candidates(&input)), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn invalid_dropped() {
        let mut invalid = playlist("x", 9000.0, 10, false);
        invalid.is_valid = false;
        let input = vec![invalid, playlist("y", 10.0, 0, false)];
        assert_eq!(names(&rank_candidates(&input)), vec!["y"]);
    }

    #[test]
    fn structural_duplicates_removed() {
        let mut twin = playlist("a", 100.0, 2, false);
        twin.has_loops = true;
        let input = vec![
            playlist("a", 100.0, 2, false),
            twin,
            playlist("a", 100.0, 3, false),
            playlist("b", 100.0, 2, false),
        ];
        let ranked = rank_candidates(&input);
        assert_eq!(names(&ranked), vec!["a", "a", "b"]);
        assert!(!ranked[0].has_loops);
        assert_eq!(ranked[1].chapters.len(), 3);
    }

    #[test]
    fn heuristic_keeps_features_only() {
        let input = vec![
            playlist("A", 300.0, 1, false),
            playlist("B", 3600.0, 5, false),
            playlist("C", 3600.0, 5, true),
        ];
        let ranked = rank_candidates(&input);
        let subset = heuristic_subset(&ranked, MIN_FEATURE_LENGTH_SECS);
        assert_eq!(names(&subset), vec!["B"]);
    }

    #[test]
    fn heuristic_length_floor_is_inclusive() {
        let input = vec![playlist("long", 3000.0, 0, false), playlist("short", 2999.0, 1, false)];
        assert_eq!(names(&heuristic_subset(&input, 3000.0)), vec!["long"]);
    }

    #[test]
    fn heuristic_falls_back_to_everything() {
        let input = vec![playlist("a", 60.0, 0, false), playlist("b", 30.0, 1, true)];
        assert_eq!(names(&heuristic_subset(&input, 3000.0)), vec!["a", "b"]);
    }

    #[test]
    fn no_playlists_is_no_content() {
        let disc = DiscStructure::new("", "/disc/BDMV/PLAYLIST");
        assert_eq!(select_candidates(&disc, 3000.0), Candidates::NoContent);
    }

    #[test]
    fn single_playlist_is_unambiguous() {
        let mut disc = DiscStructure::new("", "/disc/BDMV/PLAYLIST");
        disc.insert(playlist("00001.mpls", 1200.0, 3, false));
        match select_candidates(&disc, 3000.0) {
            Candidates::Single(p) => assert_eq!(p.name, "00001.mpls"),
            other => panic!("expected a single candidate, got {:?}", other),
        }
    }

    #[test]
    fn ambiguous_reports_hidden() {
        let mut disc = DiscStructure::new("", "/disc/BDMV/PLAYLIST");
        disc.insert(playlist("00001.mpls", 300.0, 1, false));
        disc.insert(playlist("00002.mpls", 3600.0, 5, false));
        disc.insert(playlist("00003.mpls", 3600.0, 5, true));
        match select_candidates(&disc, 3000.0) {
            Candidates::Ambiguous(c) => {
                assert_eq!(names(&c.all), vec!["00002.mpls", "00003.mpls", "00001.mpls"]);
                assert_eq!(names(&c.heuristic), vec!["00002.mpls"]);
                assert!(c.hidden_exists());
            }
            other => panic!("expected ambiguous candidates, got {:?}", other),
        }
    }
}
