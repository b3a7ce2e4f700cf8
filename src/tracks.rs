//! Picks the initial audio and subtitle tracks from the preferred languages.
use crate::config::Settings;
use crate::locale::Language;
use crate::types::ResolvedStream;

const FALLBACK_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackSelection {
    pub audio: Option<usize>,
    pub subtitle: Option<usize>,
    pub subtitles_enabled: bool,
}

fn preferred(code: &str) -> &'static Language {
    Language::lookup(code)
        .or_else(|| {
            tracing::warn!("Unknown language '{}', using English", code);
            Language::lookup(FALLBACK_LANGUAGE)
        })
        .unwrap_or(&crate::locale::LANGUAGES[0])
}

/// The first audio track in the preferred audio language and the first
/// subtitle track in the preferred subtitle language.
///
/// Subtitles stay off when the chosen audio track is already in the
/// subtitle language.
pub fn select_tracks(
    settings: &Settings,
    audio: &[ResolvedStream],
    subtitles: &[ResolvedStream],
) -> TrackSelection {
    let audio_language = preferred(&settings.audio_language);
    let subtitle_language = preferred(&settings.subtitle_language);
    let mut selection = TrackSelection::default();

    if let Some(i) = audio.iter().position(|s| audio_language.matches(&s.language)) {
        tracing::info!(
            "Selected active audio track language: {} ({})",
            audio_language.english_name,
            i
        );
        selection.audio = Some(i);
    }

    if let Some(i) = subtitles
        .iter()
        .position(|s| subtitle_language.matches(&s.language))
    {
        selection.subtitle = Some(i);
        let audio_matches = selection
            .audio
            .is_some_and(|a| subtitle_language.matches(&audio[a].language));
        if audio_matches {
            tracing::debug!("Disabling subtitles because the audio language is the same.");
        } else {
            tracing::info!(
                "Selected active subtitle track language: {} ({})",
                subtitle_language.english_name,
                i
            );
            selection.subtitles_enabled = true;
        }
    }

    selection
}
