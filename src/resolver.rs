//! Turns filter-reported track labels into language, type and name.
//!
//! Every decoding back-end formats its track labels differently. Back-ends
//! are registered by filter identity in a [`FilterRegistry`]; those whose
//! label grammar is known carry a [`StreamParser`]. Labels from anything
//! else pass through untouched.
use crate::locale::english_name_by_lcid;
use crate::types::{FilterId, ResolvedStream, StreamDescriptor, StreamKind};
use nom::{
    bytes::complete::{tag_no_case, take_till1},
    character::complete::char,
    error::Error,
    sequence::{terminated, tuple},
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// MPC - Mpeg Source (Gabest)
pub const MPC_MPEG_SOURCE: FilterId = Uuid::from_u128(0x1365BE7A_C86A_473C_9A41_C0A6E82C9FA3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFields {
    pub language: String,
    pub audio_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleFields {
    pub language: String,
    pub name: String,
}

/// The label grammars this crate knows how to read.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StreamParser {
    /// `audio - <lang>,<type>(<extra>)` and `subtitle - <lang>,<name>(<extra>)`.
    MpcMpegSource,
}

impl StreamParser {
    pub fn parse_audio(&self, raw: &str) -> AudioFields {
        match self {
            StreamParser::MpcMpegSource => match mpc_fields("audio - ", raw) {
                Some((language, audio_type)) => AudioFields {
                    language: language.trim().to_string(),
                    audio_type: audio_type.trim().to_string(),
                },
                None => AudioFields {
                    language: raw.trim().to_string(),
                    audio_type: raw.trim().to_string(),
                },
            },
        }
    }

    pub fn parse_subtitle(&self, raw: &str) -> SubtitleFields {
        match self {
            StreamParser::MpcMpegSource => match mpc_fields("subtitle - ", raw) {
                Some((language, name)) => SubtitleFields {
                    language: language.trim().to_string(),
                    name: name.trim().to_string(),
                },
                None => SubtitleFields {
                    language: raw.trim().to_string(),
                    name: raw.trim().to_string(),
                },
            },
        }
    }
}

// <prefix><lang>,<field>(<extra>) where <field> runs up to the last
// parenthesised group that closes the label
fn mpc_fields<'a>(prefix: &'static str, raw: &'a str) -> Option<(&'a str, &'a str)> {
    let raw = raw.strip_suffix('\n').unwrap_or(raw);
    let (rest, (_, language)) = tuple((
        tag_no_case::<_, _, Error<&str>>(prefix),
        terminated(take_till1(|c| c == ','), char(',')),
    ))(raw)
    .ok()?;
    // only the language may span lines
    if rest.contains('\n') {
        return None;
    }

    let body = rest.strip_suffix(')')?;
    // the extra group needs something between its parentheses
    let (last, _) = body.char_indices().last()?;
    let open = body[..last].rfind('(')?;
    if open == 0 {
        return None;
    }
    Some((language, &rest[..open]))
}

/// A decoding back-end the host may build into the playback graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCapability {
    pub id: FilterId,
    pub display_name: String,
    pub recommended_build: u32,
    pub parser: Option<StreamParser>,
}

impl FilterCapability {
    pub fn mpc_mpeg_source() -> Self {
        FilterCapability {
            id: MPC_MPEG_SOURCE,
            display_name: "MPC - Mpeg Source (Gabest)".to_string(),
            recommended_build: 1287,
            parser: Some(StreamParser::MpcMpegSource),
        }
    }

    /// Whether an installed build of this filter is recent enough.
    pub fn meets_recommended_build(&self, build: u32) -> bool {
        build >= self.recommended_build
    }
}

/// Filter capabilities by identity. Built once at startup, read-only after.
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    filters: HashMap<FilterId, FilterCapability>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        FilterRegistry::default()
    }

    /// A registry holding every back-end this crate ships a parser for.
    pub fn builtin() -> Self {
        let mut registry = FilterRegistry::new();
        registry.register(FilterCapability::mpc_mpeg_source());
        registry
    }

    /// Registers `capability` under its identity, returning the one it replaces.
    pub fn register(&mut self, capability: FilterCapability) -> Option<FilterCapability> {
        self.filters.insert(capability.id, capability)
    }

    pub fn lookup(&self, id: &FilterId) -> Option<&FilterCapability> {
        self.filters.get(id)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Resolves track labels against a shared registry. Never fails: labels it
/// can't read come back as they were reported.
#[derive(Debug, Clone)]
pub struct StreamResolver {
    registry: Arc<FilterRegistry>,
}

impl StreamResolver {
    pub fn new(registry: Arc<FilterRegistry>) -> Self {
        StreamResolver { registry }
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    pub fn resolve(&self, descriptor: &StreamDescriptor) -> ResolvedStream {
        let raw = descriptor.raw_name.as_str();
        let locale_language = match descriptor.locale_id {
            0 => None,
            lcid => english_name_by_lcid(lcid),
        };
        if let Some(language) = locale_language {
            tracing::debug!("LCID: {}, OUT: {}", descriptor.locale_id, language);
        }

        let capability = self.registry.lookup(&descriptor.filter);
        let parser = capability.and_then(|c| c.parser.map(|p| (c, p)));
        if parser.is_none() {
            tracing::debug!("Filter: Unknown, GUID={}", descriptor.filter);
        }

        match descriptor.kind {
            StreamKind::Audio => {
                let fields = match parser {
                    Some((capability, parser)) => {
                        let fields = parser.parse_audio(raw);
                        tracing::debug!(
                            "Audio Filter: {}, IN: {} OUT: {} / {}",
                            capability.display_name,
                            raw,
                            fields.language,
                            fields.audio_type
                        );
                        fields
                    }
                    None => AudioFields {
                        language: raw.to_string(),
                        audio_type: raw.to_string(),
                    },
                };
                ResolvedStream {
                    language: locale_language
                        .map(str::to_string)
                        .unwrap_or(fields.language),
                    audio_type: Some(fields.audio_type),
                    display_name: None,
                }
            }
            StreamKind::Subtitle => {
                let fields = match parser {
                    Some((capability, parser)) => {
                        let fields = parser.parse_subtitle(raw);
                        tracing::debug!(
                            "Subtitle Filter: {}, IN: {} OUT: {} / {}",
                            capability.display_name,
                            raw,
                            fields.language,
                            fields.name
                        );
                        fields
                    }
                    None => SubtitleFields {
                        language: raw.to_string(),
                        name: raw.to_string(),
                    },
                };
                ResolvedStream {
                    language: locale_language
                        .map(str::to_string)
                        .unwrap_or(fields.language),
                    audio_type: None,
                    display_name: Some(fields.name),
                }
            }
        }
    }

    pub fn resolve_all(&self, descriptors: &[StreamDescriptor]) -> Vec<ResolvedStream> {
        descriptors.iter().map(|d| self.resolve(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> StreamResolver {
        StreamResolver::new(Arc::new(FilterRegistry::builtin()))
    }

    #[test]
    fn mpc_audio() {
        let fields = StreamParser::MpcMpegSource.parse_audio("audio - English,AC3 (2.0)");
        assert_eq!(fields.language, "English");
        assert_eq!(fields.audio_type, "AC3");
    }

    #[test]
    fn mpc_audio_type_is_greedy() {
        let fields =
            StreamParser::MpcMpegSource.parse_audio("Audio - Deutsch,DTS-HD (MA) (5.1, 48kHz)");
        assert_eq!(fields.language, "Deutsch");
        assert_eq!(fields.audio_type, "DTS-HD (MA)");
    }

    #[test]
    fn mpc_subtitle() {
        let fields =
            StreamParser::MpcMpegSource.parse_subtitle("subtitle - French, Forced PGS (0x1201)");
        assert_eq!(fields.language, "French");
        assert_eq!(fields.name, "Forced PGS");
    }

    #[test]
    fn mpc_no_match_is_trimmed_input() {
        let fields = StreamParser::MpcMpegSource.parse_audio(" English AC3 ");
        assert_eq!(fields.language, "English AC3");
        assert_eq!(fields.audio_type, "English AC3");

        // empty extra group
        let fields = StreamParser::MpcMpegSource.parse_audio("audio - English,AC3 ()");
        assert_eq!(fields.audio_type, "audio - English,AC3 ()");

        // subtitle grammar doesn't read audio labels
        let fields = StreamParser::MpcMpegSource.parse_subtitle("audio - English,AC3 (2.0)");
        assert_eq!(fields.name, "audio - English,AC3 (2.0)");
    }

    #[test]
    fn fields_edge_cases() {
        assert_eq!(mpc_fields("audio - ", "audio - ,AC3 (2.0)"), None);
        assert_eq!(mpc_fields("audio - ", "audio - English,(2.0)"), None);
        assert_eq!(
            mpc_fields("audio - ", "audio - English,A(x)"),
            Some(("English", "A"))
        );
        assert_eq!(
            mpc_fields("audio - ", "audio - Français,AC3 (2.0)"),
            Some(("Français", "AC3 "))
        );
    }

    #[test]
    fn trailing_newline() {
        let fields = StreamParser::MpcMpegSource.parse_audio("audio - English,AC3 (2.0)\n");
        assert_eq!(fields.language, "English");
        assert_eq!(fields.audio_type, "AC3");

        assert_eq!(
            mpc_fields("audio - ", "audio - Eng\nlish,AC3 (2.0)"),
            Some(("Eng\nlish", "AC3 "))
        );
        assert_eq!(mpc_fields("audio - ", "audio - English,AC3\n (2.0)"), None);
        assert_eq!(mpc_fields("audio - ", "audio - English,AC3 (2.0)\n\n"), None);
    }

    #[test]
    fn registry_lookup() {
        let registry = FilterRegistry::builtin();
        assert_eq!(registry.len(), 1);
        let mpc = registry.lookup(&MPC_MPEG_SOURCE).unwrap();
        assert_eq!(mpc.display_name, "MPC - Mpeg Source (Gabest)");
        assert_eq!(
            mpc.id,
            Uuid::parse_str("{1365BE7A-C86A-473C-9A41-C0A6E82C9FA3}").unwrap()
        );
        assert!(registry.lookup(&Uuid::nil()).is_none());
    }

    #[test]
    fn recommended_build() {
        let mpc = FilterCapability::mpc_mpeg_source();
        assert!(mpc.meets_recommended_build(1287));
        assert!(mpc.meets_recommended_build(1300));
        assert!(!mpc.meets_recommended_build(1286));
    }

    #[test]
    fn resolve_audio_from_known_filter() {
        let resolved = resolver().resolve(&StreamDescriptor::audio(
            "audio - English,AC3 (2.0)",
            MPC_MPEG_SOURCE,
        ));
        assert_eq!(resolved.language, "English");
        assert_eq!(resolved.audio_type.as_deref(), Some("AC3"));
        assert_eq!(resolved.display_name, None);
    }

    #[test]
    fn unknown_filter_passes_through() {
        let raw = " audio - English,AC3 (2.0)";
        let resolved = resolver().resolve(&StreamDescriptor::audio(raw, Uuid::nil()));
        assert_eq!(resolved.language, raw);
        assert_eq!(resolved.audio_type.as_deref(), Some(raw));
    }

    #[test]
    fn filter_without_parser_passes_through() {
        let id = Uuid::from_u128(0xB98D13E7_55DB_4385_A33D_09FD1BA26338);
        let mut registry = FilterRegistry::builtin();
        registry.register(FilterCapability {
            id,
            display_name: "LAV Splitter Source".to_string(),
            recommended_build: 0,
            parser: None,
        });
        let resolver = StreamResolver::new(Arc::new(registry));
        let resolved = resolver.resolve(&StreamDescriptor::subtitle("S: English [PGS]", id));
        assert_eq!(resolved.language, "S: English [PGS]");
        assert_eq!(resolved.display_name.as_deref(), Some("S: English [PGS]"));
        assert_eq!(resolved.audio_type, None);
    }

    #[test]
    fn locale_id_wins_for_language() {
        let descriptor =
            StreamDescriptor::subtitle("subtitle - Deutsch,Forced (0x1200)", MPC_MPEG_SOURCE)
                .with_locale(0x0407);
        let resolved = resolver().resolve(&descriptor);
        assert_eq!(resolved.language, "German");
        assert_eq!(resolved.display_name.as_deref(), Some("Forced"));

        let unknown_lcid =
            StreamDescriptor::audio("audio - English,AC3 (2.0)", MPC_MPEG_SOURCE).with_locale(0x3FF);
        assert_eq!(resolver().resolve(&unknown_lcid).language, "English");
    }
}
