//! Language names and codes.
//!
//! Filters report track languages either as a Windows locale id or as
//! free text. This table maps both onto English language names and lets a
//! configured preference (`"de"`, `"ger"`, `"German"`, ...) be matched
//! against whatever the filter produced.

#[derive(Debug, PartialEq, Eq)]
pub struct Language {
    pub english_name: &'static str,
    pub iso_639_1: &'static str,
    /// ISO 639-2 terminology code.
    pub iso_639_2t: &'static str,
    /// ISO 639-2 bibliographic code, as used in Blu-ray stream attributes.
    pub iso_639_2b: &'static str,
    /// Windows three-letter language name.
    pub windows: &'static str,
    /// Windows primary language id, the low 10 bits of an LCID.
    pub primary_id: u16,
}

macro_rules! lang {
    ($name:expr, $iso1:expr, $iso2t:expr, $iso2b:expr, $win:expr, $id:expr) => {
        Language {
            english_name: $name,
            iso_639_1: $iso1,
            iso_639_2t: $iso2t,
            iso_639_2b: $iso2b,
            windows: $win,
            primary_id: $id,
        }
    };
}

pub static LANGUAGES: &[Language] = &[
    lang!("Arabic", "ar", "ara", "ara", "ARA", 0x01),
    lang!("Bulgarian", "bg", "bul", "bul", "BGR", 0x02),
    lang!("Catalan", "ca", "cat", "cat", "CAT", 0x03),
    lang!("Chinese", "zh", "zho", "chi", "CHS", 0x04),
    lang!("Czech", "cs", "ces", "cze", "CSY", 0x05),
    lang!("Danish", "da", "dan", "dan", "DAN", 0x06),
    lang!("German", "de", "deu", "ger", "DEU", 0x07),
    lang!("Greek", "el", "ell", "gre", "ELL", 0x08),
    lang!("English", "en", "eng", "eng", "ENU", 0x09),
    lang!("Spanish", "es", "spa", "spa", "ESP", 0x0A),
    lang!("Finnish", "fi", "fin", "fin", "FIN", 0x0B),
    lang!("French", "fr", "fra", "fre", "FRA", 0x0C),
    lang!("Hebrew", "he", "heb", "heb", "HEB", 0x0D),
    lang!("Hungarian", "hu", "hun", "hun", "HUN", 0x0E),
    lang!("Icelandic", "is", "isl", "ice", "ISL", 0x0F),
    lang!("Italian", "it", "ita", "ita", "ITA", 0x10),
    lang!("Japanese", "ja", "jpn", "jpn", "JPN", 0x11),
    lang!("Korean", "ko", "kor", "kor", "KOR", 0x12),
    lang!("Dutch", "nl", "nld", "dut", "NLD", 0x13),
    lang!("Norwegian", "no", "nor", "nor", "NOR", 0x14),
    lang!("Polish", "pl", "pol", "pol", "PLK", 0x15),
    lang!("Portuguese", "pt", "por", "por", "PTB", 0x16),
    lang!("Romanian", "ro", "ron", "rum", "ROM", 0x18),
    lang!("Russian", "ru", "rus", "rus", "RUS", 0x19),
    lang!("Croatian", "hr", "hrv", "hrv", "HRV", 0x1A),
    lang!("Slovak", "sk", "slk", "slo", "SKY", 0x1B),
    lang!("Swedish", "sv", "swe", "swe", "SVE", 0x1D),
    lang!("Thai", "th", "tha", "tha", "THA", 0x1E),
    lang!("Turkish", "tr", "tur", "tur", "TRK", 0x1F),
    lang!("Indonesian", "id", "ind", "ind", "IND", 0x21),
    lang!("Ukrainian", "uk", "ukr", "ukr", "UKR", 0x22),
    lang!("Slovenian", "sl", "slv", "slv", "SLV", 0x24),
    lang!("Estonian", "et", "est", "est", "ETI", 0x25),
    lang!("Latvian", "lv", "lav", "lav", "LVI", 0x26),
    lang!("Lithuanian", "lt", "lit", "lit", "LTH", 0x27),
    lang!("Vietnamese", "vi", "vie", "vie", "VIT", 0x2A),
    lang!("Hindi", "hi", "hin", "hin", "HIN", 0x39),
    lang!("Malay", "ms", "msa", "may", "MSL", 0x3E),
];

impl Language {
    pub fn by_lcid(lcid: u32) -> Option<&'static Language> {
        let primary = (lcid & 0x3FF) as u16;
        if primary == 0 {
            return None;
        }
        LANGUAGES.iter().find(|l| l.primary_id == primary)
    }

    /// Finds a language by English name or any of its codes.
    pub fn lookup(name_or_code: &str) -> Option<&'static Language> {
        let needle = name_or_code.trim();
        LANGUAGES.iter().find(|l| l.matches(needle))
    }

    /// Whether `lang` names this language, ignoring case.
    pub fn matches(&self, lang: &str) -> bool {
        [
            self.english_name,
            self.iso_639_1,
            self.iso_639_2t,
            self.iso_639_2b,
            self.windows,
        ]
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(lang))
    }
}

/// The English name of the language behind a Windows locale id.
pub fn english_name_by_lcid(lcid: u32) -> Option<&'static str> {
    Language::by_lcid(lcid).map(|l| l.english_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcid_ignores_region() {
        assert_eq!(english_name_by_lcid(0x0409), Some("English"));
        assert_eq!(english_name_by_lcid(0x0809), Some("English"));
        assert_eq!(english_name_by_lcid(0x0407), Some("German"));
        assert_eq!(english_name_by_lcid(0x0C0C), Some("French"));
        assert_eq!(english_name_by_lcid(0), None);
        assert_eq!(english_name_by_lcid(0x03FF), None);
    }

    #[test]
    fn matches_every_code() {
        let german = Language::lookup("de").unwrap();
        for s in ["German", "german", "de", "DE", "deu", "ger", "DEU"] {
            assert!(german.matches(s), "{}", s);
        }
        assert!(!german.matches("Germany"));
        assert!(!german.matches("English"));
    }

    #[test]
    fn unknown_lookup() {
        assert_eq!(Language::lookup("Klingon"), None);
        assert_eq!(Language::lookup(" fre ").map(|l| l.english_name), Some("French"));
    }

    #[test]
    fn primary_ids_unique() {
        for (i, a) in LANGUAGES.iter().enumerate() {
            assert!(LANGUAGES[i + 1..].iter().all(|b| b.primary_id != a.primary_id));
        }
    }
}
