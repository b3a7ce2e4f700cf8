//! The disc title from `BDMV/META/DL/bdmt_eng.xml`.
use crate::error::MetaError;
use crate::scan::{child_dir, child_file};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use std::path::{Path, PathBuf};

pub const DISCINFO_NAMESPACE: &[u8] = b"urn:BDA:bdmv;discinfo";

const TITLE_PATH: [&[u8]; 3] = [b"discinfo", b"title", b"name"];

const META_FILE: [&str; 3] = ["META", "DL", "bdmt_eng.xml"];

/// The English disc metadata file below a `BDMV` directory, matching each
/// path component ignoring case.
pub fn find_meta_file(bdmv: &Path) -> Option<PathBuf> {
    let [meta, dl, file] = META_FILE;
    let dl = child_dir(&child_dir(bdmv, meta)?, dl)?;
    child_file(&dl, file)
}

/// Extracts `discinfo/title/name` from disc metadata XML.
pub fn parse_disc_title(xml: &str) -> Result<String, MetaError> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    // (element is in the discinfo namespace, local name) for every open element
    let mut open: Vec<(bool, Vec<u8>)> = Vec::new();
    let mut title = String::new();

    loop {
        match reader.read_resolved_event()? {
            (ns, Event::Start(e)) => {
                let is_discinfo =
                    matches!(ns, ResolveResult::Bound(Namespace(n)) if n == DISCINFO_NAMESPACE);
                open.push((is_discinfo, e.local_name().as_ref().to_vec()));
            }
            (_, Event::End(_)) => {
                open.pop();
            }
            (_, Event::Text(e)) if in_title(&open) => {
                let text = e.unescape().map_err(quick_xml::Error::from)?;
                title.push_str(&text);
            }
            (_, Event::Eof) => break,
            _ => {}
        }
    }

    let title = title.trim();
    if title.is_empty() {
        Err(MetaError::MissingTitle)
    } else {
        Ok(title.to_string())
    }
}

fn in_title(open: &[(bool, Vec<u8>)]) -> bool {
    open.len() >= TITLE_PATH.len()
        && open[open.len() - TITLE_PATH.len()..]
            .iter()
            .zip(TITLE_PATH.iter())
            .all(|((is_discinfo, name), expected)| *is_discinfo && name.as_slice() == *expected)
}

pub fn read_disc_title(path: &Path) -> Result<String, MetaError> {
    let xml = std::fs::read_to_string(path)?;
    parse_disc_title(&xml)
}

/// The disc title, or an empty string if the metadata is missing or broken.
pub fn disc_title(bdmv: &Path) -> String {
    let Some(path) = find_meta_file(bdmv) else {
        tracing::debug!("No disc metadata below {}", bdmv.display());
        return String::new();
    };
    match read_disc_title(&path) {
        Ok(title) => {
            tracing::debug!("Bluray Metafile='{}', Title='{}'", path.display(), title);
            title
        }
        Err(MetaError::MissingTitle) => {
            tracing::debug!("Bluray Metafile='{}': No Title Found.", path.display());
            String::new()
        }
        Err(e) => {
            tracing::error!("Meta File Error: {}: {}", path.display(), e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const META: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<disclib xmlns="urn:BDA:bdmv;disclib" xmlns:di="urn:BDA:bdmv;discinfo">
  <di:discinfo>
    <di:date>2009-03-12</di:date>
    <di:title>
      <di:name> Star Trek &amp; Friends </di:name>
      <di:numSets>1</di:numSets>
    </di:title>
    <di:description>
      <di:thumbnail href="STAR_TREK_416.jpg" size="416x240" />
    </di:description>
  </di:discinfo>
</disclib>"#;

    #[test]
    fn title_found() {
        assert_eq!(parse_disc_title(META).unwrap(), "Star Trek & Friends");
    }

    #[test]
    fn wrong_namespace_ignored() {
        let xml = r#"<discinfo xmlns="urn:other"><title><name>Nope</name></title></discinfo>"#;
        assert!(matches!(parse_disc_title(xml), Err(MetaError::MissingTitle)));
    }

    #[test]
    fn default_namespace_counts() {
        let xml = r#"<discinfo xmlns="urn:BDA:bdmv;discinfo"><title><name>Up</name></title></discinfo>"#;
        assert_eq!(parse_disc_title(xml).unwrap(), "Up");
    }

    #[test]
    fn broken_xml_is_an_error() {
        let xml = r#"<di:discinfo xmlns:di="urn:BDA:bdmv;discinfo"><di:title></di:name>"#;
        assert!(parse_disc_title(xml).is_err());
    }

    #[test]
    fn lowercase_meta_tree() {
        let dir = tempfile::TempDir::new().unwrap();
        let dl = dir.path().join("meta").join("dl");
        std::fs::create_dir_all(&dl).unwrap();
        std::fs::write(dl.join("BDMT_ENG.XML"), META).unwrap();

        assert!(find_meta_file(dir.path()).is_some());
        assert_eq!(disc_title(dir.path()), "Star Trek & Friends");
    }

    #[test]
    fn missing_file_is_empty_title() {
        assert_eq!(disc_title(Path::new("/nonexistent/BDMV")), "");
    }
}
