//! Parses `ApplicationVersions.xml` into a [`Registry`].
//!
//! The attribute names and the `IsDefault` convention must stay exactly as
//! the Application Version Manager writes them; anything else breaks
//! compatibility with files already on users' machines.

use crate::error::{AvmError, DocumentError};
use crate::registry::decode::decode_document;
use crate::registry::identity::{ApplicationName, VersionId};
use crate::registry::model::{ApplicationEntry, Registry, VersionRecord};
use roxmltree::{Document, Node};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

const APPLICATION_TAG: &str = "Application";
const VERSION_TAG: &str = "Version";

const ATTR_NAME: &str = "Name";
const ATTR_VERSION_NUMBER: &str = "VersionNumber";
const ATTR_EXE_FILE_PATH: &str = "ExeFilePath";
const ATTR_INSTALL_DIR: &str = "InstallDir";
const ATTR_PLATFORM: &str = "Platform";
const ATTR_PRODUCT_TYPE: &str = "ProductType";
const ATTR_CATEGORY: &str = "Category";
const ATTR_IS_DEFAULT: &str = "IsDefault";

impl Registry {
    /// Read and parse a registry document from disk.
    ///
    /// A file that cannot be opened or read is `NotFound`. Bytes that do not
    /// decode in the document's encoding, and malformed markup, are
    /// `ParseError`. Neither is retried.
    pub fn load(path: &Path) -> Result<Self, AvmError> {
        debug!("Parsing applications and versions from '{}'.", path.display());
        let bytes = fs::read(path).map_err(|source| not_found(path, source))?;
        Self::from_xml_bytes(&bytes).map_err(|source| AvmError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse raw document bytes, honouring a byte-order mark or an
    /// `encoding` declaration.
    pub fn from_xml_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let contents = decode_document(bytes)?;
        Ok(parse_document(&contents)?)
    }

    /// Parse a registry document that is already in memory.
    pub fn from_xml_str(contents: &str) -> Result<Self, roxmltree::Error> {
        parse_document(contents)
    }
}

fn not_found(path: &Path, source: io::Error) -> AvmError {
    AvmError::NotFound {
        path: path.to_path_buf(),
        source: Some(source),
    }
}

fn parse_document(contents: &str) -> Result<Registry, roxmltree::Error> {
    let document = Document::parse(contents)?;
    let mut registry = Registry::default();

    for app in document
        .descendants()
        .filter(|node| node.has_tag_name(APPLICATION_TAG))
    {
        let name = ApplicationName::new(attribute(&app, ATTR_NAME));
        let entry = parse_application(&name, &app);
        if entry.default_count() > 1 {
            warn!(
                "Application '{name}' has {} versions marked default; using the last one.",
                entry.default_count()
            );
        }
        if registry.insert(name.clone(), entry).is_some() {
            warn!("Application '{name}' is registered more than once; keeping the last entry.");
        }
    }

    Ok(registry)
}

fn parse_application(name: &ApplicationName, app: &Node<'_, '_>) -> ApplicationEntry {
    let mut entry = ApplicationEntry::default();
    for node in app
        .descendants()
        .filter(|node| node.has_tag_name(VERSION_TAG))
    {
        let record = parse_version(&node);
        debug!(
            "Application '{name}' - version '{}' - is default {}",
            record.version, record.is_default
        );
        if let Some(previous) = entry.insert(record) {
            warn!(
                "Version '{}' of application '{name}' is registered more than once; keeping the last entry.",
                previous.version
            );
        }
    }
    entry
}

fn parse_version(node: &Node<'_, '_>) -> VersionRecord {
    VersionRecord {
        version: VersionId::new(attribute(node, ATTR_VERSION_NUMBER)),
        exe_path: attribute(node, ATTR_EXE_FILE_PATH).to_string(),
        install_dir: attribute(node, ATTR_INSTALL_DIR).to_string(),
        platform: attribute(node, ATTR_PLATFORM).to_string(),
        product_type: attribute(node, ATTR_PRODUCT_TYPE).to_string(),
        category: attribute(node, ATTR_CATEGORY).to_string(),
        is_default: attribute(node, ATTR_IS_DEFAULT).to_lowercase() == "true",
    }
}

// Absent attributes read as empty strings, matching the manager's own reader.
fn attribute<'a>(node: &Node<'a, '_>, name: &str) -> &'a str {
    node.attribute(name).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApplicationVersionManager>
  <Applications>
    <Application Name="Sima">
      <Versions>
        <Version Name="Sima" VersionNumber="3.5.0" ExeFilePath="C:\programs\sima_35_00\Sima.exe" InstallDir="C:\programs\sima_35_00" Platform="x64" ProductType="Full" Category="Marine" IsDefault="True" />
        <Version Name="Sima" VersionNumber="4.0.0-RC" ExeFilePath="C:\programs\sima_40_00\Sima.exe" IsDefault="false" />
      </Versions>
    </Application>
    <Application Name="Prefem">
      <Version VersionNumber="7.1.7" ExeFilePath="C:\programs\prefem_71_07\bin\prefem.EXE" IsDefault="TRUE" />
    </Application>
  </Applications>
</ApplicationVersionManager>
"#;

    #[test]
    fn parses_applications_in_document_order() {
        let registry = Registry::from_xml_str(SAMPLE).expect("parse sample");
        let names: Vec<_> = registry.names().map(ApplicationName::as_str).collect();
        assert_eq!(names, vec!["sima", "prefem"]);

        let sima = registry.application("sima").unwrap();
        let ids: Vec<_> = sima.ids().map(VersionId::as_str).collect();
        assert_eq!(ids, vec!["3.5.0", "4.0.0-rc"]);
    }

    #[test]
    fn reads_attributes_verbatim_and_defaults_missing_ones_to_empty() {
        let registry = Registry::from_xml_str(SAMPLE).expect("parse sample");
        let sima = registry.application("sima").unwrap();

        assert_eq!(
            sima.get("3.5.0").unwrap(),
            &VersionRecord {
                version: VersionId::new("3.5.0"),
                exe_path: r"C:\programs\sima_35_00\Sima.exe".into(),
                install_dir: r"C:\programs\sima_35_00".into(),
                platform: "x64".into(),
                product_type: "Full".into(),
                category: "Marine".into(),
                is_default: true,
            }
        );

        let rc = sima.get("4.0.0-RC").unwrap();
        assert_eq!(rc.install_dir, "");
        assert_eq!(rc.platform, "");
        assert!(!rc.is_default);
    }

    #[test]
    fn is_default_is_case_insensitive_and_strict() {
        let xml = r#"<Applications>
  <Application Name="a">
    <Version VersionNumber="1.0.0" IsDefault="TRUE" />
    <Version VersionNumber="1.0.1" IsDefault="yes" />
    <Version VersionNumber="1.0.2" IsDefault="1" />
    <Version VersionNumber="1.0.3" />
  </Application>
</Applications>"#;
        let registry = Registry::from_xml_str(xml).unwrap();
        let flags: Vec<_> = registry
            .application("a")
            .unwrap()
            .records()
            .map(|record| record.is_default)
            .collect();
        assert_eq!(flags, vec![true, false, false, false]);
    }

    #[test]
    fn malformed_markup_is_a_parse_error() {
        assert!(Registry::from_xml_str("<Applications><Application Name=\"a\">").is_err());
        let err = Registry::from_xml_bytes(b"<Applications><Application Name=\"a\">").unwrap_err();
        assert!(matches!(err, DocumentError::Xml(_)));
    }

    #[test]
    fn utf16_bytes_parse_like_utf8() {
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend(
            SAMPLE
                .replace("utf-8", "utf-16")
                .encode_utf16()
                .flat_map(u16::to_le_bytes),
        );
        let registry = Registry::from_xml_bytes(&bytes).expect("parse utf-16 sample");
        assert_eq!(registry, Registry::from_xml_str(SAMPLE).unwrap());
    }
}
