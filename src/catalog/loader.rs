// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog loading from a record directory or a single bundle file.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::normalize::{parse_iso_date, RawRecord, RawValue};
use super::CatalogMeta;
use crate::errors::CatalogError;

/// Sub-directory that holds one YAML document per record.
pub const RECORDS_DIR: &str = "certifications";
/// Optional metadata document next to the record directory.
pub const INDEX_FILE: &str = "index.yaml";

/// A raw record together with the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub source: PathBuf,
    /// True when the source file holds only this record, so its stem names it.
    pub per_record_file: bool,
    pub raw: RawRecord,
}

/// Catalog contents before normalization.
#[derive(Debug, Clone, Default)]
pub struct RawCatalog {
    pub meta: CatalogMeta,
    pub entries: Vec<RawEntry>,
    /// Files that could not be parsed, with the parser message.
    pub problems: Vec<(PathBuf, String)>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMeta {
    catalog: Option<RawValue>,
    version: Option<RawValue>,
    last_reviewed: Option<RawValue>,
}

impl RawMeta {
    fn into_meta(self) -> CatalogMeta {
        let text = |v: Option<RawValue>| v.map(|v| v.as_text()).filter(|s| !s.is_empty());
        CatalogMeta {
            catalog: text(self.catalog),
            version: text(self.version),
            last_reviewed: self
                .last_reviewed
                .and_then(|v| parse_iso_date(&v.as_text())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawBundle {
    #[serde(flatten)]
    meta: RawMeta,
    certifications: Vec<RawRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    List(Vec<RawRecord>),
    Bundle(RawBundle),
    Single(RawRecord),
}

#[derive(Clone, Copy)]
enum DocFormat {
    Yaml,
    Json,
}

fn doc_format(path: &Path) -> Option<DocFormat> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("yaml") | Some("yml") => Some(DocFormat::Yaml),
        Some("json") => Some(DocFormat::Json),
        _ => None,
    }
}

fn parse_doc<T: DeserializeOwned>(
    path: &Path,
    format: DocFormat,
) -> Result<T, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = match format {
        DocFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        DocFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| CatalogError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Read a catalog without normalizing it.
///
/// `path` may be a directory of per-record YAML files (directly or under
/// `certifications/`) or a single YAML/JSON document.
pub fn load_raw(path: &Path) -> Result<RawCatalog, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound {
            path: path.to_path_buf(),
        });
    }
    if path.is_dir() {
        load_dir(path)
    } else {
        load_file(path)
    }
}

fn load_file(path: &Path) -> Result<RawCatalog, CatalogError> {
    let format = doc_format(path).ok_or_else(|| CatalogError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let doc: RawDocument = parse_doc(path, format)?;
    let (meta, records, per_record_file) = match doc {
        RawDocument::List(records) => (CatalogMeta::default(), records, false),
        RawDocument::Bundle(bundle) => (bundle.meta.into_meta(), bundle.certifications, false),
        RawDocument::Single(record) => (CatalogMeta::default(), vec![record], true),
    };
    debug!(path = %path.display(), records = records.len(), "loaded catalog file");
    Ok(RawCatalog {
        meta,
        entries: records
            .into_iter()
            .map(|raw| RawEntry {
                source: path.to_path_buf(),
                per_record_file,
                raw,
            })
            .collect(),
        problems: Vec::new(),
    })
}

fn load_dir(dir: &Path) -> Result<RawCatalog, CatalogError> {
    let nested = dir.join(RECORDS_DIR);
    let records_dir = if nested.is_dir() { nested } else { dir.to_path_buf() };

    let index_path = dir.join(INDEX_FILE);
    let meta = if index_path.is_file() {
        match parse_doc::<RawMeta>(&index_path, DocFormat::Yaml) {
            Ok(meta) => meta.into_meta(),
            Err(err) => {
                warn!("{err}");
                CatalogMeta::default()
            }
        }
    } else {
        CatalogMeta::default()
    };

    let mut catalog = RawCatalog {
        meta,
        ..RawCatalog::default()
    };

    let walker = WalkDir::new(&records_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable catalog entry: {err}");
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || path == index_path {
            continue;
        }
        if !matches!(doc_format(path), Some(DocFormat::Yaml)) {
            continue;
        }
        match parse_doc::<RawRecord>(path, DocFormat::Yaml) {
            Ok(raw) => catalog.entries.push(RawEntry {
                source: path.to_path_buf(),
                per_record_file: true,
                raw,
            }),
            Err(err) => {
                warn!("skipping record: {err}");
                let message = match err {
                    CatalogError::Parse { message, .. } => message,
                    other => other.to_string(),
                };
                catalog.problems.push((path.to_path_buf(), message));
            }
        }
    }

    debug!(
        dir = %records_dir.display(),
        records = catalog.entries.len(),
        skipped = catalog.problems.len(),
        "loaded catalog directory"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, content).expect("write file");
    }

    #[test]
    fn missing_path_is_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let err = load_raw(&dir.path().join("absent")).expect_err("missing");
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[test]
    fn directory_with_nested_records_and_index() {
        let dir = TempDir::new().expect("tempdir");
        write(
            &dir.path().join("index.yaml"),
            "catalog: Test Catalog\nversion: '2026.03'\nlast_reviewed: 2026-03-01\ncertifications: [a.yaml]\n",
        );
        write(
            &dir.path().join("certifications/b.yaml"),
            "id: b\nname: Bravo\n",
        );
        write(
            &dir.path().join("certifications/a.yaml"),
            "id: a\nname: Alpha\ntags: single\n",
        );
        write(&dir.path().join("certifications/notes.txt"), "ignored");

        let catalog = load_raw(dir.path()).expect("load");
        assert_eq!(catalog.meta.catalog.as_deref(), Some("Test Catalog"));
        assert_eq!(catalog.meta.version.as_deref(), Some("2026.03"));
        assert!(catalog.meta.last_reviewed.is_some());
        let ids: Vec<String> = catalog
            .entries
            .iter()
            .map(|e| e.raw.id.as_ref().map(RawValue::as_text).unwrap_or_default())
            .collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(catalog.entries.iter().all(|e| e.per_record_file));
    }

    #[test]
    fn broken_record_is_reported_not_fatal() {
        let dir = TempDir::new().expect("tempdir");
        write(&dir.path().join("good.yaml"), "id: good\nname: Good\n");
        write(&dir.path().join("bad.yaml"), "id: [unclosed\n");

        let catalog = load_raw(dir.path()).expect("load");
        assert_eq!(catalog.entries.len(), 1);
        assert_eq!(catalog.problems.len(), 1);
        assert!(catalog.problems[0].0.ends_with("bad.yaml"));
    }

    #[test]
    fn json_list_and_bundle_files() {
        let dir = TempDir::new().expect("tempdir");
        let list = dir.path().join("list.json");
        write(&list, r#"[{"id":"x","name":"X"},{"id":"y","name":"Y"}]"#);
        assert_eq!(load_raw(&list).expect("list").entries.len(), 2);

        let bundle = dir.path().join("bundle.json");
        write(
            &bundle,
            r#"{"catalog":"Bundle","last_reviewed":"2026-01-02","certifications":[{"id":"z"}]}"#,
        );
        let catalog = load_raw(&bundle).expect("bundle");
        assert_eq!(catalog.entries.len(), 1);
        assert_eq!(catalog.meta.catalog.as_deref(), Some("Bundle"));
        assert!(!catalog.entries[0].per_record_file);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("catalog.csv");
        write(&path, "id,name\n");
        assert!(matches!(
            load_raw(&path),
            Err(CatalogError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn empty_directory_loads_empty_catalog() {
        let dir = TempDir::new().expect("tempdir");
        let catalog = load_raw(dir.path()).expect("load");
        assert!(catalog.entries.is_empty());
        assert!(catalog.problems.is_empty());
    }
}
