// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog module - record model, normalization and loading

pub mod loader;
pub mod normalize;
pub mod record;

use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

use crate::errors::CatalogError;
use crate::vocab::Vocabulary;

pub use loader::{load_raw, RawCatalog, RawEntry};
pub use normalize::{RawList, RawRecord, RawValue};
pub use record::{Level, PriceClass, PriceConfidence, Record, Status};

/// Catalog-level metadata from `index.yaml` or a bundle header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<NaiveDate>,
}

/// Normalized, read-only catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub meta: CatalogMeta,
    pub records: Vec<Record>,
}

impl Catalog {
    /// Load and normalize the catalog at `path`.
    pub fn load(path: &Path, vocab: &Vocabulary) -> Result<Self, CatalogError> {
        let raw = load_raw(path)?;
        let catalog = Self::from_raw(&raw, vocab);
        if catalog.is_empty() {
            warn!(path = %path.display(), "catalog contains no records");
        } else {
            debug!(path = %path.display(), records = catalog.len(), "catalog ready");
        }
        Ok(catalog)
    }

    pub fn from_raw(raw: &RawCatalog, vocab: &Vocabulary) -> Self {
        Self {
            meta: raw.meta.clone(),
            records: raw
                .entries
                .iter()
                .map(|entry| entry.raw.normalize(vocab))
                .collect(),
        }
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            meta: CatalogMeta::default(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
