// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types with helpful suggestions
//!
//! Provides user-friendly error messages with actionable suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read a catalog from disk.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(
        "Catalog not found at '{}'\n\n\
         Suggestion: point certq at a catalog directory or file.\n\
         Example: certq --catalog data search \"provider:giac\"\n\
         Or set `catalog = \"data\"` in .certqrc.toml",
        .path.display()
    )]
    NotFound { path: PathBuf },

    #[error("Failed to read catalog file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Failed to parse catalog file '{}': {message}\n\n\
         Suggestion: run 'certq validate' after fixing the document.",
        .path.display()
    )]
    Parse { path: PathBuf, message: String },

    #[error(
        "Unsupported catalog format: '{}'\n\n\
         Supported: a directory of .yaml files, or a single .yaml/.yml/.json file",
        .path.display()
    )]
    UnsupportedFormat { path: PathBuf },
}

/// Helper functions for creating helpful messages
pub mod suggestions {
    /// Get suggestion for no results
    pub fn no_results_suggestion(query: &str) -> String {
        format!(
            "No certifications matched '{}'\n\n\
             Try:\n\
             - Fewer or broader terms\n\
             - Checking key names with 'certq parse \"{}\"'\n\
             - Dropping --min-price/--max-price (they exclude unknown prices)",
            query, query
        )
    }

    /// Get a formatted list of supported search keys
    pub fn supported_keys_message(keys: &[&str]) -> String {
        format!(
            "Supported keys: {}\n\n\
             Unknown keys search the whole record.\n\
             Example: certq search \"provider:giac level:expert price:<=1000\"",
            keys.join(", ")
        )
    }
}
