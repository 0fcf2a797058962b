// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations

pub mod groups;
pub mod parse;
pub mod search;
pub mod summary;
pub mod validate;

use anyhow::{Context as _, Result};
use std::path::PathBuf;

use crate::cli::{Cli, FilterArgs, OutputFormat};
use certq::catalog::Catalog;
use certq::config::Config;
use certq::filter::Filters;
use certq::vocab::Vocabulary;

/// Settings resolved from CLI flags, environment and config.
pub struct Context {
    pub config: Config,
    pub vocab: Vocabulary,
    pub catalog_path: PathBuf,
    pub format: OutputFormat,
    pub compact: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Self {
        let config = Config::load();
        let vocab = config.vocabulary();
        let catalog_path = config.catalog_path(cli.catalog.as_deref());
        let format = cli
            .format
            .or_else(|| config.output_format().map(OutputFormat::from))
            .unwrap_or(OutputFormat::Text);
        Self {
            config,
            vocab,
            catalog_path,
            format,
            compact: cli.compact,
        }
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        Catalog::load(&self.catalog_path, &self.vocab).with_context(|| {
            format!("Failed to load catalog from {}", self.catalog_path.display())
        })
    }
}

impl From<&FilterArgs> for Filters {
    fn from(args: &FilterArgs) -> Self {
        Filters {
            domain: args.domain.clone(),
            level: args.level.map(Into::into),
            provider: args.provider.clone(),
            role_group: args.role_group.clone(),
            price_type: args.price.map(Into::into),
            min_price: args.min_price,
            max_price: args.max_price,
            ai_only: args.ai_only,
            priced_only: args.priced_only,
            goal: args.goal.map(Into::into),
        }
    }
}
