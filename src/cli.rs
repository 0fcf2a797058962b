// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument parsing using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use certq::catalog::Level;
use certq::config::ConfigOutputFormat;
use certq::filter::PriceType;
use certq::goals::GoalTag;

/// certq - Security certification catalog search
///
/// Filters a certification catalog with `key:value` queries such as
/// `provider:giac level:expert price:<=1000` and prints the matches
/// sorted by level, year and name.
#[derive(Parser, Debug)]
#[command(name = "certq")]
#[command(
    author,
    version,
    about,
    long_about = None,
    override_usage = "certq [OPTIONS] <COMMAND>",
    after_help = "Search quickstart:\n  certq s \"provider:giac incident\"\n  certq search \"price:300..1200 rolegroup:\\\"Blue Team Ops\\\"\"\n  certq search --goal red --priced-only -m 20\n\nKeys:\n  provider domain code subarea track role rolegroup tag level status ai year price"
)]
pub struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Compact JSON output (no pretty formatting)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Catalog directory or file (overrides CERTQ_CATALOG and config)
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<ConfigOutputFormat> for OutputFormat {
    fn from(format: ConfigOutputFormat) -> Self {
        match format {
            ConfigOutputFormat::Text => OutputFormat::Text,
            ConfigOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Certification level filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliLevel {
    Foundational,
    Intermediate,
    Advanced,
    Expert,
}

impl From<CliLevel> for Level {
    fn from(level: CliLevel) -> Self {
        match level {
            CliLevel::Foundational => Level::Foundational,
            CliLevel::Intermediate => Level::Intermediate,
            CliLevel::Advanced => Level::Advanced,
            CliLevel::Expert => Level::Expert,
        }
    }
}

/// Price-type filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliPriceType {
    /// Price above zero
    Paid,
    /// Label says free
    Free,
    /// No price and not free
    Unknown,
    /// Paid or free
    Concrete,
}

impl From<CliPriceType> for PriceType {
    fn from(price: CliPriceType) -> Self {
        match price {
            CliPriceType::Paid => PriceType::Paid,
            CliPriceType::Free => PriceType::Free,
            CliPriceType::Unknown => PriceType::Unknown,
            CliPriceType::Concrete => PriceType::Concrete,
        }
    }
}

/// Career goal filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliGoal {
    Blue,
    Red,
    Grc,
    Cloud,
}

impl From<CliGoal> for GoalTag {
    fn from(goal: CliGoal) -> Self {
        match goal {
            CliGoal::Blue => GoalTag::Blue,
            CliGoal::Red => GoalTag::Red,
            CliGoal::Grc => GoalTag::Grc,
            CliGoal::Cloud => GoalTag::Cloud,
        }
    }
}

/// Grouping used by `groups`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum GroupBy {
    /// Domain, then sub-area
    #[default]
    Domain,
    /// Career goal tag
    Goal,
}

/// Independent filters shared by `search` and `groups`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Exact domain name (case-insensitive)
    #[arg(long, help_heading = "Filters")]
    pub domain: Option<String>,

    /// Exact level
    #[arg(long, value_enum, help_heading = "Filters")]
    pub level: Option<CliLevel>,

    /// Exact provider name (case-insensitive)
    #[arg(long, help_heading = "Filters")]
    pub provider: Option<String>,

    /// Role group the certification must list (case-insensitive)
    #[arg(long = "role-group", help_heading = "Filters")]
    pub role_group: Option<String>,

    /// Price type
    #[arg(long = "price", value_enum, help_heading = "Filters")]
    pub price: Option<CliPriceType>,

    /// Minimum price in USD (excludes free and unknown prices)
    #[arg(long = "min-price", value_parser = parse_price_bound, help_heading = "Filters")]
    pub min_price: Option<f64>,

    /// Maximum price in USD (excludes free and unknown prices)
    #[arg(long = "max-price", value_parser = parse_price_bound, help_heading = "Filters")]
    pub max_price: Option<f64>,

    /// Only AI-focused certifications
    #[arg(long = "ai-only", help_heading = "Filters")]
    pub ai_only: bool,

    /// Only certifications with a price above zero
    #[arg(long = "priced-only", help_heading = "Filters")]
    pub priced_only: bool,

    /// Career goal
    #[arg(long, value_enum, help_heading = "Filters")]
    pub goal: Option<CliGoal>,
}

fn parse_price_bound(value: &str) -> Result<f64, String> {
    let bound: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if bound.is_finite() {
        Ok(bound)
    } else {
        Err(format!("'{value}' is not a finite price"))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter and sort the catalog
    #[command(
        visible_aliases = ["s", "find"],
        after_help = "Examples:\n  certq s \"provider:giac level:expert\"\n  certq search \"cloud year:>=2020\" --price concrete\n  certq search --role-group \"Red Team Ops\" --max-price 1500"
    )]
    Search {
        /// Query: `key:value` predicates and free terms (empty matches all)
        query: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Maximum number of results (0 = no cap)
        #[arg(
            short = 'm',
            long = "limit",
            visible_alias = "max-results",
            help_heading = "Core"
        )]
        limit: Option<usize>,
    },

    /// Show how a query is tokenized and parsed
    #[command(visible_aliases = ["p"])]
    Parse {
        /// Query to parse
        query: String,
    },

    /// Group the filtered catalog by domain or goal
    #[command(visible_aliases = ["g"])]
    Groups {
        /// Query: `key:value` predicates and free terms (empty matches all)
        query: Option<String>,

        /// Grouping to apply
        #[arg(long, value_enum, default_value = "domain")]
        by: GroupBy,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Check catalog files against the schema and vocabularies
    Validate,

    /// Summarize the catalog: domains, sub-areas, goals and price classes
    #[command(visible_aliases = ["index"])]
    Summary,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
