// SPDX-License-Identifier: MIT OR Apache-2.0

//! certq - Security certification catalog query library
//!
//! Loads a certification catalog, parses `key:value` queries and returns
//! filtered, deterministically sorted results.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod filter;
pub mod goals;
pub mod groups;
pub mod output;
pub mod query;
pub mod summary;
pub mod validate;
pub mod vocab;
