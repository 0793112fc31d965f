// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the doxsearch command-line interface.
//!
//! Two subcommands: `search` to query a Doxygen `search.idx`, and `inspect`
//! to check one before serving it. Both find the index the same way: the
//! `--index` flag, then `DOXSEARCH_INDEX`, then `search/search.idx` relative
//! to the working directory, where Doxygen's HTML output puts it.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Index location when neither the flag nor the environment names one.
pub const DEFAULT_INDEX_PATH: &str = "search/search.idx";

/// Environment variable consulted before the default path.
pub const INDEX_ENV_VAR: &str = "DOXSEARCH_INDEX";

#[derive(Parser)]
#[command(
    name = "doxsearch",
    about = "Query Doxygen's packed search index from the command line",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the index and print ranked documents
    Search {
        /// Search query; prefix a term with + to require it, - to forbid it
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Path to search.idx (overrides DOXSEARCH_INDEX)
        #[arg(short, long)]
        index: Option<PathBuf>,

        /// Maximum number of results to print (0 = all)
        #[arg(short, long, default_value = "0")]
        limit: usize,

        /// Print results as JSON instead of a report
        #[arg(long)]
        json: bool,

        /// Print per-term match diagnostics to stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate an index and summarize its structure
    Inspect {
        /// Path to search.idx (overrides DOXSEARCH_INDEX)
        #[arg(short, long)]
        index: Option<PathBuf>,
    },
}

/// Pick the index path: flag, then environment, then default.
pub fn resolve_index_path(flag: Option<PathBuf>) -> PathBuf {
    resolve_with(flag, std::env::var_os(INDEX_ENV_VAR).map(PathBuf::from))
}

fn resolve_with(flag: Option<PathBuf>, env: Option<PathBuf>) -> PathBuf {
    flag.or(env.filter(|p| !p.as_os_str().is_empty()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INDEX_PATH))
}

/// Apply `--limit`; zero means no limit.
pub fn apply_limit<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    if limit > 0 {
        items.truncate(limit);
    }
    items
}
