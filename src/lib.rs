// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query engine for Doxygen's packed `search.idx` index.
//!
//! Doxygen's external search writes one binary file: a 65536-slot hash table
//! keyed on the first two bytes of each word, chains of words per slot, and
//! per-word posting lists pointing at document records. This crate answers
//! free-text queries against that file without ever loading it whole.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   query.rs   │────▶│ search/      │────▶│  scoring/    │
//! │ (parse_query,│     │  matcher.rs  │     │  core.rs     │
//! │  +req -forb) │     │ (prefix walk)│     │ (TermTotals) │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                             │                    │
//!                             ▼                    ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                binary/reader.rs                      │
//! │  (IndexReader: header, buckets, chains, stats, docs) │
//! └─────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ search/      │────▶│ search/      │────▶│ scoring/     │
//! │  merge.rs    │     │  filter.rs   │     │  ranking.rs  │
//! │ (one per URL)│     │ (+req -forb) │     │ (best first) │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use doxsearch::Searcher;
//!
//! let mut searcher = Searcher::open("search/search.idx")?;
//! for doc in searcher.search("+render -opengl")? {
//!     println!("{:.3} {} {}", doc.rank, doc.name, doc.url);
//! }
//! ```

pub mod binary;
pub mod error;
pub mod query;
pub mod scoring;
pub mod search;
pub mod testing;
pub mod types;
mod utils;

pub use binary::{bucket_index, IndexHeader, IndexReader, MAGIC};
pub use error::{Result, SearchError};
pub use query::{parse_query, ParsedQuery};
pub use scoring::ranking::compare_results;
pub use scoring::TermTotals;
pub use search::{rank_matches, search_file, SearchReport, Searcher};
pub use types::{
    AggregateDocument, Contribution, DocPosting, DocumentRecord, MatchStat, ScoredDoc, Term,
    TermRole, WordEntry, WordStats,
};
pub use utils::normalize;
