// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query evaluation: where the pieces meet.
//!
//! ```text
//! parse_query ─▶ match_term ─▶ score ─▶ aggregate ─▶ filter ─▶ rank
//!   (query)      (matcher)    (scoring)  (merge)     (filter)  (ranking)
//!                └──── once per distinct term ────┘
//! ```
//!
//! Matching and scoring touch the index; everything after is pure. That
//! split is what `rank_matches` exposes: given the same scored matches it
//! always returns the same ordered results.
//!
//! A `Searcher` owns its reader. Open one per query and drop it afterwards;
//! the file handle and the document cache go with it.

pub mod filter;
pub mod matcher;
pub mod merge;

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use crate::binary::IndexReader;
use crate::error::Result;
use crate::query::{parse_query, ParsedQuery};
use crate::scoring::{self, ranking};
use crate::types::{AggregateDocument, MatchStat};

pub use filter::{filter, keeps};
pub use matcher::{match_term, select_matches};
pub use merge::{aggregate, MergeOutcome, ResultMerger};

/// Everything a query produced, for callers that want more than the ranking.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub query: ParsedQuery,
    /// Scored matches of every looked-up term, in term order.
    pub matches: Vec<MatchStat>,
    /// Filtered results, best first.
    pub results: Vec<AggregateDocument>,
}

/// Evaluates queries against one open index.
#[derive(Debug)]
pub struct Searcher<R> {
    reader: IndexReader<R>,
}

impl Searcher<BufReader<File>> {
    /// Open an index file, validating its header.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(IndexReader::open(path)?))
    }
}

impl<'a> Searcher<Cursor<&'a [u8]>> {
    /// Search an index held in memory.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        Ok(Self::new(IndexReader::from_bytes(bytes)?))
    }
}

impl<R: Read + Seek> Searcher<R> {
    pub fn new(reader: IndexReader<R>) -> Self {
        Self { reader }
    }

    pub fn reader(&mut self) -> &mut IndexReader<R> {
        &mut self.reader
    }

    pub fn into_reader(self) -> IndexReader<R> {
        self.reader
    }

    /// Ranked results for a raw query string.
    ///
    /// An empty query returns no results. Decode errors abort the whole query.
    pub fn search(&mut self, raw: &str) -> Result<Vec<AggregateDocument>> {
        Ok(self.search_report(raw)?.results)
    }

    /// Like `search`, keeping the parsed query and per-term matches.
    pub fn search_report(&mut self, raw: &str) -> Result<SearchReport> {
        let query = parse_query(raw);
        let mut matches = Vec::new();
        for term in &query.terms {
            matches.extend(self.match_and_score(&term.text)?);
        }
        let results = rank_matches(&matches, &query.required, &query.forbidden);
        Ok(SearchReport {
            query,
            matches,
            results,
        })
    }

    /// Match one lower-cased term and score its matches together.
    pub fn match_and_score(&mut self, term: &str) -> Result<Vec<MatchStat>> {
        let matches = match_term(&mut self.reader, term)?;
        if matches.is_empty() {
            return Ok(matches);
        }
        scoring::score(&mut self.reader, matches)
    }
}

/// Aggregate, filter and rank scored matches.
///
/// Pure and deterministic: the same input always yields the same output.
pub fn rank_matches(
    matches: &[MatchStat],
    required: &[String],
    forbidden: &[String],
) -> Vec<AggregateDocument> {
    ranking::rank(filter(aggregate(matches), required, forbidden))
}

/// Open `path`, run one query, and close the file.
pub fn search_file(path: impl AsRef<Path>, raw: &str) -> Result<Vec<AggregateDocument>> {
    Searcher::open(path)?.search(raw)
}
