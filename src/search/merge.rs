// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Merging per-term matches into one result per document.
//!
//! A document can be reached many ways: several words of one term, several
//! terms. It must still appear once. `ResultMerger` keys on URL and nothing
//! else, so two postings with different document offsets but the same URL
//! land in the same result.
//!
//! **Invariant**: one `AggregateDocument` per distinct URL, with `rank` the
//! sum of every rank merged into it.
//!
//! Results keep first-seen order and contributions keep arrival order. Neither
//! affects ranking; they fix how matches are listed.

use std::collections::HashMap;

use crate::types::{AggregateDocument, Contribution, MatchStat, ScoredDoc};

/// What a merge did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// First time this URL was seen; a new result was created.
    Inserted,
    /// The URL already had a result; its rank and contributions grew.
    Updated,
}

/// Insert-or-update container of results keyed by URL.
///
/// # Example
///
/// ```ignore
/// let mut merger = ResultMerger::new();
/// for stat in &scored_matches {
///     merger.merge_stat(stat);
/// }
/// let docs = merger.into_documents();
/// ```
#[derive(Debug, Default)]
pub struct ResultMerger {
    /// Results in first-seen order.
    docs: Vec<AggregateDocument>,
    /// URL to position in `docs`.
    by_url: HashMap<String, usize>,
}

impl ResultMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one document reached by `term` through `matched`.
    pub fn merge(&mut self, term: &str, matched: &str, scored: &ScoredDoc) -> MergeOutcome {
        let contribution = Contribution {
            term: term.to_string(),
            matched: matched.to_string(),
            freq: scored.posting.freq,
        };

        match self.by_url.get(&scored.document.url) {
            Some(&at) => {
                let doc = &mut self.docs[at];
                doc.rank += scored.rank;
                doc.contributions.push(contribution);
                MergeOutcome::Updated
            }
            None => {
                self.by_url
                    .insert(scored.document.url.clone(), self.docs.len());
                self.docs.push(AggregateDocument {
                    url: scored.document.url.clone(),
                    name: scored.document.name.clone(),
                    rank: scored.rank,
                    contributions: vec![contribution],
                });
                MergeOutcome::Inserted
            }
        }
    }

    /// Merge every document of one scored match.
    pub fn merge_stat(&mut self, stat: &MatchStat) {
        for scored in &stat.docs {
            self.merge(&stat.term, &stat.matched, scored);
        }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn get(&self, url: &str) -> Option<&AggregateDocument> {
        self.by_url.get(url).map(|&at| &self.docs[at])
    }

    /// Results in first-seen order.
    pub fn into_documents(self) -> Vec<AggregateDocument> {
        self.docs
    }
}

/// Merge all scored matches of a query.
pub fn aggregate(matches: &[MatchStat]) -> Vec<AggregateDocument> {
    let mut merger = ResultMerger::new();
    for stat in matches {
        merger.merge_stat(stat);
    }
    merger.into_documents()
}
