// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind a term's ranks.
//!
//! All words matched by one query term share a normalizer. It is built from
//! three totals over every (word, document) posting the term reached:
//!
//! ```text
//! high_docs = number of high-priority postings
//! freq_high = Σ freq × weight   over high-priority postings
//! freq_low  = Σ freq × weight   over low-priority postings
//!
//! normalizer = (high_docs + 1) × freq_low + freq_high
//! ```
//!
//! and each posting's rank is
//!
//! ```text
//! high priority:  (freq × weight + freq_low) / normalizer
//! low priority:   (freq × weight) / normalizer
//! ```
//!
//! where weight is 2 for an exact word match and 1 for a prefix match. Each
//! high-priority posting gets a bonus of `freq_low`, which is why the
//! normalizer counts `freq_low` once more per high-priority posting: the
//! ranks of one term always sum to exactly 1.
//!
//! The normalizer depends on every posting, so scoring is two passes: fold
//! the totals, then rank. `TermTotals` is the result of the first pass and is
//! never mutated afterwards.
//!
//! A zero normalizer (no posting has any frequency) gives every posting rank
//! zero instead of dividing by zero.

use std::io::{Read, Seek};

use crate::binary::IndexReader;
use crate::error::Result;
use crate::types::{DocPosting, MatchStat, ScoredDoc, WordStats};

/// First-pass totals for one query term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermTotals {
    pub high_priority_docs: u64,
    pub weighted_freq_high: u64,
    pub weighted_freq_low: u64,
}

impl TermTotals {
    /// Fold one posting into the totals.
    #[inline]
    pub fn accumulate(self, posting: &DocPosting, weight: u32) -> Self {
        let weighted = u64::from(posting.freq) * u64::from(weight);
        if posting.high_priority {
            Self {
                high_priority_docs: self.high_priority_docs.saturating_add(1),
                weighted_freq_high: self.weighted_freq_high.saturating_add(weighted),
                ..self
            }
        } else {
            Self {
                weighted_freq_low: self.weighted_freq_low.saturating_add(weighted),
                ..self
            }
        }
    }

    /// Totals over (posting, weight) pairs.
    pub fn from_postings<'a, I>(postings: I) -> Self
    where
        I: IntoIterator<Item = (&'a DocPosting, u32)>,
    {
        postings
            .into_iter()
            .fold(Self::default(), |totals, (posting, weight)| {
                totals.accumulate(posting, weight)
            })
    }

    /// `(high_docs + 1) × freq_low + freq_high`, widened so it cannot overflow.
    pub fn normalizer(&self) -> u128 {
        (u128::from(self.high_priority_docs) + 1) * u128::from(self.weighted_freq_low)
            + u128::from(self.weighted_freq_high)
    }

    /// Rank of one posting reached through a word of the given weight.
    pub fn rank(&self, posting: &DocPosting, weight: u32) -> f64 {
        let normalizer = self.normalizer();
        if normalizer == 0 {
            return 0.0;
        }

        let own = u128::from(posting.freq) * u128::from(weight);
        let numerator = if posting.high_priority {
            own + u128::from(self.weighted_freq_low)
        } else {
            own
        };
        numerator as f64 / normalizer as f64
    }
}

/// Score all matches of one query term.
///
/// Loads each matched word's statistics, computes the shared totals, ranks
/// every posting, and only then resolves document names and URLs.
pub fn score<R: Read + Seek>(
    reader: &mut IndexReader<R>,
    matches: Vec<MatchStat>,
) -> Result<Vec<MatchStat>> {
    let mut stats: Vec<WordStats> = Vec::with_capacity(matches.len());
    for stat in &matches {
        stats.push(reader.word_stats(stat.stats_offset)?);
    }

    let totals = TermTotals::from_postings(
        matches
            .iter()
            .zip(&stats)
            .flat_map(|(stat, word)| word.postings.iter().map(move |p| (p, stat.weight()))),
    );

    let ranked: Vec<Vec<(DocPosting, f64)>> = matches
        .iter()
        .zip(&stats)
        .map(|(stat, word)| {
            let weight = stat.weight();
            word.postings
                .iter()
                .map(|p| (*p, totals.rank(p, weight)))
                .collect()
        })
        .collect();

    let mut scored = Vec::with_capacity(matches.len());
    for (mut stat, postings) in matches.into_iter().zip(ranked) {
        stat.docs = Vec::with_capacity(postings.len());
        for (posting, rank) in postings {
            let document = reader.document(posting.doc_offset)?;
            stat.docs.push(ScoredDoc {
                posting,
                rank,
                document,
            });
        }
        scored.push(stat);
    }
    Ok(scored)
}
