// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The records a query passes through, from raw index entries to results.
//!
//! Three layers:
//!
//! | Layer    | Types                                        | Lifetime          |
//! |----------|----------------------------------------------|-------------------|
//! | On disk  | `WordEntry`, `WordStats`, `DocumentRecord`   | decoded per read  |
//! | Per term | `Term`, `MatchStat`, `ScoredDoc`             | one query         |
//! | Results  | `AggregateDocument`, `Contribution`          | handed to caller  |
//!
//! # Invariants
//!
//! - **AggregateDocument**: exactly one per distinct URL, and `rank` equals the
//!   sum of every per-term, per-document rank merged into it.
//! - **MatchStat**: `full` holds iff the matched word and the term have the
//!   same length. Since the term is a prefix of the word, that means equality.

use serde::Serialize;

/// Weight of a match where the stored word equals the query term.
pub const FULL_MATCH_WEIGHT: u32 = 2;

/// Weight of a match where the query term is a proper prefix of the stored word.
pub const PREFIX_MATCH_WEIGHT: u32 = 1;

// =============================================================================
// QUERY TERMS
// =============================================================================

/// How a query term constrains the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TermRole {
    /// Contributes to ranking only.
    Plain,
    /// `+term`: every result must carry a contribution from this term.
    Required,
    /// `-term`: no result may carry a contribution from this term.
    Forbidden,
}

/// A single parsed query token, already lower-cased and stripped of its prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    pub text: String,
    pub role: TermRole,
}

impl Term {
    pub fn new(text: impl Into<String>, role: TermRole) -> Self {
        Self {
            text: text.into(),
            role,
        }
    }
}

// =============================================================================
// ON-DISK RECORDS
// =============================================================================

/// One link of a bucket chain: a stored word and where its statistics live.
///
/// Words are raw bytes. The index builder writes whatever 8-bit text it saw,
/// so matching happens byte-wise and conversion to text is lossy and late.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: Vec<u8>,
    pub stats_offset: u32,
}

impl WordEntry {
    /// The word as display text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.word).into_owned()
    }
}

/// A decoded (document offset, packed frequency) pair from a WordStats block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocPosting {
    /// Absolute offset of the document's name/URL record.
    pub doc_offset: u32,
    /// Raw occurrence count (packed value shifted right by one).
    pub freq: u32,
    /// Low bit of the packed value.
    pub high_priority: bool,
}

impl DocPosting {
    /// Split a packed frequency into count and priority flag.
    #[inline]
    pub fn from_packed(doc_offset: u32, packed: u32) -> Self {
        Self {
            doc_offset,
            freq: packed >> 1,
            high_priority: packed & 1 == 1,
        }
    }

    /// Inverse of `from_packed`, used by the fixture writer.
    #[inline]
    pub fn packed(&self) -> u32 {
        (self.freq << 1) | u32::from(self.high_priority)
    }
}

/// All documents a stored word occurs in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordStats {
    pub postings: Vec<DocPosting>,
}

/// A document's display name and URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    pub name: String,
    pub url: String,
}

// =============================================================================
// PER-TERM MATCHES
// =============================================================================

/// One document reached through a matched word, with its rank for that word.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDoc {
    pub posting: DocPosting,
    pub rank: f64,
    pub document: DocumentRecord,
}

/// A (query term, stored word) pair that matched, plus the documents it reaches.
///
/// Produced empty by the matcher; the scorer fills `docs`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchStat {
    /// The query term, lower-cased.
    pub term: String,
    /// The stored word the term is a prefix of.
    pub matched: String,
    /// Where the word's statistics block starts.
    pub stats_offset: u32,
    /// Word and term are identical.
    pub full: bool,
    pub docs: Vec<ScoredDoc>,
}

impl MatchStat {
    /// Ranking weight: exact matches count double.
    #[inline]
    pub fn weight(&self) -> u32 {
        if self.full {
            FULL_MATCH_WEIGHT
        } else {
            PREFIX_MATCH_WEIGHT
        }
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// Which term reached a document, through which word, how often.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
    pub term: String,
    #[serde(rename = "matchedWord")]
    pub matched: String,
    #[serde(rename = "frequency")]
    pub freq: u32,
}

impl Contribution {
    /// The part of the matched word after the query term.
    ///
    /// Used to render a match as **term**rest.
    pub fn remainder(&self) -> &str {
        self.matched.get(self.term.len()..).unwrap_or("")
    }
}

/// A search result: one document, its total rank, and every contribution to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateDocument {
    pub url: String,
    pub name: String,
    pub rank: f64,
    pub contributions: Vec<Contribution>,
}

impl AggregateDocument {
    /// True if any contribution came from `term`.
    pub fn has_term(&self, term: &str) -> bool {
        self.contributions.iter().any(|c| c.term == term)
    }
}
