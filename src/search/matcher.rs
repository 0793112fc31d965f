// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Term matching: from a query term to the stored words it is a prefix of.
//!
//! The two-byte bucket hash is what makes prefix search possible without a
//! tree. Every word sharing the term's first two bytes lives in one chain, so
//! a prefix match can only be in that chain. We walk it and keep the words
//! that start with the term.
//!
//! Terms shorter than two bytes never hash. They match nothing, silently.

use std::io::{Read, Seek};

use crate::binary::{bucket_index, IndexReader};
use crate::error::Result;
use crate::types::{MatchStat, WordEntry};
use crate::utils::is_prefix_of;

/// Find every stored word the (already lower-cased) term is a prefix of.
///
/// Returned stats have empty `docs`; scoring fills them in.
pub fn match_term<R: Read + Seek>(
    reader: &mut IndexReader<R>,
    term: &str,
) -> Result<Vec<MatchStat>> {
    let Some(bucket) = bucket_index(term.as_bytes()) else {
        return Ok(Vec::new());
    };

    let chain_offset = reader.bucket_offset(bucket)?;
    if chain_offset == 0 {
        return Ok(Vec::new());
    }

    let chain = reader.word_chain(chain_offset)?;
    Ok(select_matches(term, &chain))
}

/// Filter a bucket chain down to the words `term` is a prefix of.
///
/// Chain order is preserved.
pub fn select_matches(term: &str, chain: &[WordEntry]) -> Vec<MatchStat> {
    let needle = term.as_bytes();
    chain
        .iter()
        .filter(|entry| is_prefix_of(needle, &entry.word))
        .map(|entry| MatchStat {
            term: term.to_string(),
            matched: entry.text(),
            stats_offset: entry.stats_offset,
            full: entry.word.len() == needle.len(),
            docs: Vec::new(),
        })
        .collect()
}
