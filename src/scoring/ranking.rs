// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how search results get sorted.
//!
//! Higher total rank first. Equal ranks fall back to URL order so the output
//! is identical across runs and platforms; URLs are unique per result, so the
//! order is total.

use crate::types::AggregateDocument;
use std::cmp::Ordering;

/// Compare two results for ranking.
///
/// Sort order:
/// 1. **Rank** - descending
/// 2. **URL** - ascending, for determinism when ranks tie
///
/// Ranks compare with `total_cmp`; scoring never produces NaN.
pub fn compare_results(a: &AggregateDocument, b: &AggregateDocument) -> Ordering {
    match b.rank.total_cmp(&a.rank) {
        Ordering::Equal => a.url.cmp(&b.url),
        ord => ord,
    }
}

/// Order results best first.
pub fn rank(mut docs: Vec<AggregateDocument>) -> Vec<AggregateDocument> {
    docs.sort_by(compare_results);
    docs
}
