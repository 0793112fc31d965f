// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Required and forbidden term constraints.
//!
//! Constraints compare query terms, not stored words. A document reached by
//! the term `render` through the word `rendering` carries a `render`
//! contribution only; `-rendering` does not exclude it unless `rendering` was
//! itself a query term that reached the document.

use crate::types::AggregateDocument;

/// Does `doc` satisfy the constraints?
///
/// Kept iff every required term contributed and no forbidden term did. Empty
/// lists constrain nothing.
pub fn keeps(doc: &AggregateDocument, required: &[String], forbidden: &[String]) -> bool {
    required.iter().all(|term| doc.has_term(term))
        && !forbidden.iter().any(|term| doc.has_term(term))
}

/// Drop documents violating the constraints, preserving order.
pub fn filter(
    docs: Vec<AggregateDocument>,
    required: &[String],
    forbidden: &[String],
) -> Vec<AggregateDocument> {
    if required.is_empty() && forbidden.is_empty() {
        return docs;
    }
    docs.into_iter()
        .filter(|doc| keeps(doc, required, forbidden))
        .collect()
}
