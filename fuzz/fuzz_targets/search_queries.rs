// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query handling.
//!
//! Throws arbitrary strings at a well-formed index. Stray `+` and `-`, null
//! bytes, emoji and characters whose lowercase form is longer than the
//! original must all produce ranked, unique, correctly filtered results.

#![no_main]

use std::collections::HashSet;
use std::sync::OnceLock;

use doxsearch::testing::IndexBuilder;
use doxsearch::{compare_results, parse_query, Searcher};
use libfuzzer_sys::fuzz_target;

fn index() -> &'static [u8] {
    static INDEX: OnceLock<Vec<u8>> = OnceLock::new();
    INDEX.get_or_init(|| {
        let mut b = IndexBuilder::new();
        let image = b.add_document("Image", "classImage.html");
        let canvas = b.add_document("Canvas", "classCanvas.html");
        let alias = b.add_document("Image (alias)", "classImage.html");
        let cafe = b.add_document("Café", "cafe.html");
        b.add_word("image", &[(image, 9, true), (canvas, 2, false)]);
        b.add_word("imageio", &[(alias, 6, true), (image, 1, false)]);
        b.add_word("canvas", &[(canvas, 7, true), (image, 0, false)]);
        b.add_word("café", &[(cafe, 3, false)]);
        b.add_word("+-", &[(canvas, 1, false)]);
        b.build()
    })
}

fuzz_target!(|query: &[u8]| {
    let query = String::from_utf8_lossy(query);
    let query: String = query.chars().take(200).collect();

    // INVARIANT 1: searching a valid index never fails
    let mut searcher = Searcher::from_bytes(index()).expect("fixture is valid");
    let results = searcher.search(&query).expect("fixture is well-formed");

    // INVARIANT 2: ranked, best first
    for pair in results.windows(2) {
        assert!(compare_results(&pair[0], &pair[1]).is_le(), "results not ranked");
    }

    // INVARIANT 3: one result per URL
    let mut seen = HashSet::new();
    for doc in &results {
        assert!(seen.insert(doc.url.as_str()), "duplicate URL {}", doc.url);
    }

    // INVARIANT 4: constraints hold
    let parsed = parse_query(&query);
    for doc in &results {
        assert!(parsed.required.iter().all(|t| doc.has_term(t)));
        assert!(!parsed.forbidden.iter().any(|t| doc.has_term(t)));
    }

    // INVARIANT 5: no terms, no results
    if parsed.is_empty() {
        assert!(results.is_empty());
    }
});
