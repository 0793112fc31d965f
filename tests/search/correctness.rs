//! End-to-end correctness against hand-computed indexes.

use super::common::{approx, library_bytes, render_bytes, search_bytes, urls, write_index};
use doxsearch::testing::IndexBuilder;
use doxsearch::{search_file, Searcher};

// ============================================================================
// THE RENDER INDEX
// ============================================================================

#[test]
fn test_render_matches_both_words() {
    let results = search_bytes(&render_bytes(), "render");

    assert_eq!(urls(&results), vec!["a.html", "b.html"]);
    assert!(approx(results[0].rank, 13.0 / 14.0));
    assert!(approx(results[1].rank, 1.0 / 14.0));
}

#[test]
fn test_render_contributions_carry_query_term() {
    let results = search_bytes(&render_bytes(), "render");
    let a = &results[0];

    assert_eq!(a.name, "A");
    let seen: Vec<(&str, &str, u32)> = a
        .contributions
        .iter()
        .map(|c| (c.term.as_str(), c.matched.as_str(), c.freq))
        .collect();
    assert_eq!(seen, vec![("render", "render", 4), ("render", "rendering", 2)]);
}

#[test]
fn test_exact_word_lookup_is_full_match() {
    // "rendering" alone: one full match, weight 2, both docs low priority.
    let results = search_bytes(&render_bytes(), "rendering");
    assert_eq!(urls(&results), vec!["a.html", "b.html"]);
    assert!(approx(results[0].rank, 4.0 / 6.0));
    assert!(approx(results[1].rank, 2.0 / 6.0));
    assert!(results[0].contributions.iter().all(|c| c.term == "rendering"));
}

#[test]
fn test_two_terms_sum_per_document() {
    let results = search_bytes(&render_bytes(), "render rendering");
    assert_eq!(urls(&results), vec!["a.html", "b.html"]);
    assert!(approx(results[0].rank, 13.0 / 14.0 + 4.0 / 6.0));
    assert!(approx(results[1].rank, 1.0 / 14.0 + 2.0 / 6.0));
    assert_eq!(results[0].contributions.len(), 3);
}

#[test]
fn test_query_is_case_insensitive() {
    let lower = search_bytes(&render_bytes(), "render");
    assert_eq!(search_bytes(&render_bytes(), "RENDER"), lower);
    assert_eq!(search_bytes(&render_bytes(), "ReNdEr"), lower);
}

#[test]
fn test_repeated_terms_are_looked_up_once() {
    let once = search_bytes(&render_bytes(), "render");
    assert_eq!(search_bytes(&render_bytes(), "render render"), once);
    assert_eq!(search_bytes(&render_bytes(), "render +render"), once);
}

// ============================================================================
// TERMS THAT MATCH NOTHING
// ============================================================================

#[test]
fn test_empty_query_returns_nothing() {
    assert!(search_bytes(&render_bytes(), "").is_empty());
    assert!(search_bytes(&render_bytes(), " \t ").is_empty());
    assert!(search_bytes(&render_bytes(), "+ -").is_empty());
}

#[test]
fn test_single_character_terms_are_ignored() {
    assert!(search_bytes(&render_bytes(), "r").is_empty());
    assert_eq!(
        search_bytes(&render_bytes(), "r render"),
        search_bytes(&render_bytes(), "render")
    );
}

#[test]
fn test_unknown_words() {
    assert!(search_bytes(&render_bytes(), "renderings").is_empty());
    assert!(search_bytes(&render_bytes(), "scene").is_empty());
    assert!(search_bytes(&library_bytes(), "zz").is_empty());
}

// ============================================================================
// THE LIBRARY INDEX
// ============================================================================

#[test]
fn test_library_prefix_and_full_weights() {
    // image (full, w2) + imageio (prefix, w1); normalizer (2+1)*11 + 24 = 57
    let results = search_bytes(&library_bytes(), "image");
    assert_eq!(
        urls(&results),
        vec![
            "classImage.html",
            "classImageIO.html",
            "group__filters.html",
            "classCanvas.html"
        ]
    );
    let expected = [30.0 / 57.0, 17.0 / 57.0, 6.0 / 57.0, 4.0 / 57.0];
    for (doc, want) in results.iter().zip(expected) {
        assert!(approx(doc.rank, want), "{}: {} != {}", doc.url, doc.rank, want);
    }
}

#[test]
fn test_library_short_prefix_reaches_three_words() {
    let results = search_bytes(&library_bytes(), "ima");
    assert_eq!(results.len(), 5);
    assert_eq!(results[0].url, "classImage.html");
    assert!(approx(results[0].rank, 20.0 / 45.0));
    assert!(results.iter().any(|d| d.url == "index.html"));

    let total: f64 = results.iter().map(|d| d.rank).sum();
    assert!(approx(total, 1.0));
}

#[test]
fn test_library_filter_words() {
    let results = search_bytes(&library_bytes(), "filter");
    assert_eq!(urls(&results), vec!["group__filters.html", "classCanvas.html"]);
    assert!(approx(results[0].rank, 23.0 / 24.0));
    assert!(approx(results[1].rank, 1.0 / 24.0));
}

#[test]
fn test_documents_are_keyed_by_url() {
    let mut b = IndexBuilder::new();
    let first = b.add_document("Widget", "classWidget.html");
    let second = b.add_document("Widget (members)", "classWidget.html");
    b.add_word("widget", &[(first, 3, false), (second, 1, false)]);

    let results = search_bytes(&b.build(), "widget");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Widget");
    assert!(approx(results[0].rank, 1.0));
    assert_eq!(results[0].contributions.len(), 2);
}

#[test]
fn test_non_ascii_terms_are_lowercased() {
    let mut b = IndexBuilder::new();
    let doc = b.add_document("Café", "cafe.html");
    b.add_word("café", &[(doc, 2, false)]);

    let results = search_bytes(&b.build(), "CAFÉ");
    assert_eq!(urls(&results), vec!["cafe.html"]);
    assert_eq!(results[0].contributions[0].matched, "café");
}

// ============================================================================
// FILES ON DISK
// ============================================================================

#[test]
fn test_search_file_matches_in_memory() {
    let (_dir, path) = write_index(&super::common::render_fixture());
    let from_disk = search_file(&path, "render").unwrap();
    assert_eq!(from_disk, search_bytes(&render_bytes(), "render"));
}

#[test]
fn test_searcher_reuses_one_open_file() {
    let (_dir, path) = write_index(&super::common::library_fixture());
    let mut searcher = Searcher::open(&path).unwrap();
    let first = searcher.search("image").unwrap();
    let second = searcher.search("canvas").unwrap();
    assert_eq!(first.len(), 4);
    assert_eq!(second.len(), 2);
    assert_eq!(searcher.search("image").unwrap(), first);
}
