//! Ranking order across terms, priorities and ties.

use super::common::{approx, assert_ranked, library_bytes, search_bytes, urls};
use doxsearch::testing::IndexBuilder;

#[test]
fn test_second_term_can_reorder_results() {
    // canvas alone: Canvas 18/22, Image 4/22. Combined with image, Canvas
    // overtakes Image.
    let results = search_bytes(&library_bytes(), "image canvas");
    assert_eq!(
        urls(&results),
        vec![
            "classCanvas.html",
            "classImage.html",
            "classImageIO.html",
            "group__filters.html"
        ]
    );
    assert!(approx(results[0].rank, 4.0 / 57.0 + 18.0 / 22.0));
    assert!(approx(results[1].rank, 30.0 / 57.0 + 4.0 / 22.0));
    assert_ranked(&results);
}

#[test]
fn test_high_priority_outranks_equal_frequency() {
    let mut b = IndexBuilder::new();
    let low = b.add_document("Low", "a_low.html");
    let high = b.add_document("High", "b_high.html");
    b.add_word("mesh", &[(low, 5, false), (high, 5, true)]);

    let results = search_bytes(&b.build(), "mesh");
    assert_eq!(urls(&results), vec!["b_high.html", "a_low.html"]);
    // freq_low = 10, normalizer = 2*10 + 10 = 30
    assert!(approx(results[0].rank, 20.0 / 30.0));
    assert!(approx(results[1].rank, 10.0 / 30.0));
}

#[test]
fn test_full_match_counts_double() {
    let mut b = IndexBuilder::new();
    let exact = b.add_document("Exact", "exact.html");
    let prefix = b.add_document("Prefix", "prefix.html");
    b.add_word("grid", &[(exact, 3, false)]);
    b.add_word("gridview", &[(prefix, 3, false)]);

    let results = search_bytes(&b.build(), "grid");
    assert_eq!(urls(&results), vec!["exact.html", "prefix.html"]);
    assert!(approx(results[0].rank, 2.0 * results[1].rank));
}

#[test]
fn test_equal_ranks_break_ties_by_url() {
    let mut b = IndexBuilder::new();
    let c = b.add_document("C", "c.html");
    let a = b.add_document("A", "a.html");
    let bb = b.add_document("B", "b.html");
    b.add_word("zeta", &[(c, 1, false), (a, 1, false), (bb, 1, false)]);

    let results = search_bytes(&b.build(), "zeta");
    assert_eq!(urls(&results), vec!["a.html", "b.html", "c.html"]);
    assert!(results.iter().all(|d| approx(d.rank, 1.0 / 3.0)));
}

#[test]
fn test_zero_frequencies_still_listed() {
    let mut b = IndexBuilder::new();
    let y = b.add_document("Y", "y.html");
    let x = b.add_document("X", "x.html");
    b.add_word("void", &[(y, 0, false), (x, 0, true)]);

    let results = search_bytes(&b.build(), "void");
    assert_eq!(urls(&results), vec!["x.html", "y.html"]);
    assert!(results.iter().all(|d| d.rank == 0.0));
}

#[test]
fn test_each_term_contributes_at_most_one() {
    for query in ["image", "canvas", "opencv", "filter", "ima", "image canvas opencv"] {
        let results = search_bytes(&library_bytes(), query);
        let terms = query.split_whitespace().count() as f64;
        let total: f64 = results.iter().map(|d| d.rank).sum();
        assert!(approx(total, terms), "{}: {}", query, total);
        assert_ranked(&results);
    }
}
