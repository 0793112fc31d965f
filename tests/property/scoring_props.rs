//! Properties of bucket hashing and per-term scoring.

use doxsearch::binary::bucket_index;
use doxsearch::testing::IndexBuilder;
use doxsearch::{DocPosting, Searcher, TermTotals};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

fn posting_strategy() -> impl Strategy<Value = DocPosting> {
    (any::<u32>(), 0u32..10_000, any::<bool>()).prop_map(|(doc_offset, freq, high_priority)| {
        DocPosting {
            doc_offset,
            freq,
            high_priority,
        }
    })
}

/// Postings with a weight each (1 = prefix match, 2 = full match).
fn weighted_postings() -> impl Strategy<Value = Vec<(DocPosting, u32)>> {
    prop::collection::vec((posting_strategy(), 1u32..=2), 1..30)
}

// ============================================================================
// BUCKETS
// ============================================================================

proptest! {
    #[test]
    fn prop_bucket_depends_on_first_two_bytes(
        hi in 1u8..=255,
        lo in 1u8..=255,
        tail_a in prop::collection::vec(any::<u8>(), 0..16),
        tail_b in prop::collection::vec(any::<u8>(), 0..16),
    ) {
        let mut a = vec![hi, lo];
        a.extend(tail_a);
        let mut b = vec![hi, lo];
        b.extend(tail_b);

        let bucket = bucket_index(&a);
        prop_assert_eq!(bucket, bucket_index(&b));
        prop_assert_eq!(bucket, Some(u16::from(hi) * 256 + u16::from(lo)));
    }

    #[test]
    fn prop_short_or_zero_words_have_no_bucket(
        byte in any::<u8>(),
        tail in prop::collection::vec(any::<u8>(), 0..8),
    ) {
        prop_assert_eq!(bucket_index(&[]), None);
        prop_assert_eq!(bucket_index(&[byte]), None);

        let mut zero_first = vec![0, byte];
        zero_first.extend(&tail);
        prop_assert_eq!(bucket_index(&zero_first), None);

        let mut zero_second = vec![byte, 0];
        zero_second.extend(&tail);
        prop_assert_eq!(bucket_index(&zero_second), None);
    }
}

// ============================================================================
// SCORING
// ============================================================================

proptest! {
    #[test]
    fn prop_term_ranks_sum_to_one(postings in weighted_postings()) {
        let totals = TermTotals::from_postings(postings.iter().map(|(p, w)| (p, *w)));
        let sum: f64 = postings.iter().map(|(p, w)| totals.rank(p, *w)).sum();

        if totals.normalizer() == 0 {
            prop_assert_eq!(sum, 0.0);
        } else {
            prop_assert!((sum - 1.0).abs() < 1e-9, "sum = {}", sum);
        }
    }

    #[test]
    fn prop_ranks_are_finite_and_in_unit_range(postings in weighted_postings()) {
        let totals = TermTotals::from_postings(postings.iter().map(|(p, w)| (p, *w)));
        for (p, w) in &postings {
            let rank = totals.rank(p, *w);
            prop_assert!(rank.is_finite());
            prop_assert!((0.0..=1.0 + 1e-12).contains(&rank), "rank = {}", rank);
        }
    }

    #[test]
    fn prop_full_match_is_twice_prefix_match(
        freq in 1u32..10_000,
        high_priority in any::<bool>(),
        others in weighted_postings(),
    ) {
        let exact = DocPosting { doc_offset: 1, freq, high_priority: false };
        let prefix = DocPosting { doc_offset: 2, freq, high_priority: false };
        let bystander = DocPosting { doc_offset: 3, freq, high_priority };

        let mut all: Vec<(DocPosting, u32)> = vec![(exact, 2), (prefix, 1), (bystander, 1)];
        all.extend(others);
        let totals = TermTotals::from_postings(all.iter().map(|(p, w)| (p, *w)));

        let full = totals.rank(&exact, 2);
        let part = totals.rank(&prefix, 1);
        prop_assert!((full - 2.0 * part).abs() < 1e-12);
    }

    #[test]
    fn prop_full_match_is_twice_prefix_match_in_one_document(
        suffix in "[a-z]{1,6}",
        freq in 1u32..10_000,
        high_priority in any::<bool>(),
    ) {
        let mut b = IndexBuilder::new();
        let doc = b.add_document("Shared", "shared.html");
        b.add_word("term", &[(doc, freq, high_priority)]);
        b.add_word(&format!("term{}", suffix), &[(doc, freq, high_priority)]);
        let bytes = b.build();

        let matches = Searcher::from_bytes(&bytes)
            .unwrap()
            .match_and_score("term")
            .unwrap();
        prop_assert_eq!(matches.len(), 2);
        let full = matches.iter().find(|m| m.full).unwrap();
        let part = matches.iter().find(|m| !m.full).unwrap();
        prop_assert_eq!(full.docs.len(), 1);
        prop_assert_eq!(part.docs.len(), 1);
        prop_assert!((full.docs[0].rank - 2.0 * part.docs[0].rank).abs() < 1e-12);
        prop_assert!((full.docs[0].rank + part.docs[0].rank - 1.0).abs() < 1e-12);
    }

    #[test]
    fn prop_high_priority_never_ranks_lower(
        freq in 0u32..10_000,
        others in weighted_postings(),
    ) {
        let low = DocPosting { doc_offset: 1, freq, high_priority: false };
        let high = DocPosting { doc_offset: 2, freq, high_priority: true };

        let mut all: Vec<(DocPosting, u32)> = vec![(low, 1), (high, 1)];
        all.extend(others);
        let totals = TermTotals::from_postings(all.iter().map(|(p, w)| (p, *w)));

        prop_assert!(totals.rank(&high, 1) >= totals.rank(&low, 1));
    }

    #[test]
    fn prop_packed_frequency_round_trips(freq in 0u32..=(u32::MAX >> 1), high in any::<bool>()) {
        let posting = DocPosting { doc_offset: 0, freq, high_priority: high };
        prop_assert_eq!(DocPosting::from_packed(0, posting.packed()), posting);
    }
}
