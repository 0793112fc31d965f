//! Corrupt indexes fail loudly instead of returning partial results.

use super::common::render_bytes;
use doxsearch::binary::{bucket_index, bucket_slot_offset, MAX_DOC_COUNT, MAX_STRING_LEN};
use doxsearch::testing::IndexBuilder;
use doxsearch::{IndexReader, SearchError, Searcher};

fn patch_u32(bytes: &mut [u8], offset: usize, value: u32) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
}

/// Offset of the "re" chain and the stats offset of its first word.
fn render_offsets(bytes: &[u8]) -> (u32, u32) {
    let mut reader = IndexReader::from_bytes(bytes).unwrap();
    let bucket = bucket_index(b"re").unwrap();
    let chain = reader.bucket_offset(bucket).unwrap();
    let words = reader.word_chain(chain).unwrap();
    (chain, words[0].stats_offset)
}

fn search_err(bytes: &[u8], query: &str) -> SearchError {
    Searcher::from_bytes(bytes).unwrap().search(query).unwrap_err()
}

#[test]
fn test_bucket_pointing_past_end() {
    let mut bytes = render_bytes();
    let slot = bucket_slot_offset(bucket_index(b"re").unwrap()) as usize;
    let past_end = bytes.len() as u32 + 100;
    patch_u32(&mut bytes, slot, past_end);

    let err = search_err(&bytes, "render");
    assert!(matches!(err, SearchError::Truncated { offset, .. } if offset == u64::from(past_end)));
    assert!(err.is_corruption());
}

#[test]
fn test_unterminated_chain_word() {
    let mut bytes = render_bytes();
    let chain_at = bytes.len() as u32;
    bytes.extend_from_slice(b"rendered-without-terminator");
    let slot = bucket_slot_offset(bucket_index(b"re").unwrap()) as usize;
    patch_u32(&mut bytes, slot, chain_at);

    assert!(matches!(
        search_err(&bytes, "render"),
        SearchError::Truncated { .. }
    ));
}

#[test]
fn test_stats_count_over_limit() {
    let mut bytes = render_bytes();
    let (_, stats) = render_offsets(&bytes);
    patch_u32(&mut bytes, stats as usize, MAX_DOC_COUNT + 1);

    let err = search_err(&bytes, "render");
    match err {
        SearchError::TooManyDocuments { offset, count } => {
            assert_eq!(offset, u64::from(stats));
            assert_eq!(count, MAX_DOC_COUNT + 1);
        }
        other => panic!("expected TooManyDocuments, got {:?}", other),
    }
}

#[test]
fn test_stats_count_past_end_of_file() {
    let mut bytes = render_bytes();
    let (_, stats) = render_offsets(&bytes);
    patch_u32(&mut bytes, stats as usize, 100_000);

    assert!(matches!(
        search_err(&bytes, "render"),
        SearchError::Truncated { .. }
    ));
}

#[test]
fn test_document_offset_past_end() {
    let mut bytes = render_bytes();
    let (_, stats) = render_offsets(&bytes);
    // First posting's document offset sits right after the count.
    patch_u32(&mut bytes, stats as usize + 4, u32::MAX - 8);

    assert!(matches!(
        search_err(&bytes, "render"),
        SearchError::Truncated { .. }
    ));
}

#[test]
fn test_overlong_word_is_rejected() {
    let mut b = IndexBuilder::new();
    let doc = b.add_document("D", "d.html");
    let word = format!("re{}", "x".repeat(MAX_STRING_LEN));
    b.add_word(&word, &[(doc, 1, false)]);

    let err = search_err(&b.build(), "re");
    assert!(matches!(err, SearchError::StringTooLong { limit, .. } if limit == MAX_STRING_LEN));
    assert!(err.is_corruption());
}

#[test]
fn test_word_at_limit_is_accepted() {
    let mut b = IndexBuilder::new();
    let doc = b.add_document("D", "d.html");
    let word = format!("re{}", "x".repeat(MAX_STRING_LEN - 2));
    b.add_word(&word, &[(doc, 1, false)]);

    let results = Searcher::from_bytes(&b.build()).unwrap().search("rex").unwrap();
    assert_eq!(results.len(), 1);
}

#[test]
fn test_overlong_document_name_is_rejected() {
    let mut b = IndexBuilder::new();
    let name = "N".repeat(MAX_STRING_LEN + 1);
    let doc = b.add_document(&name, "n.html");
    b.add_word("node", &[(doc, 1, false)]);

    assert!(matches!(
        search_err(&b.build(), "node"),
        SearchError::StringTooLong { .. }
    ));
}

#[test]
fn test_corruption_in_other_buckets_is_not_touched() {
    let mut bytes = render_bytes();
    let slot = bucket_slot_offset(bucket_index(b"zz").unwrap()) as usize;
    patch_u32(&mut bytes, slot, u32::MAX);

    let results = Searcher::from_bytes(&bytes).unwrap().search("render").unwrap();
    assert_eq!(results.len(), 2);
}
