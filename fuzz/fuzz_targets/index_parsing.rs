// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index decoding under adversarial input.
//!
//! A `search.idx` is just offsets pointing at offsets. A damaged one can point
//! past the end, into the middle of a string, at itself, or at a count of four
//! billion documents. Every one of those must come back as an error, never a
//! panic, a hang or an allocation the size of the claimed count.

#![no_main]

use arbitrary::Arbitrary;
use doxsearch::binary::{bucket_slot_offset, DATA_START, MAGIC};
use doxsearch::{IndexReader, Searcher};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    /// Bucket slots to fill, as (bucket, offset into body).
    slots: Vec<(u16, u32)>,
    /// Bytes following the bucket table.
    body: Vec<u8>,
    /// Point slots at arbitrary absolute offsets instead of into the body.
    absolute: bool,
    query: String,
}

/// Assemble a file with a valid header so decoding gets past the magic.
fn assemble(input: &Input) -> Vec<u8> {
    let mut bytes = MAGIC.to_vec();
    bytes.resize(DATA_START as usize, 0);
    let body_len = input.body.len() as u32 + 16;
    for &(bucket, offset) in input.slots.iter().take(64) {
        let target = if input.absolute {
            offset
        } else {
            DATA_START as u32 + offset % body_len
        };
        let slot = bucket_slot_offset(bucket) as usize;
        bytes[slot..slot + 4].copy_from_slice(&target.to_be_bytes());
    }
    bytes.extend_from_slice(&input.body);
    bytes
}

fuzz_target!(|input: Input| {
    let bytes = assemble(&input);

    // INVARIANT 1: a valid header always opens
    let mut reader = IndexReader::from_bytes(&bytes).expect("header was valid");

    // INVARIANT 2: every filled slot is reported, in bucket order
    let buckets = reader.buckets().expect("table is complete");
    for pair in buckets.windows(2) {
        assert!(pair[0].0 < pair[1].0, "buckets out of order");
    }

    // INVARIANT 3: decoding any chain terminates without panicking
    for &(_, offset) in buckets.iter().take(8) {
        if let Ok(chain) = reader.word_chain(offset) {
            for entry in chain.iter().take(8) {
                let _ = reader.word_stats(entry.stats_offset);
            }
        }
    }

    // INVARIANT 4: a query either fails cleanly or returns ranked results
    let query: String = input.query.chars().take(64).collect();
    let mut searcher = Searcher::new(reader);
    if let Ok(results) = searcher.search(&query) {
        for pair in results.windows(2) {
            assert!(
                doxsearch::compare_results(&pair[0], &pair[1]).is_le(),
                "results not ranked"
            );
        }
        assert!(results.iter().all(|d| d.rank.is_finite()));
    }

    // INVARIANT 5: raw bytes with no header handling never panic either
    let _ = IndexReader::from_bytes(&input.body);
});
