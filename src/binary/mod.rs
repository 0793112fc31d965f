// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The `DOXS` packed search index format.
//!
//! The format is old and simple: a hash table keyed by the first two bytes of
//! each word, with everything else reached by absolute offsets. There is no
//! version field, no checksum, no section table. All integers are big-endian
//! u32 and all strings are null-terminated 8-bit text.
//!
//! This crate only reads the format. The writer in `testing` exists to build
//! fixtures and is not part of the query path.
//!
//! # Format Overview
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (4 bytes)                                           │
//! │   magic: [u8; 4] = "DOXS"                                  │
//! ├────────────────────────────────────────────────────────────┤
//! │ BUCKET TABLE (65536 × u32, 256 KiB)                        │
//! │   slot[hi * 256 + lo] = offset of word chain, or 0         │
//! ├────────────────────────────────────────────────────────────┤
//! │ WORD CHAINS (one per non-empty bucket)                     │
//! │   { word: cstring, stats_offset: u32 }*  ""                │
//! ├────────────────────────────────────────────────────────────┤
//! │ WORD STATS (one per word)                                  │
//! │   count: u32, { doc_offset: u32, packed_freq: u32 }×count  │
//! │   packed_freq = freq << 1 | high_priority                  │
//! ├────────────────────────────────────────────────────────────┤
//! │ DOCUMENTS                                                  │
//! │   name: cstring, url: cstring                              │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the header and table positions are fixed. Chains, statistics and
//! documents may appear in any order after the table.

mod header;
mod reader;

pub use header::{
    bucket_index, bucket_slot_offset, IndexHeader, BUCKET_COUNT, BUCKET_SLOT_SIZE, DATA_START,
    HEADER_SIZE, MAGIC, MAX_CHAIN_LEN, MAX_DOC_COUNT, MAX_STRING_LEN,
};
pub use reader::IndexReader;
