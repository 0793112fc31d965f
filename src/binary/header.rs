// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index header, bucket table geometry, and decoder limits.
//!
//! The header is just the 4-byte magic "DOXS". Right behind it sits the bucket
//! table: 65536 big-endian u32 offsets, one per possible pair of leading
//! bytes. Everything after the table is addressed through those offsets, so
//! the table's size fixes where data can start.
//!
//! `bucket_index` and `bucket_slot_offset` are the only places that know how a
//! word maps to a slot. Readers and the fixture writer both go through them.

use std::io::{self, Read, Write};

use crate::error::{Result, SearchError};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "DOXS" in ASCII
pub const MAGIC: [u8; 4] = *b"DOXS";

/// Header length (magic only)
pub const HEADER_SIZE: u64 = 4;

/// One slot per possible (hi, lo) byte pair
pub const BUCKET_COUNT: usize = 65536;

/// Each slot is a big-endian u32 offset
pub const BUCKET_SLOT_SIZE: u64 = 4;

/// First byte past the bucket table; no chain, stats block or document can start earlier
pub const DATA_START: u64 = HEADER_SIZE + BUCKET_COUNT as u64 * BUCKET_SLOT_SIZE;

// ============================================================================
// DECODER LIMITS (bound the work a corrupt file can cause)
// ============================================================================

/// Maximum bytes in a null-terminated string, terminator excluded
pub const MAX_STRING_LEN: usize = 4096;

/// Maximum documents in one word statistics block
pub const MAX_DOC_COUNT: u32 = 10_000_000;

/// Maximum word entries in one bucket chain
pub const MAX_CHAIN_LEN: usize = 1_000_000;

// ============================================================================
// BUCKET HASH
// ============================================================================

/// Bucket for a word: its first byte times 256 plus its second byte.
///
/// Returns `None` for words shorter than two bytes or with a zero in either
/// leading position. Such words were never bucketed, so they cannot match.
#[inline]
pub fn bucket_index(word: &[u8]) -> Option<u16> {
    match word {
        [hi, lo, ..] if *hi != 0 && *lo != 0 => Some((u16::from(*hi) << 8) | u16::from(*lo)),
        _ => None,
    }
}

/// Absolute file offset of a bucket's slot in the table.
#[inline]
pub fn bucket_slot_offset(bucket: u16) -> u64 {
    HEADER_SIZE + u64::from(bucket) * BUCKET_SLOT_SIZE
}

// ============================================================================
// HEADER
// ============================================================================

/// The index header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexHeader {
    pub magic: [u8; 4],
}

impl IndexHeader {
    pub fn new() -> Self {
        Self { magic: MAGIC }
    }

    pub fn is_valid(&self) -> bool {
        self.magic == MAGIC
    }

    /// Read and validate the header.
    ///
    /// A short file is `Truncated`; four bytes that are not "DOXS" are
    /// `IndexHeaderInvalid`.
    pub fn read<R: Read>(r: &mut R) -> Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic).map_err(|err| {
            if err.kind() == io::ErrorKind::UnexpectedEof {
                SearchError::Truncated {
                    offset: 0,
                    wanted: MAGIC.len(),
                }
            } else {
                SearchError::Io(err)
            }
        })?;

        let header = Self { magic };
        if !header.is_valid() {
            return Err(SearchError::IndexHeaderInvalid { found: magic });
        }
        Ok(header)
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.magic)
    }
}

impl Default for IndexHeader {
    fn default() -> Self {
        Self::new()
    }
}
