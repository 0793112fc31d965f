// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Random-access decoder for `DOXS` index files.
//!
//! Every read is addressed by an absolute offset taken from somewhere else in
//! the file: bucket slots point at chains, chains point at statistics blocks,
//! statistics point at document records. The reader never scans; it seeks,
//! decodes one record, and hands back owned values.
//!
//! Reads are bounds-checked against the file length before touching the
//! source, so an offset past the end surfaces as `Truncated` rather than a
//! short read. Sequential reads (a chain walk, a statistics block) skip the
//! seek entirely because the reader tracks its own position.
//!
//! Decoded documents are cached by offset for the lifetime of the reader.
//! Readers live for one query, so the cache does too.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use super::header::{
    bucket_slot_offset, IndexHeader, BUCKET_COUNT, BUCKET_SLOT_SIZE, HEADER_SIZE, MAX_CHAIN_LEN,
    MAX_DOC_COUNT, MAX_STRING_LEN,
};
use crate::error::{Result, SearchError};
use crate::types::{DocPosting, DocumentRecord, WordEntry, WordStats};

/// Bytes per (document offset, packed frequency) pair.
const POSTING_SIZE: u64 = 8;

/// Sentinel position forcing the next read to seek.
const UNKNOWN_POSITION: u64 = u64::MAX;

/// A validated, open index.
///
/// Construction reads and checks the header, so holding an `IndexReader` means
/// the magic was right. Dropping it releases the underlying file.
#[derive(Debug)]
pub struct IndexReader<R> {
    source: R,
    len: u64,
    pos: u64,
    header: IndexHeader,
    documents: HashMap<u32, DocumentRecord>,
}

impl IndexReader<BufReader<File>> {
    /// Open an index file and validate its header.
    ///
    /// A missing or unopenable file is `IndexUnreadable` (use
    /// `SearchError::is_missing` to tell the two apart). A wrong magic is
    /// `IndexHeaderInvalid`. Either way the file handle is already closed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let unreadable = |source: io::Error| SearchError::IndexUnreadable {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(unreadable)?;
        // Directories open fine on Unix and only fail on the first read.
        if !file.metadata().map_err(unreadable)?.is_file() {
            return Err(unreadable(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        Self::new(BufReader::new(file))
    }
}

impl<'a> IndexReader<Cursor<&'a [u8]>> {
    /// Read an index held in memory.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> IndexReader<R> {
    /// Wrap any seekable source, validating the header.
    pub fn new(mut source: R) -> Result<Self> {
        let len = source.seek(SeekFrom::End(0))?;
        source.seek(SeekFrom::Start(0))?;
        let header = IndexHeader::read(&mut source)?;
        Ok(Self {
            source,
            len,
            pos: HEADER_SIZE,
            header,
            documents: HashMap::new(),
        })
    }

    /// The header validated at construction.
    pub fn header(&self) -> IndexHeader {
        self.header
    }

    /// Total file length in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of documents decoded so far.
    pub fn cached_documents(&self) -> usize {
        self.documents.len()
    }

    /// Give back the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }

    // ------------------------------------------------------------------------
    // Primitive reads
    // ------------------------------------------------------------------------

    fn seek_to(&mut self, offset: u64) -> Result<()> {
        if offset != self.pos {
            self.source.seek(SeekFrom::Start(offset))?;
            self.pos = offset;
        }
        Ok(())
    }

    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let wanted = buf.len();
        let in_bounds = offset
            .checked_add(wanted as u64)
            .is_some_and(|end| end <= self.len);
        if !in_bounds {
            return Err(SearchError::Truncated { offset, wanted });
        }

        self.seek_to(offset)?;
        if let Err(err) = self.source.read_exact(buf) {
            self.pos = UNKNOWN_POSITION;
            return Err(err.into());
        }
        self.pos += wanted as u64;
        Ok(())
    }

    /// Re-read the 4-byte magic from the start of the file.
    pub fn read_header(&mut self) -> Result<[u8; 4]> {
        let mut magic = [0u8; 4];
        self.read_exact_at(0, &mut magic)?;
        Ok(magic)
    }

    /// Big-endian u32 at an absolute offset.
    pub fn read_u32_be(&mut self, offset: u64) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact_at(offset, &mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    /// Null-terminated byte string at an absolute offset, terminator excluded.
    ///
    /// An empty result means the terminator came first, which ends a chain.
    pub fn read_cstring(&mut self, offset: u64) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let mut byte = [0u8; 1];
        let mut at = offset;
        loop {
            self.read_exact_at(at, &mut byte)?;
            if byte[0] == 0 {
                return Ok(bytes);
            }
            if bytes.len() == MAX_STRING_LEN {
                return Err(SearchError::StringTooLong {
                    offset,
                    limit: MAX_STRING_LEN,
                });
            }
            bytes.push(byte[0]);
            at += 1;
        }
    }

    // ------------------------------------------------------------------------
    // Typed records
    // ------------------------------------------------------------------------

    /// Chain offset stored in a bucket slot; zero means the bucket is empty.
    pub fn bucket_offset(&mut self, bucket: u16) -> Result<u32> {
        self.read_u32_be(bucket_slot_offset(bucket))
    }

    /// Every non-empty bucket as (bucket, chain offset), in bucket order.
    pub fn buckets(&mut self) -> Result<Vec<(u16, u32)>> {
        let mut table = vec![0u8; BUCKET_COUNT * BUCKET_SLOT_SIZE as usize];
        self.read_exact_at(HEADER_SIZE, &mut table)?;

        Ok(table
            .chunks_exact(BUCKET_SLOT_SIZE as usize)
            .enumerate()
            .filter_map(|(bucket, slot)| {
                let offset = u32::from_be_bytes([slot[0], slot[1], slot[2], slot[3]]);
                (offset != 0).then_some((bucket as u16, offset))
            })
            .collect())
    }

    /// Walk a bucket chain up to its empty-word terminator.
    pub fn word_chain(&mut self, offset: u32) -> Result<Vec<WordEntry>> {
        let mut entries = Vec::new();
        let mut at = u64::from(offset);
        loop {
            let word = self.read_cstring(at)?;
            if word.is_empty() {
                return Ok(entries);
            }
            if entries.len() == MAX_CHAIN_LEN {
                return Err(SearchError::ChainTooLong {
                    offset: u64::from(offset),
                    limit: MAX_CHAIN_LEN,
                });
            }
            at += word.len() as u64 + 1;
            let stats_offset = self.read_u32_be(at)?;
            at += 4;
            entries.push(WordEntry { word, stats_offset });
        }
    }

    /// Decode a statistics block: a count followed by that many postings.
    pub fn word_stats(&mut self, offset: u32) -> Result<WordStats> {
        let offset = u64::from(offset);
        let count = self.read_u32_be(offset)?;
        if count > MAX_DOC_COUNT {
            return Err(SearchError::TooManyDocuments { offset, count });
        }

        let body_start = offset + 4;
        let body_len = u64::from(count) * POSTING_SIZE;
        if body_start + body_len > self.len {
            return Err(SearchError::Truncated {
                offset: body_start,
                wanted: body_len as usize,
            });
        }

        let mut body = vec![0u8; body_len as usize];
        self.read_exact_at(body_start, &mut body)?;

        let postings = body
            .chunks_exact(POSTING_SIZE as usize)
            .map(|pair| {
                let doc_offset = u32::from_be_bytes([pair[0], pair[1], pair[2], pair[3]]);
                let packed = u32::from_be_bytes([pair[4], pair[5], pair[6], pair[7]]);
                DocPosting::from_packed(doc_offset, packed)
            })
            .collect();

        Ok(WordStats { postings })
    }

    /// Name and URL of the document at `offset`, decoded once per reader.
    pub fn document(&mut self, offset: u32) -> Result<DocumentRecord> {
        if let Some(doc) = self.documents.get(&offset) {
            return Ok(doc.clone());
        }

        let name = self.read_cstring(u64::from(offset))?;
        let url = self.read_cstring(u64::from(offset) + name.len() as u64 + 1)?;
        let doc = DocumentRecord {
            name: String::from_utf8_lossy(&name).into_owned(),
            url: String::from_utf8_lossy(&url).into_owned(),
        };
        self.documents.insert(offset, doc.clone());
        Ok(doc)
    }
}
