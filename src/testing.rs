//! Test utilities shared across unit tests, integration tests, benches and xtask.
//!
//! This module is always compiled but hidden from documentation.
//! `IndexBuilder` writes the `DOXS` format so tests can describe an index as
//! words and documents instead of hand-assembling offsets.

#![doc(hidden)]

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use crate::binary::{bucket_index, bucket_slot_offset, IndexHeader, DATA_START};
use crate::types::DocPosting;

/// Handle to a document added to an `IndexBuilder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocHandle(usize);

/// In-memory description of an index, serialized by `build`.
///
/// Words keep insertion order within their bucket chain, which is the order
/// the matcher will see them in. Words that cannot be bucketed (shorter than
/// two bytes, or a zero in the first two) are dropped, as the real index
/// builder does.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    documents: Vec<(String, String)>,
    words: Vec<(String, Vec<(DocHandle, u32, bool)>)>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document record and get a handle for use in postings.
    pub fn add_document(&mut self, name: &str, url: &str) -> DocHandle {
        self.documents.push((name.to_string(), url.to_string()));
        DocHandle(self.documents.len() - 1)
    }

    /// Add a word with its (document, frequency, high priority) postings.
    pub fn add_word(&mut self, word: &str, postings: &[(DocHandle, u32, bool)]) -> &mut Self {
        self.words.push((word.to_string(), postings.to_vec()));
        self
    }

    /// Serialize to `DOXS` bytes.
    ///
    /// Layout after the bucket table: documents, then statistics blocks, then
    /// chains. Any order is valid; this one keeps offsets easy to reason about.
    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        // Writing to a Vec cannot fail.
        let _ = IndexHeader::new().write(&mut out);
        out.resize(DATA_START as usize, 0);

        let mut doc_offsets = Vec::with_capacity(self.documents.len());
        for (name, url) in &self.documents {
            doc_offsets.push(out.len() as u32);
            push_cstring(&mut out, name.as_bytes());
            push_cstring(&mut out, url.as_bytes());
        }

        let mut chains: BTreeMap<u16, Vec<(&str, u32)>> = BTreeMap::new();
        for (word, postings) in &self.words {
            let Some(bucket) = bucket_index(word.as_bytes()) else {
                continue;
            };
            let stats_offset = out.len() as u32;
            out.extend_from_slice(&(postings.len() as u32).to_be_bytes());
            for &(DocHandle(doc), freq, high_priority) in postings {
                let posting = DocPosting {
                    doc_offset: doc_offsets[doc],
                    freq,
                    high_priority,
                };
                out.extend_from_slice(&posting.doc_offset.to_be_bytes());
                out.extend_from_slice(&posting.packed().to_be_bytes());
            }
            chains.entry(bucket).or_default().push((word, stats_offset));
        }

        for (bucket, entries) in chains {
            let chain_offset = out.len() as u32;
            for (word, stats_offset) in entries {
                push_cstring(&mut out, word.as_bytes());
                out.extend_from_slice(&stats_offset.to_be_bytes());
            }
            out.push(0);

            let slot = bucket_slot_offset(bucket) as usize;
            out[slot..slot + 4].copy_from_slice(&chain_offset.to_be_bytes());
        }

        out
    }

    /// Serialize and write to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        std::fs::write(path, self.build())
    }
}

fn push_cstring(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(bytes);
    out.push(0);
}

/// The two-word index used throughout the docs and tests:
///
/// - `render`: doc A, freq 4, high priority
/// - `rendering`: doc A, freq 2, low priority; doc B, freq 1, low priority
pub fn render_fixture() -> IndexBuilder {
    let mut builder = IndexBuilder::new();
    let a = builder.add_document("A", "a.html");
    let b = builder.add_document("B", "b.html");
    builder.add_word("render", &[(a, 4, true)]);
    builder.add_word("rendering", &[(a, 2, false), (b, 1, false)]);
    builder
}

/// A small imaging library, closer to what Doxygen actually emits.
///
/// | word      | postings (doc, freq, high priority)          |
/// |-----------|----------------------------------------------|
/// | image     | Image (9, hi), Canvas (2), Filters (3)       |
/// | imageio   | ImageIO (6, hi), Image (1)                   |
/// | imaging   | Overview (4)                                 |
/// | canvas    | Canvas (7, hi), Image (2)                    |
/// | opencv    | Filters (5), Overview (1)                    |
/// | filter    | Filters (8, hi)                              |
/// | filters   | Filters (3), Canvas (1)                      |
pub fn library_fixture() -> IndexBuilder {
    let mut b = IndexBuilder::new();
    let image = b.add_document("Image", "classImage.html");
    let canvas = b.add_document("Canvas", "classCanvas.html");
    let filters = b.add_document("Filters", "group__filters.html");
    let imageio = b.add_document("ImageIO", "classImageIO.html");
    let overview = b.add_document("Overview", "index.html");

    b.add_word("image", &[(image, 9, true), (canvas, 2, false), (filters, 3, false)]);
    b.add_word("imageio", &[(imageio, 6, true), (image, 1, false)]);
    b.add_word("imaging", &[(overview, 4, false)]);
    b.add_word("canvas", &[(canvas, 7, true), (image, 2, false)]);
    b.add_word("opencv", &[(filters, 5, false), (overview, 1, false)]);
    b.add_word("filter", &[(filters, 8, true)]);
    b.add_word("filters", &[(filters, 3, false), (canvas, 1, false)]);
    b
}
