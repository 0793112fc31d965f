// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while opening or decoding an index.
//!
//! Only two things are expected to go wrong in practice: the index file is
//! missing, or it is not a `DOXS` index at all. Everything else means the file
//! is corrupt, and we say so loudly instead of returning half an answer.
//!
//! Terms too short to hash and terms whose matches carry no frequency are not
//! errors. They just contribute nothing.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Error type for index access.
#[derive(Debug)]
pub enum SearchError {
    /// The index file could not be opened.
    IndexUnreadable { path: PathBuf, source: io::Error },
    /// The first four bytes are not the `DOXS` magic.
    IndexHeaderInvalid { found: [u8; 4] },
    /// A read ran past the end of the file.
    Truncated { offset: u64, wanted: usize },
    /// A null-terminated string never terminated within the decoder limit.
    StringTooLong { offset: u64, limit: usize },
    /// A word statistics block claims more documents than the decoder allows.
    TooManyDocuments { offset: u64, count: u32 },
    /// A bucket chain never terminated within the decoder limit.
    ChainTooLong { offset: u64, limit: usize },
    /// Any other I/O failure while reading.
    Io(io::Error),
}

impl SearchError {
    /// True when the index file simply does not exist.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            SearchError::IndexUnreadable { source, .. } if source.kind() == io::ErrorKind::NotFound
        )
    }

    /// True for errors that indicate a damaged (rather than absent or foreign) file.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            SearchError::Truncated { .. }
                | SearchError::StringTooLong { .. }
                | SearchError::TooManyDocuments { .. }
                | SearchError::ChainTooLong { .. }
        )
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::IndexUnreadable { path, source } => {
                if source.kind() == io::ErrorKind::NotFound {
                    write!(f, "search index {} does not exist", path.display())
                } else {
                    write!(
                        f,
                        "search index {} could not be opened: {}",
                        path.display(),
                        source
                    )
                }
            }
            SearchError::IndexHeaderInvalid { found } => {
                write!(
                    f,
                    "header of index file is invalid: expected DOXS, got {:?}",
                    String::from_utf8_lossy(found)
                )
            }
            SearchError::Truncated { offset, wanted } => {
                write!(
                    f,
                    "index truncated: wanted {} bytes at offset {}",
                    wanted, offset
                )
            }
            SearchError::StringTooLong { offset, limit } => {
                write!(
                    f,
                    "unterminated string at offset {} (limit {} bytes)",
                    offset, limit
                )
            }
            SearchError::TooManyDocuments { offset, count } => {
                write!(
                    f,
                    "word statistics at offset {} claim {} documents",
                    offset, count
                )
            }
            SearchError::ChainTooLong { offset, limit } => {
                write!(
                    f,
                    "word chain at offset {} exceeds {} entries",
                    offset, limit
                )
            }
            SearchError::Io(err) => write!(f, "index read failed: {}", err),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::IndexUnreadable { source, .. } => Some(source),
            SearchError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SearchError {
    fn from(err: io::Error) -> Self {
        SearchError::Io(err)
    }
}
