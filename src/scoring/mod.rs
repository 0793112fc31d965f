// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers and their order.
//!
//! `core` turns one term's matches into per-document ranks. `ranking` orders
//! the merged documents. Everything in between (merging across terms,
//! filtering on constraints) lives in `search`.

mod core;
pub mod ranking;

pub use self::core::*;
