// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query parsing: free text in, classified terms out.
//!
//! Tokens are whitespace-separated. A leading `+` makes a term required, a
//! leading `-` makes it forbidden; only one prefix is stripped, so `+-x`
//! requires the literal term `-x`. Everything is lower-cased before it is
//! looked up or compared, which keeps `+Render` and `render` the same term.
//!
//! Each distinct term is looked up once, in first-seen order, however many
//! times and with whatever prefixes it appears. Constraints accumulate
//! separately: `foo +foo` looks up `foo` once and still requires it.

use crate::types::{Term, TermRole};
use crate::utils::normalize;

/// A parsed query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Distinct terms to look up, in first-seen order, with their first role.
    pub terms: Vec<Term>,
    /// Terms every result must have matched.
    pub required: Vec<String>,
    /// Terms no result may have matched.
    pub forbidden: Vec<String>,
}

impl ParsedQuery {
    /// No terms at all: the query cannot match anything.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Split a raw query into classified, deduplicated terms.
pub fn parse_query(raw: &str) -> ParsedQuery {
    let mut query = ParsedQuery::default();

    for token in raw.split_whitespace() {
        let (role, text) = classify(token);
        if text.is_empty() {
            continue;
        }
        let text = normalize(text);

        match role {
            TermRole::Required => push_unique(&mut query.required, &text),
            TermRole::Forbidden => push_unique(&mut query.forbidden, &text),
            TermRole::Plain => {}
        }

        if !query.terms.iter().any(|t| t.text == text) {
            query.terms.push(Term::new(text, role));
        }
    }

    query
}

fn classify(token: &str) -> (TermRole, &str) {
    if let Some(rest) = token.strip_prefix('+') {
        (TermRole::Required, rest)
    } else if let Some(rest) = token.strip_prefix('-') {
        (TermRole::Forbidden, rest)
    } else {
        (TermRole::Plain, token)
    }
}

fn push_unique(list: &mut Vec<String>, text: &str) {
    if !list.iter().any(|t| t == text) {
        list.push(text.to_string());
    }
}
