// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io;
use std::path::Path;

use clap::Parser;
use doxsearch::{
    bucket_index, AggregateDocument, IndexReader, MatchStat, Result, SearchError, SearchReport,
    Searcher, MAGIC,
};

mod cli;
use cli::display::*;
use cli::{apply_limit, resolve_index_path, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search {
            query,
            index,
            limit,
            json,
            verbose,
        } => run_search(&resolve_index_path(index), &query, limit, json, verbose),
        Commands::Inspect { index } => run_inspect(&resolve_index_path(index)),
    };

    if let Err(e) = result {
        eprintln!("{} {}", error_prefix(), e);
        if matches!(e, SearchError::IndexUnreadable { .. }) {
            eprintln!(
                "  hint: pass --index <PATH> or set {}",
                cli::INDEX_ENV_VAR
            );
        }
        std::process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH
// ═══════════════════════════════════════════════════════════════════════════

fn run_search(path: &Path, query: &str, limit: usize, json: bool, verbose: bool) -> Result<()> {
    let mut searcher = Searcher::open(path)?;
    let report = searcher.search_report(query)?;
    drop(searcher);

    if verbose {
        print_diagnostics(&report);
    }

    let total = report.results.len();
    let results = apply_limit(report.results, limit);

    if json {
        let out = serde_json::to_string_pretty(&results).map_err(io::Error::from)?;
        println!("{}", out);
        return Ok(());
    }

    print_results(query, total, &results);
    Ok(())
}

/// One stderr line per query term: bucket, matched words, documents reached.
fn print_diagnostics(report: &SearchReport) {
    for term in &report.query.terms {
        let matches: Vec<&MatchStat> = report
            .matches
            .iter()
            .filter(|m| m.term == term.text)
            .collect();
        eprintln!("{}", term_diagnostic(&term.text, &matches));
    }
}

fn term_diagnostic(term: &str, matches: &[&MatchStat]) -> String {
    let Some(bucket) = bucket_index(term.as_bytes()) else {
        return format!("term {:?}: not indexable (shorter than two bytes)", term);
    };
    if matches.is_empty() {
        return format!("term {:?}: bucket {:#06x}, no matching words", term, bucket);
    }
    let words: Vec<String> = matches
        .iter()
        .map(|m| {
            format!(
                "{}[{}, {} docs]",
                m.matched,
                if m.full { "full" } else { "prefix" },
                m.docs.len()
            )
        })
        .collect();
    format!(
        "term {:?}: bucket {:#06x}, {} word(s): {}",
        term,
        bucket,
        matches.len(),
        words.join(" ")
    )
}

fn print_results(query: &str, total: usize, results: &[AggregateDocument]) {
    println!();
    title("DOXSEARCH");
    println!();

    section_top("QUERY");
    row(&format!("  {}", styled(&[BOLD], query)));
    row(&format!("  {}", result_count_message(total)));
    if results.len() < total {
        row(&format!(
            "  {}",
            themed(GRAY, &[], &format!("showing {} of {}", results.len(), total))
        ));
    }

    for (i, doc) in results.iter().enumerate() {
        section_mid(&format!("#{}", i + 1));
        row(&format!(
            "  {}  {}",
            rank_value(doc.rank),
            themed(BRIGHT_CYAN, &[BOLD], &truncate_tail(&doc.name, BOX_WIDTH - 12))
        ));
        row(&format!(
            "  {}",
            styled(&[DIM], &truncate_tail(&doc.url, BOX_WIDTH - 2))
        ));
        for line in wrap_visible(&matches_line(doc), BOX_WIDTH - 2) {
            row(&format!("  {}", line));
        }
    }
    section_bot();
    println!();
}

/// Split a styled line on spaces so each piece fits `width` visible chars.
fn wrap_visible(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split(' ') {
        let needed = visible_len(&current) + visible_len(word) + usize::from(!current.is_empty());
        if !current.is_empty() && needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

struct IndexSummary {
    size: u64,
    buckets: usize,
    words: usize,
    longest_chain: usize,
    longest_bucket: Option<u16>,
    /// Words chained under a bucket their first two bytes do not hash to.
    misplaced: usize,
    crc32: u32,
}

fn summarize(bytes: &[u8]) -> Result<IndexSummary> {
    let mut reader = IndexReader::from_bytes(bytes)?;
    let buckets = reader.buckets()?;

    let mut words = 0;
    let mut longest_chain = 0;
    let mut longest_bucket = None;
    let mut misplaced = 0;
    for &(bucket, offset) in &buckets {
        let chain = reader.word_chain(offset)?;
        words += chain.len();
        misplaced += chain
            .iter()
            .filter(|entry| bucket_index(&entry.word) != Some(bucket))
            .count();
        if chain.len() > longest_chain {
            longest_chain = chain.len();
            longest_bucket = Some(bucket);
        }
    }

    Ok(IndexSummary {
        size: reader.len(),
        buckets: buckets.len(),
        words,
        longest_chain,
        longest_bucket,
        misplaced,
        crc32: crc32fast::hash(bytes),
    })
}

fn run_inspect(path: &Path) -> Result<()> {
    let bytes = fs::read(path).map_err(|source| SearchError::IndexUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let summary = summarize(&bytes)?;

    println!();
    title("DOXSEARCH INDEX");
    println!();

    section_top("FILE");
    row(&format!(
        "  {:<18}{}",
        "Path",
        truncate_tail(&path.display().to_string(), BOX_WIDTH - 22)
    ));
    row(&format!("  {:<18}{}", "Size", format_size(summary.size)));
    row(&format!(
        "  {:<18}{}",
        "Magic",
        String::from_utf8_lossy(&MAGIC)
    ));
    row(&format!("  {:<18}{:08x}", "CRC32", summary.crc32));

    section_mid("BUCKETS");
    row(&format!(
        "  {:<18}{}",
        "Non-empty",
        pad_left(&summary.buckets.to_string(), 8)
    ));
    row(&format!(
        "  {:<18}{}",
        "Words",
        pad_left(&summary.words.to_string(), 8)
    ));
    let longest = match summary.longest_bucket {
        Some(bucket) => format!(
            "{}  {}",
            pad_left(&summary.longest_chain.to_string(), 8),
            themed(GRAY, &[], &format!("(bucket {:#06x} {:?})", bucket, bucket_label(bucket)))
        ),
        None => pad_left("0", 8),
    };
    row(&format!("  {:<18}{}", "Longest chain", longest));
    row(&format!(
        "  {:<18}{} {}",
        "Misplaced words",
        pad_left(&summary.misplaced.to_string(), 8),
        status(summary.misplaced == 0)
    ));
    section_bot();
    println!();
    Ok(())
}

/// The two leading bytes a bucket stands for, as text.
fn bucket_label(bucket: u16) -> String {
    String::from_utf8_lossy(&bucket.to_be_bytes()).into_owned()
}
