//! Custom cargo commands for the doxsearch crate.
//!
//! Usage:
//!   cargo xtask test                  - Run all tests
//!   cargo xtask check                 - Quick check (check + test + clippy)
//!   cargo xtask bench                 - Run benchmarks
//!   cargo xtask fixture <PATH> [KIND] - Write a sample search.idx

use anyhow::{bail, Context, Result};
use doxsearch::testing::{library_fixture, render_fixture};
use doxsearch::Searcher;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("fixture") => {
            let Some(path) = args.get(1) else {
                bail!("usage: cargo xtask fixture <PATH> [render|library]");
            };
            fixture(Path::new(path), args.get(2).map(String::as_str))?;
        }
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  test                    Run all Rust tests
  check                   Quick check (cargo check + test + clippy)
  bench                   Run benchmarks
  fixture <PATH> [KIND]   Write a sample search.idx (KIND: library, render)
"#
    );
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test", "--workspace"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--workspace", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench", "--package", "doxsearch"])
}

/// Write a sample index and check it answers a query.
fn fixture(path: &Path, kind: Option<&str>) -> Result<()> {
    let (builder, probe) = match kind.unwrap_or("library") {
        "library" => (library_fixture(), "image"),
        "render" => (render_fixture(), "render"),
        other => bail!("unknown fixture kind {:?} (expected library or render)", other),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    builder
        .write_to(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let hits = Searcher::open(path)
        .and_then(|mut s| s.search(probe))
        .with_context(|| format!("Fixture at {} does not search", path.display()))?;
    if hits.is_empty() {
        bail!("fixture query {:?} found nothing", probe);
    }

    println!(
        "✓ Wrote {} ({:?} finds {} documents)",
        path.display(),
        probe,
        hits.len()
    );
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}
