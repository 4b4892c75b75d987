use anyhow::{Context, Result};
use kauri_core::{build_summary, group_by_type, Transaction, TransactionGroup};
use kauri_import::import::{classify_transactions, create_classifier, read_transactions};
use kauri_import::{analyze_descriptions, category_stats, needs_review};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;

const CSV_EXTENSION: &str = "csv";

/// Regular files in `dir` (not recursive) with a `.csv` extension, sorted.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading directory {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(CSV_EXTENSION) {
            continue;
        }
        paths.push(path);
    }
    paths.sort();

    tracing::info!("Found {} CSV files", paths.len());
    for path in &paths {
        tracing::info!(" * {}", path.display());
    }
    Ok(paths)
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("serialize output")?;
    writeln!(out)?;
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    write_json(&mut std::io::stdout().lock(), value)
}

async fn load(dir: &Path, cfg: &Config) -> Result<(Vec<PathBuf>, Vec<Transaction>)> {
    let paths = list_csv_files(dir)?;
    let transactions = read_transactions(&paths, cfg.ingest_timeout()).await;
    tracing::info!("Loaded {} transactions", transactions.len());
    Ok((paths, transactions))
}

pub async fn summarise(dir: &Path, cfg: &Config) -> Result<()> {
    let (paths, transactions) = load(dir, cfg).await?;
    let summary = build_summary(&transactions, Some(paths.len()))
        .with_context(|| format!("no transactions found in {}", dir.display()))?;
    print_json(&summary)
}

pub async fn process(dir: &Path, cfg: &Config) -> Result<()> {
    let (_, transactions) = load(dir, cfg).await?;
    let groups: Vec<TransactionGroup> = group_by_type(&transactions);
    print_json(&groups)
}

pub async fn classify(dir: &Path, cfg: &Config, threshold: Option<f32>) -> Result<()> {
    let (_, transactions) = load(dir, cfg).await?;
    let classifier = create_classifier(&cfg.custom_rules).context("building classification rules")?;

    let classified = classify_transactions(&classifier, &transactions);
    print_json(&classified)?;

    let threshold = threshold.unwrap_or(cfg.review_threshold);
    let review = needs_review(&classified, threshold);
    tracing::info!("{} transactions below confidence {threshold}", review.len());
    print_json(&review)?;

    print_json(&category_stats(&classified))
}

pub async fn analyse(dir: &Path, cfg: &Config) -> Result<()> {
    let (_, transactions) = load(dir, cfg).await?;
    let descriptions: Vec<String> = transactions.iter().map(Transaction::description).collect();
    print_json(&descriptions)?;

    let stats = analyze_descriptions(&descriptions);
    for (word, count) in stats.top_words(5) {
        tracing::info!("{word}: {count}");
    }
    print_json(&stats)
}
