//! Ingestion pipeline - feeds to annotated, stored articles.

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::context::NewsContext;
use crate::error::{ExtractError, NewsError, Result, StoreError};
use crate::types::article::{Article, RawEntry};

/// Best-effort progress callback, invoked with `(completed, total)` after
/// each item. Never required for correctness.
pub type ProgressFn = dyn Fn(usize, usize) + Send + Sync;

/// What happened to one entry.
///
/// Per-item failures are data, not exceptions: they tally into the report
/// and the batch continues.
#[derive(Debug)]
pub enum ItemOutcome {
    /// Article extracted, annotated, and stored
    Ingested,

    /// URL already present in the store; first write wins
    Duplicate,

    /// Both extractor tiers failed, or content fell below the threshold
    ExtractionFailed(ExtractError),

    /// The store rejected the article
    StorageFailed(StoreError),
}

/// Batch summary for one ingestion run.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Entries the batch attempted
    pub attempted: usize,

    /// Articles newly stored - the user-visible success count
    pub succeeded: usize,

    /// Entries skipped because their URL was already stored
    pub duplicates: usize,

    /// Entries dropped by the extraction cascade
    pub extraction_failures: usize,

    /// Entries that extracted but failed to persist
    pub storage_failures: usize,

    /// URLs of entries that failed
    pub failed_urls: Vec<String>,
}

impl IngestReport {
    /// Whether every attempted entry was stored or was a known duplicate.
    pub fn is_success(&self) -> bool {
        self.failed_urls.is_empty()
    }

    fn record(&mut self, url: String, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Ingested => self.succeeded += 1,
            ItemOutcome::Duplicate => self.duplicates += 1,
            ItemOutcome::ExtractionFailed(_) => {
                self.extraction_failures += 1;
                self.failed_urls.push(url);
            }
            ItemOutcome::StorageFailed(_) => {
                self.storage_failures += 1;
                self.failed_urls.push(url);
            }
        }
    }
}

/// Run one ingestion batch: fetch entries, extract, annotate, store.
///
/// Never errs for per-item failures. The only hard failures are systemic
/// conditions detected before any item is processed (no feeds configured).
/// At most `max_articles` entries are attempted; items run through a bounded
/// buffered stream that preserves entry order, so tallies and progress
/// reporting are deterministic.
pub async fn ingest(
    ctx: &NewsContext,
    max_articles: usize,
    progress: Option<&ProgressFn>,
) -> Result<IngestReport> {
    if ctx.config.feed_sources.is_empty() {
        return Err(NewsError::NoFeedsConfigured);
    }

    let entries = ctx
        .entry_source
        .fetch(&ctx.config.feed_sources, ctx.config.per_feed_limit)
        .await;

    let batch: Vec<RawEntry> = entries.into_iter().take(max_articles).collect();
    let total = batch.len();
    info!(total, "ingestion batch starting");

    let mut report = IngestReport {
        attempted: total,
        ..Default::default()
    };

    let outcomes = stream::iter(batch)
        .map(|entry| process_entry(ctx, entry))
        .buffered(ctx.config.ingest_concurrency);
    futures::pin_mut!(outcomes);

    let mut completed = 0;
    while let Some((url, outcome)) = outcomes.next().await {
        completed += 1;
        report.record(url, outcome);
        if let Some(callback) = progress {
            callback(completed, total);
        }
    }

    info!(
        succeeded = report.succeeded,
        duplicates = report.duplicates,
        extraction_failures = report.extraction_failures,
        storage_failures = report.storage_failures,
        "ingestion batch complete"
    );

    Ok(report)
}

/// Process one entry end to end. Every failure is isolated to the entry.
async fn process_entry(ctx: &NewsContext, entry: RawEntry) -> (String, ItemOutcome) {
    let url = entry.url.clone();

    // Known URL: skip before spending extraction and annotation work.
    // `add` below still performs the authoritative atomic check.
    match ctx.store.contains(&url).await {
        Ok(true) => return (url, ItemOutcome::Duplicate),
        Ok(false) => {}
        Err(e) => {
            warn!(url = %url, error = %e, "store lookup failed");
            return (url, ItemOutcome::StorageFailed(e));
        }
    }

    let content = match ctx.extractor.extract(&entry).await {
        Ok(content) => content,
        Err(e) => {
            warn!(url = %url, error = %e, "extraction failed");
            return (url, ItemOutcome::ExtractionFailed(e));
        }
    };

    // Store-level invariant, enforced regardless of which extractor ran.
    let chars = content.trimmed_len();
    if chars <= ctx.config.min_content_chars {
        warn!(url = %url, chars, "content below minimum threshold");
        return (
            url.clone(),
            ItemOutcome::ExtractionFailed(ExtractError::ContentTooShort { url, chars }),
        );
    }

    // Annotation failure is not an item failure: the annotator substitutes
    // the Unknown sentinel and the article is stored anyway.
    let (verdict, explanation) = ctx.annotator.annotate_misinfo(&content.text).await;

    let article = Article::new(url.clone(), content.title, content.text, entry.source_label)
        .with_misinfo(verdict, explanation);

    match ctx.store.add(article).await {
        Ok(true) => (url, ItemOutcome::Ingested),
        Ok(false) => (url, ItemOutcome::Duplicate),
        Err(e) => {
            warn!(url = %url, error = %e, "store rejected article");
            (url, ItemOutcome::StorageFailed(e))
        }
    }
}
