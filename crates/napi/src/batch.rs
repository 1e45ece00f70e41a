//! Batch extraction types and functions.

use crate::convert::{convert_error, from_page_toc, parse_options, to_toc_config};
use crate::types::{PageTocResult, TocOptions};
use napi_derive::napi;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;
use tocline_core::build_page_toc;

/// Input for batch extraction.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Unique identifier for this input (typically the file path).
    pub id: String,
    /// Markdown or MDX source.
    pub source: String,
    /// File path used to pick Markdown or MDX parsing; defaults to `id`.
    pub filepath: Option<String>,
}

/// Options for batch extraction.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Maximum number of worker threads (defaults to the rayon pool).
    pub max_threads: Option<u32>,
    /// Keep going after a failed file (default: true).
    pub continue_on_error: Option<bool>,
    /// Settings applied to every file.
    pub toc: Option<TocOptions>,
}

/// Outcome for a single file.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Identifier from the input.
    pub id: String,
    /// Extracted table of contents (present on success).
    pub result: Option<PageTocResult>,
    /// Error message (present on failure).
    pub error: Option<String>,
}

/// Statistics from batch extraction.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchStats {
    /// Number of inputs received.
    pub total: u32,
    /// Number of files extracted.
    pub succeeded: u32,
    /// Number of files that failed.
    pub failed: u32,
    /// Wall-clock time in milliseconds.
    pub processing_time_ms: f64,
}

/// Per-file outcomes plus statistics.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchProcessingResult {
    /// One entry per processed input, in input order.
    pub results: Vec<BatchResult>,
    /// Aggregate statistics.
    pub stats: BatchStats,
}

/// Extracts the table of contents of many documents in parallel.
///
/// Per-file failures are reported in their `BatchResult`; only invalid
/// shared options fail the whole call. With `continueOnError: false` files
/// are processed in order and the batch stops after the first failure.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const { results, stats } = extractTocBatch(
///   [{ id: 'docs/intro.mdx', source: '# Intro\n\n## Setup' }],
///   { toc: { maxHeadingLevel: 4 } },
/// );
/// console.log(`${stats.succeeded}/${stats.total} in ${stats.processingTimeMs}ms`);
/// ```
#[napi(js_name = "extractTocBatch")]
pub fn extract_toc_batch(
    inputs: Vec<BatchInput>,
    options: Option<BatchOptions>,
) -> napi::Result<BatchProcessingResult> {
    let start = Instant::now();
    let opts = options.unwrap_or_default();
    let continue_on_error = opts.continue_on_error.unwrap_or(true);
    let config = to_toc_config(opts.toc.as_ref()).map_err(convert_error)?;

    let pool = opts.max_threads.and_then(|max_threads| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(max_threads as usize)
            .build()
            .ok()
    });

    let total = inputs.len() as u32;
    let succeeded = AtomicU32::new(0);
    let failed = AtomicU32::new(0);

    let process_input = |input: BatchInput| -> BatchResult {
        let filepath = input.filepath.as_deref().unwrap_or(&input.id);
        let parse = parse_options(opts.toc.as_ref(), Some(filepath));
        match build_page_toc(&input.source, &config, &parse) {
            Ok(page) => {
                succeeded.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id: input.id,
                    result: Some(from_page_toc(page)),
                    error: None,
                }
            }
            Err(e) => {
                let e = e.in_file(filepath);
                failed.fetch_add(1, Ordering::Relaxed);
                log::warn!("toc extraction failed for {}: {}", input.id, e);
                BatchResult {
                    id: input.id,
                    result: None,
                    error: Some(e.to_string()),
                }
            }
        }
    };

    let results: Vec<BatchResult> = if continue_on_error {
        match pool {
            Some(pool) => pool.install(|| inputs.into_par_iter().map(process_input).collect()),
            None => inputs.into_par_iter().map(process_input).collect(),
        }
    } else {
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            let result = process_input(input);
            let had_error = result.error.is_some();
            results.push(result);
            if had_error {
                break;
            }
        }
        results
    };

    Ok(BatchProcessingResult {
        results,
        stats: BatchStats {
            total,
            succeeded: succeeded.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        },
    })
}
