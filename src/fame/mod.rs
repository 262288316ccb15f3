//! Code ownership statistics: who owns how many lines, from how many
//! commits, across how many files.
//!
//! Each selected file is blamed (`git blame --porcelain`) on a bounded
//! worker pool. The per-file results are folded into one `Aggregator`
//! sequentially, so every merge is atomic. A failure anywhere aborts the
//! run before anything is printed.

pub mod aggregator;
pub mod parser;
pub mod rank;
pub mod report;

use std::io;
use std::path::PathBuf;

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::info;

use crate::config::Settings;
use crate::error::Result;
use crate::files::FileFilter;
use crate::git::{GitRepo, History, Identity};
use aggregator::Aggregator;
use parser::{FileBlame, blame_file};
use rank::rank;
use report::write_report;

/// Blame every file in `files` with at most `jobs` workers and merge the
/// results in listing order.
pub fn collect(
    history: &dyn History,
    files: &[PathBuf],
    identity: Identity,
    jobs: usize,
) -> Result<Aggregator> {
    let pool = ThreadPoolBuilder::new().num_threads(jobs).build()?;
    let blames: Vec<FileBlame> = pool.install(|| {
        files
            .par_iter()
            .map(|path| blame_file(history, path, identity))
            .collect::<Result<Vec<_>>>()
    })?;

    let mut aggregator = Aggregator::new();
    for blame in blames {
        aggregator.merge(blame)?;
    }
    Ok(aggregator)
}

/// Run the analysis described by `settings` and print the ranked authors.
pub fn run(settings: &Settings) -> Result<()> {
    let filter = FileFilter::new(
        &settings.extensions,
        &settings.languages,
        &settings.exclude,
        &settings.restrict_to,
    )?;

    let repo = GitRepo::open(&settings.repository)?;
    let files = filter.apply(repo.list_files(&settings.revision)?);
    info!(
        root = %repo.root().display(),
        revision = %settings.revision,
        files = files.len(),
        "blaming files"
    );

    let history = repo.history(&settings.revision);
    let aggregator = collect(&history, &files, settings.identity, settings.jobs)?;
    aggregator.ensure_resolved()?;

    let authors = rank(aggregator.reduce(), settings.order_by);
    info!(authors = authors.len(), "ranked authors");

    let mut out = io::stdout().lock();
    write_report(&mut out, settings.format, &authors, &aggregator.totals())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
