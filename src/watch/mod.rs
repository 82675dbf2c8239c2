//! Watch mode: rebuild whenever a stylesheet in the source directory changes
//!
//! Notifications arrive on a channel and are handled one at a time, so a
//! rebuild always runs to completion before the next event is looked at.
//! There is no debouncing.

use std::fs;
use std::path::Path;
use std::sync::mpsc::{self, Receiver};

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::build::{Aggregator, BuildError, BuildReport};
use crate::config::BuildConfig;

/// Build once, then rebuild on every stylesheet change until the process exits
///
/// A failure of the first build is returned before anything is watched;
/// only later rebuild failures are survived.
pub fn watch(aggregator: &Aggregator) -> Result<()> {
    let config = aggregator.config();

    let report = aggregator.build().context("Stylesheet build failed")?;
    for line in report.summary_lines(config) {
        println!("{}", line);
    }

    let source_dir = fs::canonicalize(&config.source_dir).with_context(|| {
        format!(
            "Failed to resolve source directory: {}",
            config.source_dir.display()
        )
    })?;

    let (tx, rx) = mpsc::channel();
    let mut watcher =
        notify::recommended_watcher(tx).context("Failed to create filesystem watcher")?;
    watcher
        .watch(&source_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", source_dir.display()))?;

    println!("\nWatching for changes...");
    tracing::info!(source_dir = %source_dir.display(), "Watching for changes");

    // The watcher owns the sender, so this only returns if it is dropped.
    let rebuilds = watch_loop(rx, &source_dir, config, || aggregator.build());
    tracing::debug!(rebuilds, "Watch loop ended");

    Ok(())
}

/// Dispatch filesystem events to `rebuild` until the channel closes
///
/// Returns the number of rebuilds performed. A failed rebuild is reported
/// and the loop keeps going.
pub fn watch_loop<F>(
    events: Receiver<notify::Result<Event>>,
    source_dir: &Path,
    config: &BuildConfig,
    mut rebuild: F,
) -> usize
where
    F: FnMut() -> Result<BuildReport, BuildError>,
{
    let mut rebuilds = 0;

    for result in events {
        let event = match result {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "Filesystem watcher error");
                continue;
            }
        };

        let Some(changed) = changed_stylesheet(&event, source_dir, config) else {
            tracing::trace!(kind = ?event.kind, paths = ?event.paths, "Ignoring event");
            continue;
        };

        println!("\n{} changed, rebuilding...", changed);
        report_build(rebuild(), config);
        rebuilds += 1;
    }

    rebuilds
}

/// Name of the stylesheet an event touched, if it should trigger a rebuild
///
/// Access notifications are ignored since reading the fragments during a
/// build would otherwise retrigger it. Only files directly inside
/// `source_dir` with the configured extension count.
pub fn changed_stylesheet(
    event: &Event,
    source_dir: &Path,
    config: &BuildConfig,
) -> Option<String> {
    if matches!(event.kind, EventKind::Access(_)) {
        return None;
    }

    event.paths.iter().find_map(|path| {
        if path.parent() != Some(source_dir) {
            return None;
        }
        let name = path.file_name()?.to_str()?;
        config.is_stylesheet(name).then(|| name.to_string())
    })
}

/// Print the outcome of a build without propagating failures
fn report_build(result: Result<BuildReport, BuildError>, config: &BuildConfig) {
    match result {
        Ok(report) => {
            for line in report.summary_lines(config) {
                println!("{}", line);
            }
        }
        Err(e) => {
            tracing::error!(path = %e.path().display(), error = %e, "Build failed");
            eprintln!("Build error: {}", e);
        }
    }
}
