//! Continuous rebuilds.
//!
//! A [`TaxonomyWatcher`] polls the taxonomy file on a background thread and
//! sends one [`TaxonomyEvent`] per observed change. [`run_watch`] is the single
//! consumer: it rebuilds once per event until the channel closes. Events are
//! not coalesced, so a burst of edits may cause redundant rebuilds; each one
//! still rewrites the whole artifact.

use super::{BuildOptions, build_once};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonomyEvent {
    Changed,
}

/// Counts of rebuild outcomes over the lifetime of a watch loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchReport {
    pub builds: usize,
    pub failures: usize,
}

/// What we compare between polls. `None` means the file could not be stat'ed.
type Fingerprint = Option<(Option<SystemTime>, u64)>;

fn fingerprint(path: &Path) -> Fingerprint {
    fs::metadata(path)
        .ok()
        .map(|meta| (meta.modified().ok(), meta.len()))
}

pub struct TaxonomyWatcher;

impl TaxonomyWatcher {
    /// Starts polling `path` every `interval`.
    ///
    /// The receiver yields an event for every change seen after this call and
    /// is closed once the returned handle is stopped or dropped.
    pub fn spawn(
        path: impl Into<PathBuf>,
        interval: Duration,
    ) -> (WatchHandle, Receiver<TaxonomyEvent>) {
        let path = path.into();
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let mut last = fingerprint(&path);

        let thread = thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                thread::sleep(interval);
                let current = fingerprint(&path);
                if current == last {
                    continue;
                }
                last = current;
                debug!(path = %path.display(), "Taxonomy changed");
                if tx.send(TaxonomyEvent::Changed).is_err() {
                    // Consumer is gone.
                    break;
                }
            }
        });

        (
            WatchHandle {
                stop,
                thread: Some(thread),
            },
            rx,
        )
    }
}

/// Owns the polling thread. Stopping it closes the event channel.
pub struct WatchHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl WatchHandle {
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            join_watcher(thread);
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Waits for the polling thread. Returns `false` if it panicked.
fn join_watcher(thread: JoinHandle<()>) -> bool {
    match thread.join() {
        Ok(()) => true,
        Err(_) => {
            error!("Taxonomy watcher thread panicked");
            false
        }
    }
}

/// Builds once, then rebuilds for every event until `events` is closed.
///
/// A failed build is logged and counted; it never ends the loop.
pub fn run_watch(options: &BuildOptions, events: &Receiver<TaxonomyEvent>) -> WatchReport {
    let mut report = WatchReport::default();
    info!(taxonomy = %options.taxonomy_path.display(), "Watching taxonomy for changes");

    rebuild(options, &mut report);
    for event in events.iter() {
        debug!(?event, "Rebuilding grammar");
        rebuild(options, &mut report);
    }

    info!(builds = report.builds, failures = report.failures, "Watch loop finished");
    report
}

fn rebuild(options: &BuildOptions, report: &mut WatchReport) {
    match build_once(options) {
        Ok(summary) => {
            report.builds += 1;
            for warning in &summary.warnings {
                debug!(%warning, "Category skipped");
            }
        }
        Err(e) => {
            report.failures += 1;
            error!(error = %e, "Grammar build failed, still watching");
        }
    }
}
