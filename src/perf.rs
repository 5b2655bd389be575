//! Timing scopes and the catalog debug log.
//!
//! [`scope`] timings go to stderr when enabled with `--perf`. Filter, threshold
//! and sticky-header changes are written as [`CatalogEvent`]s to the file set
//! with `--debug-log`, one line each, next to free-form [`log_event`] lines
//! from the event loop and watcher.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::catalog::FilterSelection;
use crate::sticky::{StickyInputs, StickyState, ViewportGeometry};

static TIMINGS: AtomicBool = AtomicBool::new(false);
static DEBUG_LOG: LazyLock<Mutex<DebugLog>> = LazyLock::new(|| Mutex::new(DebugLog::closed()));

/// A state change of the filter pipeline or the sticky header.
#[derive(Debug, Clone, Copy)]
pub enum CatalogEvent<'a> {
    /// The filtered result count changed.
    Filtered {
        selection: &'a FilterSelection,
        query: &'a str,
        count: usize,
    },
    /// A new viewport geometry moved the pinning threshold.
    Threshold {
        geometry: ViewportGeometry,
        min_results: usize,
    },
    Transition {
        from: StickyState,
        to: StickyState,
        inputs: &'a StickyInputs,
    },
    Reloaded { topics: usize, items: usize },
}

impl CatalogEvent<'_> {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Filtered { .. } => "filter.recompute",
            Self::Threshold { .. } => "sticky.threshold",
            Self::Transition { .. } => "sticky.transition",
            Self::Reloaded { .. } => "reload.ok",
        }
    }
}

impl fmt::Display for CatalogEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filtered {
                selection,
                query,
                count,
            } => write!(f, "selection=[{selection}] query={query:?} count={count}"),
            Self::Threshold {
                geometry,
                min_results,
            } => write!(
                f,
                "geometry={}x{} min_results={min_results}",
                geometry.width, geometry.height
            ),
            Self::Transition { from, to, inputs } => write!(
                f,
                "from={} to={} offset={} filtered={} min_results={}",
                from.label(),
                to.label(),
                inputs.scroll_offset,
                inputs.filtered_count,
                inputs.min_results
            ),
            Self::Reloaded { topics, items } => write!(f, "topics={topics} items={items}"),
        }
    }
}

/// Prints its elapsed time on drop while timings are enabled.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if is_enabled() {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            eprintln!("[perf] {}: {ms:.2} ms", self.name);
        }
    }
}

#[derive(Debug)]
struct DebugLog {
    opened_at: Instant,
    writer: Option<BufWriter<File>>,
}

impl DebugLog {
    fn closed() -> Self {
        Self {
            opened_at: Instant::now(),
            writer: None,
        }
    }

    fn write_line(&mut self, name: &str, detail: &dyn fmt::Display) {
        let ms = self.opened_at.elapsed().as_secs_f64() * 1000.0;
        if let Some(writer) = self.writer.as_mut() {
            let _ = writeln!(writer, "[{ms:>10.3} ms] {name}: {detail}");
            let _ = writer.flush();
        }
    }
}

// A panic while logging must not disable logging for the rest of the run.
fn debug_log() -> MutexGuard<'static, DebugLog> {
    DEBUG_LOG.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn set_enabled(enabled: bool) {
    TIMINGS.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    TIMINGS.load(Ordering::Relaxed)
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

/// Start (or, with `None`, stop) writing debug events to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn set_debug_log_path(path: Option<&Path>) -> std::io::Result<()> {
    let mut log = debug_log();
    let Some(path) = path else {
        log.writer = None;
        return Ok(());
    };
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "bookstack debug log start")?;
    writer.flush()?;
    log.opened_at = Instant::now();
    log.writer = Some(writer);
    Ok(())
}

pub fn is_debug_log_enabled() -> bool {
    debug_log().writer.is_some()
}

pub fn log_event(name: &str, detail: impl AsRef<str>) {
    debug_log().write_line(name, &detail.as_ref());
}

/// Write a catalog state change to the debug log, if one is open.
pub fn record(event: &CatalogEvent<'_>) {
    debug_log().write_line(event.name(), event);
}
