//! Live reload of the catalog file.
//!
//! The parent directory is watched (editors often replace files instead of
//! writing them in place) and events are narrowed to the catalog file.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Trailing-edge debounce: fires once `delay` has passed since the last
/// change.
#[derive(Debug, Clone)]
struct ChangeDebounce {
    delay: Duration,
    last_change: Option<Instant>,
}

impl ChangeDebounce {
    const fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_change: None,
        }
    }

    fn note(&mut self, at: Instant) {
        self.last_change = Some(at);
    }

    fn take_ready(&mut self, now: Instant) -> bool {
        match self.last_change {
            Some(at) if now.saturating_duration_since(at) >= self.delay => {
                self.last_change = None;
                true
            }
            _ => false,
        }
    }
}

/// Watches one catalog file and reports debounced changes.
pub struct CatalogWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    target_path: PathBuf,
    target_name: Option<OsString>,
    debounce: ChangeDebounce,
}

impl CatalogWatcher {
    /// Start watching `path`.
    ///
    /// # Errors
    /// Returns an error if the watcher cannot be created or the directory
    /// cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // Event paths from the OS are canonical; match them against ours.
        let target_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let target_name = target_path.file_name().map(std::ffi::OsStr::to_os_string);
        let watch_root = watch_root_for(&target_path);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;
        crate::perf::log_event(
            "watcher.start",
            format!(
                "target={} root={}",
                target_path.display(),
                watch_root.display()
            ),
        );

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            target_path,
            target_name,
            debounce: ChangeDebounce::new(debounce),
        })
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Drain pending events; true once a debounced change is ready.
    pub fn take_change_ready(&mut self) -> bool {
        let mut relevant = 0u32;
        let mut ignored = 0u32;
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.is_relevant(&ev) => relevant += 1,
                Ok(_) => ignored += 1,
                Err(err) => crate::perf::log_event("watcher.error", format!("{err}")),
            }
        }
        if relevant + ignored > 0 {
            crate::perf::log_event(
                "watcher.poll",
                format!(
                    "relevant={relevant} ignored={ignored} target={}",
                    self.target_path.display()
                ),
            );
        }
        let now = Instant::now();
        if relevant > 0 {
            self.debounce.note(now);
        }
        self.debounce.take_ready(now)
    }

    fn is_relevant(&self, event: &Event) -> bool {
        if matches!(event.kind, EventKind::Access(_)) {
            return false;
        }
        event.paths.iter().any(|path| {
            path == &self.target_path
                || path == &self.watch_root
                || self
                    .target_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
