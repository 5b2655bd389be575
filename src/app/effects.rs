use std::path::Path;
use std::time::Duration;

use crate::app::{App, Message, Model, ToastLevel};
use crate::perf::CatalogEvent;
use crate::watcher::CatalogWatcher;

impl App {
    pub(super) fn make_catalog_watcher(path: &Path) -> notify::Result<CatalogWatcher> {
        CatalogWatcher::new(path, Duration::from_millis(200))
    }

    /// Start watching the model's catalog file, or explain why not.
    pub(super) fn start_watching(model: &mut Model) -> Option<CatalogWatcher> {
        let Some(path) = model.catalog_path.clone() else {
            model.watch_enabled = false;
            model.show_toast(ToastLevel::Warning, "Nothing to watch: bundled catalog");
            return None;
        };
        match Self::make_catalog_watcher(&path) {
            Ok(watcher) => Some(watcher),
            Err(err) => {
                model.watch_enabled = false;
                model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
                crate::perf::log_event(
                    "watcher.error",
                    format!("failed path={} err={err}", path.display()),
                );
                None
            }
        }
    }

    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        catalog_watcher: &mut Option<CatalogWatcher>,
        msg: &Message,
    ) {
        match msg {
            Message::ToggleWatch => {
                if model.watch_enabled {
                    *catalog_watcher = Self::start_watching(model);
                    if catalog_watcher.is_some() {
                        model.show_toast(ToastLevel::Info, "Watching catalog changes");
                    }
                } else {
                    *catalog_watcher = None;
                    model.show_toast(ToastLevel::Info, "Watch disabled");
                }
            }
            Message::ForceReload | Message::FileChanged => {
                if let Err(err) = model.reload_from_disk() {
                    model.show_toast(ToastLevel::Error, format!("Reload failed: {err}"));
                    crate::perf::log_event("reload.error", format!("err={err}"));
                } else {
                    crate::perf::record(&CatalogEvent::Reloaded {
                        topics: model.catalog.categories().len(),
                        items: model.catalog.item_count(),
                    });
                    if matches!(msg, Message::ForceReload) {
                        model.show_toast(ToastLevel::Info, "Reloaded");
                    }
                }
            }
            Message::OpenFirstVisibleLink => Self::open_first_visible_link(model),
            _ => {}
        }
    }

    fn open_first_visible_link(model: &mut Model) {
        let Some((title, url)) = first_visible_link(model) else {
            model.show_toast(ToastLevel::Info, "No visible resource link");
            return;
        };
        match open_external_link(&url) {
            Ok(()) => model.show_toast(ToastLevel::Info, format!("Opened {title}")),
            Err(err) => model.show_toast(ToastLevel::Error, format!("Open failed: {err}")),
        }
    }
}

/// Title and link of the first card whose top edge is on screen.
pub(super) fn first_visible_link(model: &Model) -> Option<(String, String)> {
    let top = model.viewport.offset();
    let bottom = top + usize::from(model.viewport.height());
    let index = model.layout.first_card_from(top)?;
    let (line, _) = model.layout.card_position(index);
    if line >= bottom {
        return None;
    }
    let matched = model.matched();
    let item = matched.get(index)?.item;
    if item.resource_link.trim().is_empty() {
        return None;
    }
    Some((item.title.clone(), item.resource_link.clone()))
}

fn open_external_link(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()?
            .wait()?;
        Ok(())
    }
    #[cfg(target_os = "windows")]
    {
        use std::process::Stdio;
        std::process::Command::new("cmd")
            .args(["/C", "start", "", url])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        return Ok(());
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()?
            .wait()?;
        Ok(())
    }
}
