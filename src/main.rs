//! Bookstack - A terminal browser for curated book catalogs.
//!
//! # Usage
//!
//! ```bash
//! bookstack
//! bookstack catalog.json
//! bookstack --watch catalog.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bookstack::app::App;
use bookstack::catalog::Catalog;
use bookstack::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_card_heights, parse_flag_tokens, save_config_flags,
};
use bookstack::perf;
use bookstack::ui::layout::CellSize;

/// A terminal browser for curated book catalogs
#[derive(Parser, Debug)]
#[command(name = "bookstack", version, about, long_about = None)]
struct Cli {
    /// Catalog JSON file (defaults to the bundled catalog)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Watch the catalog file for changes and auto-reload
    #[arg(short, long)]
    watch: bool,

    /// Do not capture the mouse (keeps terminal text selection)
    #[arg(long)]
    no_mouse: bool,

    /// Enable startup performance logging
    #[arg(long)]
    perf: bool,

    /// Write detailed filter/sticky debug events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Pixel size of one terminal cell, e.g. 10x20
    #[arg(long, value_name = "WxH", value_parser = cell_size_arg)]
    cell_size: Option<CellSize>,

    /// Scroll distance in pixels ignored by the direction tracker
    #[arg(long, value_name = "PX")]
    dead_zone: Option<u32>,

    /// Scroll offset in pixels past which the header may pin
    #[arg(long, value_name = "PX")]
    pin_offset: Option<i64>,

    /// Card height estimates per breakpoint, widest first, e.g. 280,260,240,220
    #[arg(long, value_name = "A,B,C,D", value_parser = card_heights_arg)]
    card_heights: Option<[i32; 4]>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn cell_size_arg(s: &str) -> Result<CellSize, String> {
    CellSize::parse(s).ok_or_else(|| format!("expected WxH with positive sizes, got {s:?}"))
}

fn card_heights_arg(s: &str) -> Result<[i32; 4], String> {
    parse_card_heights(s).ok_or_else(|| format!("expected four positive heights, got {s:?}"))
}

fn load_catalog(file: Option<&PathBuf>) -> Result<Catalog> {
    let Some(path) = file else {
        return Catalog::bundled().context("Bundled catalog is malformed");
    };
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    Catalog::load(path).with_context(|| format!("Failed to load catalog {}", path.display()))
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    tracing::debug!(?effective, "effective flags");

    perf::set_enabled(effective.perf);
    let debug_log_path = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("BOOKSTACK_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(debug_log_path.as_deref()) {
        eprintln!(
            "[warn] Failed to initialize debug log {}: {}",
            debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    let catalog = {
        let _load_scope = perf::scope("catalog.load");
        load_catalog(cli.file.as_ref())?
    };
    let catalog_path = cli
        .file
        .as_ref()
        .map(|p| std::fs::canonicalize(p).unwrap_or_else(|_| p.clone()));

    // Run the application
    let mut app = App::new(catalog, catalog_path)
        .with_watch(effective.watch)
        .with_mouse(!effective.no_mouse)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );
    if let Some(cell_size) = effective.cell_size {
        app = app.with_cell_size(cell_size);
    }
    if let Some(heights) = effective.card_heights {
        app = app.with_card_heights(heights);
    }
    if let Some(dead_zone) = effective.dead_zone {
        app = app.with_dead_zone(dead_zone);
    }
    if let Some(pin_offset) = effective.pin_offset {
        app = app.with_pin_offset(pin_offset);
    }

    app.run().context("Application error")
}
