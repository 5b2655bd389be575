use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::sticky::{HeaderEvent, HeaderSignals, SignalSurface};
use crate::watcher::CatalogWatcher;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Terminal-backed display surface plus the header's subscriptions to it.
///
/// Fields drop in declaration order, so the subscriptions are released
/// before the surface goes away.
pub(super) struct HeaderWiring {
    signals: HeaderSignals,
    surface: SignalSurface,
}

impl HeaderWiring {
    pub(super) fn attach(model: &Model) -> Self {
        let surface = SignalSurface::new(
            model.viewport.surface_geometry(),
            model.viewport.offset_px(),
        );
        let signals = HeaderSignals::attach(&surface, &surface);
        Self { signals, surface }
    }

    /// Publish the model's scroll offset and feed queued observations back
    /// as messages until the offset settles.
    pub(super) fn pump(&self, model: &mut Model) {
        loop {
            self.surface.publish_scroll(model.viewport.offset_px());
            let events = self.signals.drain();
            if events.is_empty() {
                break;
            }
            for event in events {
                let msg = match event {
                    HeaderEvent::Resized(geometry) => Message::ViewportGeometry(geometry),
                    HeaderEvent::Scrolled(offset) => Message::ScrollSample(offset),
                };
                *model = update(std::mem::take(model), msg);
            }
        }
    }

    pub(super) fn resized(&self, model: &mut Model) {
        self.surface.publish_resize(model.viewport.surface_geometry());
        self.pump(model);
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: bookstack requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        let mut model = Model::new(
            std::mem::take(&mut self.catalog),
            self.catalog_path.clone(),
            (size.width, size.height),
        )
        .with_cell_size(self.cell_size)
        .with_thresholds(self.thresholds.clone())
        .with_dead_zone(self.dead_zone)
        .with_pin_offset(self.pin_offset);
        model.watch_enabled = self.watch_enabled;
        model.mouse_enabled = self.mouse_enabled;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        crate::perf::log_event(
            "init.layout",
            format!(
                "terminal={}x{} geometry={}x{} min_results={} filtered={}",
                size.width,
                size.height,
                model.geometry().width,
                model.geometry().height,
                model.min_results(),
                model.filtered_count()
            ),
        );

        let result = Self::event_loop(&mut terminal, &mut model);

        // Restore terminal
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn dispatch(
        model: &mut Model,
        msg: Message,
        catalog_watcher: &mut Option<CatalogWatcher>,
        wiring: &HeaderWiring,
    ) {
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, catalog_watcher, &side_msg);
        wiring.pump(model);
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut catalog_watcher = if model.watch_enabled {
            Self::start_watching(model)
        } else {
            None
        };
        let wiring = HeaderWiring::attach(model);
        wiring.pump(model);

        let mut frame_idx: u64 = 0;
        let mut needs_render = true;
        if model.mouse_enabled {
            execute!(stdout(), EnableMouseCapture)?;
        }

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                crate::perf::log_event(
                    "event.resize.apply",
                    format!("frame={frame_idx} width={width} height={height}"),
                );
                *model = update(std::mem::take(model), Message::Resize(width, height));
                wiring.resized(model);
                needs_render = true;
            }

            if model.watch_enabled
                && catalog_watcher
                    .as_mut()
                    .is_some_and(CatalogWatcher::take_change_ready)
            {
                Self::dispatch(model, Message::FileChanged, &mut catalog_watcher, &wiring);
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Refresh timestamp after poll wait so the debouncer uses accurate times.
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                let msg =
                    Self::handle_event(&event::read()?, model, event_ms, &mut resize_debouncer);
                if let Some(msg) = msg {
                    crate::perf::log_event(
                        "event.message",
                        format!("frame={frame_idx} msg={msg:?}"),
                    );
                    Self::dispatch(model, msg, &mut catalog_watcher, &wiring);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                let mut drained = 0_u32;
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    let msg =
                        Self::handle_event(&event::read()?, model, drain_ms, &mut resize_debouncer);
                    if let Some(msg) = msg {
                        drained += 1;
                        Self::dispatch(model, msg, &mut catalog_watcher, &wiring);
                        needs_render = true;
                    }
                }
                if drained > 0 {
                    crate::perf::log_event(
                        "event.drain",
                        format!("frame={frame_idx} drained={drained}"),
                    );
                }
            }

            if needs_render {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| Self::view(model, frame))?;
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={} draw_ms={:.3} offset={} sticky={}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0,
                        model.viewport.offset(),
                        model.sticky_state().label()
                    ),
                );
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        if model.mouse_enabled {
            let _ = execute!(stdout(), DisableMouseCapture);
        }
        Ok(())
    }
}
