//! A scroll-driven studio landing page in the terminal.
//!
//! Five full-height sections snap one wheel gesture at a time; the About
//! section captures the wheel to page through its topics, and the backdrop
//! and contact panel react to how much of their section is visible.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    sequence_runtime::{spawn_sequence, StageDone},
    state::AppState,
};
use crate::core::content::{Language, StaticContent};
use crate::core::pager::PagerMode;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven studio landing page")]
struct Cli {
    /// Start language: en or kr (overrides the config file).
    #[arg(long, value_parser = parse_language)]
    lang: Option<Language>,

    /// Content JSON to show instead of the bundled content.
    #[arg(long)]
    content: Option<PathBuf>,

    /// About paging at the first/last topic: sticky (a second gesture
    /// confirms leaving) or clamp (leave at once).
    #[arg(long, value_parser = parse_pager, default_value = "sticky")]
    pager: PagerMode,

    /// Write logs to this file (filtered by `RUST_LOG`).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Frame interval in milliseconds.
    #[arg(long, default_value_t = 33)]
    tick_ms: u64,
}

fn parse_language(s: &str) -> Result<Language, String> {
    Language::parse(s).ok_or_else(|| format!("unknown language `{s}` (expected en or kr)"))
}

fn parse_pager(s: &str) -> Result<PagerMode, String> {
    PagerMode::parse(s).ok_or_else(|| format!("unknown pager mode `{s}` (expected sticky or clamp)"))
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal owns stderr, so logs go to a file or nowhere.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false);
    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            subscriber.with_writer(Mutex::new(file)).init();
        }
        None => subscriber.with_writer(io::sink).init(),
    }

    // ── content & config ──────────────────────────────────────
    let content = match &cli.content {
        Some(path) => StaticContent::load(path)
            .with_context(|| format!("cannot load content from {}", path.display()))?,
        None => StaticContent::embedded(),
    };
    let mut user_config = config::AppConfig::load();
    if let Some(lang) = cli.lang {
        user_config.language = lang;
    }
    let language = user_config.language;
    let tick_rate = Duration::from_millis(cli.tick_ms.clamp(8, 500));

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let area = ratatui::layout::Rect::new(0, 0, size.width, size.height);
    let mut state = AppState::new(content, user_config, language, cli.pager, area, Instant::now());
    tracing::info!(
        language = language.code(),
        pager = cli.pager.label(),
        "landing page started"
    );

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(tick_rate);
    let (stage_tx, mut stage_rx) = mpsc::unbounded_channel::<StageDone>();
    let mut language_rx = state.language.subscribe();

    // ── event loop ────────────────────────────────────────────
    loop {
        let now = Instant::now();
        state.page.tick(now);
        for request in state.page.take_requests() {
            spawn_sequence(
                stage_tx.clone(),
                request.section,
                request.generation,
                request.durations,
                request.slot,
            );
        }
        state.expire_notice(now);
        if state.follow_language(&mut language_rx, now) {
            if let Err(e) = state.config.save() {
                tracing::warn!(error = %e, "could not save config");
            }
        }

        let mut hotspots = Vec::new();
        terminal.draw(|frame| hotspots = ui::draw(frame, &state, now))?;
        state.hotspots = hotspots;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                let now = Instant::now();
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k, now),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m, now),
                    AppEvent::Resize(w, h) => state.resize(w, h, now),
                    AppEvent::Tick => {}
                }
            }

            Some(done) = stage_rx.recv() => {
                let now = Instant::now();
                state.page.on_stage_done(done, now);
                // Drain whatever else finished meanwhile before redrawing.
                while let Ok(done) = stage_rx.try_recv() {
                    state.page.on_stage_done(done, now);
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    state.page.disconnect();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
