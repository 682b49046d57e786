//! Terminal runner (default binary).
//!
//! `polyfall` plays a game in the terminal; `polyfall shapes` prints the
//! generated shape universe as JSON. See [`polyfall::config`] for the
//! environment variables that shape the board and [`polyfall::logging`] for
//! log output.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use polyfall::cli::{parse_args, shapes_json, Command};
use polyfall::config::RunConfig;
use polyfall::core::{Board, BoardSnapshot};
use polyfall::input::{handle_key_event, should_quit};
use polyfall::logging;
use polyfall::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};
use polyfall::types::GameAction;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let level = logging::level_from_str(std::env::var("POLYFALL_LOG").ok().as_deref());
    match parse_args(&args)? {
        Command::Shapes(shapes) => {
            logging::init_stderr(level)?;
            println!("{}", shapes_json(&shapes)?);
            Ok(())
        }
        Command::Play => {
            if let Ok(path) = std::env::var("POLYFALL_LOG_FILE") {
                logging::init_file(path.trim(), level)?;
            }
            let config = RunConfig::load()?;
            let mut board =
                Board::new(config.board.clone()).context("invalid board configuration")?;

            let mut term = TerminalRenderer::new();
            term.enter()?;

            let result = run(&mut term, &mut board, &config);

            // Always try to restore terminal state.
            let _ = term.exit();
            result
        }
    }
}

fn run(term: &mut TerminalRenderer, board: &mut Board, config: &RunConfig) -> Result<()> {
    board.reset();
    board.set_fall_interval(config.fall_interval_secs);

    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = BoardSnapshot::default();

    let tick_duration = Duration::from_millis(config.tick_ms.max(1));
    let mut last_tick = Instant::now();

    loop {
        // Render.
        board.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        board.apply_action(action);
                        if action == GameAction::Reset {
                            // Reset disables gravity; restore the configured speed.
                            board.set_fall_interval(config.fall_interval_secs);
                        }
                    }
                }
            }
        }

        // Tick: exactly one update per frame with the real elapsed time.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            board.update(elapsed.as_secs_f64());
        }
    }
}
