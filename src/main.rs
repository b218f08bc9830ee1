//! Terminal blockfall runner (default binary).
//!
//! Reads `BLOCKFALL_*` configuration, optionally logs to a file, then runs the
//! fixed-tick game loop: poll input until the next tick deadline, build one
//! intent per tick, advance the controller and redraw.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use blockfall::config::Config;
use blockfall::core::{tick_interval_ms, GameController, RenderSnapshot};
use blockfall::input::{map_key, should_quit, InputHandler, KeyCommand};
use blockfall::logging;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = Config::from_env()?;
    let _log_guard = match &config.log_dir {
        Some(dir) => Some(logging::init(dir)?),
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let seed = config.seed_or_random();
    info!(seed, das_ms = config.das_ms, arr_ms = config.arr_ms, "starting");

    let mut game = GameController::new(seed);
    let mut input = InputHandler::with_config(config.das_ms, config.arr_ms);

    let view = GameView::default();
    let mut snap = RenderSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut dirty = true;

    let mut last_tick = Instant::now();

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            game.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        let interval_ms = tick_interval_ms(game.tick_rate());
        let tick_duration = Duration::from_millis(u64::from(interval_ms));
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            info!(score = game.score(), lines = game.lines(), "quit");
                            return Ok(());
                        }
                        match map_key(key) {
                            Some(KeyCommand::Reset) => {
                                game.reset();
                                input.reset();
                                dirty = true;
                            }
                            Some(command) => input.press(command),
                            None => {}
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(command) = map_key(key) {
                            input.release(command);
                        }
                    }
                },
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(input.next_intent(interval_ms));
            dirty = true;
        }
    }
}
