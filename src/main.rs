//! Terminal match-3 runner (default binary).
//!
//! Uses crossterm for input and a line-based renderer. The resolution
//! engine is advanced on a fixed tick; key presses between ticks map to
//! cursor movement and swap requests.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tile_match::core::{EngineConfig, PaletteRng, ResolutionEngine};
use tile_match::input::{handle_key_event, should_quit};
use tile_match::term::{GameView, TerminalRenderer};
use tile_match::types::{Coord, EngineEvent, GameAction, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let config = EngineConfig::default();
    let mut engine =
        ResolutionEngine::with_source(config, Box::new(PaletteRng::from_entropy()));

    let view = GameView::new();
    let mut cursor = Coord::new(0, 0);
    let mut selected: Option<Coord> = None;
    let mut hint: Option<(Coord, Coord)> = None;

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let lines = view.render(&engine, cursor, selected, hint);
        term.draw(&lines)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        apply_action(
                            action,
                            &mut engine,
                            &mut cursor,
                            &mut selected,
                            &mut hint,
                        );
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            engine.tick(TICK_MS);

            for event in engine.take_events() {
                // Any board mutation invalidates the shown hint.
                hint = None;
                if matches!(event, EngineEvent::BoardReshuffled) {
                    selected = None;
                }
            }
        }
    }
}

fn apply_action(
    action: GameAction,
    engine: &mut ResolutionEngine,
    cursor: &mut Coord,
    selected: &mut Option<Coord>,
    hint: &mut Option<(Coord, Coord)>,
) {
    if action != GameAction::Hint {
        *hint = None;
    }

    let board = engine.board();
    match action {
        GameAction::CursorUp => {
            if cursor.row + 1 < board.height() {
                cursor.row += 1;
            }
        }
        GameAction::CursorDown => {
            cursor.row = cursor.row.saturating_sub(1);
        }
        GameAction::CursorLeft => {
            cursor.col = cursor.col.saturating_sub(1);
        }
        GameAction::CursorRight => {
            if cursor.col + 1 < board.width() {
                cursor.col += 1;
            }
        }
        GameAction::Select => match *selected {
            None => *selected = Some(*cursor),
            Some(at) if at == *cursor => *selected = None,
            Some(at) => {
                if board.is_adjacent(at, *cursor) {
                    engine.request_swap(at, *cursor);
                    *selected = None;
                } else {
                    *selected = Some(*cursor);
                }
            }
        },
        GameAction::Hint => {
            *hint = engine.hint();
            if let Some((a, _)) = *hint {
                *cursor = a;
            }
        }
        GameAction::Restart => {
            engine.reset(0);
            *selected = None;
        }
    }
}
