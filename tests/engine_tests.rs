//! Engine tests - cascade phases, swap protocol, scoring and reshuffle

use tile_match::core::{Board, ColorSource, EngineConfig, ResolutionEngine};
use tile_match::types::{Coord, EngineEvent, EngineState, SETTLE_DELAY_MS};

/// Deals a fixed sequence of colors, cycling when exhausted.
struct Script {
    seq: Vec<u8>,
    pos: usize,
}

impl Script {
    fn new(seq: &[u8]) -> Self {
        Self {
            seq: seq.to_vec(),
            pos: 0,
        }
    }
}

impl ColorSource for Script {
    fn next_color_index(&mut self, _palette_size: u8) -> u8 {
        let color = self.seq[self.pos % self.seq.len()];
        self.pos += 1;
        color
    }
}

fn engine_with(rows: &[&[u8]], script: &[u8]) -> ResolutionEngine {
    ResolutionEngine::with_board(Board::from_rows(rows), Box::new(Script::new(script)), 7)
}

/// Drive ticks until every resolution task has finished.
fn run_until_idle(engine: &mut ResolutionEngine) {
    for _ in 0..256 {
        if !engine.is_busy() {
            return;
        }
        engine.tick(SETTLE_DELAY_MS);
    }
    panic!("engine never settled");
}

#[test]
fn test_new_engine_resolves_initial_board() {
    let mut engine = ResolutionEngine::new(EngineConfig::default());
    assert!(engine.is_busy());
    assert_eq!(engine.state(), EngineState::Resolving);

    run_until_idle(&mut engine);
    assert_eq!(engine.state(), EngineState::Playing);
    // a playable board has no leftover matches and at least one legal swap
    assert!(engine.board().all_active());
    assert!(engine.hint().is_some());
}

#[test]
fn test_cascade_pop_gravity_refill_sequence() {
    // Row 0 holds a ready-made horizontal triple of color 0.
    let mut engine = engine_with(
        &[&[0, 0, 0, 1], &[1, 2, 2, 0], &[2, 0, 1, 2], &[1, 2, 0, 1]],
        &[0, 0, 1],
    );
    engine.start();
    assert!(engine.is_busy());

    // First settle delay elapses and the triple pops.
    engine.tick(SETTLE_DELAY_MS);
    for col in 0..3 {
        assert!(!engine.board().get(Coord::new(0, col)).unwrap().active);
    }
    assert!(engine.board().get(Coord::new(0, 3)).unwrap().active);
    assert_eq!(engine.score(), 3);

    run_until_idle(&mut engine);

    // Columns slid down one and the top row was refilled from the script.
    assert_eq!(
        engine.board().color_rows(),
        vec![
            vec![1, 2, 2, 1],
            vec![2, 0, 1, 0],
            vec![1, 2, 0, 2],
            vec![0, 0, 1, 1],
        ]
    );
    assert!(engine.board().all_active());
    assert_eq!(engine.state(), EngineState::Playing);
    assert_eq!(engine.score(), 3);

    let events = engine.take_events();
    assert!(!events.contains(&EngineEvent::BoardReshuffled));
    assert!(events.contains(&EngineEvent::TilePopped { at: Coord::new(0, 0) }));
    assert!(events.contains(&EngineEvent::TileSpawned { at: Coord::new(3, 0) }));
}

#[test]
fn test_swap_with_match_commits_and_scores() {
    let mut engine = engine_with(
        &[&[1, 2, 2, 1], &[2, 0, 1, 0], &[1, 2, 0, 2], &[0, 0, 1, 1]],
        &[2, 3, 2],
    );

    // Swapping (2,2) and (3,2) lines up row 3 as 0 0 0.
    assert!(engine.request_swap(Coord::new(2, 2), Coord::new(3, 2)));
    assert_eq!(engine.state(), EngineState::Resolving);

    // Further input is ignored while resolving.
    assert!(!engine.request_swap(Coord::new(0, 0), Coord::new(0, 1)));

    run_until_idle(&mut engine);
    assert_eq!(engine.score(), 3);
    assert_eq!(engine.state(), EngineState::Playing);
    assert_eq!(
        engine.board().color_rows(),
        vec![
            vec![1, 2, 2, 1],
            vec![2, 0, 1, 0],
            vec![1, 2, 1, 2],
            vec![2, 3, 2, 1],
        ]
    );
}

#[test]
fn test_swap_without_match_reverts() {
    let rows: &[&[u8]] = &[&[0, 1, 0], &[1, 0, 1], &[0, 1, 0]];
    let mut engine = engine_with(rows, &[0]);
    let before = engine.board().color_rows();

    assert!(engine.request_swap(Coord::new(0, 0), Coord::new(0, 1)));
    assert_eq!(engine.state(), EngineState::Resolving);

    // Mid-delay the swap is still applied and input stays blocked.
    engine.tick(100);
    assert_ne!(engine.board().color_rows(), before);
    assert!(!engine.request_swap(Coord::new(1, 0), Coord::new(1, 1)));

    run_until_idle(&mut engine);
    assert_eq!(engine.board().color_rows(), before);
    assert_eq!(engine.state(), EngineState::Playing);
    assert_eq!(engine.score(), 0);

    // One swap event out, one back.
    let swaps = engine
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, EngineEvent::TilesSwapped { .. }))
        .count();
    assert_eq!(swaps, 2);
}

#[test]
fn test_swap_request_validation() {
    let mut engine = engine_with(&[&[0, 1, 0], &[1, 0, 1], &[0, 1, 0]], &[0]);

    // same cell
    assert!(!engine.request_swap(Coord::new(1, 1), Coord::new(1, 1)));
    // diagonal
    assert!(!engine.request_swap(Coord::new(0, 0), Coord::new(1, 1)));
    // distance two
    assert!(!engine.request_swap(Coord::new(0, 0), Coord::new(0, 2)));
    // out of bounds
    assert!(!engine.request_swap(Coord::new(0, 0), Coord::new(0, 3)));

    assert_eq!(engine.state(), EngineState::Playing);
    assert!(engine.take_events().is_empty());
}

#[test]
fn test_deadlock_triggers_reshuffle_and_keeps_score() {
    // The refill after the pop leaves a deadlocked checkerboard; the
    // reshuffle then deals a playable grid from the same script.
    let mut engine = engine_with(
        &[&[0, 1, 0], &[1, 0, 0], &[0, 0, 1]],
        &[0, 1, 0, 0, 0, 1, 1, 2, 0, 2, 1, 2],
    );

    assert!(engine.request_swap(Coord::new(2, 2), Coord::new(1, 2)));
    run_until_idle(&mut engine);

    assert!(engine.take_events().contains(&EngineEvent::BoardReshuffled));
    assert_eq!(engine.score(), 3);
    assert_eq!(engine.state(), EngineState::Playing);
    assert_eq!(
        engine.board().color_rows(),
        vec![vec![0, 0, 1], vec![1, 2, 0], vec![2, 1, 2]]
    );
    assert!(engine.hint().is_some());
}

#[test]
fn test_cascade_chain_scores_each_pop() {
    // The swap pops row 0; the refill then completes a vertical triple in
    // column 1, which pops in a second pass.
    let mut engine = engine_with(
        &[&[0, 0, 1], &[2, 2, 0], &[1, 1, 2], &[2, 1, 0]],
        &[0, 1, 2, 0, 2, 0],
    );

    assert!(engine.request_swap(Coord::new(0, 2), Coord::new(1, 2)));
    run_until_idle(&mut engine);

    assert_eq!(engine.score(), 6);
    assert_eq!(engine.state(), EngineState::Playing);
    assert_eq!(
        engine.board().color_rows(),
        vec![
            vec![2, 2, 1],
            vec![1, 0, 2],
            vec![2, 2, 0],
            vec![0, 0, 2],
        ]
    );

    let scores: Vec<u32> = engine
        .take_events()
        .into_iter()
        .filter_map(|e| match e {
            EngineEvent::ScoreChanged { score } => Some(score),
            _ => None,
        })
        .collect();
    assert_eq!(scores, vec![3, 6]);
}

#[test]
fn test_reset_restarts_with_given_score() {
    let mut engine = engine_with(
        &[&[0, 1, 0], &[1, 0, 1], &[0, 1, 0]],
        &[0, 1, 0, 1, 0, 1, 0, 1, 1],
    );

    engine.reset(42);
    assert_eq!(engine.score(), 42);
    assert!(engine.is_busy());

    run_until_idle(&mut engine);
    // reset re-deals the whole board from the source; the new deal has no
    // matches, so the score is untouched
    assert_eq!(
        engine.board().color_rows(),
        vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 1]]
    );
    assert_eq!(engine.score(), 42);
}

#[test]
fn test_hint_is_none_while_resolving() {
    let mut engine = engine_with(
        &[&[1, 2, 2, 1], &[2, 0, 1, 0], &[1, 2, 0, 2], &[0, 0, 1, 1]],
        &[2, 3, 2],
    );

    assert!(engine.hint().is_some());
    assert!(engine.request_swap(Coord::new(2, 2), Coord::new(3, 2)));
    assert!(engine.hint().is_none());

    run_until_idle(&mut engine);
    assert!(engine.hint().is_some());
}
