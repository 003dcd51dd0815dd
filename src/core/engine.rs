//! Resolution engine - match resolution, swap protocol and busy guard
//!
//! All resolution work runs as a stack of suspendable tasks advanced by
//! [`ResolutionEngine::tick`]; the only suspension points are the fixed
//! settle delays between pop, gravity and refill steps. A swap-triggered
//! cascade nests on the same stack under the same busy counter, so the
//! `Playing` transition and any pending reshuffle wait for the outermost
//! task to finish.
//!
//! The board is exclusively owned and mutated here; collaborators read it
//! through [`ResolutionEngine::board`] and consume the event queue.

use crate::core::board::Board;
use crate::core::matcher::{find_matches, first_possible_swap, has_any_possible_swap};
use crate::core::rng::{ColorSource, PaletteRng};
use crate::types::{
    Coord, EngineEvent, EngineState, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH,
    DEFAULT_PALETTE_SIZE, DROP_DELAY_MS, POP_DELAY_MS, REFILL_DELAY_MS, REVERT_DELAY_MS,
    SETTLE_DELAY_MS,
};

/// Engine construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub height: usize,
    pub width: usize,
    pub palette_size: u8,
    /// Seed for the default color source.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_BOARD_HEIGHT,
            width: DEFAULT_BOARD_WIDTH,
            palette_size: DEFAULT_PALETTE_SIZE,
            seed: 1,
        }
    }
}

/// Phases of one cascade pass. Wait phases hold a millisecond countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CascadePhase {
    Settle { wait_ms: u32 },
    Pop,
    PopWait { wait_ms: u32 },
    Gravity,
    DropWait { wait_ms: u32 },
    Refill,
    RefillWait { wait_ms: u32 },
    CheckMoves,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwapPhase {
    /// The swap matched; a cascade is running above this task.
    AwaitCascade,
    /// The swap produced no match and is undone once the delay elapses.
    Revert { a: Coord, b: Coord, wait_ms: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Cascade(CascadePhase),
    Swap(SwapPhase),
}

/// Owns a [`Board`] and drives match detection, cascade resolution, the
/// swap/validate/revert protocol, scoring and the busy-state guard.
pub struct ResolutionEngine {
    board: Board,
    colors: Box<dyn ColorSource>,
    palette_size: u8,
    state: EngineState,
    /// Reentrancy counter; `Resolving` while above zero. A counter rather
    /// than a flag: a swap-triggered cascade nests inside the swap task.
    busy: u32,
    pending_reshuffle: bool,
    score: u32,
    /// Task stack; the top task is the one being advanced.
    tasks: Vec<Task>,
    events: Vec<EngineEvent>,
}

impl ResolutionEngine {
    /// Create an engine with a freshly randomized board and queue the
    /// initial cascade, so incidental matches from the random fill are
    /// popped before play begins.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_source(config, Box::new(PaletteRng::new(config.seed)))
    }

    /// Like [`ResolutionEngine::new`] with an injected color source.
    pub fn with_source(config: EngineConfig, colors: Box<dyn ColorSource>) -> Self {
        let mut engine = Self {
            board: Board::new(config.height, config.width),
            colors,
            palette_size: config.palette_size,
            state: EngineState::Playing,
            busy: 0,
            pending_reshuffle: false,
            score: 0,
            tasks: Vec::new(),
            events: Vec::new(),
        };
        engine
            .board
            .randomize(engine.colors.as_mut(), engine.palette_size);
        engine.begin_cascade();
        engine
    }

    /// Resume from a known grid with no initial cascade; scripted boards
    /// for tests and tools enter here.
    pub fn with_board(board: Board, colors: Box<dyn ColorSource>, palette_size: u8) -> Self {
        Self {
            board,
            colors,
            palette_size,
            state: EngineState::Playing,
            busy: 0,
            pending_reshuffle: false,
            score: 0,
            tasks: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue the opening cascade on a board built with
    /// [`ResolutionEngine::with_board`]. No effect while resolving.
    pub fn start(&mut self) {
        if self.busy == 0 {
            self.begin_cascade();
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// True while any resolution task is in flight; input is ignored.
    pub fn is_busy(&self) -> bool {
        self.busy > 0
    }

    /// Drain all pending notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// First legal swap on the current board, if any (the pair an
    /// auto-move agent would play). `None` while resolving.
    pub fn hint(&mut self) -> Option<(Coord, Coord)> {
        if self.is_busy() {
            return None;
        }
        first_possible_swap(&mut self.board)
    }

    /// Wholesale reset: re-randomize the board, set the score to the
    /// caller-supplied value (0 for a new game, the current score when
    /// reshuffling) and restart the initial cascade.
    pub fn reset(&mut self, score: u32) {
        self.tasks.clear();
        self.busy = 0;
        self.pending_reshuffle = false;
        self.score = score;
        self.board
            .randomize(self.colors.as_mut(), self.palette_size);
        self.push_event(EngineEvent::ScoreChanged { score });
        self.begin_cascade();
    }

    /// External entry point for a player (or auto-move) swap request.
    ///
    /// Silently rejected (`false`, board untouched, no events) unless
    /// the engine is idle in `Playing` and the coordinates are two
    /// distinct, in-bounds, orthogonally adjacent cells. An accepted swap
    /// either commits (it produced a match, which cascades) or reverts
    /// after a fixed delay.
    pub fn request_swap(&mut self, a: Coord, b: Coord) -> bool {
        if self.state != EngineState::Playing || self.busy > 0 {
            return false;
        }
        if !self.board.contains(a) || !self.board.contains(b) {
            return false;
        }
        if a == b || !self.board.is_adjacent(a, b) {
            return false;
        }

        self.busy += 1;
        self.set_state(EngineState::Resolving);
        self.board.exchange_colors(a, b);
        self.push_event(EngineEvent::TilesSwapped { a, b });

        if find_matches(&self.board).is_empty() {
            self.tasks.push(Task::Swap(SwapPhase::Revert {
                a,
                b,
                wait_ms: REVERT_DELAY_MS,
            }));
        } else {
            self.tasks.push(Task::Swap(SwapPhase::AwaitCascade));
            self.begin_cascade();
        }
        true
    }

    /// Advance the resolution tasks by `elapsed_ms` of game time.
    ///
    /// Instantaneous phases chain within one call; a still-pending wait
    /// phase consumes the tick. Only the first wait encountered is charged
    /// with the elapsed time.
    pub fn tick(&mut self, elapsed_ms: u32) {
        let mut elapsed = elapsed_ms;
        loop {
            let Some(task) = self.tasks.pop() else {
                return;
            };
            match task {
                Task::Cascade(phase) => {
                    if !self.advance_cascade(phase, &mut elapsed) {
                        return;
                    }
                }
                Task::Swap(SwapPhase::AwaitCascade) => {
                    // the nested cascade above this task has finished;
                    // the swap is committed
                    self.finish_task();
                }
                Task::Swap(SwapPhase::Revert { a, b, wait_ms }) => {
                    let left = wait_ms.saturating_sub(elapsed);
                    elapsed = 0;
                    if left > 0 {
                        self.tasks
                            .push(Task::Swap(SwapPhase::Revert { a, b, wait_ms: left }));
                        return;
                    }
                    self.board.exchange_colors(a, b);
                    self.push_event(EngineEvent::TilesSwapped { a, b });
                    self.finish_task();
                }
            }
        }
    }

    /// Advance one cascade phase. Returns false when the tick is consumed
    /// by a wait that has not yet elapsed.
    fn advance_cascade(&mut self, phase: CascadePhase, elapsed: &mut u32) -> bool {
        use CascadePhase::*;

        match phase {
            Settle { wait_ms } => {
                self.wait_phase(wait_ms, elapsed, |left| Settle { wait_ms: left }, Pop)
            }
            PopWait { wait_ms } => {
                self.wait_phase(wait_ms, elapsed, |left| PopWait { wait_ms: left }, Gravity)
            }
            DropWait { wait_ms } => {
                self.wait_phase(wait_ms, elapsed, |left| DropWait { wait_ms: left }, Refill)
            }
            RefillWait { wait_ms } => self.wait_phase(
                wait_ms,
                elapsed,
                |left| RefillWait { wait_ms: left },
                Pop,
            ),
            Pop => {
                let popped = self.pop_matched();
                let next = if popped > 0 {
                    PopWait {
                        wait_ms: POP_DELAY_MS,
                    }
                } else {
                    CheckMoves
                };
                self.tasks.push(Task::Cascade(next));
                true
            }
            Gravity => {
                let moves = self.board.apply_gravity();
                for &(from, to) in &moves {
                    self.push_event(EngineEvent::TileMoved { from, to });
                }
                let next = if moves.is_empty() {
                    Refill
                } else {
                    DropWait {
                        wait_ms: DROP_DELAY_MS,
                    }
                };
                self.tasks.push(Task::Cascade(next));
                true
            }
            Refill => {
                let spawned = self
                    .board
                    .fill_empty(self.colors.as_mut(), self.palette_size);
                for &at in &spawned {
                    self.push_event(EngineEvent::TileSpawned { at });
                }
                self.tasks.push(Task::Cascade(RefillWait {
                    wait_ms: REFILL_DELAY_MS,
                }));
                true
            }
            CheckMoves => {
                if !has_any_possible_swap(&mut self.board) {
                    self.pending_reshuffle = true;
                }
                self.finish_task();
                true
            }
        }
    }

    /// Count down a wait phase; re-push it while pending, otherwise push
    /// the successor phase.
    fn wait_phase(
        &mut self,
        wait_ms: u32,
        elapsed: &mut u32,
        pending: impl FnOnce(u32) -> CascadePhase,
        next: CascadePhase,
    ) -> bool {
        let left = wait_ms.saturating_sub(*elapsed);
        *elapsed = 0;
        if left > 0 {
            self.tasks.push(Task::Cascade(pending(left)));
            return false;
        }
        self.tasks.push(Task::Cascade(next));
        true
    }

    /// Deactivate every matched tile and account the score: one point per
    /// unique coordinate, overlapping runs never double-counted.
    fn pop_matched(&mut self) -> usize {
        let matches = find_matches(&self.board);
        for &at in matches.coords() {
            self.board.deactivate(at);
            self.push_event(EngineEvent::TilePopped { at });
        }
        if !matches.is_empty() {
            self.score += matches.len() as u32;
            self.push_event(EngineEvent::ScoreChanged { score: self.score });
        }
        matches.len()
    }

    fn begin_cascade(&mut self) {
        self.busy += 1;
        self.set_state(EngineState::Resolving);
        self.tasks.push(Task::Cascade(CascadePhase::Settle {
            wait_ms: SETTLE_DELAY_MS,
        }));
    }

    /// A task finished: drop the busy guard and, only when the outermost
    /// guard is released, perform the deferred transitions.
    fn finish_task(&mut self) {
        self.busy = self.busy.saturating_sub(1);
        if self.busy > 0 {
            return;
        }
        if self.pending_reshuffle {
            self.pending_reshuffle = false;
            self.reshuffle();
        } else {
            self.set_state(EngineState::Playing);
        }
    }

    /// Full board re-randomization (deadlock escape). Score is preserved.
    fn reshuffle(&mut self) {
        self.board
            .randomize(self.colors.as_mut(), self.palette_size);
        self.push_event(EngineEvent::BoardReshuffled);
        self.begin_cascade();
    }

    fn set_state(&mut self, state: EngineState) {
        if self.state != state {
            self.state = state;
            self.push_event(EngineEvent::StateChanged { state });
        }
    }

    fn push_event(&mut self, event: EngineEvent) {
        self.events.push(event);
    }
}
