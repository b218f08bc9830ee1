//! Game controller - the session state machine
//!
//! Ties the board, the active piece and the next queue together and advances
//! them one tick at a time from already-debounced [`Intent`]s.
//!
//! Per tick while playing:
//! 1. A frozen board ends the session.
//! 2. While rows flash, only the flash counts down; on expiry the rows are
//!    committed, scored and the next piece spawns.
//! 3. Otherwise rotate, then move, then apply gravity (soft drop is a full
//!    cell). Rotation and movement are validated against the pre-fall
//!    position.
//! 4. A landed piece is merged. Locking with any cell in or above the spawn
//!    row freezes the board; otherwise the clear check runs and, with nothing
//!    to clear, the next piece spawns right away.

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use crate::board::Board;
use crate::next_queue::NextQueue;
use crate::piece::Piece;
use crate::scoring::{line_clear_score, lock_delay_ticks, tick_rate_for_lines};
use crate::snapshot::{ActiveSnapshot, RenderSnapshot};
use crate::types::{
    BoardState, Intent, PieceKind, SessionState, BASE_TICK_RATE, FIELD_ROW, GRAVITY_PER_TICK,
    SPAWN_ROW, SUBCELLS_PER_CELL,
};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing simulated: paused, game over, or the pause toggle consumed the tick
    Held,
    /// Gravity, movement or the flash countdown advanced
    Advanced,
    /// The active piece was merged into the board
    Locked,
    /// Flashing rows were removed and scored
    Cleared { lines: u32, points: u32 },
    /// The session just ended
    GameOver,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameController<R = StdRng> {
    board: Board,
    active: Option<Piece>,
    queue: NextQueue<R>,
    session: SessionState,
    score: u32,
    lines: u32,
    tick_rate: u32,
}

impl GameController<StdRng> {
    /// Create a new session whose pieces are drawn from a `StdRng` seeded with `seed`
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameController<R> {
    /// Create a new session drawing pieces from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self::with_board(Board::new(), rng)
    }

    /// Start a session on a prepared board (puzzle setups, tests)
    pub fn with_board(board: Board, rng: R) -> Self {
        let mut game = Self {
            board,
            active: None,
            queue: NextQueue::new(rng),
            session: SessionState::Playing,
            score: 0,
            lines: 0,
            tick_rate: BASE_TICK_RATE,
        };
        game.spawn_next();
        info!(next = game.queue.peek().as_str(), "session started");
        game
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Ticks per second the driver should run at
    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next_kind(&self) -> PieceKind {
        self.queue.peek()
    }

    /// Advance the simulation by exactly one tick
    pub fn tick(&mut self, intent: Intent) -> TickOutcome {
        let intent = intent.normalized();

        match self.session {
            SessionState::GameOver => return TickOutcome::Held,
            SessionState::Paused => {
                if intent.pause_toggle {
                    self.session = SessionState::Playing;
                    debug!("resumed");
                }
                return TickOutcome::Held;
            }
            SessionState::Playing => {}
        }

        if self.board.is_frozen() {
            self.session = SessionState::GameOver;
            self.active = None;
            info!(score = self.score, lines = self.lines, "game over");
            return TickOutcome::GameOver;
        }

        if intent.pause_toggle {
            self.session = SessionState::Paused;
            debug!("paused");
            return TickOutcome::Held;
        }

        match self.board.state() {
            BoardState::Flashing | BoardState::Clearing => self.advance_clear(),
            BoardState::Live | BoardState::Frozen => self.step_piece(intent),
        }
    }

    /// Throw the whole session away and start over
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.queue.refill();
        self.active = None;
        self.session = SessionState::Playing;
        self.score = 0;
        self.lines = 0;
        self.tick_rate = BASE_TICK_RATE;
        self.spawn_next();
        debug!("session reset");
    }

    fn step_piece(&mut self, intent: Intent) -> TickOutcome {
        debug_assert!(self.active.is_some(), "live board without an active piece");
        let Some(mut piece) = self.active else {
            return TickOutcome::Held;
        };

        piece.try_rotate(intent.rotate_dir, &self.board);
        piece.try_move(intent.move_dir, &self.board);
        let dy = if intent.soft_drop {
            SUBCELLS_PER_CELL
        } else {
            GRAVITY_PER_TICK
        };
        piece.advance_fall(dy, &self.board);

        if piece.is_landed() {
            self.active = None;
            self.lock(piece);
            return TickOutcome::Locked;
        }

        self.active = Some(piece);
        TickOutcome::Advanced
    }

    fn lock(&mut self, piece: Piece) {
        if !self.board.merge(&piece) {
            warn!(
                kind = piece.kind().as_str(),
                col = piece.col(),
                row = piece.row(),
                "landed piece failed placement check, freezing board"
            );
            self.board.freeze();
            return;
        }
        debug!(
            kind = piece.kind().as_str(),
            col = piece.col(),
            row = piece.row(),
            "piece locked"
        );

        if piece.top_row() <= SPAWN_ROW {
            info!(top_row = piece.top_row(), "piece locked in the spawn row");
            self.board.freeze();
            return;
        }

        let full = self.board.begin_clear_check();
        if full == 0 {
            self.spawn_next();
        } else {
            debug!(rows = full, "rows flashing");
        }
    }

    fn advance_clear(&mut self) -> TickOutcome {
        if !self.board.advance_flash() {
            return TickOutcome::Advanced;
        }

        let lines = self.board.commit_clear() as u32;
        let points = line_clear_score(lines);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines);
        self.tick_rate = tick_rate_for_lines(self.lines);
        debug!(
            lines,
            points,
            total_lines = self.lines,
            tick_rate = self.tick_rate,
            "rows cleared"
        );

        self.spawn_next();
        TickOutcome::Cleared { lines, points }
    }

    fn spawn_next(&mut self) {
        let kind = self.queue.advance();
        let piece = Piece::spawn(kind, lock_delay_ticks(self.tick_rate));
        if !piece.can_place(&self.board, 0, 0, 0) {
            trace!(kind = kind.as_str(), "spawn position blocked");
            info!("no room to spawn, freezing board");
            self.active = None;
            self.board.freeze();
            return;
        }
        debug!(kind = kind.as_str(), next = self.queue.peek().as_str(), "piece spawned");
        self.active = Some(piece);
    }

    pub fn snapshot_into(&self, out: &mut RenderSnapshot) {
        self.board.write_grid(&mut out.board);

        out.flashing_rows = [false; FIELD_ROW as usize];
        if matches!(self.board.state(), BoardState::Flashing | BoardState::Clearing) {
            for row in self.board.full_rows() {
                out.flashing_rows[row as usize] = true;
            }
        }
        out.flash_highlight = self.board.flash_highlight();
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.queue.peek();
        out.score = self.score;
        out.lines = self.lines;
        out.tick_rate = self.tick_rate;
        out.session = self.session;
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let mut s = RenderSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
