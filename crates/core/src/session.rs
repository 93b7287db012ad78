//! Session module - the complete game state
//!
//! Ties together the grid, the active piece, hold/next, scoring and the
//! persistence seam. Drives the placement cycle
//! `Spawning -> Falling -> Locking -> Clearing -> Spawning` with an orthogonal
//! pause flag and a terminal `GameOver`.
//!
//! The session owns no timer. The caller invokes [`GameSession::tick`] every
//! [`GameSession::fall_interval_ms`] and forwards player commands through
//! [`GameSession::apply_action`].

use crate::grid::{Grid, Pos};
use crate::piece::{self, ActivePiece};
use crate::rng::PieceSource;
use crate::scoring::{clear_score, fall_interval_ms, hard_drop_score, level_for_score};
use crate::shapes::KICK_OFFSETS;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::store::{HighScoreStore, MemoryStore};
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession<S: HighScoreStore = MemoryStore> {
    grid: Grid,
    active: Option<ActivePiece>,
    hold: Option<PieceKind>,
    next: PieceKind,
    source: PieceSource,
    score: u32,
    level: u32,
    combo: i32,
    high_score: u32,
    phase: Phase,
    paused: bool,
    started: bool,
    can_hold: bool,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    store: S,
}

impl GameSession<MemoryStore> {
    /// Create a new session with an in-memory best score of zero
    pub fn new(seed: u32) -> Self {
        Self::with_store(seed, MemoryStore::default())
    }
}

impl<S: HighScoreStore> GameSession<S> {
    /// Create a new session whose best score comes from `store`
    pub fn with_store(seed: u32, store: S) -> Self {
        Self::from_parts(Grid::new(), seed, store)
    }

    /// Create a session over a prepared grid (puzzles, tests)
    pub fn from_parts(grid: Grid, seed: u32, store: S) -> Self {
        let mut source = PieceSource::new(seed);
        let next = source.draw();
        let high_score = store.load();

        Self {
            grid,
            active: None,
            hold: None,
            next,
            source,
            score: 0,
            level: 1,
            combo: -1,
            high_score,
            phase: Phase::Spawning,
            paused: false,
            started: false,
            can_hold: true,
            last_event: None,
            store,
        }
    }

    /// Spawn the first piece from the queue
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        let kind = self.take_next();
        self.spawn_piece(kind);
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn combo(&self) -> i32 {
        self.combo
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Gravity period for the current level
    pub fn fall_interval_ms(&self) -> u32 {
        fall_interval_ms(self.level)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    fn playable(&self) -> bool {
        self.phase == Phase::Falling && !self.paused && self.active.is_some()
    }

    fn take_next(&mut self) -> PieceKind {
        let kind = self.next;
        self.next = self.source.draw();
        kind
    }

    /// True iff `kind` at `rotation` anchored at `(x, y)` lies in bounds over empty cells
    pub fn fits(&self, kind: PieceKind, rotation: usize, x: i8, y: i8) -> bool {
        piece::fits(&self.grid, kind, rotation, x, y)
    }

    /// Place `kind` at the spawn anchor in rotation 0.
    ///
    /// Only accepted while no piece is falling and the session is not paused.
    /// A spawn that does not fit ends the session. Returns whether the piece
    /// was placed.
    pub fn spawn(&mut self, kind: PieceKind) -> bool {
        if self.paused || self.active.is_some() {
            return false;
        }
        self.spawn_piece(kind)
    }

    fn spawn_piece(&mut self, kind: PieceKind) -> bool {
        if self.phase == Phase::GameOver {
            return false;
        }
        self.started = true;
        self.phase = Phase::Spawning;

        let piece = ActivePiece::new(kind);
        if !piece.fits(&self.grid) {
            self.active = None;
            self.enter_game_over();
            return false;
        }

        self.active = Some(piece);
        self.can_hold = true;
        self.phase = Phase::Falling;
        true
    }

    /// Try to move the active piece
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if moved.fits(&self.grid) {
            self.active = Some(moved);
            return true;
        }
        false
    }

    /// Rotate clockwise, falling back to the kick offsets in order
    pub fn rotate_clockwise(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.rotated_cw();
        let candidates = std::iter::once((0, 0)).chain(KICK_OFFSETS);
        for (dx, dy) in candidates {
            let candidate = rotated.shifted(dx, dy);
            if candidate.fits(&self.grid) {
                self.active = Some(candidate);
                return true;
            }
        }
        false
    }

    /// Drop the active piece to the bottom and lock it.
    ///
    /// Returns the number of rows dropped.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.playable() {
            return 0;
        }
        let Some(active) = self.active else {
            return 0;
        };

        let landed = active.dropped(&self.grid);
        let rows = (active.y - landed.y) as u32;
        self.active = Some(landed);

        let bonus = hard_drop_score(rows);
        self.add_score(bonus);
        self.lock(bonus);
        rows
    }

    /// Anchor the active piece would land on after a hard drop
    pub fn ghost_position(&self) -> Option<(i8, i8)> {
        let landed = self.active?.dropped(&self.grid);
        Some((landed.x, landed.y))
    }

    pub fn ghost_cells(&self) -> Option<[Pos; 4]> {
        self.active?.dropped(&self.grid).cells()
    }

    pub fn active_cells(&self) -> Option<[Pos; 4]> {
        self.active?.cells()
    }

    /// Swap active piece with the hold slot
    pub fn hold(&mut self) -> bool {
        if !self.can_hold || !self.playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let placed = match self.hold.replace(active.kind) {
            Some(held) => self.spawn_piece(held),
            None => {
                let kind = self.take_next();
                self.spawn_piece(kind)
            }
        };

        self.can_hold = false;
        placed
    }

    /// Gravity step: move down one row, or lock when the piece is resting.
    ///
    /// Returns false when the session is not in play.
    pub fn tick(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        if !self.try_move(0, -1) {
            self.lock(0);
        }
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.try_move(0, -1),
            GameAction::Rotate => self.rotate_clockwise(),
            GameAction::HardDrop => {
                let was_playable = self.playable();
                self.hard_drop();
                was_playable
            }
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Toggle pause; a finished session cannot be paused
    pub fn toggle_pause(&mut self) -> bool {
        if self.phase == Phase::GameOver {
            return false;
        }
        self.paused = !self.paused;
        log::debug!("paused: {}", self.paused);
        true
    }

    /// Start over with an empty grid, keeping the best score
    pub fn restart(&mut self) {
        log::info!("restart (score {}, best {})", self.score, self.high_score);

        self.grid.clear();
        self.active = None;
        self.hold = None;
        self.next = self.source.draw();
        self.score = 0;
        self.level = 1;
        self.combo = -1;
        self.phase = Phase::Spawning;
        self.paused = false;
        self.started = false;
        self.can_hold = true;
        self.last_event = None;

        self.start();
    }

    fn add_score(&mut self, points: u32) {
        if points == 0 {
            return;
        }
        self.score = self.score.saturating_add(points);
        self.level = level_for_score(self.score);
        if self.score > self.high_score {
            self.high_score = self.score;
            self.persist_high_score();
        }
    }

    fn persist_high_score(&mut self) {
        if let Err(err) = self.store.save(self.high_score) {
            log::warn!("failed to save high score {}: {}", self.high_score, err);
        }
    }

    fn enter_game_over(&mut self) {
        self.phase = Phase::GameOver;
        self.paused = false;
        log::info!("game over (score {}, best {})", self.score, self.high_score);
        self.persist_high_score();
    }

    /// Lock the active piece onto the grid, clear rows and spawn the next piece
    fn lock(&mut self, drop_bonus: u32) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.phase = Phase::Locking;
        // The active piece always fits, so its cells are in bounds.
        if let Some(cells) = active.cells() {
            self.grid.lock_cells(&cells, active.kind);
        }

        self.phase = Phase::Clearing;
        let rows = self.grid.full_rows();
        let lines = self.grid.clear_rows(&rows) as u32;

        let mut line_clear_score = 0;
        if lines > 0 {
            self.combo += 1;
            line_clear_score = clear_score(lines, self.combo).total;
            self.add_score(line_clear_score);
        } else {
            self.combo = -1;
        }

        log::debug!(
            "locked {:?} at ({}, {}): {} lines, combo {}, score {}",
            active.kind,
            active.x,
            active.y,
            lines,
            self.combo,
            self.score
        );

        self.last_event = Some(LockEvent {
            kind: active.kind,
            lines_cleared: lines,
            line_clear_score,
            drop_bonus,
            combo: self.combo,
        });

        let kind = self.take_next();
        self.spawn_piece(kind);
    }

    /// Write a read-only view into `out`
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (dst, src) in out.grid.iter_mut().zip(self.grid.rows()) {
            dst.copy_from_slice(src);
        }
        out.active = self.active.map(ActiveSnapshot::from);
        out.active_cells = self.active_cells();
        out.ghost_cells = self.ghost_cells();
        out.next = self.next;
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.score = self.score;
        out.level = self.level;
        out.high_score = self.high_score;
        out.combo = self.combo;
        out.phase = self.phase;
        out.paused = self.paused;
        out.game_over = self.game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession<MemoryStore> {
    fn default() -> Self {
        Self::new(1)
    }
}
