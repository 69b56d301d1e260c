//! Game State Machine - owns one session and drives spawn, fall, lock, clear.
//!
//! Phases:
//! - `Menu`: nothing falls; waiting for [`GameState::start`]
//! - `Running`: gravity ticks and player actions apply
//! - `Paused`: frozen; only the pause toggle is accepted
//! - `GameOver { won }`: a spawn collided (`won = false`) or the mode's line
//!   target was reached (`won = true`)
//!
//! Gravity uses an accumulator: each [`GameState::tick`] adds elapsed time,
//! and once the total is strictly greater than the drop interval the active
//! piece falls one row (or locks), then the accumulator restarts from zero.

use crate::board::{Board, ClearedRows};
use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::piece::Piece;
use crate::rng::PieceGenerator;
use crate::scoring::{calculate_drop_score, calculate_level, calculate_line_score, drop_interval_ms};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{GameAction, GameMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Menu,
    Running,
    Paused,
    GameOver { won: bool },
}

/// One game session.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    generator: PieceGenerator,
    config: GameConfig,
    phase: Phase,
    current: Option<Piece>,
    next: Option<Piece>,
    hold: Option<Piece>,
    can_hold: bool,
    score: u32,
    lines: u32,
    level: u32,
    combo: u32,
    last_clear: u32,
    drop_interval_ms: u32,
    /// Gravity accumulator.
    drop_timer_ms: u32,
    /// Running (unpaused) play time.
    elapsed_ms: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// A session in the menu with default configuration.
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, GameConfig::default())
    }

    pub fn with_config(seed: u32, config: GameConfig) -> Self {
        let config = config.normalized();
        Self {
            board: Board::new(),
            generator: PieceGenerator::new(seed),
            config,
            phase: Phase::Menu,
            current: None,
            next: None,
            hold: None,
            can_hold: true,
            score: 0,
            lines: 0,
            level: config.start_level,
            combo: 0,
            last_clear: 0,
            drop_interval_ms: drop_interval_ms(config.start_level),
            drop_timer_ms: 0,
            elapsed_ms: 0,
            events: Vec::with_capacity(16),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Replace the configuration used by the next [`GameState::start`].
    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config.normalized();
    }

    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next_piece(&self) -> Option<Piece> {
        self.next
    }

    pub fn hold_piece(&self) -> Option<Piece> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Take the events recorded since the last call.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Start (or restart) a session from the current configuration.
    pub fn start(&mut self) {
        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.combo = 0;
        self.last_clear = 0;
        self.level = self.config.start_level;
        self.drop_interval_ms = drop_interval_ms(self.level);
        self.drop_timer_ms = 0;
        self.elapsed_ms = 0;
        self.hold = None;
        self.can_hold = true;
        self.current = Some(self.generator.next_piece());
        self.next = Some(self.generator.next_piece());
        self.phase = Phase::Running;
        self.events.push(GameEvent::Started);
    }

    /// Toggle between `Running` and `Paused`. Returns false in other phases.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                self.events.push(GameEvent::Paused);
                true
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                self.drop_timer_ms = 0;
                self.events.push(GameEvent::Resumed);
                true
            }
            Phase::Menu | Phase::GameOver { .. } => false,
        }
    }

    /// Leave the current session for the menu. The board is kept for display.
    pub fn open_menu(&mut self) -> bool {
        if self.phase == Phase::Menu {
            return false;
        }
        self.phase = Phase::Menu;
        self.events.push(GameEvent::MenuOpened);
        true
    }

    /// Advance gravity by `elapsed_ms`. Returns true when the piece fell or locked.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.elapsed_ms += u64::from(elapsed_ms);
        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms <= self.drop_interval_ms {
            return false;
        }

        let Some(mut piece) = self.current else {
            return false;
        };
        if piece.try_drop(&self.board) {
            self.current = Some(piece);
        } else {
            self.lock_piece();
        }
        self.drop_timer_ms = 0;
        true
    }

    /// Apply a player action. Returns true when it changed the session.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => self.toggle_pause(),
            _ if self.phase != Phase::Running || self.current.is_none() => false,
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::Hold => self.hold(),
        }
    }

    pub fn try_move(&mut self, dir: i8) -> bool {
        let Some(piece) = self.current.as_mut() else {
            return false;
        };
        let moved = piece.try_move(dir, &self.board);
        if moved {
            self.events.push(GameEvent::Moved);
        }
        moved
    }

    pub fn rotate(&mut self) -> bool {
        let Some(piece) = self.current.as_mut() else {
            return false;
        };
        let rotated = piece.try_rotate(&self.board);
        if rotated {
            self.events.push(GameEvent::Rotated);
        }
        rotated
    }

    /// Manual one-row drop: +1 point when the piece moves. Restarts gravity.
    pub fn soft_drop(&mut self) -> bool {
        let Some(piece) = self.current.as_mut() else {
            return false;
        };
        let dropped = piece.try_drop(&self.board);
        if dropped {
            self.score = self.score.saturating_add(calculate_drop_score(1, false));
            self.events.push(GameEvent::SoftDropped);
        }
        self.drop_timer_ms = 0;
        dropped
    }

    /// Drop to the resting row: +2 points per row. The next tick locks the piece.
    pub fn hard_drop(&mut self) -> u32 {
        let Some(piece) = self.current.as_mut() else {
            return 0;
        };
        let distance = piece.hard_drop(&self.board);
        self.score = self
            .score
            .saturating_add(calculate_drop_score(distance, true));
        self.drop_timer_ms = self.drop_interval_ms;
        self.events.push(GameEvent::HardDropped { distance });
        distance
    }

    /// Stash the active piece, or swap it with the held one. Once per lock.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };

        match self.hold.take() {
            None => {
                self.hold = Some(current.respawned());
                let promoted = match self.next.take() {
                    Some(next) => next,
                    None => self.generator.next_piece(),
                };
                self.current = Some(promoted);
                self.next = Some(self.generator.next_piece());
            }
            Some(held) => {
                self.hold = Some(current.respawned());
                self.current = Some(held.respawned());
            }
        }

        self.can_hold = false;
        self.events.push(GameEvent::Held);
        true
    }

    /// Merge the active piece, clear lines, score, and promote the next piece.
    pub fn lock_piece(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };
        self.board.merge(&piece);
        self.events.push(GameEvent::Locked);

        let cleared = self.board.clear_full_rows();
        if cleared.is_empty() {
            self.combo = 0;
            self.last_clear = 0;
        } else {
            self.apply_line_clear(cleared);
            if self.target_reached() {
                self.finish(true);
                return;
            }
        }

        let promoted = match self.next.take() {
            Some(next) => next,
            None => self.generator.next_piece(),
        };
        self.next = Some(self.generator.next_piece());
        self.can_hold = true;
        self.current = Some(promoted);

        if promoted.collides(&self.board) {
            self.finish(false);
        }
    }

    fn apply_line_clear(&mut self, rows: ClearedRows) {
        let count = rows.len();
        self.combo += 1;
        self.lines += count as u32;
        self.last_clear = count as u32;

        // Scored at the level in effect before this clear.
        let points = calculate_line_score(count, self.level, self.combo).total;
        self.score = self.score.saturating_add(points);
        self.events.push(GameEvent::LinesCleared {
            rows,
            combo: self.combo,
            points,
        });

        let level = calculate_level(self.lines, self.config.start_level);
        if level != self.level {
            self.level = level;
            self.events.push(GameEvent::LevelChanged { level });
        }
        self.drop_interval_ms = drop_interval_ms(self.level);
    }

    fn target_reached(&self) -> bool {
        self.config
            .mode
            .target_lines()
            .is_some_and(|target| self.lines >= target)
    }

    fn finish(&mut self, won: bool) {
        self.phase = Phase::GameOver { won };
        self.events.push(GameEvent::GameOver { won });
    }

    /// Resting row of the active piece.
    pub fn ghost_y(&self) -> Option<i8> {
        self.current.map(|piece| piece.ghost_y(&self.board))
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.current.map(PieceSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next.map(PieceSnapshot::from);
        out.hold = self.hold.map(PieceSnapshot::from);
        out.can_hold = self.can_hold;
        out.phase = self.phase;
        out.mode = self.config.mode;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.combo = self.combo;
        out.last_clear = self.last_clear;
        out.elapsed_ms = self.elapsed_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::catalog_shape;
    use crate::types::PieceKind;

    fn running(seed: u32, config: GameConfig) -> GameState {
        let mut state = GameState::with_config(seed, config);
        state.start();
        state.drain_events().for_each(drop);
        state
    }

    /// Rows 16..=19 full except column 0, with a vertical I ready above the gap.
    fn tetris_ready(state: &mut GameState) {
        for y in 16..20 {
            state.board.fill_row_except(y, &[0], Some(PieceKind::J));
        }
        let vertical_i = Piece::with_shape(PieceKind::I, catalog_shape(PieceKind::I).rotated_cw());
        state.current = Some(vertical_i.at(0, 0));
    }

    /// A single line ready to clear with an O dropped into columns 0-1.
    fn single_ready(state: &mut GameState) {
        state.board.clear();
        state.board.fill_row_except(19, &[0, 1], Some(PieceKind::T));
        state.current = Some(Piece::new(PieceKind::O).at(0, 18));
    }

    #[test]
    fn test_new_starts_in_menu() {
        let state = GameState::new(1);
        assert_eq!(state.phase(), Phase::Menu);
        assert!(state.current().is_none());
        assert_eq!(state.level(), 1);
    }

    #[test]
    fn test_start_resets_session() {
        let config = GameConfig::default().with_start_level(3);
        let mut state = GameState::with_config(5, config);
        state.score = 999;
        state.lines = 12;
        state.combo = 4;
        state.board.set(0, 19, Some(PieceKind::I));
        state.hold = Some(Piece::new(PieceKind::T));
        state.can_hold = false;

        state.start();
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.combo(), 0);
        assert_eq!(state.level(), 3);
        assert_eq!(state.drop_interval_ms(), 840);
        assert_eq!(state.board().filled_count(), 0);
        assert!(state.hold_piece().is_none());
        assert!(state.can_hold());
        assert!(state.current().is_some());
        assert!(state.next_piece().is_some());
        assert_eq!(state.drain_events().collect::<Vec<_>>(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_actions_ignored_outside_running() {
        let mut state = GameState::new(1);
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::Pause));

        state.start();
        assert!(state.apply_action(GameAction::Pause));
        assert_eq!(state.phase(), Phase::Paused);
        let before = state.current();
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::HardDrop));
        assert_eq!(state.current(), before);
    }

    #[test]
    fn test_pause_freezes_gravity_and_resume_resets_clock() {
        let mut state = running(1, GameConfig::default());
        let y0 = state.current().unwrap().y();

        state.tick(900);
        assert!(state.toggle_pause());
        assert!(!state.tick(5000));
        assert_eq!(state.current().unwrap().y(), y0);
        assert_eq!(state.elapsed_ms(), 900);

        assert!(state.toggle_pause());
        assert_eq!(state.phase(), Phase::Running);
        // Accumulator restarted: 900ms more is still not past the interval.
        assert!(!state.tick(900));
        assert!(state.tick(101));
        assert_eq!(state.current().unwrap().y(), y0 + 1);
    }

    #[test]
    fn test_tick_requires_strictly_greater_than_interval() {
        let mut state = running(1, GameConfig::default());
        let y0 = state.current().unwrap().y();
        assert!(!state.tick(1000));
        assert_eq!(state.current().unwrap().y(), y0);
        assert!(state.tick(1));
        assert_eq!(state.current().unwrap().y(), y0 + 1);
    }

    #[test]
    fn test_soft_drop_scores_and_resets_gravity() {
        let mut state = running(1, GameConfig::default());
        state.tick(800);
        assert!(state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.score(), 1);
        assert_eq!(state.drop_timer_ms, 0);

        // Landed piece: no point, but the clock still resets.
        state.current = Some(Piece::new(PieceKind::O).at(4, 18));
        state.drop_timer_ms = 500;
        assert!(!state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.score(), 1);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_hard_drop_scores_and_locks_on_next_tick() {
        let mut state = running(1, GameConfig::default());
        state.current = Some(Piece::new(PieceKind::O));
        assert_eq!(state.hard_drop(), 18);
        assert_eq!(state.score(), 36);
        assert_eq!(state.board().filled_count(), 0);

        assert!(state.tick(1));
        assert_eq!(state.board().filled_count(), 4);
        assert!(state.can_hold());
    }

    #[test]
    fn test_hold_empty_slot_promotes_next() {
        let mut state = running(7, GameConfig::default());
        let current = state.current().unwrap();
        let next = state.next_piece().unwrap();

        assert!(state.hold());
        assert_eq!(state.hold_piece().unwrap().kind(), current.kind());
        assert_eq!(state.current(), Some(next));
        assert!(state.next_piece().is_some());
        assert!(!state.can_hold());

        // Second hold before a lock is a no-op.
        let snapshot = state.snapshot();
        assert!(!state.hold());
        assert_eq!(state.snapshot(), snapshot);
    }

    #[test]
    fn test_hold_swap_resets_both_origins() {
        let mut state = running(7, GameConfig::default());
        state.current = Some(Piece::new(PieceKind::T).at(1, 10));
        state.hold = Some(Piece::new(PieceKind::L));
        state.can_hold = true;

        assert!(state.hold());
        let current = state.current().unwrap();
        let held = state.hold_piece().unwrap();
        assert_eq!(current.kind(), PieceKind::L);
        assert_eq!((current.x(), current.y()), (4, 0));
        assert_eq!(held.kind(), PieceKind::T);
        assert_eq!((held.x(), held.y()), (4, 0));
    }

    #[test]
    fn test_hold_keeps_rotated_shape() {
        let mut state = running(7, GameConfig::default());
        state.current = Some(Piece::new(PieceKind::J).at(3, 8));
        assert!(state.rotate());
        let rotated = state.current().unwrap().shape();
        assert!(state.hold());
        assert_eq!(state.hold_piece().unwrap().shape(), rotated);
    }

    #[test]
    fn test_lock_reenables_hold() {
        let mut state = running(7, GameConfig::default());
        assert!(state.hold());
        state.hard_drop();
        state.tick(1);
        assert!(state.can_hold());
    }

    #[test]
    fn test_tetris_scoring_at_level_two() {
        let config = GameConfig::default().with_start_level(2);
        let mut state = running(1, config);
        tetris_ready(&mut state);

        state.hard_drop();
        let drop_points = state.score();
        state.tick(1);

        assert_eq!(state.lines(), 4);
        assert_eq!(state.combo(), 1);
        assert_eq!(state.score() - drop_points, 2400);
        assert_eq!(state.board().filled_count(), 0);
        // floor(4/10) + 2 - 1
        assert_eq!(state.level(), 1);
        assert_eq!(state.drop_interval_ms(), 1000);
    }

    #[test]
    fn test_combo_grows_and_resets() {
        let mut state = running(1, GameConfig::default());
        for expected in 1..=3 {
            single_ready(&mut state);
            state.lock_piece();
            assert_eq!(state.combo(), expected);
        }
        // A lock that clears nothing resets the chain.
        state.board.clear();
        state.current = Some(Piece::new(PieceKind::O).at(4, 18));
        state.lock_piece();
        assert_eq!(state.combo(), 0);
    }

    #[test]
    fn test_combo_multiplier_capped_in_session() {
        let mut state = running(1, GameConfig::default());
        state.combo = 12;
        state.score = 0;
        single_ready(&mut state);
        state.lock_piece();
        assert_eq!(state.combo(), 13);
        assert_eq!(state.score(), 40 * 10);
    }

    #[test]
    fn test_level_formula_in_session() {
        let config = GameConfig::default().with_start_level(3);
        let mut state = running(1, config);
        state.lines = 22;
        single_ready(&mut state);
        state.lock_piece();
        assert_eq!(state.lines(), 23);
        assert_eq!(state.level(), 4);
        assert_eq!(state.drop_interval_ms(), 760);
    }

    #[test]
    fn test_marathon_wins_at_150() {
        let config = GameConfig::default().with_mode(GameMode::Marathon);
        let mut state = running(1, config);
        state.lines = 148;
        single_ready(&mut state);
        state.lock_piece();
        assert_eq!(state.phase(), Phase::Running);

        single_ready(&mut state);
        state.lock_piece();
        assert_eq!(state.lines(), 150);
        assert_eq!(state.phase(), Phase::GameOver { won: true });
        assert!(state
            .drain_events()
            .any(|e| e == GameEvent::GameOver { won: true }));
    }

    #[test]
    fn test_sprint_wins_at_40() {
        let config = GameConfig::default().with_mode(GameMode::Sprint);
        let mut state = running(1, config);
        state.lines = 36;
        tetris_ready(&mut state);
        state.hard_drop();
        state.tick(1);
        assert_eq!(state.lines(), 40);
        assert_eq!(state.phase(), Phase::GameOver { won: true });
    }

    #[test]
    fn test_classic_never_wins() {
        let mut state = running(1, GameConfig::default());
        state.lines = 500;
        single_ready(&mut state);
        state.lock_piece();
        assert_eq!(state.phase(), Phase::Running);
    }

    #[test]
    fn test_spawn_collision_is_a_loss() {
        let mut state = running(1, GameConfig::default());
        // Block the spawn rows without completing them.
        for y in 0..2 {
            state.board.fill_row_except(y, &[0], Some(PieceKind::S));
        }
        state.current = Some(Piece::new(PieceKind::O).at(0, 2));
        state.lock_piece();
        assert_eq!(state.phase(), Phase::GameOver { won: false });
        assert!(!state.tick(5000));
        assert!(!state.apply_action(GameAction::MoveLeft));
    }

    #[test]
    fn test_open_menu_from_game_over_and_pause() {
        let mut state = running(1, GameConfig::default());
        state.toggle_pause();
        assert!(state.open_menu());
        assert_eq!(state.phase(), Phase::Menu);
        assert!(!state.open_menu());

        state.start();
        state.finish(false);
        assert!(state.open_menu());
        assert_eq!(state.phase(), Phase::Menu);
    }

    #[test]
    fn test_events_for_move_and_rotate() {
        let mut state = running(1, GameConfig::default());
        state.current = Some(Piece::new(PieceKind::T).at(4, 5));
        assert!(state.apply_action(GameAction::MoveLeft));
        assert!(state.apply_action(GameAction::Rotate));
        state.current = Some(Piece::new(PieceKind::T).at(0, 5));
        assert!(!state.apply_action(GameAction::MoveLeft));
        let events: Vec<_> = state.drain_events().collect();
        assert_eq!(events, vec![GameEvent::Moved, GameEvent::Rotated]);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = running(3, GameConfig::default().with_mode(GameMode::Sprint));
        state.tick(250);
        let snap = state.snapshot();
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.mode, GameMode::Sprint);
        assert_eq!(snap.active, state.current().map(PieceSnapshot::from));
        assert_eq!(snap.ghost_y, state.ghost_y());
        assert_eq!(snap.elapsed_ms, 250);
        assert!(snap.playable());
    }
}
