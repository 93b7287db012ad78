//! DAS/ARR input handler for terminal environments.
//!
//! Every key press goes through [`crate::map::handle_key_event`]. One-shot
//! actions (rotate, hard drop, hold, pause, restart) pass straight through.
//! Movement actions start a held state that repeats after the DAS delay at the
//! ARR rate until a release event arrives or, on terminals that never report
//! releases, until no movement key has been seen for the release timeout.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::KeyEvent;

use crate::map::{handle_key_event, is_repeatable};
use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS};

/// Upper bound on repeats emitted by a single [`InputHandler::update`].
pub const MAX_REPEATS_PER_UPDATE: usize = 32;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn action(self) -> Option<GameAction> {
        match self {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        }
    }
}

/// DAS/ARR timers for one held key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Repeat {
    das_timer: u32,
    arr_accumulator: u32,
}

impl Repeat {
    /// Advance by `elapsed_ms` and return how many repeats fell due.
    fn advance(&mut self, elapsed_ms: u32, das_delay: u32, arr_rate: u32) -> u32 {
        let prev_das = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer < das_delay {
            return 0;
        }

        let excess = if prev_das < das_delay {
            self.das_timer - das_delay
        } else {
            elapsed_ms
        };
        self.arr_accumulator = self.arr_accumulator.saturating_add(excess);

        let rate = arr_rate.max(1);
        let due = self.arr_accumulator / rate;
        self.arr_accumulator %= rate;
        due
    }
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    last_key_time: Instant,
    horizontal_repeat: Repeat,
    down_repeat: Repeat,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

// Without release events a single tap would otherwise look held forever.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            last_key_time: Instant::now(),
            horizontal_repeat: Repeat::default(),
            down_repeat: Repeat::default(),
            das_delay,
            arr_rate,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn down_held(&self) -> bool {
        self.down_held
    }

    /// Translate a key press into at most one immediate action.
    ///
    /// Repeated press events for a key that is already held (terminal key
    /// repeat) refresh the release timeout but emit nothing; the repeats come
    /// from [`InputHandler::update`] instead.
    pub fn handle_key_press(&mut self, key: KeyEvent) -> Option<GameAction> {
        let action = handle_key_event(key)?;
        if !is_repeatable(action) {
            return Some(action);
        }

        self.last_key_time = Instant::now();
        match action {
            GameAction::MoveLeft => self.press_horizontal(HorizontalDirection::Left),
            GameAction::MoveRight => self.press_horizontal(HorizontalDirection::Right),
            GameAction::SoftDrop => {
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    self.down_repeat = Repeat::default();
                    Some(GameAction::SoftDrop)
                }
            }
            _ => Some(action),
        }
    }

    fn press_horizontal(&mut self, direction: HorizontalDirection) -> Option<GameAction> {
        if self.horizontal == direction {
            return None;
        }
        self.horizontal = direction;
        self.horizontal_repeat = Repeat::default();
        direction.action()
    }

    pub fn handle_key_release(&mut self, key: KeyEvent) {
        match handle_key_event(key) {
            Some(GameAction::MoveLeft) if self.horizontal == HorizontalDirection::Left => {
                self.release_horizontal();
            }
            Some(GameAction::MoveRight) if self.horizontal == HorizontalDirection::Right => {
                self.release_horizontal();
            }
            Some(GameAction::SoftDrop) => self.release_down(),
            _ => {}
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.horizontal_repeat = Repeat::default();
    }

    fn release_down(&mut self) {
        self.down_held = false;
        self.down_repeat = Repeat::default();
    }

    /// Advance the repeat timers and return the movement actions that fell due.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, MAX_REPEATS_PER_UPDATE> {
        let mut actions = ArrayVec::new();

        let timeout = Duration::from_millis(self.key_release_timeout_ms as u64);
        if self.last_key_time.elapsed() > timeout {
            if self.horizontal != HorizontalDirection::None {
                self.release_horizontal();
            }
            if self.down_held {
                self.release_down();
            }
        }

        if let Some(action) = self.horizontal.action() {
            let due = self
                .horizontal_repeat
                .advance(elapsed_ms, self.das_delay, self.arr_rate);
            for _ in 0..due {
                if actions.try_push(action).is_err() {
                    break;
                }
            }
        }

        if self.down_held {
            let due = self
                .down_repeat
                .advance(elapsed_ms, SOFT_DROP_DAS_MS, SOFT_DROP_ARR_MS);
            for _ in 0..due {
                if actions.try_push(GameAction::SoftDrop).is_err() {
                    break;
                }
            }
        }

        actions
    }

    /// Forget every held key, e.g. after pause or restart.
    pub fn reset(&mut self) {
        self.release_horizontal();
        self.release_down();
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_horizontal_das_arr_repeats_after_delay() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(key(KeyCode::Left)), Some(GameAction::MoveLeft));

        // Before DAS expires: no repeats.
        assert!(ih.update(99).is_empty());

        // Exactly at DAS: still nothing accumulated.
        assert!(ih.update(1).is_empty());

        assert_eq!(ih.update(25).as_slice(), &[GameAction::MoveLeft]);
        assert_eq!(ih.update(25).as_slice(), &[GameAction::MoveLeft]);
    }

    #[test]
    fn test_held_key_repeat_press_emits_nothing() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(key(KeyCode::Right)), Some(GameAction::MoveRight));
        assert_eq!(ih.handle_key_press(key(KeyCode::Right)), None);
        assert_eq!(ih.horizontal(), HorizontalDirection::Right);
    }

    #[test]
    fn test_switching_direction_emits_immediately() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(key(KeyCode::Left)), Some(GameAction::MoveLeft));
        assert_eq!(ih.handle_key_press(key(KeyCode::Char('l'))), Some(GameAction::MoveRight));
        assert_eq!(ih.horizontal(), HorizontalDirection::Right);
    }

    #[test]
    fn test_one_shot_actions_pass_through() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(key(KeyCode::Up)), Some(GameAction::Rotate));
        assert_eq!(ih.handle_key_press(key(KeyCode::Up)), Some(GameAction::Rotate));
        assert_eq!(ih.handle_key_press(key(KeyCode::Char(' '))), Some(GameAction::HardDrop));
        assert_eq!(ih.handle_key_press(key(KeyCode::Char('c'))), Some(GameAction::Hold));
        assert_eq!(ih.handle_key_press(key(KeyCode::Char('m'))), None);
        assert_eq!(ih.horizontal(), HorizontalDirection::None);
        assert!(!ih.down_held());
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(key(KeyCode::Left));
        ih.handle_key_release(key(KeyCode::Left));
        assert!(ih.update(500).is_empty());
    }

    #[test]
    fn test_release_of_other_direction_is_ignored() {
        let mut ih = InputHandler::new();
        ih.handle_key_press(key(KeyCode::Left));
        ih.handle_key_release(key(KeyCode::Right));
        assert_eq!(ih.horizontal(), HorizontalDirection::Left);
    }

    #[test]
    fn test_auto_release_triggers_after_timeout_without_key_release_events() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);

        assert_eq!(ih.handle_key_press(key(KeyCode::Left)), Some(GameAction::MoveLeft));
        assert_eq!(ih.horizontal(), HorizontalDirection::Left);

        ih.last_key_time = Instant::now() - Duration::from_millis(51);

        assert!(ih.update(0).is_empty());
        assert_eq!(ih.horizontal(), HorizontalDirection::None);
    }

    #[test]
    fn test_non_movement_key_does_not_extend_auto_release_timeout() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);

        ih.handle_key_press(key(KeyCode::Left));
        ih.last_key_time = Instant::now() - Duration::from_millis(51);
        assert_eq!(ih.handle_key_press(key(KeyCode::Up)), Some(GameAction::Rotate));

        assert!(ih.update(0).is_empty());
        assert_eq!(ih.horizontal(), HorizontalDirection::None);
    }

    #[test]
    fn test_default_key_release_timeout_is_non_zero() {
        assert!(InputHandler::new().key_release_timeout_ms() > 0);
    }

    #[test]
    fn test_soft_drop_repeats_use_zero_das_and_50ms_arr() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(key(KeyCode::Down)), Some(GameAction::SoftDrop));

        assert!(ih.update(49).is_empty());
        assert_eq!(ih.update(1).as_slice(), &[GameAction::SoftDrop]);
        assert_eq!(
            ih.update(100).as_slice(),
            &[GameAction::SoftDrop, GameAction::SoftDrop]
        );
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut ih = InputHandler::with_config(0, 1).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(key(KeyCode::Right));
        assert_eq!(ih.update(5_000).len(), MAX_REPEATS_PER_UPDATE);
    }

    #[test]
    fn test_reset_clears_held_state_and_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        ih.handle_key_press(key(KeyCode::Left));
        assert!(!ih.update(200).is_empty(), "expected repeats before reset");

        ih.reset();
        assert!(ih.update(200).is_empty(), "reset should stop repeats");
    }
}
