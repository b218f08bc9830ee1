//! DAS/ARR input handler for terminal environments.
//!
//! Presses and releases are folded into one [`Intent`] per tick:
//!
//! - a fresh horizontal press moves once on the next tick
//! - a held direction repeats after the DAS delay at the ARR rate, never more
//!   than one column per tick
//! - soft drop is active while held (a tap still counts for one tick)
//! - rotations and the pause toggle are latched until the next intent
//!
//! Terminals that never report key releases are handled with an idle timeout
//! counted in elapsed tick time: once no movement key has been seen for that
//! long, held keys are treated as released.

use crate::map::KeyCommand;
use crate::types::{Intent, DEFAULT_ARR_MS, DEFAULT_DAS_MS, KEY_RELEASE_TIMEOUT_MS};

/// Tracks input state between ticks.
#[derive(Debug, Clone)]
pub struct InputHandler {
    left_held: bool,
    right_held: bool,
    down_held: bool,
    tapped_left: bool,
    tapped_right: bool,
    tapped_down: bool,
    rotate: i8,
    pause: bool,
    idle_ms: u32,
    /// Direction the DAS/ARR timers are running for
    repeat_dir: i8,
    das_timer: u32,
    arr_accumulator: u32,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            left_held: false,
            right_held: false,
            down_held: false,
            tapped_left: false,
            tapped_right: false,
            tapped_down: false,
            rotate: 0,
            pause: false,
            idle_ms: 0,
            repeat_dir: 0,
            das_timer: 0,
            arr_accumulator: 0,
            das_delay,
            arr_rate: arr_rate.max(1),
            key_release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn das_delay(&self) -> u32 {
        self.das_delay
    }

    pub fn arr_rate(&self) -> u32 {
        self.arr_rate
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Record a key press (or a terminal auto-repeat of one).
    ///
    /// `Reset` is not an intent and is left to the caller.
    pub fn press(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::Left => {
                self.idle_ms = 0;
                if !self.left_held {
                    self.left_held = true;
                    self.tapped_left = true;
                }
            }
            KeyCommand::Right => {
                self.idle_ms = 0;
                if !self.right_held {
                    self.right_held = true;
                    self.tapped_right = true;
                }
            }
            KeyCommand::SoftDrop => {
                self.idle_ms = 0;
                self.down_held = true;
                self.tapped_down = true;
            }
            KeyCommand::RotateCw => self.rotate = self.rotate.saturating_add(1),
            KeyCommand::RotateCcw => self.rotate = self.rotate.saturating_sub(1),
            KeyCommand::Pause => self.pause = true,
            KeyCommand::Reset => {}
        }
    }

    pub fn release(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::Left => self.left_held = false,
            KeyCommand::Right => self.right_held = false,
            KeyCommand::SoftDrop => self.down_held = false,
            KeyCommand::RotateCw
            | KeyCommand::RotateCcw
            | KeyCommand::Pause
            | KeyCommand::Reset => {}
        }
    }

    /// Build the intent for the tick that ends after `elapsed_ms`, consuming
    /// latched presses.
    pub fn next_intent(&mut self, elapsed_ms: u32) -> Intent {
        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        if self.idle_ms > self.key_release_timeout_ms {
            self.left_held = false;
            self.right_held = false;
            self.down_held = false;
        }

        let held_dir = Intent::horizontal(self.left_held, self.right_held);
        let move_dir = if self.tapped_left || self.tapped_right {
            self.restart_repeat(held_dir);
            Intent::horizontal(self.tapped_left, self.tapped_right)
        } else if held_dir != self.repeat_dir {
            self.restart_repeat(held_dir);
            0
        } else if held_dir != 0 {
            self.repeat(held_dir, elapsed_ms)
        } else {
            0
        };

        let intent = Intent {
            move_dir,
            rotate_dir: self.rotate.signum(),
            soft_drop: self.down_held || self.tapped_down,
            pause_toggle: self.pause,
        };

        self.tapped_left = false;
        self.tapped_right = false;
        self.tapped_down = false;
        self.rotate = 0;
        self.pause = false;
        intent
    }

    /// Forget every held key and latched press.
    pub fn reset(&mut self) {
        *self = Self::with_config(self.das_delay, self.arr_rate)
            .with_key_release_timeout_ms(self.key_release_timeout_ms);
    }

    fn restart_repeat(&mut self, dir: i8) {
        self.repeat_dir = dir;
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }

    fn repeat(&mut self, dir: i8, elapsed_ms: u32) -> i8 {
        let prev_das = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer < self.das_delay {
            return 0;
        }

        let excess = if prev_das < self.das_delay {
            self.das_timer - self.das_delay
        } else {
            elapsed_ms
        };
        self.arr_accumulator = self.arr_accumulator.saturating_add(excess);
        if self.arr_accumulator < self.arr_rate {
            return 0;
        }
        // One column per tick; surplus repeats are dropped.
        self.arr_accumulator %= self.arr_rate;
        dir
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

    fn handler() -> InputHandler {
        InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000)
    }

    #[test]
    fn test_tap_moves_once() {
        let mut ih = handler();
        ih.press(KeyCommand::Right);
        ih.release(KeyCommand::Right);

        assert_eq!(ih.next_intent(16).move_dir, 1);
        assert_eq!(ih.next_intent(16).move_dir, 0);
        assert!(ih.next_intent(500).is_idle());
    }

    #[test]
    fn test_held_direction_repeats_after_das() {
        let mut ih = handler();
        ih.press(KeyCommand::Left);
        assert_eq!(ih.next_intent(0).move_dir, -1);

        // Before DAS expires: no repeats.
        assert_eq!(ih.next_intent(99).move_dir, 0);
        // Exactly at DAS: still nothing, ARR needs time past the delay.
        assert_eq!(ih.next_intent(1).move_dir, 0);
        assert_eq!(ih.next_intent(25).move_dir, -1);
        assert_eq!(ih.next_intent(10).move_dir, 0);
        assert_eq!(ih.next_intent(15).move_dir, -1);
    }

    #[test]
    fn test_at_most_one_repeat_per_tick() {
        let mut ih = handler();
        ih.press(KeyCommand::Right);
        ih.next_intent(0);

        assert_eq!(ih.next_intent(300).move_dir, 1);
        // The surplus of that long tick is not carried over.
        assert_eq!(ih.next_intent(0).move_dir, 0);
    }

    #[test]
    fn test_conflicting_directions_cancel() {
        let mut ih = handler();
        ih.press(KeyCommand::Left);
        ih.press(KeyCommand::Right);
        assert_eq!(ih.next_intent(0).move_dir, 0);
        assert_eq!(ih.next_intent(500).move_dir, 0);

        // Letting go of one side restarts DAS for the other.
        ih.release(KeyCommand::Left);
        assert_eq!(ih.next_intent(50).move_dir, 0);
        assert_eq!(ih.next_intent(99).move_dir, 0);
        assert_eq!(ih.next_intent(26).move_dir, 1);
    }

    #[test]
    fn test_rotations_are_latched_and_combined() {
        let mut ih = handler();
        ih.press(KeyCommand::RotateCw);
        ih.press(KeyCommand::RotateCw);
        ih.press(KeyCommand::RotateCcw);
        assert_eq!(ih.next_intent(16).rotate_dir, 1);
        assert_eq!(ih.next_intent(16).rotate_dir, 0);

        ih.press(KeyCommand::RotateCcw);
        assert_eq!(ih.next_intent(16).rotate_dir, -1);

        ih.press(KeyCommand::RotateCw);
        ih.press(KeyCommand::RotateCcw);
        assert_eq!(ih.next_intent(16).rotate_dir, 0);
    }

    #[test]
    fn test_pause_is_latched_once() {
        let mut ih = handler();
        ih.press(KeyCommand::Pause);
        assert!(ih.next_intent(16).pause_toggle);
        assert!(!ih.next_intent(16).pause_toggle);
    }

    #[test]
    fn test_soft_drop_while_held() {
        let mut ih = handler();
        ih.press(KeyCommand::SoftDrop);
        assert!(ih.next_intent(16).soft_drop);
        assert!(ih.next_intent(16).soft_drop);
        ih.release(KeyCommand::SoftDrop);
        assert!(!ih.next_intent(16).soft_drop);

        // A tap released before the tick still drops once.
        ih.press(KeyCommand::SoftDrop);
        ih.release(KeyCommand::SoftDrop);
        assert!(ih.next_intent(16).soft_drop);
        assert!(!ih.next_intent(16).soft_drop);
    }

    #[test]
    fn test_auto_release_without_key_release_events() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);
        ih.press(KeyCommand::SoftDrop);
        assert!(ih.next_intent(0).soft_drop);
        assert!(ih.next_intent(30).soft_drop);
        assert!(!ih.next_intent(30).soft_drop);
    }

    #[test]
    fn test_terminal_repeat_keeps_key_held() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);
        ih.press(KeyCommand::Left);
        assert_eq!(ih.next_intent(0).move_dir, -1);
        for _ in 0..3 {
            ih.press(KeyCommand::Left);
            assert_eq!(ih.next_intent(40).move_dir, 0);
        }
        // 160ms held: 60ms past DAS, ARR fires.
        ih.press(KeyCommand::Left);
        assert_eq!(ih.next_intent(40).move_dir, -1);
    }

    #[test]
    fn test_non_movement_key_does_not_extend_hold() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);
        ih.press(KeyCommand::SoftDrop);
        ih.next_intent(0);
        ih.press(KeyCommand::RotateCw);
        let intent = ih.next_intent(51);
        assert!(!intent.soft_drop);
        assert_eq!(intent.rotate_dir, 1);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut ih = handler();
        ih.press(KeyCommand::Left);
        ih.press(KeyCommand::SoftDrop);
        ih.press(KeyCommand::Pause);
        ih.reset();
        assert!(ih.next_intent(200).is_idle());
        assert_eq!(ih.das_delay(), 100);
        assert_eq!(ih.key_release_timeout_ms(), 10_000);
    }

    #[test]
    fn test_with_config_keeps_timings() {
        let ih = InputHandler::with_config(120, 30);
        assert_eq!(ih.das_delay(), 120);
        assert_eq!(ih.arr_rate(), 30);
        // A zero rate would repeat without bound, so it is raised to 1ms.
        assert_eq!(InputHandler::with_config(0, 0).arr_rate(), 1);
    }

    #[test]
    fn test_default_timings() {
        let ih = InputHandler::default();
        assert_eq!(ih.das_delay(), DEFAULT_DAS_MS);
        assert_eq!(ih.arr_rate(), DEFAULT_ARR_MS);
        assert!(ih.key_release_timeout_ms() > 0);
    }
}
