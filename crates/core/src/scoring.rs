//! Scoring module - line-clear points and speed progression
//!
//! A clear of `n` rows is worth `n² × 100`, so a double beats two singles.
//! Difficulty only comes from the tick rate: the per-tick fall distance is
//! fixed, and the front end simply runs more ticks per second as lines add up.

use crate::types::{
    BASE_TICK_RATE, LINES_PER_SPEEDUP, LINE_CLEAR_BASE_SCORE, MAX_TICK_RATE, TICK_RATE_STEP,
};

/// Points for clearing `lines` rows at once
pub fn line_clear_score(lines: u32) -> u32 {
    lines
        .saturating_mul(lines)
        .saturating_mul(LINE_CLEAR_BASE_SCORE)
}

/// Ticks per second after `lines` cleared lines
pub fn tick_rate_for_lines(lines: u32) -> u32 {
    let steps = lines / LINES_PER_SPEEDUP;
    BASE_TICK_RATE
        .saturating_add(steps.saturating_mul(TICK_RATE_STEP))
        .min(MAX_TICK_RATE)
}

/// Lock delay for a tick rate: half a second's worth of ticks
pub fn lock_delay_ticks(tick_rate: u32) -> i32 {
    (tick_rate / 2) as i32
}

/// Milliseconds between ticks at `tick_rate`
pub fn tick_interval_ms(tick_rate: u32) -> u32 {
    1000 / tick_rate.max(1)
}
