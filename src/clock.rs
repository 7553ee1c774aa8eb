//! Frame-stepped phase clock.

use std::f32::consts::TAU;

/// Time accumulator advanced by a fixed step per rendered frame.
///
/// Not tied to wall-clock time: animation speed follows the achieved
/// frame rate. The value wraps modulo 2π so precision never degrades;
/// every use of it sits inside a sine, so wrapping is invisible.
#[derive(Debug, Clone)]
pub struct PhaseClock {
    phase: f32,
    step: f32,
    frames: u64,
}

impl PhaseClock {
    pub fn new(step: f32) -> Self {
        Self {
            phase: 0.0,
            step,
            frames: 0,
        }
    }

    /// Current clock value in [0, 2π)
    pub fn now(&self) -> f32 {
        self.phase
    }

    /// Frames advanced since creation (never reset)
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn advance(&mut self) {
        self.phase = (self.phase + self.step).rem_euclid(TAU);
        self.frames += 1;
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
