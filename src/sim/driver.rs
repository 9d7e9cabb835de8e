//! Frame-driven playback on top of a [`SimulationController`]
//!
//! Render loops call [`SimulationDriver::advance`] with the wall-clock time
//! since the previous frame. The driver turns that into ticks at a rate set
//! by the playback speed, and turns a monotonically increasing reset counter
//! into resets.

use super::controller::SimulationController;
use super::snapshot::StateSnapshot;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::info;

/// Floor on the tick frequency, in ticks per second
const MIN_TICK_RATE: f64 = 0.1;

/// Ticks per second at speed 1.0
const TICKS_PER_SPEED_UNIT: f64 = 10.0;

pub struct SimulationDriver<R = StdRng> {
    controller: SimulationController<R>,
    playing: bool,
    speed: f64,
    accumulated: f64,
    reset_signal: u64,
}

impl<R: Rng> SimulationDriver<R> {
    /// Paused driver at speed 1.0
    pub fn new(controller: SimulationController<R>) -> Self {
        Self {
            controller,
            playing: false,
            speed: 1.0,
            accumulated: 0.0,
            reset_signal: 0,
        }
    }

    pub fn controller(&self) -> &SimulationController<R> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SimulationController<R> {
        &mut self.controller
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Negative or non-finite speeds are treated as 0
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
    }

    /// Seconds of wall time between ticks at the current speed
    pub fn tick_interval(&self) -> f64 {
        1.0 / (self.speed * TICKS_PER_SPEED_UNIT).max(MIN_TICK_RATE)
    }

    /// Account for `delta_secs` of wall time; steps at most once.
    pub fn advance(&mut self, delta_secs: f64) -> Option<StateSnapshot> {
        if !self.playing {
            return None;
        }
        if delta_secs.is_finite() && delta_secs > 0.0 {
            self.accumulated += delta_secs;
        }
        if self.accumulated >= self.tick_interval() {
            self.accumulated = 0.0;
            return Some(self.controller.step());
        }
        None
    }

    /// Reset once if `counter` moved past the last observed value.
    ///
    /// A reset also pauses playback.
    pub fn observe_reset_signal(&mut self, counter: u64) -> Option<StateSnapshot> {
        if counter <= self.reset_signal {
            return None;
        }
        self.reset_signal = counter;
        self.playing = false;
        self.accumulated = 0.0;
        info!(signal = counter, "reset requested");
        Some(self.controller.reset())
    }
}
