//! Time-driven angle animation.
//!
//! The driver owns no timer. The host loop (or a test) injects ticks
//! carrying a timestamp; the driver turns consecutive timestamps into a
//! delta and advances the angle by `speed * Δt`, wrapping modulo 2π.

use std::f64::consts::TAU;

/// Driver state. `Running` keeps the timestamp of the last applied tick so
/// the next one can compute its delta; entering `Running` starts with no
/// anchor, which makes the first tick a pure anchor-record with no angle
/// change. Stopping clears the anchor, so a stale delta can never leak into
/// a later run.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DriverState {
    Stopped,
    Running { anchor_ms: Option<f64> },
}

#[derive(Debug, Clone, Copy)]
pub struct AnimationDriver {
    state: DriverState,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self {
            state: DriverState::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, DriverState::Running { .. })
    }

    /// Enter `Running`. No-op if already running.
    pub fn start(&mut self) {
        if !self.is_running() {
            self.state = DriverState::Running { anchor_ms: None };
        }
    }

    /// Enter `Stopped` and drop the elapsed-time anchor. Idempotent; any
    /// tick that was already scheduled becomes a no-op.
    pub fn stop(&mut self) {
        self.state = DriverState::Stopped;
    }

    pub fn set_running(&mut self, running: bool) {
        if running {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Apply a tick at `now_ms`, advancing `radians` by `speed` rad/s over
    /// the elapsed time. Returns the (possibly unchanged) angle.
    pub fn tick(&mut self, now_ms: f64, radians: f64, speed: f64) -> f64 {
        match self.state {
            DriverState::Stopped => radians,
            DriverState::Running { anchor_ms } => {
                let advanced = match anchor_ms {
                    None => radians,
                    Some(anchor) => {
                        let delta_ms = now_ms - anchor;
                        (radians + speed * delta_ms * 0.001).rem_euclid(TAU)
                    }
                };
                self.state = DriverState::Running {
                    anchor_ms: Some(now_ms),
                };
                advanced
            }
        }
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_tick_only_records_the_anchor() {
        let mut driver = AnimationDriver::new();
        driver.start();
        assert_eq!(driver.tick(1000.0, 1.0, 5.0), 1.0);
    }

    #[test]
    fn advances_by_speed_times_delta() {
        let mut driver = AnimationDriver::new();
        driver.start();
        let angle = driver.tick(0.0, 0.0, 1.0);
        let angle = driver.tick(1000.0, angle, 1.0);
        assert_relative_eq!(angle, 1.0, epsilon = 1e-9);
        let angle = driver.tick(1500.0, angle, 2.0);
        assert_relative_eq!(angle, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn wraps_modulo_full_turn() {
        let mut driver = AnimationDriver::new();
        driver.start();
        driver.tick(0.0, 0.0, 1.0);
        let angle = driver.tick(10_000.0, 0.0, 1.0);
        assert_relative_eq!(angle, 10.0 - TAU, epsilon = 1e-9);
        assert!(angle >= 0.0 && angle < TAU);
    }

    #[test]
    fn enable_then_disable_before_any_tick_changes_nothing() {
        let mut driver = AnimationDriver::new();
        driver.start();
        driver.stop();
        assert_eq!(driver.tick(2000.0, 0.5, 3.0), 0.5);
    }

    #[test]
    fn stopping_discards_the_stale_anchor() {
        let mut driver = AnimationDriver::new();
        driver.start();
        driver.tick(0.0, 0.0, 1.0);
        driver.stop();
        // Re-enable much later: the old anchor must not produce a jump.
        driver.start();
        assert_eq!(driver.tick(60_000.0, 1.0, 1.0), 1.0);
        let angle = driver.tick(61_000.0, 1.0, 1.0);
        assert_relative_eq!(angle, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut driver = AnimationDriver::new();
        driver.stop();
        driver.stop();
        assert!(!driver.is_running());
        assert_eq!(driver.tick(100.0, 0.25, 1.0), 0.25);
    }
}
