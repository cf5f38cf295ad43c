use std::time::{Duration, Instant};

/// Elapsed and delta time of a single frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameTime {
    pub elapsed: Duration,
    pub delta: Duration,
}

/// Monotonic clock sampled once per frame.
///
/// Every tick reports the total time since the clock was created and the time
/// that passed since the previous tick.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    old_elapsed: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock {
            start: Instant::now(),
            old_elapsed: Duration::ZERO,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        let elapsed = self.start.elapsed();
        let delta = elapsed.saturating_sub(self.old_elapsed);
        self.old_elapsed = elapsed;

        FrameTime { elapsed, delta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_add_up_to_elapsed() {
        let mut clock = FrameClock::new();
        let mut sum = Duration::ZERO;
        for _ in 0..3 {
            std::thread::sleep(Duration::from_millis(1));
            let time = clock.tick();
            sum += time.delta;
            assert_eq!(sum, time.elapsed);
        }
        assert!(sum >= Duration::from_millis(3));
    }
}
