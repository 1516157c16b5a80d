//! Frame and interval clocks
//!
//! The simulation runs on two time bases: one `tick` per presentation frame
//! and one fuel decay per fixed interval. Each clock is a handle owned by the
//! session; dropping it stops that time base, acquiring a fresh one restarts
//! it from zero.

/// Presentation-frame clock handle
#[derive(Debug)]
pub struct FrameLoop {
    frames: u64,
}

impl FrameLoop {
    pub fn start() -> Self {
        Self { frames: 0 }
    }

    /// Record one presented frame
    pub fn next_frame(&mut self) -> u64 {
        self.frames += 1;
        self.frames
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Fixed real-time interval (the decay clock)
#[derive(Debug)]
pub struct IntervalTimer {
    interval: f32,
    accumulator: f32,
}

impl IntervalTimer {
    /// Start a timer firing every `interval` seconds.
    /// Non-positive intervals fall back to one second.
    pub fn start(interval: f32) -> Self {
        let interval = if interval.is_finite() && interval > 0.0 {
            interval
        } else {
            log::warn!("Invalid decay interval {interval}, using 1s");
            1.0
        };
        Self {
            interval,
            accumulator: 0.0,
        }
    }

    /// Feed elapsed wall time, return how many intervals completed
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !(dt.is_finite() && dt > 0.0) {
            return 0;
        }
        self.accumulator += dt;
        let mut fired = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            fired += 1;
        }
        fired
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }
}

/// Both clocks for one running session
#[derive(Debug)]
pub struct Clocks {
    pub frame: FrameLoop,
    pub decay: IntervalTimer,
}

impl Clocks {
    pub fn acquire(decay_interval: f32) -> Self {
        Self {
            frame: FrameLoop::start(),
            decay: IntervalTimer::start(decay_interval),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_fires_once_per_second() {
        let mut timer = IntervalTimer::start(1.0);
        let mut fired = 0;
        for _ in 0..60 {
            fired += timer.advance(1.0 / 60.0);
        }
        // Float accumulation may land just short of the boundary
        assert!(fired <= 1);
        fired += timer.advance(0.01);
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_interval_catches_up_after_long_frame() {
        let mut timer = IntervalTimer::start(0.5);
        assert_eq!(timer.advance(1.75), 3);
        assert_eq!(timer.advance(0.25), 1);
    }

    #[test]
    fn test_interval_ignores_bad_dt() {
        let mut timer = IntervalTimer::start(1.0);
        assert_eq!(timer.advance(-1.0), 0);
        assert_eq!(timer.advance(f32::NAN), 0);
        assert_eq!(timer.advance(0.5), 0);
        assert_eq!(timer.advance(0.5), 1);
    }

    #[test]
    fn test_invalid_interval_defaults_to_one_second() {
        let timer = IntervalTimer::start(0.0);
        assert_eq!(timer.interval(), 1.0);
    }

    #[test]
    fn test_frame_loop_counts() {
        let mut frame = FrameLoop::start();
        assert_eq!(frame.frames(), 0);
        frame.next_frame();
        assert_eq!(frame.next_frame(), 2);
    }
}
