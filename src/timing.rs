use std::time::{Duration, Instant};

/// Soft frame-rate ceiling.
///
/// The event loop polls continuously and asks the limiter whether enough
/// time has passed to run another update and render. Rejected polls cost a
/// spin of the loop; there is no sleeping.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    max_fps: u32,
    min_interval: Duration,
    last_frame: Option<Instant>,
}

impl FrameLimiter {
    /// `max_fps == 0` accepts every frame.
    pub fn new(max_fps: u32) -> Self {
        let min_interval = if max_fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / f64::from(max_fps))
        };

        Self {
            max_fps,
            min_interval,
            last_frame: None,
        }
    }

    pub fn max_fps(&self) -> u32 {
        self.max_fps
    }

    /// Returns the time since the last accepted frame if a new one may start,
    /// and records `now` as its start. The very first frame is accepted with
    /// zero elapsed time.
    pub fn try_begin_frame(&mut self, now: Instant) -> Option<Duration> {
        let elapsed = match self.last_frame {
            Some(last) => now.saturating_duration_since(last),
            None => {
                self.last_frame = Some(now);
                return Some(Duration::ZERO);
            }
        };

        if elapsed < self.min_interval {
            return None;
        }

        self.last_frame = Some(now);
        Some(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_accepted() {
        let mut limiter = FrameLimiter::new(60);
        assert_eq!(limiter.try_begin_frame(Instant::now()), Some(Duration::ZERO));
    }

    #[test]
    fn test_rejects_until_interval_elapses() {
        let mut limiter = FrameLimiter::new(50);
        let start = Instant::now();
        limiter.try_begin_frame(start);

        assert_eq!(limiter.try_begin_frame(start + Duration::from_millis(5)), None);
        assert_eq!(limiter.try_begin_frame(start + Duration::from_millis(19)), None);

        let accepted = limiter.try_begin_frame(start + Duration::from_millis(20));
        assert_eq!(accepted, Some(Duration::from_millis(20)));
    }

    #[test]
    fn test_elapsed_measured_from_last_accepted_frame() {
        let mut limiter = FrameLimiter::new(100);
        let start = Instant::now();
        limiter.try_begin_frame(start);
        limiter.try_begin_frame(start + Duration::from_millis(3));

        let accepted = limiter.try_begin_frame(start + Duration::from_millis(25));
        assert_eq!(accepted, Some(Duration::from_millis(25)));

        assert_eq!(limiter.try_begin_frame(start + Duration::from_millis(30)), None);
    }

    #[test]
    fn test_zero_disables_ceiling() {
        let mut limiter = FrameLimiter::new(0);
        let start = Instant::now();
        limiter.try_begin_frame(start);

        assert_eq!(limiter.try_begin_frame(start), Some(Duration::ZERO));
        assert_eq!(
            limiter.try_begin_frame(start + Duration::from_micros(1)),
            Some(Duration::from_micros(1))
        );
    }
}
