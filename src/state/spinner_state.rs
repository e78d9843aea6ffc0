//! Progress animation shown while a submission is in flight

use std::time::{Duration, Instant};

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Animation state for one outstanding gateway call
#[derive(Debug, Clone)]
pub struct SpinnerState {
    /// When the call was dispatched
    pub start_time: Instant,
    /// How long the call is expected to take
    pub expected: Duration,
}

impl SpinnerState {
    /// Time per spinner frame
    const FRAME_DURATION: Duration = Duration::from_millis(80);
    /// The bar never fills until the outcome arrives
    const MAX_PROGRESS: f32 = 0.95;

    pub fn new(expected: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            expected,
        }
    }

    /// Eased progress for the gauge, in `0.0..=0.95`
    pub fn progress(&self) -> f32 {
        self.progress_at(self.start_time.elapsed())
    }

    pub fn progress_at(&self, elapsed: Duration) -> f32 {
        if self.expected.is_zero() {
            return Self::MAX_PROGRESS;
        }
        let linear = (elapsed.as_secs_f32() / self.expected.as_secs_f32()).min(1.0);
        // Cubic ease-out: fast start, slow finish
        simple_easing::cubic_out(linear) * Self::MAX_PROGRESS
    }

    pub fn frame(&self) -> char {
        self.frame_at(self.start_time.elapsed())
    }

    pub fn frame_at(&self, elapsed: Duration) -> char {
        let index = (elapsed.as_millis() / Self::FRAME_DURATION.as_millis()) as usize;
        FRAMES[index % FRAMES.len()]
    }
}
