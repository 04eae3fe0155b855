//! Analyzing screen animation state

use std::time::{Duration, Instant};

/// Messages cycled while the situation is analyzed
pub const ANALYZING_MESSAGES: &[&str] = &[
    "Reading your situation",
    "Looking for matching programs",
    "Checking eligibility notes",
];

/// Pulsing progress animation for the analyzing screen
#[derive(Debug)]
pub struct AnalyzingState {
    /// When the analysis started
    pub start_time: Instant,
    /// Current pulse level (0.0 to 1.0)
    pub pulse: f32,
    /// Index into `ANALYZING_MESSAGES`
    pub message_index: usize,
}

impl AnalyzingState {
    /// Length of one pulse (in and out)
    const PULSE_DURATION: Duration = Duration::from_millis(1200);
    /// How long each message stays on screen
    const MESSAGE_DURATION: Duration = Duration::from_millis(1500);

    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            pulse: 0.0,
            message_index: 0,
        }
    }

    /// Update animation state based on elapsed time
    pub fn update(&mut self) {
        self.update_at(self.start_time.elapsed());
    }

    fn update_at(&mut self, elapsed: Duration) {
        let pulse_ms = Self::PULSE_DURATION.as_millis();
        let phase = (elapsed.as_millis() % pulse_ms) as f32 / pulse_ms as f32;
        // Rise during the first half, fall during the second
        let t = if phase < 0.5 {
            phase * 2.0
        } else {
            (1.0 - phase) * 2.0
        };
        self.pulse = simple_easing::sine_in_out(t).clamp(0.0, 1.0);

        let step = (elapsed.as_millis() / Self::MESSAGE_DURATION.as_millis()) as usize;
        self.message_index = step % ANALYZING_MESSAGES.len();
    }

    pub fn message(&self) -> &'static str {
        ANALYZING_MESSAGES[self.message_index]
    }
}

impl Default for AnalyzingState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_rest() {
        let mut state = AnalyzingState::new();
        state.update_at(Duration::ZERO);
        assert!(state.pulse.abs() < f32::EPSILON);
        assert_eq!(state.message(), ANALYZING_MESSAGES[0]);
    }

    #[test]
    fn test_peaks_mid_pulse() {
        let mut state = AnalyzingState::new();
        state.update_at(Duration::from_millis(600));
        assert!((state.pulse - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_pulse_stays_in_range() {
        let mut state = AnalyzingState::new();
        for ms in (0..5000).step_by(37) {
            state.update_at(Duration::from_millis(ms));
            assert!((0.0..=1.0).contains(&state.pulse));
        }
    }

    #[test]
    fn test_messages_cycle() {
        let mut state = AnalyzingState::new();
        state.update_at(Duration::from_millis(1600));
        assert_eq!(state.message_index, 1);
        state.update_at(Duration::from_millis(4600));
        assert_eq!(state.message_index, 0);
    }
}
