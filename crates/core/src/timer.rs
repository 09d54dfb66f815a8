use crate::format::format_timestamp;

pub const DEFAULT_MINUTES: u32 = 25;
pub const MAX_MINUTES: u32 = 120;

/// Pomodoro-style countdown driven by one-second ticks.
#[derive(Debug, Clone)]
pub struct FocusTimer {
    remaining: u64,
    active: bool,
    time_up: bool,
    custom_minutes: String,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self {
            remaining: u64::from(DEFAULT_MINUTES) * 60,
            active: false,
            time_up: false,
            custom_minutes: DEFAULT_MINUTES.to_string(),
        }
    }
}

impl FocusTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the countdown reached zero since the last reset.
    pub fn is_time_up(&self) -> bool {
        self.time_up
    }

    pub fn toggle(&mut self) {
        self.active = !self.active;
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) {
        if self.active && self.remaining > 0 {
            self.remaining -= 1;
        }
        if self.remaining == 0 && !self.time_up {
            self.active = false;
            self.time_up = true;
        }
    }

    /// Stop and rewind to the custom duration.
    pub fn reset(&mut self) {
        self.active = false;
        self.remaining = u64::from(self.parsed_custom_minutes().unwrap_or(0)) * 60;
        self.time_up = false;
    }

    /// Accept a new custom duration only if it is all digits and at most
    /// [`MAX_MINUTES`]; returns whether it was accepted.
    pub fn set_custom_minutes(&mut self, value: &str) -> bool {
        let digits_only = value.chars().all(|c| c.is_ascii_digit());
        let within_limit = value.parse::<u32>().is_ok_and(|m| m <= MAX_MINUTES);

        if digits_only && within_limit {
            self.custom_minutes = value.to_string();
            true
        } else {
            false
        }
    }

    /// Load the custom duration, falling back to [`DEFAULT_MINUTES`] when it
    /// is empty or zero.
    pub fn apply_custom_minutes(&mut self) {
        let minutes = self
            .parsed_custom_minutes()
            .filter(|m| *m > 0)
            .unwrap_or(DEFAULT_MINUTES);
        self.remaining = u64::from(minutes) * 60;
    }

    pub fn display(&self) -> String {
        format_timestamp(self.remaining)
    }

    fn parsed_custom_minutes(&self) -> Option<u32> {
        self.custom_minutes.parse().ok()
    }
}
