//! Crafting timer.
//!
//! A craft is a start instant plus a configured duration; everything else
//! is elapsed-time arithmetic against the current instant.

use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// Configured craft length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CraftDuration {
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub seconds: u32,
}

impl CraftDuration {
    pub const fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Build a duration, rejecting minutes or seconds outside `0..60`
    pub fn checked(hours: u32, minutes: u32, seconds: u32) -> PortfolioResult<Self> {
        if minutes >= 60 || seconds >= 60 {
            return Err(PortfolioError::InvalidDuration(format!(
                "{}h {}m {}s: minutes and seconds must be below 60",
                hours, minutes, seconds
            )));
        }
        Ok(Self::new(hours, minutes, seconds))
    }

    pub fn total_ms(&self) -> i64 {
        (i64::from(self.hours) * 3600 + i64::from(self.minutes) * 60 + i64::from(self.seconds))
            * 1000
    }
}

impl Default for CraftDuration {
    /// 39 hours, the longest hideout craft
    fn default() -> Self {
        Self::new(39, 0, 0)
    }
}

impl std::fmt::Display for CraftDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h {:02}m {:02}s", self.hours, self.minutes, self.seconds)
    }
}

/// Point-in-time view of a craft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftProgress {
    pub is_crafting: bool,
    pub is_ready: bool,
    pub elapsed_ms: i64,
    pub remaining_ms: i64,
    /// Percent complete, `0.0..=100.0`
    pub progress: f64,
    pub formatted_remaining: String,
    pub completion_at_ms: Option<i64>,
}

/// Crafting timer state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftTimer {
    pub duration: CraftDuration,
    pub started_at_ms: Option<i64>,
}

impl CraftTimer {
    pub fn new(duration: CraftDuration) -> Self {
        Self {
            duration,
            started_at_ms: None,
        }
    }

    /// Start (or restart) the craft at `now_ms`
    pub fn start(&mut self, now_ms: i64) {
        self.started_at_ms = Some(now_ms);
    }

    /// Cancel the running craft, keeping the configured duration
    pub fn reset(&mut self) {
        self.started_at_ms = None;
    }

    pub fn set_duration(&mut self, duration: CraftDuration) {
        self.duration = duration;
    }

    pub fn is_crafting(&self) -> bool {
        self.started_at_ms.is_some()
    }

    pub fn total_duration_ms(&self) -> i64 {
        self.duration.total_ms()
    }

    pub fn elapsed_ms(&self, now_ms: i64) -> i64 {
        match self.started_at_ms {
            Some(start) => now_ms.saturating_sub(start).max(0),
            None => 0,
        }
    }

    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        if !self.is_crafting() {
            return 0;
        }
        (self.total_duration_ms() - self.elapsed_ms(now_ms)).max(0)
    }

    /// Percent complete; a zero-length craft is done as soon as it starts
    pub fn progress(&self, now_ms: i64) -> f64 {
        if !self.is_crafting() {
            return 0.0;
        }
        let total = self.total_duration_ms();
        if total == 0 {
            return 100.0;
        }
        (self.elapsed_ms(now_ms) as f64 / total as f64 * 100.0).min(100.0)
    }

    pub fn is_ready(&self, now_ms: i64) -> bool {
        self.is_crafting() && self.remaining_ms(now_ms) == 0
    }

    pub fn completion_at_ms(&self) -> Option<i64> {
        self.started_at_ms
            .map(|start| start.saturating_add(self.total_duration_ms()))
    }

    /// Remaining time as `HH:MM:SS`; hours are not wrapped
    pub fn formatted_remaining(&self, now_ms: i64) -> String {
        let ms = self.remaining_ms(now_ms);
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1000;
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }

    pub fn snapshot(&self, now_ms: i64) -> CraftProgress {
        CraftProgress {
            is_crafting: self.is_crafting(),
            is_ready: self.is_ready(now_ms),
            elapsed_ms: self.elapsed_ms(now_ms),
            remaining_ms: self.remaining_ms(now_ms),
            progress: self.progress(now_ms),
            formatted_remaining: self.formatted_remaining(now_ms),
            completion_at_ms: self.completion_at_ms(),
        }
    }
}
