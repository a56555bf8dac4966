//! In-game clock simulation.
//!
//! Real time is mapped onto a 24-hour cycle running seven times faster,
//! shifted by a fixed reference offset. Two zones share the same clock and
//! differ by half a simulated day.
//!
//! ```text
//! simulated_ms = (real_ms * 7 + 3h + zone_offset) mod 24h
//! ```
//!
//! On top of the clock sits a recurring window, open 22:00-04:00 simulated,
//! with a countdown to the next transition in real minutes.
//!
//! ## Usage
//!
//! ```
//! use portfolio_core::tarkov::{compute, EvaluationMode, TarkovClock, Zone};
//!
//! let status = compute(Zone::Left, 0);
//! assert_eq!(status.clock.time_text(), "03:00:00");
//!
//! // Preview an arbitrary instant without a live countdown
//! let clock = TarkovClock::new();
//! let preview = clock.status(Zone::Right, 1_700_000_000_000, EvaluationMode::Planning);
//! assert!(preview.clock.hours < 24);
//! ```
//!
//! Every call recomputes from scratch, so periodic refresh is just calling
//! again (see [`ticker::ZoneTicker`]).

pub mod clock;
pub mod schedule;
pub mod ticker;

use std::fmt;
use std::str::FromStr;

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PortfolioError;

pub use clock::{real_ms_for_simulated, simulated_ms, SimulatedClockReading};
pub use schedule::{Labels, NextEvent, ScheduleStatus};
pub use ticker::{NowSource, SystemNow, ZoneTicker, DEFAULT_PERIOD};

/// Simulated time runs this many times faster than real time
pub const ACCELERATION: i64 = 7;

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Fixed timezone shift applied to every zone (3 simulated hours)
pub const REFERENCE_OFFSET_MS: i64 = 3 * MS_PER_HOUR;

/// Base and current instant further apart than this count as planning
pub const PLANNING_THRESHOLD_MS: i64 = 10_000;

/// One of the two phase-shifted clocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// No offset
    Left,
    /// Half a simulated day ahead of `Left`
    Right,
}

impl Zone {
    pub const ALL: [Zone; 2] = [Zone::Left, Zone::Right];

    /// Simulated offset added on top of the reference offset
    pub const fn offset_ms(self) -> i64 {
        match self {
            Zone::Left => 0,
            Zone::Right => 12 * MS_PER_HOUR,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Zone::Left => "left",
            Zone::Right => "right",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Zone::Left),
            "right" => Ok(Zone::Right),
            _ => Err(PortfolioError::InvalidZone(s.to_string())),
        }
    }
}

/// How the displayed countdown is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvaluationMode {
    /// Ticking countdown: the gap between the projected event and `now_ms`
    Live { now_ms: i64 },
    /// Static preview: the countdown measured from the base time
    Planning,
}

impl EvaluationMode {
    /// Pick the mode from how far the base time is from the current instant
    pub fn infer(base_ms: i64, now_ms: i64) -> Self {
        if (i128::from(base_ms) - i128::from(now_ms)).abs() > i128::from(PLANNING_THRESHOLD_MS) {
            EvaluationMode::Planning
        } else {
            EvaluationMode::Live { now_ms }
        }
    }

    pub fn is_planning(&self) -> bool {
        matches!(self, EvaluationMode::Planning)
    }
}

/// Full status of one zone at one real instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TarkovStatus {
    pub zone: Zone,
    /// Real instant the status was computed for (ms since epoch)
    pub base_ms: i64,
    pub clock: SimulatedClockReading,
    pub schedule: ScheduleStatus,
}

/// Both zones evaluated at the same instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonePair {
    pub left: TarkovStatus,
    pub right: TarkovStatus,
}

impl ZonePair {
    pub fn get(&self, zone: Zone) -> &TarkovStatus {
        match zone {
            Zone::Left => &self.left,
            Zone::Right => &self.right,
        }
    }
}

/// Clock evaluator bound to a display timezone and label set
#[derive(Debug, Clone)]
pub struct TarkovClock<Tz: TimeZone = Utc> {
    tz: Tz,
    labels: Labels,
}

impl TarkovClock<Utc> {
    /// Evaluator rendering real times in UTC with the default labels
    pub fn new() -> Self {
        Self::with_timezone(Utc)
    }
}

impl Default for TarkovClock<Utc> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz> TarkovClock<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    pub fn with_timezone(tz: Tz) -> Self {
        Self {
            tz,
            labels: Labels::default(),
        }
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Status of `zone` at the real instant `base_ms`
    pub fn status(&self, zone: Zone, base_ms: i64, mode: EvaluationMode) -> TarkovStatus {
        let clock = SimulatedClockReading::at(zone, base_ms);
        let schedule = schedule::schedule_for(&clock, base_ms, mode, &self.tz, &self.labels);
        tracing::trace!(%zone, base_ms, time = %clock, open = schedule.is_open, "Computed zone status");

        TarkovStatus {
            zone,
            base_ms,
            clock,
            schedule,
        }
    }

    /// Both zones at the same instant
    pub fn zones(&self, base_ms: i64, mode: EvaluationMode) -> ZonePair {
        ZonePair {
            left: self.status(Zone::Left, base_ms, mode),
            right: self.status(Zone::Right, base_ms, mode),
        }
    }
}

/// Live status of `zone` at `real_ms`, real times rendered in UTC
pub fn compute(zone: Zone, real_ms: i64) -> TarkovStatus {
    TarkovClock::new().status(zone, real_ms, EvaluationMode::Live { now_ms: real_ms })
}

/// Zero-padded `HH:MM:SS`
pub fn format_time(hours: u8, minutes: u8, seconds: u8) -> String {
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// `n / d` rounded to the nearest integer, halves rounding up
pub(crate) fn round_div(n: i64, d: i64) -> i64 {
    let (n, d) = (i128::from(n), i128::from(d));
    (2 * n + d).div_euclid(2 * d) as i64
}
