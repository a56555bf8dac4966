//! Open/closed window scheduling.
//!
//! The window is open from 22:00 to 04:00 simulated, crossing midnight.
//! Countdowns are kept in simulated minutes internally and reported in
//! real minutes (simulated / acceleration, rounded half up).

use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use super::clock::SimulatedClockReading;
use super::{round_div, EvaluationMode, ACCELERATION, MS_PER_MINUTE};

/// Simulated hour at which the window opens
pub const OPEN_HOUR: u8 = 22;

/// Simulated hour at which the window closes
pub const CLOSE_HOUR: u8 = 4;

/// Length of the open window in simulated minutes (22:00 -> 04:00)
pub const OPEN_WINDOW_SIM_MINUTES: u32 = 6 * 60;

/// Status and countdown labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub open: &'static str,
    pub closed: &'static str,
    pub opens_in: &'static str,
    pub closes_in: &'static str,
}

impl Labels {
    /// The site's original Russian labels
    pub const fn russian() -> Self {
        Self {
            open: "ОТКРЫТО",
            closed: "ЗАКРЫТО",
            opens_in: "Открытие через",
            closes_in: "Закрытие через",
        }
    }

    pub const fn english() -> Self {
        Self {
            open: "OPEN",
            closed: "CLOSED",
            opens_in: "Opens in",
            closes_in: "Closes in",
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::russian()
    }
}

/// Which way the next transition goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NextEvent {
    Opening,
    Closing,
}

/// Open/closed state and the countdown to the next transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStatus {
    pub is_open: bool,
    pub status_text: String,
    pub next_event: NextEvent,
    pub next_event_text: String,
    /// Real minutes until the next transition, measured from the base time
    pub minutes_to_event: u32,
    /// `HH:MM` countdown as displayed (live or planning, see [`EvaluationMode`])
    pub formatted_countdown: String,
    /// Real instant of the next transition (ms since epoch)
    pub real_event_at_ms: i64,
    /// Real instant the current (or next) open window ends
    pub real_closing_at_ms: i64,
    /// `HH:MM` of `real_event_at_ms` in the display timezone
    pub real_event_time: String,
    /// `HH:MM` of `real_closing_at_ms` in the display timezone
    pub real_closing_time: String,
    /// `HH:MM - HH:MM` span of the current (or next) open window
    pub window_range: String,
}

/// True while the window is open (`hours >= 22 || hours < 4`)
pub fn is_open_at(hours: u8) -> bool {
    hours >= OPEN_HOUR || hours < CLOSE_HOUR
}

/// Convert simulated minutes to real minutes, rounding half up
pub fn sim_to_real_minutes(sim_minutes: u32) -> u32 {
    round_div(i64::from(sim_minutes), ACCELERATION) as u32
}

/// Real minutes one open window lasts
pub fn open_window_real_minutes() -> u32 {
    sim_to_real_minutes(OPEN_WINDOW_SIM_MINUTES)
}

/// Simulated minutes from `reading` until the clock next reaches `target_hour:00`.
///
/// Seconds are ignored, so the value plateaus within a simulated minute.
/// Reaching exactly `target_hour:00` yields a full day, never zero.
fn sim_minutes_until(reading: &SimulatedClockReading, target_hour: u8) -> u32 {
    let mut hours = i32::from(target_hour) - i32::from(reading.hours);
    if hours <= 0 {
        hours += 24;
    }
    (hours * 60 - i32::from(reading.minutes)) as u32
}

/// `HH:MM` rendering of a minute count
pub fn format_countdown(total_minutes: u64) -> String {
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// `HH:MM` of a real instant in `tz`
pub(crate) fn format_real_time<Tz>(tz: &Tz, real_ms: i64) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match tz.timestamp_millis_opt(real_ms).earliest() {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

fn minutes_to_ms(minutes: u32) -> i64 {
    i64::from(minutes) * MS_PER_MINUTE
}

/// Derive the schedule for a clock reading taken at `base_ms`
pub(crate) fn schedule_for<Tz>(
    reading: &SimulatedClockReading,
    base_ms: i64,
    mode: EvaluationMode,
    tz: &Tz,
    labels: &Labels,
) -> ScheduleStatus
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let is_open = is_open_at(reading.hours);
    let (next_event, target_hour, status_text, next_event_text) = if is_open {
        (NextEvent::Closing, CLOSE_HOUR, labels.open, labels.closes_in)
    } else {
        (NextEvent::Opening, OPEN_HOUR, labels.closed, labels.opens_in)
    };

    let minutes_to_event = sim_to_real_minutes(sim_minutes_until(reading, target_hour));
    let real_event_at_ms = base_ms.saturating_add(minutes_to_ms(minutes_to_event));

    let display_minutes = match mode {
        EvaluationMode::Planning => u64::from(minutes_to_event),
        EvaluationMode::Live { now_ms } => {
            let remaining_ms = i128::from(real_event_at_ms) - i128::from(now_ms);
            let rounded = (2 * remaining_ms + i128::from(MS_PER_MINUTE))
                .div_euclid(2 * i128::from(MS_PER_MINUTE));
            rounded.clamp(0, i128::from(u64::MAX)) as u64
        }
    };

    let window_minutes = open_window_real_minutes();
    let minutes_to_closing = if is_open {
        minutes_to_event
    } else {
        minutes_to_event + window_minutes
    };
    let real_closing_at_ms = base_ms.saturating_add(minutes_to_ms(minutes_to_closing));
    let window_start_ms = if is_open {
        real_event_at_ms.saturating_sub(minutes_to_ms(window_minutes))
    } else {
        real_event_at_ms
    };

    ScheduleStatus {
        is_open,
        status_text: status_text.to_string(),
        next_event,
        next_event_text: next_event_text.to_string(),
        minutes_to_event,
        formatted_countdown: format_countdown(display_minutes),
        real_event_at_ms,
        real_closing_at_ms,
        real_event_time: format_real_time(tz, real_event_at_ms),
        real_closing_time: format_real_time(tz, real_closing_at_ms),
        window_range: format!(
            "{} - {}",
            format_real_time(tz, window_start_ms),
            format_real_time(tz, real_closing_at_ms)
        ),
    }
}
