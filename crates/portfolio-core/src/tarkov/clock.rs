//! Simulated clock readings.
//!
//! Maps a real-world timestamp onto the accelerated 24-hour cycle. The
//! mapping is recomputed from scratch on every call; nothing is stored.

use serde::{Deserialize, Serialize};

use super::{
    format_time, Zone, ACCELERATION, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND,
    REFERENCE_OFFSET_MS,
};

/// First simulated hour counted as daytime
pub const DAY_START_HOUR: u8 = 5;

/// First simulated hour counted as night
pub const NIGHT_START_HOUR: u8 = 22;

/// Simulated milliseconds into the current day for `zone` at `real_ms`.
///
/// The acceleration is applied to the full timestamp before wrapping, so
/// the result is exact for any `i64` input. Pre-epoch timestamps wrap with a
/// Euclidean remainder and stay in `[0, MS_PER_DAY)`.
pub fn simulated_ms(zone: Zone, real_ms: i64) -> i64 {
    let scaled = i128::from(real_ms) * i128::from(ACCELERATION)
        + i128::from(REFERENCE_OFFSET_MS)
        + i128::from(zone.offset_ms());
    // Always < MS_PER_DAY, so the narrowing is lossless.
    scaled.rem_euclid(i128::from(MS_PER_DAY)) as i64
}

/// Multiplicative inverse of the acceleration factor modulo one day
const ACCELERATION_INVERSE: i128 = 74_057_143;

/// Earliest non-negative real timestamp at which `zone` shows `sim_ms`.
///
/// Inverse of [`simulated_ms`] over the first real day after the epoch.
/// Later occurrences repeat every `MS_PER_DAY` real milliseconds.
pub fn real_ms_for_simulated(zone: Zone, sim_ms: i64) -> i64 {
    let day = i128::from(MS_PER_DAY);
    let shifted = (i128::from(sim_ms)
        - i128::from(REFERENCE_OFFSET_MS)
        - i128::from(zone.offset_ms()))
    .rem_euclid(day);
    (shifted * ACCELERATION_INVERSE).rem_euclid(day) as i64
}

/// Simulated wall time for one zone at a given real instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimulatedClockReading {
    /// Hour of the simulated day, `0..24`
    pub hours: u8,
    /// Minute of the hour, `0..60`
    pub minutes: u8,
    /// Second of the minute, `0..60`
    pub seconds: u8,
    /// True between 05:00 and 22:00 simulated
    pub is_day: bool,
}

impl SimulatedClockReading {
    /// Read the simulated clock of `zone` at the real instant `real_ms`
    pub fn at(zone: Zone, real_ms: i64) -> Self {
        Self::from_simulated_ms(simulated_ms(zone, real_ms))
    }

    /// Split a simulated time-of-day (already wrapped to one day) into fields
    pub fn from_simulated_ms(sim_ms: i64) -> Self {
        let sim_ms = sim_ms.rem_euclid(MS_PER_DAY);
        let hours = (sim_ms / MS_PER_HOUR) as u8;
        let minutes = ((sim_ms % MS_PER_HOUR) / MS_PER_MINUTE) as u8;
        let seconds = ((sim_ms % MS_PER_MINUTE) / MS_PER_SECOND) as u8;

        Self {
            hours,
            minutes,
            seconds,
            is_day: (DAY_START_HOUR..NIGHT_START_HOUR).contains(&hours),
        }
    }

    /// `HH:MM:SS` rendering of the reading
    pub fn time_text(&self) -> String {
        format_time(self.hours, self.minutes, self.seconds)
    }

    /// Minutes since simulated midnight
    pub fn minute_of_day(&self) -> u32 {
        u32::from(self.hours) * 60 + u32::from(self.minutes)
    }
}

impl std::fmt::Display for SimulatedClockReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({})",
            self.time_text(),
            if self.is_day { "day" } else { "night" }
        )
    }
}
