use crate::error::Error;
use chrono::TimeDelta;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Tick resolution of the host timer: 100 nanoseconds.
pub const TICKS_PER_SECOND: i64 = 10_000_000;
pub const TICKS_PER_MILLISECOND: i64 = TICKS_PER_SECOND / 1_000;
pub const TICKS_PER_MINUTE: i64 = 60 * TICKS_PER_SECOND;
pub const TICKS_PER_HOUR: i64 = 60 * TICKS_PER_MINUTE;

/// Elapsed time as a signed count of 100ns ticks.
///
/// This is the native resolution of the host timer, so comparisons and
/// formatting never go through floating point. All operations are pure
/// functions of the tick count alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickSpan {
    ticks: i64,
}

impl TickSpan {
    pub const ZERO: TickSpan = TickSpan { ticks: 0 };

    pub const fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self {
            ticks: secs * TICKS_PER_SECOND,
        }
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self {
            ticks: millis * TICKS_PER_MILLISECOND,
        }
    }

    pub const fn from_hms_millis(hours: i64, minutes: i64, seconds: i64, millis: i64) -> Self {
        Self {
            ticks: hours * TICKS_PER_HOUR
                + minutes * TICKS_PER_MINUTE
                + seconds * TICKS_PER_SECOND
                + millis * TICKS_PER_MILLISECOND,
        }
    }

    pub const fn ticks(self) -> i64 {
        self.ticks
    }

    /// Whole hours, truncated at tick granularity.
    pub const fn whole_hours(self) -> i64 {
        self.ticks / TICKS_PER_HOUR
    }

    /// Whole minutes, truncated at tick granularity.
    pub const fn whole_minutes(self) -> i64 {
        self.ticks / TICKS_PER_MINUTE
    }

    /// Parse `[H:]M:SS[.frac]` or a plain seconds value like `45` or `45.5`.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let trimmed = s.trim();
        let invalid = || Error::InvalidTime(s.to_string());
        if trimmed.is_empty() {
            return Err(invalid());
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() > 3 {
            return Err(invalid());
        }

        // All parts before the last are whole hour/minute fields.
        let mut ticks: i64 = 0;
        for part in &parts[..parts.len() - 1] {
            let field: i64 = part.parse().map_err(|_| invalid())?;
            if field < 0 {
                return Err(invalid());
            }
            ticks = ticks * 60 + field;
        }
        ticks *= TICKS_PER_MINUTE;

        // The last part carries seconds and an optional fraction.
        let last = parts[parts.len() - 1];
        let (secs_str, frac_str) = match last.split_once('.') {
            Some((s, f)) => (s, Some(f)),
            None => (last, None),
        };
        let secs: i64 = secs_str.parse().map_err(|_| invalid())?;
        if secs < 0 || (parts.len() > 1 && secs >= 60) {
            return Err(invalid());
        }
        ticks += secs * TICKS_PER_SECOND;

        if let Some(frac) = frac_str {
            if frac.is_empty() || frac.len() > 7 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let digits: i64 = frac.parse().map_err(|_| invalid())?;
            ticks += digits * 10_i64.pow(7 - frac.len() as u32);
        }

        Ok(Self { ticks })
    }
}

impl From<TimeDelta> for TickSpan {
    fn from(delta: TimeDelta) -> Self {
        // TimeDelta covers a wider range than i64 nanoseconds; microsecond
        // precision always fits and maps exactly onto 100ns ticks.
        Self::from_ticks(delta.num_microseconds().unwrap_or(i64::MAX / 10) * 10)
    }
}

impl From<Duration> for TickSpan {
    fn from(duration: Duration) -> Self {
        let ticks = duration.as_secs() as i64 * TICKS_PER_SECOND
            + duration.subsec_nanos() as i64 / 100;
        Self::from_ticks(ticks)
    }
}

impl FromStr for TickSpan {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TickSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ticks = self.ticks.unsigned_abs();
        if self.ticks < 0 {
            write!(f, "-")?;
        }
        write!(
            f,
            "{}:{:02}:{:02}.{:03}",
            ticks / TICKS_PER_HOUR as u64,
            ticks / TICKS_PER_MINUTE as u64 % 60,
            ticks / TICKS_PER_SECOND as u64 % 60,
            ticks / TICKS_PER_MILLISECOND as u64 % 1_000,
        )
    }
}
