use super::ticks::{TICKS_PER_HOUR, TICKS_PER_MINUTE, TICKS_PER_SECOND, TickSpan};
use crate::error::Error;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Number of fractional-second digits appended to a rendered time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum TimeAccuracy {
    Seconds,
    Tenths,
    #[default]
    Hundredths,
    Milliseconds,
}

impl TimeAccuracy {
    pub const ALL: [TimeAccuracy; 4] = [
        TimeAccuracy::Seconds,
        TimeAccuracy::Tenths,
        TimeAccuracy::Hundredths,
        TimeAccuracy::Milliseconds,
    ];
}

impl fmt::Display for TimeAccuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeAccuracy::Seconds => "Seconds",
            TimeAccuracy::Tenths => "Tenths",
            TimeAccuracy::Hundredths => "Hundredths",
            TimeAccuracy::Milliseconds => "Milliseconds",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TimeAccuracy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Seconds" => Ok(TimeAccuracy::Seconds),
            "Tenths" => Ok(TimeAccuracy::Tenths),
            "Hundredths" => Ok(TimeAccuracy::Hundredths),
            "Milliseconds" => Ok(TimeAccuracy::Milliseconds),
            other => Err(Error::InvalidAccuracy(other.to_string())),
        }
    }
}

/// The slice of the settings the formatter reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatPolicy {
    pub accuracy: TimeAccuracy,
    /// Render times of a minute or more without a decimal suffix. Does not
    /// apply once the time reaches an hour.
    pub drop_decimals: bool,
}

/// Render an elapsed time for display.
///
/// Three templates, checked in order at native tick granularity:
/// `H:MM:SS` with a decimal suffix for times of an hour or more (the
/// drop-decimals flag is ignored there), bare `M:SS` for times of a minute
/// or more when decimals are dropped, `M:SS` with a decimal suffix
/// otherwise. Fractional digits are truncated from the sub-second tick
/// remainder, never re-rounded.
pub fn format_time(span: TickSpan, policy: FormatPolicy) -> String {
    // Negative spans render their absolute components, like the host timer.
    let ticks = span.ticks().unsigned_abs();
    let total_hours = ticks / TICKS_PER_HOUR as u64;
    let total_minutes = ticks / TICKS_PER_MINUTE as u64;
    let seconds = ticks / TICKS_PER_SECOND as u64 % 60;
    let subsec_ticks = ticks % TICKS_PER_SECOND as u64;

    if total_hours >= 1 {
        format!(
            "{}:{:02}:{:02}{}",
            total_hours,
            total_minutes % 60,
            seconds,
            decimal_suffix(subsec_ticks, policy.accuracy)
        )
    } else if policy.drop_decimals && total_minutes >= 1 {
        format!("{}:{:02}", total_minutes, seconds)
    } else {
        format!(
            "{}:{:02}{}",
            total_minutes,
            seconds,
            decimal_suffix(subsec_ticks, policy.accuracy)
        )
    }
}

fn decimal_suffix(subsec_ticks: u64, accuracy: TimeAccuracy) -> String {
    match accuracy {
        TimeAccuracy::Seconds => String::new(),
        TimeAccuracy::Tenths => format!(".{}", subsec_ticks / 1_000_000),
        TimeAccuracy::Hundredths => format!(".{:02}", subsec_ticks / 100_000),
        TimeAccuracy::Milliseconds => format!(".{:03}", subsec_ticks / 10_000),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(accuracy: TimeAccuracy, drop_decimals: bool) -> FormatPolicy {
        FormatPolicy {
            accuracy,
            drop_decimals,
        }
    }

    #[test]
    fn test_under_one_minute_keeps_decimals() {
        let span = TickSpan::from_hms_millis(0, 0, 45, 456);
        assert_eq!(
            format_time(span, policy(TimeAccuracy::Hundredths, true)),
            "0:45.45"
        );
    }

    #[test]
    fn test_over_one_minute_drops_decimals() {
        let span = TickSpan::from_hms_millis(0, 1, 30, 456);
        assert_eq!(
            format_time(span, policy(TimeAccuracy::Hundredths, true)),
            "1:30"
        );
        assert_eq!(
            format_time(span, policy(TimeAccuracy::Hundredths, false)),
            "1:30.45"
        );
    }

    #[test]
    fn test_hour_branch_ignores_drop_decimals() {
        let span = TickSpan::from_hms_millis(1, 5, 30, 123);
        for drop_decimals in [true, false] {
            assert_eq!(
                format_time(span, policy(TimeAccuracy::Milliseconds, drop_decimals)),
                "1:05:30.123"
            );
        }
    }

    #[test]
    fn test_hour_boundary() {
        let under = TickSpan::from_hms_millis(0, 59, 59, 999);
        let at = TickSpan::from_hms_millis(1, 0, 0, 0);
        assert_eq!(
            format_time(under, policy(TimeAccuracy::Milliseconds, false)),
            "59:59.999"
        );
        assert_eq!(format_time(under, policy(TimeAccuracy::Milliseconds, true)), "59:59");
        assert_eq!(
            format_time(at, policy(TimeAccuracy::Milliseconds, true)),
            "1:00:00.000"
        );
    }

    #[test]
    fn test_one_tick_under_the_hour_stays_short() {
        // The comparison happens at tick granularity, not on rounded values.
        let span = TickSpan::from_ticks(TickSpan::from_hms_millis(1, 0, 0, 0).ticks() - 1);
        assert_eq!(
            format_time(span, policy(TimeAccuracy::Seconds, false)),
            "59:59"
        );
    }

    #[test]
    fn test_minute_boundary() {
        let under = TickSpan::from_hms_millis(0, 0, 59, 999);
        let at = TickSpan::from_secs(60);
        assert_eq!(
            format_time(under, policy(TimeAccuracy::Hundredths, true)),
            "0:59.99"
        );
        assert_eq!(format_time(at, policy(TimeAccuracy::Hundredths, true)), "1:00");
    }

    #[test]
    fn test_accuracy_digit_counts() {
        let span = TickSpan::from_hms_millis(0, 0, 7, 987);
        assert_eq!(format_time(span, policy(TimeAccuracy::Seconds, false)), "0:07");
        assert_eq!(format_time(span, policy(TimeAccuracy::Tenths, false)), "0:07.9");
        assert_eq!(
            format_time(span, policy(TimeAccuracy::Hundredths, false)),
            "0:07.98"
        );
        assert_eq!(
            format_time(span, policy(TimeAccuracy::Milliseconds, false)),
            "0:07.987"
        );
    }

    #[test]
    fn test_digits_truncate_instead_of_rounding() {
        let span = TickSpan::from_hms_millis(0, 0, 0, 999);
        assert_eq!(format_time(span, policy(TimeAccuracy::Hundredths, false)), "0:00.99");
        assert_eq!(format_time(span, policy(TimeAccuracy::Tenths, false)), "0:00.9");
        assert_eq!(format_time(span, policy(TimeAccuracy::Seconds, false)), "0:00");
    }

    #[test]
    fn test_zero_renders_with_default_policy() {
        assert_eq!(format_time(TickSpan::ZERO, FormatPolicy::default()), "0:00.00");
    }

    #[test]
    fn test_hours_have_no_leading_zero() {
        let span = TickSpan::from_hms_millis(12, 3, 4, 0);
        assert_eq!(
            format_time(span, policy(TimeAccuracy::Seconds, true)),
            "12:03:04"
        );
    }

    #[test]
    fn test_accuracy_names_round_trip() {
        for accuracy in TimeAccuracy::ALL {
            assert_eq!(
                accuracy.to_string().parse::<TimeAccuracy>().unwrap(),
                accuracy
            );
        }
    }
}
