use super::ticks::TickSpan;
use crate::error::Error;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The NSO reference clock runs at 60Hz, the GBA hardware clock at
/// 59.7275Hz. Their exact ratio 60 / 59.7275 reduces to 24000 / 23891.
const RATIO_NUM: i128 = 24_000;
const RATIO_DEN: i128 = 23_891;

/// Which clock base the input time was measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, ValueEnum)]
pub enum ConvertDirection {
    /// Input is 60Hz NSO time, output is 59.7275Hz GBA time.
    #[default]
    NsoToGba,
    /// Input is 59.7275Hz GBA time, output is 60Hz NSO time.
    GbaToNso,
}

impl ConvertDirection {
    pub fn description(self) -> &'static str {
        match self {
            ConvertDirection::NsoToGba => "Converts 60Hz NSO time to 59.7275Hz GBA time",
            ConvertDirection::GbaToNso => "Converts 59.7275Hz GBA time to 60Hz NSO time",
        }
    }
}

impl fmt::Display for ConvertDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertDirection::NsoToGba => write!(f, "nso-to-gba"),
            ConvertDirection::GbaToNso => write!(f, "gba-to-nso"),
        }
    }
}

impl FromStr for ConvertDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "nso-to-gba" => Ok(ConvertDirection::NsoToGba),
            "gba-to-nso" => Ok(ConvertDirection::GbaToNso),
            other => Err(Error::InvalidDirection(other.to_string())),
        }
    }
}

/// Convert an elapsed time from one clock base to the other.
///
/// NSO to GBA multiplies by the exact rational ratio; GBA to NSO divides by
/// it (a true reciprocal, not a separately rounded constant). The result is
/// rounded to the nearest tick exactly once, ties away from zero, so
/// repeated calls with the same input can never accumulate drift.
pub fn convert(span: TickSpan, direction: ConvertDirection) -> TickSpan {
    match direction {
        ConvertDirection::NsoToGba => mul_div_round(span.ticks(), RATIO_NUM, RATIO_DEN),
        ConvertDirection::GbaToNso => mul_div_round(span.ticks(), RATIO_DEN, RATIO_NUM),
    }
}

fn mul_div_round(ticks: i64, num: i128, den: i128) -> TickSpan {
    // i64 ticks times a five-digit numerator fits i128 with room to spare.
    let doubled = 2 * ticks as i128 * num;
    let bias = if doubled >= 0 { den } else { -den };
    TickSpan::from_ticks(((doubled + bias) / (2 * den)) as i64)
}
