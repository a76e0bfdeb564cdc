pub mod convert;
pub mod format;
pub mod ticks;

pub use convert::{ConvertDirection, convert};
pub use format::{FormatPolicy, TimeAccuracy, format_time};
pub use ticks::TickSpan;
