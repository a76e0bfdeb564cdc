use thiserror::Error;

/// Parse failures at the crate's input seams.
///
/// Settings-document reads recover from these locally by falling back to
/// field defaults; the CLI surfaces them to the user instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid time '{0}', expected [H:]M:SS[.fff] or plain seconds")]
    InvalidTime(String),
    #[error("invalid color '{0}', expected #hex or a signed 32-bit ARGB integer")]
    InvalidColor(String),
    #[error("unknown accuracy '{0}', expected Seconds, Tenths, Hundredths or Milliseconds")]
    InvalidAccuracy(String),
    #[error("unknown direction '{0}', expected nso-to-gba or gba-to-nso")]
    InvalidDirection(String),
    #[error("unknown settings key '{0}'")]
    UnknownKey(String),
}
