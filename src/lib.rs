pub mod clock;
pub mod color;
pub mod commands;
pub mod component;
pub mod error;
pub mod platform;
pub mod settings;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, ValueEnum, Debug, Default, Serialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
