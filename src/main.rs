use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use gba_clock::OutputFormat;
use gba_clock::clock::ConvertDirection;
use gba_clock::commands;

#[derive(Parser)]
#[command(name = "gbac")]
#[command(about = "Converts timer values between the 60Hz NSO clock and the 59.7275Hz GBA clock")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a timer value and render it under the current settings
    Convert {
        #[arg(help = "Elapsed time, e.g. 1:05:30.123, 1:30.456 or plain seconds")]
        time: String,
        #[arg(long, value_enum, help = "Override the configured conversion direction")]
        direction: Option<ConvertDirection>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Inspect or edit the persisted settings
    Config(ConfigArgs),
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print all settings
    List {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Print one settings value
    Get { key: String },
    /// Change one settings value and save
    Set { key: String, value: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Convert {
            time,
            direction,
            format,
        } => {
            commands::convert::run(time, *direction, *format)?;
        }
        Commands::Config(args) => match &args.action {
            ConfigAction::List { format } => commands::config::list(*format)?,
            ConfigAction::Get { key } => commands::config::get(key)?,
            ConfigAction::Set { key, value } => commands::config::set(key, value)?,
        },
    }

    Ok(())
}
