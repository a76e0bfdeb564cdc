use crate::OutputFormat;
use crate::clock::{ConvertDirection, TickSpan};
use crate::component::TimeComponent;
use crate::settings::{self, SettingsSnapshot};
use anyhow::{Context, Result};

pub fn run(time: &str, direction: Option<ConvertDirection>, format: OutputFormat) -> Result<()> {
    let raw = TickSpan::parse(time).with_context(|| format!("Cannot convert '{}'", time))?;

    let mut snapshot = settings::load()?;
    if let Some(direction) = direction {
        // A flag overrides the stored direction for this invocation only.
        snapshot = SettingsSnapshot {
            convert_direction: direction,
            ..snapshot
        };
    }

    let component = TimeComponent::new(snapshot);
    let display = component.update(Some(raw));

    match format {
        OutputFormat::Text => {
            println!("{}: {}", component.display_name(), display);
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "input": time,
                "direction": snapshot.convert_direction.to_string(),
                "display": display,
            });
            println!("{}", json);
        }
    }

    Ok(())
}
