use crate::OutputFormat;
use crate::clock::ConvertDirection;
use crate::color::Color;
use crate::error::Error;
use crate::settings::{self, SettingsSnapshot};
use anyhow::{Context, Result};

pub fn list(format: OutputFormat) -> Result<()> {
    let snapshot = settings::load()?;
    match format {
        OutputFormat::Text => {
            // Print the document form, exactly what the settings file holds.
            println!("# {}", snapshot.convert_direction.description());
            print!("{}", snapshot.to_toml_string()?);
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&snapshot).context("Failed to serialize settings")?;
            println!("{}", json);
        }
    }
    Ok(())
}

pub fn get(key: &str) -> Result<()> {
    let snapshot = settings::load()?;
    println!("{}", field_value(&snapshot, key)?);
    Ok(())
}

pub fn set(key: &str, value: &str) -> Result<()> {
    let old = settings::load()?;
    let new = with_field(&old, key, value)?;
    settings::save(&new)?;

    println!("{} = {}", key, field_value(&new, key)?);
    if new.fingerprint() != old.fingerprint() {
        println!(
            "Settings changed (fingerprint {:016x} -> {:016x})",
            old.fingerprint(),
            new.fingerprint()
        );
    }
    Ok(())
}

/// Stringified value of one snapshot field, in the same form the persisted
/// document uses.
fn field_value(snapshot: &SettingsSnapshot, key: &str) -> Result<String> {
    let value = match key {
        "display_two_rows" => snapshot.display_two_rows.to_string(),
        "drop_decimals" => snapshot.drop_decimals.to_string(),
        "accuracy" => snapshot.accuracy.to_string(),
        "override_text_color" => snapshot.override_text_color.to_string(),
        "override_time_color" => snapshot.override_time_color.to_string(),
        "text_color" => snapshot.text_color.to_string(),
        "time_color" => snapshot.time_color.to_string(),
        "convert_direction" => snapshot.convert_direction.to_string(),
        _ => return Err(Error::UnknownKey(key.to_string()).into()),
    };
    Ok(value)
}

/// Build the replacement snapshot with one field changed. Unlike the
/// lenient document reader, explicit user input fails loudly.
fn with_field(snapshot: &SettingsSnapshot, key: &str, value: &str) -> Result<SettingsSnapshot> {
    let mut new = *snapshot;
    match key {
        "display_two_rows" => new.display_two_rows = parse_bool(value)?,
        "drop_decimals" => new.drop_decimals = parse_bool(value)?,
        "accuracy" => new.accuracy = value.parse()?,
        "override_text_color" => new.override_text_color = parse_bool(value)?,
        "override_time_color" => new.override_time_color = parse_bool(value)?,
        "text_color" => new.text_color = Color::parse(value)?,
        "time_color" => new.time_color = Color::parse(value)?,
        "convert_direction" => new.convert_direction = value.parse::<ConvertDirection>()?,
        _ => return Err(Error::UnknownKey(key.to_string()).into()),
    }
    Ok(new)
}

fn parse_bool(value: &str) -> Result<bool> {
    value
        .trim()
        .parse()
        .with_context(|| format!("Expected 'true' or 'false', got '{}'", value))
}
