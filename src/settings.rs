use crate::clock::{ConvertDirection, FormatPolicy, TimeAccuracy};
use crate::color::Color;
use crate::platform;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::{Path, PathBuf};

/// Schema tag written into every persisted document.
pub const SCHEMA_VERSION: &str = "1.0";

const SETTINGS_FILE: &str = "settings.toml";

/// The user-configurable presentation and behavior settings.
///
/// A snapshot is an immutable value: readers hold it for a whole update
/// cycle and editors build a new one and replace it wholesale, so no field
/// ever mutates under a reader. `fingerprint` gives the cheap change signal
/// hosts poll between cycles; `PartialEq` is the exact comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettingsSnapshot {
    pub display_two_rows: bool,
    pub drop_decimals: bool,
    pub accuracy: TimeAccuracy,
    pub override_text_color: bool,
    pub override_time_color: bool,
    pub text_color: Color,
    pub time_color: Color,
    pub convert_direction: ConvertDirection,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            display_two_rows: false,
            drop_decimals: true,
            accuracy: TimeAccuracy::Hundredths,
            override_text_color: false,
            override_time_color: false,
            text_color: Color::WHITE,
            time_color: Color::WHITE,
            convert_direction: ConvertDirection::NsoToGba,
        }
    }
}

impl SettingsSnapshot {
    pub fn format_policy(&self) -> FormatPolicy {
        FormatPolicy {
            accuracy: self.accuracy,
            drop_decimals: self.drop_decimals,
        }
    }

    /// Stringify every field into the tagged document form.
    pub fn to_document(&self) -> SettingsDocument {
        SettingsDocument {
            version: Some(SCHEMA_VERSION.to_string()),
            display_two_rows: Some(self.display_two_rows.to_string()),
            drop_decimals: Some(self.drop_decimals.to_string()),
            accuracy: Some(self.accuracy.to_string()),
            override_text_color: Some(self.override_text_color.to_string()),
            override_time_color: Some(self.override_time_color.to_string()),
            text_color: Some(self.text_color.to_string()),
            time_color: Some(self.time_color.to_string()),
            convert_gba_to_nso: Some(
                (self.convert_direction == ConvertDirection::GbaToNso).to_string(),
            ),
        }
    }

    /// Read a snapshot out of a tagged document.
    ///
    /// Every field is parsed independently; a missing or unparsable field
    /// falls back to its default without disturbing the rest, so partially
    /// old or hand-mangled documents still produce a valid snapshot.
    pub fn from_document(doc: &SettingsDocument) -> Self {
        let defaults = Self::default();
        Self {
            display_two_rows: parse_bool(&doc.display_two_rows, defaults.display_two_rows),
            drop_decimals: parse_bool(&doc.drop_decimals, defaults.drop_decimals),
            accuracy: doc
                .accuracy
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.accuracy),
            override_text_color: parse_bool(&doc.override_text_color, defaults.override_text_color),
            override_time_color: parse_bool(&doc.override_time_color, defaults.override_time_color),
            text_color: parse_color(&doc.text_color, defaults.text_color),
            time_color: parse_color(&doc.time_color, defaults.time_color),
            convert_direction: if parse_bool(&doc.convert_gba_to_nso, false) {
                ConvertDirection::GbaToNso
            } else {
                ConvertDirection::NsoToGba
            },
        }
    }

    /// Order-independent XOR of per-field value hashes, version tag
    /// included. Equal snapshots always match; unequal ones usually
    /// differ, which is all the host's dirty check needs.
    pub fn fingerprint(&self) -> u64 {
        self.to_document()
            .values()
            .into_iter()
            .flatten()
            .fold(0, |acc, value| acc ^ hash_value(&value))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(&self.to_document()).context("Failed to serialize settings")
    }

    /// Parse persisted TOML. Never fails: unreadable fields fall back per
    /// field, an unreadable document falls back to the defaults.
    pub fn from_toml_str(raw: &str) -> Self {
        let table: toml::Table = raw.parse().unwrap_or_default();
        Self::from_document(&SettingsDocument::from_table(&table))
    }
}

fn parse_bool(field: &Option<String>, default: bool) -> bool {
    // The original host wrote "True"/"False", so compare case-insensitively.
    match field.as_deref().map(str::trim) {
        Some(s) if s.eq_ignore_ascii_case("true") => true,
        Some(s) if s.eq_ignore_ascii_case("false") => false,
        _ => default,
    }
}

fn parse_color(field: &Option<String>, default: Color) -> Color {
    field
        .as_deref()
        .and_then(|s| Color::parse(s).ok())
        .unwrap_or(default)
}

fn hash_value(value: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// The persisted settings document: one stringified entry per field, under
/// the exact names (and order) existing settings files use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsDocument {
    #[serde(rename = "Version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "Display2Rows", default, skip_serializing_if = "Option::is_none")]
    pub display_two_rows: Option<String>,
    #[serde(rename = "DropDecimals", default, skip_serializing_if = "Option::is_none")]
    pub drop_decimals: Option<String>,
    #[serde(rename = "Accuracy", default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<String>,
    #[serde(rename = "OverrideTextColor", default, skip_serializing_if = "Option::is_none")]
    pub override_text_color: Option<String>,
    #[serde(rename = "OverrideTimeColor", default, skip_serializing_if = "Option::is_none")]
    pub override_time_color: Option<String>,
    #[serde(rename = "TextColor", default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(rename = "TimeColor", default, skip_serializing_if = "Option::is_none")]
    pub time_color: Option<String>,
    #[serde(rename = "ConvertGBAToNSO", default, skip_serializing_if = "Option::is_none")]
    pub convert_gba_to_nso: Option<String>,
}

impl SettingsDocument {
    /// Lift each known entry of a parsed TOML table into its string form.
    ///
    /// Scalars of the wrong type (a native boolean or integer where our
    /// writer puts a string) are stringified rather than rejected, keeping
    /// the fallback per-field.
    fn from_table(table: &toml::Table) -> Self {
        Self {
            version: lookup(table, "Version"),
            display_two_rows: lookup(table, "Display2Rows"),
            drop_decimals: lookup(table, "DropDecimals"),
            accuracy: lookup(table, "Accuracy"),
            override_text_color: lookup(table, "OverrideTextColor"),
            override_time_color: lookup(table, "OverrideTimeColor"),
            text_color: lookup(table, "TextColor"),
            time_color: lookup(table, "TimeColor"),
            convert_gba_to_nso: lookup(table, "ConvertGBAToNSO"),
        }
    }

    fn values(&self) -> [Option<String>; 9] {
        [
            self.version.clone(),
            self.display_two_rows.clone(),
            self.drop_decimals.clone(),
            self.accuracy.clone(),
            self.override_text_color.clone(),
            self.override_time_color.clone(),
            self.text_color.clone(),
            self.time_color.clone(),
            self.convert_gba_to_nso.clone(),
        ]
    }
}

fn lookup(table: &toml::Table, name: &str) -> Option<String> {
    table.get(name).map(|value| match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

pub fn settings_path(dir_override: Option<&PathBuf>) -> Result<PathBuf> {
    Ok(platform::get_settings_dir(dir_override)?.join(SETTINGS_FILE))
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<SettingsSnapshot> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(SettingsSnapshot::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    Ok(SettingsSnapshot::from_toml_str(&raw))
}

pub fn save_to_path<P: AsRef<Path>>(snapshot: &SettingsSnapshot, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, snapshot.to_toml_string()?)
        .with_context(|| format!("Failed to write settings file {}", path.display()))
}

pub fn load() -> Result<SettingsSnapshot> {
    load_from_path(settings_path(None)?)
}

pub fn save(snapshot: &SettingsSnapshot) -> Result<()> {
    save_to_path(snapshot, settings_path(None)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let snapshot = SettingsSnapshot::default();
        assert!(!snapshot.display_two_rows);
        assert!(snapshot.drop_decimals);
        assert_eq!(snapshot.accuracy, TimeAccuracy::Hundredths);
        assert!(!snapshot.override_text_color);
        assert!(!snapshot.override_time_color);
        assert_eq!(snapshot.text_color, Color::WHITE);
        assert_eq!(snapshot.time_color, Color::WHITE);
        assert_eq!(snapshot.convert_direction, ConvertDirection::NsoToGba);
    }

    #[test]
    fn test_document_field_forms() {
        let doc = SettingsSnapshot::default().to_document();
        assert_eq!(doc.version.as_deref(), Some("1.0"));
        assert_eq!(doc.display_two_rows.as_deref(), Some("false"));
        assert_eq!(doc.drop_decimals.as_deref(), Some("true"));
        assert_eq!(doc.accuracy.as_deref(), Some("Hundredths"));
        assert_eq!(doc.text_color.as_deref(), Some("-1"));
        assert_eq!(doc.convert_gba_to_nso.as_deref(), Some("false"));
    }

    fn non_default_snapshot() -> SettingsSnapshot {
        SettingsSnapshot {
            display_two_rows: true,
            drop_decimals: false,
            accuracy: TimeAccuracy::Milliseconds,
            override_text_color: true,
            override_time_color: true,
            text_color: Color::rgb(0x12, 0x34, 0x56),
            time_color: Color::argb(0x80, 0xaa, 0xbb, 0xcc),
            convert_direction: ConvertDirection::GbaToNso,
        }
    }

    #[test]
    fn test_document_round_trip() {
        for snapshot in [SettingsSnapshot::default(), non_default_snapshot()] {
            let restored = SettingsSnapshot::from_document(&snapshot.to_document());
            assert_eq!(restored, snapshot);
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let snapshot = non_default_snapshot();
        let raw = snapshot.to_toml_string().unwrap();
        assert_eq!(SettingsSnapshot::from_toml_str(&raw), snapshot);
    }

    #[test]
    fn test_toml_field_order() {
        let raw = SettingsSnapshot::default().to_toml_string().unwrap();
        let keys: Vec<&str> = raw
            .lines()
            .filter_map(|line| line.split_once(" = ").map(|(k, _)| k))
            .collect();
        assert_eq!(
            keys,
            [
                "Version",
                "Display2Rows",
                "DropDecimals",
                "Accuracy",
                "OverrideTextColor",
                "OverrideTimeColor",
                "TextColor",
                "TimeColor",
                "ConvertGBAToNSO",
            ]
        );
    }

    #[test]
    fn test_missing_field_falls_back_alone() {
        let mut doc = non_default_snapshot().to_document();
        doc.accuracy = None;
        let snapshot = SettingsSnapshot::from_document(&doc);
        assert_eq!(snapshot.accuracy, TimeAccuracy::Hundredths);
        // Every other field keeps its persisted value.
        assert!(snapshot.display_two_rows);
        assert!(!snapshot.drop_decimals);
        assert_eq!(snapshot.convert_direction, ConvertDirection::GbaToNso);
    }

    #[test]
    fn test_unparsable_fields_fall_back_alone() {
        let mut doc = non_default_snapshot().to_document();
        doc.accuracy = Some("Nanoseconds".to_string());
        doc.text_color = Some("not a color".to_string());
        doc.display_two_rows = Some("yes".to_string());
        let snapshot = SettingsSnapshot::from_document(&doc);
        assert_eq!(snapshot.accuracy, TimeAccuracy::Hundredths);
        assert_eq!(snapshot.text_color, Color::WHITE);
        assert!(!snapshot.display_two_rows);
        assert!(snapshot.override_text_color);
        assert_eq!(snapshot.time_color, Color::argb(0x80, 0xaa, 0xbb, 0xcc));
    }

    #[test]
    fn test_bool_parse_is_case_insensitive() {
        let doc = SettingsDocument {
            display_two_rows: Some("True".to_string()),
            drop_decimals: Some("FALSE".to_string()),
            ..SettingsDocument::default()
        };
        let snapshot = SettingsSnapshot::from_document(&doc);
        assert!(snapshot.display_two_rows);
        assert!(!snapshot.drop_decimals);
    }

    #[test]
    fn test_hex_color_field_is_accepted() {
        let doc = SettingsDocument {
            time_color: Some("#aabbcc".to_string()),
            ..SettingsDocument::default()
        };
        let snapshot = SettingsSnapshot::from_document(&doc);
        assert_eq!(snapshot.time_color, Color::rgb(0xaa, 0xbb, 0xcc));
    }

    #[test]
    fn test_wrong_typed_toml_scalars_still_parse() {
        // A hand-edited document may carry native TOML types.
        let raw = "Display2Rows = true\nTextColor = -1\nAccuracy = \"Seconds\"\n";
        let snapshot = SettingsSnapshot::from_toml_str(raw);
        assert!(snapshot.display_two_rows);
        assert_eq!(snapshot.text_color, Color::WHITE);
        assert_eq!(snapshot.accuracy, TimeAccuracy::Seconds);
        // Untouched fields keep their defaults.
        assert!(snapshot.drop_decimals);
    }

    #[test]
    fn test_unparsable_document_yields_defaults() {
        let snapshot = SettingsSnapshot::from_toml_str("%% not toml at all");
        assert_eq!(snapshot, SettingsSnapshot::default());
    }

    #[test]
    fn test_fingerprint_matches_for_equal_values() {
        assert_eq!(
            SettingsSnapshot::default().fingerprint(),
            SettingsSnapshot::default().fingerprint()
        );
        assert_eq!(
            non_default_snapshot().fingerprint(),
            non_default_snapshot().fingerprint()
        );
    }

    #[test]
    fn test_fingerprint_changes_with_each_field() {
        let base = SettingsSnapshot::default();
        let variants = [
            SettingsSnapshot { display_two_rows: true, ..base },
            SettingsSnapshot { drop_decimals: false, ..base },
            SettingsSnapshot { accuracy: TimeAccuracy::Seconds, ..base },
            SettingsSnapshot { override_text_color: true, ..base },
            SettingsSnapshot { override_time_color: true, ..base },
            SettingsSnapshot { text_color: Color::rgb(1, 2, 3), ..base },
            SettingsSnapshot { time_color: Color::rgb(3, 2, 1), ..base },
            SettingsSnapshot { convert_direction: ConvertDirection::GbaToNso, ..base },
        ];
        for variant in variants {
            assert_ne!(variant.fingerprint(), base.fingerprint(), "{:?}", variant);
        }
    }
}
