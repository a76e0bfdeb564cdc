use crate::clock::{self, ConvertDirection, TickSpan};
use crate::settings::SettingsSnapshot;

/// The host-facing converter component: holds the current settings
/// snapshot and turns the host's raw timer value into a display string on
/// every update cycle.
///
/// The component keeps no state between updates beyond the snapshot
/// itself, and the snapshot is only ever replaced wholesale. Hosts detect
/// settings changes by polling [`settings_fingerprint`].
///
/// [`settings_fingerprint`]: TimeComponent::settings_fingerprint
#[derive(Debug, Clone, Default)]
pub struct TimeComponent {
    settings: SettingsSnapshot,
}

impl TimeComponent {
    pub fn new(settings: SettingsSnapshot) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SettingsSnapshot {
        &self.settings
    }

    /// Replace the settings wholesale.
    pub fn set_settings(&mut self, settings: SettingsSnapshot) {
        self.settings = settings;
    }

    pub fn settings_fingerprint(&self) -> u64 {
        self.settings.fingerprint()
    }

    /// Label for the rendered value, named after the clock base the
    /// conversion targets.
    pub fn display_name(&self) -> &'static str {
        match self.settings.convert_direction {
            ConvertDirection::NsoToGba => "GBA Time",
            ConvertDirection::GbaToNso => "NSO Time",
        }
    }

    /// One update cycle: convert the host's raw timer value and render it
    /// under the current settings. A host with no running timer passes
    /// `None` and gets the zero display.
    pub fn update(&self, raw: Option<TickSpan>) -> String {
        let raw = raw.unwrap_or_default();
        let converted = clock::convert(raw, self.settings.convert_direction);
        clock::format_time(converted, self.settings.format_policy())
    }
}
