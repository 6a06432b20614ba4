//! Settings commands.

use super::{CommandError, Result};
use crate::db::SettingsRepository;
use crate::state::AppState;
use deutschsprint_core::{Clock, FontSize, UserSettings};
use std::str::FromStr;

/// Get user settings.
pub fn get_settings<C: Clock>(state: &AppState<C>) -> Result<UserSettings> {
    state.repo().get_settings().map_err(Into::into)
}

/// Change one setting by key and persist it.
pub fn update_setting<C: Clock>(state: &AppState<C>, key: &str, value: &str) -> Result<UserSettings> {
    let repo = state.repo();
    let mut settings = repo.get_settings()?;

    match key {
        "dark_mode" => settings.dark_mode = parse_value(key, value)?,
        "tts_enabled" => settings.tts_enabled = parse_value(key, value)?,
        "dyslexic_font" => settings.dyslexic_font = parse_value(key, value)?,
        "daily_goal" => settings.daily_goal = parse_value(key, value)?,
        "typo_tolerance" => settings.typo_tolerance = parse_value(key, value)?,
        "font_size" => {
            settings.font_size = match value {
                "small" => FontSize::Small,
                "medium" => FontSize::Medium,
                "large" => FontSize::Large,
                _ => return Err(invalid(key, value)),
            }
        }
        _ => return Err(CommandError::UnknownSetting(key.to_string())),
    }

    repo.save_settings(&settings)?;
    tracing::info!(key, value, "updated setting");
    Ok(settings)
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| invalid(key, value))
}

fn invalid(key: &str, value: &str) -> CommandError {
    CommandError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
