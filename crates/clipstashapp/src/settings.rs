//! # Store Preferences
//!
//! Preferences that live next to the records in the storage backend, each
//! under its own key:
//!
//! | Key | Type | Default |
//! |-----|------|---------|
//! | `clipstash-settings` | [`Settings`] (`{"maxCacheSize": 100}`) | 100 |
//! | `clipstash-theme` | [`Theme`] | `system` |
//! | `clipstash-lang` | [`Language`] | `en` |
//!
//! Settings are merged on save, not replaced: a [`SettingsPatch`] only touches
//! the fields it carries, and keys this version does not know survive.
//!
//! The `[10, 999]` range on `max_cache_size` is enforced at the boundary
//! ([`validate_max_cache_size`], called by the API facade). The store itself
//! accepts any bound.

use crate::error::{ClipError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_CACHE_SIZE: usize = 100;
pub const MIN_MAX_CACHE_SIZE: usize = 10;
pub const MAX_MAX_CACHE_SIZE: usize = 999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_max_cache_size")]
    pub max_cache_size: usize,
}

fn default_max_cache_size() -> usize {
    DEFAULT_MAX_CACHE_SIZE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_cache_size: DEFAULT_MAX_CACHE_SIZE,
        }
    }
}

/// Partial settings update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cache_size: Option<usize>,
}

impl SettingsPatch {
    pub fn max_cache_size(size: usize) -> Self {
        Self {
            max_cache_size: Some(size),
        }
    }
}

pub fn validate_max_cache_size(size: usize) -> Result<usize> {
    if (MIN_MAX_CACHE_SIZE..=MAX_MAX_CACHE_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(ClipError::InvalidSetting(format!(
            "max cache size must be between {} and {}, got {}",
            MIN_MAX_CACHE_SIZE, MAX_MAX_CACHE_SIZE, size
        )))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::System => "system",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = ClipError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "system" => Ok(Theme::System),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ClipError::InvalidSetting(format!(
                "unknown theme '{}' (expected system, light or dark)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Reads a stored code, falling back to English for anything unknown.
    pub fn from_stored(code: &str) -> Self {
        code.parse().unwrap_or_default()
    }
}

impl std::str::FromStr for Language {
    type Err = ClipError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            other => Err(ClipError::InvalidSetting(format!(
                "unknown language '{}' (expected en or zh)",
                other
            ))),
        }
    }
}
