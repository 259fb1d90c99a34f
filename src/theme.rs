use crate::store::KeyValueStore;
use anyhow::Result;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const THEME_KEY: &str = "theme";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown theme: {0}")]
pub struct UnknownTheme(pub String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Stored preference; unknown or missing values read as light.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        store
            .get(THEME_KEY)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn save(self, store: &dyn KeyValueStore) -> Result<()> {
        store.set(THEME_KEY, &self.to_string())
    }

    /// Flip the stored preference and return the new one.
    pub fn toggle(store: &dyn KeyValueStore) -> Result<Self> {
        let theme = Self::load(store).toggled();
        theme.save(store)?;
        Ok(theme)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}
