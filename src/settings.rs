// SPDX-License-Identifier: MIT
//
// Front-end settings: an optional TOML file, then `PAIRTONE_*` environment
// overrides, then command-line flags (applied by the caller).
//
//   light-background = "#F2F2F7"
//   dark-background  = "28,28,30"
//   policy           = "brandLockedLight"
//   bias             = 0.05

use std::fs;
use std::path::Path;

use pt_color::Rgba;
use pt_engine::{Backgrounds, PairPolicy};
use serde::Deserialize;

use crate::error::{Error, Result};

pub const ENV_LIGHT_BG: &str = "PAIRTONE_LIGHT_BG";
pub const ENV_DARK_BG: &str = "PAIRTONE_DARK_BG";
pub const ENV_POLICY: &str = "PAIRTONE_POLICY";
pub const ENV_BIAS: &str = "PAIRTONE_BIAS";

/// Resolved defaults for the subcommands.
///
/// Backgrounds are kept as text until [`Settings::backgrounds`] so a bad
/// value is reported against the setting it came from. `None` means
/// [`Backgrounds::DEFAULT`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    pub light_background: Option<String>,
    pub dark_background: Option<String>,
    pub policy: PairPolicy,
    pub bias: f64,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let settings = toml::from_str(&text).map_err(|source| Error::Toml {
            path: path.to_owned(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Apply `PAIRTONE_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup.
    pub fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(light) = lookup(ENV_LIGHT_BG) {
            self.light_background = Some(light);
        }
        if let Some(dark) = lookup(ENV_DARK_BG) {
            self.dark_background = Some(dark);
        }
        if let Some(policy) = lookup(ENV_POLICY) {
            self.policy = policy.parse()?;
        }
        if let Some(bias) = lookup(ENV_BIAS) {
            self.bias = bias
                .trim()
                .parse()
                .ok()
                .filter(|b: &f64| b.is_finite())
                .ok_or(Error::Bias(bias))?;
        }
        Ok(())
    }

    /// Parse the configured backgrounds.
    pub fn backgrounds(&self) -> Result<Backgrounds> {
        let light = parse_background(self.light_background.as_deref(), "light background")?;
        let dark = parse_background(self.dark_background.as_deref(), "dark background")?;
        Ok(Backgrounds::new(
            light.unwrap_or(Backgrounds::DEFAULT.light),
            dark.unwrap_or(Backgrounds::DEFAULT.dark),
        ))
    }
}

fn parse_background(text: Option<&str>, what: &'static str) -> Result<Option<Rgba>> {
    text.map(|t| t.parse::<Rgba>().map_err(|source| Error::Color { what, source }))
        .transpose()
}
