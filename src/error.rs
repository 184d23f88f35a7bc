// SPDX-License-Identifier: MIT
//
// Errors surfaced by the command-line front end. The core crates never
// fail; everything here comes from settings, arguments, or output encoding.

use std::path::PathBuf;

use pt_color::ParseColorError;
use pt_engine::policy::UnknownPolicyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read settings from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {what}: {source}")]
    Color {
        what: &'static str,
        #[source]
        source: ParseColorError,
    },

    #[error(transparent)]
    Policy(#[from] UnknownPolicyError),

    #[error("invalid bias `{0}` (expected a number)")]
    Bias(String),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
