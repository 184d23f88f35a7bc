// SPDX-License-Identifier: MIT
//
// pairtone: match brand colors to system colors and derive accessible
// light/dark twins.
//
// This is the command-line front end over the two core crates:
//
//   pt-color  → sRGB / Lab / CIEDE2000 / WCAG math
//   pt-engine → palette approximation, twin derivation, diagnostics
//
// Every subcommand runs the same way:
//
//   settings file → PAIRTONE_* env → flags → config::set_current
//   parse colors → core call → report (text or JSON) → stdout
//
// Logs go to stderr so JSON output on stdout stays clean.

mod error;
mod report;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use pt_color::{Rgba, ciede2000, contrast_ratio};
use pt_engine::{
    Approximator, Backgrounds, DerivedPair, PairPolicy, config, derive_with_current,
    metrics_with_current,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::Result;
use crate::report::Format;
use crate::settings::Settings;

// ─── Command line ───────────────────────────────────────────────────────────

/// Match brand colors to system colors and derive accessible light/dark twins.
///
/// Colors are given as `#RRGGBB` or byte-scale `r,g,b` text.
#[derive(Parser)]
#[command(name = "pairtone", version)]
struct Cli {
    /// Settings file (TOML)
    #[arg(short, long, global = true, env = "PAIRTONE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the nearest system color
    Approximate {
        color: Rgba,
    },

    /// Derive light and dark twins of a color
    Derive {
        color: Rgba,

        /// Extra separation between the twins, -0.25 to 0.25
        #[arg(long, allow_negative_numbers = true)]
        bias: Option<f64>,

        /// guardrailed, exactLightIfCompliant or brandLockedLight
        #[arg(long)]
        policy: Option<PairPolicy>,

        #[command(flatten)]
        backgrounds: BackgroundArgs,
    },

    /// Check an existing light/dark pair
    Metrics {
        light: Rgba,
        dark: Rgba,

        #[command(flatten)]
        backgrounds: BackgroundArgs,
    },

    /// WCAG contrast ratio between two colors
    Contrast {
        foreground: Rgba,
        background: Rgba,
    },

    /// CIEDE2000 difference between two colors
    DeltaE {
        a: Rgba,
        b: Rgba,
    },
}

#[derive(Args)]
struct BackgroundArgs {
    /// Light-mode background
    #[arg(long)]
    light_bg: Option<Rgba>,

    /// Dark-mode background
    #[arg(long)]
    dark_bg: Option<Rgba>,
}

impl BackgroundArgs {
    const fn apply(&self, mut backgrounds: Backgrounds) -> Backgrounds {
        if let Some(light) = self.light_bg {
            backgrounds.light = light;
        }
        if let Some(dark) = self.dark_bg {
            backgrounds.dark = dark;
        }
        backgrounds
    }
}

// ─── Logging ────────────────────────────────────────────────────────────────

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

// ─── Dispatch ───────────────────────────────────────────────────────────────

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    settings.apply_env()?;
    Ok(settings)
}

fn run(cli: Cli) -> Result<String> {
    let settings = load_settings(cli.config.as_ref())?;
    dispatch(cli.command, &settings, Format::from_flag(cli.json))
}

/// Backgrounds are only parsed by the subcommands that measure against them.
fn dispatch(command: Command, settings: &Settings, format: Format) -> Result<String> {
    match command {
        Command::Approximate { color } => {
            report::approximation(&Approximator::new().approximate(color), format)
        }

        Command::Derive {
            color,
            bias,
            policy,
            backgrounds: flags,
        } => {
            config::set_current(flags.apply(settings.backgrounds()?));
            let bias = bias.unwrap_or(settings.bias);
            let policy = policy.unwrap_or(settings.policy);
            let pair = derive_with_current(color, bias, policy);
            let metrics = metrics_with_current(&pair);
            report::pair(&pair, &metrics, Some((policy, bias)), format)
        }

        Command::Metrics {
            light,
            dark,
            backgrounds: flags,
        } => {
            config::set_current(flags.apply(settings.backgrounds()?));
            let mut pair = DerivedPair {
                target: light,
                light,
                dark,
                wcag_pass: false,
            };
            let metrics = metrics_with_current(&pair);
            pair.wcag_pass = metrics.light.text_pass() && metrics.dark.text_pass();
            report::pair(&pair, &metrics, None, format)
        }

        Command::Contrast {
            foreground,
            background,
        } => report::contrast(contrast_ratio(foreground, background), format),

        Command::DeltaE { a, b } => report::delta_e(ciede2000(a.to_lab(), b.to_lab()), format),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    match run(cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pairtone").chain(args.iter().copied()))
            .unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_derive_flags() {
        let cli = parse(&[
            "derive",
            "#4D80B3",
            "--bias",
            "-0.1",
            "--policy",
            "brand-locked-light",
            "--dark-bg",
            "0,0,0",
            "--json",
        ]);
        assert!(cli.json);
        let Command::Derive {
            color,
            bias,
            policy,
            backgrounds,
        } = cli.command
        else {
            panic!("expected derive");
        };
        assert_eq!(color.to_hex(), "#4D80B3");
        assert_eq!(bias, Some(-0.1));
        assert_eq!(policy, Some(PairPolicy::BrandLockedLight));
        assert_eq!(backgrounds.dark_bg, Some(Rgba::BLACK));
        assert_eq!(backgrounds.light_bg, None);
    }

    #[test]
    fn rejects_bad_color() {
        let err = Cli::try_parse_from(["pairtone", "approximate", "teal"]);
        assert!(err.is_err());
    }

    #[test]
    fn background_flags_override_settings() {
        let flags = BackgroundArgs {
            light_bg: Some(Rgba::rgb(0.9, 0.9, 0.9)),
            dark_bg: None,
        };
        let bg = flags.apply(Backgrounds::DEFAULT);
        assert_eq!(bg.light, Rgba::rgb(0.9, 0.9, 0.9));
        assert_eq!(bg.dark, Backgrounds::DEFAULT.dark);
    }

    #[test]
    fn bad_background_only_fails_commands_that_use_it() {
        let settings = Settings {
            dark_background: Some("#12345".to_owned()),
            ..Settings::default()
        };

        let contrast = parse(&["contrast", "#000000", "#FFFFFF"]).command;
        assert!(dispatch(contrast, &settings, Format::Text).is_ok());
        let approximate = parse(&["approximate", "#4D80B3"]).command;
        assert!(dispatch(approximate, &settings, Format::Text).is_ok());

        let derive = parse(&["derive", "#4D80B3"]).command;
        let err = dispatch(derive, &settings, Format::Text).unwrap_err();
        assert!(matches!(err, error::Error::Color { what: "dark background", .. }));
    }

    #[test]
    fn contrast_and_delta_e_run() {
        let out = run(parse(&["contrast", "#000000", "#FFFFFF"])).unwrap();
        assert!(out.starts_with("ratio       21.00:1\n"), "{out}");

        let out = run(parse(&["delta-e", "#FF0000", "255,0,0"])).unwrap();
        assert_eq!(out, "delta E     0.0000\n");
    }
}
