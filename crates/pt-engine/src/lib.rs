//! # pt-engine: palette matching and light/dark twin derivation
//!
//! Two ways to turn a brand color into something a UI can ship:
//!
//! - **Approximate**: find the closest fixed system color by CIEDE2000 and
//!   report the identity adjustment plus fit metrics. The caller tunes hue,
//!   saturation and brightness on top.
//! - **Derive**: compute a light-mode and a dark-mode twin of the target
//!   that clear a contrast guardrail against each mode's background.
//!
//! # Architecture
//!
//! ```text
//! target Rgba
//!     │
//!     ├──▶ approximator.rs: nearest SystemColorToken (token.rs) by ΔE00
//!     │        │
//!     │        ▼
//!     │    output.rs: ApproximatedOutput (serde, legacy baseName)
//!     │
//!     └──▶ derive.rs: offsets → policy (policy.rs) → contrast climb
//!              │        against Backgrounds (config.rs)
//!              ▼
//!          DerivedPair ──▶ metrics.rs: PairMetrics + summary
//! ```
//!
//! Everything is synchronous and allocation-light. The only shared state is
//! the current [`Backgrounds`], replaced wholesale through
//! [`config::set_current`].

pub mod approximator;
pub mod config;
pub mod derive;
pub mod metrics;
pub mod output;
pub mod policy;
pub mod token;

pub use approximator::Approximator;
pub use config::{Backgrounds, PairContext};
pub use derive::{ClimbOutcome, DerivedPair, Direction, derive, derive_with_current};
pub use metrics::{Failures, PairMetrics, TwinMetrics, metrics, metrics_with_current};
pub use output::ApproximatedOutput;
pub use policy::PairPolicy;
pub use token::SystemColorToken;
