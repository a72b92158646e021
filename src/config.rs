use anyhow::{Result, bail};
use clap::ValueEnum;
use tracing::warn;

/// Which analysis paths run for this check.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// Regex rules only; violations fail the run
    Builtin,
    /// AI reviewer only; findings warn the run
    Ai,
    /// Regex rules plus AI reviewer; findings warn the run
    Hybrid,
}

/// Matching granularity for the builtin engine.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// Match each rule against every added line; table report
    Line,
    /// Match each rule once against the full diff; sectioned report
    Whole,
}

/// Engines that will actually run, after accounting for credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnginePlan {
    pub builtin: bool,
    pub ai: bool,
}

impl EnginePlan {
    /// A missing AI key disables the AI engine even when selected. With
    /// `--engine ai` that would leave nothing to run, which is a
    /// configuration error; with `--engine hybrid` the builtin rules
    /// still carry the check.
    pub fn resolve(engine: Engine, has_ai_key: bool) -> Result<Self> {
        let plan = match engine {
            Engine::Builtin => Self {
                builtin: true,
                ai: false,
            },
            Engine::Ai => {
                if !has_ai_key {
                    bail!("--engine ai requires an AI API key");
                }
                Self {
                    builtin: false,
                    ai: true,
                }
            }
            Engine::Hybrid => {
                if !has_ai_key {
                    warn!("No AI API key supplied; hybrid falls back to builtin rules only");
                }
                Self {
                    builtin: true,
                    ai: has_ai_key,
                }
            }
        };
        Ok(plan)
    }
}
