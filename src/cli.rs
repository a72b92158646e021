use crate::config::{Engine, Scan};
use clap::{Parser, Subcommand};

// Display order for credential options (placed at top of help text)
const TOKEN_DISPLAY_ORDER: usize = 0;
// Display order for log level option (placed at end of help text)
const LOG_LEVEL_DISPLAY_ORDER: usize = 100;

/// CLI arguments
#[derive(Parser)]
#[command(name = "archguard", version, about = "Pull-request gatekeeper that enforces architecture rules", long_about = None)]
pub struct Cli {
    /// Log level (see https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
    /// [env: ARCHGUARD_LOG=] [default: info]
    #[arg(
        long,
        env = "ARCHGUARD_LOG",
        default_value = "info",
        global = true,
        hide_default_value = true,
        hide_env = true,
        display_order = LOG_LEVEL_DISPLAY_ORDER,
        verbatim_doc_comment
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Review the pull request of the current Actions run
    Review(ReviewArgs),
}

/// Arguments for the review command
#[derive(Parser, Debug)]
pub struct ReviewArgs {
    /// GitHub token for reading the PR diff and posting comments
    #[arg(long, env = "GITHUB_TOKEN", display_order = TOKEN_DISPLAY_ORDER)]
    pub github_token: String,

    /// API key for the AI reviewer; absence disables the AI engine
    #[arg(long, env = "ARCHGUARD_AI_API_KEY", display_order = TOKEN_DISPLAY_ORDER)]
    pub ai_api_key: Option<String>,

    /// Free-form architecture rule text forwarded verbatim to the AI reviewer
    #[arg(long, default_value = "")]
    pub architecture_rules: String,

    /// Which analysis engines to run
    #[arg(long, value_enum, default_value_t = Engine::Builtin)]
    pub engine: Engine,

    /// Matching granularity for the builtin engine
    #[arg(long, value_enum, default_value_t = Scan::Line)]
    pub scan: Scan,

    /// Chat-completions endpoint for the AI reviewer
    #[arg(long, default_value = "https://api.openai.com/v1")]
    pub ai_base_url: String,

    /// Model name for the AI reviewer
    #[arg(long, default_value = "gpt-4o-mini")]
    pub ai_model: String,

    /// Analyze and log the report without posting a PR comment
    #[arg(long)]
    pub dry_run: bool,
}
