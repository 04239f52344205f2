//! CLI command definitions

use clap::{Parser, ValueEnum};
use council_domain::{SynthesisStrategy, Visibility};
use std::path::PathBuf;

/// How much of the deliberation is shown while it runs
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VisibilityArg {
    /// Every perspective, conflict and round
    Full,
    /// Round-level progress only
    Progress,
    /// Final decision and quality report only
    Summary,
}

impl From<VisibilityArg> for Visibility {
    fn from(arg: VisibilityArg) -> Self {
        match arg {
            VisibilityArg::Full => Visibility::Full,
            VisibilityArg::Progress => Visibility::Progress,
            VisibilityArg::Summary => Visibility::Summary,
        }
    }
}

/// Synthesis strategy selection
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Consensus,
    Weighted,
    Facilitator,
}

impl From<StrategyArg> for SynthesisStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Consensus => SynthesisStrategy::Consensus,
            StrategyArg::Weighted => SynthesisStrategy::Weighted,
            StrategyArg::Facilitator => SynthesisStrategy::Facilitator,
        }
    }
}

/// Output format for finished sessions
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with every round
    Full,
    /// Only the final decision and quality report
    Summary,
    /// JSON output
    Json,
}

/// CLI arguments for the council
#[derive(Parser, Debug)]
#[command(name = "council")]
#[command(author, version, about = "Agent council - specialized agents deliberate and reach consensus")]
#[command(long_about = r#"
Council selects a roster of specialized reviewer agents for your topic,
runs rounds of deliberation until consensus (or a round cap), and
synthesizes the perspectives into a decision with a quality report.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./council.toml      Project-level config
3. ~/.config/council/config.toml   Global config

Example:
  council "Should we add OAuth2 authentication?"
  council --roster SecurityEngineer,TechLead "Rotate signing keys quarterly?"
  council --dry-run --visibility full "Migrate the orders table?"
"#)]
pub struct Cli {
    /// The topic for the council to deliberate
    pub topic: Option<String>,

    /// Optional feature context appended to the topic for domain matching
    #[arg(long, value_name = "TEXT")]
    pub context: Option<String>,

    /// Roster: "auto" for domain-based selection, or comma-separated agent names
    #[arg(short, long, default_value = "auto", value_name = "AGENTS")]
    pub roster: String,

    /// Maximum deliberation rounds
    #[arg(long, value_name = "N")]
    pub rounds: Option<usize>,

    /// How much deliberation detail to show while running
    #[arg(long, value_enum, default_value = "progress")]
    pub visibility: VisibilityArg,

    /// Synthesis strategy
    #[arg(long, value_enum, default_value = "consensus")]
    pub strategy: StrategyArg,

    /// Domain used for expertise-alignment scoring (defaults to the detected one)
    #[arg(long, value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Directory for markdown session reports
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip writing the markdown session report
    #[arg(long)]
    pub no_report: bool,

    /// Output format for the finished session
    #[arg(short, long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Run with the deterministic scripted provider (no external calls)
    #[arg(long)]
    pub dry_run: bool,

    /// Expect devil's-advocate engagement and score it
    #[arg(long)]
    pub devils_advocate: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// The manual roster, if one was given ("auto" means none)
    pub fn roster_override(&self) -> Option<Vec<String>> {
        if self.roster.trim().eq_ignore_ascii_case("auto") {
            return None;
        }
        let names: Vec<String> = self
            .roster
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if names.is_empty() {
            None
        } else {
            Some(names)
        }
    }
}
