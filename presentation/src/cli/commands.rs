//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output style for analysis reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputStyle {
    /// Human-readable colored output
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for team-align
#[derive(Parser, Debug)]
#[command(name = "team-align")]
#[command(author, version, about = "Team alignment - detect conflicts and build consensus on a product idea")]
#[command(long_about = r#"
Team-align walks a founding team through seven discovery sections (problem,
target users, vision, features, competitors, differentiation, tech stack).
Each member answers independently; the tool embeds the answers, measures how
far apart they are, has an LLM break down any conflict, and drafts a
consensus statement the team can approve. Approved sections roll up into a
PRD.

Configuration files are loaded from (in priority order):
1. ALIGN_* environment variables
2. --config <path>     Explicit config file
3. ./align.toml        Project-level config
4. ~/.config/team-align/config.toml   Global config

Example:
  team-align init "Birdsong" -d "identify birds by their call"
  team-align questions problem
  team-align submit problem -m maria "Birders can't identify calls in the field"
  team-align analyze problem
  team-align consensus problem
  team-align approve problem -m maria
  team-align export -o prd.md
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Workspace file (overrides the configured store path)
    #[arg(short, long, value_name = "PATH", global = true)]
    pub workspace: Option<PathBuf>,

    /// Write diagnostic logs to a file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a workspace with the seven discovery sections
    Init {
        /// Project name
        name: String,

        /// One-line project description (used to personalize questions)
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Show discovery questions for a section
    Questions {
        /// Section category (problem, target_users, vision, features,
        /// competitors, differentiation, tech_stack)
        category: String,

        /// Skip personalization and print the catalog questions
        #[arg(long)]
        defaults: bool,
    },

    /// Submit a member's answer for a section
    Submit {
        /// Section category
        category: String,

        /// Member id (stable handle, e.g. "maria")
        #[arg(short, long, value_name = "ID")]
        member: String,

        /// Member display name (defaults to the member id)
        #[arg(short, long, value_name = "NAME")]
        name: Option<String>,

        /// Answer text (omit when using --file)
        content: Option<String>,

        /// Read the answer from a file instead
        #[arg(short, long, value_name = "PATH", conflicts_with = "content")]
        file: Option<PathBuf>,

        /// Store as a draft (kept out of analysis)
        #[arg(long)]
        draft: bool,
    },

    /// Show the alignment overview for every section
    Status,

    /// Run conflict detection for a section
    Analyze {
        /// Section category
        category: String,

        /// Similarity threshold override (0.0 to 1.0)
        #[arg(short, long)]
        threshold: Option<f32>,

        /// Output style
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputStyle,
    },

    /// Synthesize a consensus draft for a section
    Consensus {
        /// Section category
        category: String,
    },

    /// Approve the consensus for a section
    Approve {
        /// Section category
        category: String,

        /// Approving member id
        #[arg(short, long, value_name = "ID")]
        member: String,
    },

    /// Reject the consensus for a section
    Reject {
        /// Section category
        category: String,
    },

    /// Export the PRD built from section consensus
    Export {
        /// Write the PRD to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,

        /// Wait for the full document instead of streaming it
        #[arg(long)]
        no_stream: bool,
    },

    /// Show configuration sources and the effective config
    Config,
}
