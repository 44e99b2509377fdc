use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use weft::commands::{self, OutputFormat};
use weft::validation::{clap_domain_validator, clap_file_id_validator};

#[derive(Parser)]
#[command(name = "weft")]
#[command(about = "Context catalog and integrity checker for agent plugin repositories", long_about = None)]
#[command(version)]
struct Cli {
    /// Plugin root (defaults to discovery via WEFT_PLUGIN_ROOT or walking up)
    #[arg(long, global = true, value_name = "PATH")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a domain's files by loading strategy, at zero content cost
    Catalog {
        /// Domain to query (lowercase alphanumerics and underscores)
        #[arg(value_parser = clap_domain_validator)]
        domain: String,

        /// Only the always-load files
        #[arg(long)]
        always: bool,

        /// Detection signals to match conditional files against
        #[arg(long, num_args = 1.., conflicts_with = "always")]
        signals: Vec<String>,

        /// Trigger phrases for cross-domain routing
        #[arg(long, num_args = 1.., conflicts_with_all = ["always", "signals"])]
        cross: Vec<String>,
    },

    /// Show a domain's parsed index with orphan/ghost resolution
    Index {
        /// Domain to query
        #[arg(value_parser = clap_domain_validator)]
        domain: String,
    },

    /// Materialize a file (or named sections) under a budget
    Load {
        /// Context file id of the form domain/file
        #[arg(value_parser = clap_file_id_validator)]
        id: String,

        /// Load only these declared sections
        #[arg(long, num_args = 1.., value_name = "NAME")]
        sections: Vec<String>,

        /// Override the file budget (default: 6)
        #[arg(long, value_name = "N")]
        max_files: Option<usize>,

        /// Add a token budget (none by default)
        #[arg(long, value_name = "N")]
        max_tokens: Option<u32>,
    },

    /// Check referential integrity across all eight relationship types
    Validate {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Also fail on warnings, not just critical violations
        #[arg(long)]
        strict: bool,

        /// Bound the scan; expiry yields a partial report
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Flag stale files and declared-vs-measured metadata drift
    Drift {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Evaluate staleness as of this date instead of today
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,
    },

    /// Show dashboard with inventory counts and health score
    Status,

    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("WEFT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let root = cli.root.as_deref();

    match cli.command {
        Commands::Catalog {
            domain,
            always,
            signals,
            cross,
        } => commands::catalog::execute(root, &domain, always, signals, cross),
        Commands::Index { domain } => commands::index::execute(root, &domain),
        Commands::Load {
            id,
            sections,
            max_files,
            max_tokens,
        } => commands::load::execute(root, &id, sections, max_files, max_tokens),
        Commands::Validate {
            format,
            strict,
            timeout,
        } => commands::validate::execute(root, format, strict, timeout),
        Commands::Drift { format, as_of } => commands::drift::execute(root, format, as_of),
        Commands::Status => commands::status::execute(root),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut io::stdout());
            Ok(())
        }
    }
}
