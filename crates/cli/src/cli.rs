//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(name = "jarlint")]
#[command(about = "Binary-compatibility comparison for compiled Java archives")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output with info-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output with extensive logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compare two compiled archives and report binary-compatibility changes
    Compare {
        /// The old (baseline) archive
        #[arg(value_name = "OLD_JAR")]
        old: PathBuf,

        /// The new (candidate) archive
        #[arg(value_name = "NEW_JAR")]
        new: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Include private members in the comparison
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        private: Option<bool>,

        /// Include package-private classes in the comparison
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        package_private: Option<bool>,

        /// Compare field changes (enabled by default)
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        fields: Option<bool>,

        /// Compare annotation changes (enabled by default)
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        annotations: Option<bool>,

        /// Disable binary-compatibility impact classification
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        no_compat: Option<bool>,
    },

    /// Check that two archive paths exist, are readable, and look like ZIP files
    Doctor {
        /// The old (baseline) archive
        #[arg(value_name = "OLD_JAR")]
        old: PathBuf,

        /// The new (candidate) archive
        #[arg(value_name = "NEW_JAR")]
        new: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    /// Human-readable text output with colors
    Text,
    /// JSON matching the engine's wire contract
    Json,
}
