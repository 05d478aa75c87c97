//! CLI argument parsing structures.

use clap::{Args, Parser};
use std::path::PathBuf;

/// Main CLI structure for paykeys.
///
/// There are no subcommands: every run walks the same prompt sequence. The
/// options below only override configuration.
#[derive(Parser, Debug)]
#[command(name = "paykeys", version)]
#[command(
    about = "Store payment provider API credentials in AWS Secrets Manager",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print diagnostic logs to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Configuration overrides.
#[derive(Debug, Default, Args)]
pub struct ConfigArgs {
    /// Config file to use instead of searching for paykeys.kdl
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Infrastructure variables file to patch (default: infrastructure/terraform.tfvars)
    #[arg(long, value_name = "FILE")]
    pub tfvars: Option<PathBuf>,

    /// AWS profile to use
    #[arg(long)]
    pub profile: Option<String>,

    /// AWS region to use
    #[arg(long)]
    pub region: Option<String>,
}
