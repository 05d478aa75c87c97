use std::process::ExitCode;

use clap::Parser;
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

use paykeys::cli::Cli;
use paykeys::commands::{ConfigureOptions, handle_configure};
use paykeys::config::{Config, Flags};
use paykeys::interrupt::{TerminalState, until_interrupted};
use paykeys::prompt::TerminalPrompter;
use paykeys::secrets::AwsSecretManager;
use paykeys::{PaykeysError, Result};

/// Diagnostics go to stderr so they never interleave with prompts.
/// `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "warn,paykeys=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.config.as_deref())?;
    config.apply_flags(Flags::from(&cli.config));

    let manager = AwsSecretManager::from_settings(&config.aws()).await;
    let options = ConfigureOptions::from_config(&config);
    let mut prompter = TerminalPrompter::new();

    handle_configure(&options, manager, &mut prompter).await?;
    Ok(())
}

fn report_failure(e: &PaykeysError) -> ExitCode {
    eprintln!("\n{}", e.failure_message());
    ExitCode::from(e.exit_code())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let terminal = TerminalState::capture();
    let handle = Handle::current();
    let outcome =
        until_interrupted(move || handle.block_on(run(cli)), tokio::signal::ctrl_c()).await;

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_cancelled() => {
            if let Err(err) = terminal.restore() {
                tracing::warn!(error = %err, "failed to restore terminal settings");
            }
            println!("\n\n{}", e.failure_message());
            // a prompt may still be parked in a read; don't wait for it
            std::process::exit(i32::from(e.exit_code()));
        }
        Err(e) => report_failure(&e),
    }
}
