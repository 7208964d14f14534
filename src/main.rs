//! qmkgen - build-time code generators for QMK firmware
//!
//! Invoked by the QMK make system to generate sources such as the LUFA
//! bootloader `Keyboard.h` from a keyboard's info.json data.

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qmkgen::cli::{CliResult, ExitCode, GenerateDfuHeaderArgs, ListKeyboardsArgs};

/// qmkgen - build-time code generators for QMK firmware
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Used by the make system to generate LUFA Keyboard.h from info.json
    GenerateDfuHeader(GenerateDfuHeaderArgs),
    /// List keyboards available in the QMK tree
    ListKeyboards(ListKeyboardsArgs),
}

impl Command {
    fn execute(&self) -> CliResult<()> {
        match self {
            Command::GenerateDfuHeader(args) => args.execute(),
            Command::ListKeyboards(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only generated output
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = cli.command.execute() {
        error!("{e}");
        std::process::exit(e.exit_code.code());
    }

    std::process::exit(ExitCode::Success.code());
}
