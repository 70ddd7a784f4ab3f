//! typemirror command-line interface.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "typemirror", version, about = "Mirror data-model declarations into Rust types")]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate Rust types from a declaration model
    Generate(commands::generate::GenerateArgs),
    /// Validate the configuration without generating anything
    Check(commands::check::CheckArgs),
}

fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("failed to initialize logging: {}", e);
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    let code = match cli.command {
        Command::Generate(args) => commands::generate::run(args),
        Command::Check(args) => commands::check::run(args),
    };
    std::process::exit(code);
}
