//! castsum - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use castsum::cli::{Cli, Commands, ConfigCommands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Summarize(args) => commands::summarize::handle(&args),
        Commands::Clean { file, output } => commands::clean::handle(&file, output.as_deref()),
        Commands::Info { file } => commands::info::handle(&file),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Init { force } => commands::config::handle_init(force),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}

/// Log to stderr so stdout only carries transcripts and summaries.
///
/// `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "warn,castsum=info",
        _ => "info,castsum=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .try_init();
}
