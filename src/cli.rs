//! CLI definitions for castsum
//!
//! Kept out of main.rs so xtask can render man pages and markdown from the
//! same definitions.

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

/// Version string shown by `--version`; dev builds carry the commit hash.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VERGEN_GIT_SHA"), ")");
#[cfg(feature = "release")]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Clap styles: green headers and literals, red errors.
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "castsum")]
#[command(about = "Summarize asciinema terminal recordings with a local Ollama model")]
#[command(
    long_about = "castsum - summarize asciinema terminal recordings with a local Ollama model.

castsum reads an asciicast (.cast) recording, strips escape sequences,
carriage-return redraws and status-bar noise from the terminal output,
and asks an Ollama server for a short summary of what happened in the
session. The answer is streamed to the terminal as it is generated.

QUICK START:
    castsum summarize session.cast --model qwen3:30b
    castsum clean session.cast          Print the cleaned transcript
    castsum info session.cast           Show recording metadata

CONFIGURATION:
    ~/.config/castsum/config.toml (override with CASTSUM_CONFIG)
    castsum config show                 Show effective configuration

LOGGING:
    -v / -vv or RUST_LOG=castsum=debug  Diagnostics on stderr"
)]
#[command(version = VERSION)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize a recording with an Ollama model
    #[command(long_about = "Summarize a recording with an Ollama model.

Parses the recording, cleans the terminal output into a plain-text
transcript and streams a summary from the Ollama /api/generate endpoint.
Reasoning from thinking-capable models is shown under THINKING:, the
answer under SUMMARY:.

Flags override the [ollama] and [output] sections of the config file.

EXAMPLES:
    castsum summarize session.cast --model qwen3:30b
    castsum summarize session.cast -m llama3 --host gpu-box --port 11434
    castsum summarize session.cast -m qwen3:30b --disable-thinking
    castsum summarize session.cast -m llama3 --quiet --output summary.txt")]
    Summarize(SummarizeArgs),

    /// Print the cleaned transcript of a recording
    #[command(long_about = "Print the cleaned plain-text transcript of a recording.

This is exactly the text that would be sent to the model, useful for
checking what the cleaner keeps and drops.

EXAMPLES:
    castsum clean session.cast
    castsum clean session.cast --output transcript.txt")]
    Clean {
        /// Path to the .cast file
        #[arg(help = "Path to the .cast recording file")]
        file: PathBuf,
        /// Write the transcript to a file instead of stdout
        #[arg(long, short, help = "Write the transcript to this file")]
        output: Option<PathBuf>,
    },

    /// Show recording metadata and skipped lines
    #[command(long_about = "Show metadata of a recording without contacting a model.

Prints the session info block (duration, terminal size, title, recording
time), event counts and every event line that was skipped as malformed.

EXAMPLE:
    castsum info session.cast")]
    Info {
        /// Path to the .cast file
        #[arg(help = "Path to the .cast recording file")]
        file: PathBuf,
    },

    /// Configuration management
    #[command(
        subcommand,
        long_about = "View and initialize the castsum configuration file.

Config file location: ~/.config/castsum/config.toml
Set CASTSUM_CONFIG to use a different file.

EXAMPLES:
    castsum config show
    castsum config path
    castsum config init"
    )]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(long_about = "Generate a shell completion script on stdout.

EXAMPLES:
    castsum completions bash > ~/.local/share/bash-completion/completions/castsum
    castsum completions zsh > ~/.zfunc/_castsum")]
    Completions {
        /// Target shell
        #[arg(value_enum, help = "Shell to generate completions for")]
        shell: CompletionShell,
    },
}

/// Arguments of `castsum summarize`.
#[derive(Args, Debug, Clone)]
pub struct SummarizeArgs {
    /// Path to the .cast file
    #[arg(help = "Path to the .cast recording file")]
    pub file: PathBuf,

    /// Ollama model to use
    #[arg(long, short, help = "Ollama model to use (e.g. qwen3:30b)")]
    pub model: Option<String>,

    /// Ollama server host
    #[arg(long, help = "Ollama server host [default: localhost]")]
    pub host: Option<String>,

    /// Ollama server port
    #[arg(long, help = "Ollama server port [default: 11434]")]
    pub port: Option<u16>,

    /// Context window in tokens
    #[arg(long, help = "Context window in tokens (num_ctx) [default: 160000]")]
    pub context_window: Option<u32>,

    /// Do not request a separate reasoning channel
    #[arg(long, help = "Disable thinking output for thinking-capable models")]
    pub disable_thinking: bool,

    /// Print the cleaned transcript before summarizing
    #[arg(long, help = "Show the cleaned terminal output before the summary")]
    pub show_output: bool,

    /// Only print the final summary
    #[arg(long, short, help = "Suppress progress and streaming; print only the summary")]
    pub quiet: bool,

    /// Also write session info and summary to a file
    #[arg(long, short, help = "Write session info and summary to this file")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    #[command(long_about = "Display the effective configuration in TOML format.

Missing fields are filled in with their defaults.

EXAMPLE:
    castsum config show")]
    Show,
    /// Print the config file path
    Path,
    /// Write a config file with default settings
    #[command(long_about = "Write a config file with all default settings.

Refuses to overwrite an existing file unless --force is given.

EXAMPLES:
    castsum config init
    castsum config init --force")]
    Init {
        /// Overwrite an existing config file
        #[arg(long, help = "Overwrite an existing config file")]
        force: bool,
    },
}
