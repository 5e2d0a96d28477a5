//! xtask - Build tasks for castsum
//!
//! Run with: cargo xtask <command>
//!
//! Commands:
//! - gen-docs: Generate documentation (man pages, COMMANDS.md)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, Command, CommandFactory, Parser, Subcommand};

use castsum::cli::Cli;

const BIN: &str = "castsum";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build tasks for castsum")]
struct Xtask {
    #[command(subcommand)]
    command: XtaskCommand,
}

#[derive(Subcommand)]
enum XtaskCommand {
    /// Generate documentation from CLI definitions
    #[command(name = "gen-docs")]
    GenDocs {
        /// Output directory (default: docs/)
        #[arg(long, short, default_value = "docs")]
        output: PathBuf,

        /// Generate man pages
        #[arg(long)]
        man: bool,

        /// Generate COMMANDS.md
        #[arg(long)]
        markdown: bool,
    },
}

fn main() -> Result<()> {
    let args = Xtask::parse();

    match args.command {
        XtaskCommand::GenDocs {
            output,
            man,
            markdown,
        } => {
            // Neither flag means both
            let gen_all = !man && !markdown;

            if gen_all || man {
                generate_man_pages(&output)?;
            }
            if gen_all || markdown {
                generate_markdown(&output)?;
            }
        }
    }

    Ok(())
}

/// Visible subcommands of `cmd`.
fn visible(cmd: &Command) -> impl Iterator<Item = &Command> {
    cmd.get_subcommands().filter(|c| !c.is_hide_set())
}

/// Generate man pages using clap_mangen, one per command and subcommand.
fn generate_man_pages(output: &Path) -> Result<()> {
    let man_dir = output.join("man");
    fs::create_dir_all(&man_dir).context("Failed to create man directory")?;

    let cmd = Cli::command();
    write_man_page(&man_dir, BIN, &cmd)?;
    for sub in visible(&cmd) {
        let name = format!("{}-{}", BIN, sub.get_name());
        write_man_page(&man_dir, &name, sub)?;
        for nested in visible(sub) {
            write_man_page(&man_dir, &format!("{}-{}", name, nested.get_name()), nested)?;
        }
    }

    println!("Man pages generated in {}", man_dir.display());
    Ok(())
}

fn write_man_page(dir: &Path, name: &str, cmd: &Command) -> Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .title(name.to_uppercase())
        .render(&mut buffer)?;
    let path = dir.join(format!("{}.1", name));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Generated: {}", path.display());
    Ok(())
}

/// Generate COMMANDS.md markdown documentation
fn generate_markdown(output: &Path) -> Result<()> {
    fs::create_dir_all(output).context("Failed to create output directory")?;

    let cmd = Cli::command();
    let mut md = String::new();

    md.push_str("# castsum Command Reference\n\n");
    md.push_str("This document is auto-generated from the CLI definitions.\n\n");
    md.push_str("## Table of Contents\n\n");
    for sub in visible(&cmd) {
        let name = sub.get_name();
        md.push_str(&format!("- [{}](#{}-{})\n", name, BIN, name));
    }
    md.push_str("\n---\n\n");

    md.push_str(&format!("## {}\n\n", BIN));
    push_about(&mut md, &cmd);
    push_arguments(&mut md, &cmd);

    for sub in visible(&cmd) {
        let title = format!("{} {}", BIN, sub.get_name());
        md.push_str(&format!("## {}\n\n", title));
        push_about(&mut md, sub);
        push_arguments(&mut md, sub);

        let nested: Vec<_> = visible(sub).collect();
        if !nested.is_empty() {
            md.push_str("### Subcommands\n\n");
            for nested_cmd in nested {
                md.push_str(&format!("#### {} {}\n\n", title, nested_cmd.get_name()));
                push_about(&mut md, nested_cmd);
                push_arguments(&mut md, nested_cmd);
            }
        }

        md.push_str("---\n\n");
    }

    md.push_str("\n*Generated by `cargo xtask gen-docs`*\n");

    let output_path = output.join("COMMANDS.md");
    fs::write(&output_path, md)?;
    println!("Generated: {}", output_path.display());

    Ok(())
}

fn push_about(md: &mut String, cmd: &Command) {
    if let Some(about) = cmd.get_about() {
        md.push_str(&format!("{}\n\n", about));
    }
    if let Some(long_about) = cmd.get_long_about() {
        md.push_str(&format!("```\n{}\n```\n\n", long_about));
    }
}

fn is_builtin(arg: &Arg) -> bool {
    matches!(arg.get_id().as_str(), "help" | "version")
}

fn push_arguments(md: &mut String, cmd: &Command) {
    let positional: Vec<_> = cmd
        .get_arguments()
        .filter(|a| a.is_positional() && !is_builtin(a))
        .collect();
    let options: Vec<_> = cmd
        .get_arguments()
        .filter(|a| !a.is_positional() && !is_builtin(a))
        .collect();

    if !positional.is_empty() {
        md.push_str("### Arguments\n\n");
        for arg in positional {
            md.push_str(&format!("- `<{}>`", arg.get_id().as_str().to_uppercase()));
            push_help(md, arg);
        }
        md.push('\n');
    }

    if !options.is_empty() {
        md.push_str("### Options\n\n");
        for arg in options {
            let long = arg.get_long().map(|l| format!("--{}", l));
            let short = arg.get_short().map(|s| format!("-{}", s));
            let flag = match (long, short) {
                (Some(l), Some(s)) => format!("{}, {}", s, l),
                (Some(l), None) => l,
                (None, Some(s)) => s,
                _ => continue,
            };
            md.push_str(&format!("- `{}`", flag));
            push_help(md, arg);
        }
        md.push('\n');
    }
}

fn push_help(md: &mut String, arg: &Arg) {
    if let Some(help) = arg.get_help() {
        md.push_str(&format!(": {}", help));
    }
    md.push('\n');
}
