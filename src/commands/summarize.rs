//! Summarize command handler

use anyhow::{bail, Context, Result};
use std::fs;

use castsum::cli::SummarizeArgs;
use castsum::config::Config;
use castsum::ollama::TransportConfig;
use castsum::summary::{ConsoleReporter, SummarizeOptions, Summarizer};

/// Handle `castsum summarize`.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &SummarizeArgs) -> Result<()> {
    let config = Config::load()?;
    let (options, transport) = resolve_options(args, &config)?;
    let summarizer = Summarizer::new(options, transport)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let summary = if args.quiet {
        runtime.block_on(summarizer.summarize_file(&args.file, &mut ()))?
    } else {
        println!("Processing asciinema file: {}", args.file.display());
        let mut reporter = ConsoleReporter::stdout();
        runtime.block_on(summarizer.summarize_file(&args.file, &mut reporter))?
    };

    if args.quiet {
        println!("{}", summary.summary);
    } else {
        println!("\nSummary complete!");
    }

    if let Some(path) = &args.output {
        fs::write(path, summary.report())
            .with_context(|| format!("Failed to write summary to {:?}", path))?;
        if !args.quiet {
            println!("Summary written to {}", path.display());
        }
    }

    Ok(())
}

/// Merge flags over config. Flags win; config fills the rest.
pub(crate) fn resolve_options(
    args: &SummarizeArgs,
    config: &Config,
) -> Result<(SummarizeOptions, TransportConfig)> {
    let model = args
        .model
        .clone()
        .or_else(|| config.ollama.model.clone())
        .context("No model specified. Pass --model or set [ollama].model in the config file")?;

    let host = args.host.clone().unwrap_or_else(|| config.ollama.host.clone());
    if host.trim().is_empty() {
        bail!("--host must not be empty");
    }
    let port = args.port.unwrap_or(config.ollama.port);
    if port == 0 {
        bail!("--port must be > 0");
    }
    let context_window = args.context_window.unwrap_or(config.ollama.context_window);
    if context_window == 0 {
        bail!("--context-window must be > 0");
    }

    let options = SummarizeOptions::with_model(model)
        .server(host, port)
        .think(config.ollama.think && !args.disable_thinking)
        .context_window(context_window)
        .cleaner(config.cleaner.clone())
        .show_output(args.show_output || config.output.show_output);

    Ok((options, config.ollama.transport()))
}
