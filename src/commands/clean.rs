//! Clean command handler

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use castsum::asciicast;
use castsum::config::Config;
use castsum::summary::SummarizeError;
use castsum::transcript::Cleaner;

/// Print or save the cleaned transcript of a recording.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, output: Option<&Path>) -> Result<()> {
    let config = Config::load()?;
    let parsed = asciicast::parse_file(file)?;
    let transcript = Cleaner::new(&config.cleaner).clean(&parsed.outputs);
    if transcript.is_empty() {
        return Err(SummarizeError::NoContent.into());
    }

    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", transcript))
                .with_context(|| format!("Failed to write transcript to {:?}", path))?;
            eprintln!(
                "Wrote {} characters to {}",
                transcript.chars().count(),
                path.display()
            );
        }
        None => println!("{}", transcript),
    }
    Ok(())
}
