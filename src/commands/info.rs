//! Info command handler

use anyhow::Result;
use std::path::Path;

use castsum::asciicast::{self, session_name, ParseResult};

/// Show recording metadata without contacting a model.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path) -> Result<()> {
    let parsed = asciicast::parse_file(file)?;
    println!("{}", render(&parsed, &session_name(file)));
    Ok(())
}

/// Info block, event counts, captured environment and skipped lines.
pub(crate) fn render(parsed: &ParseResult, name: &str) -> String {
    let mut out = parsed.session_info(name);
    out.push_str(&format!("\nFormat version: {}", parsed.header.version));
    out.push_str(&format!("\nOutput events: {}", parsed.outputs.len()));
    out.push_str(&format!(
        "\nOutput bytes: {}",
        parsed.outputs.iter().map(String::len).sum::<usize>()
    ));

    if let Some(env) = parsed.header.env.as_ref().filter(|e| !e.is_empty()) {
        out.push_str("\nEnvironment:");
        for (key, value) in env {
            out.push_str(&format!("\n  {}={}", key, value));
        }
    }

    out.push_str(&format!("\nSkipped lines: {}", parsed.warnings.len()));
    for warning in &parsed.warnings {
        out.push_str(&format!("\n  line {}: {}", warning.line, warning.reason));
    }
    out
}
