//! Terminal output to plain-text transcript.
//!
//! Raw output events are full of escape sequences, carriage-return redraws
//! and editor status bars. [`Cleaner`] runs a fixed, ordered cascade of
//! [`Rule`]s over the concatenated output to get text a language model can
//! read:
//!
//! 1. `osc` - window titles and other `ESC ]` strings
//! 2. `ansi` - CSI and two-byte escapes
//! 3. `dcs`, `apc`, `pm` - `ESC P`/`ESC _`/`ESC ^` strings
//! 4. `control-chars` - BEL, BS, FF, VT
//! 5. `status-ruler` - inline editor rulers (optional)
//! 6. `clear-screen` - leftover clear/home sequences
//! 7. `cr-overwrite`, `line-endings` - carriage-return handling
//! 8. `residual-controls` - any control character left over
//! 9. `noise-lines` - control-only and status-bar lines
//! 10. `blank-runs`, `trim` - layout
//!
//! This is a textual approximation, not a terminal emulator: cursor
//! movement and screen contents are not reconstructed.

mod config;
mod noise;
mod rules;

pub use config::CleanerConfig;
pub use noise::NoiseClassifier;
pub use rules::Rule;

use std::sync::OnceLock;

use tracing::trace;

/// Ordered cleanup pipeline.
#[derive(Debug, Clone)]
pub struct Cleaner {
    rules: Vec<Rule>,
}

impl Cleaner {
    pub fn new(config: &CleanerConfig) -> Self {
        let mut rules = vec![
            Rule::osc(),
            Rule::ansi(),
            Rule::dcs(),
            Rule::apc(),
            Rule::pm(),
            Rule::control_chars(),
        ];
        if config.strip_status_rulers {
            rules.push(Rule::status_ruler());
        }
        rules.extend([
            Rule::clear_screen(),
            Rule::cr_overwrite(),
            Rule::line_endings(),
            Rule::residual_controls(),
            Rule::noise_lines(NoiseClassifier::new(
                config.drop_status_lines,
                config.status_line_max_len,
            )),
            Rule::blank_runs(config.max_consecutive_newlines),
            Rule::trim(),
        ]);
        Self { rules }
    }

    /// The rules in the order they run.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Look up a rule by name.
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    /// Concatenate output fragments and clean the result.
    pub fn clean<S: AsRef<str>>(&self, fragments: &[S]) -> String {
        let text: String = fragments.iter().map(|f| f.as_ref()).collect();
        self.clean_text(&text)
    }

    /// Clean already-concatenated output.
    pub fn clean_text(&self, text: &str) -> String {
        self.rules.iter().fold(text.to_string(), |acc, rule| {
            let out = rule.apply(&acc);
            trace!(
                rule = rule.name(),
                before = acc.len(),
                after = out.len(),
                "Applied cleanup rule"
            );
            out
        })
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new(&CleanerConfig::default())
    }
}

static DEFAULT_CLEANER: OnceLock<Cleaner> = OnceLock::new();

/// Clean output fragments with the default configuration.
///
/// Returns an empty string when nothing meaningful is left; that is a valid
/// result here, callers decide whether it is an error.
pub fn clean<S: AsRef<str>>(fragments: &[S]) -> String {
    DEFAULT_CLEANER.get_or_init(Cleaner::default).clean(fragments)
}
