//! The ordered cleanup rules.
//!
//! Order is load-bearing: the generic ANSI rule must see text whose OSC
//! titles are already gone, the status-ruler heuristic assumes escapes are
//! stripped, and the line filter assumes line endings are normalized.

use regex::Regex;

use super::noise::NoiseClassifier;

/// What a rule does to the text.
#[derive(Debug, Clone)]
enum Action {
    /// Replace every match of each pattern, in order. With `until_stable`
    /// the whole pass repeats until nothing matches any more.
    Replace {
        patterns: Vec<Regex>,
        replacement: &'static str,
        until_stable: bool,
    },
    /// Drop C0/DEL/C1 controls except `\n`; tabs become a space.
    ResidualControls,
    /// Drop noise lines, keep whitespace-only lines as empty lines.
    NoiseLines(NoiseClassifier),
    /// Cap runs of consecutive newlines.
    BlankRuns { max: usize },
    /// Right-trim every line, then trim the whole text.
    Trim,
}

/// One named step of the cleanup cascade.
#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    action: Action,
}

fn pattern(src: &str) -> Regex {
    Regex::new(src).unwrap_or_else(|e| panic!("built-in pattern {:?} is invalid: {}", src, e))
}

impl Rule {
    fn replace(name: &'static str, sources: &[&str], replacement: &'static str) -> Self {
        Self {
            name,
            action: Action::Replace {
                patterns: sources.iter().map(|s| pattern(s)).collect(),
                replacement,
                until_stable: false,
            },
        }
    }

    /// `ESC ] … (BEL | ESC \)`: window titles, hyperlinks, cwd reports.
    pub fn osc() -> Self {
        Self::replace("osc", &[r"\x1B\][^\x07\x1B]*(?:\x07|\x1B\\)"], "")
    }

    /// Two-byte escapes (`ESC @`..`ESC _`) and CSI sequences (`ESC [ … final`).
    pub fn ansi() -> Self {
        Self::replace(
            "ansi",
            &[r"\x1B(?:[@-Z\x5C-_]|\[[0-?]*[ -/]*[@-~])"],
            "",
        )
    }

    /// Device control strings, `ESC P … ESC \`.
    pub fn dcs() -> Self {
        Self::replace("dcs", &[r"\x1BP[^\x1B]*\x1B\\"], "")
    }

    /// Application program commands, `ESC _ … ESC \`.
    pub fn apc() -> Self {
        Self::replace("apc", &[r"\x1B_[^\x1B]*\x1B\\"], "")
    }

    /// Privacy messages, `ESC ^ … ESC \`.
    pub fn pm() -> Self {
        Self::replace("pm", &[r"\x1B\^[^\x1B]*\x1B\\"], "")
    }

    /// Bell, backspace, form feed and vertical tab.
    pub fn control_chars() -> Self {
        Self::replace("control-chars", &[r"[\x07\x08\x0B\x0C]"], "")
    }

    /// Inline editor rulers like `40,0-158%~@k`.
    ///
    /// Removing one ruler can join its neighbours into another, so this rule
    /// runs to a fixpoint.
    pub fn status_ruler() -> Self {
        let mut rule = Self::replace(
            "status-ruler",
            &[
                r"[0-9]+,[0-9]*-?[0-9]*%?~@[a-zA-Z]",
                r"[0-9]+,[0-9]+%~@[a-zA-Z]",
            ],
            "",
        );
        if let Action::Replace { until_stable, .. } = &mut rule.action {
            *until_stable = true;
        }
        rule
    }

    /// Clear-screen and cursor-home.
    pub fn clear_screen() -> Self {
        Self::replace("clear-screen", &[r"\x1B\[2J", r"\x1B\[H"], "")
    }

    /// `CR spaces CR` overwrites become a line break.
    pub fn cr_overwrite() -> Self {
        Self::replace("cr-overwrite", &[r"\r +\r"], "\n")
    }

    /// `CRLF` and bare `CR` become `LF`.
    pub fn line_endings() -> Self {
        Self::replace("line-endings", &[r"\r\n|\r"], "\n")
    }

    pub fn residual_controls() -> Self {
        Self {
            name: "residual-controls",
            action: Action::ResidualControls,
        }
    }

    pub fn noise_lines(classifier: NoiseClassifier) -> Self {
        Self {
            name: "noise-lines",
            action: Action::NoiseLines(classifier),
        }
    }

    pub fn blank_runs(max: usize) -> Self {
        Self {
            name: "blank-runs",
            action: Action::BlankRuns { max },
        }
    }

    pub fn trim() -> Self {
        Self {
            name: "trim",
            action: Action::Trim,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Apply this rule on its own.
    pub fn apply(&self, text: &str) -> String {
        match &self.action {
            Action::Replace {
                patterns,
                replacement,
                until_stable,
            } => {
                let mut out = text.to_string();
                loop {
                    let before = out.len();
                    for re in patterns {
                        out = re.replace_all(&out, *replacement).into_owned();
                    }
                    // Fixpoint rules replace with "", so equal length means no match.
                    if !*until_stable || out.len() == before {
                        break out;
                    }
                }
            }
            Action::ResidualControls => text
                .chars()
                .filter_map(|c| match c {
                    '\n' => Some('\n'),
                    '\t' => Some(' '),
                    c if c.is_control() => None,
                    c => Some(c),
                })
                .collect(),
            Action::NoiseLines(classifier) => text
                .split('\n')
                .filter_map(|line| {
                    if line.trim().is_empty() {
                        Some("")
                    } else if classifier.is_noise(line) {
                        None
                    } else {
                        Some(line)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Action::BlankRuns { max } => collapse_newlines(text, *max),
            Action::Trim => text
                .split('\n')
                .map(str::trim_end)
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string(),
        }
    }
}

fn collapse_newlines(text: &str, max: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;
    for c in text.chars() {
        if c == '\n' {
            run += 1;
            if run <= max {
                out.push(c);
            }
        } else {
            run = 0;
            out.push(c);
        }
    }
    out
}
