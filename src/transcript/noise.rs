//! Line-level noise classification for cleaned terminal output.
//!
//! [`NoiseClassifier`] decides by the *shape* of a line whether it carries
//! any prose. It is a best-effort filter: editor status bars and rulers have
//! no formal grammar, so a short line that happens to look like one will be
//! dropped too.

/// Structural noise classifier.
#[derive(Debug, Clone)]
pub struct NoiseClassifier {
    drop_status_lines: bool,
    status_line_max_len: usize,
}

impl NoiseClassifier {
    pub fn new(drop_status_lines: bool, status_line_max_len: usize) -> Self {
        Self {
            drop_status_lines,
            status_line_max_len,
        }
    }

    /// Returns `true` if the line should be dropped from the transcript.
    ///
    /// Whitespace-only lines are never noise; the caller keeps them as blank
    /// lines.
    pub fn is_noise(&self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return false;
        }
        Self::is_control_only(trimmed) || (self.drop_status_lines && self.is_status_line(trimmed))
    }

    /// Line made only of control characters and whitespace.
    fn is_control_only(s: &str) -> bool {
        s.chars().all(|c| c.is_control() || c.is_whitespace())
    }

    /// Short status-bar fragment: contains `%` and nothing beyond digits,
    /// letters, whitespace and `, % - ~ @`.
    ///
    /// Catches vim/less rulers and progress percentages (`45%`, `Top 12%`)
    /// that survive escape stripping as a line of their own.
    fn is_status_line(&self, s: &str) -> bool {
        s.chars().count() < self.status_line_max_len
            && s.contains('%')
            && s.chars().all(|c| {
                c.is_ascii_alphanumeric()
                    || c.is_whitespace()
                    || matches!(c, ',' | '%' | '-' | '~' | '@')
            })
    }
}

impl Default for NoiseClassifier {
    fn default() -> Self {
        Self::new(true, super::config::default_status_line_max_len())
    }
}
