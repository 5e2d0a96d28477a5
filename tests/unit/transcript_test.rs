//! Unit tests for transcript cleaning

use castsum::asciicast::parse;
use castsum::transcript::{clean, Cleaner, CleanerConfig};

use crate::helpers::load_fixture;

#[test]
fn shell_session_fixture_cleans_to_readable_text() {
    let result = parse(&load_fixture("shell_session.cast")).unwrap();
    let transcript = clean(&result.outputs);

    assert_eq!(
        transcript,
        "ops@web-1:~$ ls\napp.log  deploy.sh\n$ ./deploy.sh\nDeploying done\n$ exit"
    );
}

#[test]
fn noise_only_recording_cleans_to_nothing() {
    let result = parse(&load_fixture("noise_only.cast")).unwrap();
    assert_eq!(clean(&result.outputs), "");
}

#[test]
fn status_lines_survive_when_disabled() {
    let config = CleanerConfig {
        drop_status_lines: false,
        ..CleanerConfig::default()
    };
    let cleaner = Cleaner::new(&config);
    assert_eq!(cleaner.clean(&["build\n45%\ndone"]), "build\n45%\ndone");
    assert_eq!(clean(&["build\n45%\ndone"]), "build\ndone");
}

#[test]
fn long_percentage_lines_are_kept() {
    let line = "Compiling module 45% of the workspace";
    assert_eq!(clean(&[line]), line);
}

#[test]
fn wider_blank_runs_when_configured() {
    let config = CleanerConfig {
        max_consecutive_newlines: 3,
        ..CleanerConfig::default()
    };
    let cleaner = Cleaner::new(&config);
    assert_eq!(cleaner.clean(&["a\n\n\n\n\n\nb"]), "a\n\n\nb");
}

#[test]
fn every_rule_is_idempotent_on_its_own_output() {
    let input = "\x1b]2;t\x07\x1b[1mbold\x1b[0m\r\n 10%\r   \rok\x07\n\n\n\n40,0-1%~@k end";
    let cleaner = Cleaner::default();
    for rule in cleaner.rules() {
        let once = rule.apply(input);
        assert_eq!(rule.apply(&once), once, "rule {}", rule.name());
    }
}

#[test]
fn no_control_characters_survive() {
    let fragments = [
        "\x1b[?1049h\x1b[1;24r\x1b[m\x1b[4l",
        "\x1bPq#0;2;0;0;0\x1b\\",
        "\x1b_hidden\x1b\\",
        "\x1b^private\x1b\\",
        "text\u{85}with\u{9c}c1",
        "\x1b(B\x1b)0",
        "end\x1b",
    ];
    let transcript = clean(&fragments);
    assert!(
        !transcript.chars().any(|c| c.is_control() && c != '\n'),
        "{:?}",
        transcript
    );
    assert!(transcript.contains("text"));
}
