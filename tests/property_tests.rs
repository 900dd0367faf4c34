//! Property-based tests for manifest parsing
//!
//! Uses proptest to check the parser invariants:
//! - Blank and comment lines contribute nothing
//! - Marker payloads are trimmed exactly, whatever whitespace follows the marker
//! - Command payloads keep later `#` characters
//! - Every non-skipped line lands in exactly one collection

use proptest::prelude::*;

use archsetup::{Directive, InstallPlan};

/// Horizontal whitespace runs (no newlines, so each value stays one line)
fn ws() -> impl Strategy<Value = String> {
    "[ \t]{0,4}"
}

/// Payload text without surrounding whitespace or newlines
fn payload() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.+-]([a-zA-Z0-9_.+# -]{0,20}[a-zA-Z0-9_.+-])?"
}

/// A native package token that cannot be mistaken for a marker or comment
fn package_name() -> impl Strategy<Value = String> {
    "[a-z0-9][a-z0-9_.+-]{0,20}"
}

/// Any single manifest line
fn manifest_line() -> impl Strategy<Value = String> {
    prop_oneof![
        (ws(), payload()).prop_map(|(w, p)| format!("{w}#{p}")),
        ws(),
        (ws(), ws(), payload()).prop_map(|(a, b, p)| format!("{a}[aur]{b}{p}")),
        (ws(), ws(), payload()).prop_map(|(a, b, p)| format!("{a}[cmd]{b}{p}")),
        (ws(), package_name(), ws()).prop_map(|(a, p, b)| format!("{a}{p}{b}")),
    ]
}

fn is_skipped(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

proptest! {
    /// Blank and comment lines produce no entries
    #[test]
    fn comment_and_blank_lines_are_skipped(lead in ws(), body in payload()) {
        prop_assert_eq!(Directive::classify(&lead), None);
        prop_assert_eq!(Directive::classify(&format!("{lead}#{body}")), None);
    }

    /// AUR payload equals the trimmed payload regardless of marker spacing
    #[test]
    fn aur_payload_is_trimmed(lead in ws(), gap in ws(), body in payload(), tail in ws()) {
        let line = format!("{lead}[aur]{gap}{body}{tail}");
        prop_assert_eq!(Directive::classify(&line), Some(Directive::AurPackage(body)));
    }

    /// Command payload is kept whole, including any `#`
    #[test]
    fn command_payload_is_verbatim(gap in ws(), body in payload(), comment in payload()) {
        let cmd = format!("{body} # {comment}");
        let line = format!("[cmd]{gap}{cmd}");
        prop_assert_eq!(Directive::classify(&line), Some(Directive::Command(cmd)));
    }

    /// Each non-skipped line yields exactly one entry, in order
    #[test]
    fn classification_is_total(lines in prop::collection::vec(manifest_line(), 0..40)) {
        let text = lines.join("\n");
        let plan = InstallPlan::parse(&text);

        let expected = lines.iter().filter(|l| !is_skipped(l)).count();
        prop_assert_eq!(plan.len(), expected);

        let expected_aur: Vec<String> = lines
            .iter()
            .filter_map(|l| l.trim().strip_prefix("[aur]").map(|p| p.trim().to_string()))
            .collect();
        prop_assert_eq!(plan.aur(), expected_aur.as_slice());
    }
}
