//! Behavioural tests for the line patcher on in-memory documents.

use patch_core::{LinePatcher, PatchOutcome, PatchSpec, SourceDocument};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

const ANCHOR: &str = "// ANCHOR";
const BLOCK: &str = "NEW 1\nNEW 2\n";

fn patcher() -> LinePatcher {
    LinePatcher::new(PatchSpec::new(ANCHOR, BLOCK)).unwrap()
}

#[test]
fn test_no_anchor_is_noop() {
    let input = "a\nb\n*/\nc";
    let (output, report) = patcher().patch_str(input);

    assert_eq!(output, input);
    assert_eq!(report.outcome(), PatchOutcome::AnchorNotFound);
    assert_eq!(report.dropped_lines, 0);
    assert!(!report.is_unterminated());
}

#[test]
fn test_single_replacement() {
    let input = "head\n// ANCHOR\n/* old\nstill old\n*/\ntail\n";
    let (output, report) = patcher().patch_str(input);

    assert_eq!(output, "head\nNEW 1\nNEW 2\ntail\n");
    assert_eq!(report.anchor_lines, vec![2]);
    assert_eq!(report.dropped_lines, 3);
    assert_eq!(report.outcome(), PatchOutcome::Patched { occurrences: 1 });
}

#[test]
fn test_multiple_occurrences() {
    let input = "\
first
// ANCHOR admin
/* Container(
), */
middle
    // ANCHOR member
    /* Container() */
// ANCHOR third
*/
last
";
    let (output, report) = patcher().patch_str(input);

    assert_eq!(
        output,
        "first\nNEW 1\nNEW 2\nmiddle\nNEW 1\nNEW 2\nNEW 1\nNEW 2\nlast\n"
    );
    assert_eq!(report.occurrences(), 3);
    assert_eq!(report.anchor_lines, vec![2, 6, 8]);
}

#[test]
fn test_unterminated_block_drops_rest_of_document() {
    let input = "keep\n// ANCHOR\n/* never\nclosed\n";
    let (output, report) = patcher().patch_str(input);

    assert_eq!(output, "keep\nNEW 1\nNEW 2\n");
    assert_eq!(report.unterminated_at, Some(2));
    assert_eq!(report.dropped_lines, 2);
}

#[test]
fn test_anchor_on_last_line_is_unterminated() {
    let (output, report) = patcher().patch_str("keep\n// ANCHOR");

    assert_eq!(output, "keep\nNEW 1\nNEW 2\n");
    assert_eq!(report.unterminated_at, Some(2));
}

#[test]
fn test_second_run_finds_no_anchor() {
    let input = "head\n// ANCHOR\n/*\n*/\ntail\n";
    let p = patcher();

    let (first, _) = p.patch_str(input);
    let (second, report) = p.patch_str(&first);

    assert_eq!(second, first);
    assert_eq!(report.outcome(), PatchOutcome::AnchorNotFound);
}

#[test]
fn test_self_matching_replacement_is_not_idempotent() {
    let spec = PatchSpec::new(ANCHOR, "X\n// ANCHOR\n");
    assert!(spec.replacement_contains_anchor());
    let p = LinePatcher::new(spec).unwrap();

    let (first, _) = p.patch_str("// ANCHOR\n/*\n*/\ntail\n");
    assert_eq!(first, "X\n// ANCHOR\ntail\n");

    let (second, report) = p.patch_str(&first);
    assert_eq!(second, "X\nX\n// ANCHOR\n");
    assert_eq!(report.unterminated_at, Some(2));
}

#[test]
fn test_untouched_lines_preserved_byte_for_byte() {
    let input = "a\r\n  b \t\r\n// ANCHOR\r\n/*\r\n*/\r\n\r\nz";
    let (output, _) = patcher().patch_str(input);

    assert_eq!(output, "a\r\n  b \t\r\nNEW 1\nNEW 2\n\r\nz");
}

#[test]
fn test_anchor_inside_skipped_block_restarts_replacement() {
    let input = "// ANCHOR\n/*\n// ANCHOR\n*/\nend\n";
    let (output, report) = patcher().patch_str(input);

    assert_eq!(output, "NEW 1\nNEW 2\nNEW 1\nNEW 2\nend\n");
    assert_eq!(report.anchor_lines, vec![1, 3]);
    assert_eq!(report.dropped_lines, 2);
}

#[rstest]
#[case::delimiter_on_anchor_line("// ANCHOR */\nnext\n*/\nafter\n", "NEW 1\nNEW 2\nafter\n")]
#[case::one_line_comment("// ANCHOR\n/* Container() */\nafter\n", "NEW 1\nNEW 2\nafter\n")]
#[case::anchor_mid_line("x = 1; // ANCHOR here\n*/\ny\n", "NEW 1\nNEW 2\ny\n")]
#[case::delimiter_before_anchor("*/\n// ANCHOR\n*/\n", "*/\nNEW 1\nNEW 2\n")]
#[case::empty_document("", "")]
fn test_edge_cases(#[case] input: &str, #[case] expected: &str) {
    let (output, _) = patcher().patch_str(input);
    assert_eq!(output, expected);
}

#[test]
fn test_custom_delimiter() {
    let spec = PatchSpec::new("# BEGIN", "generated = true\n").with_closing_delimiter("# END");
    let p = LinePatcher::new(spec).unwrap();

    let (output, _) = p.patch_str("a = 1\n# BEGIN\nold = 2\n# END\nb = 3\n");
    assert_eq!(output, "a = 1\ngenerated = true\nb = 3\n");
}

#[test]
fn test_scan_matches_patch_report() {
    let doc = SourceDocument::from_text("x\n// ANCHOR\n/*\n*/\n// ANCHOR\ny\n");
    let p = patcher();

    let scanned = p.scan(&doc);
    let (_, patched) = p.patch(&doc);

    assert_eq!(scanned, patched);
    assert_eq!(scanned.unterminated_at, Some(5));
}

proptest! {
    #[test]
    fn prop_anchor_free_text_is_unchanged(input in "[a-z */\\r\\n\\t]{0,300}") {
        let (output, report) = patcher().patch_str(&input);
        prop_assert_eq!(output, input);
        prop_assert_eq!(report.outcome(), PatchOutcome::AnchorNotFound);
    }

    #[test]
    fn prop_lines_before_first_anchor_are_kept(prefix in "([a-z */]{0,20}\n){0,10}") {
        let input = format!("{prefix}// ANCHOR\n/*\n*/\n");
        let (output, _) = patcher().patch_str(&input);
        prop_assert_eq!(output, format!("{prefix}{BLOCK}"));
    }
}
