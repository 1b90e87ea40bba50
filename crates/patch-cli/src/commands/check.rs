//! Check command implementation

use super::{EXIT_ANCHOR_NOT_FOUND, resolve_spec};
use crate::cli::SpecArgs;
use crate::error::Result;
use colored::Colorize;
use patch_core::{LinePatcher, PatchOutcome, SourceDocument};
use patch_fs::io;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct CheckOutput<'a> {
    path: &'a Path,
    outcome: PatchOutcome,
    #[serde(flatten)]
    report: &'a patch_core::PatchReport,
}

/// Scan the target file for anchors and return the process exit code.
pub fn run_check(args: &SpecArgs) -> Result<i32> {
    let (file, spec) = resolve_spec(args, false)?;
    let patcher = LinePatcher::new(spec)?;

    let document = SourceDocument::from_text(&io::read_text(&file)?);
    let report = patcher.scan(&document);
    let outcome = report.outcome();

    if args.json {
        let output = CheckOutput {
            path: &file,
            outcome,
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match outcome {
            PatchOutcome::AnchorNotFound => {
                println!("{} anchor not found in {}", "!".yellow(), file.display());
            }
            PatchOutcome::Patched { occurrences } => {
                let lines: Vec<String> =
                    report.anchor_lines.iter().map(ToString::to_string).collect();
                println!(
                    "{} {}: {} anchor{} on line{} {}",
                    "OK".green().bold(),
                    file.display(),
                    occurrences,
                    if occurrences == 1 { "" } else { "s" },
                    if occurrences == 1 { "" } else { "s" },
                    lines.join(", ")
                );
                if let Some(line) = report.unterminated_at {
                    println!(
                        "{} block after line {} is never closed",
                        "!".yellow(),
                        line
                    );
                }
            }
        }
    }

    Ok(match outcome {
        PatchOutcome::Patched { .. } => 0,
        PatchOutcome::AnchorNotFound => EXIT_ANCHOR_NOT_FOUND,
    })
}
