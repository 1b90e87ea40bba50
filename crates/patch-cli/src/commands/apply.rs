//! Apply command implementation

use super::{EXIT_ANCHOR_NOT_FOUND, resolve_spec};
use crate::cli::SpecArgs;
use crate::error::Result;
use colored::Colorize;
use patch_core::{ApplyOptions, ApplyResult, PatchOutcome, patch_file};

/// Patch the target file and return the process exit code.
pub fn run_apply(args: &SpecArgs, options: &ApplyOptions) -> Result<i32> {
    let (file, spec) = resolve_spec(args, true)?;
    tracing::debug!(file = %file.display(), anchor = %spec.anchor, "applying patch");

    let result = patch_file(&file, &spec, options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result, options.dry_run);
    }

    Ok(match result.outcome {
        PatchOutcome::Patched { .. } => 0,
        PatchOutcome::AnchorNotFound => EXIT_ANCHOR_NOT_FOUND,
    })
}

fn print_result(result: &ApplyResult, dry_run: bool) {
    let path = result.path.display();

    if dry_run && !result.diff.is_empty() {
        print!("{}", result.diff);
    }

    if let Some(line) = result.report.unterminated_at {
        eprintln!(
            "{}: block after anchor on line {} is never closed; everything after it was dropped",
            "warning".yellow().bold(),
            line
        );
    }

    match result.outcome {
        PatchOutcome::AnchorNotFound => {
            println!("{} anchor not found in {}", "!".yellow(), path);
        }
        PatchOutcome::Patched { occurrences } => {
            let verb = if dry_run { "would patch" } else { "patched" };
            println!(
                "{} {} {}: {} occurrence{} ({}, {})",
                "OK".green().bold(),
                verb,
                path,
                occurrences,
                if occurrences == 1 { "" } else { "s" },
                format!("+{}", result.summary.inserted).green(),
                format!("-{}", result.summary.deleted).red(),
            );
        }
    }

    if let Some(written) = &result.written {
        if written != &result.path {
            println!("   wrote {}", written.display());
        }
    }
    if let Some(backup) = &result.backup {
        println!("   backup {}", backup.display());
    }
}
