//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Replace anchored, commented-out blocks in a text file
#[derive(Parser, Debug)]
#[command(name = "anchor-patch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the patch comes from and which file it applies to.
///
/// Flags override the values of the spec file.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecArgs {
    /// File to patch (defaults to the spec's `target`)
    pub file: Option<PathBuf>,

    /// Spec file (.toml, .json, .yaml)
    #[arg(short, long, env = "ANCHOR_PATCH_SPEC")]
    pub spec: Option<PathBuf>,

    /// Substring marking an anchor line
    #[arg(long)]
    pub anchor: Option<String>,

    /// Substring closing the block after an anchor
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Replacement text
    #[arg(long, conflicts_with = "replacement_file")]
    pub replacement: Option<String>,

    /// Read the replacement text from a file
    #[arg(long)]
    pub replacement_file: Option<PathBuf>,

    /// Print a JSON summary instead of text
    #[arg(long)]
    pub json: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Patch a file
    ///
    /// Exits 0 when at least one anchor was replaced, 2 when none was found.
    ///
    /// Examples:
    ///   anchor-patch apply --spec qr-block.toml
    ///   anchor-patch apply page.dart --anchor '// TODO QR' --replacement-file qr.txt
    ///   anchor-patch apply --spec qr-block.toml --dry-run
    Apply {
        #[command(flatten)]
        spec: SpecArgs,

        /// Show the diff without writing
        #[arg(long)]
        dry_run: bool,

        /// Keep a copy of the original as <file>.orig
        #[arg(long)]
        backup: bool,

        /// Refuse to write when a block is never closed
        #[arg(long)]
        strict: bool,

        /// Write the result here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report anchors without changing anything
    Check {
        #[command(flatten)]
        spec: SpecArgs,
    },
}
