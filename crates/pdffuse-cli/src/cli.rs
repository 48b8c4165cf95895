//! CLI argument parsing for pdffuse.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and help text generation.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Merge PDF files into a single document.
///
/// pdffuse combines whole PDF files or selected page ranges into one
/// output document, and can inspect files before merging.
#[derive(Parser, Debug)]
#[command(name = "pdffuse")]
#[command(version)]
#[command(about = "Merge PDF files into a single document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge PDF files into one output document
    Merge(MergeArgs),

    /// Inspect a PDF file and report page count and flags
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Input PDF files to merge (in order)
    ///
    /// Files are merged in the order provided. Use --range to select
    /// pages from individual inputs.
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path
    ///
    /// Use --force to overwrite an existing file.
    #[arg(short, long, value_name = "FILE", default_value = pdffuse::merge::MERGED_FILENAME)]
    pub output: PathBuf,

    /// Page range for the matching input (repeatable, paired by position)
    ///
    /// The first --range applies to the first input, the second to the
    /// second, and so on. Inputs without a range contribute all pages.
    /// Page numbers are 1-indexed; tokens the range cannot resolve are
    /// silently dropped.
    ///
    /// Examples:
    ///   --range "1-5"      # First 5 pages
    ///   --range "1,3,7-10" # Pages 1, 3, and 7 through 10
    ///   --range "all"      # Every page (same as no range)
    #[arg(short = 'r', long = "range", value_name = "RANGE")]
    pub ranges: Vec<String>,

    /// Read merge commands from a script file
    ///
    /// Each line is `<file>:<range>` where <file> is the 1-based index
    /// of an input, or a flag line such as `--keep-bookmarks`. Inputs
    /// may appear multiple times and in any order. Malformed lines
    /// abort the merge with a list of errors.
    #[arg(long, value_name = "FILE", conflicts_with = "ranges")]
    pub script: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    pub force: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output - show per-file details and timing
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// PDF file to inspect
    #[arg(required = true, value_name = "FILE")]
    pub file: PathBuf,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl MergeArgs {
    /// Validate argument combinations before any file I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if more --range flags were given than inputs.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ranges.len() > self.inputs.len() {
            anyhow::bail!(
                "{} --range flag(s) given for {} input file(s)",
                self.ranges.len(),
                self.inputs.len()
            );
        }
        Ok(())
    }
}
