//! pdffuse - Merge PDF files into a single document.
//!
//! A CLI for merging whole PDFs or selected page ranges, with an
//! inspect subcommand for pre-merge validation.

mod cli;
mod report;

use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::process;

use crate::cli::{Cli, Command, InspectArgs, MergeArgs};
use crate::report::Reporter;
use pdffuse::command::parse_commands;
use pdffuse::io::SourceFile;
use pdffuse::merge::{MergeOptions, MergeOutput, Merger};
use pdffuse::validation::Validator;
use pdffuse::MergeError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        let code = err
            .downcast_ref::<MergeError>()
            .map_or(1, MergeError::exit_code);
        process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Merge(args) => run_merge(args).await,
        Command::Inspect(args) => run_inspect(args).await,
    }
}

/// Load the inputs, merge them and write the output file.
async fn run_merge(args: MergeArgs) -> anyhow::Result<()> {
    args.validate()?;

    let reporter = Reporter::new(args.quiet, args.verbose);

    if args.output.exists() && !args.force {
        anyhow::bail!(
            "Output file already exists: {} (use --force to overwrite)",
            args.output.display()
        );
    }

    let files = read_inputs(&args).await?;
    reporter.info(&format!("Merging {} file(s)...", files.len()));

    let output = match &args.script {
        Some(script_path) => {
            let script = tokio::fs::read_to_string(script_path)
                .await
                .with_context(|| {
                    format!("failed to read script file {}", script_path.display())
                })?;
            let parsed = parse_commands(&script, files.len());
            Merger::new().merge_script(&files, &parsed).await?
        }
        None => {
            let options = MergeOptions {
                use_page_range: !args.ranges.is_empty(),
                ..Default::default()
            };
            Merger::new().merge(&files, &options).await?
        }
    };

    tokio::fs::write(&args.output, &output.bytes)
        .await
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    reporter.success(&format!(
        "Successfully created {} ({} pages)",
        args.output.display(),
        output.total_pages()
    ));
    report_statistics(&reporter, &output);

    Ok(())
}

/// Inspect a single file and print its report.
async fn run_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let file = read_source(&args.file).await?;
    let report = Validator::new().inspect(&file)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("File:      {}", report.name);
        println!("Pages:     {}", report.page_count);
        println!("Size:      {} bytes", report.file_size);
        println!("Encrypted: {}", if report.is_encrypted { "yes" } else { "no" });
        println!("Bookmarks: {}", if report.has_bookmarks { "yes" } else { "no" });
    }

    Ok(())
}

/// Read all input files into memory, pairing --range flags by position.
async fn read_inputs(args: &MergeArgs) -> anyhow::Result<Vec<SourceFile>> {
    let mut files = Vec::with_capacity(args.inputs.len());

    for (index, path) in args.inputs.iter().enumerate() {
        let mut file = read_source(path).await?;
        file.page_range = args.ranges.get(index).cloned();
        files.push(file);
    }

    Ok(files)
}

async fn read_source(path: &Path) -> anyhow::Result<SourceFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read input file {}", path.display()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(SourceFile::new(name, bytes))
}

fn report_statistics(reporter: &Reporter, output: &MergeOutput) {
    if !reporter.is_verbose() {
        return;
    }

    let stats = &output.statistics;
    reporter.blank_line();
    reporter.info("Statistics");
    reporter.detail("Files merged", &stats.files_merged.to_string());
    reporter.detail("Files skipped", &stats.files_skipped.to_string());
    reporter.detail("Total pages", &stats.total_pages.to_string());
    reporter.detail("Input size", &stats.format_input_size());
    reporter.detail(
        "Load time",
        &format!("{:.2}s", stats.load_time.as_secs_f64()),
    );
    reporter.detail(
        "Merge time",
        &format!("{:.2}s", stats.merge_time.as_secs_f64()),
    );
}
