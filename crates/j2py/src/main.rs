//! j2py command-line entry point.
//!
//! Resolves Java source from a file path or an inline snippet, runs the
//! translation pipeline and writes the resulting Python to a file. Any
//! failure is caught here: the error chain goes to a temporary log file
//! and a non-fatal message names it, rather than propagating the failure
//! to the caller.

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use j2py_core::J2PyPipeline;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "j2py", version, about = "Translate Java source into Python")]
struct Cli {
    /// Java source file to translate
    #[arg(long, value_name = "FILE", conflicts_with = "snippet")]
    input_path: Option<PathBuf>,

    /// Inline Java snippet to translate
    #[arg(long, value_name = "JAVA")]
    snippet: Option<String>,

    /// Where the generated Python source is written
    #[arg(long, value_name = "FILE")]
    output_path: PathBuf,

    /// Dump the lowered syntax tree as JSON instead of Python
    #[arg(long)]
    emit_ast: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        report_failure(&err);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let source = match (&cli.input_path, &cli.snippet) {
        (Some(path), _) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, Some(snippet)) => snippet.clone(),
        (None, None) => bail!("either --input-path or --snippet must be provided"),
    };
    debug!(bytes = source.len(), "resolved Java input");

    let pipeline = J2PyPipeline::new();
    if cli.emit_ast {
        let unit = pipeline.parse(&source)?;
        let json = serde_json::to_string_pretty(&unit)?;
        write_output(&cli.output_path, &json)?;
        println!(
            "{} {}",
            "Syntax tree written to:".green(),
            cli.output_path.display()
        );
        return Ok(());
    }

    let python = pipeline.transpile(&source)?;
    write_output(&cli.output_path, &python)?;
    println!(
        "{} {}",
        "Python code written to:".green(),
        cli.output_path.display()
    );
    Ok(())
}

fn write_output(path: &PathBuf, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Failures are reported, never propagated: the full chain lands in a log
/// file and the user gets a one-line pointer to it.
fn report_failure(err: &anyhow::Error) {
    match write_failure_log(err) {
        Ok(path) => println!(
            "{} {}",
            "Unable to translate the Java input. Find logs at:".red(),
            path.display()
        ),
        Err(log_err) => eprintln!(
            "{} {err:#} (log file could not be written: {log_err:#})",
            "Unable to translate the Java input:".red()
        ),
    }
}

fn write_failure_log(err: &anyhow::Error) -> Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("j2py-")
        .suffix(".log")
        .tempfile()?;
    writeln!(file, "{err:?}")?;
    let (_, path) = file.keep()?;
    Ok(path)
}
