//! CLI tool to compile a CSV game script into a binary script file.
//!
//! Usage:
//!   wte-mkscript <script.csv> <output[.sdf]>
//!   wte-mkscript <script.csv> <output> --header --yes

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;
use wte_mkscript::{BuildRequest, OverwritePolicy, build};

/// Compile a CSV game script into a binary script file.
///
/// Each row must have six columns: an integer timer and five text fields.
#[derive(Parser)]
#[command(name = "wte-mkscript")]
#[command(version)]
struct Cli {
    /// Input script (.csv)
    input: PathBuf,

    /// Output file (".sdf" is appended when no extension is given)
    output: PathBuf,

    /// Treat the first row as a header and skip it
    #[arg(long)]
    header: bool,

    /// Overwrite an existing output file without asking
    #[arg(short = 'y', long)]
    yes: bool,

    /// Log paths, row counts and sizes on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Ask on stderr, read the answer from stdin.
fn confirm_overwrite(path: &Path) -> bool {
    eprint!("Output file '{}' exists, overwrite? [Y/n] ", path.display());
    let _ = io::stderr().flush();

    read_confirmation(io::stdin().lock())
}

/// An empty line means yes. End of input or a read error means no.
fn read_confirmation(mut input: impl BufRead) -> bool {
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) | Err(_) => return false,
        Ok(_) => {}
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "" | "y" | "yes")
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !cli.input.exists() {
        eprintln!(
            "Error: Input file '{}' does not exist.",
            cli.input.display()
        );
        process::exit(1);
    }

    let policy = if cli.yes {
        OverwritePolicy::Always
    } else {
        OverwritePolicy::ask(confirm_overwrite)
    };

    let request = BuildRequest::new(&cli.input, &cli.output)
        .has_header(cli.header)
        .overwrite(policy);

    match build(request) {
        Ok(summary) => {
            println!(
                "Wrote script file '{}' ({} rows, {} bytes).",
                summary.output.display(),
                summary.rows,
                summary.bytes
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
