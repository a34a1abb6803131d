use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use wasm_inspect::{inspect_file, write_report, InspectConfig};

/// Produce an annotated hex listing for a WebAssembly binary module.
#[derive(Debug, Parser)]
#[command(name = "wasm-inspect", version, about)]
struct Args {
    /// Module file to inspect.
    input: PathBuf,

    /// Write the listing here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the failure diagnostic as JSON on stderr.
    #[arg(long)]
    json_diagnostics: bool,

    /// Emit logs as JSON.
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.log_json {
        wasm_inspect::logging::init_tracing_json();
    } else {
        wasm_inspect::logging::init_tracing();
    }

    let config = InspectConfig::default();
    let inspection = inspect_file(&args.input, &config)?;

    match &args.output {
        Some(path) => write_report(path, &inspection)?,
        None => print!("{}", inspection.report),
    }

    if let Some(diag) = &inspection.failure {
        if args.json_diagnostics {
            eprintln!("{}", serde_json::to_string_pretty(diag)?);
        } else {
            eprintln!("{}", diag.message);
            if let Some(tail) = &diag.trailing_hex {
                eprintln!("remaining bytes: {}", tail);
            }
        }
        std::process::exit(1);
    }
    Ok(())
}
