//! bibris command-line converter
//!
//! Converts a `.bib` file to RIS or a `.ris` file to BibTeX, writing the
//! result next to the input with a `_generated` suffix. The input path is
//! taken from the command line or, when omitted, prompted for on stdin.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "bibris",
    about = "Convert citation files between BibTeX (.bib) and RIS (.ris)"
)]
struct Cli {
    /// Input file; prompted for when omitted
    input: Option<PathBuf>,

    /// Output path (default: input name with a _generated suffix and the
    /// opposite extension)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let input = match cli.input {
        Some(path) => path,
        None => prompt_for_path()?,
    };

    println!("Converting '{}'...", input.display());
    match bibris_core::convert_file_to(&input, cli.output.as_deref()) {
        Ok(written) => {
            println!(
                "Done: {} record(s) written to '{}'",
                written.outcome.converted,
                written.path.display()
            );
            for skipped in &written.outcome.skipped {
                eprintln!("skipped record {}: {}", skipped.index + 1, skipped.reason);
            }
        }
        Err(err) => {
            eprintln!("Error: {err}");
        }
    }
    Ok(())
}

fn prompt_for_path() -> io::Result<PathBuf> {
    print!("Enter the file to convert (.bib or .ris): ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(PathBuf::from(line.trim()))
}
