//! csv-to-sqlite CLI - copies delimited text files into a SQLite database.
//!
//! Each file is copied into a separate table. Column names are taken from
//! the header (first row); column types are inferred per the typing mode.
//! File names may be passed via `--file` and piped on standard input; both
//! sets are processed.

use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use csv_to_sqlite::{LoadError, LoadOptions, Orchestrator, QuoteMode, TypingMode};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "csv-to-sqlite")]
#[command(about = "Copies delimited text files into a SQLite database, one table per file")]
#[command(version)]
struct Cli {
    /// A file to copy into the database; can be specified multiple times.
    /// File names piped from standard input are processed as well.
    #[arg(short, long = "file", value_name = "PATH")]
    file: Vec<PathBuf>,

    /// The output database path [default: <current dir name>.db]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Column typing mode: full, quick, or none
    #[arg(long, default_value = "full")]
    typing: String,

    /// Drop tables before creation, if they already exist (BEWARE OF DATA LOSS)
    #[arg(short = 'D', long)]
    drop_tables: bool,

    /// Field delimiter
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Text encoding label, e.g. utf-8 or latin1
    #[arg(long, default_value = "utf-8")]
    encoding: String,

    /// Identifier quoting: all or none
    #[arg(long, default_value = "all")]
    quote: String,

    /// Rows per insert statement
    #[arg(long, default_value = "1000")]
    batch_size: usize,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), LoadError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(LoadError::Config)?;

    let mut files = cli.file.clone();
    if !io::stdin().is_terminal() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                files.push(PathBuf::from(trimmed));
            }
        }
    }

    if files.is_empty() {
        println!("No files were specified. Exiting.");
        return Ok(());
    }

    let output = match cli.output {
        Some(path) => path,
        None => default_output()?,
    };
    info!("Output file: {}", output.display());

    let options = LoadOptions {
        typing: TypingMode::parse(&cli.typing)?,
        drop_tables: cli.drop_tables,
        delimiter: cli.delimiter,
        encoding: cli.encoding.clone(),
        quoting: QuoteMode::parse(&cli.quote)?,
        batch_size: cli.batch_size,
    };

    let orchestrator = Orchestrator::new(&output, options)?;
    let report = orchestrator.run(&files)?;

    for failure in &report.failures {
        eprintln!("Error on table {}: {}", failure.table, failure.error);
    }

    if cli.output_json {
        println!("{}", report.to_json()?);
    } else {
        println!(
            "Written {} rows into {} tables in {:.3} seconds",
            report.rows_inserted, report.files_total, report.duration_seconds
        );
    }

    Ok(())
}

/// Original default: the current directory's base name with a `.db`
/// extension, in the current directory.
fn default_output() -> Result<PathBuf, LoadError> {
    let cwd = std::env::current_dir()?;
    let base = cwd
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    Ok(PathBuf::from(format!("{}.db", base)))
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}
