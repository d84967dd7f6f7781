//! xlsx2gor - command-line entry point
//!
//! Reads the HTTP request column of a spreadsheet and writes a GOR file.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use xlsx2gor::{
    ExcelToGorError, ExtractorBuilder, RequestIdFormat, SeparatorPolicy, SheetSelector,
    DEFAULT_COLUMN,
};

#[derive(Parser, Debug)]
#[command(name = "xlsx2gor")]
#[command(about = "Extract HTTP requests from Excel and convert to GOR format")]
#[command(version)]
struct Args {
    /// Path to the input Excel file
    #[arg(short, long)]
    input: PathBuf,

    /// Path to the output GOR file
    #[arg(short, long)]
    output: PathBuf,

    /// Name of the column containing HTTP requests
    #[arg(short, long, default_value = DEFAULT_COLUMN)]
    column: String,

    /// Sheet to read, by name (default: first sheet)
    #[arg(long, conflicts_with = "sheet_index")]
    sheet: Option<String>,

    /// Sheet to read, by 0-based index (default: first sheet)
    #[arg(long)]
    sheet_index: Option<usize>,

    /// Where separator blocks are placed between records
    #[arg(long, value_enum, default_value_t = SeparatorArg::SourceRows)]
    separator_policy: SeparatorArg,

    /// Request ID format
    #[arg(long, value_enum, default_value_t = IdFormatArg::Hyphenated)]
    id_format: IdFormatArg,

    /// Maximum input file size in bytes
    #[arg(long, value_name = "BYTES")]
    max_input_size: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SeparatorArg {
    /// Byte-compatible with existing GOR conversion tools
    SourceRows,
    /// Exactly one separator between written records
    WrittenRecords,
}

impl From<SeparatorArg> for SeparatorPolicy {
    fn from(arg: SeparatorArg) -> Self {
        match arg {
            SeparatorArg::SourceRows => SeparatorPolicy::SourceRows,
            SeparatorArg::WrittenRecords => SeparatorPolicy::WrittenRecords,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum IdFormatArg {
    /// First 24 characters of the hyphenated UUID
    Hyphenated,
    /// First 24 hex digits of the UUID
    Simple,
}

impl From<IdFormatArg> for RequestIdFormat {
    fn from(arg: IdFormatArg) -> Self {
        match arg {
            IdFormatArg::Hyphenated => RequestIdFormat::Hyphenated,
            IdFormatArg::Simple => RequestIdFormat::Simple,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if !args.input.exists() {
        error!("Input file {} does not exist", args.input.display());
        process::exit(1);
    }

    match run(&args) {
        Ok(count) => {
            info!(
                "Successfully wrote {} requests to {}",
                count,
                args.output.display()
            );
        }
        Err(e) => {
            error!("Error processing file: {}", e);
            if let ExcelToGorError::Write { written, .. } = e {
                error!("{} requests were written before the failure", written);
            }
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<usize, ExcelToGorError> {
    let sheet_selector = match (&args.sheet, args.sheet_index) {
        (Some(name), _) => SheetSelector::Name(name.clone()),
        (None, Some(index)) => SheetSelector::Index(index),
        (None, None) => SheetSelector::First,
    };

    let mut builder = ExtractorBuilder::new()
        .with_column(args.column.as_str())
        .with_sheet_selector(sheet_selector)
        .with_separator_policy(args.separator_policy.into())
        .with_request_id_format(args.id_format.into());

    if let Some(bytes) = args.max_input_size {
        builder = builder.with_max_input_size(bytes);
    }

    builder.build()?.extract(&args.input, &args.output)
}
