// src/bin/extract.rs
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ecma_ingest::convert::LopdfConverter;
use ecma_ingest::models::PageRange;
use ecma_ingest::pipeline::{extract_pdf, ExtractOptions};
use ecma_ingest::utils::{self, AppError};

/// Extract an ECMA-376 PDF into markdown plus a section index
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// PDF file to extract
    pdf_path: PathBuf,

    /// Output directory for content.md, sections.json, section-index.json and metadata.json
    output_dir: PathBuf,

    /// Inclusive 1-based page range, e.g. 100-200
    #[arg(long, value_name = "START-END")]
    pages: Option<PageRange>,

    /// Debug mode - also save scan-trace.txt with every header and page marker decision
    #[arg(short, long)]
    debug: bool,
}

fn run(args: Args) -> Result<(), AppError> {
    let options = ExtractOptions {
        page_range: args.pages,
        debug: args.debug,
    };
    extract_pdf(&LopdfConverter::new(), &args.pdf_path, &args.output_dir, &options)?;
    Ok(())
}

fn main() -> ExitCode {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments; usage errors exit with 1 like every other failure
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
        Err(e) => e.exit(),
    };
    tracing::debug!("Starting extraction for args: {:?}", args);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Extraction failed");
            utils::logging::log_error_chain(&e);
            ExitCode::FAILURE
        }
    }
}
