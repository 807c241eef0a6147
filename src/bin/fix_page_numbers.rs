// src/bin/fix_page_numbers.rs
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ecma_ingest::config::{
    ChunkFields, PartLayout, PartSelection, RepairConfig, DEFAULT_BASE_DIR, DEFAULT_PAGE_FIELD,
    DEFAULT_PART_COUNT, DEFAULT_SECTION_FIELD,
};
use ecma_ingest::extractors::patterns::DEFAULT_RUNNING_HEADER;
use ecma_ingest::extractors::PageMapProfile;
use ecma_ingest::repair::repair_parts;
use ecma_ingest::utils::{self, AppError};

/// Fix page numbers in embedded chunk files by re-parsing content.md,
/// without re-chunking or re-embedding
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Part number to repair, or "all"
    #[arg(value_name = "PART-NUMBER|all")]
    part: PartSelection,

    /// Directory holding extracted/ and embedded/
    #[arg(long, default_value = DEFAULT_BASE_DIR)]
    base_dir: PathBuf,

    /// Number of parts processed by "all"
    #[arg(long, default_value_t = DEFAULT_PART_COUNT)]
    parts: u32,

    /// Added to the tracked page when a section header is found
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    page_offset: i32,

    /// Page the content.md text starts on
    #[arg(long, default_value_t = 1)]
    start_page: u32,

    /// Chunk field holding the section identifier
    #[arg(long, default_value = DEFAULT_SECTION_FIELD)]
    section_field: String,

    /// Chunk field holding the page number
    #[arg(long, default_value = DEFAULT_PAGE_FIELD)]
    page_field: String,

    /// Regex for running-header lines to ignore
    #[arg(long, default_value = DEFAULT_RUNNING_HEADER)]
    running_header: String,
}

impl Args {
    fn repair_config(&self) -> Result<RepairConfig, AppError> {
        let profile = PageMapProfile {
            start_page: self.start_page,
            page_offset: self.page_offset,
            ..PageMapProfile::default()
        }
        .with_running_header(&self.running_header)
        .map_err(|e| {
            AppError::Config(format!("Invalid running header pattern '{}': {}", self.running_header, e))
        })?;

        let fields = ChunkFields {
            section_id: self.section_field.clone(),
            page_number: self.page_field.clone(),
        };

        let mut config = RepairConfig::new(PartLayout::new(&self.base_dir), profile, fields);
        config.part_count = self.parts;
        Ok(config)
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let config = args.repair_config()?;
    tracing::info!(
        "Repairing part(s) {} under {}",
        args.part,
        config.layout.base_dir().display()
    );
    let reports = repair_parts(args.part, &config)?;

    let updated: usize = reports.iter().map(|(_, report)| report.updated).sum();
    tracing::info!(
        "All done! {} parts repaired, {} chunks updated. Re-run the upload step to refresh the database.",
        reports.len(),
        updated
    );
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
    tracing::debug!("Starting page-number repair for args: {:?}", args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            utils::logging::log_error_chain(&e);
            if e.is_usage() {
                eprintln!("Usage: fix-page-numbers <part-number|all> [OPTIONS] (see --help)");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_conventional_layout() {
        let args = Args::try_parse_from(["fix-page-numbers", "all"]).unwrap();
        assert_eq!(args.part, PartSelection::All);
        let config = args.repair_config().unwrap();
        assert_eq!(config.layout.base_dir(), std::path::Path::new("dev/data"));
        assert_eq!(config.part_count, 4);
        assert_eq!(config.profile.page_offset, 1);
        assert_eq!(config.fields, ChunkFields::default());
    }

    #[test]
    fn overrides_and_negative_offsets_parse() {
        let args = Args::try_parse_from([
            "fix-page-numbers",
            "2",
            "--base-dir",
            "/srv/ingest",
            "--page-offset",
            "-1",
            "--section-field",
            "clause",
        ])
        .unwrap();
        assert_eq!(args.part, PartSelection::One(2));
        let config = args.repair_config().unwrap();
        assert_eq!(config.profile.page_offset, -1);
        assert_eq!(config.fields.section_id, "clause");
        assert_eq!(config.layout.embedded_path(2), PathBuf::from("/srv/ingest/embedded/part2-embedded.json"));
    }

    #[test]
    fn bad_part_and_bad_pattern_are_rejected() {
        assert!(Args::try_parse_from(["fix-page-numbers", "two"]).is_err());
        assert!(Args::try_parse_from(["fix-page-numbers"]).is_err());

        let args = Args::try_parse_from(["fix-page-numbers", "1", "--running-header", "("]).unwrap();
        assert!(matches!(args.repair_config(), Err(AppError::Config(_))));
    }
}
