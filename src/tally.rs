use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use vote_tally::*;

use std::fs;
use text_diff::print_diff;

use crate::args::Args;
use crate::tally::config_reader::*;
use crate::tally::io_text::*;

mod config_reader;
mod io_text;

/// The file read when no input is given on the command line or in the configuration.
pub const DEFAULT_INPUT_FILE: &str = "resultats-par-niveau-burvot-t1-france-entiere.txt";

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TallyError {
    #[snafu(display("Error opening results file {path}: {source}"))]
    OpeningInput { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno}: {source}"))]
    ReadingLine { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the configuration: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("The delimiter must be a single ASCII character, found {delimiter:?}"))]
    InvalidDelimiter { delimiter: String },
    #[snafu(display("The candidate column stride must be at least 1"))]
    InvalidStride {},
    #[snafu(display("Unknown order {order:?}, expected 'name' or 'votes'"))]
    InvalidOrder { order: String },
    #[snafu(display("Error opening reference file {path}: {source}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between the report and the reference {path}"))]
    ReferenceMismatch { path: String },
}

pub type TallyResult<T> = Result<T, TallyError>;

pub type BTallyResult<T> = Result<T, Box<TallyError>>;

fn parse_order(order: &Option<String>) -> TallyResult<ReportOrder> {
    match order.as_deref() {
        None | Some("name") => Ok(ReportOrder::Name),
        Some("votes") => Ok(ReportOrder::Votes),
        Some(x) => InvalidOrderSnafu {
            order: x.to_string(),
        }
        .fail(),
    }
}

/// Reads the results, aggregates them and returns the lines of the report.
pub fn tally_file(args: &Args) -> BTallyResult<Vec<String>> {
    let config = match args.config.clone() {
        Some(p) => read_config(p)?,
        None => TallyConfig::default(),
    };
    debug!("tally_file: config: {:?}", config);
    let source = config.validate()?;
    let order = parse_order(&args.order)?;

    let input = args
        .input
        .clone()
        .or_else(|| config.input_file.clone())
        .unwrap_or_else(|| DEFAULT_INPUT_FILE.to_string());
    info!("Attempting to read results file {:?}", input);

    let mut tally = Tally::new();
    let stats = read_results_file(&input, &source, &mut tally)?;
    info!("tally_file: {}: {:?}", input, stats);
    info!(
        "tally_file: {} votes, {} candidates, {} districts",
        tally.global_total(),
        tally.votes_by_candidate().len(),
        tally.votes_by_district().len()
    );
    if stats.skipped() > 0 {
        warn!(
            "{} lines of {} could not be used ({} malformed, {} unreadable)",
            stats.skipped(),
            input,
            stats.malformed,
            stats.unreadable
        );
    }

    check_candidate_totals(&tally);
    Ok(tally.report_lines(order))
}

// The per-district totals of each candidate must add up to its national total.
fn check_candidate_totals(tally: &Tally) -> bool {
    let rebuilt = candidate_totals_from_districts(tally.votes_by_candidate_and_district());
    let consistent = rebuilt.len() == tally.votes_by_candidate().len()
        && tally
            .votes_by_candidate()
            .iter()
            .all(|(candidate, votes)| rebuilt.get(candidate) == Some(votes));
    if consistent {
        debug!("check_candidate_totals: per-district totals match the candidate totals");
    } else {
        warn!("check_candidate_totals: per-district totals do not match the candidate totals");
    }
    consistent
}

/// Compares a report to the content of a reference file.
///
/// Trailing whitespace at the end of the files is ignored.
pub fn check_reference(report: &str, reference_path: String) -> BTallyResult<()> {
    let reference = fs::read_to_string(reference_path.clone()).context(OpeningReferenceSnafu {
        path: reference_path.clone(),
    })?;
    if reference.trim_end() != report.trim_end() {
        warn!("Found differences with the reference {}", reference_path);
        print_diff(reference.trim_end(), report.trim_end(), "\n");
        return Err(Box::new(TallyError::ReferenceMismatch {
            path: reference_path,
        }));
    }
    info!("The report matches the reference {}", reference_path);
    Ok(())
}

pub fn run_tally(args: &Args) -> BTallyResult<()> {
    let lines = tally_file(args)?;
    let report = lines.join("\n");
    for line in lines.iter() {
        println!("{}", line);
    }

    // The reference report, if provided for comparison
    if let Some(reference_path) = args.reference.clone() {
        check_reference(&report, reference_path)?;
    }
    Ok(())
}
