// ********* Input data structures ***********

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Display;

/// The results of one polling station, as read from one line of the input.
///
/// The total number of votes is read from its own column and is never
/// recomputed from the candidates: both may disagree when the source data
/// is inconsistent.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct VoteRecord {
    /// Votes for each candidate on this line. A candidate whose count could
    /// not be read is absent.
    pub candidates: BTreeMap<String, u64>,
    pub district: String,
    pub total_votes: u64,
}

/// Errors that make a line unusable.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RecordError {
    /// The line has fewer fields than the schema requires.
    Malformed {
        lineno: usize,
        width: usize,
        expected: usize,
    },
}

impl Error for RecordError {}

impl Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::Malformed {
                lineno,
                width,
                expected,
            } => write!(
                f,
                "Malformed record at line {}: found {} fields, expected at least {}",
                lineno, width, expected
            ),
        }
    }
}

// ********* Configuration **********

/// The position of the meaningful columns in a line of results.
///
/// All the indices are 0-based. Candidates come in groups of
/// `candidate_stride` columns starting at `first_candidate_index`: the first
/// column of a group is the name of the candidate, and the column
/// `candidate_votes_offset` further holds the number of votes.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct RecordSchema {
    pub district_index: usize,
    pub total_votes_index: usize,
    pub first_candidate_index: usize,
    pub candidate_stride: usize,
    pub candidate_votes_offset: usize,
}

impl RecordSchema {
    /// The layout of the per-polling-station files of the French
    /// presidential election.
    pub const DEFAULT_SCHEMA: RecordSchema = RecordSchema {
        district_index: 1,
        total_votes_index: 10,
        first_candidate_index: 23,
        candidate_stride: 7,
        candidate_votes_offset: 2,
    };

    /// The minimum number of fields a line needs before any column can be read.
    pub fn min_width(&self) -> usize {
        self.district_index
            .max(self.total_votes_index)
            .max(self.first_candidate_index)
            + 1
    }
}

impl Default for RecordSchema {
    fn default() -> Self {
        RecordSchema::DEFAULT_SCHEMA
    }
}

/// How the candidate reports are ordered.
///
/// The district ranking is always ordered by number of votes.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub enum ReportOrder {
    /// By candidate name, then by district.
    #[default]
    Name,
    /// By decreasing number of votes. Ties are broken by name.
    Votes,
}
