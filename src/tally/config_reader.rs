use crate::tally::*;

use log::debug;
use snafu::prelude::*;

use serde::{Deserialize, Serialize};

/// The optional JSON configuration of a run.
///
/// Every field may be left out, in which case the layout of the French
/// per-polling-station files is used.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct TallyConfig {
    #[serde(rename = "inputFile")]
    pub input_file: Option<String>,
    #[serde(rename = "delimiter")]
    pub delimiter: Option<String>,
    /// Number of non-blank lines skipped at the top of the input.
    #[serde(rename = "headerLines")]
    pub header_lines: Option<usize>,
    #[serde(rename = "districtColumnIndex")]
    pub district_column_index: Option<usize>,
    #[serde(rename = "totalVotesColumnIndex")]
    pub total_votes_column_index: Option<usize>,
    #[serde(rename = "firstCandidateColumnIndex")]
    pub first_candidate_column_index: Option<usize>,
    #[serde(rename = "candidateColumnStride")]
    pub candidate_column_stride: Option<usize>,
    #[serde(rename = "candidateVotesOffset")]
    pub candidate_votes_offset: Option<usize>,
}

/// How to read the results file, once the configuration has been checked.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SourceSettings {
    pub delimiter: u8,
    pub header_lines: usize,
    pub schema: RecordSchema,
}

impl Default for SourceSettings {
    fn default() -> Self {
        SourceSettings {
            delimiter: b';',
            header_lines: 1,
            schema: RecordSchema::DEFAULT_SCHEMA,
        }
    }
}

impl TallyConfig {
    pub fn validate(&self) -> TallyResult<SourceSettings> {
        let default = SourceSettings::default();
        let delimiter = match self.delimiter.as_deref() {
            None => default.delimiter,
            Some(s) if s.len() == 1 && s.is_ascii() => s.as_bytes()[0],
            Some(s) => {
                return InvalidDelimiterSnafu {
                    delimiter: s.to_string(),
                }
                .fail()
            }
        };
        let d = default.schema;
        let schema = RecordSchema {
            district_index: self.district_column_index.unwrap_or(d.district_index),
            total_votes_index: self.total_votes_column_index.unwrap_or(d.total_votes_index),
            first_candidate_index: self
                .first_candidate_column_index
                .unwrap_or(d.first_candidate_index),
            candidate_stride: self.candidate_column_stride.unwrap_or(d.candidate_stride),
            candidate_votes_offset: self
                .candidate_votes_offset
                .unwrap_or(d.candidate_votes_offset),
        };
        ensure!(schema.candidate_stride > 0, InvalidStrideSnafu {});
        Ok(SourceSettings {
            delimiter,
            header_lines: self.header_lines.unwrap_or(default.header_lines),
            schema,
        })
    }
}

pub fn read_config(path: String) -> BTallyResult<TallyConfig> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    debug!("read_config: {:?}", contents);
    let config: TallyConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}
