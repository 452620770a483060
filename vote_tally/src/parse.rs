use log::{debug, warn};

use std::collections::BTreeMap;

use crate::config::*;

/// The separator between the fields of a line.
pub const FIELD_DELIMITER: char = ';';

/// Parses one line of results.
///
/// `lineno` is only used for reporting and should be the 1-based line
/// number in the source file.
pub fn parse_line(
    line: &str,
    lineno: usize,
    schema: &RecordSchema,
) -> Result<VoteRecord, RecordError> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    parse_fields(&fields, lineno, schema)
}

/// Builds a record from the fields of a line that has already been split.
///
/// A line that is too short for the schema is rejected. A total that is not
/// an integer is counted as 0 and the line is still accepted.
pub fn parse_fields(
    fields: &[&str],
    lineno: usize,
    schema: &RecordSchema,
) -> Result<VoteRecord, RecordError> {
    let expected = schema.min_width();
    if fields.len() < expected {
        return Err(RecordError::Malformed {
            lineno,
            width: fields.len(),
            expected,
        });
    }

    let district = fields[schema.district_index].to_string();
    let total_votes = match parse_count(fields[schema.total_votes_index]) {
        Some(x) => x,
        None => {
            warn!(
                "parse_fields: line {}: could not read the number of votes {:?} in column {}",
                lineno, fields[schema.total_votes_index], schema.total_votes_index
            );
            0
        }
    };
    let candidates = parse_candidates(fields, lineno, schema);
    debug!(
        "parse_fields: line {}: district {:?} total {} candidates {:?}",
        lineno, district, total_votes, candidates
    );

    Ok(VoteRecord {
        candidates,
        district,
        total_votes,
    })
}

/// Extracts the votes of each candidate from the fields of a line.
///
/// Groups are read until the vote column of the next group would be past
/// the end of the line. A candidate whose vote count is not an integer is
/// left out of the result.
pub fn parse_candidates(
    fields: &[&str],
    lineno: usize,
    schema: &RecordSchema,
) -> BTreeMap<String, u64> {
    let mut candidates: BTreeMap<String, u64> = BTreeMap::new();
    // A zero stride would never advance.
    let stride = schema.candidate_stride.max(1);
    let mut idx = schema.first_candidate_index;
    while idx + schema.candidate_votes_offset < fields.len() {
        let name = fields[idx];
        let votes_s = fields[idx + schema.candidate_votes_offset];
        match parse_count(votes_s) {
            Some(votes) => {
                candidates.insert(name.to_string(), votes);
            }
            None => {
                warn!(
                    "parse_candidates: line {}: skipping candidate {:?}: could not read the number of votes {:?}",
                    lineno, name, votes_s
                );
            }
        }
        idx += stride;
    }
    if idx < fields.len() {
        debug!(
            "parse_candidates: line {}: ignoring {} trailing fields",
            lineno,
            fields.len() - idx
        );
    }
    candidates
}

fn parse_count(s: &str) -> Option<u64> {
    s.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // Builds a line with the given district, total and candidate groups laid
    // out like the default schema.
    fn make_line(district: &str, total: &str, candidates: &[(&str, &str)]) -> String {
        let mut fields: Vec<String> = (0..23).map(|i| format!("f{}", i)).collect();
        fields[1] = district.to_string();
        fields[10] = total.to_string();
        for (name, votes) in candidates {
            fields.push(name.to_string());
            fields.push("M".to_string());
            fields.push(votes.to_string());
            fields.push("1,00".to_string());
            fields.push("2,00".to_string());
            fields.push("".to_string());
            fields.push("".to_string());
        }
        fields.join(";")
    }

    #[test]
    fn parse_simple_line() {
        init();
        let line = make_line("75", "100", &[("DUPONT", "60"), ("MARTIN", "40")]);
        let r = parse_line(&line, 2, &RecordSchema::DEFAULT_SCHEMA).unwrap();
        assert_eq!(r.district, "75");
        assert_eq!(r.total_votes, 100);
        assert_eq!(r.candidates.get("DUPONT"), Some(&60));
        assert_eq!(r.candidates.get("MARTIN"), Some(&40));
        assert_eq!(r.candidates.len(), 2);
    }

    #[test]
    fn short_line_is_malformed() {
        init();
        let res = parse_line("a;75;c", 7, &RecordSchema::DEFAULT_SCHEMA);
        assert_eq!(
            res,
            Err(RecordError::Malformed {
                lineno: 7,
                width: 3,
                expected: 24
            })
        );
    }

    #[test]
    fn minimal_width_line_has_no_candidates() {
        init();
        let mut fields: Vec<String> = (0..24).map(|i| i.to_string()).collect();
        fields[10] = "12".to_string();
        let r = parse_line(&fields.join(";"), 2, &RecordSchema::DEFAULT_SCHEMA).unwrap();
        assert_eq!(r.total_votes, 12);
        assert!(r.candidates.is_empty());
    }

    #[test]
    fn bad_total_counts_as_zero() {
        init();
        let line = make_line("13", "n/a", &[("DUPONT", "5")]);
        let r = parse_line(&line, 2, &RecordSchema::DEFAULT_SCHEMA).unwrap();
        assert_eq!(r.total_votes, 0);
        assert_eq!(r.candidates.get("DUPONT"), Some(&5));
    }

    #[test]
    fn bad_candidate_votes_are_omitted() {
        init();
        let line = make_line("13", "30", &[("DUPONT", "abc"), ("MARTIN", "30")]);
        let r = parse_line(&line, 2, &RecordSchema::DEFAULT_SCHEMA).unwrap();
        assert!(!r.candidates.contains_key("DUPONT"));
        assert_eq!(r.candidates.get("MARTIN"), Some(&30));
    }

    #[test]
    fn negative_votes_are_rejected() {
        init();
        let line = make_line("13", "-4", &[("DUPONT", "-1")]);
        let r = parse_line(&line, 2, &RecordSchema::DEFAULT_SCHEMA).unwrap();
        assert_eq!(r.total_votes, 0);
        assert!(r.candidates.is_empty());
    }

    #[test]
    fn incomplete_trailing_group_is_ignored() {
        init();
        // The second group stops right before its vote column.
        let mut line = make_line("2A", "10", &[("DUPONT", "10")]);
        line.push_str(";MARTIN;M");
        let r = parse_line(&line, 2, &RecordSchema::DEFAULT_SCHEMA).unwrap();
        assert_eq!(r.candidates.len(), 1);
        assert_eq!(r.candidates.get("DUPONT"), Some(&10));

        // A group cut right after its vote column is still read.
        let mut line = make_line("2A", "10", &[("DUPONT", "10")]);
        line.push_str(";MARTIN;M;3");
        let r = parse_line(&line, 2, &RecordSchema::DEFAULT_SCHEMA).unwrap();
        assert_eq!(r.candidates.get("MARTIN"), Some(&3));
    }

    #[test]
    fn duplicate_candidate_keeps_last_group() {
        init();
        let line = make_line("01", "10", &[("DUPONT", "4"), ("DUPONT", "6")]);
        let r = parse_line(&line, 2, &RecordSchema::DEFAULT_SCHEMA).unwrap();
        assert_eq!(r.candidates.get("DUPONT"), Some(&6));
    }

    #[test]
    fn custom_schema() {
        init();
        let schema = RecordSchema {
            district_index: 0,
            total_votes_index: 1,
            first_candidate_index: 2,
            candidate_stride: 2,
            candidate_votes_offset: 1,
        };
        assert_eq!(schema.min_width(), 3);
        let r = parse_line("Paris;9;A;4;B;5", 2, &schema).unwrap();
        assert_eq!(r.district, "Paris");
        assert_eq!(r.total_votes, 9);
        assert_eq!(r.candidates.get("A"), Some(&4));
        assert_eq!(r.candidates.get("B"), Some(&5));
    }
}
