// Primitives for reading the delimited results files.

use std::borrow::Cow;
use std::io;

use log::{debug, warn};
use snafu::prelude::*;

use crate::tally::*;

/// Counters collected while reading a results file.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ReadStats {
    /// Lines after the header.
    pub lines: usize,
    pub records: usize,
    /// Lines too short for the schema.
    pub malformed: usize,
    /// Lines that could not be read.
    pub unreadable: usize,
}

impl ReadStats {
    pub fn skipped(&self) -> usize {
        self.malformed + self.unreadable
    }
}

/// Reads a results file and adds every usable line to `tally`.
pub fn read_results_file(
    path: &str,
    source: &SourceSettings,
    tally: &mut Tally,
) -> BTallyResult<ReadStats> {
    let rdr = reader_builder(source)
        .from_path(path)
        .context(OpeningInputSnafu { path })?;
    debug!("read_results_file: opened {:?}", path);
    Ok(read_results(rdr, source, tally))
}

/// Reads all the records after the header lines, one at a time.
///
/// The header lines are counted as records: blank lines are skipped by the
/// reader and do not count. Fields that are not valid UTF-8 (Latin-1 files)
/// are decoded lossily so that their numbers are still read. Lines that
/// cannot be used are logged and skipped.
pub fn read_results<R: io::Read>(
    rdr: csv::Reader<R>,
    source: &SourceSettings,
    tally: &mut Tally,
) -> ReadStats {
    let mut records = rdr.into_byte_records();
    for _ in 0..source.header_lines {
        if let Some(header) = records.next() {
            debug!("read_results: skipping header {:?}", header);
        }
    }

    let mut stats = ReadStats::default();
    for (idx, line_r) in records.enumerate() {
        stats.lines += 1;
        let fallback_lineno = idx + source.header_lines + 1;
        let line = match line_r.context(ReadingLineSnafu {
            lineno: fallback_lineno,
        }) {
            Ok(line) => line,
            Err(e) => {
                warn!("read_results: skipping line: {}", e);
                stats.unreadable += 1;
                continue;
            }
        };
        let lineno = line
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_lineno);
        let decoded: Vec<Cow<str>> = line.iter().map(String::from_utf8_lossy).collect();
        let fields: Vec<&str> = decoded.iter().map(|f| f.as_ref()).collect();
        match parse_fields(&fields, lineno, &source.schema) {
            Ok(record) => {
                stats.records += 1;
                tally.add_record(&record);
            }
            Err(e) => {
                warn!("read_results: skipping line: {}", e);
                stats.malformed += 1;
            }
        }
    }
    stats
}

/// The reader does not interpret quotes: a field ends at the next delimiter.
fn reader_builder(source: &SourceSettings) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(source.delimiter)
        .quoting(false)
        .flexible(true);
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_bytes(content: &[u8], source: &SourceSettings) -> (Tally, ReadStats) {
        let rdr = reader_builder(source).from_reader(content);
        let mut tally = Tally::new();
        let stats = read_results(rdr, source, &mut tally);
        (tally, stats)
    }

    fn read_str(content: &str, source: &SourceSettings) -> (Tally, ReadStats) {
        read_bytes(content.as_bytes(), source)
    }

    fn line(district: &str, total: &str, rest: &str) -> String {
        let mut fields: Vec<String> = (0..23).map(|_| String::new()).collect();
        fields[1] = district.to_string();
        fields[10] = total.to_string();
        format!("{};{}", fields.join(";"), rest)
    }

    #[test]
    fn header_is_skipped() {
        let content = format!(
            "{}\n{}\n",
            line("dep", "Votants", "Nom;Sexe;Voix"),
            line("75", "10", "DUPONT;M;10")
        );
        let (tally, stats) = read_str(&content, &SourceSettings::default());
        assert_eq!(tally.global_total(), 10);
        assert_eq!(tally.votes_by_district()["75"], 10);
        assert_eq!(tally.votes_by_candidate()["DUPONT"], 10);
        assert!(!tally.votes_by_district().contains_key("dep"));
        assert_eq!(
            stats,
            ReadStats {
                lines: 1,
                records: 1,
                malformed: 0,
                unreadable: 0
            }
        );
    }

    #[test]
    fn blank_lines_do_not_count_as_header() {
        let content = format!("\nheader\n\n{}\n", line("75", "10", "DUPONT;M;10"));
        let (tally, stats) = read_str(&content, &SourceSettings::default());
        assert_eq!(stats.records, 1);
        assert_eq!(tally.global_total(), 10);
    }

    #[test]
    fn short_lines_are_skipped() {
        let content = format!(
            "header\n{}\n75;12\n{}\r\n",
            line("75", "10", "DUPONT;M;10"),
            line("13", "5", "DUPONT;M;5")
        );
        let (tally, stats) = read_str(&content, &SourceSettings::default());
        assert_eq!(tally.num_records(), 2);
        assert_eq!(tally.global_total(), 15);
        assert_eq!(
            tally.votes_by_candidate_and_district()[&("DUPONT".to_string(), "13".to_string())],
            5
        );
        assert_eq!(stats.malformed, 1);
        assert_eq!(stats.skipped(), 1);
    }

    #[test]
    fn quotes_are_kept() {
        let content = format!("header\n{}\n", line("\"75", "10", "\"DUPONT;M;10"));
        let (tally, _) = read_str(&content, &SourceSettings::default());
        assert_eq!(tally.votes_by_district()["\"75"], 10);
        assert_eq!(tally.votes_by_candidate()["\"DUPONT"], 10);
    }

    #[test]
    fn latin1_lines_are_counted() {
        let mut content: Vec<u8> = b"header\n".to_vec();
        let mut fields: Vec<Vec<u8>> = (0..23).map(|_| Vec::new()).collect();
        fields[1] = b"Ard\xe8che".to_vec();
        fields[10] = b"10".to_vec();
        content.extend(fields.join(&b';'));
        content.extend(b";M\xc9LENCHON;M;7\n");
        content.extend(line("Ain", "5", "DUPONT;M;5").as_bytes());
        content.push(b'\n');

        let (tally, stats) = read_bytes(&content, &SourceSettings::default());
        assert_eq!(stats.records, 2);
        assert_eq!(stats.skipped(), 0);
        assert_eq!(tally.global_total(), 15);
        assert_eq!(tally.votes_by_district()["Ard\u{fffd}che"], 10);
        assert_eq!(tally.votes_by_candidate()["M\u{fffd}LENCHON"], 7);
        assert_eq!(tally.votes_by_candidate()["DUPONT"], 5);
    }

    #[test]
    fn missing_file() {
        let mut tally = Tally::new();
        let res = read_results_file(
            "/nonexistent/results.txt",
            &SourceSettings::default(),
            &mut tally,
        );
        assert!(matches!(
            res.map_err(|e| *e),
            Err(TallyError::OpeningInput { .. })
        ));
        assert_eq!(tally, Tally::new());
    }
}
