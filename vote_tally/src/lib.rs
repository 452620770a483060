mod config;
pub mod manual;
pub mod parse;

use log::{debug, info};

use std::collections::{BTreeMap, HashMap};

pub use crate::config::*;
pub use crate::parse::{parse_candidates, parse_fields, parse_line};

/// The aggregated results of an election.
///
/// A tally starts empty and receives each record once. All the maps are
/// ordered by key, so iterating over them is deterministic.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Tally {
    global_total: u64,
    votes_by_candidate: BTreeMap<String, u64>,
    votes_by_candidate_and_district: BTreeMap<(String, String), u64>,
    votes_by_district: BTreeMap<String, u64>,
    num_records: u64,
}

impl Tally {
    pub fn new() -> Tally {
        Tally::default()
    }

    /// Adds the contribution of one record.
    ///
    /// The candidate counts and the total of the record are applied
    /// independently of each other.
    pub fn add_record(&mut self, record: &VoteRecord) {
        for (candidate, count) in record.candidates.iter() {
            *self
                .votes_by_candidate
                .entry(candidate.clone())
                .or_insert(0) += count;
            *self
                .votes_by_candidate_and_district
                .entry((candidate.clone(), record.district.clone()))
                .or_insert(0) += count;
        }
        *self
            .votes_by_district
            .entry(record.district.clone())
            .or_insert(0) += record.total_votes;
        self.global_total += record.total_votes;
        self.num_records += 1;
    }

    pub fn global_total(&self) -> u64 {
        self.global_total
    }

    pub fn num_records(&self) -> u64 {
        self.num_records
    }

    pub fn votes_by_candidate(&self) -> &BTreeMap<String, u64> {
        &self.votes_by_candidate
    }

    /// Votes, keyed by (candidate, district).
    pub fn votes_by_candidate_and_district(&self) -> &BTreeMap<(String, String), u64> {
        &self.votes_by_candidate_and_district
    }

    pub fn votes_by_district(&self) -> &BTreeMap<String, u64> {
        &self.votes_by_district
    }

    /// The districts sorted by decreasing number of votes.
    ///
    /// The sort is stable over the districts in name order, so districts
    /// with the same number of votes are listed by name.
    pub fn district_ranking(&self) -> Vec<(String, u64)> {
        let mut ranking: Vec<(String, u64)> = self
            .votes_by_district
            .iter()
            .map(|(district, votes)| (district.clone(), *votes))
            .collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1));
        ranking
    }

    // ******** Reports *********

    pub fn global_total_report(&self) -> String {
        format!("Nombre de votes : {}", self.global_total)
    }

    pub fn candidate_report(&self, order: ReportOrder) -> Vec<String> {
        let mut entries: Vec<(&String, &u64)> = self.votes_by_candidate.iter().collect();
        if order == ReportOrder::Votes {
            entries.sort_by(|a, b| b.1.cmp(a.1));
        }
        entries
            .iter()
            .map(|(candidate, votes)| format!("Candidat : {} Nombre de votes : {}", candidate, votes))
            .collect()
    }

    pub fn candidate_district_report(&self, order: ReportOrder) -> Vec<String> {
        let mut entries: Vec<(&(String, String), &u64)> =
            self.votes_by_candidate_and_district.iter().collect();
        if order == ReportOrder::Votes {
            entries.sort_by(|a, b| b.1.cmp(a.1));
        }
        entries
            .iter()
            .map(|((candidate, district), votes)| {
                format!(
                    "Département : {} Candidat : {} Nombre de votes : {}",
                    district, candidate, votes
                )
            })
            .collect()
    }

    pub fn district_ranking_report(&self) -> Vec<String> {
        self.district_ranking()
            .iter()
            .enumerate()
            .map(|(idx, (district, _))| format!("# {} : {}", idx + 1, district))
            .collect()
    }

    /// All the reports, one line per element, in the order they are printed.
    pub fn report_lines(&self, order: ReportOrder) -> Vec<String> {
        let mut lines = vec![self.global_total_report()];
        lines.extend(self.candidate_report(order));
        lines.extend(self.candidate_district_report(order));
        lines.extend(self.district_ranking_report());
        lines
    }
}

/// Aggregates a collection of records.
///
/// ```
/// use vote_tally::{tally_records, VoteRecord};
///
/// let record = VoteRecord {
///     candidates: [("DUPONT".to_string(), 60)].into_iter().collect(),
///     district: "75".to_string(),
///     total_votes: 100,
/// };
/// let tally = tally_records(&[record]);
/// assert_eq!(tally.global_total(), 100);
/// assert_eq!(tally.votes_by_candidate()["DUPONT"], 60);
/// ```
pub fn tally_records<'a, I>(records: I) -> Tally
where
    I: IntoIterator<Item = &'a VoteRecord>,
{
    let tally = records.into_iter().fold(Tally::new(), |mut tally, record| {
        tally.add_record(record);
        tally
    });
    info!(
        "tally_records: {} records, {} votes, {} candidates, {} districts",
        tally.num_records,
        tally.global_total,
        tally.votes_by_candidate.len(),
        tally.votes_by_district.len()
    );
    for (candidate, votes) in tally.votes_by_candidate.iter() {
        debug!("tally_records: candidate {}: {}", candidate, votes);
    }
    tally
}

/// Rebuilds the per-candidate totals from the per-candidate and per-district
/// totals.
pub fn candidate_totals_from_districts(
    by_candidate_and_district: &BTreeMap<(String, String), u64>,
) -> HashMap<String, u64> {
    let mut res: HashMap<String, u64> = HashMap::new();
    for ((candidate, _district), votes) in by_candidate_and_district.iter() {
        *res.entry(candidate.clone()).or_insert(0) += votes;
    }
    res
}
