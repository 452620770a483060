use clap::Parser;

/// This is a tabulation program for election results reported per polling station.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file containing the results, one polling station per line.
    /// Setting this option overrides the path that may be specified with the --config option.
    /// Defaults to resultats-par-niveau-burvot-t1-france-entiere.txt
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path, optional) A JSON file describing the layout of the input file.
    /// For more information about the file format, read the manual of the vote_tally crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the expected report. If provided, the program will
    /// check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (name or votes, default name) The order of the candidates in the reports.
    #[clap(long, value_parser)]
    pub order: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
