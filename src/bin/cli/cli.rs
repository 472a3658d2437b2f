use clap::{Args, Parser, Subcommand};
use freqtracker::io::output::OutputFormat;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub(crate) cmd: SubCmd,
}

#[derive(Subcommand)]
pub(crate) enum SubCmd {
    /// Replay population snapshots and report the trajectories of segregating variants
    Track(TrackArgs),
}

#[derive(Args, Debug)]
pub(crate) struct TrackArgs {
    /// path to snapshot file, one json snapshot per line (may be gzipped)
    pub snapshots: String,

    /// first generation that is recorded
    pub burnin_time: u32,

    /// output format
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// path to output file. Trajectories are written to stdout if not given
    #[clap(short, long)]
    pub output: Option<String>,

    /// enable debug prints
    #[clap(short, long)]
    pub debug: bool,
}
