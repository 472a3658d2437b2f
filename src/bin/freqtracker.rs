mod cli;

use clap::Parser;
use cli::cli::{Cli, SubCmd, TrackArgs};
use freqtracker::error::Error;
use freqtracker::io::{output::write_trajectories, snapshots::SnapshotReader};
use freqtracker::population::SampleRecorder;
use freqtracker::tracker::{GenerationCallback, TrajectoryTracker};
use log::{error, info};
use std::error::Error as _;
use std::{
    fs::File,
    io::{stdout, BufWriter},
    path::Path,
};

fn main() {
    let res = match Cli::parse().cmd {
        SubCmd::Track(args) => track(args),
    };

    if let Err(e) = res {
        error!("{}", e);
        if let Some(source) = e.source() {
            error!("caused by: {}", source);
        }
        std::process::exit(match e {
            Error::Io(_) => exitcode::IOERR,
            _ => exitcode::DATAERR,
        });
    }
}

fn track(args: TrackArgs) -> Result<(), Error> {
    if args.debug {
        simple_logger::init_with_level(log::Level::Debug).unwrap();
    } else {
        simple_logger::init_with_level(log::Level::Info).unwrap();
    }

    info!("Reading snapshots from: {:?}", args.snapshots);
    let reader = SnapshotReader::from_path(Path::new(&args.snapshots))?;
    let mut tracker = TrajectoryTracker::new(args.burnin_time);
    let mut recorder = SampleRecorder::new();

    let mut num_generations = 0;
    for snapshot in reader {
        tracker.on_generation(&snapshot?, &mut recorder);
        num_generations += 1;
    }
    info!(
        "Replayed {} generations, tracked {} variants",
        num_generations,
        tracker.len()
    );

    let trajectories = tracker.into_trajectories();
    match &args.output {
        Some(path) => {
            info!("Creating: {:?}", path);
            let wtr = BufWriter::new(File::create(path)?);
            write_trajectories(&trajectories, args.format, wtr)
        }
        None => write_trajectories(&trajectories, args.format, stdout().lock()),
    }
}
