use std::io;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Snapshot of generation {generation} has {mutations} mutations but {counts} counts")]
    SnapshotLength {
        generation: u32,
        mutations: usize,
        counts: usize,
    },
    #[error("Failed to read or write file")]
    Io(#[from] io::Error),
    #[error("Failed to parse snapshot on line {line}")]
    SnapshotParse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize trajectories")]
    Json(#[from] serde_json::Error),
    #[error("Failed to write tsv output")]
    Csv(#[from] csv::Error),
}
