pub mod output;
pub mod snapshots;
