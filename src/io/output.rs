use crate::error::Error;
use crate::tracker::{Trajectories, VariantKey};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::io::Write;
use strum_macros::EnumString;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum OutputFormat {
    Json,
    Tsv,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Tsv => write!(f, "tsv"),
        }
    }
}

/// One trajectory in flat form. Json objects need string keys,
/// so the map is exported as a list of these.
#[derive(Serialize)]
struct TrajectoryRecord<'a> {
    origin_generation: u32,
    position: f64,
    effect_size: f64,
    counts: &'a [u32],
}

impl<'a> TrajectoryRecord<'a> {
    fn new(key: &VariantKey, counts: &'a [u32]) -> Self {
        Self {
            origin_generation: key.origin_generation,
            position: key.position,
            effect_size: key.effect_size,
            counts,
        }
    }
}

pub fn write_trajectories<W: Write>(
    trajectories: &Trajectories,
    format: OutputFormat,
    mut wtr: W,
) -> Result<(), Error> {
    match format {
        OutputFormat::Json => {
            let records = trajectories
                .iter()
                .map(|(k, t)| TrajectoryRecord::new(k, t.counts()))
                .collect::<Vec<_>>();
            serde_json::to_writer_pretty(&mut wtr, &records)?;
            writeln!(wtr)?;
            wtr.flush()?;
        }
        OutputFormat::Tsv => {
            let mut tsv = csv::WriterBuilder::new()
                .delimiter(b'\t')
                .from_writer(wtr);
            tsv.write_record(["origin_generation", "position", "effect_size", "counts"])?;
            for (k, t) in trajectories {
                let counts = t
                    .counts()
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<String>>()
                    .join(",");
                tsv.write_record([
                    k.origin_generation.to_string(),
                    k.position.to_string(),
                    k.effect_size.to_string(),
                    counts,
                ])?;
            }
            tsv.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{write_trajectories, OutputFormat};
    use crate::population::{DiploidSnapshot, Mutation};
    use crate::tracker::TrajectoryTracker;
    use std::str::FromStr;

    fn tracked() -> TrajectoryTracker {
        let mut t = TrajectoryTracker::new(0);
        t.record(&DiploidSnapshot::new(
            1,
            50,
            vec![Mutation::new(1, 0.3, -0.01), Mutation::new(0, 0.1000001, 0.0)],
            vec![5, 7],
        ));
        t.record(&DiploidSnapshot::new(
            2,
            50,
            vec![Mutation::new(1, 0.3, -0.01)],
            vec![12],
        ));
        t
    }

    #[test]
    fn tsv_output() {
        let mut out = Vec::new();
        write_trajectories(&tracked().trajectories(), OutputFormat::Tsv, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "origin_generation\tposition\teffect_size\tcounts\n\
             0\t0.1000001\t0\t7\n\
             1\t0.3\t-0.01\t5,12\n"
        );
    }

    #[test]
    fn json_output_keeps_exact_floats() {
        let mut out = Vec::new();
        write_trajectories(&tracked().trajectories(), OutputFormat::Json, &mut out).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let records = v.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["position"].as_f64().unwrap().to_bits(), 0.1000001f64.to_bits());
        assert_eq!(records[1]["counts"], serde_json::json!([5, 12]));
    }

    #[test]
    fn empty_json_is_empty_list() {
        let mut out = Vec::new();
        write_trajectories(&TrajectoryTracker::new(0).trajectories(), OutputFormat::Json, &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), "[]");
    }

    #[test]
    fn format_from_str() {
        assert_eq!(OutputFormat::from_str("TSV").unwrap(), OutputFormat::Tsv);
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
