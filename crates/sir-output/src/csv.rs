//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `sir_information.csv` — `pedestrianId,tick,simTime,groupId`
//! - `group_counts.csv` — `tick,simTime,susceptible,infected,recovered`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{GroupCountRow, OutputResult, PedestrianGroupRow};

/// File name of the per-pedestrian group trace.
pub const GROUPS_FILE: &str = "sir_information.csv";
/// File name of the compartment count series.
pub const COUNTS_FILE: &str = "group_counts.csv";

/// Writes SIR output to two CSV files.
pub struct CsvWriter {
    groups:   Writer<File>,
    counts:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut groups = Writer::from_path(dir.join(GROUPS_FILE))?;
        groups.write_record(["pedestrianId", "tick", "simTime", "groupId"])?;

        let mut counts = Writer::from_path(dir.join(COUNTS_FILE))?;
        counts.write_record(["tick", "simTime", "susceptible", "infected", "recovered"])?;

        Ok(Self {
            groups,
            counts,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_groups(&mut self, rows: &[PedestrianGroupRow]) -> OutputResult<()> {
        for row in rows {
            self.groups.write_record(&[
                row.pedestrian_id.to_string(),
                row.tick.to_string(),
                row.sim_time_secs.to_string(),
                row.group_id.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_counts(&mut self, row: &GroupCountRow) -> OutputResult<()> {
        self.counts.write_record(&[
            row.tick.to_string(),
            row.sim_time_secs.to_string(),
            row.susceptible.to_string(),
            row.infected.to_string(),
            row.recovered.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.groups.flush()?;
        self.counts.flush()?;
        Ok(())
    }
}
