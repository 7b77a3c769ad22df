//! Integration tests for sir-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{COUNTS_FILE, CsvWriter, GROUPS_FILE};
    use crate::row::{GroupCountRow, PedestrianGroupRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn group_row(pedestrian_id: u32, tick: u64, group_id: u32) -> PedestrianGroupRow {
        PedestrianGroupRow {
            pedestrian_id,
            tick,
            sim_time_secs: tick as f64 * 0.5,
            group_id,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join(GROUPS_FILE).exists());
        assert!(dir.path().join(COUNTS_FILE).exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(GROUPS_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["pedestrianId", "tick", "simTime", "groupId"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join(COUNTS_FILE)).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["tick", "simTime", "susceptible", "infected", "recovered"]);
    }

    #[test]
    fn group_rows_written_in_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_groups(&[group_row(0, 4, 1), group_row(3, 4, 0), group_row(7, 4, 2)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(GROUPS_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[0][2], "2"); // 4 * 0.5
        assert_eq!(&rows[0][3], "1");
        assert_eq!(&rows[2][0], "7");
        assert_eq!(&rows[2][3], "2");
    }

    #[test]
    fn count_row_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_counts(&GroupCountRow {
            tick:          10,
            sim_time_secs: 4.0,
            susceptible:   7,
            infected:      2,
            recovered:     1,
        })
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(COUNTS_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        let fields: Vec<&str> = rows[0].iter().collect();
        assert_eq!(fields, ["10", "4", "7", "2", "1"]);
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }
}

#[cfg(test)]
mod observer_tests {
    use sir_agent::TopographyBuilder;
    use sir_core::{Point, Rect, SimConfig, SourceId};
    use sir_model::{SirGroupModel, SirParams};
    use sir_sim::{CorridorFlow, SimBuilder};

    use crate::csv::{COUNTS_FILE, GROUPS_FILE};
    use crate::{CsvWriter, GroupCountRow, OutputResult, OutputWriter, PedestrianGroupRow, SimOutputObserver};

    /// Keeps rows in memory.
    #[derive(Default)]
    struct MemoryWriter {
        groups:   Vec<PedestrianGroupRow>,
        counts:   Vec<GroupCountRow>,
        finished: usize,
    }

    impl OutputWriter for MemoryWriter {
        fn write_groups(&mut self, rows: &[PedestrianGroupRow]) -> OutputResult<()> {
            self.groups.extend_from_slice(rows);
            Ok(())
        }

        fn write_counts(&mut self, row: &GroupCountRow) -> OutputResult<()> {
            self.counts.push(*row);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    fn config(total_ticks: u64) -> SimConfig {
        SimConfig { step_secs: 0.5, total_ticks, seed: 3, output_interval_ticks: 1 }
    }

    #[test]
    fn snapshots_record_groups_and_counts() {
        let topo = TopographyBuilder::new(Rect::new(0.0, 0.0, 10.0, 10.0))
            .pedestrians([Point::new(1.0, 1.0), Point::new(8.0, 8.0), Point::new(4.0, 4.0)])
            .build()
            .unwrap();
        let params = SirParams { infections_at_start: 1, infection_rate: 0.0, ..SirParams::default() };
        let mut sim = SimBuilder::new(config(4), topo, SirGroupModel::new(), params).build().unwrap();

        let mut obs = SimOutputObserver::new(MemoryWriter::default());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());
        let w = obs.into_writer();

        assert_eq!(w.finished, 1);
        assert_eq!(w.counts.len(), 4);
        assert!(w.counts.iter().all(|c| (c.susceptible, c.infected, c.recovered) == (2, 1, 0)));
        assert_eq!(w.counts[3].sim_time_secs, 1.5);

        assert_eq!(w.groups.len(), 12);
        let first: Vec<(u32, u32)> = w.groups[..3].iter().map(|r| (r.pedestrian_id, r.group_id)).collect();
        assert_eq!(first, vec![(0, 1), (1, 0), (2, 0)]);
    }

    #[test]
    fn corridor_run_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let topo = TopographyBuilder::new(Rect::new(0.0, 0.0, 10.0, 2.0)).build().unwrap();
        let mut sim = SimBuilder::new(config(12), topo, SirGroupModel::new(), SirParams::default())
            .mover(CorridorFlow::new(SourceId(0), 2, 2.0))
            .build()
            .unwrap();

        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join(COUNTS_FILE)).unwrap();
        assert_eq!(rdr.records().count(), 12);

        let mut rdr = csv::Reader::from_path(dir.path().join(GROUPS_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| matches!(&r[3], "0" | "1" | "2")));
    }
}
