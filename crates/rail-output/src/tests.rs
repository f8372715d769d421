//! Integration tests for rail-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use rail_model::NetworkBuilder;
    use rail_sim::{RailModel, Simulator};

    use crate::csv::CsvReportWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    /// One-train scenario that completes a single delivery by t = 9.
    fn finished_model() -> RailModel {
        let mut b = NetworkBuilder::new();
        let n0 = b.add_node("N0");
        let n1 = b.add_node("N1");
        b.connect(n0, n1, 100.0);
        let t0 = b.add_terminal(n1, Some(2.0), None);
        let t1 = b.add_terminal(n0, None, Some(3.0));
        b.relate_terminal(n0, t0);
        b.add_demand(t0, t1, 500.0);
        b.add_train(n0, 500.0, 0.0, 25.0, 50.0);

        let mut model = RailModel::new(b.build().unwrap());
        let mut sim = Simulator::new();
        sim.run(&mut model, 9.0).unwrap();
        model
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvReportWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("queue_log.csv").exists());
        assert!(dir.path().join("production.csv").exists());
        assert!(dir.path().join("demands.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvReportWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("production.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["origin", "destiny", "time", "quantity"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("demands.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["origin", "destiny", "total", "current", "achieved"]);
    }

    #[test]
    fn model_report_round_trip() {
        let dir = tmp();
        let model = finished_model();
        let mut w = CsvReportWriter::new(dir.path()).unwrap();
        w.write_model(&model).unwrap();
        w.finish().unwrap();

        let mut demands = csv::Reader::from_path(dir.path().join("demands.csv")).unwrap();
        let rows: Vec<csv::StringRecord> = demands.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][2], "500"); // total
        assert_eq!(&rows[0][3], "500"); // current
        assert_eq!(&rows[0][4], "1");   // achieved

        let mut production = csv::Reader::from_path(dir.path().join("production.csv")).unwrap();
        let rows: Vec<csv::StringRecord> = production.records().map(|r| r.unwrap()).collect();
        // Seed sample plus the delivery at t = 9.
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][2], "9");
        assert_eq!(&rows[1][3], "500");

        let mut queue = csv::Reader::from_path(dir.path().join("queue_log.csv")).unwrap();
        assert!(queue.records().count() >= 4);
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvReportWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}
