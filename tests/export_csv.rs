//! Tests for CSV export functionality.

use tempfile::TempDir;
use visitor_analytics::error_handling::LoadStats;
use visitor_analytics::export::export_csv;
use visitor_analytics::loader::parse_records;
use visitor_analytics::model::VisitorRecord;

const SOURCE: &str = "http://example.com/sheet.csv";

#[test]
fn export_writes_present_and_derived_columns() {
    let body = "timestamp,ip,country,device,browser,lat,lon\n\
                2024-01-01 10:00:00,203.0.113.1,US,Mobile,Chrome,37.77,-122.42\n\
                2024-01-02 09:30:00,203.0.113.2,FR,Desktop,Firefox,,\n";
    let stats = LoadStats::new();
    let set = parse_records(body, SOURCE, &stats).expect("sample data should parse");
    let rows: Vec<&VisitorRecord> = set.records.iter().collect();

    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("export.csv");
    let written = export_csv(&rows, &set.schema, Some(&path)).expect("export should succeed");
    assert_eq!(written, 2);

    let mut reader = csv::Reader::from_path(&path).expect("exported file should open");
    let headers: Vec<String> = reader
        .headers()
        .expect("exported file should have headers")
        .iter()
        .map(str::to_string)
        .collect();
    assert_eq!(
        headers,
        vec![
            "timestamp", "ip", "country", "device", "browser", "lat", "lon", "date", "hour",
            "day_name", "week",
        ]
    );

    let records: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("exported rows should read back");
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][0], "2024-01-01 10:00:00");
    assert_eq!(&records[0][2], "US");
    assert_eq!(&records[0][5], "37.77");
    assert_eq!(&records[0][7], "2024-01-01");
    assert_eq!(&records[0][9], "Monday");
    // Missing coordinates export as empty cells
    assert_eq!(&records[1][5], "");
    assert_eq!(&records[1][6], "");
}

#[test]
fn export_skips_absent_columns() {
    let body = "timestamp,ip,country\n2024-01-01 10:00:00,203.0.113.1,US\n";
    let stats = LoadStats::new();
    let set = parse_records(body, SOURCE, &stats).expect("sample data should parse");
    let rows: Vec<&VisitorRecord> = set.records.iter().collect();

    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("export.csv");
    export_csv(&rows, &set.schema, Some(&path)).expect("export should succeed");

    let mut reader = csv::Reader::from_path(&path).expect("exported file should open");
    let headers: Vec<String> = reader
        .headers()
        .expect("exported file should have headers")
        .iter()
        .map(str::to_string)
        .collect();
    assert_eq!(
        headers,
        vec!["timestamp", "ip", "country", "date", "hour", "day_name", "week"]
    );
}

#[test]
fn export_of_empty_view_writes_header_only() {
    let body = "timestamp,ip,country\n2024-01-01 10:00:00,203.0.113.1,US\n";
    let stats = LoadStats::new();
    let set = parse_records(body, SOURCE, &stats).expect("sample data should parse");
    let rows: Vec<&VisitorRecord> = Vec::new();

    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("empty.csv");
    let written = export_csv(&rows, &set.schema, Some(&path)).expect("export should succeed");
    assert_eq!(written, 0);

    let mut reader = csv::Reader::from_path(&path).expect("exported file should open");
    assert!(!reader.headers().expect("headers").is_empty());
    assert_eq!(reader.records().count(), 0);
}
