//! CSV export functionality.
//!
//! Exports the currently filtered record set with the same column set as
//! the input view, plus the derived columns. One row per visitor record,
//! standard CSV quoting.

use anyhow::{Context, Result};
use csv::Writer;
use std::io::{self, Write};
use std::path::Path;

use crate::config::DERIVED_COLUMNS;
use crate::model::{ColumnSchema, VisitorRecord};

/// Exports `rows` to CSV format.
///
/// # Arguments
///
/// * `rows` - Filtered rows, in the order they should be written
/// * `schema` - Column presence of the loaded set; only present input
///   columns are written
/// * `output` - Output file path (or stdout if None)
///
/// # Returns
///
/// Returns the number of records exported, or an error if export fails.
pub fn export_csv(
    rows: &[&VisitorRecord],
    schema: &ColumnSchema,
    output: Option<&Path>,
) -> Result<usize> {
    let mut writer: Writer<Box<dyn Write>> = if let Some(output_path) = output {
        let file = std::fs::File::create(output_path).context(format!(
            "Failed to create output file: {}",
            output_path.display()
        ))?;
        Writer::from_writer(Box::new(file) as Box<dyn Write>)
    } else {
        Writer::from_writer(Box::new(io::stdout()) as Box<dyn Write>)
    };

    let mut columns = schema.present_columns();
    columns.extend_from_slice(DERIVED_COLUMNS);
    writer.write_record(&columns)?;

    for row in rows {
        let fields: Vec<String> = columns
            .iter()
            .map(|column| column_value(row, column))
            .collect();
        writer.write_record(&fields)?;
    }

    writer.flush()?;

    Ok(rows.len())
}

/// String form of one column of a record, empty when the field is absent.
fn column_value(record: &VisitorRecord, column: &str) -> String {
    match column {
        "timestamp" => record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        "ip" => record.ip.clone(),
        "country" => record.country.clone().unwrap_or_default(),
        "region" => record.region.clone().unwrap_or_default(),
        "city" => record.city.clone().unwrap_or_default(),
        "isp" => record.isp.clone().unwrap_or_default(),
        "device" => record.device.clone().unwrap_or_default(),
        "browser" => record.browser.clone().unwrap_or_default(),
        "lat" => record.lat.map(|v| v.to_string()).unwrap_or_default(),
        "lon" => record.lon.map(|v| v.to_string()).unwrap_or_default(),
        "date" => record.date.to_string(),
        "hour" => record.hour.to_string(),
        "day_name" => record.day_name().to_string(),
        "week" => record.week.to_string(),
        _ => String::new(),
    }
}
