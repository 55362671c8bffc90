//! Export of the filtered record set.

mod csv;

pub use csv::export_csv;
