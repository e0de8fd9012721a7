//! This module defines a trait for printing run results.
mod csv;
mod json;
mod table;

pub use csv::CsvReporter;
pub use json::JsonReporter;
pub use table::TableReporter;

use clap::ValueEnum;

use crate::report::AggregatedResult;

/// A trait for reporting run results.
pub trait ResultReporter {
    /// Print the results to the given writer.
    fn print(&self, w: &mut dyn std::io::Write, results: &[AggregatedResult]) -> anyhow::Result<()>;
}

/// Format of the report file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ReportType {
    /// Pretty-printed JSON array. See [`JsonReporter`].
    #[default]
    Json,

    /// Header line plus one comma-joined line per peck. See [`CsvReporter`].
    Csv,
}

impl ReportType {
    /// The reporter writing this format.
    pub fn reporter(self) -> &'static dyn ResultReporter {
        match self {
            ReportType::Json => &JsonReporter,
            ReportType::Csv => &CsvReporter,
        }
    }
}

/// Column titles shared by the console table and the CSV header.
pub(crate) const COLUMNS: [&str; 6] =
    ["Method", "Path", "# of Hits", "# of Successes", "# of Failures", "Average Duration"];
