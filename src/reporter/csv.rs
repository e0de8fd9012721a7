use std::io::Write;

use itertools::Itertools;

use super::{COLUMNS, ResultReporter};
use crate::report::AggregatedResult;

/// Writes results as comma-joined lines.
///
/// Values are not quoted: a path containing a comma yields a malformed row.
pub struct CsvReporter;

impl ResultReporter for CsvReporter {
    fn print(&self, w: &mut dyn Write, results: &[AggregatedResult]) -> anyhow::Result<()> {
        writeln!(w, "{}", COLUMNS.iter().join(","))?;
        for r in results {
            let avg = r.avg_ms.map(|v| format!("{v:.2}")).unwrap_or_default();
            writeln!(w, "{},{},{},{},{},{}", r.method, r.path, r.hits, r.successes, r.failures, avg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(path: &str, hits: u64, avg_ms: Option<f64>) -> AggregatedResult {
        AggregatedResult { method: "GET".into(), path: path.into(), hits, successes: hits, failures: 0, avg_ms }
    }

    fn render(results: &[AggregatedResult]) -> String {
        let mut out = Vec::new();
        CsvReporter.print(&mut out, results).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_header_and_rows() {
        let text = render(&[result("/ok", 5, Some(12.34)), result("/slow", 2, Some(100.5))]);
        assert_eq!(
            text,
            "Method,Path,# of Hits,# of Successes,# of Failures,Average Duration\n\
             GET,/ok,5,5,0,12.34\n\
             GET,/slow,2,2,0,100.50\n"
        );
    }

    #[test]
    fn test_missing_average_is_empty() {
        let text = render(&[result("/never", 0, None)]);
        assert_eq!(text.lines().nth(1), Some("GET,/never,0,0,0,"));
    }

    #[test]
    fn test_comma_in_path_is_not_escaped() {
        let text = render(&[result("/a,b", 1, Some(1.0))]);
        assert_eq!(text.lines().nth(1), Some("GET,/a,b,1,1,0,1.00"));
    }
}
