use std::io::Write;

use super::ResultReporter;
use crate::report::AggregatedResult;

/// Writes results as a pretty-printed JSON array.
pub struct JsonReporter;

impl ResultReporter for JsonReporter {
    fn print(&self, w: &mut dyn Write, results: &[AggregatedResult]) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut *w, results)?;
        writeln!(w)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> Vec<AggregatedResult> {
        vec![
            AggregatedResult {
                method: "GET".into(),
                path: "/meta/healthcheck".into(),
                hits: 61,
                successes: 60,
                failures: 1,
                avg_ms: Some(3.07),
            },
            AggregatedResult {
                method: "POST".into(),
                path: "/meta/ping".into(),
                hits: 0,
                successes: 0,
                failures: 0,
                avg_ms: None,
            },
        ]
    }

    #[test]
    fn test_pretty_array_reads_back() {
        let mut out = Vec::new();
        JsonReporter.print(&mut out, &results()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("[\n  {\n    \"method\": \"GET\""));
        assert!(text.contains("\"avgMs\": null"));
        assert!(text.ends_with("]\n"));

        let parsed: Vec<AggregatedResult> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, results());
    }

    #[test]
    fn test_empty_results() {
        let mut out = Vec::new();
        JsonReporter.print(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
