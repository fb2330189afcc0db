//! Formatting of comparison results

use anyhow::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::io::Write;

use crate::dispatch::{ModelResult, format_secs};

const SEPARATOR_WIDTH: usize = 80;

/// Print each successful result, in order, skipping failed models
pub fn write_report<W: Write>(results: &[ModelResult], out: &mut W) -> Result<()> {
    for result in results.iter().filter(|r| !r.is_error()) {
        match result.time {
            Some(time) => writeln!(out, "{} (took {} seconds)", result.name, format_secs(time))?,
            None => writeln!(out, "{}", result.name)?,
        }
        writeln!(out, "{}", result.response)?;
        writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    }
    Ok(())
}

/// Results keyed by model name, keeping call order
struct ResultMap<'a>(&'a [ModelResult]);

impl Serialize for ResultMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for result in self.0 {
            map.serialize_entry(&result.name, result)?;
        }
        map.end()
    }
}

/// Render all results, failures included, as a pretty JSON object
pub fn to_json(results: &[ModelResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ResultMap(results))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> Vec<ModelResult> {
        vec![
            ModelResult {
                name: "A".to_string(),
                response: "Error: timeout".to_string(),
                time: None,
            },
            ModelResult {
                name: "B".to_string(),
                response: "Hello".to_string(),
                time: Some(0.42),
            },
        ]
    }

    #[test]
    fn test_report_skips_errors() {
        let mut out = Vec::new();
        write_report(&results(), &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        let expected = format!("B (took 0.42 seconds)\nHello\n{}\n", "-".repeat(80));
        assert_eq!(printed, expected);
    }

    #[test]
    fn test_report_only_checks_prefix() {
        let results = vec![ModelResult {
            name: "C".to_string(),
            response: "No Error: here".to_string(),
            time: Some(1.5),
        }];
        let mut out = Vec::new();
        write_report(&results, &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("C (took 1.5 seconds)"));
        assert!(printed.contains("No Error: here"));
    }

    #[test]
    fn test_report_whole_seconds_keep_fraction() {
        let results = vec![ModelResult {
            name: "D".to_string(),
            response: "Done".to_string(),
            time: Some(1.0),
        }];
        let mut out = Vec::new();
        write_report(&results, &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("D (took 1.0 seconds)\n"));
    }

    #[test]
    fn test_json_keeps_order_and_nulls() {
        let json = to_json(&results()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["A"]["response"], "Error: timeout");
        assert!(value["A"]["time"].is_null());
        assert_eq!(value["B"]["response"], "Hello");
        assert_eq!(value["B"]["time"], 0.42);
        assert!(json.find("\"A\"").unwrap() < json.find("\"B\"").unwrap());
    }
}
