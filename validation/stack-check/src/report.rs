//! Results reporting and formatting.

use crate::runner::CheckResults;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};

/// Formats check results for output.
pub struct CheckReport;

impl CheckReport {
    /// Format results as console tables.
    pub fn format_table(results: &CheckResults) -> String {
        let mut summary = Table::new();
        summary
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![format!("Stack Check: {}", results.scenario)]);

        summary.add_row(vec!["Quantity:", results.quantity.as_str()]);
        summary.add_row(vec!["Resampling:", results.method.as_str()]);
        summary.add_row(vec![
            "Grid:",
            &format!("{} x {} ({})", results.width, results.height, results.crs),
        ]);
        summary.add_row(vec![
            "Deterministic:",
            if results.deterministic() { "yes" } else { "NO" },
        ]);

        let mut runs = Table::new();
        runs.load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                "Threads",
                "Iterations",
                "Mean (ms)",
                "Min (ms)",
                "Max (ms)",
                "Identical",
            ]);
        for run in &results.runs {
            runs.add_row(vec![
                run.threads.to_string(),
                run.iterations.to_string(),
                format!("{:.1}", run.mean_ms),
                format!("{:.1}", run.min_ms),
                format!("{:.1}", run.max_ms),
                if run.identical { "yes" } else { "NO" }.to_string(),
            ]);
        }

        let mut bands = Table::new();
        bands
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec!["Band", "Coverage", "Min", "Max"]);
        for band in &results.bands {
            bands.add_row(vec![
                band.band.clone(),
                format!("{:.1}%", band.coverage * 100.0),
                format_value(band.min),
                format_value(band.max),
            ]);
        }

        format!("{}\n{}\n{}", summary, runs, bands)
    }

    /// Format results as JSON.
    pub fn format_json(results: &CheckResults) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(results)?)
    }

    /// Format per-band results as CSV rows.
    pub fn format_csv(results: &CheckResults) -> String {
        results
            .bands
            .iter()
            .map(|band| {
                format!(
                    "{},{},{},{:.4},{},{}",
                    results.scenario,
                    results.quantity,
                    band.band,
                    band.coverage,
                    band.min.map(|v| v.to_string()).unwrap_or_default(),
                    band.max.map(|v| v.to_string()).unwrap_or_default(),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// CSV header row.
    pub fn csv_header() -> &'static str {
        "scenario,quantity,band,coverage,min,max"
    }
}

fn format_value(value: Option<f32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{BandSummary, RunTiming};

    fn results() -> CheckResults {
        CheckResults {
            scenario: "unit".to_string(),
            quantity: "reflectance".to_string(),
            method: "bilinear".to_string(),
            crs: "EPSG:32722".to_string(),
            width: 10,
            height: 8,
            runs: vec![RunTiming {
                threads: 2,
                iterations: 1,
                mean_ms: 1.5,
                min_ms: 1.5,
                max_ms: 1.5,
                identical: true,
            }],
            bands: vec![BandSummary {
                band: "3N".to_string(),
                coverage: 0.5,
                min: Some(0.125),
                max: None,
            }],
        }
    }

    #[test]
    fn test_csv_rows() {
        assert_eq!(
            CheckReport::format_csv(&results()),
            "unit,reflectance,3N,0.5000,0.125,"
        );
    }

    #[test]
    fn test_json_fields() {
        let json = CheckReport::format_json(&results()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["bands"][0]["band"], "3N");
        assert_eq!(value["runs"][0]["threads"], 2);
        assert!(value["bands"][0]["max"].is_null());
    }

    #[test]
    fn test_table_mentions_scenario() {
        let table = CheckReport::format_table(&results());
        assert!(table.contains("Stack Check: unit"));
        assert!(table.contains("50.0%"));
    }
}
