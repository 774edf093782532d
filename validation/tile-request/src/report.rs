//! Run summary and formatting.

use std::collections::BTreeMap;

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use serde::{Deserialize, Serialize};

/// Counters collected over one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Tiles written to the output(s)
    pub emitted: u64,
    /// Candidates dropped by the containment filter
    pub rejected: u64,
    /// Candidates drawn from the sampler
    pub drawn: u64,
    /// Emitted tiles per pyramid level
    pub per_level: BTreeMap<u32, u64>,
    pub outputs: Vec<String>,
    pub duration_secs: f64,
}

impl RunSummary {
    pub fn record_emitted(&mut self, level: u32) {
        self.drawn += 1;
        self.emitted += 1;
        *self.per_level.entry(level).or_insert(0) += 1;
    }

    pub fn record_rejected(&mut self) {
        self.drawn += 1;
        self.rejected += 1;
    }

    /// Share of drawn candidates that were emitted, in percent.
    pub fn acceptance_rate(&self) -> f64 {
        if self.drawn == 0 {
            return 100.0;
        }
        self.emitted as f64 / self.drawn as f64 * 100.0
    }
}

/// End-of-run summary format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SummaryFormat {
    #[default]
    Table,
    Json,
    #[value(name = "none")]
    Off,
}

/// Formats run summaries for output.
pub struct SummaryReport;

impl SummaryReport {
    /// Format the summary as a console table.
    pub fn format_table(summary: &RunSummary) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec!["Tile Request Summary".to_string()]);

        table.add_row(vec!["Duration:", &format!("{:.2}s", summary.duration_secs)]);
        table.add_row(vec!["Tiles Emitted:", &summary.emitted.to_string()]);
        table.add_row(vec!["Candidates Drawn:", &summary.drawn.to_string()]);
        table.add_row(vec!["Rejected by Filter:", &summary.rejected.to_string()]);
        table.add_row(vec![
            "Acceptance Rate:",
            &format!("{:.1}%", summary.acceptance_rate()),
        ]);

        if !summary.per_level.is_empty() {
            table.add_row(vec!["", ""]);
            table.add_row(vec!["Level", "Tiles"]);
            for (level, count) in &summary.per_level {
                table.add_row(vec![level.to_string(), count.to_string()]);
            }
        }

        if !summary.outputs.is_empty() {
            table.add_row(vec!["", ""]);
            for output in &summary.outputs {
                table.add_row(vec!["Output:", output]);
            }
        }

        table.to_string()
    }

    /// Format the summary as JSON.
    pub fn format_json(summary: &RunSummary) -> serde_json::Result<String> {
        serde_json::to_string_pretty(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunSummary {
        let mut summary = RunSummary::default();
        summary.record_emitted(3);
        summary.record_emitted(3);
        summary.record_emitted(5);
        summary.record_rejected();
        summary.outputs.push("4326.csv".to_string());
        summary
    }

    #[test]
    fn test_counters() {
        let summary = sample();
        assert_eq!(summary.emitted, 3);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.drawn, 4);
        assert_eq!(summary.per_level.get(&3), Some(&2));
        assert!((summary.acceptance_rate() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_table_mentions_levels_and_outputs() {
        let table = SummaryReport::format_table(&sample());
        assert!(table.contains("Tile Request Summary"));
        assert!(table.contains("4326.csv"));
        assert!(table.contains("75.0%"));
    }

    #[test]
    fn test_json() {
        let json = SummaryReport::format_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["emitted"], 3);
        assert_eq!(value["per_level"]["5"], 1);
    }
}
