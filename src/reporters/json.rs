//! JSON reporter for scripting and editor integrations

use crate::models::AnalysisReport;
use anyhow::Result;

/// Render report as pretty-printed JSON
pub fn render(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_render_is_valid_json() {
        let out = render(&test_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["unique_identifiers"], 11);
        assert_eq!(value["summary"]["orthographic"], 1);
        assert_eq!(value["warnings"][0]["kind"], "orthographic");
        assert_eq!(value["warnings"][0]["name1"], "E");
    }
}
