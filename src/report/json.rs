use crate::types::report::AnalysisReport;

pub fn to_json(report: &AnalysisReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;
    use crate::types::indicator::{DisplayValue, Indicator, IndicatorDetail, WaterDetail};
    use crate::types::report::{FacilityReport, IndicatorSet};

    #[test]
    fn json_report_uses_indicator_keys_and_flattened_extras() {
        let mut indicators = IndicatorSet::default();
        indicators.insert(
            Domain::Water,
            Indicator::graded(
                DisplayValue::Number(20.0),
                4,
                "Близька до забруднення".to_string(),
                "#FFA726",
            )
            .with_detail(IndicatorDetail::Water(WaterDetail {
                worst_contaminant: Some("Радіаційні показники".to_string()),
            })),
        );
        let report = AnalysisReport {
            as_of: "2024-06-15".to_string(),
            facilities: vec![FacilityReport {
                id: 1,
                name: "Водоканал".to_string(),
                indicators,
            }],
            findings: vec![],
        };

        let rendered = to_json(&report).expect("json should serialize");
        let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("json should parse");
        let water = &parsed["facilities"][0]["indicators"]["waterQuality"];
        assert_eq!(parsed["asOf"], "2024-06-15");
        assert_eq!(water["value"], 20.0);
        assert_eq!(water["class"], 4);
        assert_eq!(water["worstContaminant"], "Радіаційні показники");
        assert!(parsed["facilities"][0]["indicators"].get("airQuality").is_none());
    }
}
