use crate::types::report::AnalysisReport;

const MISSING: &str = "n/a";

pub fn to_markdown(report: &AnalysisReport) -> String {
    let mut output = String::new();
    output.push_str("# Environmental Index Report\n\n");
    output.push_str(&format!("As of: {}\n\n", report.as_of));

    if report.facilities.is_empty() {
        output.push_str("No facilities matched the selected domains.\n\n");
    }
    for facility in &report.facilities {
        output.push_str(&format!("## {} (id {})\n\n", facility.name, facility.id));
        output.push_str("| Domain | Value | Class | Assessment | Color |\n");
        output.push_str("|---|---|---|---|---|\n");
        for (domain, indicator) in facility.indicators.iter() {
            output.push_str(&format!(
                "| {} (`{}`) | {} | {} | {} | {} |\n",
                domain.display_name(),
                domain.indicator_key(),
                indicator
                    .value
                    .as_ref()
                    .map_or_else(|| MISSING.to_string(), ToString::to_string),
                indicator
                    .grade
                    .map_or_else(|| MISSING.to_string(), |grade| grade.to_string()),
                indicator.text.replace('|', "\\|"),
                indicator.color
            ));
        }
        output.push('\n');
    }

    output.push_str("## Findings\n\n");
    if report.findings.is_empty() {
        output.push_str("- none\n");
    } else {
        for finding in &report.findings {
            output.push_str(&format!(
                "- [{}] {}: {}\n",
                if finding.blocking {
                    "blocking"
                } else {
                    "warning"
                },
                finding.title,
                finding.body
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;
    use crate::types::indicator::{DisplayValue, Indicator};
    use crate::types::report::{FacilityReport, Finding, IndicatorSet};

    #[test]
    fn markdown_report_contains_a_table_per_facility() {
        let mut indicators = IndicatorSet::default();
        indicators.insert(
            Domain::Air,
            Indicator::graded(
                DisplayValue::Text("1.20".to_string()),
                2,
                "Підвищене забруднення".to_string(),
                "#FFA726",
            ),
        );
        indicators.insert(Domain::Economy, Indicator::no_data("Немає даних про економічний стан"));
        let report = AnalysisReport {
            as_of: "2024-06-15".to_string(),
            facilities: vec![FacilityReport {
                id: 2,
                name: "ТЕЦ-5".to_string(),
                indicators,
            }],
            findings: vec![Finding {
                id: "economy.insufficient_data".to_string(),
                title: "Економічний стан: Немає даних про економічний стан".to_string(),
                body: "Facility ТЕЦ-5 has no usable economy measurements.".to_string(),
                blocking: false,
                facility_id: 2,
            }],
        };

        let rendered = to_markdown(&report);
        assert!(rendered.contains("# Environmental Index Report"));
        assert!(rendered.contains("## ТЕЦ-5 (id 2)"));
        assert!(rendered.contains("| Стан повітря (`airQuality`) | 1.20 | 2 | Підвищене забруднення | #FFA726 |"));
        assert!(rendered.contains("| Економічний стан (`economyStatus`) | n/a | n/a |"));
        assert!(rendered.contains("- [warning] Економічний стан"));
    }
}
