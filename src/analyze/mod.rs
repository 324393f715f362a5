pub mod air;
pub mod classify;
pub mod economy;
pub mod energy;
pub mod health;
pub mod lint;
pub mod radiation;
pub mod scale;
pub mod soil;
pub mod water;

use crate::clock::Clock;
use crate::domain::Domain;
use crate::types::indicator::Indicator;
use crate::types::measurement::{Facility, Measurement};
use crate::types::report::{AnalysisReport, FacilityReport, Finding, IndicatorSet};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error};

/// Runs the scorer for one domain.
pub fn score(domain: Domain, measurements: &[Measurement], clock: &dyn Clock) -> Indicator {
    match domain {
        Domain::Air => air::air_quality_index(measurements, clock),
        Domain::Water => water::water_quality_index(measurements),
        Domain::Ground => soil::soil_quality_index(measurements),
        Domain::Radiation => radiation::radiation_level_index(measurements),
        Domain::Economy => economy::economy_status_index(measurements, clock),
        Domain::Health => health::health_status_index(measurements),
        Domain::Energy => energy::energy_status_index(measurements),
    }
}

/// Runs `scorer`, turning a panic into the calculation-error placeholder so
/// one failing domain never takes the others down.
pub fn isolated(domain: Domain, scorer: impl FnOnce() -> Indicator) -> Indicator {
    match panic::catch_unwind(AssertUnwindSafe(scorer)) {
        Ok(indicator) => indicator,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!(domain = domain.as_str(), %reason, "scorer failed");
            Indicator::calculation_error()
        }
    }
}

pub fn analyze_facility(measurements: &[Measurement], clock: &dyn Clock) -> IndicatorSet {
    analyze_facility_with(measurements, clock, &Domain::ALL)
}

/// Scores each requested domain independently.
pub fn analyze_facility_with(
    measurements: &[Measurement],
    clock: &dyn Clock,
    domains: &[Domain],
) -> IndicatorSet {
    let mut indicators = IndicatorSet::default();
    for domain in Domain::ALL {
        if !domains.contains(&domain) {
            continue;
        }
        let indicator = isolated(domain, || score(domain, measurements, clock));
        debug!(domain = domain.as_str(), value = ?indicator.value, class = ?indicator.grade, "domain scored");
        indicators.insert(domain, indicator);
    }
    indicators
}

/// Findings for one facility's indicators: failed scorers block, domains
/// without usable data warn.
pub fn findings_for(report: &FacilityReport) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (domain, indicator) in report.indicators.iter() {
        if indicator.is_error() {
            findings.push(Finding {
                id: format!("{}.calculation_error", domain.as_str()),
                title: format!("{} could not be calculated", domain.display_name()),
                body: format!(
                    "The {} scorer failed for facility {}; its indicator was replaced by a placeholder.",
                    domain.as_str(),
                    report.name
                ),
                blocking: true,
                facility_id: report.id,
            });
        } else if !indicator.has_data() {
            findings.push(Finding {
                id: format!("{}.insufficient_data", domain.as_str()),
                title: format!("{}: {}", domain.display_name(), indicator.text),
                body: format!(
                    "Facility {} has no usable {} measurements.",
                    report.name,
                    domain.as_str()
                ),
                blocking: false,
                facility_id: report.id,
            });
        }
    }
    findings
}

pub fn analyze(facilities: &[&Facility], clock: &dyn Clock, domains: &[Domain]) -> AnalysisReport {
    let reports: Vec<FacilityReport> = facilities
        .iter()
        .map(|facility| FacilityReport {
            id: facility.id,
            name: facility.name(),
            indicators: analyze_facility_with(&facility.measurements, clock, domains),
        })
        .collect();
    let findings = reports.iter().flat_map(findings_for).collect();

    AnalysisReport {
        as_of: clock.today().format("%Y-%m-%d").to_string(),
        facilities: reports,
        findings,
    }
}

/// Indicator slot a domain's component classifier assigns to a name.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSlot {
    pub domain: Domain,
    pub slot: Option<String>,
}

/// Runs every component-keyed classifier on `component`. Air and radiation
/// are left out: they group readings by category, not by component slot.
pub fn component_slots(component: &str) -> Vec<ComponentSlot> {
    let lower = component.to_lowercase();
    let health = health::place_component(component, None).map(|placement| {
        match placement.sub_category {
            Some(sub) => format!("{} / {}", placement.category.key, sub.key),
            None => placement.category.key.to_string(),
        }
    });

    vec![
        ComponentSlot {
            domain: Domain::Water,
            slot: classify::keyword_match(&lower, water::WATER_CATEGORIES).map(str::to_string),
        },
        ComponentSlot {
            domain: Domain::Ground,
            slot: classify::classify_component(component, soil::SOIL_KEYWORDS).map(str::to_string),
        },
        ComponentSlot {
            domain: Domain::Economy,
            slot: classify::classify_component(component, economy::ECONOMIC_KEYWORDS)
                .map(str::to_string),
        },
        ComponentSlot {
            domain: Domain::Health,
            slot: health,
        },
        ComponentSlot {
            domain: Domain::Energy,
            slot: classify::classify_component(component, energy::ENERGY_KEYWORDS)
                .map(str::to_string),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::types::indicator::CALCULATION_ERROR_TEXT;
    use crate::types::measurement::MeasurementValue;

    fn clock() -> FixedClock {
        FixedClock::ymd(2024, 6, 15).expect("valid date")
    }

    fn sample() -> Vec<Measurement> {
        vec![
            Measurement::new("Стан повітря", "Вміст пилу", "4", "2024-06-01"),
            Measurement::new("Стан повітря", "Вміст пилу", "6", "2024-06-10"),
            Measurement::new("Стан ґрунтів", "Гумус", "6", "2024-04-01"),
            Measurement::new("Рівень радіації", "Рівень радіації", "0.12", "2024-05-01"),
        ]
    }

    #[test]
    fn every_domain_is_scored_by_default() {
        let set = analyze_facility(&sample(), &clock());
        assert_eq!(set.iter().count(), 7);
        assert!(set.air_quality.as_ref().is_some_and(Indicator::has_data));
        assert!(set.soil_quality.as_ref().is_some_and(Indicator::has_data));
        assert!(set.radiation_level.as_ref().is_some_and(Indicator::has_data));
        assert!(set.economy_status.as_ref().is_some_and(|i| !i.has_data()));
    }

    #[test]
    fn unrequested_domains_are_omitted() {
        let set = analyze_facility_with(&sample(), &clock(), &[Domain::Ground]);
        assert!(set.soil_quality.is_some());
        assert!(set.air_quality.is_none());

        let rendered = serde_json::to_value(&set).expect("set should serialize");
        let keys: Vec<&String> = rendered
            .as_object()
            .expect("set serializes as an object")
            .keys()
            .collect();
        assert_eq!(keys, vec!["soilQuality"]);
    }

    #[test]
    fn panicking_scorer_degrades_to_placeholder() {
        let indicator = isolated(Domain::Health, || panic!("boom"));
        assert_eq!(indicator.value, None);
        assert_eq!(indicator.grade, None);
        assert_eq!(indicator.text, CALCULATION_ERROR_TEXT);
        assert!(indicator.is_error());
    }

    #[test]
    fn all_null_records_never_fail_a_scorer() {
        let nulls = vec![
            Measurement::default(),
            Measurement {
                value: Some(MeasurementValue::Other(serde_json::json!({"nested": true}))),
                ..Measurement::default()
            },
        ];
        let set = analyze_facility(&nulls, &clock());
        for (domain, indicator) in set.iter() {
            assert!(!indicator.is_error(), "{domain} failed on null input");
            assert!(!indicator.has_data(), "{domain} produced data from nulls");
        }
    }

    #[test]
    fn analysis_is_idempotent() {
        let measurements = sample();
        let first = analyze_facility(&measurements, &clock());
        let second = analyze_facility(&measurements, &clock());
        assert_eq!(first, second);
    }

    #[test]
    fn findings_warn_on_missing_domains_and_block_on_errors() {
        let mut indicators = IndicatorSet::default();
        indicators.insert(Domain::Air, Indicator::no_data("Немає даних про якість повітря"));
        indicators.insert(Domain::Health, Indicator::calculation_error());
        let report = FacilityReport {
            id: 7,
            name: "Завод 7".to_string(),
            indicators,
        };

        let findings = findings_for(&report);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].id, "air.insufficient_data");
        assert!(!findings[0].blocking);
        assert_eq!(findings[1].id, "health.calculation_error");
        assert!(findings[1].blocking);
        assert_eq!(findings[1].facility_id, 7);
    }

    #[test]
    fn analyze_reports_every_facility() {
        let facility = Facility {
            id: 3,
            factory_name: None,
            latitude: None,
            longitude: None,
            measurements: sample(),
        };
        let report = analyze(&[&facility], &clock(), &[Domain::Air, Domain::Economy]);
        assert_eq!(report.as_of, "2024-06-15");
        assert_eq!(report.facilities.len(), 1);
        assert_eq!(report.facilities[0].name, "facility #3");
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].id, "economy.insufficient_data");
        assert!(!report.has_blocking());
    }

    fn slot(slots: &[ComponentSlot], domain: Domain) -> Option<&str> {
        slots
            .iter()
            .find(|entry| entry.domain == domain)
            .and_then(|entry| entry.slot.as_deref())
    }

    #[test]
    fn component_slots_report_each_classifier() {
        let humus = component_slots("Вміст гумусу");
        assert_eq!(humus.len(), 5);
        assert_eq!(slot(&humus, Domain::Ground), Some("гумус"));
        assert_eq!(slot(&humus, Domain::Water), None);

        let power = component_slots("Електроенергія");
        assert_eq!(slot(&power, Domain::Energy), Some("обсяги використання електроенергії"));

        let life = component_slots("Очікувана тривалість життя при народженні");
        assert_eq!(
            slot(&life, Domain::Health),
            Some("прогноз тривалості життя / очікувана тривалість життя при народженні")
        );
    }
}
