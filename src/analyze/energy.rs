use crate::types::indicator::{
    DisplayValue, EnergyDetail, EnergyReading, Indicator, IndicatorDetail, MonthConsumption,
    MonthlyEntry, ResourceAverage, ResourceMonth,
};
use crate::types::measurement::Measurement;
use chrono::Datelike;
use tracing::debug;

use super::classify::{classify_component, contains_any, latest_per_component, KeywordTable};
use super::scale::{grade_index, round_index, weighted_mean};

pub const CATEGORY_KEYWORDS: &[&str] = &["енерг", "энерг", "energ", "споживан", "використан"];
const NO_DATA_TEXT: &str = "Немає даних про енергетичний стан";
const INSUFFICIENT_TEXT: &str = "Недостатньо даних для оцінки енергетичного стану";
const LABELS: [&str; 5] = [
    "Відмінний енергетичний стан",
    "Добрий енергетичний стан",
    "Задовільний енергетичний стан",
    "Незадовільний енергетичний стан",
    "Критичний енергетичний стан",
];

/// Efficiency below which the least efficient resource is called out.
const OPTIMIZATION_THRESHOLD: f64 = 0.4;
const WORKING_DAYS_PER_MONTH: f64 = 22.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    Consumption,
    Average,
    Efficiency,
}

#[derive(Debug, Clone, Copy)]
pub struct EnergyIndicator {
    pub key: &'static str,
    pub kind: IndicatorKind,
    pub weight: f64,
    pub short_name: &'static str,
    pub unit: &'static str,
}

pub const ENERGY_INDICATORS: &[EnergyIndicator] = &[
    EnergyIndicator {
        key: "обсяги використання води",
        kind: IndicatorKind::Consumption,
        weight: 1.0,
        short_name: "Використання води",
        unit: "м³",
    },
    EnergyIndicator {
        key: "обсяги використання електроенергії",
        kind: IndicatorKind::Consumption,
        weight: 1.2,
        short_name: "Використання електроенергії",
        unit: "кВт·год",
    },
    EnergyIndicator {
        key: "обсяги використання газу",
        kind: IndicatorKind::Consumption,
        weight: 1.1,
        short_name: "Використання газу",
        unit: "м³",
    },
    EnergyIndicator {
        key: "обсяги використання теплової енергії",
        kind: IndicatorKind::Consumption,
        weight: 1.1,
        short_name: "Використання теплової енергії",
        unit: "Гкал",
    },
    EnergyIndicator {
        key: "середні обсяги споживання",
        kind: IndicatorKind::Average,
        weight: 0.8,
        short_name: "Середнє споживання",
        unit: "",
    },
    EnergyIndicator {
        key: "енергоефективність будівлі або виробництва",
        kind: IndicatorKind::Efficiency,
        weight: 1.5,
        short_name: "Енергоефективність",
        unit: "%",
    },
];

pub const ENERGY_KEYWORDS: &KeywordTable = &[
    ("обсяги використання води", &["вод", "water", "водоспожив", "водопотр"]),
    (
        "обсяги використання електроенергії",
        &["електро", "electr", "электр", "струм", "ток"],
    ),
    (
        "обсяги використання газу",
        &["газ", "gas", "газов", "газоспожив", "газопотр"],
    ),
    ("обсяги використання теплової енергії", &["тепл", "heat", "отопл", "опал"]),
    ("середні обсяги споживання", &["середн", "average", "середньо", "средн"]),
    ("енергоефективність будівлі або виробництва", &["ефект", "effic", "эффект"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Water,
    Electricity,
    Gas,
    Heat,
    Average,
    Efficiency,
    Other,
}

impl ResourceType {
    /// Resource tag guessed from the component name, independent of the
    /// indicator the name classified into.
    pub fn from_component(name: &str) -> Self {
        let lower = name.to_lowercase();
        if contains_any(&lower, &["вод", "water"]) {
            ResourceType::Water
        } else if contains_any(&lower, &["електр", "electr", "электр"]) {
            ResourceType::Electricity
        } else if contains_any(&lower, &["газ", "gas"]) {
            ResourceType::Gas
        } else if contains_any(&lower, &["тепл", "heat"]) {
            ResourceType::Heat
        } else if contains_any(&lower, &["середн", "average"]) {
            ResourceType::Average
        } else if contains_any(&lower, &["ефект", "effic"]) {
            ResourceType::Efficiency
        } else {
            ResourceType::Other
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Water => "water",
            ResourceType::Electricity => "electricity",
            ResourceType::Gas => "gas",
            ResourceType::Heat => "heat",
            ResourceType::Average => "average",
            ResourceType::Efficiency => "efficiency",
            ResourceType::Other => "other",
        }
    }

    /// Default monthly consumption per 1000 m².
    pub fn baseline(self) -> Option<f64> {
        match self {
            ResourceType::Water => Some(120.0),
            ResourceType::Electricity => Some(18000.0),
            ResourceType::Gas => Some(9000.0),
            ResourceType::Heat => Some(130.0),
            _ => None,
        }
    }

    fn optimization_label(self) -> &'static str {
        match self {
            ResourceType::Water => "водоспоживання",
            ResourceType::Electricity => "електроспоживання",
            ResourceType::Gas => "газоспоживання",
            ResourceType::Heat => "теплоспоживання",
            _ => "енергоспоживання",
        }
    }
}

pub fn efficiency(indicator: &EnergyIndicator, resource: ResourceType, value: f64) -> f64 {
    if indicator.kind == IndicatorKind::Efficiency {
        return (value / 100.0).clamp(0.0, 1.0);
    }
    match resource {
        ResourceType::Other | ResourceType::Average => 0.5,
        _ => {
            let base = resource.baseline().unwrap_or(1.0);
            (1.0 - value / (base * 2.0)).clamp(0.0, 1.0)
        }
    }
}

fn indicator_for(key: &str) -> Option<&'static EnergyIndicator> {
    ENERGY_INDICATORS.iter().find(|indicator| indicator.key == key)
}

#[derive(Default)]
struct MonthlyLedger {
    months: Vec<MonthConsumption>,
}

impl MonthlyLedger {
    fn record(&mut self, month: String, resource: ResourceType, entry: MonthlyEntry) {
        let at = match self.months.iter().position(|m| m.month == month) {
            Some(at) => at,
            None => {
                self.months.push(MonthConsumption {
                    month,
                    resources: Vec::new(),
                });
                self.months.len() - 1
            }
        };
        let resources = &mut self.months[at].resources;
        match resources
            .iter_mut()
            .find(|r| r.resource_type == resource.as_str())
        {
            Some(bucket) => bucket.entries.push(entry),
            None => resources.push(ResourceMonth {
                resource_type: resource.as_str().to_string(),
                entries: vec![entry],
            }),
        }
    }

    /// Mean of monthly means per resource, plus a per-working-day figure that
    /// assumes 22 working days in every month the resource appears.
    fn averages(&self) -> (Vec<ResourceAverage>, Vec<ResourceAverage>) {
        let total_months = self.months.len() as f64;
        let mut monthly: Vec<(String, f64, usize)> = Vec::new();
        for month in &self.months {
            for bucket in &month.resources {
                if bucket.entries.is_empty() {
                    continue;
                }
                let average = bucket.entries.iter().map(|e| e.value).sum::<f64>()
                    / bucket.entries.len() as f64;
                match monthly.iter_mut().find(|(kind, ..)| *kind == bucket.resource_type) {
                    Some((_, total, count)) => {
                        *total += average;
                        *count += 1;
                    }
                    None => monthly.push((bucket.resource_type.clone(), average, 1)),
                }
            }
        }

        let overall: Vec<ResourceAverage> = monthly
            .iter()
            .map(|(kind, total, count)| ResourceAverage {
                resource_type: kind.clone(),
                value: total / *count as f64,
            })
            .collect();
        let daily = overall
            .iter()
            .zip(&monthly)
            .map(|(average, (_, _, count))| {
                let working_days = WORKING_DAYS_PER_MONTH * *count as f64;
                ResourceAverage {
                    resource_type: average.resource_type.clone(),
                    value: average.value / (working_days / total_months),
                }
            })
            .collect();
        (overall, daily)
    }
}

/// Energy efficiency index (0-100): consumption readings are judged against
/// default monthly baselines, efficiency percentages taken as-is.
pub fn energy_status_index(measurements: &[Measurement]) -> Indicator {
    let energy: Vec<&Measurement> = measurements
        .iter()
        .filter(|m| m.category_matches(CATEGORY_KEYWORDS))
        .collect();
    debug!(count = energy.len(), "energy measurements selected");
    if energy.is_empty() {
        return Indicator::no_data(NO_DATA_TEXT);
    }

    let mut readings: Vec<EnergyReading> = Vec::new();
    let mut ledger = MonthlyLedger::default();
    for measurement in latest_per_component(energy) {
        let name = measurement.component();
        let Some(value) = measurement.numeric_value() else {
            debug!(component = name, "skipping unparsable energy value");
            continue;
        };
        let Some(info) = classify_component(name, ENERGY_KEYWORDS).and_then(indicator_for) else {
            debug!(component = name, "energy component unrecognized");
            continue;
        };
        let resource = ResourceType::from_component(name);
        let unit = match measurement.unit() {
            "" => info.unit,
            unit => unit,
        };

        match measurement.timestamp() {
            Some(at) => ledger.record(
                format!("{}-{}", at.year(), at.month()),
                resource,
                MonthlyEntry {
                    name: name.to_string(),
                    value,
                    unit: unit.to_string(),
                },
            ),
            None => debug!(component = name, "undated energy reading left out of monthly totals"),
        }

        let score = efficiency(info, resource, value);
        debug!(component = name, resource = resource.as_str(), score, "energy component scored");
        readings.push(EnergyReading {
            name: name.to_string(),
            category: info.key.to_string(),
            resource_type: resource.as_str().to_string(),
            value,
            unit: unit.to_string(),
            efficiency: score,
            weight: info.weight,
            weighted_efficiency: score * info.weight,
            date: measurement.measurement_date.clone(),
        });
    }

    if readings.is_empty() {
        return Indicator::no_data(INSUFFICIENT_TEXT);
    }

    let index = weighted_mean(readings.iter().map(|r| (r.efficiency, r.weight)))
        .map_or(50.0, |mean| mean * 100.0);
    debug!(index, "energy index computed");

    // strict comparisons: the first reading wins ties at both ends
    let mut most: Option<&EnergyReading> = None;
    let mut least: Option<&EnergyReading> = None;
    for reading in &readings {
        if most.map_or(true, |m| reading.efficiency > m.efficiency) {
            most = Some(reading);
        }
        if least.map_or(true, |l| reading.efficiency < l.efficiency) {
            least = Some(reading);
        }
    }
    let most = most.cloned();
    let least = least.cloned();

    let (class, label, color) = grade_index(index, &LABELS);
    let text = match &least {
        Some(least) if least.efficiency < OPTIMIZATION_THRESHOLD => {
            let resource = ResourceType::from_component(&least.name);
            format!("{label} (потребує оптимізації: {})", resource.optimization_label())
        }
        _ => label.to_string(),
    };

    let (overall_averages, daily_averages) = ledger.averages();
    Indicator::graded(DisplayValue::Number(round_index(index)), class, text, color).with_detail(
        IndicatorDetail::Energy(EnergyDetail {
            indicators: readings,
            most_efficient_resource: most,
            least_efficient_resource: least,
            monthly_consumption: ledger.months,
            overall_averages,
            daily_averages,
        }),
    )
}
