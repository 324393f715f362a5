use crate::types::indicator::{
    DisplayValue, Indicator, IndicatorDetail, RawComponent, RecognizedIndicator, SoilComponent,
    SoilDetail,
};
use crate::types::measurement::Measurement;
use tracing::debug;

use super::classify::{
    classify_component, contains_any, latest_per_component, position_of_min, KeywordTable,
};
use super::scale::{grade_index, round_index, YELLOW};

pub const CATEGORY_KEYWORDS: &[&str] = &["ґрунт", "грунт", "почв", "soil"];
const NO_DATA_TEXT: &str = "Немає даних про стан ґрунтів";
const BASE_ESTIMATE_TEXT: &str = "Задовільний стан ґрунтів (базова оцінка)";
const LABELS: [&str; 5] = [
    "Дуже добрий стан ґрунтів",
    "Добрий стан ґрунтів",
    "Задовільний стан ґрунтів",
    "Поганий стан ґрунтів",
    "Дуже поганий стан ґрунтів",
];

/// Score and weight for components no table entry recognizes.
const NEUTRAL_SCORE: f64 = 0.5;
const NEUTRAL_WEIGHT: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Norm {
    LowerBetter,
    HigherBetter,
    OptimalRange,
}

#[derive(Debug, Clone, Copy)]
pub struct SoilIndicator {
    pub key: &'static str,
    pub optimal_range: (f64, f64),
    pub weight: f64,
    pub norm: Norm,
    pub name: &'static str,
    pub unit: &'static str,
}

pub const SOIL_INDICATORS: &[SoilIndicator] = &[
    SoilIndicator {
        key: "солонцюватість",
        optimal_range: (0.0, 0.5),
        weight: 0.9,
        norm: Norm::LowerBetter,
        name: "Солонцюватість",
        unit: "%",
    },
    SoilIndicator {
        key: "бал бонітету",
        optimal_range: (80.0, 100.0),
        weight: 1.2,
        norm: Norm::HigherBetter,
        name: "Бал бонітету для складового ґрунту",
        unit: "бали",
    },
    SoilIndicator {
        key: "гумус",
        optimal_range: (3.0, 6.0),
        weight: 1.5,
        norm: Norm::HigherBetter,
        name: "Гумус",
        unit: "%",
    },
    SoilIndicator {
        key: "рухомі сполуки калію",
        optimal_range: (120.0, 180.0),
        weight: 0.8,
        norm: Norm::OptimalRange,
        name: "Рухомі сполуки калію (K2O)",
        unit: "мг/кг",
    },
    SoilIndicator {
        key: "засоленість",
        optimal_range: (0.0, 0.25),
        weight: 0.9,
        norm: Norm::LowerBetter,
        name: "Засоленість",
        unit: "%",
    },
    SoilIndicator {
        key: "рухомі сполуки фосфору",
        optimal_range: (60.0, 120.0),
        weight: 0.8,
        norm: Norm::OptimalRange,
        name: "Рухомі сполуки фосфору (P2O5)",
        unit: "мг/кг",
    },
    SoilIndicator {
        key: "ph",
        optimal_range: (6.0, 7.5),
        weight: 1.1,
        norm: Norm::OptimalRange,
        name: "pH",
        unit: "",
    },
    SoilIndicator {
        key: "забруднення хімічними речовинами",
        optimal_range: (0.0, 1.0),
        weight: 1.5,
        norm: Norm::LowerBetter,
        name: "Забруднення хімічними речовинами",
        unit: "відн. од.",
    },
];

pub const SOIL_KEYWORDS: &KeywordTable = &[
    (
        "солонцюватість",
        &["солонцюват", "солонцеват", "солонц", "солонеч", "solonetz"],
    ),
    (
        "бал бонітету",
        &["бонітет", "бонит", "боніт", "бал бонітету", "bonitet"],
    ),
    ("гумус", &["гумус", "органич", "organic", "humus"]),
    (
        "рухомі сполуки калію",
        &["калі", "кали", "к2о", "k2o", "калий", "potassium"],
    ),
    ("засоленість", &["засолен", "засоленість", "солен", "salin"]),
    ("рухомі сполуки фосфору", &["фосфор", "р2о5", "p2o5", "phosph"]),
    ("ph", &["ph", "рн", "кислотні", "кислотн"]),
    (
        "забруднення хімічними речовинами",
        &["забрудн", "химич", "хіміч", "contamination", "pollution"],
    ),
];

fn indicator_for(key: &str) -> Option<&'static SoilIndicator> {
    SOIL_INDICATORS.iter().find(|indicator| indicator.key == key)
}

pub fn normalize(indicator: &SoilIndicator, value: f64) -> f64 {
    let (lo, hi) = indicator.optimal_range;
    match indicator.norm {
        Norm::LowerBetter => {
            if value <= lo {
                1.0
            } else if value >= hi {
                0.0
            } else {
                (hi - value) / (hi - lo)
            }
        }
        Norm::HigherBetter => {
            if value >= hi {
                1.0
            } else if value <= lo {
                0.0
            } else {
                (value - lo) / (hi - lo)
            }
        }
        Norm::OptimalRange => {
            if (lo..=hi).contains(&value) {
                1.0
            } else if value < lo {
                value / lo
            } else {
                hi / value
            }
        }
    }
}

fn is_soil_measurement(measurement: &Measurement) -> bool {
    if measurement.category_matches(CATEGORY_KEYWORDS) {
        return true;
    }
    measurement
        .component_name
        .as_deref()
        .map(|name| {
            let lower = name.to_lowercase();
            SOIL_KEYWORDS
                .iter()
                .any(|(_, keywords)| contains_any(&lower, keywords))
        })
        .unwrap_or(false)
}

fn score_component(measurement: &Measurement, value: f64) -> RecognizedIndicator {
    let name = measurement.component();
    match classify_component(name, SOIL_KEYWORDS).and_then(indicator_for) {
        Some(indicator) => {
            let normalized = normalize(indicator, value);
            debug!(component = name, key = indicator.key, normalized, "soil component recognized");
            RecognizedIndicator {
                display_name: indicator.name.to_string(),
                matched_category: Some(indicator.key.to_string()),
                unit: indicator.unit.to_string(),
                ..RecognizedIndicator::new(name, value, normalized, indicator.weight)
            }
        }
        None => {
            debug!(component = name, "soil component unrecognized, using neutral score");
            RecognizedIndicator::new(name, value, NEUTRAL_SCORE, NEUTRAL_WEIGHT)
        }
    }
}

/// Soil condition index (0-100, higher is better). Unrecognized components
/// still count with a neutral score.
pub fn soil_quality_index(measurements: &[Measurement]) -> Indicator {
    let soil: Vec<&Measurement> = measurements
        .iter()
        .filter(|m| is_soil_measurement(m))
        .collect();
    debug!(count = soil.len(), "soil measurements selected");
    if soil.is_empty() {
        return Indicator::no_data(NO_DATA_TEXT);
    }

    let latest = latest_per_component(soil);
    let recognized: Vec<RecognizedIndicator> = latest
        .iter()
        .filter_map(|m| m.numeric_value().map(|value| score_component(m, value)))
        .collect();

    if recognized.is_empty() {
        let raw = latest
            .iter()
            .map(|m| {
                SoilComponent::Raw(RawComponent {
                    name: m.component().to_string(),
                    value: m.value.as_ref().and_then(|v| serde_json::to_value(v).ok()),
                    display_name: m.component().to_string(),
                })
            })
            .collect();
        return Indicator::graded(
            DisplayValue::Number(50.0),
            3,
            BASE_ESTIMATE_TEXT.to_string(),
            YELLOW,
        )
        .with_detail(IndicatorDetail::Soil(SoilDetail {
            indicators: raw,
            worst_indicator: None,
        }));
    }

    let total_weight: f64 = recognized.iter().map(|i| i.weight).sum();
    let weighted_sum: f64 = recognized.iter().map(|i| i.weighted_value).sum();
    let index = weighted_sum / total_weight * 100.0;
    debug!(index, "soil index computed");

    let worst = position_of_min(&recognized, |i| i.normalized_value).map(|at| recognized[at].clone());
    let (class, label, color) = grade_index(index, &LABELS);
    let text = match &worst {
        Some(worst) if worst.normalized_value < 0.5 => {
            format!("{label} (проблемний показник: {})", worst.display_name)
        }
        _ => label.to_string(),
    };

    Indicator::graded(DisplayValue::Number(round_index(index)), class, text, color).with_detail(
        IndicatorDetail::Soil(SoilDetail {
            indicators: recognized.into_iter().map(SoilComponent::Scored).collect(),
            worst_indicator: worst,
        }),
    )
}
