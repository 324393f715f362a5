use crate::types::indicator::{DisplayValue, Indicator, IndicatorDetail, WaterDetail};
use crate::types::measurement::Measurement;
use tracing::debug;

use super::classify::{contains_any, keyword_match, latest_per_component, KeywordTable};
use super::scale::{GREEN, ORANGE, RED, TEAL, YELLOW};

pub const CATEGORY_KEYWORDS: &[&str] = &["водн", "вода", "water", "ресурс"];
const NO_DATA_TEXT: &str = "Немає даних про якість води";
const CONTAMINATED_TEXT: &str = "Забруднена вода (перевищення ГДК)";

const MICROBIOLOGICAL_KEYWORDS: &[&str] = &["мікробіологічн", "бактер", "паразитар", "епідеміч"];
/// Raw value above which a microbiological reading marks the water contaminated.
pub const MICROBIOLOGICAL_LIMIT: f64 = 10.0;

pub const WATER_CATEGORIES: &KeywordTable = &[
    ("санітарно-токсикологічні", &["токсикологічн", "токсикологическ"]),
    ("фізико-хімічні", &["фізико-хімічн", "физико-химическ"]),
    ("органолептичні", &["органолептичн", "органолептическ"]),
    (
        "мікробіологічні",
        &["мікробіологічн", "микробиологическ", "бактер"],
    ),
    ("паразитарні", &["паразитарн", "паразитологічн"]),
    ("радіаційні", &["радіаційн", "радиационн"]),
    (
        "індекс забрудненості",
        &["індекс", "індекс забрудненості", "индекс"],
    ),
];

/// Base quality and display name of each recognized water category.
const CATEGORY_QUALITY: &[(&str, f64, &str)] = &[
    ("санітарно-токсикологічні", 10.0, "Санітарно-токсикологічні показники"),
    ("фізико-хімічні", 30.0, "Фізико-хімічні показники"),
    ("органолептичні", 50.0, "Органолептичні показники"),
    ("мікробіологічні", 0.0, "Мікробіологічні показники"),
    ("паразитарні", 0.0, "Паразитарні показники"),
    ("радіаційні", 20.0, "Радіаційні показники"),
    ("індекс забрудненості", 15.0, "Індекс забрудненості води"),
];

pub fn classify_quality(base_quality: f64) -> (u8, &'static str, &'static str) {
    if base_quality <= 0.0 {
        (5, CONTAMINATED_TEXT, RED)
    } else if base_quality <= 20.0 {
        (4, "Близька до забруднення", ORANGE)
    } else if base_quality <= 50.0 {
        (3, "Задовільна якість води", YELLOW)
    } else if base_quality <= 80.0 {
        (2, "Добра якість води", GREEN)
    } else {
        (1, "Висока якість води", TEAL)
    }
}

/// Drinking water quality: the worst present category dominates, and any
/// microbiological reading above the limit overrides everything else.
pub fn water_quality_index(measurements: &[Measurement]) -> Indicator {
    let water: Vec<&Measurement> = measurements
        .iter()
        .filter(|m| m.category_matches(CATEGORY_KEYWORDS))
        .collect();
    debug!(count = water.len(), "water measurements selected");

    let latest: Vec<(&Measurement, f64)> = latest_per_component(water)
        .into_iter()
        .filter_map(|m| m.numeric_value().map(|value| (m, value)))
        .collect();
    if latest.is_empty() {
        return Indicator::no_data(NO_DATA_TEXT);
    }

    let microbiological: Vec<(&Measurement, f64)> = latest
        .iter()
        .filter(|(m, _)| contains_any(&m.component().to_lowercase(), MICROBIOLOGICAL_KEYWORDS))
        .copied()
        .collect();
    if microbiological
        .iter()
        .any(|(_, value)| *value > MICROBIOLOGICAL_LIMIT)
    {
        let (worst, worst_value) = microbiological
            .iter()
            .skip(1)
            .fold(microbiological[0], |worst, current| {
                if current.1 > worst.1 {
                    *current
                } else {
                    worst
                }
            });
        debug!(component = worst.component(), worst_value, "microbiological override");
        return Indicator::graded(
            DisplayValue::Number(worst_value),
            3,
            CONTAMINATED_TEXT.to_string(),
            RED,
        )
        .with_detail(IndicatorDetail::Water(WaterDetail {
            worst_contaminant: Some(worst.component().to_string()),
        }));
    }

    // categories in the order their first component appears
    let mut present: Vec<&'static str> = Vec::new();
    for (measurement, _) in &latest {
        let lower = measurement.component().to_lowercase();
        if let Some(category) = keyword_match(&lower, WATER_CATEGORIES) {
            if !present.contains(&category) {
                present.push(category);
            }
        }
    }
    debug!(?present, "water categories present");

    let mut base_quality = 100.0;
    let mut worst_category: Option<&'static str> = None;
    for category in present {
        if let Some((_, quality, name)) = CATEGORY_QUALITY.iter().find(|(key, ..)| *key == category) {
            if *quality < base_quality {
                base_quality = *quality;
                worst_category = Some(*name);
            }
        }
    }

    let (class, text, color) = classify_quality(base_quality);
    let text = match worst_category {
        Some(name) => format!("{text} (найвищий показник: {name})"),
        None => text.to_string(),
    };
    Indicator::graded(DisplayValue::Number(base_quality), class, text, color).with_detail(
        IndicatorDetail::Water(WaterDetail {
            worst_contaminant: worst_category.map(str::to_string),
        }),
    )
}
