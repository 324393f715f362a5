use crate::types::indicator::{
    DisplayValue, DoseDetails, Indicator, IndicatorDetail, RadiationDetail, RadiationRisk,
};
use crate::types::measurement::Measurement;
use tracing::debug;

use super::classify::latest_per_component;
use super::scale::{GREEN, RED, TEAL, YELLOW};

pub const CATEGORY_KEYWORDS: &[&str] = &["радіа", "радиа", "radia", "радио", "фон"];
const NO_DATA_TEXT: &str = "Немає даних про рівень радіації";
const NO_VALID_DATA_TEXT: &str = "Немає коректних даних про рівень радіації";

/// Risk per mSv/year of gamma dose.
pub const GAMMA_DOSE_TO_RISK: f64 = 5e-5;

#[derive(Debug, Clone, Copy)]
pub struct Band {
    pub category: &'static str,
    pub max: f64,
    pub description: &'static str,
    pub class: u8,
    pub color: &'static str,
}

/// Background levels in µSv/h.
pub const RADIATION_LEVELS: &[Band] = &[
    Band {
        category: "NORMAL",
        max: 0.2,
        description: "Звичайний рівень",
        class: 1,
        color: TEAL,
    },
    Band {
        category: "ACCEPTABLE",
        max: 0.3,
        description: "Нормальний рівень",
        class: 2,
        color: GREEN,
    },
    Band {
        category: "ELEVATED",
        max: 1.2,
        description: "Підвищений рівень",
        class: 3,
        color: YELLOW,
    },
    Band {
        category: "DANGEROUS",
        max: f64::INFINITY,
        description: "Небезпечний рівень",
        class: 4,
        color: RED,
    },
];

/// Annual risk categories.
pub const RISK_CATEGORIES: &[Band] = &[
    Band {
        category: "NEGLIGIBLE",
        max: 1e-6,
        description: "Знехтовний ризик",
        class: 1,
        color: TEAL,
    },
    Band {
        category: "SMALL",
        max: 1e-5,
        description: "Малий ризик",
        class: 2,
        color: GREEN,
    },
    Band {
        category: "OPTIMIZATION_REQUIRED",
        max: 5e-5,
        description: "Необхідна оптимізація ризику",
        class: 3,
        color: YELLOW,
    },
    Band {
        category: "UNACCEPTABLE",
        max: f64::INFINITY,
        description: "Недопустимий ризик",
        class: 4,
        color: RED,
    },
];

/// Dose-rate ceilings (µSv/h) and the risk coefficient applied below each.
pub const DOSE_RANGES: &[(f64, f64)] = &[
    (0.2, 0.8),
    (0.3, 1.0),
    (1.2, 1.5),
    (10.0, 2.0),
    (f64::INFINITY, 3.0),
];

pub fn band_for(value: f64, bands: &'static [Band]) -> &'static Band {
    bands
        .iter()
        .find(|band| value <= band.max)
        .unwrap_or(&bands[bands.len() - 1])
}

pub fn dose_coefficient(level: f64) -> f64 {
    DOSE_RANGES
        .iter()
        .find(|(max, _)| level <= *max)
        .map(|(_, coefficient)| *coefficient)
        .unwrap_or(1.0)
}

/// mSv/year under continuous exposure to `level` µSv/h.
pub fn annual_dose(level: f64) -> f64 {
    level * 24.0 * 365.0 / 1000.0
}

/// Radiation background: the highest latest reading decides the class, and a
/// derived annual risk estimate is attached for detail.
pub fn radiation_level_index(measurements: &[Measurement]) -> Indicator {
    let radiation: Vec<&Measurement> = measurements
        .iter()
        .filter(|m| m.category_matches(CATEGORY_KEYWORDS))
        .collect();
    debug!(count = radiation.len(), "radiation measurements selected");
    if radiation.is_empty() {
        return Indicator::no_data(NO_DATA_TEXT);
    }

    let mut max_level = 0.0;
    let mut max_component: Option<&str> = None;
    for measurement in latest_per_component(radiation) {
        if let Some(value) = measurement.numeric_value() {
            if value > max_level {
                max_level = value;
                max_component = Some(measurement.component());
            }
        }
    }
    if max_level == 0.0 {
        debug!("no positive radiation readings");
        return Indicator::no_data(NO_VALID_DATA_TEXT);
    }

    let level = band_for(max_level, RADIATION_LEVELS);
    let coefficient = dose_coefficient(max_level);
    let dose = annual_dose(max_level);
    let risk_value = dose * GAMMA_DOSE_TO_RISK * coefficient;
    let risk = band_for(risk_value, RISK_CATEGORIES);
    debug!(max_level, dose, coefficient, risk_value, "radiation risk estimated");

    let mut text = format!("{} радіаційного фону", level.description);
    if !matches!(level.category, "NORMAL" | "ACCEPTABLE") {
        text.push_str(&format!(" ({})", risk.description));
    }

    Indicator::graded(
        DisplayValue::Text(format!("{max_level:.3}")),
        level.class,
        text,
        level.color,
    )
    .with_detail(IndicatorDetail::Radiation(RadiationDetail {
        component: max_component.map(str::to_string),
        risk: RadiationRisk {
            value: risk_value,
            category: risk.category.to_string(),
            description: risk.description.to_string(),
        },
        details: DoseDetails {
            annual_dose: dose,
            dose_coefficient: coefficient,
        },
    }))
}
