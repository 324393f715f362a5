use serde::Serialize;

pub const NO_DATA_COLOR: &str = "#999999";
pub const CALCULATION_ERROR_TEXT: &str = "Помилка розрахунку";

/// Display value of an indicator; its unit depends on the domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayValue::Number(value) => write!(f, "{value}"),
            DisplayValue::Text(text) => f.write_str(text),
        }
    }
}

/// Classified result of one domain scorer.
///
/// `value` is `None` exactly when the domain had no usable measurements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicator {
    pub value: Option<DisplayValue>,
    #[serde(rename = "class")]
    pub grade: Option<u8>,
    pub text: String,
    pub color: String,
    #[serde(flatten)]
    pub detail: Option<IndicatorDetail>,
}

impl Indicator {
    pub fn no_data(text: &str) -> Self {
        Self {
            value: None,
            grade: None,
            text: text.to_string(),
            color: NO_DATA_COLOR.to_string(),
            detail: None,
        }
    }

    pub fn calculation_error() -> Self {
        Self::no_data(CALCULATION_ERROR_TEXT)
    }

    pub fn graded(value: DisplayValue, grade: u8, text: String, color: &str) -> Self {
        Self {
            value: Some(value),
            grade: Some(grade),
            text,
            color: color.to_string(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: IndicatorDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn has_data(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_error(&self) -> bool {
        self.value.is_none() && self.text == CALCULATION_ERROR_TEXT
    }
}

/// Domain-specific extras flattened next to the common indicator fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IndicatorDetail {
    Water(WaterDetail),
    Soil(SoilDetail),
    Radiation(RadiationDetail),
    Economy(EconomyDetail),
    Health(HealthDetail),
    Energy(EnergyDetail),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterDetail {
    pub worst_contaminant: Option<String>,
}

/// A component recognized by a scorer, normalized to `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedIndicator {
    pub name: String,
    pub display_name: String,
    pub matched_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_sub_category: Option<String>,
    pub value: f64,
    pub unit: String,
    pub normalized_value: f64,
    pub weight: f64,
    pub weighted_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl RecognizedIndicator {
    pub fn new(name: &str, value: f64, normalized_value: f64, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            display_name: name.to_string(),
            matched_category: None,
            matched_sub_category: None,
            value,
            unit: String::new(),
            normalized_value,
            weight,
            weighted_value: normalized_value * weight,
            date: None,
        }
    }
}

/// Raw component reported when the soil scorer falls back to its base estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawComponent {
    pub name: String,
    pub value: Option<serde_json::Value>,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilDetail {
    pub indicators: Vec<SoilComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worst_indicator: Option<RecognizedIndicator>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SoilComponent {
    Scored(RecognizedIndicator),
    Raw(RawComponent),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiationRisk {
    pub value: f64,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoseDetails {
    pub annual_dose: f64,
    pub dose_coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiationDetail {
    pub component: Option<String>,
    pub risk: RadiationRisk,
    pub details: DoseDetails,
}

/// Direction in which an economic indicator improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Polarity {
    HigherBetter,
    LowerBetter,
    /// Tracked for the export/import ratio, never scored on its own.
    Special,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredEconomicIndicator {
    pub name: String,
    pub indicator: String,
    pub short_name: String,
    pub value: f64,
    pub unit: String,
    pub weight: f64,
    #[serde(rename = "type")]
    pub kind: Polarity,
    pub score: f64,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomyDetail {
    pub indicators: Vec<ScoredEconomicIndicator>,
    pub worst_indicator: Option<ScoredEconomicIndicator>,
    pub best_indicator: Option<ScoredEconomicIndicator>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: String,
    pub short_name: String,
    pub score: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDetail {
    pub indicators: Vec<RecognizedIndicator>,
    pub category_scores: Vec<CategoryScore>,
    pub worst_category: Option<CategoryScore>,
    pub best_category: Option<CategoryScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyReading {
    pub name: String,
    pub category: String,
    pub resource_type: String,
    pub value: f64,
    pub unit: String,
    pub efficiency: f64,
    pub weight: f64,
    pub weighted_efficiency: f64,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEntry {
    pub name: String,
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMonth {
    pub resource_type: String,
    pub entries: Vec<MonthlyEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthConsumption {
    pub month: String,
    pub resources: Vec<ResourceMonth>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAverage {
    pub resource_type: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyDetail {
    pub indicators: Vec<EnergyReading>,
    pub most_efficient_resource: Option<EnergyReading>,
    pub least_efficient_resource: Option<EnergyReading>,
    pub monthly_consumption: Vec<MonthConsumption>,
    pub overall_averages: Vec<ResourceAverage>,
    pub daily_averages: Vec<ResourceAverage>,
}
