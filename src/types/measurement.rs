use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Raw measured quantity as delivered by the measurement store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasurementValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl MeasurementValue {
    /// Parses the value the way the upstream store's consumers always have:
    /// numbers pass through, strings are read by their leading numeric prefix.
    pub fn parse(&self) -> Option<f64> {
        match self {
            MeasurementValue::Number(value) if value.is_finite() => Some(*value),
            MeasurementValue::Number(_) => None,
            MeasurementValue::Text(text) => leading_float(text),
            MeasurementValue::Other(_) => None,
        }
    }
}

impl From<f64> for MeasurementValue {
    fn from(value: f64) -> Self {
        MeasurementValue::Number(value)
    }
}

impl From<&str> for MeasurementValue {
    fn from(value: &str) -> Self {
        MeasurementValue::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub component_name: Option<String>,
    #[serde(default)]
    pub value: Option<MeasurementValue>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub measurement_date: Option<String>,
}

impl Measurement {
    pub fn new(
        category: &str,
        component: &str,
        value: impl Into<MeasurementValue>,
        date: &str,
    ) -> Self {
        Self {
            category_name: Some(category.to_string()),
            component_name: Some(component.to_string()),
            value: Some(value.into()),
            unit: None,
            measurement_date: Some(date.to_string()),
        }
    }

    pub fn category_lower(&self) -> Option<String> {
        self.category_name.as_deref().map(str::to_lowercase)
    }

    pub fn component(&self) -> &str {
        self.component_name.as_deref().unwrap_or_default()
    }

    pub fn unit(&self) -> &str {
        self.unit.as_deref().unwrap_or_default()
    }

    pub fn numeric_value(&self) -> Option<f64> {
        self.value.as_ref().and_then(MeasurementValue::parse)
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.measurement_date.as_deref().and_then(parse_timestamp)
    }

    /// True when the lowercased category contains any of `keywords`.
    pub fn category_matches(&self, keywords: &[&str]) -> bool {
        self.category_lower()
            .map(|category| keywords.iter().any(|keyword| category.contains(keyword)))
            .unwrap_or(false)
    }
}

/// A monitored facility with its flat measurement list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: i64,
    #[serde(default)]
    pub factory_name: Option<String>,
    #[serde(default)]
    pub latitude: Option<serde_json::Value>,
    #[serde(default)]
    pub longitude: Option<serde_json::Value>,
    pub measurements: Vec<Measurement>,
}

impl Facility {
    pub fn name(&self) -> String {
        self.factory_name
            .clone()
            .unwrap_or_else(|| format!("facility #{}", self.id))
    }
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Reads the longest numeric prefix of `text`, ignoring leading whitespace.
pub fn leading_float(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    trimmed[..end].parse::<f64>().ok()
}
