use crate::clock::Clock;
use crate::types::indicator::{DisplayValue, Indicator};
use crate::types::measurement::Measurement;
use chrono::{Datelike, NaiveDateTime};
use tracing::debug;

use super::scale::{GREEN, ORANGE, RED, YELLOW};

pub const CATEGORY_KEYWORDS: &[&str] = &["повітря"];
const NO_DATA_TEXT: &str = "Немає даних про якість повітря";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Season of a zero-based month (January = 0).
    pub fn from_month0(month0: u32) -> Self {
        match month0 {
            2..=4 => Season::Spring,
            5..=7 => Season::Summer,
            8..=10 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    fn slot(self) -> usize {
        match self {
            Season::Winter => 0,
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Autumn => 3,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Reading {
    at: NaiveDateTime,
    value: f64,
}

/// Average of the readings falling in the current season, or of all readings
/// when the current season has none.
pub fn seasonal_average(readings: &[(NaiveDateTime, f64)], current: Season) -> f64 {
    if readings.is_empty() {
        return 0.0;
    }
    let mut buckets: [Vec<f64>; 4] = Default::default();
    for (at, value) in readings {
        buckets[Season::from_month0(at.month0()).slot()].push(*value);
    }

    let season = &buckets[current.slot()];
    if season.is_empty() {
        let all: Vec<f64> = buckets.iter().flatten().copied().collect();
        return all.iter().sum::<f64>() / all.len() as f64;
    }
    season.iter().sum::<f64>() / season.len() as f64
}

pub fn classify_alpha(alpha: f64) -> (u8, &'static str, &'static str) {
    if alpha >= 1.5 {
        (1, "Високе забруднення", RED)
    } else if alpha >= 1.0 {
        (2, "Підвищене забруднення", ORANGE)
    } else if alpha >= 0.6 {
        (3, "Знижене забруднення", YELLOW)
    } else {
        (4, "Слабке забруднення", GREEN)
    }
}

/// Air pollution index: mean ratio of each component's latest reading to its
/// seasonal baseline.
pub fn air_quality_index(measurements: &[Measurement], clock: &dyn Clock) -> Indicator {
    let air: Vec<&Measurement> = measurements
        .iter()
        .filter(|m| m.category_matches(CATEGORY_KEYWORDS))
        .collect();
    debug!(count = air.len(), "air measurements selected");

    let mut groups: Vec<(&str, Vec<Reading>)> = Vec::new();
    for measurement in &air {
        let (Some(at), Some(value)) = (measurement.timestamp(), measurement.numeric_value()) else {
            debug!(component = measurement.component(), "skipping unusable air reading");
            continue;
        };
        let reading = Reading { at, value };
        match groups
            .iter_mut()
            .find(|(name, _)| *name == measurement.component())
        {
            Some((_, readings)) => readings.push(reading),
            None => groups.push((measurement.component(), vec![reading])),
        }
    }

    if groups.is_empty() {
        return Indicator::no_data(NO_DATA_TEXT);
    }

    let season = Season::from_month0(clock.month0());
    let mut alpha_sum = 0.0;
    let mut alpha_count = 0usize;
    for (component, readings) in &groups {
        let history: Vec<(NaiveDateTime, f64)> =
            readings.iter().map(|r| (r.at, r.value)).collect();
        let baseline = seasonal_average(&history, season);
        if baseline <= 0.0 {
            continue;
        }
        // newest first; equal dates keep input order
        let latest = readings
            .iter()
            .fold(None::<&Reading>, |best, r| match best {
                Some(b) if b.at >= r.at => Some(b),
                _ => Some(r),
            });
        if let Some(latest) = latest {
            let alpha = latest.value / baseline;
            debug!(component, baseline, alpha, "air component ratio");
            alpha_sum += alpha;
            alpha_count += 1;
        }
    }

    let alpha_avg = if alpha_count > 0 {
        alpha_sum / alpha_count as f64
    } else {
        0.0
    };
    let (class, text, color) = classify_alpha(alpha_avg);
    Indicator::graded(
        DisplayValue::Text(format!("{alpha_avg:.2}")),
        class,
        text.to_string(),
        color,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn june() -> FixedClock {
        FixedClock::ymd(2024, 6, 15).expect("valid date")
    }

    fn air(component: &str, value: &str, date: &str) -> Measurement {
        Measurement::new("Стан повітря", component, value, date)
    }

    #[test]
    fn returns_no_data_without_air_measurements() {
        let indicator = air_quality_index(&[], &june());
        assert_eq!(indicator.value, None);
        assert_eq!(indicator.grade, None);
        assert_eq!(indicator.text, NO_DATA_TEXT);

        let other = vec![Measurement::new("Стан ґрунтів", "Гумус", "3", "2024-01-01")];
        assert_eq!(air_quality_index(&other, &june()).value, None);
    }

    #[test]
    fn doubled_latest_reading_is_high_pollution() {
        // summer history averages 10, the newest reading is 20
        let measurements = vec![
            air("Двоокис азоту (NO2)", "10", "2024-01-05"),
            air("Двоокис азоту (NO2)", "5", "2023-06-01"),
            air("Двоокис азоту (NO2)", "5", "2023-07-01"),
            air("Двоокис азоту (NO2)", "20", "2024-06-10"),
        ];

        let indicator = air_quality_index(&measurements, &june());
        assert_eq!(indicator.grade, Some(1));
        assert_eq!(indicator.text, "Високе забруднення");
        assert_eq!(indicator.value, Some(DisplayValue::Text("2.00".to_string())));
        assert_eq!(indicator.color, RED);
    }

    #[test]
    fn seasonal_average_falls_back_to_all_seasons() {
        let winter_only = vec![
            air("Вміст пилу", "4", "2024-01-10"),
            air("Вміст пилу", "8", "2024-02-10"),
        ];

        let indicator = air_quality_index(&winter_only, &june());
        // baseline 6, latest 8
        assert_eq!(indicator.value, Some(DisplayValue::Text("1.33".to_string())));
        assert_eq!(indicator.grade, Some(2));
    }

    #[test]
    fn alpha_boundaries_are_inclusive() {
        assert_eq!(classify_alpha(1.5).0, 1);
        assert_eq!(classify_alpha(1.0).0, 2);
        assert_eq!(classify_alpha(0.6).0, 3);
        assert_eq!(classify_alpha(0.59).0, 4);
    }

    #[test]
    fn zero_baseline_components_are_skipped() {
        let measurements = vec![air("Свинець", "0", "2024-06-01")];
        let indicator = air_quality_index(&measurements, &june());
        assert_eq!(indicator.value, Some(DisplayValue::Text("0.00".to_string())));
        assert_eq!(indicator.grade, Some(4));
    }

    #[test]
    fn unparsable_values_do_not_poison_the_average() {
        let measurements = vec![
            air("Оксид вуглецю", "n/a", "2024-06-01"),
            air("Оксид вуглецю", "3", "2024-06-02"),
        ];
        let indicator = air_quality_index(&measurements, &june());
        assert_eq!(indicator.value, Some(DisplayValue::Text("1.00".to_string())));

        let only_junk = vec![air("Оксид вуглецю", "n/a", "2024-06-01")];
        assert_eq!(air_quality_index(&only_junk, &june()).value, None);
    }

    #[test]
    fn season_mapping_follows_calendar() {
        assert_eq!(Season::from_month0(0), Season::Winter);
        assert_eq!(Season::from_month0(2), Season::Spring);
        assert_eq!(Season::from_month0(7), Season::Summer);
        assert_eq!(Season::from_month0(10), Season::Autumn);
        assert_eq!(Season::from_month0(11), Season::Winter);
    }
}
