use crate::clock::Clock;
use crate::types::indicator::{
    DisplayValue, EconomyDetail, Indicator, IndicatorDetail, Polarity, ScoredEconomicIndicator,
};
use crate::types::measurement::Measurement;
use tracing::debug;

use super::classify::{classify_component, latest_per_component, position_of_max, position_of_min, KeywordTable};
use super::scale::{grade_index, round_index, weighted_mean};

pub const CATEGORY_KEYWORDS: &[&str] = &["економ", "эконом", "econom"];
const NO_DATA_TEXT: &str = "Немає даних про економічний стан";
const INSUFFICIENT_TEXT: &str = "Недостатньо даних для оцінки економічного стану";
const LABELS: [&str; 5] = [
    "Відмінний економічний стан",
    "Добрий економічний стан",
    "Задовільний економічний стан",
    "Незадовільний економічний стан",
    "Критичний економічний стан",
];

/// Score given to the only indicator of a type bucket.
const SINGLE_INDICATOR_SCORE: f64 = 0.7;
const EXPORT_IMPORT_RATIO_WEIGHT: f64 = 1.4;

const EXPORT_KEY: &str = "експорт товарів та послуг";
const IMPORT_KEY: &str = "імпорт товарів та послуг";

#[derive(Debug, Clone, Copy)]
pub struct EconomicIndicator {
    pub key: &'static str,
    pub polarity: Polarity,
    pub weight: f64,
    pub short_name: &'static str,
    pub unit: &'static str,
}

const fn entry(
    key: &'static str,
    polarity: Polarity,
    weight: f64,
    short_name: &'static str,
    unit: &'static str,
) -> EconomicIndicator {
    EconomicIndicator {
        key,
        polarity,
        weight,
        short_name,
        unit,
    }
}

pub const ECONOMIC_INDICATORS: &[EconomicIndicator] = &[
    entry("валовий внутрішній продукт", Polarity::HigherBetter, 1.5, "ВВП", "млн грн"),
    entry("вантажообіг", Polarity::HigherBetter, 1.0, "Вантажообіг", "млн т-км"),
    entry("пасажирообіг", Polarity::HigherBetter, 1.0, "Пасажирообіг", "млн пас-км"),
    entry(EXPORT_KEY, Polarity::HigherBetter, 1.2, "Експорт", "млн дол. США"),
    entry("заробітна плата", Polarity::HigherBetter, 1.3, "Зарплата", "грн"),
    entry("індекс промислової продукції", Polarity::HigherBetter, 1.1, "Індекс промисловості", "%"),
    entry(
        "індекс обсягу сільськогосподарського виробництва",
        Polarity::HigherBetter,
        1.1,
        "Індекс сільгосп",
        "%",
    ),
    entry("індекс будівельної продукції", Polarity::HigherBetter, 1.0, "Індекс будівництва", "%"),
    entry("індекс споживчих цін", Polarity::LowerBetter, 1.2, "ІСЦ", "%"),
    entry(
        "індекс цін виробників промислової продукції",
        Polarity::LowerBetter,
        1.1,
        "Індекс цін виробників",
        "%",
    ),
    entry(IMPORT_KEY, Polarity::Special, 1.0, "Імпорт", "млн дол. США"),
];

pub const ECONOMIC_KEYWORDS: &KeywordTable = &[
    ("валовий внутрішній продукт", &["ввп", "валов", "внутр", "продукт", "gdp"]),
    ("вантажообіг", &["вантаж", "грузооб", "freight"]),
    ("пасажирообіг", &["пасажир", "пассажир", "passenger"]),
    (EXPORT_KEY, &["експорт", "экспорт", "export"]),
    (IMPORT_KEY, &["імпорт", "импорт", "import"]),
    ("заробітна плата", &["заробіт", "зарплат", "плата", "salary", "wage"]),
    ("індекс промислової продукції", &["промисл", "промышл", "industrial"]),
    (
        "індекс обсягу сільськогосподарського виробництва",
        &["сільськ", "сельск", "agricultural"],
    ),
    ("індекс будівельної продукції", &["будів", "строит", "construction"]),
    ("індекс споживчих цін", &["споживч", "потребит", "consumer", "price"]),
    (
        "індекс цін виробників промислової продукції",
        &["виробник", "производит", "producer"],
    ),
];

fn indicator_for(key: &str) -> Option<&'static EconomicIndicator> {
    ECONOMIC_INDICATORS.iter().find(|indicator| indicator.key == key)
}

/// Min-max scores within one polarity bucket; a lone indicator gets a fixed
/// score and identical values all score 0.5.
pub fn normalize_bucket(indicators: &mut [ScoredEconomicIndicator], polarity: Polarity) {
    if indicators.len() == 1 {
        indicators[0].score = SINGLE_INDICATOR_SCORE;
        return;
    }
    let min = indicators.iter().map(|i| i.value).fold(f64::INFINITY, f64::min);
    let max = indicators
        .iter()
        .map(|i| i.value)
        .fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    for indicator in indicators.iter_mut() {
        indicator.score = if range == 0.0 {
            0.5
        } else if polarity == Polarity::LowerBetter {
            1.0 - (indicator.value - min) / range
        } else {
            (indicator.value - min) / range
        };
    }
}

/// Regional economy index (0-100). Scores are relative within each polarity
/// bucket rather than against fixed targets.
pub fn economy_status_index(measurements: &[Measurement], clock: &dyn Clock) -> Indicator {
    let economy: Vec<&Measurement> = measurements
        .iter()
        .filter(|m| m.category_matches(CATEGORY_KEYWORDS))
        .collect();
    debug!(count = economy.len(), "economy measurements selected");
    if economy.is_empty() {
        return Indicator::no_data(NO_DATA_TEXT);
    }

    let mut recognized = Vec::new();
    let mut export_value = None;
    let mut import_value = None;
    for measurement in latest_per_component(economy) {
        let name = measurement.component();
        let Some(value) = measurement.numeric_value() else {
            debug!(component = name, "skipping unparsable economy value");
            continue;
        };
        let Some(info) = classify_component(name, ECONOMIC_KEYWORDS).and_then(indicator_for) else {
            debug!(component = name, "economy component unrecognized");
            continue;
        };
        if info.key == EXPORT_KEY {
            export_value = Some(value);
        } else if info.key == IMPORT_KEY {
            import_value = Some(value);
        }
        recognized.push(ScoredEconomicIndicator {
            name: name.to_string(),
            indicator: info.key.to_string(),
            short_name: info.short_name.to_string(),
            value,
            unit: info.unit.to_string(),
            weight: info.weight,
            kind: info.polarity,
            score: 0.0,
            date: measurement.measurement_date.clone(),
        });
    }

    if recognized.is_empty() {
        return Indicator::no_data(INSUFFICIENT_TEXT);
    }

    let mut higher = Vec::new();
    let mut lower = Vec::new();
    for indicator in &recognized {
        match indicator.kind {
            Polarity::HigherBetter => higher.push(indicator.clone()),
            Polarity::LowerBetter => lower.push(indicator.clone()),
            Polarity::Special => {}
        }
    }

    if let (Some(exports), Some(imports)) = (export_value, import_value) {
        if imports > 0.0 {
            let ratio = exports / imports;
            debug!(ratio, "export/import ratio derived");
            higher.push(ScoredEconomicIndicator {
                name: "Співвідношення експорт/імпорт".to_string(),
                indicator: "export_import_ratio".to_string(),
                short_name: "Експорт/Імпорт".to_string(),
                value: ratio,
                unit: String::new(),
                weight: EXPORT_IMPORT_RATIO_WEIGHT,
                kind: Polarity::HigherBetter,
                score: 0.0,
                date: Some(clock.today().format("%Y-%m-%d").to_string()),
            });
        }
    }

    if !higher.is_empty() {
        normalize_bucket(&mut higher, Polarity::HigherBetter);
    }
    if !lower.is_empty() {
        normalize_bucket(&mut lower, Polarity::LowerBetter);
    }
    let scored: Vec<ScoredEconomicIndicator> = higher.into_iter().chain(lower).collect();

    let index = weighted_mean(scored.iter().map(|i| (i.score, i.weight))).map_or(50.0, |mean| mean * 100.0);
    debug!(index, "economy index computed");

    let worst = position_of_min(&scored, |i| i.score).map(|at| scored[at].clone());
    let best = position_of_max(&scored, |i| i.score).map(|at| scored[at].clone());

    let (class, label, color) = grade_index(index, &LABELS);
    let suffix = match (&worst, &best) {
        (Some(worst), _) if worst.score < 0.3 => {
            format!(" (проблемний показник: {})", worst.short_name)
        }
        (_, Some(best)) if best.score > 0.7 => format!(" (сильний показник: {})", best.short_name),
        _ => String::new(),
    };

    Indicator::graded(
        DisplayValue::Number(round_index(index)),
        class,
        format!("{label}{suffix}"),
        color,
    )
    .with_detail(IndicatorDetail::Economy(EconomyDetail {
        indicators: scored,
        worst_indicator: worst,
        best_indicator: best,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn clock() -> FixedClock {
        FixedClock::ymd(2024, 9, 1).expect("valid date")
    }

    fn economy(component: &str, value: &str) -> Measurement {
        Measurement::new("Економічний стан", component, value, "2024-01-01")
    }

    fn scored(indicator: &Indicator) -> &EconomyDetail {
        match indicator.detail.as_ref() {
            Some(IndicatorDetail::Economy(detail)) => detail,
            other => panic!("expected economy detail, got {other:?}"),
        }
    }

    #[test]
    fn returns_no_data_without_economy_measurements() {
        let indicator = economy_status_index(&[], &clock());
        assert_eq!(indicator.value, None);
        assert_eq!(indicator.grade, None);
    }

    #[test]
    fn single_gdp_indicator_scores_seventy() {
        let measurements = vec![economy("Валовий внутрішній продукт", "125000")];

        let indicator = economy_status_index(&measurements, &clock());
        assert_eq!(indicator.value, Some(DisplayValue::Number(70.0)));
        assert_eq!(indicator.grade, Some(2));
        assert_eq!(indicator.text, "Добрий економічний стан");
        assert_eq!(scored(&indicator).indicators[0].score, 0.7);
    }

    #[test]
    fn export_import_ratio_joins_higher_better_pool() {
        let measurements = vec![
            economy("Експорт товарів та послуг", "300"),
            economy("Імпорт товарів та послуг", "150"),
        ];

        let indicator = economy_status_index(&measurements, &clock());
        let detail = scored(&indicator);
        assert_eq!(detail.indicators.len(), 2);
        let ratio = detail
            .indicators
            .iter()
            .find(|i| i.indicator == "export_import_ratio")
            .expect("ratio should be derived");
        assert_eq!(ratio.value, 2.0);
        assert_eq!(ratio.date.as_deref(), Some("2024-09-01"));
        // exports 300 -> 1.0 weight 1.2, ratio 2 -> 0.0 weight 1.4
        assert_eq!(indicator.value, Some(DisplayValue::Number(46.0)));
        assert_eq!(indicator.grade, Some(3));
        assert_eq!(
            indicator.text,
            "Задовільний економічний стан (проблемний показник: Експорт/Імпорт)"
        );
    }

    #[test]
    fn lower_better_bucket_is_inverted() {
        let measurements = vec![
            economy("Індекс споживчих цін", "112"),
            economy("Індекс цін виробників промислової продукції", "104"),
        ];

        let indicator = economy_status_index(&measurements, &clock());
        let detail = scored(&indicator);
        assert_eq!(detail.indicators[0].score, 0.0);
        assert_eq!(detail.indicators[1].score, 1.0);
        assert!(detail.indicators.iter().all(|i| i.kind == Polarity::LowerBetter));

        let rendered = serde_json::to_value(&detail.indicators[0]).expect("indicator should serialize");
        assert_eq!(rendered["type"], "lower-better");
    }

    #[test]
    fn import_alone_yields_neutral_index() {
        let measurements = vec![economy("Імпорт товарів та послуг", "10")];

        let indicator = economy_status_index(&measurements, &clock());
        assert_eq!(indicator.value, Some(DisplayValue::Number(50.0)));
        assert_eq!(indicator.grade, Some(3));
    }

    #[test]
    fn unrecognized_components_are_insufficient() {
        let measurements = vec![economy("Кількість туристів", "1200")];
        let indicator = economy_status_index(&measurements, &clock());
        assert_eq!(indicator.value, None);
        assert_eq!(indicator.text, INSUFFICIENT_TEXT);
    }

    #[test]
    fn identical_values_score_one_half() {
        let mut bucket = vec![
            ScoredEconomicIndicator {
                name: "a".into(),
                indicator: "a".into(),
                short_name: "a".into(),
                value: 5.0,
                unit: String::new(),
                weight: 1.0,
                kind: Polarity::HigherBetter,
                score: 0.0,
                date: None,
            };
            2
        ];
        normalize_bucket(&mut bucket, Polarity::HigherBetter);
        assert!(bucket.iter().all(|i| i.score == 0.5));
    }
}
