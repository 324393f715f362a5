//! Population health scorer.
//!
//! Components resolve against a two-level taxonomy: a category first, then a
//! subcategory scoped to that category. Subcategories carry their own
//! normalization shape, baseline and weight; a category without a resolved
//! subcategory falls back to its own shape with no baseline.

use crate::types::indicator::{
    CategoryScore, DisplayValue, HealthDetail, Indicator, IndicatorDetail, RecognizedIndicator,
};
use crate::types::measurement::Measurement;
use tracing::debug;

use super::classify::{
    contains_any, keyword_match, latest_per_component, position_of_max, position_of_min,
    KeywordTable,
};
use super::scale::{grade_index, round_index, weighted_mean};
use self::Baseline::{Range, Scalar};
use self::Shape::{HigherBetter, LowerBetter, OptimalRange};

pub const CATEGORY_KEYWORDS: &[&str] = &["здоров", "захворюван", "медик", "медиц", "health", "medic"];
const NO_DATA_TEXT: &str = "Немає даних про стан здоров'я населення";
const INSUFFICIENT_TEXT: &str = "Недостатньо даних для оцінки стану здоров'я";
const LABELS: [&str; 5] = [
    "Дуже добрий стан здоров'я населення",
    "Добрий стан здоров'я населення",
    "Задовільний стан здоров'я населення",
    "Незадовільний стан здоров'я населення",
    "Критичний стан здоров'я населення",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    LowerBetter,
    HigherBetter,
    OptimalRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Baseline {
    None,
    /// A zero scalar behaves like no baseline.
    Scalar(f64),
    Range(f64, f64),
}

#[derive(Debug, Clone, Copy)]
pub struct SubCategory {
    pub key: &'static str,
    pub shape: Shape,
    pub baseline: Baseline,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct HealthCategory {
    pub key: &'static str,
    pub shape: Shape,
    pub weight: f64,
    pub short_name: &'static str,
    pub sub_categories: &'static [SubCategory],
}

const fn sub(key: &'static str, shape: Shape, baseline: Baseline, weight: f64) -> SubCategory {
    SubCategory {
        key,
        shape,
        baseline,
        weight,
    }
}

pub const HEALTH_CATEGORIES: &[HealthCategory] = &[
    HealthCategory {
        key: "медико-демографічні показники",
        shape: LowerBetter,
        weight: 1.5,
        short_name: "Медико-демографічні",
        sub_categories: &[
            sub("народжуваність", HigherBetter, Scalar(15.0), 1.2),
            sub("смертність", LowerBetter, Scalar(10.0), 1.3),
            sub("дитяча смертність", LowerBetter, Scalar(5.0), 1.5),
            sub("природний приріст", HigherBetter, Scalar(0.0), 1.4),
            sub("смертність від хвороб системи кровообігу", LowerBetter, Scalar(600.0), 1.2),
            sub("смертність від новоутворень", LowerBetter, Scalar(160.0), 1.2),
        ],
    },
    HealthCategory {
        key: "показники захворюваності та поширення хвороб",
        shape: LowerBetter,
        weight: 1.4,
        short_name: "Захворюваність",
        sub_categories: &[
            sub("загальна захворюваність", LowerBetter, Scalar(60000.0), 1.0),
            sub("первинна захворюваність", LowerBetter, Scalar(50000.0), 1.1),
            sub("хвороби системи кровообігу", LowerBetter, Scalar(4000.0), 1.2),
            sub("хвороби органів дихання", LowerBetter, Scalar(15000.0), 1.1),
            sub("хвороби органів травлення", LowerBetter, Scalar(3000.0), 1.0),
            sub("інфекційні хвороби", LowerBetter, Scalar(2000.0), 1.3),
        ],
    },
    HealthCategory {
        key: "інвалідності та інвалідизації",
        shape: LowerBetter,
        weight: 1.3,
        short_name: "Інвалідність",
        sub_categories: &[
            sub("загальна інвалідність", LowerBetter, Scalar(60.0), 1.1),
            sub("первинна інвалідність", LowerBetter, Scalar(10.0), 1.2),
            sub("інвалідність серед дітей", LowerBetter, Scalar(20.0), 1.3),
            sub("інвалідність внаслідок травм", LowerBetter, Scalar(3.0), 1.0),
        ],
    },
    HealthCategory {
        key: "фізичного розвитку населення",
        shape: OptimalRange,
        weight: 1.1,
        short_name: "Фізичний розвиток",
        sub_categories: &[
            sub("частка дітей з нормальним фізичним розвитком", HigherBetter, Scalar(80.0), 1.2),
            sub("частка осіб з надлишковою вагою", LowerBetter, Scalar(20.0), 1.0),
            sub("частка осіб з дефіцитом ваги", LowerBetter, Scalar(5.0), 1.0),
            sub("середній зріст дітей", OptimalRange, Range(140.0, 180.0), 0.9),
        ],
    },
    HealthCategory {
        key: "ризики захворювання",
        shape: LowerBetter,
        weight: 1.2,
        short_name: "Ризики захворювань",
        sub_categories: &[
            sub("ризик серцево-судинних захворювань", LowerBetter, Scalar(10.0), 1.3),
            sub("ризик онкологічних захворювань", LowerBetter, Scalar(5.0), 1.3),
            sub("ризик інфекційних захворювань", LowerBetter, Scalar(3.0), 1.2),
            sub("ризик цукрового діабету", LowerBetter, Scalar(5.0), 1.1),
        ],
    },
    HealthCategory {
        key: "прогноз захворювання",
        shape: HigherBetter,
        weight: 1.1,
        short_name: "Прогноз захворювань",
        sub_categories: &[
            sub("прогноз одужання", HigherBetter, Scalar(80.0), 1.2),
            sub("прогноз ускладнень", LowerBetter, Scalar(20.0), 1.1),
            sub("прогноз виживання", HigherBetter, Scalar(90.0), 1.3),
        ],
    },
    HealthCategory {
        key: "прогноз тривалості життя",
        shape: HigherBetter,
        weight: 1.6,
        short_name: "Тривалість життя",
        sub_categories: &[
            sub("очікувана тривалість життя при народженні", HigherBetter, Scalar(75.0), 1.5),
            sub("очікувана тривалість здорового життя", HigherBetter, Scalar(65.0), 1.4),
            sub("очікувана тривалість життя у віці 60 років", HigherBetter, Scalar(20.0), 1.2),
        ],
    },
];

pub const CATEGORY_TABLE: &KeywordTable = &[
    (
        "медико-демографічні показники",
        &["демограф", "народжуван", "смертн", "приріст", "вік", "населення", "демогр", "рожд", "смерт"],
    ),
    (
        "показники захворюваності та поширення хвороб",
        &["захворюва", "хвороб", "патолог", "заболева", "болезн", "поширен", "распространен"],
    ),
    (
        "інвалідності та інвалідизації",
        &["інвалід", "непрацездат", "неповносправ", "инвалид", "нетрудоспособ"],
    ),
    (
        "фізичного розвитку населення",
        &["фізичн", "розвит", "фізик", "развит", "зріст", "рост", "вага", "вес"],
    ),
    ("ризики захворювання", &["ризик", "риск", "ймовірн", "вероятн", "фактор"]),
    ("прогноз захворювання", &["прогноз", "передбач", "предсказ", "предикт", "предвид"]),
    (
        "прогноз тривалості життя",
        &["тривал", "продолж", "життя", "жизн", "виживан", "выжива"],
    ),
];

pub const SUBCATEGORY_TABLE: &KeywordTable = &[
    ("народжуваність", &["народжуван", "рождаем"]),
    ("смертність", &["смертн", "смерт", "летальн"]),
    ("дитяча смертність", &["дитяч", "детск", "младенч", "немовля"]),
    ("природний приріст", &["приріст", "прирост"]),
    (
        "смертність від хвороб системи кровообігу",
        &["кровообіг", "кровообращ", "серцев", "сердеч"],
    ),
    ("смертність від новоутворень", &["новоутвор", "онко", "рак"]),
    ("загальна захворюваність", &["загальн", "общ", "всего"]),
    ("первинна захворюваність", &["первинн", "первичн", "нові", "новые"]),
    (
        "хвороби системи кровообігу",
        &["серц", "сердц", "кровообіг", "кровообращ", "інфаркт", "інсульт"],
    ),
    ("хвороби органів дихання", &["дихан", "легені", "бронхіт", "пневмоні"]),
    ("хвороби органів травлення", &["травл", "шлунк", "желудок", "печінк", "печень"]),
    ("інфекційні хвороби", &["інфекц", "вірус", "бактері"]),
    ("загальна інвалідність", &["загальн", "общ", "всего"]),
    ("первинна інвалідність", &["первинн", "первичн", "нові", "новые"]),
    ("інвалідність серед дітей", &["діт", "дет"]),
    ("інвалідність внаслідок травм", &["травм", "ушкодж", "поврежд"]),
    ("частка дітей з нормальним фізичним розвитком", &["нормальн", "діт", "дет"]),
    ("частка осіб з надлишковою вагою", &["надлишк", "избыточ", "ожирін", "ожирен"]),
    ("частка осіб з дефіцитом ваги", &["дефіцит", "недостатн", "худ"]),
    ("середній зріст дітей", &["зріст", "рост", "діт", "дет"]),
    ("ризик серцево-судинних захворювань", &["серц", "сердц", "судин"]),
    ("ризик онкологічних захворювань", &["онко", "рак", "злояк", "злокач"]),
    ("ризик інфекційних захворювань", &["інфекц", "вірус", "бактері"]),
    ("ризик цукрового діабету", &["діабет", "цукр", "сахар"]),
    ("прогноз одужання", &["одуж", "выздоров", "ремісі", "ремиссия"]),
    ("прогноз ускладнень", &["ускладн", "осложн"]),
    ("прогноз виживання", &["вижива", "выжива", "пережива"]),
    ("очікувана тривалість життя при народженні", &["народж", "рожден"]),
    ("очікувана тривалість здорового життя", &["здоров", "здрав"]),
    (
        "очікувана тривалість життя у віці 60 років",
        &["60", "стар", "пенсійн", "пенсион", "похил"],
    ),
];

fn category_for(key: &str) -> Option<&'static HealthCategory> {
    HEALTH_CATEGORIES.iter().find(|category| category.key == key)
}

fn keywords_of(key: &str) -> &'static [&'static str] {
    SUBCATEGORY_TABLE
        .iter()
        .find(|(entry, _)| *entry == key)
        .map(|(_, keywords)| *keywords)
        .unwrap_or(&[])
}

/// Resolved position of a component in the taxonomy.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub category: &'static HealthCategory,
    pub sub_category: Option<&'static SubCategory>,
}

/// Resolves a component against the taxonomy, consulting `category_name`
/// only when the component name itself places nowhere.
pub fn place_component(component: &str, category_name: Option<&str>) -> Option<Placement> {
    let lower = component.to_lowercase();

    if let Some(category) = keyword_match(&lower, CATEGORY_TABLE).and_then(category_for) {
        let sub_category = SUBCATEGORY_TABLE
            .iter()
            .filter_map(|(key, keywords)| {
                category
                    .sub_categories
                    .iter()
                    .find(|sub| sub.key == *key)
                    .map(|sub| (sub, *keywords))
            })
            .find(|(_, keywords)| contains_any(&lower, keywords))
            .map(|(sub, _)| sub);
        return Some(Placement {
            category,
            sub_category,
        });
    }

    for category in HEALTH_CATEGORIES {
        if let Some(sub) = category
            .sub_categories
            .iter()
            .find(|sub| contains_any(&lower, keywords_of(sub.key)))
        {
            return Some(Placement {
                category,
                sub_category: Some(sub),
            });
        }
    }

    let category_lower = category_name?.to_lowercase();
    keyword_match(&category_lower, CATEGORY_TABLE)
        .and_then(category_for)
        .map(|category| Placement {
            category,
            sub_category: None,
        })
}

/// Normalizes a value to `[0, 1]` for the given shape and baseline.
pub fn normalize(shape: Shape, baseline: Baseline, value: f64) -> f64 {
    let scalar = match baseline {
        Baseline::Scalar(b) if b != 0.0 => Some(b),
        _ => None,
    };
    match (shape, baseline) {
        (Shape::LowerBetter, _) => match scalar {
            Some(_) if value <= 0.0 => 1.0,
            Some(b) => (1.0 - value / (b * 2.0)).max(0.0),
            None => (1.0 - value / 100.0).max(0.0),
        },
        (Shape::HigherBetter, _) => match scalar {
            Some(b) if value >= b * 2.0 => 1.0,
            Some(b) => (value / b).clamp(0.0, 1.0),
            None => (value / 100.0).clamp(0.0, 1.0),
        },
        (Shape::OptimalRange, Baseline::Range(min, max)) => {
            if (min..=max).contains(&value) {
                1.0
            } else if value < min {
                (value / min).max(0.0)
            } else {
                (max / value).max(0.0)
            }
        }
        (Shape::OptimalRange, _) => 0.5,
    }
}

fn score_component(measurement: &Measurement, value: f64) -> Option<RecognizedIndicator> {
    let name = measurement.component();
    let placement = place_component(name, measurement.category_name.as_deref())?;
    let (shape, baseline, weight) = match placement.sub_category {
        Some(sub) => (sub.shape, sub.baseline, sub.weight),
        None => (placement.category.shape, Baseline::None, placement.category.weight),
    };
    let normalized = normalize(shape, baseline, value);
    debug!(
        component = name,
        category = placement.category.key,
        sub_category = placement.sub_category.map(|s| s.key),
        normalized,
        "health component placed"
    );
    Some(RecognizedIndicator {
        matched_category: Some(placement.category.key.to_string()),
        matched_sub_category: placement.sub_category.map(|s| s.key.to_string()),
        unit: measurement.unit().to_string(),
        date: measurement.measurement_date.clone(),
        ..RecognizedIndicator::new(name, value, normalized, weight)
    })
}

/// Population health index (0-100): subcategory scores roll up to category
/// scores, which combine using the categories' own weights.
pub fn health_status_index(measurements: &[Measurement]) -> Indicator {
    let health: Vec<&Measurement> = measurements
        .iter()
        .filter(|m| m.category_matches(CATEGORY_KEYWORDS))
        .collect();
    debug!(count = health.len(), "health measurements selected");
    if health.is_empty() {
        return Indicator::no_data(NO_DATA_TEXT);
    }

    let recognized: Vec<RecognizedIndicator> = latest_per_component(health)
        .into_iter()
        .filter_map(|m| match m.numeric_value() {
            Some(value) => score_component(m, value),
            None => {
                debug!(component = m.component(), "skipping unparsable health value");
                None
            }
        })
        .collect();
    if recognized.is_empty() {
        return Indicator::no_data(INSUFFICIENT_TEXT);
    }

    // categories in first-seen order
    let mut categories: Vec<&'static HealthCategory> = Vec::new();
    for indicator in &recognized {
        if let Some(category) = indicator.matched_category.as_deref().and_then(category_for) {
            if !categories.iter().any(|seen| seen.key == category.key) {
                categories.push(category);
            }
        }
    }
    let category_scores: Vec<CategoryScore> = categories
        .into_iter()
        .filter_map(|category| {
            let members = recognized
                .iter()
                .filter(|i| i.matched_category.as_deref() == Some(category.key));
            weighted_mean(members.map(|i| (i.normalized_value, i.weight))).map(|score| CategoryScore {
                category: category.key.to_string(),
                short_name: category.short_name.to_string(),
                score,
                weight: category.weight,
            })
        })
        .collect();

    let index = weighted_mean(category_scores.iter().map(|c| (c.score, c.weight)))
        .map_or(50.0, |mean| mean * 100.0);
    debug!(index, categories = category_scores.len(), "health index computed");

    let worst = position_of_min(&category_scores, |c| c.score).map(|at| category_scores[at].clone());
    let best = position_of_max(&category_scores, |c| c.score).map(|at| category_scores[at].clone());

    let (class, label, color) = grade_index(index, &LABELS);
    let text = match &worst {
        Some(worst) if worst.score < 0.3 => {
            format!("{label} (проблемна категорія: {})", worst.short_name)
        }
        _ => label.to_string(),
    };

    Indicator::graded(DisplayValue::Number(round_index(index)), class, text, color).with_detail(
        IndicatorDetail::Health(HealthDetail {
            indicators: recognized,
            category_scores,
            worst_category: worst,
            best_category: best,
        }),
    )
}
