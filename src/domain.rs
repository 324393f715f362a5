//! The seven monitored domains and the measurement filters built on them.

use crate::error::EcoError;
use crate::types::measurement::{Facility, Measurement};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    Air,
    Water,
    Ground,
    Radiation,
    Economy,
    Health,
    Energy,
}

impl Domain {
    pub const ALL: [Domain; 7] = [
        Domain::Air,
        Domain::Water,
        Domain::Ground,
        Domain::Radiation,
        Domain::Economy,
        Domain::Health,
        Domain::Energy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Air => "air",
            Domain::Water => "water",
            Domain::Ground => "ground",
            Domain::Radiation => "radiation",
            Domain::Economy => "economy",
            Domain::Health => "health",
            Domain::Energy => "energy",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Domain::Air => "Стан повітря",
            Domain::Water => "Стан водних ресурсів",
            Domain::Ground => "Стан ґрунтів",
            Domain::Radiation => "Рівень радіації",
            Domain::Economy => "Економічний стан",
            Domain::Health => "Стан здоров'я населення",
            Domain::Energy => "Енергетичний стан",
        }
    }

    /// Key of the domain's indicator in a serialized indicator set.
    pub fn indicator_key(self) -> &'static str {
        match self {
            Domain::Air => "airQuality",
            Domain::Water => "waterQuality",
            Domain::Ground => "soilQuality",
            Domain::Radiation => "radiationLevel",
            Domain::Economy => "economyStatus",
            Domain::Health => "healthStatus",
            Domain::Energy => "energyStatus",
        }
    }

    /// Substring of a lowercased category name that places a measurement in
    /// this domain.
    pub fn category_keyword(self) -> &'static str {
        match self {
            Domain::Air => "повітря",
            Domain::Water => "водн",
            Domain::Ground => "ґрунт",
            Domain::Radiation => "радіац",
            Domain::Economy => "економічн",
            Domain::Health => "здоров",
            Domain::Energy => "енергетичн",
        }
    }

    /// Canonical component names the measurement store offers for the domain.
    pub fn components(self) -> &'static [&'static str] {
        match self {
            Domain::Air => &[
                "Вміст пилу",
                "Двоокис азоту (NO2)",
                "Двоокис сірки (SO2)",
                "Оксид вуглецю",
                "Формальдегід (H2CO)",
                "Свинець",
                "Бенз(а)пірен",
                "Iндекс якості повітря",
            ],
            Domain::Water => &[
                "Показники епідемічної безпеки (мікробіологічні)",
                "Показники епідемічної безпеки (паразитарні)",
                "Санітарно-хімічні (органолептичні)",
                "Санітарно-хімічні (фізико-хімічні)",
                "Санітарно-хімічні (санітарно-токсикологічні)",
                "Радіаційні показники",
                "Індекс забрудненості води",
            ],
            Domain::Ground => &[
                "Гумус",
                "Рухомі сполуки фосфору (P2O5)",
                "Рухомі сполуки калію (K2O)",
                "Засоленість",
                "Солонцюватість",
                "Забруднення хімічними речовинами",
                "pH",
                "Бал бонітету для складового ґрунту",
            ],
            Domain::Radiation => &["Рівень радіації"],
            Domain::Economy => &[
                "Валовий внутрішній продукт",
                "Вантажообіг",
                "Пасажирообіг",
                "Експорт товарів та послуг",
                "Імпорт товарів та послуг",
                "Заробітна плата",
                "Індекс промислової продукції",
                "Індекс обсягу сільськогосподарського виробництва",
                "Індекс будівельної продукції",
                "Індекс споживчих цін",
                "Індекс цін виробників промислової продукції",
            ],
            Domain::Health => &[
                "Медико-демографічні показники",
                "Показники захворюваності та поширення хвороб (хворобливість)",
                "Інвалідності та інвалідизації",
                "Фізичного розвитку населення",
                "Ризики захворювання",
                "Прогноз захворювання",
                "Прогноз тривалості життя",
            ],
            Domain::Energy => &[
                "Обсяги використання води",
                "Обсяги використання електроенергії",
                "Обсяги використання газу",
                "Обсяги використання теплової енергії за кожен місяць",
                "Середні обсяги споживання за місяць та рік",
                "Енергоефективність будівлі або виробництва",
            ],
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = EcoError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "air" => Ok(Domain::Air),
            "water" => Ok(Domain::Water),
            "ground" | "soil" => Ok(Domain::Ground),
            "radiation" => Ok(Domain::Radiation),
            "economy" => Ok(Domain::Economy),
            "health" => Ok(Domain::Health),
            "energy" => Ok(Domain::Energy),
            _ => Err(EcoError::UnknownDomain(raw.to_string())),
        }
    }
}

/// Domain whose category keyword occurs in the measurement's category name.
pub fn domain_of(measurement: &Measurement) -> Option<Domain> {
    let category = measurement.category_lower()?;
    Domain::ALL
        .into_iter()
        .find(|domain| category.contains(domain.category_keyword()))
}

fn selected(measurement: &Measurement, domains: &[Domain]) -> bool {
    match domain_of(measurement) {
        Some(domain) => {
            domains.contains(&domain)
                && domain
                    .components()
                    .iter()
                    .any(|component| *component == measurement.component())
        }
        None => false,
    }
}

/// Measurements in one of `domains` whose component is canonical for it.
pub fn filter_measurements<'a>(measurements: &'a [Measurement], domains: &[Domain]) -> Vec<&'a Measurement> {
    measurements
        .iter()
        .filter(|measurement| selected(measurement, domains))
        .collect()
}

/// Facilities with at least one measurement passing `filter_measurements`.
pub fn filter_facilities<'a>(facilities: &'a [Facility], domains: &[Domain]) -> Vec<&'a Facility> {
    facilities
        .iter()
        .filter(|facility| !filter_measurements(&facility.measurements, domains).is_empty())
        .collect()
}
