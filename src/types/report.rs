use crate::domain::Domain;
use crate::types::indicator::Indicator;
use serde::Serialize;

/// Per-domain indicators of one facility; domains left unscored are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_quality: Option<Indicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_quality: Option<Indicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_quality: Option<Indicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radiation_level: Option<Indicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economy_status: Option<Indicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_status: Option<Indicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_status: Option<Indicator>,
}

impl IndicatorSet {
    fn slot_mut(&mut self, domain: Domain) -> &mut Option<Indicator> {
        match domain {
            Domain::Air => &mut self.air_quality,
            Domain::Water => &mut self.water_quality,
            Domain::Ground => &mut self.soil_quality,
            Domain::Radiation => &mut self.radiation_level,
            Domain::Economy => &mut self.economy_status,
            Domain::Health => &mut self.health_status,
            Domain::Energy => &mut self.energy_status,
        }
    }

    pub fn get(&self, domain: Domain) -> Option<&Indicator> {
        match domain {
            Domain::Air => self.air_quality.as_ref(),
            Domain::Water => self.water_quality.as_ref(),
            Domain::Ground => self.soil_quality.as_ref(),
            Domain::Radiation => self.radiation_level.as_ref(),
            Domain::Economy => self.economy_status.as_ref(),
            Domain::Health => self.health_status.as_ref(),
            Domain::Energy => self.energy_status.as_ref(),
        }
    }

    pub fn insert(&mut self, domain: Domain, indicator: Indicator) {
        *self.slot_mut(domain) = Some(indicator);
    }

    /// Scored domains in fixed domain order.
    pub fn iter(&self) -> impl Iterator<Item = (Domain, &Indicator)> + '_ {
        Domain::ALL
            .into_iter()
            .filter_map(move |domain| self.get(domain).map(|indicator| (domain, indicator)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityReport {
    pub id: i64,
    pub name: String,
    pub indicators: IndicatorSet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub body: String,
    pub blocking: bool,
    pub facility_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Date the clock reported while scoring.
    pub as_of: String,
    pub facilities: Vec<FacilityReport>,
    pub findings: Vec<Finding>,
}

impl AnalysisReport {
    pub fn has_blocking(&self) -> bool {
        self.findings.iter().any(|finding| finding.blocking)
    }
}
