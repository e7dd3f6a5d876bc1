//! Data models for the exposure evaluator.
//!
//! This module contains the core data structures shared by the rule
//! table, the agent evaluators and the draft generator: hazardous
//! agents, measurement units, date ranges, exposure claims and the
//! per-sub-period verdicts derived from them.

use crate::error::ClaimError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hazardous agent a worker was exposed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Agent {
    /// Noise, measured in dB(A).
    #[serde(rename = "ruido")]
    Noise,
    /// Whole-body vibration, measured in the unit of the era.
    #[serde(rename = "vibracao")]
    Vibration,
    /// Chemical agents.
    #[serde(rename = "agentes_quimicos")]
    Chemicals,
    /// Heat, measured as IBUTG.
    #[serde(rename = "calor")]
    Heat,
    /// Ionizing or non-ionizing radiation.
    #[serde(rename = "radiacao")]
    Radiation,
    /// Electrical voltage.
    #[serde(rename = "eletricidade")]
    Electricity,
}

impl Agent {
    /// Every known agent, in a fixed order.
    pub const ALL: [Agent; 6] = [
        Agent::Noise,
        Agent::Vibration,
        Agent::Chemicals,
        Agent::Heat,
        Agent::Radiation,
        Agent::Electricity,
    ];

    /// Identifier used on the wire.
    pub fn id(&self) -> &'static str {
        match self {
            Agent::Noise => "ruido",
            Agent::Vibration => "vibracao",
            Agent::Chemicals => "agentes_quimicos",
            Agent::Heat => "calor",
            Agent::Radiation => "radiacao",
            Agent::Electricity => "eletricidade",
        }
    }

    /// Name used in drafted text.
    pub fn display_name(&self) -> &'static str {
        match self {
            Agent::Noise => "ruído",
            Agent::Vibration => "vibração de corpo inteiro",
            Agent::Chemicals => "agentes químicos",
            Agent::Heat => "calor",
            Agent::Radiation => "radiação",
            Agent::Electricity => "eletricidade",
        }
    }

    /// Unit implied by the agent. Vibration has none: the claim declares it.
    pub fn implied_unit(&self) -> Option<Unit> {
        match self {
            Agent::Noise => Some(Unit::DecibelA),
            Agent::Vibration => None,
            Agent::Chemicals => Some(Unit::Ppm),
            Agent::Heat => Some(Unit::Ibutg),
            Agent::Radiation => Some(Unit::MilliSievert),
            Agent::Electricity => Some(Unit::Volt),
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Agent {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Agent::ALL
            .into_iter()
            .find(|agent| agent.id() == s)
            .ok_or_else(|| ClaimError::UnknownAgent(s.to_string()))
    }
}

/// Unit a threshold or an intensity is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    DecibelA,
    Ibutg,
    Ppm,
    MilliSievert,
    Volt,
    /// Blows per minute, the pre-1997 vibration measure.
    BlowsPerMinute,
    /// Resulting normalized acceleration, m/s².
    Aren,
    /// Resulting vibration dose value, m/s^1.75.
    Vdvr,
}

impl Unit {
    /// Label used in drafted text and rendered results.
    pub fn label(&self) -> &'static str {
        match self {
            Unit::DecibelA => "dB(A)",
            Unit::Ibutg => "IBUTG",
            Unit::Ppm => "ppm",
            Unit::MilliSievert => "mSv",
            Unit::Volt => "V",
            Unit::BlowsPerMinute => "golpes/min",
            Unit::Aren => "m/s² (aren)",
            Unit::Vdvr => "m/s^1,75 (VDVR)",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Unit {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Unit a vibration claim may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VibrationUnit {
    #[serde(rename = "gpm")]
    BlowsPerMinute,
    #[serde(rename = "ms2")]
    Aren,
    #[serde(rename = "ms175")]
    Vdvr,
}

impl VibrationUnit {
    pub const ALL: [VibrationUnit; 3] = [
        VibrationUnit::BlowsPerMinute,
        VibrationUnit::Aren,
        VibrationUnit::Vdvr,
    ];

    /// Identifier used on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            VibrationUnit::BlowsPerMinute => "gpm",
            VibrationUnit::Aren => "ms2",
            VibrationUnit::Vdvr => "ms175",
        }
    }
}

impl From<VibrationUnit> for Unit {
    fn from(unit: VibrationUnit) -> Self {
        match unit {
            VibrationUnit::BlowsPerMinute => Unit::BlowsPerMinute,
            VibrationUnit::Aren => Unit::Aren,
            VibrationUnit::Vdvr => Unit::Vdvr,
        }
    }
}

impl FromStr for VibrationUnit {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VibrationUnit::ALL
            .into_iter()
            .find(|unit| unit.code() == s)
            .ok_or_else(|| ClaimError::InvalidUnit(s.to_string()))
    }
}

/// Kind of radiation in a radiation claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RadiationKind {
    #[default]
    #[serde(rename = "ionizante")]
    Ionizing,
    #[serde(rename = "nao_ionizante")]
    NonIonizing,
}

impl RadiationKind {
    pub fn label(&self) -> &'static str {
        match self {
            RadiationKind::Ionizing => "ionizante",
            RadiationKind::NonIonizing => "não ionizante",
        }
    }
}

impl FromStr for RadiationKind {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ionizante" => Ok(RadiationKind::Ionizing),
            "nao_ionizante" | "não ionizante" | "nao ionizante" | "não-ionizante"
            | "nao-ionizante" => Ok(RadiationKind::NonIonizing),
            other => Err(ClaimError::UnknownRadiationKind(other.to_string())),
        }
    }
}

/// Closed calendar interval `[start, end]`, both days included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DateRange {
    #[serde(rename = "data_inicio", serialize_with = "crate::period::serialize_date")]
    start: NaiveDate,
    #[serde(rename = "data_fim", serialize_with = "crate::period::serialize_date")]
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ClaimError> {
        if end < start {
            return Err(ClaimError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a range from bounds already known to be ordered.
    pub(crate) fn from_ordered(start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} a {}",
            crate::period::format_date(self.start),
            crate::period::format_date(self.end)
        )
    }
}

/// One documented exposure: agent and intensity over a period.
///
/// Built only through [`ExposureClaim::new`] and the `with_*` helpers,
/// so a vibration claim always carries its declared unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposureClaim {
    #[serde(rename = "agente")]
    agent: Agent,
    #[serde(flatten)]
    period: DateRange,
    #[serde(rename = "intensidade")]
    intensity: f64,
    #[serde(rename = "unidade_medida", skip_serializing_if = "Option::is_none")]
    unit: Option<VibrationUnit>,
    #[serde(rename = "tipo_radiacao", skip_serializing_if = "Option::is_none")]
    radiation_kind: Option<RadiationKind>,
}

impl ExposureClaim {
    /// Build a claim. `unit` is required for vibration and ignored otherwise.
    pub fn new(
        agent: Agent,
        period: DateRange,
        intensity: f64,
        unit: Option<VibrationUnit>,
    ) -> Result<Self, ClaimError> {
        let unit = match agent {
            Agent::Vibration => Some(unit.ok_or(ClaimError::MissingUnit)?),
            _ => None,
        };
        let radiation_kind = match agent {
            Agent::Radiation => Some(RadiationKind::default()),
            _ => None,
        };

        Ok(Self {
            agent,
            period,
            intensity,
            unit,
            radiation_kind,
        })
    }

    /// Set the radiation kind. No effect on other agents.
    pub fn with_radiation_kind(mut self, kind: RadiationKind) -> Self {
        if self.agent == Agent::Radiation {
            self.radiation_kind = Some(kind);
        }
        self
    }

    pub fn agent(&self) -> Agent {
        self.agent
    }

    pub fn period(&self) -> DateRange {
        self.period
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Declared vibration unit, if any.
    pub fn unit(&self) -> Option<VibrationUnit> {
        self.unit
    }

    pub fn radiation_kind(&self) -> Option<RadiationKind> {
        self.radiation_kind
    }

    /// Unit the informed intensity is expressed in.
    pub fn measured_unit(&self) -> Unit {
        match self.unit {
            Some(unit) => unit.into(),
            None => self.agent.implied_unit().unwrap_or(Unit::Aren),
        }
    }
}

/// Result of evaluating one sub-period of one claim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubPeriodVerdict {
    /// Sub-period this verdict covers.
    #[serde(flatten)]
    pub sub_period: DateRange,
    /// Whether the sub-period qualifies as special.
    #[serde(rename = "eh_especial")]
    pub is_special: bool,
    /// Threshold that had to be exceeded.
    #[serde(rename = "limite")]
    pub limit: f64,
    /// Unit of `limit`.
    #[serde(rename = "unidade_limite")]
    pub unit: Unit,
    /// Intensity informed by the claim.
    #[serde(rename = "intensidade")]
    pub intensity: f64,
    /// Unit of `intensity`.
    #[serde(rename = "unidade")]
    pub intensity_unit: Unit,
    /// Legal basis of the applicable rule.
    #[serde(rename = "fundamento")]
    pub citation: String,
    /// Self-contained sentence explaining the outcome.
    #[serde(rename = "fundamentacao")]
    pub narrative: String,
    /// Vibration measured in a unit the era does not accept.
    #[serde(rename = "unidade_incompativel")]
    pub unit_mismatch: bool,
    #[serde(rename = "tipo_radiacao", skip_serializing_if = "Option::is_none")]
    pub radiation_kind: Option<RadiationKind>,
}

/// A claim together with its chronologically ordered verdicts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimOutcome {
    #[serde(rename = "periodo_original")]
    pub claim: ExposureClaim,
    #[serde(rename = "subperiodos")]
    pub verdicts: Vec<SubPeriodVerdict>,
}

impl ClaimOutcome {
    /// Whether any sub-period of this claim is special.
    pub fn has_special(&self) -> bool {
        self.verdicts.iter().any(|v| v.is_special)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_agent_from_str() {
        assert_eq!("ruido".parse::<Agent>().unwrap(), Agent::Noise);
        assert_eq!(
            "agentes_quimicos".parse::<Agent>().unwrap(),
            Agent::Chemicals
        );
        assert!(matches!(
            "poeira".parse::<Agent>(),
            Err(ClaimError::UnknownAgent(ref a)) if a == "poeira"
        ));
    }

    #[test]
    fn test_agent_serde_ids_match_wire_ids() {
        for agent in Agent::ALL {
            let json = serde_json::to_string(&agent).unwrap();
            assert_eq!(json, format!("\"{}\"", agent.id()));
        }
    }

    #[test]
    fn test_vibration_unit_from_str() {
        assert_eq!(
            "ms175".parse::<VibrationUnit>().unwrap(),
            VibrationUnit::Vdvr
        );
        assert!(matches!(
            "hz".parse::<VibrationUnit>(),
            Err(ClaimError::InvalidUnit(_))
        ));
    }

    #[test]
    fn test_vibration_unit_codes_match_wire_names() {
        for unit in VibrationUnit::ALL {
            let json = serde_json::to_string(&unit).unwrap();
            assert_eq!(json, format!("\"{}\"", unit.code()));
            assert_eq!(unit.code().parse::<VibrationUnit>().unwrap(), unit);
        }
    }

    #[test]
    fn test_radiation_kind_from_str() {
        assert_eq!(
            "Ionizante".parse::<RadiationKind>().unwrap(),
            RadiationKind::Ionizing
        );
        assert_eq!(
            "nao_ionizante".parse::<RadiationKind>().unwrap(),
            RadiationKind::NonIonizing
        );
        assert!("ultravioleta".parse::<RadiationKind>().is_err());
    }

    #[test]
    fn test_date_range_rejects_inverted_bounds() {
        let err = DateRange::new(date(2001, 1, 2), date(2001, 1, 1)).unwrap_err();
        assert!(matches!(err, ClaimError::InvalidRange { .. }));

        let single = DateRange::new(date(2001, 1, 1), date(2001, 1, 1)).unwrap();
        assert_eq!(single.days(), 1);
    }

    #[test]
    fn test_vibration_claim_requires_unit() {
        let period = DateRange::new(date(2015, 1, 1), date(2016, 1, 1)).unwrap();
        let err = ExposureClaim::new(Agent::Vibration, period, 1.0, None).unwrap_err();
        assert!(matches!(err, ClaimError::MissingUnit));

        let claim =
            ExposureClaim::new(Agent::Vibration, period, 1.0, Some(VibrationUnit::Vdvr)).unwrap();
        assert_eq!(claim.measured_unit(), Unit::Vdvr);
    }

    #[test]
    fn test_unit_is_dropped_for_other_agents() {
        let period = DateRange::new(date(2015, 1, 1), date(2016, 1, 1)).unwrap();
        let claim =
            ExposureClaim::new(Agent::Noise, period, 87.0, Some(VibrationUnit::Aren)).unwrap();
        assert_eq!(claim.unit(), None);
        assert_eq!(claim.measured_unit(), Unit::DecibelA);
    }

    #[test]
    fn test_claim_serializes_with_wire_names() {
        let period = DateRange::new(date(2015, 1, 1), date(2016, 1, 31)).unwrap();
        let claim =
            ExposureClaim::new(Agent::Vibration, period, 1.2, Some(VibrationUnit::Aren)).unwrap();
        let json = serde_json::to_value(&claim).unwrap();

        assert_eq!(json["agente"], "vibracao");
        assert_eq!(json["data_inicio"], "01/01/2015");
        assert_eq!(json["data_fim"], "31/01/2016");
        assert_eq!(json["intensidade"], 1.2);
        assert_eq!(json["unidade_medida"], "ms2");
        assert!(json.get("tipo_radiacao").is_none());
    }

    #[test]
    fn test_radiation_kind_defaults_to_ionizing() {
        let period = DateRange::new(date(2015, 1, 1), date(2016, 1, 1)).unwrap();
        let claim = ExposureClaim::new(Agent::Radiation, period, 1.0, None).unwrap();
        assert_eq!(claim.radiation_kind(), Some(RadiationKind::Ionizing));

        let noise = ExposureClaim::new(Agent::Noise, period, 1.0, None)
            .unwrap()
            .with_radiation_kind(RadiationKind::NonIonizing);
        assert_eq!(noise.radiation_kind(), None);
    }
}
