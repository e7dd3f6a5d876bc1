//! Time-versioned regulatory rules per agent.
//!
//! Each agent has a baseline rule, in force from the earliest
//! representable date, followed by the amendments that changed its
//! threshold, unit or legal basis. Lookups pick the last rule whose
//! effective date is not after the queried date.

pub mod table;

pub use table::{AgentRules, RuleTable};

use crate::models::Unit;
use chrono::NaiveDate;
use serde::Serialize;

/// Decreto nº 2.172/1997 takes effect.
pub fn decree_2172_effective() -> NaiveDate {
    ymd(1997, 3, 6)
}

/// Decreto nº 4.882/2003 lowers the noise threshold to 85 dB(A).
pub fn decree_4882_effective() -> NaiveDate {
    ymd(2003, 11, 19)
}

/// Portaria MTE nº 1.297/2014 sets the NR-15 Annex 8 vibration limits.
pub fn ordinance_1297_effective() -> NaiveDate {
    ymd(2014, 8, 13)
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("rule table dates are valid calendar dates")
}

/// Limit a measured intensity must exceed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Threshold {
    /// One limit, in the rule's unit.
    Single(f64),
    /// One limit per accepted unit.
    PerUnit(Vec<(Unit, f64)>),
}

/// A rule in force from `effective_from` until the next amendment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub effective_from: NaiveDate,
    pub threshold: Threshold,
    /// Primary unit of the rule.
    pub unit: Unit,
    pub citation: String,
}

impl Rule {
    pub fn new(effective_from: NaiveDate, limit: f64, unit: Unit, citation: &str) -> Self {
        Self {
            effective_from,
            threshold: Threshold::Single(limit),
            unit,
            citation: citation.to_string(),
        }
    }

    /// Rule accepting several units, each with its own limit. The first
    /// entry is the primary unit.
    pub fn per_unit(effective_from: NaiveDate, limits: &[(Unit, f64)], citation: &str) -> Self {
        let unit = limits.first().map(|(unit, _)| *unit).unwrap_or(Unit::Aren);
        Self {
            effective_from,
            threshold: Threshold::PerUnit(limits.to_vec()),
            unit,
            citation: citation.to_string(),
        }
    }

    /// Limit in the primary unit.
    pub fn limit(&self) -> f64 {
        self.limit_in(self.unit).unwrap_or(0.0)
    }

    /// Limit for a measurement in `unit`, if the rule accepts that unit.
    pub fn limit_in(&self, unit: Unit) -> Option<f64> {
        match &self.threshold {
            Threshold::Single(limit) => (unit == self.unit).then_some(*limit),
            Threshold::PerUnit(limits) => limits
                .iter()
                .find(|(accepted, _)| *accepted == unit)
                .map(|(_, limit)| *limit),
        }
    }

    /// Units this rule accepts, primary first.
    pub fn accepted_units(&self) -> Vec<Unit> {
        match &self.threshold {
            Threshold::Single(_) => vec![self.unit],
            Threshold::PerUnit(limits) => limits.iter().map(|(unit, _)| *unit).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_threshold_only_accepts_its_unit() {
        let rule = Rule::new(NaiveDate::MIN, 85.0, Unit::DecibelA, "x");
        assert_eq!(rule.limit(), 85.0);
        assert_eq!(rule.limit_in(Unit::DecibelA), Some(85.0));
        assert_eq!(rule.limit_in(Unit::Volt), None);
        assert_eq!(rule.accepted_units(), vec![Unit::DecibelA]);
    }

    #[test]
    fn test_per_unit_threshold() {
        let rule = Rule::per_unit(
            ordinance_1297_effective(),
            &[(Unit::Aren, 1.1), (Unit::Vdvr, 21.0)],
            "x",
        );
        assert_eq!(rule.unit, Unit::Aren);
        assert_eq!(rule.limit(), 1.1);
        assert_eq!(rule.limit_in(Unit::Vdvr), Some(21.0));
        assert_eq!(rule.limit_in(Unit::BlowsPerMinute), None);
        assert_eq!(rule.accepted_units(), vec![Unit::Aren, Unit::Vdvr]);
    }

    #[test]
    fn test_reform_dates_are_ordered() {
        assert!(decree_2172_effective() < decree_4882_effective());
        assert!(decree_4882_effective() < ordinance_1297_effective());
    }
}
