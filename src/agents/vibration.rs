//! Whole-body vibration.
//!
//! Both the limit and the unit the measurement must be taken in depend
//! on the era. A measurement in a unit the era does not accept is never
//! special, whatever its value; the verdict is flagged as a unit
//! mismatch instead.
//!
//! | era | accepted units | limits |
//! |---|---|---|
//! | before 06/03/1997 | golpes/min | 120 |
//! | 06/03/1997 to 12/08/2014 | m/s² (aren) | 0,86 |
//! | from 13/08/2014 | m/s² (aren), m/s^1,75 (VDVR) | 1,1 / 21 |

use super::{exceeds, Comparison};
use crate::models::{DateRange, ExposureClaim, SubPeriodVerdict, Unit, VibrationUnit};
use crate::rules::Rule;

/// Measurement regime set by a vibration rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VibrationEra {
    /// Counted in blows per minute.
    BlowsPerMinute,
    /// Measured as aren.
    Aren,
    /// Measured as aren or as VDVR.
    ArenOrVdvr,
}

/// Outcome of checking a declared unit against an era.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The unit is accepted; compare the intensity in it.
    Accepted(VibrationUnit),
    /// The unit is not accepted; the sub-period cannot be special.
    Mismatch {
        declared: Option<VibrationUnit>,
        required: &'static [VibrationUnit],
    },
}

impl VibrationEra {
    /// Era of the rule in force, read from the units the rule sets limits for.
    pub fn of(rule: &Rule) -> Self {
        let accepts = |unit: Unit| rule.limit_in(unit).is_some();
        if accepts(Unit::BlowsPerMinute) {
            VibrationEra::BlowsPerMinute
        } else if accepts(Unit::Vdvr) {
            VibrationEra::ArenOrVdvr
        } else {
            VibrationEra::Aren
        }
    }

    /// Units accepted in this era, primary first.
    pub fn accepted_units(self) -> &'static [VibrationUnit] {
        match self {
            VibrationEra::BlowsPerMinute => &[VibrationUnit::BlowsPerMinute],
            VibrationEra::Aren => &[VibrationUnit::Aren],
            VibrationEra::ArenOrVdvr => &[VibrationUnit::Aren, VibrationUnit::Vdvr],
        }
    }

    pub fn admit(self, declared: Option<VibrationUnit>) -> Admission {
        match (self, declared) {
            (VibrationEra::BlowsPerMinute, Some(unit @ VibrationUnit::BlowsPerMinute))
            | (VibrationEra::Aren, Some(unit @ VibrationUnit::Aren))
            | (VibrationEra::ArenOrVdvr, Some(unit @ (VibrationUnit::Aren | VibrationUnit::Vdvr))) => {
                Admission::Accepted(unit)
            }
            (era, declared) => Admission::Mismatch {
                declared,
                required: era.accepted_units(),
            },
        }
    }
}

pub fn evaluate(sub_period: DateRange, claim: &ExposureClaim, rule: &Rule) -> SubPeriodVerdict {
    let era = VibrationEra::of(rule);

    let admission = match era.admit(claim.unit()) {
        Admission::Accepted(unit) if rule.limit_in(unit.into()).is_none() => Admission::Mismatch {
            declared: Some(unit),
            required: era.accepted_units(),
        },
        admission => admission,
    };

    match admission {
        Admission::Accepted(unit) => {
            let unit = Unit::from(unit);
            let limit = rule.limit_in(unit).unwrap_or_else(|| rule.limit());
            let is_special = exceeds(claim.intensity(), limit);

            let narrative = Comparison {
                sub_period,
                exposure: claim.agent().display_name(),
                intensity: claim.intensity(),
                intensity_unit: unit,
                limit,
                limit_unit: unit,
                citation: &rule.citation,
                is_special,
            }
            .narrative();

            SubPeriodVerdict {
                sub_period,
                is_special,
                limit,
                unit,
                intensity: claim.intensity(),
                intensity_unit: unit,
                citation: rule.citation.clone(),
                narrative,
                unit_mismatch: false,
                radiation_kind: None,
            }
        }
        Admission::Mismatch { declared, required } => {
            let supplied = match declared {
                Some(unit) => format!("em {}", Unit::from(unit).label()),
                None => "sem indicação da unidade de medida".to_string(),
            };

            SubPeriodVerdict {
                sub_period,
                is_special: false,
                limit: rule.limit(),
                unit: rule.unit,
                intensity: claim.intensity(),
                intensity_unit: claim.measured_unit(),
                citation: rule.citation.clone(),
                narrative: format!(
                    "O período de {} não deve ser enquadrado como especial, pois a exposição a \
                     vibração de corpo inteiro foi aferida {}, quando a metodologia exigida para \
                     a época impõe a aferição em {}, nos termos do {}.",
                    sub_period,
                    supplied,
                    required_label(required),
                    rule.citation
                ),
                unit_mismatch: true,
                radiation_kind: None,
            }
        }
    }
}

fn required_label(required: &[VibrationUnit]) -> String {
    required
        .iter()
        .map(|unit| Unit::from(*unit).label())
        .collect::<Vec<_>>()
        .join(" ou ")
}
