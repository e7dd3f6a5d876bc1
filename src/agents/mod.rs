//! Per-agent evaluation of one sub-period.
//!
//! Every evaluator is a pure function of the sub-period, the claim and
//! the rule in force on the sub-period's first day. Intensities are
//! compared strictly: a value equal to the limit is not special.

pub mod radiation;
pub mod threshold;
pub mod vibration;

pub use vibration::{Admission, VibrationEra};

use crate::models::{Agent, DateRange, ExposureClaim, SubPeriodVerdict, Unit};
use crate::rules::RuleTable;
use tracing::debug;

/// Evaluate `sub_period` of `claim` under the rule in force on its first day.
pub fn evaluate(
    table: &RuleTable,
    sub_period: DateRange,
    claim: &ExposureClaim,
) -> SubPeriodVerdict {
    let rule = table.rule_for(claim.agent(), sub_period.start());

    let verdict = match claim.agent() {
        Agent::Vibration => vibration::evaluate(sub_period, claim, rule),
        Agent::Radiation => radiation::evaluate(sub_period, claim, rule),
        Agent::Noise | Agent::Chemicals | Agent::Heat | Agent::Electricity => {
            threshold::evaluate(sub_period, claim, rule)
        }
    };

    debug!(
        agent = claim.agent().id(),
        period = %sub_period,
        limit = verdict.limit,
        special = verdict.is_special,
        unit_mismatch = verdict.unit_mismatch,
        "evaluated sub-period"
    );

    verdict
}

/// Strict threshold comparison shared by every agent.
pub fn exceeds(intensity: f64, limit: f64) -> bool {
    intensity > limit
}

/// Render a number in Brazilian notation: `87`, `0,86`, `21`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        value.to_string().replace('.', ",")
    }
}

/// Sentence explaining a numeric comparison against a limit.
pub(crate) struct Comparison<'a> {
    pub sub_period: DateRange,
    pub exposure: &'a str,
    pub intensity: f64,
    pub intensity_unit: Unit,
    pub limit: f64,
    pub limit_unit: Unit,
    pub citation: &'a str,
    pub is_special: bool,
}

impl Comparison<'_> {
    pub fn narrative(&self) -> String {
        let measured = format!(
            "{} {}",
            format_number(self.intensity),
            self.intensity_unit.label()
        );
        let limit = format!(
            "{} {}",
            format_number(self.limit),
            self.limit_unit.label()
        );

        if self.is_special {
            format!(
                "O período de {} deve ser enquadrado como especial, em razão de exposição a {} \
                 de {}, superior ao limite de {} previsto no {}.",
                self.sub_period, self.exposure, measured, limit, self.citation
            )
        } else {
            format!(
                "O período de {} não deve ser enquadrado como especial, em razão de exposição \
                 a {} de {}, que não ultrapassa o limite de {} previsto no {}.",
                self.sub_period, self.exposure, measured, limit, self.citation
            )
        }
    }
}
