//! Agents judged by intensity alone: noise, heat, chemicals, electricity.

use super::{exceeds, Comparison};
use crate::models::{DateRange, ExposureClaim, SubPeriodVerdict};
use crate::rules::Rule;

pub fn evaluate(sub_period: DateRange, claim: &ExposureClaim, rule: &Rule) -> SubPeriodVerdict {
    evaluate_as(sub_period, claim, rule, claim.agent().display_name())
}

/// Compare the claim's intensity against `rule`, naming the exposure
/// `exposure` in the narrative.
pub(crate) fn evaluate_as(
    sub_period: DateRange,
    claim: &ExposureClaim,
    rule: &Rule,
    exposure: &str,
) -> SubPeriodVerdict {
    let intensity_unit = claim.measured_unit();
    let limit = rule.limit_in(intensity_unit).unwrap_or_else(|| rule.limit());
    let is_special = exceeds(claim.intensity(), limit);

    let narrative = Comparison {
        sub_period,
        exposure,
        intensity: claim.intensity(),
        intensity_unit,
        limit,
        limit_unit: rule.unit,
        citation: &rule.citation,
        is_special,
    }
    .narrative();

    SubPeriodVerdict {
        sub_period,
        is_special,
        limit,
        unit: rule.unit,
        intensity: claim.intensity(),
        intensity_unit,
        citation: rule.citation.clone(),
        narrative,
        unit_mismatch: false,
        radiation_kind: claim.radiation_kind(),
    }
}
