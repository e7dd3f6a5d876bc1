//! Radiation: ionizing exposure is special regardless of dose.

use super::threshold;
use crate::models::{DateRange, ExposureClaim, RadiationKind, SubPeriodVerdict};
use crate::rules::Rule;

pub fn evaluate(sub_period: DateRange, claim: &ExposureClaim, rule: &Rule) -> SubPeriodVerdict {
    let kind = claim.radiation_kind().unwrap_or_default();

    match kind {
        RadiationKind::Ionizing => SubPeriodVerdict {
            sub_period,
            is_special: true,
            limit: rule.limit(),
            unit: rule.unit,
            intensity: claim.intensity(),
            intensity_unit: claim.measured_unit(),
            citation: rule.citation.clone(),
            narrative: format!(
                "O período de {} deve ser enquadrado como especial, em razão de exposição a \
                 radiação ionizante, cuja nocividade independe da dose aferida, nos termos do {}.",
                sub_period, rule.citation
            ),
            unit_mismatch: false,
            radiation_kind: Some(kind),
        },
        RadiationKind::NonIonizing => {
            threshold::evaluate_as(sub_period, claim, rule, "radiação não ionizante")
        }
    }
}
