//! Draft ("minuta") generation.
//!
//! The draft has three parts, always in this order: the controversy
//! (which claims are disputed), the reasoning (one sentence per
//! sub-period, all claims interleaved chronologically) and the
//! conclusion (which sub-periods are recognized as special).

use crate::agents::format_number;
use crate::analysis::{distinct_claims, merge_chronologically, special_periods};
use crate::models::{ClaimOutcome, DateRange, ExposureClaim};

/// Render the draft for the given claims and their verdicts.
///
/// The output is a pure function of `outcomes`: the same input always
/// yields byte-identical text.
pub fn generate_draft(outcomes: &[ClaimOutcome]) -> String {
    let mut paragraphs = Vec::new();

    if let Some(controversy) = controversy_section(&distinct_claims(outcomes)) {
        paragraphs.push(controversy);
    }

    paragraphs.extend(
        merge_chronologically(outcomes)
            .into_iter()
            .map(|verdict| verdict.narrative.clone()),
    );

    paragraphs.push(conclusion_section(&special_periods(outcomes)));

    let mut draft = paragraphs.join("\n\n");
    draft.push('\n');
    draft
}

fn exposure_level(claim: &ExposureClaim) -> String {
    format!(
        "com exposição a um nível de {} {}",
        format_number(claim.intensity()),
        claim.measured_unit().label()
    )
}

fn controversy_section(claims: &[&ExposureClaim]) -> Option<String> {
    match claims {
        [] => None,
        [claim] => Some(format!(
            "No caso concreto, é controvertido quanto ao agente nocivo {} o período de {}, {}.",
            claim.agent().display_name(),
            claim.period(),
            exposure_level(claim)
        )),
        [first, rest @ ..] => {
            let single_agent = rest.iter().all(|c| c.agent() == first.agent());

            let header = if single_agent {
                format!(
                    "No caso concreto, são controvertidos quanto ao agente nocivo {} os seguintes \
                     períodos:",
                    first.agent().display_name()
                )
            } else {
                "No caso concreto, são controvertidos os seguintes períodos:".to_string()
            };

            let items: Vec<String> = claims
                .iter()
                .map(|claim| {
                    if single_agent {
                        format!("De {}, {}", claim.period(), exposure_level(claim))
                    } else {
                        format!(
                            "De {}, quanto ao agente nocivo {}, {}",
                            claim.period(),
                            claim.agent().display_name(),
                            exposure_level(claim)
                        )
                    }
                })
                .collect();

            Some(format!("{}\n\n{}", header, enumerate(&items)))
        }
    }
}

/// One item per line: `;` after each, `; e` before the last, `.` at the end.
fn enumerate(items: &[String]) -> String {
    let last = items.len().saturating_sub(1);
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let terminator = if i == last {
                "."
            } else if i + 1 == last {
                "; e"
            } else {
                ";"
            };
            format!("{}{}", item, terminator)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn conclusion_section(special: &[DateRange]) -> String {
    match special {
        [] => "Dessa forma, não reconheço nenhum período como especial.".to_string(),
        [only] => format!("Dessa forma, reconheço como especial o período de {}.", only),
        [init @ .., last] => {
            let mut listed: Vec<String> = init.iter().map(|p| format!("de {}", p)).collect();
            listed.push(format!("e de {}", last));
            format!(
                "Dessa forma, reconheço como especiais os períodos {}.",
                listed.join(", ")
            )
        }
    }
}
