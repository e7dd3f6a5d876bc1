//! Verdict aggregation across claims.
//!
//! This module merges the verdicts of several claims into the single
//! chronological sequence the draft needs and computes summary
//! statistics.

use crate::models::{ClaimOutcome, DateRange, ExposureClaim, SubPeriodVerdict};
use serde::Serialize;
use std::collections::BTreeMap;

/// All verdicts of all claims, ordered by sub-period start date.
///
/// The sort is stable: verdicts starting on the same day keep claim
/// order, so the output never depends on anything but the input order.
pub fn merge_chronologically(outcomes: &[ClaimOutcome]) -> Vec<&SubPeriodVerdict> {
    let mut merged: Vec<&SubPeriodVerdict> =
        outcomes.iter().flat_map(|o| o.verdicts.iter()).collect();
    merged.sort_by_key(|v| v.sub_period.start());
    merged
}

/// Distinct special sub-periods, chronologically ordered.
pub fn special_periods(outcomes: &[ClaimOutcome]) -> Vec<DateRange> {
    let mut periods: Vec<DateRange> = outcomes
        .iter()
        .flat_map(|o| o.verdicts.iter())
        .filter(|v| v.is_special)
        .map(|v| v.sub_period)
        .collect();
    periods.sort();
    periods.dedup();
    periods
}

/// Claims in first-seen order with exact duplicates collapsed.
///
/// Claims over the same period and agent that differ in intensity, unit
/// or radiation kind are all kept.
pub fn distinct_claims(outcomes: &[ClaimOutcome]) -> Vec<&ExposureClaim> {
    let mut distinct: Vec<&ExposureClaim> = Vec::new();
    for claim in outcomes.iter().map(|o| &o.claim) {
        if !distinct.contains(&claim) {
            distinct.push(claim);
        }
    }
    distinct
}

/// Summary of the verdicts of one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VerdictSummary {
    #[serde(rename = "periodos")]
    pub claims: usize,
    #[serde(rename = "subperiodos")]
    pub sub_periods: usize,
    #[serde(rename = "especiais")]
    pub special: usize,
    #[serde(rename = "nao_especiais")]
    pub not_special: usize,
    #[serde(rename = "unidade_incompativel")]
    pub unit_mismatches: usize,
    /// Calendar days recognized as special, overlaps counted once.
    #[serde(rename = "dias_especiais")]
    pub special_days: i64,
    /// Special sub-period count per agent id.
    #[serde(rename = "especiais_por_agente")]
    pub special_by_agent: BTreeMap<String, usize>,
}

impl VerdictSummary {
    pub fn from_outcomes(outcomes: &[ClaimOutcome]) -> Self {
        let mut summary = Self {
            claims: outcomes.len(),
            ..Self::default()
        };

        for outcome in outcomes {
            for verdict in &outcome.verdicts {
                summary.sub_periods += 1;
                if verdict.is_special {
                    summary.special += 1;
                    *summary
                        .special_by_agent
                        .entry(outcome.claim.agent().id().to_string())
                        .or_insert(0) += 1;
                } else {
                    summary.not_special += 1;
                }
                if verdict.unit_mismatch {
                    summary.unit_mismatches += 1;
                }
            }
        }

        summary.special_days = covered_days(&special_periods(outcomes));
        summary
    }
}

/// Days covered by sorted ranges, counting overlaps once.
fn covered_days(sorted: &[DateRange]) -> i64 {
    let mut total = 0;
    let mut covered_until = None;

    for range in sorted {
        let start = match covered_until {
            Some(until) if range.end() <= until => continue,
            Some(until) if range.start() <= until => until.succ_opt().unwrap_or(range.end()),
            _ => range.start(),
        };
        total += (range.end() - start).num_days() + 1;
        covered_until = Some(range.end());
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Evaluator;
    use crate::models::{Agent, VibrationUnit};
    use crate::rules::RuleTable;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn claim(agent: Agent, start: NaiveDate, end: NaiveDate, intensity: f64) -> ExposureClaim {
        let period = DateRange::new(start, end).unwrap();
        ExposureClaim::new(agent, period, intensity, None).unwrap()
    }

    fn outcomes(claims: &[ExposureClaim]) -> Vec<ClaimOutcome> {
        let table = RuleTable::standard();
        Evaluator::new(&table).process_all(claims)
    }

    #[test]
    fn test_merge_interleaves_claims_by_start() {
        let outcomes = outcomes(&[
            claim(Agent::Noise, date(1995, 1, 1), date(2005, 1, 1), 88.0),
            claim(Agent::Heat, date(1996, 1, 1), date(1996, 12, 31), 26.0),
        ]);
        let starts: Vec<_> = merge_chronologically(&outcomes)
            .iter()
            .map(|v| v.sub_period.start())
            .collect();

        assert_eq!(
            starts,
            vec![
                date(1995, 1, 1),
                date(1996, 1, 1),
                date(1997, 3, 6),
                date(2003, 11, 19)
            ]
        );
    }

    #[test]
    fn test_merge_is_stable_for_equal_starts() {
        let outcomes = outcomes(&[
            claim(Agent::Heat, date(1990, 1, 1), date(1990, 6, 1), 26.0),
            claim(Agent::Noise, date(1990, 1, 1), date(1990, 6, 1), 81.0),
        ]);
        let merged = merge_chronologically(&outcomes);
        assert!(merged[0].narrative.contains("calor"));
        assert!(merged[1].narrative.contains("ruído"));
    }

    #[test]
    fn test_special_periods_match_special_verdicts() {
        let outcomes = outcomes(&[
            claim(Agent::Noise, date(1990, 1, 1), date(2010, 1, 1), 86.0),
            claim(Agent::Electricity, date(2000, 1, 1), date(2001, 1, 1), 100.0),
        ]);

        let expected: HashSet<DateRange> = outcomes
            .iter()
            .flat_map(|o| o.verdicts.iter())
            .filter(|v| v.is_special)
            .map(|v| v.sub_period)
            .collect();
        let listed = special_periods(&outcomes);

        assert_eq!(listed.len(), expected.len());
        assert!(listed.iter().all(|p| expected.contains(p)));
        assert!(listed.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_distinct_claims_keep_differing_intensities() {
        let outcomes = outcomes(&[
            claim(Agent::Noise, date(1990, 1, 1), date(1991, 1, 1), 86.0),
            claim(Agent::Noise, date(1990, 1, 1), date(1991, 1, 1), 95.0),
            claim(Agent::Noise, date(1990, 1, 1), date(1991, 1, 1), 86.0),
            claim(Agent::Heat, date(1990, 1, 1), date(1991, 1, 1), 26.0),
        ]);
        let distinct = distinct_claims(&outcomes);

        assert_eq!(distinct.len(), 3);
        assert_eq!(distinct[0].intensity(), 86.0);
        assert_eq!(distinct[1].intensity(), 95.0);
        assert_eq!(distinct[2].agent(), Agent::Heat);
    }

    #[test]
    fn test_distinct_claims_keep_differing_vibration_units() {
        let period = DateRange::new(date(2015, 1, 1), date(2015, 12, 31)).unwrap();
        let gpm = ExposureClaim::new(
            Agent::Vibration,
            period,
            130.0,
            Some(VibrationUnit::BlowsPerMinute),
        )
        .unwrap();
        let vdvr =
            ExposureClaim::new(Agent::Vibration, period, 130.0, Some(VibrationUnit::Vdvr)).unwrap();
        let outcomes = outcomes(&[gpm.clone(), vdvr.clone()]);

        assert_eq!(distinct_claims(&outcomes), vec![&gpm, &vdvr]);
    }

    #[test]
    fn test_summary_counts() {
        let outcomes = outcomes(&[
            claim(Agent::Noise, date(1990, 1, 1), date(2010, 1, 1), 86.0),
            claim(Agent::Heat, date(1990, 1, 1), date(1990, 1, 10), 26.0),
        ]);
        let summary = VerdictSummary::from_outcomes(&outcomes);

        assert_eq!(summary.claims, 2);
        assert_eq!(summary.sub_periods, 4);
        assert_eq!(summary.special, 3);
        assert_eq!(summary.not_special, 1);
        assert_eq!(summary.special_by_agent.get("ruido"), Some(&2));
        assert_eq!(summary.special_by_agent.get("calor"), Some(&1));
    }

    #[test]
    fn test_covered_days_counts_overlap_once() {
        let a = DateRange::new(date(2000, 1, 1), date(2000, 1, 10)).unwrap();
        let b = DateRange::new(date(2000, 1, 5), date(2000, 1, 20)).unwrap();
        let c = DateRange::new(date(2000, 1, 6), date(2000, 1, 7)).unwrap();
        let d = DateRange::new(date(2000, 2, 1), date(2000, 2, 1)).unwrap();

        assert_eq!(covered_days(&[a, b, c, d]), 21);
    }
}
