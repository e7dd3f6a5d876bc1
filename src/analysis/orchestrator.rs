//! Evaluation of whole claims.

use crate::agents;
use crate::models::{ClaimOutcome, ExposureClaim, SubPeriodVerdict};
use crate::period::fragment;
use crate::rules::RuleTable;
use tracing::info;

/// Evaluates claims against a shared, read-only rule table.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    table: &'a RuleTable,
}

impl<'a> Evaluator<'a> {
    pub fn new(table: &'a RuleTable) -> Self {
        Self { table }
    }

    /// Split the claim's period at the agent's cutovers and evaluate each
    /// fragment, in chronological order.
    pub fn process_claim(&self, claim: &ExposureClaim) -> Vec<SubPeriodVerdict> {
        let cutovers = self.table.cutovers(claim.agent());
        let verdicts: Vec<_> = fragment(claim.period(), &cutovers)
            .into_iter()
            .map(|sub_period| agents::evaluate(self.table, sub_period, claim))
            .collect();

        info!(
            agent = claim.agent().id(),
            period = %claim.period(),
            sub_periods = verdicts.len(),
            special = verdicts.iter().filter(|v| v.is_special).count(),
            "evaluated claim"
        );

        verdicts
    }

    /// Evaluate every claim independently, keeping input order.
    pub fn process_all(&self, claims: &[ExposureClaim]) -> Vec<ClaimOutcome> {
        claims
            .iter()
            .map(|claim| ClaimOutcome {
                claim: claim.clone(),
                verdicts: self.process_claim(claim),
            })
            .collect()
    }
}
