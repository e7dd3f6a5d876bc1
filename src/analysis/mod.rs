//! Claim evaluation and cross-claim aggregation.
//!
//! The orchestrator turns one claim into its ordered verdicts; the
//! aggregator merges verdicts from several claims for the draft.

pub mod aggregator;
pub mod orchestrator;

pub use aggregator::*;
pub use orchestrator::Evaluator;
