//! Special-period evaluation for occupational exposure claims.
//!
//! A claim says a worker was exposed to a hazardous agent at a given
//! intensity over a date range. The range is split at the dates where
//! the applicable regulation changed, each piece is judged against the
//! rule in force at the time, and the verdicts are rendered into a
//! draft of the legal reasoning.
//!
//! ```no_run
//! use tempo_especial::{generate_draft, parse_request, Evaluator, RuleTable};
//!
//! let claims = parse_request(r#"{"periodos": [{"data_inicio": "01/01/2001",
//!     "data_fim": "01/01/2004", "agente": "ruido", "intensidade": 87}]}"#)?;
//! let table = RuleTable::standard();
//! let outcomes = Evaluator::new(&table).process_all(&claims);
//! println!("{}", generate_draft(&outcomes));
//! # Ok::<(), tempo_especial::InputError>(())
//! ```

pub mod agents;
pub mod analysis;
pub mod error;
pub mod input;
pub mod models;
pub mod period;
pub mod report;
pub mod rules;

pub use analysis::Evaluator;
pub use error::ClaimError;
pub use input::{parse_request, InputError};
pub use models::{
    Agent, ClaimOutcome, DateRange, ExposureClaim, RadiationKind, SubPeriodVerdict, Unit,
    VibrationUnit,
};
pub use report::{generate_draft, Report, ReportMetadata};
pub use rules::RuleTable;
