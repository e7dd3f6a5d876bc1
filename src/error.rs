use chrono::NaiveDate;
use thiserror::Error;

/// Reasons a claim is rejected before any evaluation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClaimError {
    #[error("agente não encontrado: {0}")]
    UnknownAgent(String),

    #[error("data fim ({end}) não pode ser anterior à data início ({start})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("unidade de medida obrigatória para vibração")]
    MissingUnit,

    #[error("unidade de medida inválida: {0} (use gpm, ms2 ou ms175)")]
    InvalidUnit(String),

    #[error("campo obrigatório ausente: {0}")]
    MissingField(&'static str),

    #[error("formato de data inválido: '{0}'. Use DD/MM/AAAA")]
    InvalidDate(String),

    #[error("intensidade inválida: {0}")]
    InvalidIntensity(String),

    #[error("tipo de radiação desconhecido: {0}")]
    UnknownRadiationKind(String),
}
