//! Request decoding.
//!
//! Turns the `{"periodos": [...]}` payload into validated claims. A
//! request is accepted only if every claim in it is valid; the first
//! rejected claim rejects the whole request.

use crate::error::ClaimError;
use crate::models::{Agent, DateRange, ExposureClaim, RadiationKind, VibrationUnit};
use crate::period::parse_date;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Failure to decode a request.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("dados inválidos: {0}")]
    Json(#[from] serde_json::Error),

    #[error("nenhum período fornecido")]
    Empty,

    #[error("erro ao processar período {index}: {source}")]
    Claim {
        /// 1-based position of the claim in the request.
        index: usize,
        #[source]
        source: ClaimError,
    },
}

/// Wire payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub periodos: Vec<RawClaim>,
}

/// Intensity as sent by the form: a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    fn value(&self) -> Result<f64, ClaimError> {
        let value = match self {
            RawNumber::Number(n) => *n,
            RawNumber::Text(s) => s
                .trim()
                .replace(',', ".")
                .parse::<f64>()
                .map_err(|_| ClaimError::InvalidIntensity(s.clone()))?,
        };

        if !value.is_finite() || value <= 0.0 {
            return Err(ClaimError::InvalidIntensity(value.to_string()));
        }
        Ok(value)
    }
}

/// One claim as received, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawClaim {
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub agente: Option<String>,
    pub intensidade: Option<RawNumber>,
    pub unidade_medida: Option<String>,
    pub tipo_radiacao: Option<String>,
}

impl RawClaim {
    /// Validate and convert into a claim.
    pub fn into_claim(self) -> Result<ExposureClaim, ClaimError> {
        let start = self.data_inicio.ok_or(ClaimError::MissingField("data_inicio"))?;
        let end = self.data_fim.ok_or(ClaimError::MissingField("data_fim"))?;
        let agent = self.agente.ok_or(ClaimError::MissingField("agente"))?;
        let intensity = self
            .intensidade
            .ok_or(ClaimError::MissingField("intensidade"))?;

        let period = DateRange::new(parse_date(&start)?, parse_date(&end)?)?;
        let agent: Agent = agent.parse()?;
        let intensity = intensity.value()?;

        let unit = match agent {
            Agent::Vibration => Some(
                self.unidade_medida
                    .as_deref()
                    .ok_or(ClaimError::MissingUnit)?
                    .parse::<VibrationUnit>()?,
            ),
            _ => None,
        };

        let mut claim = ExposureClaim::new(agent, period, intensity, unit)?;
        if let Some(kind) = self.tipo_radiacao.filter(|_| agent == Agent::Radiation) {
            claim = claim.with_radiation_kind(kind.parse::<RadiationKind>()?);
        }

        Ok(claim)
    }
}

impl Request {
    /// Validate every claim, failing on the first rejected one.
    pub fn into_claims(self) -> Result<Vec<ExposureClaim>, InputError> {
        if self.periodos.is_empty() {
            return Err(InputError::Empty);
        }

        self.periodos
            .into_iter()
            .enumerate()
            .map(|(i, raw)| {
                raw.into_claim()
                    .map_err(|source| InputError::Claim { index: i + 1, source })
            })
            .collect()
    }
}

/// Decode and validate a JSON request.
pub fn parse_request(json: &str) -> Result<Vec<ExposureClaim>, InputError> {
    let request: Request = serde_json::from_str(json)?;
    debug!("Request with {} period(s)", request.periodos.len());
    request.into_claims()
}
