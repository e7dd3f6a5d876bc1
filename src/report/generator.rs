//! Report rendering.
//!
//! A report bundles the per-sub-period results, their summary and the
//! draft. It renders as Markdown for reading, as JSON for other
//! programs, or as the bare draft text for pasting into a decision.

use super::minuta::generate_draft;
use crate::agents::format_number;
use crate::analysis::VerdictSummary;
use crate::models::{ClaimOutcome, ExposureClaim, RadiationKind, SubPeriodVerdict};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Metadata about one evaluation run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    #[serde(rename = "gerado_em")]
    pub generated_at: DateTime<Utc>,
    #[serde(rename = "versao")]
    pub version: String,
}

impl ReportMetadata {
    pub fn now() -> Self {
        Self {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// One sub-period result paired with the claim it came from.
#[derive(Debug, Clone, Serialize)]
pub struct ResultEntry<'a> {
    pub periodo_original: &'a ExposureClaim,
    pub subperiodo: &'a SubPeriodVerdict,
}

/// The complete evaluation report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(rename = "metadados")]
    pub metadata: ReportMetadata,
    #[serde(skip)]
    pub outcomes: Vec<ClaimOutcome>,
    #[serde(rename = "resumo")]
    pub summary: VerdictSummary,
    pub minuta: String,
}

impl Report {
    pub fn new(metadata: ReportMetadata, outcomes: Vec<ClaimOutcome>) -> Self {
        let summary = VerdictSummary::from_outcomes(&outcomes);
        let minuta = generate_draft(&outcomes);
        Self {
            metadata,
            outcomes,
            summary,
            minuta,
        }
    }

    /// Results flattened to one entry per sub-period, claims in input order.
    pub fn results(&self) -> Vec<ResultEntry<'_>> {
        self.outcomes
            .iter()
            .flat_map(|o| {
                o.verdicts.iter().map(move |v| ResultEntry {
                    periodo_original: &o.claim,
                    subperiodo: v,
                })
            })
            .collect()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a Report,
    resultados: Vec<ResultEntry<'a>>,
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report, pretty: bool) -> Result<String> {
    let json = JsonReport {
        report,
        resultados: report.results(),
    };
    let rendered = if pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    Ok(rendered)
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report, include_results: bool) -> String {
    let mut output = String::new();

    output.push_str("# Análise de Tempo Especial\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_summary_section(&report.summary));

    if include_results {
        output.push_str(&generate_results_section(report));
    }

    output.push_str("## Minuta\n\n");
    output.push_str(&report.minuta);

    output
}

fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "- **Gerado em:** {}\n",
        metadata.generated_at.format("%d/%m/%Y %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Versão:** {}\n\n", metadata.version));

    section
}

fn generate_summary_section(summary: &VerdictSummary) -> String {
    let mut section = String::new();

    section.push_str("## Resumo\n\n");
    section.push_str("| Períodos | Subperíodos | Especiais | Não especiais | Unidade incompatível | Dias especiais |\n");
    section.push_str("|:---:|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} | {} | {} |\n\n",
        summary.claims,
        summary.sub_periods,
        summary.special,
        summary.not_special,
        summary.unit_mismatches,
        summary.special_days
    ));

    section
}

fn generate_results_section(report: &Report) -> String {
    let mut section = String::new();

    section.push_str("## Resultados\n\n");

    let results = report.results();
    if results.is_empty() {
        section.push_str("Nenhum período informado.\n\n");
        return section;
    }

    for entry in results {
        section.push_str(&generate_result_block(entry.periodo_original, entry.subperiodo));
    }

    section
}

/// One result block per sub-period.
fn generate_result_block(claim: &ExposureClaim, verdict: &SubPeriodVerdict) -> String {
    let mut block = String::new();

    let badge = if verdict.is_special {
        "✅ **Período Especial**"
    } else {
        "❌ **Período Não Especial**"
    };

    block.push_str(&format!("### {} ({})\n\n", verdict.sub_period, badge));
    block.push_str(&format!(
        "- **Agente:** {}\n",
        capitalize(claim.agent().display_name())
    ));
    // Ionizing radiation is special at any dose, so a limit would mislead.
    if verdict.radiation_kind != Some(RadiationKind::Ionizing) {
        block.push_str(&format!(
            "- **Limite no período:** > {} {}\n",
            format_number(verdict.limit),
            verdict.unit.label()
        ));
    }
    block.push_str(&format!(
        "- **Intensidade informada:** {} {}\n",
        format_number(verdict.intensity),
        verdict.intensity_unit.label()
    ));
    if let Some(kind) = verdict.radiation_kind {
        block.push_str(&format!("- **Tipo de radiação:** {}\n", kind.label()));
    }
    if verdict.unit_mismatch {
        block.push_str("- **Unidade incompatível com a metodologia da época**\n");
    }
    block.push_str(&format!("- **Fundamento:** {}\n\n", verdict.citation));

    block
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Write rendered output to a file.
pub fn write_output(content: &str, path: &Path) -> Result<()> {
    std::fs::write(path, content)?;
    Ok(())
}
