//! The built-in rule table.

use super::{decree_2172_effective, decree_4882_effective, ordinance_1297_effective, Rule};
use crate::models::{Agent, Unit};
use chrono::NaiveDate;
use serde::Serialize;

/// Rules of one agent: a baseline plus amendments in effective-date order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentRules {
    baseline: Rule,
    amendments: Vec<Rule>,
}

impl AgentRules {
    /// Rules starting from `baseline`, which is in force from the earliest
    /// representable date.
    pub fn new(baseline: Rule) -> Self {
        Self {
            baseline: Rule {
                effective_from: NaiveDate::MIN,
                ..baseline
            },
            amendments: Vec::new(),
        }
    }

    /// Append an amendment. Amendments are kept sorted by effective date.
    pub fn amended(mut self, rule: Rule) -> Self {
        let at = self
            .amendments
            .partition_point(|r| r.effective_from <= rule.effective_from);
        self.amendments.insert(at, rule);
        self
    }

    /// The rule in force on `date`.
    pub fn rule_for(&self, date: NaiveDate) -> &Rule {
        let idx = self
            .amendments
            .partition_point(|r| r.effective_from <= date);
        match idx {
            0 => &self.baseline,
            n => &self.amendments[n - 1],
        }
    }

    /// Dates at which the applicable rule changes.
    pub fn cutovers(&self) -> Vec<NaiveDate> {
        self.amendments.iter().map(|r| r.effective_from).collect()
    }

    /// All rules, baseline first.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        std::iter::once(&self.baseline).chain(self.amendments.iter())
    }
}

/// Read-only lookup of the rule in force for an agent on a date.
///
/// Built once and shared by reference; nothing mutates it after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleTable {
    noise: AgentRules,
    vibration: AgentRules,
    chemicals: AgentRules,
    heat: AgentRules,
    radiation: AgentRules,
    electricity: AgentRules,
}

impl RuleTable {
    /// The regulatory history encoded in this crate.
    pub fn standard() -> Self {
        let noise = AgentRules::new(Rule::new(
            NaiveDate::MIN,
            80.0,
            Unit::DecibelA,
            "código 1.1.6 do Anexo do Decreto Federal nº 53.831/1964",
        ))
        .amended(Rule::new(
            decree_2172_effective(),
            90.0,
            Unit::DecibelA,
            "código 2.0.1 do Anexo IV do Decreto Federal nº 2.172/1997 e do Decreto \
             Federal nº 3.048/1999 (redação original)",
        ))
        .amended(Rule::new(
            decree_4882_effective(),
            85.0,
            Unit::DecibelA,
            "código 2.0.1 do Anexo IV do Decreto Federal nº 3.048/1999, com redação dada \
             pelo Decreto Federal nº 4.882/2003",
        ));

        let vibration = AgentRules::new(Rule::per_unit(
            NaiveDate::MIN,
            &[(Unit::BlowsPerMinute, 120.0)],
            "código 1.1.5 do Anexo do Decreto Federal nº 53.831/1964",
        ))
        .amended(Rule::per_unit(
            decree_2172_effective(),
            &[(Unit::Aren, 0.86)],
            "código 2.0.2 do Anexo IV do Decreto Federal nº 2.172/1997 e do Decreto \
             Federal nº 3.048/1999, c/c a norma ISO 2631",
        ))
        .amended(Rule::per_unit(
            ordinance_1297_effective(),
            &[(Unit::Aren, 1.1), (Unit::Vdvr, 21.0)],
            "código 2.0.2 do Anexo IV do Decreto Federal nº 3.048/1999, c/c o Anexo 8 da \
             NR-15 (Portaria MTE nº 1.297/2014)",
        ));

        let chemicals = AgentRules::new(Rule::new(
            NaiveDate::MIN,
            0.0,
            Unit::Ppm,
            "código 1.0.0 do Anexo IV do Decreto Federal nº 3.048/1999",
        ));

        let heat = AgentRules::new(Rule::new(
            NaiveDate::MIN,
            25.0,
            Unit::Ibutg,
            "código 1.1.1 do Anexo do Decreto Federal nº 53.831/1964",
        ));

        let radiation = AgentRules::new(Rule::new(
            NaiveDate::MIN,
            0.0,
            Unit::MilliSievert,
            "código 1.1.3 do Anexo do Decreto Federal nº 53.831/1964",
        ))
        .amended(Rule::new(
            decree_2172_effective(),
            0.0,
            Unit::MilliSievert,
            "código 2.0.3 do Anexo IV do Decreto Federal nº 2.172/1997 e do Decreto \
             Federal nº 3.048/1999",
        ));

        let electricity = AgentRules::new(Rule::new(
            NaiveDate::MIN,
            250.0,
            Unit::Volt,
            "código 1.1.8 do Anexo do Decreto Federal nº 53.831/1964",
        ))
        .amended(Rule::new(
            decree_2172_effective(),
            250.0,
            Unit::Volt,
            "art. 1º da Lei nº 7.369/1985, conforme o Tema 534 do Superior Tribunal de \
             Justiça",
        ));

        Self {
            noise,
            vibration,
            chemicals,
            heat,
            radiation,
            electricity,
        }
    }

    /// Rules of one agent.
    pub fn agent(&self, agent: Agent) -> &AgentRules {
        match agent {
            Agent::Noise => &self.noise,
            Agent::Vibration => &self.vibration,
            Agent::Chemicals => &self.chemicals,
            Agent::Heat => &self.heat,
            Agent::Radiation => &self.radiation,
            Agent::Electricity => &self.electricity,
        }
    }

    /// The rule in force for `agent` on `date`.
    pub fn rule_for(&self, agent: Agent, date: NaiveDate) -> &Rule {
        self.agent(agent).rule_for(date)
    }

    /// Dates at which the rule for `agent` changes.
    pub fn cutovers(&self, agent: Agent) -> Vec<NaiveDate> {
        self.agent(agent).cutovers()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}
