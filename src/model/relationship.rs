//! Edge-type labels.

use super::Value;

/// The `Edge Type` of every derived edge family.
///
/// Plain links between two Overview columns use [`EdgeType::Link`], whose
/// label names both columns; everything else has a fixed label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeType {
    Link { source: String, target: String },
    StarShotToSic { rank: usize },
    FundsInAustralia,
    FundsOverseas,
    AusChainToSic,
    OverseasChainToSicViaTot,
    PrimeToSic,
}

/// Ordinal words for SIC ranks 1..=3.
const RANK_WORDS: [&str; 3] = ["primary", "secondary", "tertiary"];

impl EdgeType {
    pub fn link(source: &str, target: &str) -> Self {
        EdgeType::Link { source: source.to_string(), target: target.to_string() }
    }

    pub fn label(&self) -> String {
        match self {
            EdgeType::Link { source, target } => format!("Link from {source} to {target}"),
            EdgeType::StarShotToSic { rank } => {
                let word = RANK_WORDS.get(rank.saturating_sub(1)).copied().unwrap_or("ranked");
                format!("Link from STaR Shot to {word} SIC")
            }
            EdgeType::FundsInAustralia => "Funds spent in Australia".into(),
            EdgeType::FundsOverseas => "Funds deployed overseas".into(),
            EdgeType::AusChainToSic => "Funds deployed against SIC from Aus supply chain".into(),
            EdgeType::OverseasChainToSicViaTot => "Funds deployed against SIC from Overseas via ToT".into(),
            EdgeType::PrimeToSic => "Prime commitments to a particular SIC".into(),
        }
    }
}

impl From<EdgeType> for Value {
    fn from(t: EdgeType) -> Self {
        Value::String(t.label())
    }
}
