//! Node types in the defence network.

use serde::{Deserialize, Serialize};

use super::Value;

/// Every value the `Node Type` field can take.
///
/// The six primary types double as the workbook sheet names they are read
/// from; the rest are synthesized by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    #[serde(rename = "Military Domain")]
    MilitaryDomain,
    #[serde(rename = "Military Capability")]
    MilitaryCapability,
    #[serde(rename = "Program, Platform or System")]
    Program,
    #[serde(rename = "Prime Contractor")]
    PrimeContractor,
    #[serde(rename = "Sovereign Industry Capability")]
    SovereignIndustryCapability,
    #[serde(rename = "DSTG STaR Shot")]
    StarShot,
    #[serde(rename = "Australian supply chain (AIC)")]
    AustralianSupplyChain,
    #[serde(rename = "Overseas supply chain")]
    OverseasSupplyChain,
    #[serde(rename = "Prime commitments to SIC")]
    PrimeSicCommitments,
    #[serde(rename = "Prime commitments to ToT")]
    PrimeTotCommitments,
    #[serde(rename = "Shared effector")]
    SharedEffector,
}

impl NodeType {
    pub const ALL: [NodeType; 11] = [
        NodeType::MilitaryDomain,
        NodeType::MilitaryCapability,
        NodeType::Program,
        NodeType::PrimeContractor,
        NodeType::SovereignIndustryCapability,
        NodeType::StarShot,
        NodeType::AustralianSupplyChain,
        NodeType::OverseasSupplyChain,
        NodeType::PrimeSicCommitments,
        NodeType::PrimeTotCommitments,
        NodeType::SharedEffector,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::MilitaryDomain => "Military Domain",
            NodeType::MilitaryCapability => "Military Capability",
            NodeType::Program => "Program, Platform or System",
            NodeType::PrimeContractor => "Prime Contractor",
            NodeType::SovereignIndustryCapability => "Sovereign Industry Capability",
            NodeType::StarShot => "DSTG STaR Shot",
            NodeType::AustralianSupplyChain => "Australian supply chain (AIC)",
            NodeType::OverseasSupplyChain => "Overseas supply chain",
            NodeType::PrimeSicCommitments => "Prime commitments to SIC",
            NodeType::PrimeTotCommitments => "Prime commitments to ToT",
            NodeType::SharedEffector => "Shared effector",
        }
    }

    pub fn parse(label: &str) -> Option<NodeType> {
        Self::ALL.into_iter().find(|t| t.as_str() == label)
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<NodeType> for Value {
    fn from(t: NodeType) -> Self {
        Value::from(t.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_parse() {
        for t in NodeType::ALL {
            assert_eq!(NodeType::parse(t.as_str()), Some(t));
        }
        assert_eq!(NodeType::parse("Submarine"), None);
    }

    #[test]
    fn test_serde_uses_sheet_labels() {
        let json = serde_json::to_string(&NodeType::StarShot).unwrap();
        assert_eq!(json, "\"DSTG STaR Shot\"");
    }
}
