//! Field names shared across sheets, pipeline stages and outputs.

pub const NAME: &str = "Name";
pub const NODE_TYPE: &str = "Node Type";
pub const DESCRIPTION: &str = "Description";
pub const SOURCE: &str = "Source";
pub const TARGET: &str = "Target";
pub const EDGE_TYPE: &str = "Edge Type";
pub const LABEL: &str = "Defence Overview Label";
pub const SIZE: &str = "Size";
pub const WEIGHT: &str = "Weight";

// Overview entity columns
pub const MILITARY_DOMAIN: &str = "Military Domain";
pub const MILITARY_CAPABILITY: &str = "Military Capability";
pub const PROGRAM: &str = "Program, Platform or System";
pub const PRIME_CONTRACTOR: &str = "Prime Contractor";
pub const PRODUCT_NUMBER: &str = "Product Number (Generally a Sustainment Activity)";
pub const PROGRAM_NUMBER: &str = "Program Number (Generally an Acquisition Activity)";

/// Ranked SIC declarations on Overview and STaR Shot rows.
pub const SIC_RANKS: [&str; 3] = ["SIC 1", "SIC 2", "SIC 3"];
/// Rank-neutral SIC name used by allocation output.
pub const SIC: &str = "SIC";

// Percentage fields, all fractions in [0, 1]
pub const AIC_OF_TOTAL: &str = "AIC as % of Total";
pub const SIC_OF_AIC: &str = "SIC as % of AIC";
pub const TOT_OF_TOTAL: &str = "ToT as % of Total";
pub const FOREIGN_OF_TOTAL: &str = "Foreign as % of Total";
pub const SIC_OF_TOTAL: &str = "SIC as % of Total";

pub const OVERVIEW_SHEET: &str = "Overview";

pub const TOTAL_SPENDING: &str = "Total spending in $B";

/// Total followed by the four time bands. Absent values in these fields are
/// zero, never anything else.
pub const SPENDING: [&str; 5] = [
    TOTAL_SPENDING,
    "Spending 2021-25 in $B",
    "Spending 2026-30 in $B",
    "Spending 2031-35 in $B",
    "Spending 2036-40 in $B",
];
