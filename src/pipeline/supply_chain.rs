//! Prime supply-chain layers.
//!
//! For every prime contractor `X`:
//!
//! ```text
//!   X ──► Australian supply chain for X ──► SIC commitments for X ──► <SIC>
//!   X ──► Overseas supply chain for X ──(ToT)──┘
//! ```
//!
//! Each layer scales every program's spending by one fraction of its total
//! and re-aggregates by contractor.

use tracing::debug;

use super::{fraction, scale_spending};
use crate::model::columns::{
    AIC_OF_TOTAL, DESCRIPTION, EDGE_TYPE, FOREIGN_OF_TOTAL, NAME, NODE_TYPE, PRIME_CONTRACTOR,
    SIC, SIC_OF_AIC, SIC_OF_TOTAL, SOURCE, SPENDING, TARGET, TOT_OF_TOTAL,
};
use crate::model::{EdgeType, NodeType, Row, Table, Value};
use crate::Result;

/// Which slice of a program's spending a layer carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Share {
    /// `AIC as % of Total`
    Domestic,
    /// `1 − AIC as % of Total`
    Overseas,
    /// `AIC as % of Total × SIC as % of AIC`
    SicOfTotal,
    /// `ToT as % of Total`
    TransferOfTechnology,
}

impl Share {
    pub fn field(self) -> &'static str {
        match self {
            Share::Domestic => AIC_OF_TOTAL,
            Share::Overseas => FOREIGN_OF_TOTAL,
            Share::SicOfTotal => SIC_OF_TOTAL,
            Share::TransferOfTechnology => TOT_OF_TOTAL,
        }
    }

    pub fn of(self, row: &Row) -> Result<f64> {
        Ok(match self {
            Share::Domestic => fraction(row, AIC_OF_TOTAL)?,
            Share::Overseas => 1.0 - fraction(row, AIC_OF_TOTAL)?,
            Share::SicOfTotal => fraction(row, AIC_OF_TOTAL)? * fraction(row, SIC_OF_AIC)?,
            Share::TransferOfTechnology => fraction(row, TOT_OF_TOTAL)?,
        })
    }
}

pub fn australian_chain(prime: &str) -> String {
    format!("Australian supply chain for {prime}")
}

pub fn overseas_chain(prime: &str) -> String {
    format!("Overseas supply chain for {prime}")
}

pub fn sic_commitments(prime: &str) -> String {
    format!("SIC commitments for {prime}")
}

pub fn tot_commitments(prime: &str) -> String {
    format!("ToT commitments for {prime}")
}

/// Derived nodes and edges for every prime contractor.
#[derive(Debug, Clone, Default)]
pub struct SupplyChain {
    /// Domestic, overseas and SIC-commitment nodes.
    pub nodes: Table,
    pub edges: Table,
    /// ToT commitment rows. Their edges are in `edges`; the rows themselves
    /// are not part of `nodes`.
    pub tot_commitments: Table,
}

/// Spending per prime contractor, scaled row by row by `share`.
pub fn prime_flows(overview: &Table, share: Share) -> Result<Table> {
    let contributing = overview.clone().filter(|row| !row.get(PRIME_CONTRACTOR).is_null());
    let flows = scale_spending(contributing, |row| share.of(row))?
        .group_sum(&[PRIME_CONTRACTOR], &SPENDING)?;
    debug!(field = share.field(), primes = flows.len(), "prime flows");
    Ok(flows)
}

pub fn build_supply_chains(overview: &Table, sic_flows: &Table) -> Result<SupplyChain> {
    let domestic = prime_flows(overview, Share::Domestic)?
        .with_column(NAME, |r| australian_chain(&prime(r)).into())
        .with_column(DESCRIPTION, |r| format!("{} Australian supply chain (AIC)", prime(r)).into())
        .with_column(NODE_TYPE, |_| NodeType::AustralianSupplyChain.into());

    let overseas = prime_flows(overview, Share::Overseas)?
        .with_column(NAME, |r| overseas_chain(&prime(r)).into())
        .with_column(DESCRIPTION, |r| format!("{} Overseas supply chain", prime(r)).into())
        .with_column(NODE_TYPE, |_| NodeType::OverseasSupplyChain.into());

    let tot = prime_flows(overview, Share::TransferOfTechnology)?
        .with_column(NAME, |r| tot_commitments(&prime(r)).into())
        .with_column(DESCRIPTION, |r| format!("Transfers of technology facilitated by {}", prime(r)).into())
        .with_column(NODE_TYPE, |_| NodeType::PrimeTotCommitments.into())
        .with_column(SOURCE, |r| overseas_chain(&prime(r)).into())
        .with_column(TARGET, |r| sic_commitments(&prime(r)).into());

    let sic = prime_flows(overview, Share::SicOfTotal)?
        .with_column(NAME, |r| sic_commitments(&prime(r)).into())
        .with_column(DESCRIPTION, |r| format!("SIC facilitated by {} inc. ToT", prime(r)).into())
        .with_column(NODE_TYPE, |_| NodeType::PrimeSicCommitments.into())
        .with_column(SOURCE, |r| australian_chain(&prime(r)).into());

    let nodes = Table::concat([domestic.clone(), overseas.clone(), sic.clone()]);

    let domestic_edges = domestic
        .with_column(EDGE_TYPE, |_| EdgeType::FundsInAustralia.into())
        .with_column(DESCRIPTION, |r| format!("Funds deployed in Australia by {}", prime(r)).into())
        .rename(&[(PRIME_CONTRACTOR, SOURCE), (NAME, TARGET)]);

    let overseas_edges = overseas
        .with_column(EDGE_TYPE, |_| EdgeType::FundsOverseas.into())
        .with_column(DESCRIPTION, |r| format!("Funds deployed overseas by {}", prime(r)).into())
        .rename(&[(PRIME_CONTRACTOR, SOURCE), (NAME, TARGET)]);

    let sic_edges = sic
        .with_column(EDGE_TYPE, |_| EdgeType::AusChainToSic.into())
        .with_column(DESCRIPTION, |r| format!("Funds deployed for SIC by {}", prime(r)).into())
        .rename(&[(NAME, TARGET)]);

    let tot_edges = tot.clone()
        .with_column(EDGE_TYPE, |_| EdgeType::OverseasChainToSicViaTot.into())
        .with_column(DESCRIPTION, |r| format!("Funds deployed for ToT by {}", prime(r)).into());

    let prime_sic_edges = sic_flows.clone()
        .with_column(SOURCE, |r| sic_commitments(&prime(r)).into())
        .rename(&[(SIC, TARGET)])
        .with_column(EDGE_TYPE, |_| EdgeType::PrimeToSic.into());

    let edges = Table::concat([domestic_edges, overseas_edges, sic_edges, tot_edges, prime_sic_edges]);
    Ok(SupplyChain { nodes, edges, tot_commitments: tot })
}

fn prime(row: &Row) -> String {
    match row.get(PRIME_CONTRACTOR) {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
