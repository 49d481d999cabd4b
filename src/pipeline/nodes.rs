//! Node builders: one table per primary node type, concatenated.

use hashbrown::HashSet;
use tracing::{debug, warn};

use super::allocation::allocate_sic_funding;
use super::check_spending;
use crate::config::{JoinPolicy, ModelConfig};
use crate::model::columns::{
    DESCRIPTION, MILITARY_CAPABILITY, MILITARY_DOMAIN, NAME, NODE_TYPE, OVERVIEW_SHEET,
    PRIME_CONTRACTOR, PRODUCT_NUMBER, PROGRAM, PROGRAM_NUMBER, SIC, SPENDING,
};
use crate::model::{NodeType, Table, Value, ValueKey};
use crate::source::{read_sheet, SheetSource};
use crate::{Error, Result};

/// Everything later stages need from the workbook.
#[derive(Debug, Clone)]
pub struct Inputs {
    /// All primary nodes.
    pub nodes: Table,
    pub overview: Table,
    pub star_shots: Table,
    /// `(SIC, Prime Contractor)` funding from the allocation engine.
    pub sic_flows: Table,
}

pub fn read_inputs<S: SheetSource + ?Sized>(source: &S, config: &ModelConfig) -> Result<Inputs> {
    let overview = read_sheet(source, OVERVIEW_SHEET, &SPENDING)?;
    check_spending(&overview)?;
    let policy = config.join_policy;

    let domains = read_nodes(source, NodeType::MilitaryDomain)?
        .with_column(MILITARY_DOMAIN, |row| row.get(NAME).clone());
    let domains = add_spending(NodeType::MilitaryDomain, MILITARY_DOMAIN, domains, &overview, policy)?;

    let capabilities = read_nodes(source, NodeType::MilitaryCapability)?;
    let capabilities = add_spending(NodeType::MilitaryCapability, MILITARY_CAPABILITY, capabilities, &overview, policy)?;

    let programs = program_nodes(&overview);

    let primes = read_nodes(source, NodeType::PrimeContractor)?;
    let primes = add_spending(NodeType::PrimeContractor, PRIME_CONTRACTOR, primes, &overview, policy)?;

    let sic_flows = allocate_sic_funding(&overview, &config.share_table)?;
    let sic_totals = sic_flows.group_sum(&[SIC], &SPENDING)?;
    let sics = read_nodes(source, NodeType::SovereignIndustryCapability)?;
    let sics = join_spending(NodeType::SovereignIndustryCapability, sics, &sic_totals, SIC, policy)?;

    let star_shots = read_nodes(source, NodeType::StarShot)?;

    let nodes = Table::concat([
        domains,
        capabilities,
        programs,
        primes,
        sics,
        star_shots.clone(),
    ]);
    Ok(Inputs { nodes, overview, star_shots, sic_flows })
}

/// Read the sheet named after `node_type` and tag every row with it.
/// Rows without a name (blank lines, notes) are skipped.
pub fn read_nodes<S: SheetSource + ?Sized>(source: &S, node_type: NodeType) -> Result<Table> {
    let sheet = read_sheet(source, node_type.as_str(), &SPENDING)?;
    let total = sheet.len();
    let nodes = sheet
        .filter(|row| !row.get(NAME).is_blank())
        .with_column(NODE_TYPE, |_| node_type.into());
    check_spending(&nodes)?;
    if nodes.len() < total {
        debug!(%node_type, skipped = total - nodes.len(), "skipped unnamed rows");
    }
    debug!(%node_type, rows = nodes.len(), "read nodes");
    Ok(nodes)
}

/// Sum Overview spending by `key` and join it onto `nodes` by name.
pub fn add_spending(
    node_type: NodeType,
    key: &str,
    nodes: Table,
    overview: &Table,
    policy: JoinPolicy,
) -> Result<Table> {
    let totals = overview.group_sum(&[key], &SPENDING)?;
    join_spending(node_type, nodes, &totals, key, policy)
}

/// Inner join on `Name = key`. Nodes with no spending rows vanish rather
/// than appearing with zero spend; `policy` decides whether that is an error.
fn join_spending(
    node_type: NodeType,
    nodes: Table,
    totals: &Table,
    key: &str,
    policy: JoinPolicy,
) -> Result<Table> {
    let joined = nodes.inner_join(totals, NAME, key);
    if joined.len() < nodes.len() {
        let known: HashSet<ValueKey> = totals.column(key).map(Value::key).collect();
        let names: Vec<String> = nodes.column(NAME)
            .filter(|name| !known.contains(&name.key()))
            .map(|name| name.to_string())
            .collect();
        match policy {
            JoinPolicy::Drop => warn!(%node_type, dropped = ?names, "nodes without Overview spending dropped"),
            JoinPolicy::Fail => {
                return Err(Error::MissingKeyJoin { node_type: node_type.to_string(), names });
            }
        }
    }
    Ok(joined)
}

/// Programs come straight from Overview rather than their own sheet.
pub fn program_nodes(overview: &Table) -> Table {
    let mut columns = vec![PROGRAM];
    columns.extend(SPENDING);
    columns.extend([MILITARY_DOMAIN, PRODUCT_NUMBER, PROGRAM_NUMBER]);

    overview.select(&columns)
        .filter(|row| !row.get(PROGRAM).is_null())
        .with_column(NODE_TYPE, |_| NodeType::Program.into())
        .with_column(NAME, |row| row.get(PROGRAM).clone())
        .rename(&[(PROGRAM, DESCRIPTION)])
        .drop_duplicates(Some(&[NAME][..]))
}
