//! Network formatter: the last pass before export.
//!
//! Running it on its own output changes nothing.

use super::Network;
use crate::config::ModelConfig;
use crate::model::columns::{
    DESCRIPTION, LABEL, NAME, NODE_TYPE, PRIME_CONTRACTOR, SIC_RANKS, SIZE, SOURCE, SPENDING, TARGET,
    TOTAL_SPENDING, WEIGHT,
};
use crate::model::{NodeType, Table, Value};

/// Shown instead of a name for nodes outside the label set.
pub const BLANK_LABEL: &str = " ";

const EDGE_HELPER_COLUMNS: [&str; 4] = [NODE_TYPE, NAME, DESCRIPTION, PRIME_CONTRACTOR];

pub fn format_network(nodes: Table, edges: Table, config: &ModelConfig) -> Network {
    let empty = Value::from("");

    // 1. fill gaps
    let nodes = nodes
        .fill_null(Some(SPENDING.as_slice()), &Value::Float(0.0))
        .fill_null(None, &empty)
        .fill_null(Some(&[NAME, NODE_TYPE][..]), &empty);
    let edges = edges.fill_null(None, &empty);

    // 2. collapse shared effectors onto one node
    let is_shared = |name: &Value| {
        name.as_str().is_some_and(|n| config.shared_effectors.iter().any(|s| s == n))
    };
    let nodes = nodes
        .with_column(NODE_TYPE, |row| {
            if is_shared(row.get(NAME)) {
                NodeType::SharedEffector.into()
            } else {
                row.get(NODE_TYPE).clone()
            }
        })
        .drop_duplicates(Some(&[NAME, NODE_TYPE][..]));

    // 3. overview labels
    let nodes = nodes.with_column(LABEL, |row| {
        let labelled = row.get(NODE_TYPE).as_str()
            .and_then(NodeType::parse)
            .is_some_and(|t| config.overview_labels.contains(&t));
        if labelled { row.get(NAME).clone() } else { Value::from(BLANK_LABEL) }
    });

    // 4. helper columns
    let mut node_helpers = SIC_RANKS.to_vec();
    node_helpers.extend([SOURCE, TARGET]);
    let nodes = nodes.drop_columns(&node_helpers);
    let edges = edges.drop_columns(&EDGE_HELPER_COLUMNS);

    // 5. visual weights
    let nodes = nodes.with_column(SIZE, |row| row.get(TOTAL_SPENDING).clone());
    let edges = edges.with_column(WEIGHT, |row| match row.get(TOTAL_SPENDING) {
        Value::Null => empty.clone(),
        spent => spent.clone(),
    });

    Network { nodes, edges }
}
