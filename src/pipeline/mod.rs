//! # Network Construction Pipeline
//!
//! One synchronous pass from sheets to a formatted [`Network`]:
//!
//! 1. `nodes`: read the six node sheets, join Overview spending
//! 2. `allocation`: split program funding across declared SICs
//! 3. `edges`: plain relationship edges from Overview and STaR Shots
//! 4. `supply_chain`: per-prime domestic / overseas / SIC / ToT layers
//! 5. `format`: fill, collapse shared effectors, label, size
//!
//! Any error aborts the run. There is no partial output: spending totals
//! must reconcile exactly or not at all.

pub mod allocation;
pub mod edges;
pub mod format;
pub mod nodes;
pub mod supply_chain;

use hashbrown::HashSet;
use tracing::{info, warn};

use crate::config::ModelConfig;
use crate::model::columns::{NAME, PROGRAM, SOURCE, SPENDING, TARGET};
use crate::model::{Row, Table, Value, ValueKey};
use crate::source::SheetSource;
use crate::{Error, Result};

/// Final node and edge tables, ready for export.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Network {
    pub nodes: Table,
    pub edges: Table,
}

impl Network {
    /// Edge endpoints that name no node, as `(edge index, name)`.
    pub fn unresolved_endpoints(&self) -> Vec<(usize, String)> {
        let names: HashSet<ValueKey> = self.nodes.column(NAME).map(Value::key).collect();
        self.edges.iter().enumerate()
            .flat_map(|(i, edge)| [edge.get(SOURCE), edge.get(TARGET)].map(|v| (i, v)))
            .filter(|(_, v)| !names.contains(&v.key()))
            .map(|(i, v)| (i, v.to_string()))
            .collect()
    }
}

/// Build the national defence network from `source`.
pub fn build_national_model<S: SheetSource + ?Sized>(
    source: &S,
    config: &ModelConfig,
) -> Result<Network> {
    config.validate()?;

    let inputs = nodes::read_inputs(source, config)?;
    info!(
        nodes = inputs.nodes.len(),
        programs = inputs.overview.len(),
        sic_flows = inputs.sic_flows.len(),
        "read inputs"
    );

    let base_edges = edges::create_edges(&inputs.overview, &inputs.star_shots);
    info!(edges = base_edges.len(), "created base edges");

    let chains = supply_chain::build_supply_chains(&inputs.overview, &inputs.sic_flows)?;
    info!(nodes = chains.nodes.len(), edges = chains.edges.len(), "created prime supply chains");

    let network = format::format_network(
        Table::concat([inputs.nodes, chains.nodes]),
        Table::concat([base_edges, chains.edges]),
        config,
    );

    let unresolved = network.unresolved_endpoints();
    if !unresolved.is_empty() {
        warn!(count = unresolved.len(), first = %unresolved[0].1, "edges reference unknown nodes");
    }
    info!(nodes = network.nodes.len(), edges = network.edges.len(), "network formatted");
    Ok(network)
}

/// A fraction field in `[0, 1]`. Absent, non-numeric and out-of-range
/// values are rejected rather than carried into spending totals.
pub(crate) fn fraction(row: &Row, field: &str) -> Result<f64> {
    match row.get(field).as_float() {
        Some(f) if (0.0..=1.0).contains(&f) => Ok(f),
        _ => Err(Error::MalformedPercentage {
            field: field.to_string(),
            program: row.get(PROGRAM).to_string(),
            value: match row.get(field) {
                Value::Null => "absent".to_string(),
                v => v.to_string(),
            },
        }),
    }
}

/// Spending is never negative. The first offending cell is reported with the
/// row's program, or its name when it has none.
pub(crate) fn check_spending(table: &Table) -> Result<()> {
    for row in table {
        for field in SPENDING {
            if let Some(value) = row.get(field).as_float().filter(|v| *v < 0.0) {
                let program = match row.get(PROGRAM) {
                    Value::Null => row.get(NAME),
                    p => p,
                };
                return Err(Error::NegativeSpending {
                    field: field.to_string(),
                    program: program.to_string(),
                    value,
                });
            }
        }
    }
    Ok(())
}

/// Multiply every spending field of every row by `factor(row)`.
pub(crate) fn scale_spending(
    table: Table,
    mut factor: impl FnMut(&Row) -> Result<f64>,
) -> Result<Table> {
    table.try_update(|row| {
        let k = factor(row)?;
        for field in SPENDING {
            let amount = match row.get(field) {
                Value::Null => continue,
                v => v.as_float().ok_or_else(|| Error::TypeError {
                    expected: format!("number in {field}"),
                    got: v.type_name().into(),
                })?,
            };
            row.set(field, amount * k);
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::columns::{AIC_OF_TOTAL, TOTAL_SPENDING};

    #[test]
    fn test_fraction_bounds() {
        let ok = Row::new().with(AIC_OF_TOTAL, 0.25);
        assert_eq!(fraction(&ok, AIC_OF_TOTAL).unwrap(), 0.25);

        let whole = Row::new().with(AIC_OF_TOTAL, 1);
        assert_eq!(fraction(&whole, AIC_OF_TOTAL).unwrap(), 1.0);

        for bad in [Value::Null, Value::Float(1.2), Value::Float(-0.1), Value::from("80%")] {
            let row = Row::new().with(PROGRAM, "Project X").with(AIC_OF_TOTAL, bad);
            let err = fraction(&row, AIC_OF_TOTAL).unwrap_err();
            assert!(matches!(err, Error::MalformedPercentage { ref program, .. } if program == "Project X"));
        }
    }

    #[test]
    fn test_scale_spending_leaves_other_fields() {
        let t = Table::from_rows([Row::new().with(NAME, "p").with(TOTAL_SPENDING, 10.0).with("k", 0.5)]);
        let scaled = scale_spending(t, |r| Ok(r.get("k").as_float().unwrap_or_default())).unwrap();
        assert_eq!(scaled.rows()[0].get(TOTAL_SPENDING), &Value::Float(5.0));
        assert_eq!(scaled.rows()[0].get("k"), &Value::Float(0.5));
    }

    #[test]
    fn test_negative_spending_is_rejected() {
        let ok = Table::from_rows([Row::new().with(PROGRAM, "Hunter").with(TOTAL_SPENDING, 0.0)]);
        check_spending(&ok).unwrap();

        let bad = Table::from_rows([
            Row::new().with(PROGRAM, "Hunter").with(TOTAL_SPENDING, 3.0),
            Row::new().with(NAME, "Quantum").with("Spending 2026-30 in $B", -5.0),
        ]);
        match check_spending(&bad).unwrap_err() {
            Error::NegativeSpending { field, program, value } => {
                assert_eq!(field, "Spending 2026-30 in $B");
                assert_eq!(program, "Quantum");
                assert_eq!(value, -5.0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_unresolved_endpoints() {
        let network = Network {
            nodes: Table::from_rows([Row::new().with(NAME, "A")]),
            edges: Table::from_rows([Row::new().with(SOURCE, "A").with(TARGET, "B")]),
        };
        assert_eq!(network.unresolved_endpoints(), vec![(0, "B".to_string())]);
    }
}
