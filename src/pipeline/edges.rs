//! Edge builders: plain relationships read off two columns of a table.

use crate::model::columns::{
    EDGE_TYPE, MILITARY_CAPABILITY, MILITARY_DOMAIN, NAME, PRIME_CONTRACTOR, PROGRAM, SIC_RANKS,
    SOURCE, TARGET,
};
use crate::model::{EdgeType, Table};

/// One edge per distinct `(source, target)` pair.
///
/// Rows where either side is absent or blank text are skipped, as are rows
/// where either side is `false`, zero or `"false"`: those declare "no
/// relationship".
pub fn format_edges(table: &Table, source: &str, target: &str) -> Table {
    let edge_type = EdgeType::link(source, target);
    table.select(&[source, target])
        .filter(|row| {
            [row.get(source), row.get(target)]
                .iter()
                .all(|v| !v.is_blank() && !v.is_falsy_sentinel())
        })
        .rename(&[(source, SOURCE), (target, TARGET)])
        .drop_duplicates(None)
        .with_column(EDGE_TYPE, |_| edge_type.clone().into())
}

/// Domain → capability → program → prime from Overview, plus STaR Shot →
/// SIC for each rank.
pub fn create_edges(overview: &Table, star_shots: &Table) -> Table {
    let mut families = vec![
        format_edges(overview, MILITARY_DOMAIN, MILITARY_CAPABILITY),
        format_edges(overview, MILITARY_CAPABILITY, PROGRAM),
        format_edges(overview, PROGRAM, PRIME_CONTRACTOR),
    ];
    for (i, sic_col) in SIC_RANKS.iter().enumerate() {
        let edge_type = EdgeType::StarShotToSic { rank: i + 1 };
        families.push(
            format_edges(star_shots, NAME, sic_col)
                .with_column(EDGE_TYPE, |_| edge_type.clone().into()),
        );
    }
    Table::concat(families)
}
