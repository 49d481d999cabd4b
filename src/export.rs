//! Network export: the Polinode JSON document and the output workbook.
//!
//! ```text
//! Network ─► network_document() ─► { nodes: [{id, attributes}],
//!                                    edges: [{id, source, target, attributes}] }
//!         ─► write_workbook()   ─► Nodes / Edges worksheets
//! ```
//!
//! A node's `id` is its `Name`. Edge ids are assigned in table order,
//! starting at zero; `Source` and `Target` move out of the edge attributes.

use std::io::Write;
#[cfg(feature = "xlsx")]
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::model::columns::{NAME, SOURCE, TARGET};
#[cfg(feature = "xlsx")]
use crate::model::Table;
use crate::model::{Row, Value, ValueKey};
use crate::pipeline::Network;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeEntry {
    pub id: Value,
    pub attributes: Row,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeEntry {
    pub id: usize,
    pub source: Value,
    pub target: Value,
    pub attributes: Row,
}

/// The `networkJSON` body Polinode accepts.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NetworkDocument {
    pub nodes: Vec<NodeEntry>,
    pub edges: Vec<EdgeEntry>,
}

/// Convert a formatted network into its Polinode document.
///
/// Fails when a node has no name or an edge is missing an endpoint: the
/// service would reject either.
pub fn network_document(network: &Network) -> Result<NetworkDocument> {
    let mut seen = hashbrown::HashSet::new();
    let mut nodes = Vec::with_capacity(network.nodes.len());
    for (i, row) in network.nodes.iter().enumerate() {
        let id = endpoint(row, NAME, "node", i)?;
        if !seen.insert(id.key()) {
            warn!(node = %id, "duplicate node id in export");
        }
        nodes.push(NodeEntry { id, attributes: row.clone() });
    }

    let mut edges = Vec::with_capacity(network.edges.len());
    for (id, row) in network.edges.iter().enumerate() {
        let source = endpoint(row, SOURCE, "edge", id)?;
        let target = endpoint(row, TARGET, "edge", id)?;
        let mut attributes = row.clone();
        attributes.remove(SOURCE);
        attributes.remove(TARGET);
        edges.push(EdgeEntry { id, source, target, attributes });
    }

    debug!(nodes = nodes.len(), edges = edges.len(), "built network document");
    Ok(NetworkDocument { nodes, edges })
}

fn endpoint(row: &Row, field: &str, kind: &str, index: usize) -> Result<Value> {
    match row.get(field) {
        Value::Null => Err(Error::TypeError {
            expected: format!("{field} on {kind} {index}"),
            got: Value::Null.type_name().into(),
        }),
        Value::String(s) if s.is_empty() => Err(Error::TypeError {
            expected: format!("{field} on {kind} {index}"),
            got: "empty STRING".into(),
        }),
        v => Ok(v.clone()),
    }
}

/// Pretty-printed Polinode document. The writer is flushed before returning.
pub fn write_json(network: &Network, writer: &mut dyn Write) -> Result<()> {
    let doc = network_document(network)?;
    serde_json::to_writer_pretty(&mut *writer, &doc)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Check that the document's identity keys line up: every edge endpoint is
/// some node's id. Returns the dangling ones.
pub fn dangling_endpoints(doc: &NetworkDocument) -> Vec<(usize, Value)> {
    let ids: hashbrown::HashSet<ValueKey> = doc.nodes.iter().map(|n| n.id.key()).collect();
    doc.edges.iter()
        .flat_map(|e| [(e.id, &e.source), (e.id, &e.target)])
        .filter(|(_, v)| !ids.contains(&v.key()))
        .map(|(id, v)| (id, v.clone()))
        .collect()
}

// ============================================================================
// Workbook
// ============================================================================

/// Write `Nodes` and `Edges` worksheets, header row first, in table column
/// order.
#[cfg(feature = "xlsx")]
pub fn write_workbook(network: &Network, path: impl AsRef<Path>) -> Result<()> {
    use rust_xlsxwriter::Workbook;

    let path = path.as_ref();
    let mut workbook = Workbook::new();
    write_sheet(&mut workbook, "Nodes", &network.nodes)?;
    write_sheet(&mut workbook, "Edges", &network.edges)?;
    workbook.save(path).map_err(xlsx_error)?;
    debug!(path = %path.display(), "wrote workbook");
    Ok(())
}

#[cfg(feature = "xlsx")]
fn write_sheet(workbook: &mut rust_xlsxwriter::Workbook, name: &str, table: &Table) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(name).map_err(xlsx_error)?;

    for (col, header) in table.columns().iter().enumerate() {
        sheet.write_string(0, cell_col(col)?, header).map_err(xlsx_error)?;
    }
    for (r, row) in table.iter().enumerate() {
        let r = u32::try_from(r + 1).map_err(|_| Error::Spreadsheet(format!("{name}: too many rows")))?;
        for (col, header) in table.columns().iter().enumerate() {
            let col = cell_col(col)?;
            match row.get(header) {
                Value::Null => continue,
                Value::Bool(b) => sheet.write_boolean(r, col, *b),
                Value::Int(i) => sheet.write_number(r, col, *i as f64),
                Value::Float(f) => sheet.write_number(r, col, *f),
                Value::String(s) => sheet.write_string(r, col, s),
            }
            .map_err(xlsx_error)?;
        }
    }
    Ok(())
}

#[cfg(feature = "xlsx")]
fn cell_col(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| Error::Spreadsheet(format!("column {col} out of range")))
}

#[cfg(feature = "xlsx")]
fn xlsx_error(e: rust_xlsxwriter::XlsxError) -> Error {
    Error::Spreadsheet(e.to_string())
}
