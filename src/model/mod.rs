//! # Network Model
//!
//! Plain data types that every pipeline stage passes to the next:
//! cell values, rows, tables, and the closed vocabularies of node and
//! edge types.
//!
//! Design rule: no I/O here. Sheet loading lives in `source`, writing and
//! uploading live in `export` and `upload`.

pub mod columns;
pub mod node;
pub mod relationship;
pub mod row;
pub mod table;
pub mod value;

pub use node::NodeType;
pub use relationship::EdgeType;
pub use row::Row;
pub use table::Table;
pub use value::{Value, ValueKey};
