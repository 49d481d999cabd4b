//! # defence-network: Defence Ecosystem Funding Network
//!
//! Turns a workbook describing a national defence-spending ecosystem
//! (military domains, capabilities, programs, prime contractors, sovereign
//! industry capabilities, STaR shots) into a node/edge network and publishes
//! it to Polinode.
//!
//! ## Pipeline
//!
//! ```text
//! SheetSource ─► read_sheet ─► node builders ─┬─► edge builders ─► supply chains ─► formatter ─► Network
//!                              SIC allocation ─┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use defence_network::{build_national_model, ModelConfig, MemorySource};
//!
//! # fn example(source: MemorySource) -> defence_network::Result<()> {
//! let network = build_national_model(&source, &ModelConfig::default())?;
//! let doc = defence_network::export::network_document(&network)?;
//! println!("{} nodes, {} edges", doc.nodes.len(), doc.edges.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `xlsx` | Read the input workbook and write the output workbook |
//! | `upload` | Publish to Polinode over HTTPS |

// ============================================================================
// Modules
// ============================================================================

pub mod config;
pub mod export;
pub mod model;
pub mod pipeline;
pub mod source;
pub mod upload;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{JoinPolicy, ModelConfig, RunConfig, UploadConfig};
pub use model::{EdgeType, NodeType, Row, Table, Value};
pub use pipeline::{build_national_model, Network};
pub use pipeline::allocation::ShareTable;
pub use source::{find_latest_input_file, read_sheet, MemorySource, SheetSource};
pub use upload::{publish, MemoryService, NetworkService, PublishOutcome, PublishRequest};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Sheet not found: {sheet}")]
    SheetNotFound { sheet: String },

    #[error("Malformed row {row} in sheet {sheet}: {message}")]
    MalformedRow { sheet: String, row: usize, message: String },

    #[error("No Overview rows for {node_type} entities: {}", names.join(", "))]
    MissingKeyJoin { node_type: String, names: Vec<String> },

    #[error("Malformed percentage in {field} for {program}: {value} (expected a fraction in [0, 1])")]
    MalformedPercentage { field: String, program: String, value: String },

    #[error("Negative spending in {field} for {program}: {value}")]
    NegativeSpending { field: String, program: String, value: f64 },

    #[error("Type error: expected {expected}, got {got}")]
    TypeError { expected: String, got: String },

    #[error("Upload failed: {0}")]
    UploadConflict(String),

    #[error("Input not found: {0}")]
    InputNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
