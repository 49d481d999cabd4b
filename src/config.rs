//! Run and model configuration.
//!
//! The fixed tables the pipeline depends on (share-by-count table,
//! shared-effector names, label-worthy node types) live in [`ModelConfig`]
//! and are passed explicitly to the stages that read them.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::NodeType;
use crate::pipeline::allocation::ShareTable;
use crate::{Error, Result};

/// Fixed file name read by the binary from the working directory.
pub const CONFIG_FILE: &str = "defence-network.toml";

pub const DEFAULT_POLINODE_URL: &str = "https://app.polinode.com/api/v2";

/// What to do with a node whose name has no Overview rows to join against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinPolicy {
    /// Drop the node and log it.
    #[default]
    Drop,
    /// Abort with [`Error::MissingKeyJoin`].
    Fail,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub share_table: ShareTable,
    /// Names collapsed onto the `Shared effector` node type.
    pub shared_effectors: Vec<String>,
    /// Node types whose name is shown in the default network view.
    pub overview_labels: Vec<NodeType>,
    pub join_policy: JoinPolicy,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            share_table: ShareTable::default(),
            shared_effectors: vec![
                "ISR".into(),
                "GBAD".into(),
                "Munitions Procurement and Manufacture".into(),
            ],
            overview_labels: vec![
                NodeType::PrimeContractor,
                NodeType::SovereignIndustryCapability,
                NodeType::MilitaryDomain,
            ],
            join_policy: JoinPolicy::Drop,
        }
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<()> {
        self.share_table.validate()
    }
}

/// Polinode publishing target. Credentials come from the environment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub network_name: String,
    pub description: String,
    pub directed: bool,
    pub base_url: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            network_name: "National Defence".into(),
            description: "National defence capability ecosystem".into(),
            directed: true,
            base_url: DEFAULT_POLINODE_URL.into(),
        }
    }
}

/// Everything the binary needs for one run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Directory scanned for versioned input workbooks.
    pub input_dir: PathBuf,
    /// File-name fragment preceding the `(<version>)` marker.
    pub input_prefix: String,
    pub output_workbook: PathBuf,
    pub output_json: Option<PathBuf>,
    pub model: ModelConfig,
    /// Absent means "write files only".
    pub upload: Option<UploadConfig>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            input_prefix: "Overall defence capability ecosystem v.1(".into(),
            output_workbook: PathBuf::from("National Defence for Polinode.xlsx"),
            output_json: None,
            model: ModelConfig::default(),
            upload: None,
        }
    }
}

impl RunConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: RunConfig = toml::from_str(text)?;
        config.model.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(Error::Io(e)),
        }
    }
}
