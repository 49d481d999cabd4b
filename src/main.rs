//! Build the national defence network from the newest input workbook, write
//! it out, and publish it to Polinode when an `[upload]` section is
//! configured.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use defence_network::config::CONFIG_FILE;
use defence_network::export::{network_document, write_json, write_workbook};
use defence_network::source::XlsxSource;
use defence_network::upload::{Credentials, PolinodeClient};
use defence_network::{build_national_model, find_latest_input_file, publish, PublishRequest, RunConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("defence_network=info")),
        )
        .init();

    let config = RunConfig::load_or_default(Path::new(CONFIG_FILE))
        .with_context(|| format!("loading {CONFIG_FILE}"))?;

    let input = find_latest_input_file(&config.input_dir, &config.input_prefix)?;
    let source = XlsxSource::open(&input)?;
    let network = build_national_model(&source, &config.model)
        .with_context(|| format!("building network from {}", input.display()))?;

    write_workbook(&network, &config.output_workbook)?;
    info!(path = %config.output_workbook.display(), "wrote network workbook");

    if let Some(path) = &config.output_json {
        let mut writer = BufWriter::new(File::create(path)?);
        write_json(&network, &mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), "wrote network JSON");
    }

    let Some(upload) = &config.upload else {
        return Ok(());
    };
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            warn!(error = %e, "skipping upload");
            return Ok(());
        }
    };

    let client = PolinodeClient::new(&upload.base_url, credentials)?;
    let request = PublishRequest {
        name: upload.network_name.clone(),
        description: upload.description.clone(),
        directed: upload.directed,
        document: network_document(&network)?,
    };
    let outcome = publish(&client, &request).await.context("publishing to Polinode")?;
    info!(?outcome, "publish finished");
    Ok(())
}
