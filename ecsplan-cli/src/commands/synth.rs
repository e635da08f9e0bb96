use anyhow::{bail, Context, Result};

use crate::cli::ParameterArgs;
use crate::config;

/// Derive the topology and print the full specification graph.
pub fn run(params: &ParameterArgs, output: &str) -> Result<()> {
    let raw = config::load_parameters(params)?;
    let graph = ecsplan_topology::derive_topology(&raw)?;
    tracing::info!(app = %graph.parameters.app_name, "topology derived");

    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&graph).context("failed to render graph as JSON")?
        ),
        "yaml" => print!(
            "{}",
            serde_yaml::to_string(&graph).context("failed to render graph as YAML")?
        ),
        other => bail!("unknown output format {:?} (expected json or yaml)", other),
    }

    Ok(())
}
