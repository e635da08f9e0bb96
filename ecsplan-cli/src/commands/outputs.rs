use anyhow::{bail, Context, Result};
use ecsplan_models::OutputValue;

use crate::cli::ParameterArgs;
use crate::config;

/// Derive the topology and print its addressable outputs.
///
/// Attribute-valued outputs resolve only after the provisioning engine has
/// realized the graph; until then they are shown as symbolic references.
pub fn run(params: &ParameterArgs, output: &str) -> Result<()> {
    let raw = config::load_parameters(params)?;
    let graph = ecsplan_topology::derive_topology(&raw)?;
    let outputs = &graph.outputs;

    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(outputs).context("failed to render outputs as JSON")?
        ),
        "table" => {
            println!("{:<14} {}", "OUTPUT", "VALUE");
            println!("{}", "-".repeat(60));
            println!("{:<14} {}", "AlbUrl", describe(&outputs.alb_url));
            println!("{:<14} {}", "EcrRepoUri", describe(&outputs.ecr_repo_uri));
            println!("{:<14} {}", "EcrRepoName", describe(&outputs.ecr_repo_name));
            println!("{:<14} {}", "ClusterName", describe(&outputs.cluster_name));
            println!("{:<14} {}", "ServiceName", describe(&outputs.service_name));
        }
        other => bail!("unknown output format {:?} (expected table or json)", other),
    }

    Ok(())
}

fn describe(value: &OutputValue) -> String {
    match value {
        OutputValue::Literal { value } => value.clone(),
        OutputValue::Attribute {
            resource,
            attribute,
            prefix,
        } => format!(
            "{}<{}.{} after provisioning>",
            prefix.as_deref().unwrap_or(""),
            resource,
            attribute
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_outputs_are_described_symbolically() {
        let value = OutputValue::Attribute {
            resource: "load_balancer".to_string(),
            attribute: "dns_name".to_string(),
            prefix: Some("http://".to_string()),
        };
        assert_eq!(
            describe(&value),
            "http://<load_balancer.dns_name after provisioning>"
        );
    }
}
