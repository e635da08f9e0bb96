use anyhow::Result;

use crate::cli::ParameterArgs;
use crate::config;

/// Resolve parameters, derive the graph, and run the invariant gate.
pub fn run(params: &ParameterArgs) -> Result<()> {
    let raw = config::load_parameters(params)?;
    let graph = ecsplan_topology::derive_topology(&raw)?;

    println!("✓ topology consistent");
    println!();
    println!("  App:            {}", graph.parameters.app_name);
    println!("  Container port: {}", graph.parameters.container_port);
    println!("  Desired count:  {}", graph.parameters.desired_count);
    println!(
        "  Sizing:         {} CPU / {} MiB",
        graph.parameters.cpu, graph.parameters.memory_mib
    );
    println!(
        "  Image:          {}",
        if graph.parameters.bootstrap_mode {
            "public bootstrap"
        } else {
            "repository (latest)"
        }
    );

    Ok(())
}
