//! Topology composition
//!
//! One-shot, synchronous, side-effect-free derivation: validated parameters
//! go in, the complete specification graph comes out. Specs are built
//! leaf-first in dependency order, then the assembled graph passes through
//! the aggregate invariant gate before it is handed to the caller. The gate
//! runs after full assembly because the invariants it checks only manifest
//! as cross-references between entities.

use std::collections::BTreeMap;

use tracing::debug;

use ecsplan_models::{
    ContainerLogging, ContainerSpec, ExecutionIdentitySpec, ImageRef, IngressSource, LogSinkSpec,
    NetworkSpec, OutputValue, RawParameters, RegistrySpec, ServiceSpec, SubnetTier,
    TopologyGraph, TopologyOutputs, WorkloadSpec,
};

use crate::error::TopologyError;
use crate::image::{self, APP_HEALTH_PATH, BOOTSTRAP_HEALTH_PATH};
use crate::names;
use crate::params;
use crate::routing::build_routing;
use crate::security::build_boundaries;

/// Availability zones the network spans.
pub const MAX_AZS: u8 = 2;
/// NAT gateways backing private egress.
pub const NAT_GATEWAYS: u8 = 1;
/// Log retention, fixed at one week.
pub const LOG_RETENTION_DAYS: u16 = 7;
/// Deployment stabilization floor (percent of desired count).
pub const MIN_HEALTHY_PERCENT: u32 = 100;
/// Deployment stabilization ceiling (percent of desired count).
pub const MAX_HEALTHY_PERCENT: u32 = 200;

const TRUSTED_SERVICE: &str = "ecs-tasks.amazonaws.com";
const EXECUTION_POLICY: &str = "service-role/AmazonECSTaskExecutionRolePolicy";

/// Derive the complete topology graph from raw parameters.
///
/// Deterministic: identical parameters yield element-wise identical graphs.
pub fn derive_topology(raw: &RawParameters) -> Result<TopologyGraph, TopologyError> {
    let parameters = params::resolve(raw)?;
    let app = parameters.app_name.clone();
    debug!(app = %app, bootstrap = parameters.bootstrap_mode, "deriving topology");

    let network = NetworkSpec {
        name: names::vpc(&app),
        max_azs: MAX_AZS,
        nat_gateways: NAT_GATEWAYS,
        subnet_tiers: vec![SubnetTier::Public, SubnetTier::PrivateWithEgress],
    };

    let registry = RegistrySpec {
        repository_name: names::repository(&app),
    };

    let log_sink = LogSinkSpec {
        group_name: names::log_group(&app),
        retention_days: LOG_RETENTION_DAYS,
        stream_prefix: app.clone(),
    };

    let identity = ExecutionIdentitySpec {
        role_name: names::execution_role(&app),
        trusted_service: TRUSTED_SERVICE.to_string(),
        managed_policies: vec![EXECUTION_POLICY.to_string()],
    };

    let selection = image::select_image(parameters.bootstrap_mode, &registry);
    debug!(image = ?selection.image, "image selected");

    let workload = WorkloadSpec {
        family: names::task_family(&app),
        cpu: parameters.cpu,
        memory_mib: parameters.memory_mib,
        execution_role: identity.role_name.clone(),
        container: ContainerSpec {
            name: app.clone(),
            image: selection.image,
            port: parameters.container_port,
            logging: ContainerLogging {
                group: log_sink.group_name.clone(),
                stream_prefix: log_sink.stream_prefix.clone(),
            },
            env: BTreeMap::new(),
            command: selection.command,
        },
    };

    let boundaries = build_boundaries(&app, parameters.container_port)?;

    let routing = build_routing(
        &app,
        parameters.container_port,
        selection.health_check_path,
        boundaries.alb.id.clone(),
    );

    let service = ServiceSpec {
        cluster_name: names::cluster(&app),
        service_name: names::service(&app),
        desired_count: parameters.desired_count,
        min_healthy_percent: MIN_HEALTHY_PERCENT,
        max_healthy_percent: MAX_HEALTHY_PERCENT,
        subnet_tier: SubnetTier::PrivateWithEgress,
        boundary: boundaries.service.id.clone(),
    };

    let outputs = TopologyOutputs {
        alb_url: OutputValue::Attribute {
            resource: "load_balancer".to_string(),
            attribute: "dns_name".to_string(),
            prefix: Some("http://".to_string()),
        },
        ecr_repo_uri: OutputValue::Attribute {
            resource: "repository".to_string(),
            attribute: "uri".to_string(),
            prefix: None,
        },
        ecr_repo_name: OutputValue::Literal {
            value: registry.repository_name.clone(),
        },
        cluster_name: OutputValue::Literal {
            value: service.cluster_name.clone(),
        },
        service_name: OutputValue::Literal {
            value: service.service_name.clone(),
        },
    };

    let graph = TopologyGraph {
        parameters,
        network,
        registry,
        log_sink,
        identity,
        workload,
        boundaries,
        routing,
        service,
        outputs,
    };

    verify_graph(&graph)?;
    debug!(app = %app, "topology derived");
    Ok(graph)
}

/// Aggregate correctness gate over the assembled graph.
///
/// Re-checks every cross-entity invariant; a violation here means a builder
/// above produced an inconsistent piece, and the graph must not reach the
/// provisioning engine.
pub fn verify_graph(graph: &TopologyGraph) -> Result<(), TopologyError> {
    verify_port_agreement(graph)?;
    verify_ingress_chain(graph)?;
    verify_image_coherence(graph)?;
    verify_tier_placement(graph)?;
    verify_reference_edges(graph)?;
    Ok(())
}

/// Invariant 1: one container port across container, service boundary rule,
/// and target group.
fn verify_port_agreement(graph: &TopologyGraph) -> Result<(), TopologyError> {
    let port = graph.parameters.container_port;
    if graph.workload.container.port != port {
        return Err(TopologyError::CompositionError(format!(
            "container port {} disagrees with parameters ({})",
            graph.workload.container.port, port
        )));
    }
    if graph.routing.target_group.port != port {
        return Err(TopologyError::CompositionError(format!(
            "target group forwards to {} but the container listens on {}",
            graph.routing.target_group.port, port
        )));
    }
    let rule_ports: Vec<u16> = graph
        .boundaries
        .service
        .ingress
        .iter()
        .map(|r| r.port)
        .collect();
    if rule_ports != [port] {
        return Err(TopologyError::CompositionError(format!(
            "service boundary admits ports {:?}, expected exactly [{}]",
            rule_ports, port
        )));
    }
    Ok(())
}

/// Invariant 2: the service boundary admits only the ALB boundary, by
/// identity, never a raw address range.
fn verify_ingress_chain(graph: &TopologyGraph) -> Result<(), TopologyError> {
    for rule in &graph.boundaries.service.ingress {
        match &rule.source {
            IngressSource::Boundary { id } if *id == graph.boundaries.alb.id => {}
            other => {
                return Err(TopologyError::CompositionError(format!(
                    "service boundary source must be the ALB boundary, got {:?}",
                    other
                )))
            }
        }
    }
    Ok(())
}

/// Invariant 3: the active image variant alone determines the command
/// override and the health-check path, and it matches the bootstrap flag.
fn verify_image_coherence(graph: &TopologyGraph) -> Result<(), TopologyError> {
    let parameters = &graph.parameters;
    let container = &graph.workload.container;
    let health_path = &graph.routing.target_group.health_check.path;

    match &container.image {
        ImageRef::PublicBootstrap { .. } => {
            if !parameters.bootstrap_mode {
                return Err(TopologyError::CompositionError(
                    "bootstrap image active outside bootstrap mode".to_string(),
                ));
            }
            if container.command.is_none() {
                return Err(TopologyError::CompositionError(
                    "bootstrap image requires a command override".to_string(),
                ));
            }
            if health_path != BOOTSTRAP_HEALTH_PATH {
                return Err(TopologyError::CompositionError(format!(
                    "bootstrap image health-checks {:?}, expected {:?}",
                    health_path, BOOTSTRAP_HEALTH_PATH
                )));
            }
        }
        ImageRef::Registry { repository, tag } => {
            if parameters.bootstrap_mode {
                return Err(TopologyError::CompositionError(
                    "registry image active in bootstrap mode".to_string(),
                ));
            }
            if container.command.is_some() {
                return Err(TopologyError::CompositionError(
                    "registry image must not carry a command override".to_string(),
                ));
            }
            if health_path != APP_HEALTH_PATH {
                return Err(TopologyError::CompositionError(format!(
                    "registry image health-checks {:?}, expected {:?}",
                    health_path, APP_HEALTH_PATH
                )));
            }
            if repository != &graph.registry.repository_name || tag != image::APP_IMAGE_TAG {
                return Err(TopologyError::CompositionError(format!(
                    "registry image {}:{} does not reference the derived repository",
                    repository, tag
                )));
            }
        }
    }
    Ok(())
}

/// Invariant 4: only the load balancer lives in the public tier.
fn verify_tier_placement(graph: &TopologyGraph) -> Result<(), TopologyError> {
    if graph.service.subnet_tier != SubnetTier::PrivateWithEgress {
        return Err(TopologyError::CompositionError(
            "service must run in the private-with-egress tier".to_string(),
        ));
    }
    if graph.routing.load_balancer.subnet_tier != SubnetTier::Public {
        return Err(TopologyError::CompositionError(
            "load balancer must live in the public tier".to_string(),
        ));
    }
    Ok(())
}

/// Remaining reference edges: identity, logging, and boundary bindings.
fn verify_reference_edges(graph: &TopologyGraph) -> Result<(), TopologyError> {
    if graph.workload.execution_role != graph.identity.role_name {
        return Err(TopologyError::CompositionError(format!(
            "workload runs under role {:?}, derived identity is {:?}",
            graph.workload.execution_role, graph.identity.role_name
        )));
    }
    if graph.workload.container.logging.group != graph.log_sink.group_name {
        return Err(TopologyError::CompositionError(format!(
            "container logs to {:?}, derived sink is {:?}",
            graph.workload.container.logging.group, graph.log_sink.group_name
        )));
    }
    if graph.routing.load_balancer.boundary != graph.boundaries.alb.id {
        return Err(TopologyError::CompositionError(
            "load balancer is not bound to the ALB boundary".to_string(),
        ));
    }
    if graph.service.boundary != graph.boundaries.service.id {
        return Err(TopologyError::CompositionError(
            "service is not bound to the service boundary".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawParameters {
        RawParameters {
            app_name: "helloecs".to_string(),
            ..RawParameters::default()
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        let first = derive_topology(&raw()).unwrap();
        let second = derive_topology(&raw()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn derived_names_follow_app_name() {
        let graph = derive_topology(&raw()).unwrap();
        assert_eq!(graph.service.cluster_name, "helloecs-cluster");
        assert_eq!(graph.registry.repository_name, "helloecs-repo");
        assert_eq!(graph.service.service_name, "helloecs-service");
        assert_eq!(graph.routing.load_balancer.name, "helloecs-alb");
        assert_eq!(graph.log_sink.group_name, "/ecs/helloecs");
    }

    #[test]
    fn invalid_parameters_leave_no_partial_graph() {
        let input = RawParameters {
            container_port: 0,
            ..raw()
        };
        assert!(matches!(
            derive_topology(&input),
            Err(TopologyError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn tampered_port_fails_the_composition_gate() {
        let mut graph = derive_topology(&raw()).unwrap();
        graph.routing.target_group.port = 9090;
        assert!(matches!(
            verify_graph(&graph),
            Err(TopologyError::CompositionError(_))
        ));
    }

    #[test]
    fn tampered_ingress_source_fails_the_composition_gate() {
        let mut graph = derive_topology(&raw()).unwrap();
        graph.boundaries.service.ingress[0].source = IngressSource::AnyIpv4;
        assert!(matches!(
            verify_graph(&graph),
            Err(TopologyError::CompositionError(_))
        ));
    }

    #[test]
    fn tampered_command_fails_the_composition_gate() {
        let mut graph = derive_topology(&raw()).unwrap();
        graph.workload.container.command = None;
        assert!(matches!(
            verify_graph(&graph),
            Err(TopologyError::CompositionError(_))
        ));
    }
}
