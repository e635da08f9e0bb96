//! End-to-end properties of the topology derivation

use ecsplan_models::{ImageRef, IngressSource, RawParameters, SubnetTier};
use ecsplan_topology::{derive_topology, verify_graph, TopologyError};

fn raw(app: &str) -> RawParameters {
    RawParameters {
        app_name: app.to_string(),
        ..RawParameters::default()
    }
}

#[test]
fn every_valid_graph_passes_the_invariant_gate() {
    let cases = [
        raw("helloecs"),
        RawParameters {
            container_port: 3000,
            desired_count: 0,
            bootstrap_mode: Some(false),
            ..raw("web")
        },
        RawParameters {
            container_port: 65535,
            desired_count: 10,
            cpu: 4096,
            memory_mib: 30720,
            bootstrap_mode: Some(true),
            ..raw("big-app-01")
        },
        RawParameters {
            cpu: 256,
            memory_mib: 512,
            ..raw("tiny")
        },
    ];

    for case in cases {
        let graph = derive_topology(&case).expect("derivation should succeed");
        verify_graph(&graph).expect("gate should accept its own output");
    }
}

#[test]
fn bootstrap_mode_selects_public_image_command_and_root_path() {
    let graph = derive_topology(&RawParameters {
        bootstrap_mode: Some(true),
        ..raw("helloecs")
    })
    .unwrap();

    assert!(matches!(
        graph.workload.container.image,
        ImageRef::PublicBootstrap { .. }
    ));
    assert!(graph.workload.container.command.is_some());
    assert_eq!(graph.routing.target_group.health_check.path, "/");
}

#[test]
fn app_mode_selects_repository_image_without_override() {
    let graph = derive_topology(&RawParameters {
        bootstrap_mode: Some(false),
        ..raw("helloecs")
    })
    .unwrap();

    assert_eq!(
        graph.workload.container.image,
        ImageRef::Registry {
            repository: "helloecs-repo".to_string(),
            tag: "latest".to_string(),
        }
    );
    assert!(graph.workload.container.command.is_none());
    assert_eq!(
        graph.routing.target_group.health_check.path,
        "/actuator/health"
    );
}

#[test]
fn container_port_flows_to_boundary_and_target_group() {
    let graph = derive_topology(&RawParameters {
        container_port: 8080,
        ..raw("helloecs")
    })
    .unwrap();

    assert_eq!(graph.workload.container.port, 8080);
    assert_eq!(graph.boundaries.service.ingress[0].port, 8080);
    assert_eq!(graph.routing.target_group.port, 8080);
    assert_eq!(
        graph.boundaries.service.ingress[0].source,
        IngressSource::Boundary {
            id: graph.boundaries.alb.id.clone()
        }
    );
}

#[test]
fn rederiving_identical_parameters_yields_equal_graphs() {
    let input = RawParameters {
        container_port: 9000,
        desired_count: 3,
        cpu: 1024,
        memory_mib: 4096,
        bootstrap_mode: Some(false),
        ..raw("helloecs")
    };
    assert_eq!(
        derive_topology(&input).unwrap(),
        derive_topology(&input).unwrap()
    );
}

#[test]
fn only_the_load_balancer_is_public() {
    let graph = derive_topology(&raw("helloecs")).unwrap();
    assert_eq!(graph.routing.load_balancer.subnet_tier, SubnetTier::Public);
    assert_eq!(graph.service.subnet_tier, SubnetTier::PrivateWithEgress);
    assert_eq!(graph.service.min_healthy_percent, 100);
    assert_eq!(graph.service.max_healthy_percent, 200);
    assert_eq!(graph.network.max_azs, 2);
    assert_eq!(graph.network.nat_gateways, 1);
    assert_eq!(graph.log_sink.retention_days, 7);
}

#[test]
fn invalid_inputs_abort_with_invalid_parameter() {
    let port_zero = RawParameters {
        container_port: 0,
        ..raw("helloecs")
    };
    assert!(matches!(
        derive_topology(&port_zero),
        Err(TopologyError::InvalidParameter { .. })
    ));

    let negative_count = RawParameters {
        desired_count: -1,
        ..raw("helloecs")
    };
    assert!(matches!(
        derive_topology(&negative_count),
        Err(TopologyError::InvalidParameter { .. })
    ));
}

#[test]
fn oversized_sizing_values_are_rejected_not_truncated() {
    let input = RawParameters {
        cpu: 256 + (1i64 << 32),
        memory_mib: 512,
        ..raw("helloecs")
    };
    assert!(matches!(
        derive_topology(&input),
        Err(TopologyError::InvalidParameter { .. })
    ));
}

#[test]
fn listener_port_collision_aborts_with_configuration_error() {
    let collision = RawParameters {
        container_port: 80,
        ..raw("helloecs")
    };
    assert!(matches!(
        derive_topology(&collision),
        Err(TopologyError::ConfigurationError(_))
    ));
}
