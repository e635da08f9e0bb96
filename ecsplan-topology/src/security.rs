//! Security boundary derivation
//!
//! Two traffic boundaries form an ingress chain: the ALB boundary admits
//! public HTTP, the service boundary admits only traffic originating from
//! the ALB boundary, on the container port. The chain is expressed by
//! boundary identity, never by address range.

use ecsplan_models::{BoundaryId, BoundaryPair, IngressRule, IngressSource, TrafficBoundary};

use crate::error::TopologyError;
use crate::names;

/// Fixed public listener port.
pub const LISTENER_PORT: u16 = 80;

/// Build the boundary pair for the given container port.
///
/// A container port equal to the listener port makes listener-side and
/// service-side traffic indistinguishable to the target runtime's routing
/// rules; that combination is rejected outright rather than silently
/// permitted.
pub fn build_boundaries(app_name: &str, container_port: u16) -> Result<BoundaryPair, TopologyError> {
    if container_port == LISTENER_PORT {
        return Err(TopologyError::ConfigurationError(format!(
            "container port {} collides with the fixed listener port {}",
            container_port, LISTENER_PORT
        )));
    }

    let alb = TrafficBoundary {
        id: BoundaryId(names::alb_boundary(app_name)),
        description: "public HTTP ingress to the load balancer".to_string(),
        ingress: vec![IngressRule {
            port: LISTENER_PORT,
            source: IngressSource::AnyIpv4,
        }],
    };

    let service = TrafficBoundary {
        id: BoundaryId(names::service_boundary(app_name)),
        description: "container traffic from the load balancer only".to_string(),
        ingress: vec![IngressRule {
            port: container_port,
            source: IngressSource::Boundary {
                id: alb.id.clone(),
            },
        }],
    };

    Ok(BoundaryPair { alb, service })
}
