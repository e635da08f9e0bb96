//! Routing derivation
//!
//! Internet-facing load balancer in the public tier, one HTTP listener on
//! port 80, one target group forwarding to the container port. Health-check
//! success is exactly an HTTP 200 on the selected path; any other policy is
//! out of scope.

use ecsplan_models::{
    BoundaryId, HealthCheckSpec, ListenerSpec, LoadBalancerSpec, Protocol, RoutingSpec,
    SubnetTier, TargetGroupSpec,
};

use crate::names;
use crate::security::LISTENER_PORT;

pub const HEALTHY_HTTP_CODES: &str = "200";

pub fn build_routing(
    app_name: &str,
    container_port: u16,
    health_check_path: &str,
    alb_boundary: BoundaryId,
) -> RoutingSpec {
    RoutingSpec {
        load_balancer: LoadBalancerSpec {
            name: names::load_balancer(app_name),
            internet_facing: true,
            subnet_tier: SubnetTier::Public,
            boundary: alb_boundary,
        },
        listener: ListenerSpec {
            port: LISTENER_PORT,
            protocol: Protocol::Http,
        },
        target_group: TargetGroupSpec {
            name: names::target_group(app_name),
            port: container_port,
            protocol: Protocol::Http,
            health_check: HealthCheckSpec {
                path: health_check_path.to_string(),
                healthy_http_codes: HEALTHY_HTTP_CODES.to_string(),
            },
        },
    }
}
