//! Data model for the ecsplan topology builder
//!
//! Every type here is a *specification* realized by an external provisioning
//! engine, never a live runtime object. Specs are derived once from
//! [`Parameters`] and are read-only afterwards; changes flow by re-deriving
//! from new parameters, not by patching the graph.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Parameters
// ============================================================================

/// Context-supplied input values, prior to validation.
///
/// Wide integer types on purpose: out-of-range values (port 0, negative
/// desired count) must survive until the parameter resolver can reject them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawParameters {
    /// Application name; seeds every derived resource name
    pub app_name: String,
    /// Container port the application listens on
    pub container_port: i64,
    /// Desired replica count
    pub desired_count: i64,
    /// CPU units (Fargate allocation)
    pub cpu: i64,
    /// Memory in MiB (Fargate allocation)
    pub memory_mib: i64,
    /// Serve the public bootstrap image instead of the app image
    /// (default: true when absent)
    pub bootstrap_mode: Option<bool>,
}

impl Default for RawParameters {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            container_port: 8080,
            desired_count: 1,
            cpu: 512,
            memory_mib: 1024,
            bootstrap_mode: None,
        }
    }
}

/// Validated, immutable derivation input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Parameters {
    pub app_name: String,
    pub container_port: u16,
    pub desired_count: u32,
    pub cpu: u32,
    pub memory_mib: u32,
    pub bootstrap_mode: bool,
}

// ============================================================================
// Network
// ============================================================================

/// Subnet tier a resource is placed in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SubnetTier {
    Public,
    PrivateWithEgress,
}

/// Virtual network spanning multiple availability zones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkSpec {
    pub name: String,
    /// Availability zones to span (fixed at 2)
    pub max_azs: u8,
    /// NAT gateways for private egress (fixed at 1)
    pub nat_gateways: u8,
    pub subnet_tiers: Vec<SubnetTier>,
}

// ============================================================================
// Registry, log sink, identity
// ============================================================================

/// Named image repository; deliberately decoupled from the network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrySpec {
    pub repository_name: String,
}

/// Log destination with a fixed retention policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogSinkSpec {
    /// Log group name (`/ecs/{app}`)
    pub group_name: String,
    /// Retention, fixed at one week
    pub retention_days: u16,
    pub stream_prefix: String,
}

/// Execution identity trusted only by the compute runtime, carrying exactly
/// one managed capability bundle (image pull + log write).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutionIdentitySpec {
    pub role_name: String,
    /// Principal allowed to assume the role
    pub trusted_service: String,
    pub managed_policies: Vec<String>,
}

// ============================================================================
// Compute
// ============================================================================

/// Container image reference. Exactly one variant is active per derivation,
/// and the active variant alone determines the command override and the
/// health-check path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ImageRef {
    /// Application image pulled from the named repository
    Registry { repository: String, tag: String },
    /// Fixed public image used to validate the topology before any
    /// application image exists
    PublicBootstrap { reference: String },
}

/// Log routing for a single container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContainerLogging {
    pub group: String,
    pub stream_prefix: String,
}

/// The single container of the workload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: ImageRef,
    pub port: u16,
    pub logging: ContainerLogging,
    pub env: BTreeMap<String, String>,
    /// Process override; present only in bootstrap mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
}

/// Containerized workload definition (task-level sizing plus one container).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkloadSpec {
    pub family: String,
    pub cpu: u32,
    pub memory_mib: u32,
    /// Role name of the [`ExecutionIdentitySpec`] this workload runs under
    pub execution_role: String,
    pub container: ContainerSpec,
}

// ============================================================================
// Traffic boundaries
// ============================================================================

/// Stable identity of a traffic boundary, used for identity-based ingress
/// references (never an address range).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct BoundaryId(pub String);

impl BoundaryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Where inbound traffic for a rule may originate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IngressSource {
    /// Anywhere (0.0.0.0/0)
    AnyIpv4,
    /// Only traffic originating from the named boundary
    Boundary { id: BoundaryId },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngressRule {
    pub port: u16,
    pub source: IngressSource,
}

/// One traffic-scoping boundary (security group) and its inbound rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrafficBoundary {
    pub id: BoundaryId,
    pub description: String,
    pub ingress: Vec<IngressRule>,
}

/// The two boundaries of the topology: public-facing ALB boundary and the
/// service boundary that admits only ALB traffic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoundaryPair {
    pub alb: TrafficBoundary,
    pub service: TrafficBoundary,
}

// ============================================================================
// Routing
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Http,
}

/// Health-check contract: success is exactly an HTTP 200 on `path`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthCheckSpec {
    pub path: String,
    pub healthy_http_codes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListenerSpec {
    pub port: u16,
    pub protocol: Protocol,
}

/// Backend endpoint set plus its health-check contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetGroupSpec {
    pub name: String,
    /// Forwarding port; must match the container port
    pub port: u16,
    pub protocol: Protocol,
    pub health_check: HealthCheckSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadBalancerSpec {
    pub name: String,
    pub internet_facing: bool,
    /// The only resource placed in the public tier
    pub subnet_tier: SubnetTier,
    pub boundary: BoundaryId,
}

/// Public-facing load-balancing layer: one listener, one target group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoutingSpec {
    pub load_balancer: LoadBalancerSpec,
    pub listener: ListenerSpec,
    pub target_group: TargetGroupSpec,
}

// ============================================================================
// Service runtime
// ============================================================================

/// Desired replica count and deployment stabilization thresholds, binding
/// the workload to the private subnets and the service boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceSpec {
    pub cluster_name: String,
    pub service_name: String,
    pub desired_count: u32,
    /// Stabilization floor during deployments (percent of desired)
    pub min_healthy_percent: u32,
    /// Stabilization ceiling during deployments (percent of desired)
    pub max_healthy_percent: u32,
    pub subnet_tier: SubnetTier,
    pub boundary: BoundaryId,
}

// ============================================================================
// Outputs
// ============================================================================

/// A derived output value. Literals are known at composition time; attribute
/// references resolve only after the provisioning engine has realized the
/// graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputValue {
    Literal { value: String },
    Attribute {
        resource: String,
        attribute: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefix: Option<String>,
    },
}

impl OutputValue {
    /// Resolve against realized identifiers. `None` if the stack is missing
    /// the referenced attribute.
    pub fn resolve(&self, stack: &RealizedStack) -> Option<String> {
        match self {
            OutputValue::Literal { value } => Some(value.clone()),
            OutputValue::Attribute {
                resource,
                attribute,
                prefix,
            } => {
                let raw = stack.attribute(resource, attribute)?;
                Some(match prefix {
                    Some(p) => format!("{}{}", p, raw),
                    None => raw.to_string(),
                })
            }
        }
    }
}

/// The addressable outputs of a composed topology.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopologyOutputs {
    /// `http://<load-balancer DNS name>`
    pub alb_url: OutputValue,
    pub ecr_repo_uri: OutputValue,
    pub ecr_repo_name: OutputValue,
    pub cluster_name: OutputValue,
    pub service_name: OutputValue,
}

impl TopologyOutputs {
    pub fn resolve(&self, stack: &RealizedStack) -> Option<ResolvedOutputs> {
        Some(ResolvedOutputs {
            alb_url: self.alb_url.resolve(stack)?,
            ecr_repo_uri: self.ecr_repo_uri.resolve(stack)?,
            ecr_repo_name: self.ecr_repo_name.resolve(stack)?,
            cluster_name: self.cluster_name.resolve(stack)?,
            service_name: self.service_name.resolve(stack)?,
        })
    }
}

/// Outputs after resolution against a [`RealizedStack`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub alb_url: String,
    pub ecr_repo_uri: String,
    pub ecr_repo_name: String,
    pub cluster_name: String,
    pub service_name: String,
}

/// Live identifiers reported back by the provisioning engine after
/// realization, keyed `resource` / `attribute`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RealizedStack {
    pub attributes: BTreeMap<String, String>,
}

impl RealizedStack {
    pub fn attribute(&self, resource: &str, attribute: &str) -> Option<&str> {
        self.attributes
            .get(&format!("{}.{}", resource, attribute))
            .map(String::as_str)
    }

    pub fn set_attribute(&mut self, resource: &str, attribute: &str, value: impl Into<String>) {
        self.attributes
            .insert(format!("{}.{}", resource, attribute), value.into());
    }
}

// ============================================================================
// Composed graph
// ============================================================================

/// The complete derived specification graph for one parameter set.
///
/// Field order mirrors the dependency order the derivation builds in:
/// network → identity/registry/log sink → workload → boundaries → routing
/// → service → outputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopologyGraph {
    pub parameters: Parameters,
    pub network: NetworkSpec,
    pub registry: RegistrySpec,
    pub log_sink: LogSinkSpec,
    pub identity: ExecutionIdentitySpec,
    pub workload: WorkloadSpec,
    pub boundaries: BoundaryPair,
    pub routing: RoutingSpec,
    pub service: ServiceSpec,
    pub outputs: TopologyOutputs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_literal_resolves_without_stack_entries() {
        let value = OutputValue::Literal {
            value: "helloecs-cluster".to_string(),
        };
        assert_eq!(
            value.resolve(&RealizedStack::default()),
            Some("helloecs-cluster".to_string())
        );
    }

    #[test]
    fn output_attribute_applies_prefix() {
        let mut stack = RealizedStack::default();
        stack.set_attribute("load_balancer", "dns_name", "x.elb.amazonaws.com");

        let value = OutputValue::Attribute {
            resource: "load_balancer".to_string(),
            attribute: "dns_name".to_string(),
            prefix: Some("http://".to_string()),
        };
        assert_eq!(
            value.resolve(&stack),
            Some("http://x.elb.amazonaws.com".to_string())
        );
    }

    #[test]
    fn output_attribute_missing_from_stack_is_none() {
        let value = OutputValue::Attribute {
            resource: "load_balancer".to_string(),
            attribute: "dns_name".to_string(),
            prefix: None,
        };
        assert_eq!(value.resolve(&RealizedStack::default()), None);
    }

    #[test]
    fn image_ref_serializes_with_source_tag() {
        let image = ImageRef::Registry {
            repository: "helloecs-repo".to_string(),
            tag: "latest".to_string(),
        };
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["source"], "registry");
        assert_eq!(json["tag"], "latest");
    }
}
