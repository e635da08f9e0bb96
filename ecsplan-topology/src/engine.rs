//! Provisioning engine boundary
//!
//! Realization of the graph belongs to an external, eventually-consistent
//! collaborator. The core submits the composed graph and reads back live
//! identifiers; reconciliation, retry, and the deployment-stabilization
//! window (bounded by the min/max healthy percentages in the service spec)
//! are entirely the engine's business. The core defines no cancellation or
//! timeout semantics of its own.

use async_trait::async_trait;

use ecsplan_models::{RealizedStack, TopologyGraph};

use crate::error::EngineError;

#[async_trait]
pub trait ProvisioningEngine: Send + Sync {
    /// Submit the graph for realization and return the live identifiers
    /// the symbolic outputs resolve against. Engine failures surface
    /// unmodified.
    async fn submit(&self, graph: &TopologyGraph) -> Result<RealizedStack, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::derive_topology;
    use ecsplan_models::RawParameters;

    /// Engine double that realizes nothing and reports canned identifiers.
    struct RecordedEngine {
        stack: RealizedStack,
    }

    #[async_trait]
    impl ProvisioningEngine for RecordedEngine {
        async fn submit(&self, _graph: &TopologyGraph) -> Result<RealizedStack, EngineError> {
            Ok(self.stack.clone())
        }
    }

    #[tokio::test]
    async fn outputs_resolve_against_engine_identifiers() {
        let graph = derive_topology(&RawParameters {
            app_name: "helloecs".to_string(),
            ..RawParameters::default()
        })
        .unwrap();

        let mut stack = RealizedStack::default();
        stack.set_attribute("load_balancer", "dns_name", "helloecs-alb-1.elb.amazonaws.com");
        stack.set_attribute(
            "repository",
            "uri",
            "123456789012.dkr.ecr.us-east-1.amazonaws.com/helloecs-repo",
        );
        let engine = RecordedEngine { stack };

        let realized = engine.submit(&graph).await.unwrap();
        let outputs = graph.outputs.resolve(&realized).unwrap();
        assert_eq!(outputs.alb_url, "http://helloecs-alb-1.elb.amazonaws.com");
        assert_eq!(
            outputs.ecr_repo_uri,
            "123456789012.dkr.ecr.us-east-1.amazonaws.com/helloecs-repo"
        );
        assert_eq!(outputs.ecr_repo_name, "helloecs-repo");
        assert_eq!(outputs.cluster_name, "helloecs-cluster");
        assert_eq!(outputs.service_name, "helloecs-service");
    }
}
