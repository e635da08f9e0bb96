//! ecsplan-topology - derivation core of the ecsplan topology builder
//!
//! Given a small set of application parameters, deterministically derive a
//! consistent graph of infrastructure resource specifications for a
//! containerized HTTP web service, and hand it to an external provisioning
//! engine for realization.
//!
//! # Usage
//!
//! ```rust
//! use ecsplan_models::RawParameters;
//! use ecsplan_topology::derive_topology;
//!
//! # fn example() -> Result<(), ecsplan_topology::TopologyError> {
//! let graph = derive_topology(&RawParameters {
//!     app_name: "helloecs".to_string(),
//!     ..RawParameters::default()
//! })?;
//! assert_eq!(graph.service.cluster_name, "helloecs-cluster");
//! # Ok(())
//! # }
//! ```

pub mod compose;
pub mod engine;
pub mod error;
pub mod image;
pub mod names;
pub mod params;
pub mod routing;
pub mod security;

// Re-export the primary surface for convenience
pub use compose::{derive_topology, verify_graph};
pub use engine::ProvisioningEngine;
pub use error::{EngineError, TopologyError};
pub use image::{select_image, ImageSelection};
