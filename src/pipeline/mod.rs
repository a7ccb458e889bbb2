//! Pipeline topology: configuration, construction and the live graph.
//!
//! Three layers:
//!
//! - [`topology`]: the static blueprint ([`TopologyConfig`] and friends)
//! - [`factory`]: descriptor-to-entity construction
//! - [`graph`]: the live [`Graph`] that owns entities and links and drives
//!   frame propagation and stream control

pub mod factory;
mod graph;
mod topology;

pub use graph::{Graph, Link, LinkValidator, PadRef};
pub use topology::{EntityConfig, LinkConfig, LinkFlags, TopologyConfig};
