//! # vcam
//!
//! A virtual camera pipeline simulator.
//!
//! vcam models a hardware image-capture subsystem as a graph of virtual
//! processing nodes (sensors, debayers, scalers, capture sinks, raw inputs)
//! connected by typed links, and propagates synthetic frames through that
//! graph. No real hardware is involved: sensors generate deterministic test
//! patterns and every transform is a cheap stand-in for the real math.
//!
//! ## Concepts
//!
//! - **Entity**: a node in the pipeline performing one stage (sensor,
//!   demosaicing, scaling, or a capture/input boundary).
//! - **Pad**: a typed connection point on an entity, either source (emits
//!   frames) or sink (receives frames).
//! - **Link**: a directed, optionally-disableable connection from a source
//!   pad to a sink pad. Immutable links keep their enabled state for the
//!   graph's lifetime.
//! - **Topology**: the static description of entities and links that a
//!   [`pipeline::Graph`] is built from.
//!
//! ## Quick start
//!
//! ```rust
//! use vcam::prelude::*;
//!
//! // Build the reference camera topology (two sensors, two debayers,
//! // two raw captures, an input, a scaler and a combined capture).
//! let config = TopologyConfig::default_camera();
//! let mut graph = Graph::build(&config).unwrap();
//!
//! // Walk the stream chain one hop at a time, then trigger Sensor A.
//! graph.set_stream(8, true).unwrap(); // capture -> scaler
//! graph.set_stream(7, true).unwrap(); // scaler  -> debayer A
//! graph.set_stream(2, true).unwrap(); // debayer -> sensor A
//! graph.trigger(0).unwrap();
//!
//! graph.destroy();
//! ```
//!
//! ## Execution model
//!
//! Everything is single-threaded and call-driven. `build`, `propagate`,
//! `set_stream` and `destroy` run synchronously in the calling context;
//! frame fan-out through multi-stage pipelines uses call-stack recursion
//! bounded by pipeline depth. The graph is the single owner of all
//! entities, pads and links.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity;
pub mod error;
pub mod format;
pub mod frame;
pub mod nodes;
pub mod pipeline;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::entity::{Node, NodeKind, Pad, PadDirection};
    pub use crate::error::{Error, Result};
    pub use crate::frame::{Frame, FrameMeta};
    pub use crate::pipeline::{Graph, LinkFlags, PadRef, TopologyConfig};
}

pub use error::{Error, Result};
