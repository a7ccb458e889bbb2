//! Entity system for vcam topologies.
//!
//! This module defines the building blocks every node type shares:
//!
//! - [`Pad`]: a typed connection point (source or sink)
//! - [`Node`]: the uniform processing/teardown/stream-control interface
//! - [`NodeKind`]: the closed set of node functionalities
//! - [`Entity`]: a node instance bound to its pads, owned by the graph
//!
//! # Design
//!
//! Dispatch by node kind happens once, at construction time (see
//! [`crate::pipeline::factory`]); afterwards the graph engine only sees
//! `Box<dyn Node>`. Relationships between entities, pads and links are
//! expressed by index, never by reference, which keeps ownership flat and
//! teardown order explicit.

#[allow(clippy::module_inception)]
mod entity;
mod pad;
mod traits;

pub use entity::{live_entities, Entity};
pub use pad::{pads_init, Pad, PadDirection};
pub use traits::{Node, NodeKind, Output};
