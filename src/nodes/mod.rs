//! Concrete node implementations.
//!
//! One module per node kind, all behind the uniform
//! [`Node`](crate::entity::Node) interface:
//!
//! - [`SensorNode`]: generates synthetic Bayer test frames
//! - [`DebayerNode`]: converts Bayer frames to RGB
//! - [`ScalerNode`]: upscales frames by a fixed multiplier
//! - [`CaptureNode`]: stores frames that reach the pipeline boundary
//! - [`RawNode`]: placeholder with no processing behavior
//!
//! The graph core never names these types directly outside the factory;
//! everything downstream of construction goes through the trait.

mod capture;
mod debayer;
mod raw;
mod scaler;
mod sensor;

pub use capture::CaptureNode;
pub use debayer::DebayerNode;
pub use raw::RawNode;
pub use scaler::ScalerNode;
pub use sensor::SensorNode;
