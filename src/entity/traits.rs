//! Core node traits and types.

use crate::error::{Error, Result};
use crate::frame::Frame;
use std::any::Any;

/// The functionality of a node in the topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Simulates a camera sensor: generates internal images in Bayer
    /// format and propagates them through the pipeline.
    Sensor,
    /// A boundary node that exposes received frames to the outside.
    Capture,
    /// A boundary node that injects externally supplied frames into the
    /// pipeline.
    Input,
    /// Expects a frame in Bayer format and converts it to RGB.
    Debayer,
    /// Scales the received image by a fixed multiplier.
    Scaler,
}

impl NodeKind {
    /// Whether this kind is a processing node.
    ///
    /// Capture and Input are I/O boundaries; the streaming controller does
    /// not forward stream commands to them.
    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Sensor | Self::Debayer | Self::Scaler)
    }
}

/// A frame emitted by a node on one of its source pads.
///
/// Returned from [`Node::process_frame`]; the propagation engine recurses
/// on the named pad with the new frame.
#[derive(Debug, Clone)]
pub struct Output {
    /// Index of the source pad the frame is emitted on.
    pub src_pad: u16,
    /// The emitted frame.
    pub frame: Frame,
}

impl Output {
    /// Create an output on the given source pad.
    pub fn new(src_pad: u16, frame: Frame) -> Self {
        Self { src_pad, frame }
    }
}

/// The uniform interface every node type implements.
///
/// The graph engine only ever talks to nodes through this trait: frames
/// are delivered via [`process_frame`](Self::process_frame), stream
/// start/stop commands via [`set_stream`](Self::set_stream), and resources
/// are released via [`teardown`](Self::teardown) during graph teardown.
///
/// # Error handling
///
/// `process_frame` deliberately has no error channel: a node that hits an
/// internal fault drops the frame and logs, it cannot fail the pipeline.
/// This is an inherited limitation of the simulated subsystem, not a
/// feature.
pub trait Node: Send {
    /// Process a frame delivered on one of this node's sink pads.
    ///
    /// Returning `Some(output)` makes the propagation engine push the new
    /// frame from the named source pad; returning `None` ends the chain
    /// here (captures, placeholders, or nodes that are not streaming).
    fn process_frame(&mut self, sink_pad: u16, frame: &Frame) -> Option<Output>;

    /// Generate a frame spontaneously (sensors).
    ///
    /// Called by [`Graph::trigger`](crate::pipeline::Graph::trigger) in
    /// place of the free-running capture loop of a real sensor. The
    /// default produces nothing.
    fn generate_frame(&mut self) -> Option<Frame> {
        None
    }

    /// Start or stop this node's stream.
    ///
    /// The default reports [`Error::NotSupported`], which the streaming
    /// controller treats as benign success.
    fn set_stream(&mut self, _enable: bool) -> Result<()> {
        Err(Error::NotSupported)
    }

    /// Release every resource acquired at construction.
    ///
    /// Invoked exactly once per node while the graph tears down, in
    /// reverse creation order.
    fn teardown(&mut self) {}

    /// Get the node's name (for debugging/logging).
    fn name(&self) -> &str;

    /// Upcast to `Any` for concrete-type access behind the trait object.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast to `Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_processing_split() {
        assert!(NodeKind::Sensor.is_processing());
        assert!(NodeKind::Debayer.is_processing());
        assert!(NodeKind::Scaler.is_processing());
        assert!(!NodeKind::Capture.is_processing());
        assert!(!NodeKind::Input.is_processing());
    }

    #[test]
    fn test_default_hooks() {
        struct Dummy;
        impl Node for Dummy {
            fn process_frame(&mut self, _sink_pad: u16, _frame: &Frame) -> Option<Output> {
                None
            }
            fn name(&self) -> &str {
                "dummy"
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }

        let mut node = Dummy;
        assert!(node.generate_frame().is_none());
        assert!(matches!(node.set_stream(true), Err(Error::NotSupported)));
    }
}
