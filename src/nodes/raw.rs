//! Raw placeholder node.

use crate::entity::{Node, Output};
use crate::frame::Frame;
use std::any::Any;

/// A generic placeholder with no processing behavior.
///
/// Installed for the Input kind, whose node-specific logic lives outside
/// the core: frames enter the pipeline by propagating directly from the
/// entity's source pad, so the node itself never produces anything.
/// Frames delivered *to* a raw node are counted and dropped, matching the
/// original subsystem where placeholder entities have no frame hook.
pub struct RawNode {
    name: String,
    delivered: u64,
}

impl RawNode {
    /// Create a new raw placeholder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            delivered: 0,
        }
    }

    /// Number of frames delivered to (and dropped by) this node.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

impl Node for RawNode {
    fn process_frame(&mut self, sink_pad: u16, frame: &Frame) -> Option<Output> {
        self.delivered += 1;
        tracing::trace!(
            raw = %self.name,
            sink_pad,
            sequence = frame.meta().sequence,
            "placeholder dropped frame"
        );
        None
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::frame::FrameMeta;

    #[test]
    fn test_raw_drops_and_counts() {
        let mut raw = RawNode::new("input");
        let frame = Frame::new(vec![0u8; 2], FrameMeta::default());

        assert!(raw.process_frame(0, &frame).is_none());
        assert!(raw.process_frame(0, &frame).is_none());
        assert_eq!(raw.delivered(), 2);
    }

    #[test]
    fn test_raw_has_no_hooks() {
        let mut raw = RawNode::new("input");
        assert!(raw.generate_frame().is_none());
        assert!(matches!(raw.set_stream(true), Err(Error::NotSupported)));
    }
}
