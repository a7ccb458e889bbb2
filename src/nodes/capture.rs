//! Capture node: stores frames delivered by the pipeline.

use crate::entity::{Node, Output};
use crate::error::{Error, Result};
use crate::format;
use crate::frame::Frame;
use std::any::Any;

/// A capture sink at the pipeline boundary.
///
/// Stores every frame delivered to its sink pad (cheap Arc clones) so a
/// driver or test can inspect what reached the end of the pipeline. In
/// the simulated subsystem this is where frames would be handed to user
/// space.
///
/// # Example
///
/// ```rust
/// use vcam::nodes::CaptureNode;
/// use vcam::entity::Node;
/// use vcam::frame::{Frame, FrameMeta};
///
/// let mut cap = CaptureNode::new("Raw Capture 0");
/// let frame = Frame::new(vec![0u8; 4], FrameMeta::default());
///
/// cap.process_frame(0, &frame);
/// assert_eq!(cap.count(), 1);
/// assert!(cap.last().is_some());
/// ```
pub struct CaptureNode {
    name: String,
    frames: Vec<Frame>,
    pixelformat: Option<u32>,
}

impl CaptureNode {
    /// Create a new capture sink.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: Vec::new(),
            pixelformat: None,
        }
    }

    /// Request an external pixel format for this capture.
    ///
    /// Validates the fourcc against the pixel format table; unknown
    /// formats are rejected with [`Error::InvalidConfig`].
    pub fn set_format(&mut self, pixelformat: u32) -> Result<()> {
        let map = format::by_pixelformat(pixelformat).ok_or_else(|| {
            Error::InvalidConfig(format!("unsupported pixelformat {pixelformat:#010x}"))
        })?;
        self.pixelformat = Some(map.pixelformat);
        Ok(())
    }

    /// The requested pixel format, if one was configured.
    pub fn pixelformat(&self) -> Option<u32> {
        self.pixelformat
    }

    /// Number of frames captured.
    pub fn count(&self) -> u64 {
        self.frames.len() as u64
    }

    /// All captured frames, oldest first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The most recently captured frame.
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Discard all captured frames.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Node for CaptureNode {
    fn process_frame(&mut self, sink_pad: u16, frame: &Frame) -> Option<Output> {
        tracing::trace!(
            capture = %self.name,
            sink_pad,
            sequence = frame.meta().sequence,
            "frame captured"
        );
        self.frames.push(frame.clone());
        None
    }

    fn teardown(&mut self) {
        // Frames must not outlive the graph teardown.
        self.frames.clear();
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
    use crate::format::{mbus, pixfmt};
    use crate::frame::FrameMeta;

    #[test]
    fn test_capture_stores_frames() {
        let mut cap = CaptureNode::new("cap");
        let frame = Frame::new(
            vec![0u8; 4],
            FrameMeta::new(mbus::SBGGR8_1X8, 2, 2).with_sequence(5),
        );

        assert!(cap.process_frame(0, &frame).is_none());
        cap.process_frame(0, &frame);

        assert_eq!(cap.count(), 2);
        assert_eq!(cap.last().unwrap().meta().sequence, 5);
    }

    #[test]
    fn test_set_format_known() {
        let mut cap = CaptureNode::new("cap");
        cap.set_format(pixfmt::RGB24).unwrap();
        assert_eq!(cap.pixelformat(), Some(pixfmt::RGB24));
    }

    #[test]
    fn test_set_format_unknown_rejected() {
        let mut cap = CaptureNode::new("cap");
        let err = cap.set_format(0x0102_0304).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert_eq!(cap.pixelformat(), None);
    }

    #[test]
    fn test_stream_control_not_supported() {
        let mut cap = CaptureNode::new("cap");
        assert!(matches!(cap.set_stream(true), Err(Error::NotSupported)));
    }

    #[test]
    fn test_teardown_clears_frames() {
        let mut cap = CaptureNode::new("cap");
        cap.process_frame(0, &Frame::new(vec![0u8; 1], FrameMeta::default()));
        cap.teardown();
        assert_eq!(cap.count(), 0);
    }
}
