//! Sensor node: generates synthetic Bayer test frames.

use crate::entity::{Node, Output};
use crate::error::Result;
use crate::format::{self, mbus};
use crate::frame::{Frame, FrameMeta};
use std::any::Any;

/// A virtual camera sensor.
///
/// Generates deterministic gradient frames in a raw Bayer format. A real
/// sensor runs a free-running capture thread; here frame production is
/// call-driven through [`Node::generate_frame`], invoked by
/// [`Graph::trigger`](crate::pipeline::Graph::trigger).
///
/// The sensor only produces frames while its stream is enabled.
///
/// # Example
///
/// ```rust
/// use vcam::nodes::SensorNode;
/// use vcam::entity::Node;
///
/// let mut sensor = SensorNode::new("Sensor A", 0);
///
/// // Not streaming yet: nothing comes out.
/// assert!(sensor.generate_frame().is_none());
///
/// sensor.set_stream(true).unwrap();
/// let frame = sensor.generate_frame().unwrap();
/// assert_eq!(frame.meta().sequence, 0);
/// ```
pub struct SensorNode {
    name: String,
    src_pad: u16,
    code: u32,
    width: u32,
    height: u32,
    streaming: bool,
    sequence: u64,
}

impl SensorNode {
    /// Default frame width.
    pub const DEFAULT_WIDTH: u32 = 640;
    /// Default frame height.
    pub const DEFAULT_HEIGHT: u32 = 480;

    /// Create a sensor emitting on the given source pad.
    pub fn new(name: impl Into<String>, src_pad: u16) -> Self {
        Self {
            name: name.into(),
            src_pad,
            code: mbus::SBGGR8_1X8,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            streaming: false,
            sequence: 0,
        }
    }

    /// Set the frame size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the Bayer media-bus code to generate.
    pub fn with_code(mut self, code: u32) -> Self {
        self.code = code;
        self
    }

    /// Index of the source pad this sensor emits on.
    pub fn src_pad(&self) -> u16 {
        self.src_pad
    }

    /// Whether the sensor stream is currently enabled.
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Number of frames generated so far.
    pub fn frames_generated(&self) -> u64 {
        self.sequence
    }

    /// Fill one synthetic frame: a diagonal gradient shifted by the
    /// sequence number, so consecutive frames differ.
    fn fill(&self, bpp: usize) -> Vec<u8> {
        let mut data = vec![0u8; self.width as usize * self.height as usize * bpp];
        for line in 0..self.height {
            for col in 0..self.width {
                let idx = (line as usize * self.width as usize + col as usize) * bpp;
                data[idx] = (line as u64 + col as u64 + self.sequence) as u8;
            }
        }
        data
    }
}

impl Node for SensorNode {
    fn process_frame(&mut self, sink_pad: u16, _frame: &Frame) -> Option<Output> {
        // A sensor has no sink pads; delivery here is a topology bug.
        tracing::warn!(
            sensor = %self.name,
            sink_pad,
            "sensor received a frame, dropping"
        );
        None
    }

    fn generate_frame(&mut self) -> Option<Frame> {
        if !self.streaming {
            return None;
        }

        let bpp = format::by_code(self.code).map(|m| m.bpp).unwrap_or(1);
        let data = self.fill(bpp);
        let meta = FrameMeta::new(self.code, self.width, self.height).with_sequence(self.sequence);
        self.sequence += 1;

        tracing::trace!(
            sensor = %self.name,
            sequence = meta.sequence,
            "generated frame"
        );
        Some(Frame::new(data, meta))
    }

    fn set_stream(&mut self, enable: bool) -> Result<()> {
        tracing::debug!(sensor = %self.name, enable, "sensor stream control");
        self.streaming = enable;
        if !enable {
            self.sequence = 0;
        }
        Ok(())
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
