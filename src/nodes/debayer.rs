//! Debayer node: converts Bayer frames to RGB.

use crate::entity::{Node, Output};
use crate::error::Result;
use crate::format::{self, mbus};
use crate::frame::{Frame, FrameMeta};
use std::any::Any;

/// A demosaicing stage.
///
/// Receives a raw Bayer frame on its sink pad and, while streaming, emits
/// an RGB24 frame on its source pad. Real demosaic math is out of scope
/// for the simulator: each Bayer sample is replicated into all three
/// channels, which preserves frame geometry and luminance structure.
///
/// While the stream is disabled the node still counts deliveries but
/// emits nothing, so propagation stops here.
pub struct DebayerNode {
    name: String,
    src_pad: u16,
    streaming: bool,
    processed: u64,
}

impl DebayerNode {
    /// Create a debayer emitting on the given source pad.
    pub fn new(name: impl Into<String>, src_pad: u16) -> Self {
        Self {
            name: name.into(),
            src_pad,
            streaming: false,
            processed: 0,
        }
    }

    /// Number of frames delivered to this node.
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Whether the stream is currently enabled.
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    fn convert(&self, frame: &Frame, bpp: usize) -> Frame {
        let meta = frame.meta();
        let pixels = meta.width as usize * meta.height as usize;
        let src = frame.as_bytes();
        let mut rgb = Vec::with_capacity(pixels * 3);

        for p in 0..pixels {
            // Most significant byte of the Bayer sample stands in for the
            // demosaiced value.
            let v = src.get(p * bpp).copied().unwrap_or(0);
            rgb.extend_from_slice(&[v, v, v]);
        }

        let out_meta = FrameMeta::new(mbus::RGB888_1X24, meta.width, meta.height)
            .with_sequence(meta.sequence);
        Frame::new(rgb, out_meta)
    }
}

impl Node for DebayerNode {
    fn process_frame(&mut self, sink_pad: u16, frame: &Frame) -> Option<Output> {
        self.processed += 1;
        tracing::trace!(
            debayer = %self.name,
            sink_pad,
            sequence = frame.meta().sequence,
            "frame received"
        );

        if !self.streaming {
            return None;
        }

        let Some(map) = format::by_code(frame.meta().code) else {
            tracing::warn!(
                debayer = %self.name,
                code = frame.meta().code,
                "unknown pixel code, dropping frame"
            );
            return None;
        };
        if !map.bayer {
            tracing::warn!(
                debayer = %self.name,
                code = frame.meta().code,
                "frame is not a Bayer pattern, dropping"
            );
            return None;
        }

        let out = self.convert(frame, map.bpp);
        Some(Output::new(self.src_pad, out))
    }

    fn set_stream(&mut self, enable: bool) -> Result<()> {
        tracing::debug!(debayer = %self.name, enable, "debayer stream control");
        self.streaming = enable;
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
