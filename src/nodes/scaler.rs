//! Scaler node: upscales frames by a fixed integer multiplier.

use crate::entity::{Node, Output};
use crate::error::Result;
use crate::format;
use crate::frame::{Frame, FrameMeta};
use std::any::Any;

/// A scaling stage.
///
/// Receives a frame on its sink pad and, while streaming, emits the same
/// image upscaled by a fixed integer multiplier on its source pad. The
/// scaling itself is pixel replication (each input pixel becomes a
/// `mult x mult` block); anything fancier is out of scope here.
pub struct ScalerNode {
    name: String,
    src_pad: u16,
    mult: u32,
    streaming: bool,
    processed: u64,
}

impl ScalerNode {
    /// Default scaling multiplier.
    pub const DEFAULT_MULT: u32 = 3;

    /// Create a scaler emitting on the given source pad.
    pub fn new(name: impl Into<String>, src_pad: u16) -> Self {
        Self {
            name: name.into(),
            src_pad,
            mult: Self::DEFAULT_MULT,
            streaming: false,
            processed: 0,
        }
    }

    /// Set the scaling multiplier (must be at least 1).
    pub fn with_mult(mut self, mult: u32) -> Self {
        self.mult = mult.max(1);
        self
    }

    /// The scaling multiplier in use.
    pub fn mult(&self) -> u32 {
        self.mult
    }

    /// Number of frames delivered to this node.
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Whether the stream is currently enabled.
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    fn scale(&self, frame: &Frame, bpp: usize) -> Frame {
        let meta = frame.meta();
        let (w, h, m) = (meta.width as usize, meta.height as usize, self.mult as usize);
        let src = frame.as_bytes();
        let mut out = vec![0u8; w * h * m * m * bpp];
        let out_stride = w * m * bpp;

        for line in 0..h {
            for col in 0..w {
                let pixel = &src[(line * w + col) * bpp..(line * w + col + 1) * bpp];
                for dy in 0..m {
                    let base = (line * m + dy) * out_stride + col * m * bpp;
                    for dx in 0..m {
                        out[base + dx * bpp..base + (dx + 1) * bpp].copy_from_slice(pixel);
                    }
                }
            }
        }

        let out_meta = FrameMeta::new(meta.code, meta.width * self.mult, meta.height * self.mult)
            .with_sequence(meta.sequence);
        Frame::new(out, out_meta)
    }
}

impl Node for ScalerNode {
    fn process_frame(&mut self, sink_pad: u16, frame: &Frame) -> Option<Output> {
        self.processed += 1;
        tracing::trace!(
            scaler = %self.name,
            sink_pad,
            sequence = frame.meta().sequence,
            "frame received"
        );

        if !self.streaming {
            return None;
        }

        let Some(map) = format::by_code(frame.meta().code) else {
            tracing::warn!(
                scaler = %self.name,
                code = frame.meta().code,
                "unknown pixel code, dropping frame"
            );
            return None;
        };

        let expected = frame.meta().width as usize * frame.meta().height as usize * map.bpp;
        if frame.len() < expected {
            tracing::warn!(
                scaler = %self.name,
                len = frame.len(),
                expected,
                "short frame, dropping"
            );
            return None;
        }

        Some(Output::new(self.src_pad, self.scale(frame, map.bpp)))
    }

    fn set_stream(&mut self, enable: bool) -> Result<()> {
        tracing::debug!(scaler = %self.name, enable, "scaler stream control");
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::mbus;

    fn rgb_frame(width: u32, height: u32) -> Frame {
        let data: Vec<u8> = (0..width * height * 3).map(|i| i as u8).collect();
        Frame::new(data, FrameMeta::new(mbus::RGB888_1X24, width, height))
    }

    #[test]
    fn test_not_streaming_drops() {
        let mut sca = ScalerNode::new("sca", 1);
        assert!(sca.process_frame(0, &rgb_frame(2, 2)).is_none());
        assert_eq!(sca.processed(), 1);
    }

    #[test]
    fn test_upscale_geometry() {
        let mut sca = ScalerNode::new("sca", 1);
        sca.set_stream(true).unwrap();

        let out = sca.process_frame(0, &rgb_frame(2, 2)).unwrap();
        assert_eq!(out.src_pad, 1);
        assert_eq!(out.frame.meta().width, 6);
        assert_eq!(out.frame.meta().height, 6);
        assert_eq!(out.frame.len(), 6 * 6 * 3);
        assert_eq!(out.frame.meta().code, mbus::RGB888_1X24);
    }

    #[test]
    fn test_pixel_replication() {
        let mut sca = ScalerNode::new("sca", 1).with_mult(2);
        sca.set_stream(true).unwrap();

        // 1x1 single-byte Bayer pixel of value 9 becomes a 2x2 block.
        let input = Frame::new(vec![9u8], FrameMeta::new(mbus::SBGGR8_1X8, 1, 1));
        let out = sca.process_frame(0, &input).unwrap();
        assert_eq!(out.frame.as_bytes(), &[9, 9, 9, 9]);
    }

    #[test]
    fn test_short_frame_dropped() {
        let mut sca = ScalerNode::new("sca", 1);
        sca.set_stream(true).unwrap();

        let short = Frame::new(vec![0u8; 3], FrameMeta::new(mbus::RGB888_1X24, 2, 2));
        assert!(sca.process_frame(0, &short).is_none());
    }
}
