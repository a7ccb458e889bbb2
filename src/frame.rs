//! Frame types passed through the pipeline.
//!
//! A [`Frame`] pairs an immutable pixel payload with its [`FrameMeta`].
//! The payload is reference counted, so cloning a frame during fan-out is
//! O(1) and every sink observes the same read-only bytes. A node that
//! needs to transform data produces a new frame instead of mutating the
//! shared one.

use std::sync::Arc;

/// Metadata describing a frame's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameMeta {
    /// Monotonic sequence number assigned by the producing node.
    pub sequence: u64,
    /// Internal media-bus code of the pixel data (see [`crate::format`]).
    pub code: u32,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl FrameMeta {
    /// Create metadata for a frame of the given format and size.
    pub fn new(code: u32, width: u32, height: u32) -> Self {
        Self {
            sequence: 0,
            code,
            width,
            height,
        }
    }

    /// Set the sequence number.
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }
}

/// A frame flowing through the pipeline.
///
/// Frames are cheap to clone (Arc increment); the pixel data is never
/// copied during propagation. The engine does not retain frames after a
/// `propagate` call returns — a capture node that wants to keep one stores
/// its own clone.
#[derive(Debug, Clone)]
pub struct Frame {
    data: Arc<[u8]>,
    meta: FrameMeta,
}

impl Frame {
    /// Create a new frame from pixel data and metadata.
    pub fn new(data: impl Into<Arc<[u8]>>, meta: FrameMeta) -> Self {
        Self {
            data: data.into(),
            meta,
        }
    }

    /// Get the frame's metadata.
    pub fn meta(&self) -> &FrameMeta {
        &self.meta
    }

    /// Get the pixel data as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the length of the pixel data in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the frame has no pixel data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Byte offset of the pixel at (line, column) for the given bpp.
    pub fn pixel_offset(&self, line: u32, col: u32, bpp: usize) -> usize {
        (line as usize * self.meta.width as usize + col as usize) * bpp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::mbus;

    #[test]
    fn test_frame_creation() {
        let meta = FrameMeta::new(mbus::SBGGR8_1X8, 4, 2).with_sequence(7);
        let frame = Frame::new(vec![0u8; 8], meta);

        assert_eq!(frame.len(), 8);
        assert_eq!(frame.meta().sequence, 7);
        assert_eq!(frame.meta().width, 4);
        assert_eq!(frame.meta().height, 2);
    }

    #[test]
    fn test_frame_clone_shares_data() {
        let frame = Frame::new(vec![1u8, 2, 3], FrameMeta::default());
        let clone = frame.clone();

        assert_eq!(frame.as_bytes().as_ptr(), clone.as_bytes().as_ptr());
    }

    #[test]
    fn test_pixel_offset() {
        let meta = FrameMeta::new(mbus::RGB888_1X24, 10, 10);
        let frame = Frame::new(vec![0u8; 300], meta);

        assert_eq!(frame.pixel_offset(0, 0, 3), 0);
        assert_eq!(frame.pixel_offset(1, 0, 3), 30);
        assert_eq!(frame.pixel_offset(2, 5, 3), 75);
    }
}
