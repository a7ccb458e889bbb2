//! Pixel format table.
//!
//! Maps internal media-bus codes to external fourcc pixel formats, with the
//! bytes-per-pixel and Bayer-pattern metadata the pipeline nodes need. The
//! table is fixed at build time and shared read-only; lookups are a linear
//! scan with first-match-wins semantics.

/// Media-bus format codes (the internal pixel codes carried by frames).
pub mod mbus {
    /// BGR 8-8-8, one 24-bit sample.
    pub const BGR888_1X24: u32 = 0x1013;
    /// RGB 8-8-8, one 24-bit sample.
    pub const RGB888_1X24: u32 = 0x100a;
    /// ARGB 8-8-8-8, one 32-bit sample.
    pub const ARGB8888_1X32: u32 = 0x100d;

    /// 8-bit Bayer, BGGR ordering.
    pub const SBGGR8_1X8: u32 = 0x3001;
    /// 8-bit Bayer, GBRG ordering.
    pub const SGBRG8_1X8: u32 = 0x3013;
    /// 8-bit Bayer, GRBG ordering.
    pub const SGRBG8_1X8: u32 = 0x3002;
    /// 8-bit Bayer, RGGB ordering.
    pub const SRGGB8_1X8: u32 = 0x3014;
    /// 10-bit Bayer, BGGR ordering.
    pub const SBGGR10_1X10: u32 = 0x3007;
    /// 10-bit Bayer, GBRG ordering.
    pub const SGBRG10_1X10: u32 = 0x300e;
    /// 10-bit Bayer, GRBG ordering.
    pub const SGRBG10_1X10: u32 = 0x300a;
    /// 10-bit Bayer, RGGB ordering.
    pub const SRGGB10_1X10: u32 = 0x300f;
    /// 10-bit Bayer a-law compressed to 8 bits, BGGR ordering.
    pub const SBGGR10_ALAW8_1X8: u32 = 0x3015;
    /// 10-bit Bayer a-law compressed to 8 bits, GBRG ordering.
    pub const SGBRG10_ALAW8_1X8: u32 = 0x3016;
    /// 10-bit Bayer a-law compressed to 8 bits, GRBG ordering.
    pub const SGRBG10_ALAW8_1X8: u32 = 0x3017;
    /// 10-bit Bayer a-law compressed to 8 bits, RGGB ordering.
    pub const SRGGB10_ALAW8_1X8: u32 = 0x3018;
    /// 10-bit Bayer DPCM compressed to 8 bits, BGGR ordering.
    pub const SBGGR10_DPCM8_1X8: u32 = 0x300b;
    /// 10-bit Bayer DPCM compressed to 8 bits, GBRG ordering.
    pub const SGBRG10_DPCM8_1X8: u32 = 0x300c;
    /// 10-bit Bayer DPCM compressed to 8 bits, GRBG ordering.
    pub const SGRBG10_DPCM8_1X8: u32 = 0x3009;
    /// 10-bit Bayer DPCM compressed to 8 bits, RGGB ordering.
    pub const SRGGB10_DPCM8_1X8: u32 = 0x300d;
    /// 12-bit Bayer, BGGR ordering.
    pub const SBGGR12_1X12: u32 = 0x3008;
    /// 12-bit Bayer, GBRG ordering.
    pub const SGBRG12_1X12: u32 = 0x3010;
    /// 12-bit Bayer, GRBG ordering.
    pub const SGRBG12_1X12: u32 = 0x3011;
    /// 12-bit Bayer, RGGB ordering.
    pub const SRGGB12_1X12: u32 = 0x3012;
}

/// Pack four ASCII bytes into a fourcc code.
pub const fn fourcc(a: u8, b: u8, c: u8, d: u8) -> u32 {
    (a as u32) | ((b as u32) << 8) | ((c as u32) << 16) | ((d as u32) << 24)
}

/// Fourcc pixel-format codes (the external identifiers).
pub mod pixfmt {
    use super::fourcc;

    /// 24-bit BGR.
    pub const BGR24: u32 = fourcc(b'B', b'G', b'R', b'3');
    /// 24-bit RGB.
    pub const RGB24: u32 = fourcc(b'R', b'G', b'B', b'3');
    /// 32-bit ARGB.
    pub const ARGB32: u32 = fourcc(b'B', b'A', b'2', b'4');

    /// 8-bit Bayer BGGR.
    pub const SBGGR8: u32 = fourcc(b'B', b'A', b'8', b'1');
    /// 8-bit Bayer GBRG.
    pub const SGBRG8: u32 = fourcc(b'G', b'B', b'R', b'G');
    /// 8-bit Bayer GRBG.
    pub const SGRBG8: u32 = fourcc(b'G', b'R', b'B', b'G');
    /// 8-bit Bayer RGGB.
    pub const SRGGB8: u32 = fourcc(b'R', b'G', b'G', b'B');
    /// 10-bit Bayer BGGR.
    pub const SBGGR10: u32 = fourcc(b'B', b'G', b'1', b'0');
    /// 10-bit Bayer GBRG.
    pub const SGBRG10: u32 = fourcc(b'G', b'B', b'1', b'0');
    /// 10-bit Bayer GRBG.
    pub const SGRBG10: u32 = fourcc(b'B', b'A', b'1', b'0');
    /// 10-bit Bayer RGGB.
    pub const SRGGB10: u32 = fourcc(b'R', b'G', b'1', b'0');
    /// 10-bit Bayer BGGR, a-law compressed.
    pub const SBGGR10ALAW8: u32 = fourcc(b'a', b'B', b'A', b'8');
    /// 10-bit Bayer GBRG, a-law compressed.
    pub const SGBRG10ALAW8: u32 = fourcc(b'a', b'G', b'A', b'8');
    /// 10-bit Bayer GRBG, a-law compressed.
    pub const SGRBG10ALAW8: u32 = fourcc(b'a', b'g', b'A', b'8');
    /// 10-bit Bayer RGGB, a-law compressed.
    pub const SRGGB10ALAW8: u32 = fourcc(b'a', b'R', b'A', b'8');
    /// 10-bit Bayer BGGR, DPCM compressed.
    pub const SBGGR10DPCM8: u32 = fourcc(b'b', b'B', b'A', b'8');
    /// 10-bit Bayer GBRG, DPCM compressed.
    pub const SGBRG10DPCM8: u32 = fourcc(b'b', b'G', b'A', b'8');
    /// 10-bit Bayer GRBG, DPCM compressed.
    pub const SGRBG10DPCM8: u32 = fourcc(b'B', b'D', b'1', b'0');
    /// 10-bit Bayer RGGB, DPCM compressed.
    pub const SRGGB10DPCM8: u32 = fourcc(b'b', b'R', b'A', b'8');
    /// 12-bit Bayer BGGR.
    pub const SBGGR12: u32 = fourcc(b'B', b'G', b'1', b'2');
    /// 12-bit Bayer GBRG.
    pub const SGBRG12: u32 = fourcc(b'G', b'B', b'1', b'2');
    /// 12-bit Bayer GRBG.
    pub const SGRBG12: u32 = fourcc(b'B', b'A', b'1', b'2');
    /// 12-bit Bayer RGGB.
    pub const SRGGB12: u32 = fourcc(b'R', b'G', b'1', b'2');
}

/// One pixel format: the internal media-bus code paired with its external
/// fourcc, bytes per pixel, and whether it is a raw Bayer sensor pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixMap {
    /// Internal media-bus code.
    pub code: u32,
    /// Bytes per pixel.
    pub bpp: usize,
    /// External fourcc pixel format.
    pub pixelformat: u32,
    /// Whether this is a raw Bayer sensor pattern (needs demosaicing).
    pub bayer: bool,
}

const fn map(code: u32, bpp: usize, pixelformat: u32, bayer: bool) -> PixMap {
    PixMap {
        code,
        bpp,
        pixelformat,
        bayer,
    }
}

/// The pixel format table.
///
/// TODO: add the missing YUV formats.
pub const PIX_MAP_TABLE: &[PixMap] = &[
    // RGB formats
    map(mbus::BGR888_1X24, 3, pixfmt::BGR24, false),
    map(mbus::RGB888_1X24, 3, pixfmt::RGB24, false),
    map(mbus::ARGB8888_1X32, 4, pixfmt::ARGB32, false),
    // Bayer formats
    map(mbus::SBGGR8_1X8, 1, pixfmt::SBGGR8, true),
    map(mbus::SGBRG8_1X8, 1, pixfmt::SGBRG8, true),
    map(mbus::SGRBG8_1X8, 1, pixfmt::SGRBG8, true),
    map(mbus::SRGGB8_1X8, 1, pixfmt::SRGGB8, true),
    map(mbus::SBGGR10_1X10, 2, pixfmt::SBGGR10, true),
    map(mbus::SGBRG10_1X10, 2, pixfmt::SGBRG10, true),
    map(mbus::SGRBG10_1X10, 2, pixfmt::SGRBG10, true),
    map(mbus::SRGGB10_1X10, 2, pixfmt::SRGGB10, true),
    // 10-bit raw Bayer a-law compressed to 8 bits
    map(mbus::SBGGR10_ALAW8_1X8, 1, pixfmt::SBGGR10ALAW8, true),
    map(mbus::SGBRG10_ALAW8_1X8, 1, pixfmt::SGBRG10ALAW8, true),
    map(mbus::SGRBG10_ALAW8_1X8, 1, pixfmt::SGRBG10ALAW8, true),
    map(mbus::SRGGB10_ALAW8_1X8, 1, pixfmt::SRGGB10ALAW8, true),
    // 10-bit raw Bayer DPCM compressed to 8 bits
    map(mbus::SBGGR10_DPCM8_1X8, 1, pixfmt::SBGGR10DPCM8, true),
    map(mbus::SGBRG10_DPCM8_1X8, 1, pixfmt::SGBRG10DPCM8, true),
    map(mbus::SGRBG10_DPCM8_1X8, 1, pixfmt::SGRBG10DPCM8, true),
    map(mbus::SRGGB10_DPCM8_1X8, 1, pixfmt::SRGGB10DPCM8, true),
    map(mbus::SBGGR12_1X12, 2, pixfmt::SBGGR12, true),
    map(mbus::SGBRG12_1X12, 2, pixfmt::SGBRG12, true),
    map(mbus::SGRBG12_1X12, 2, pixfmt::SGRBG12, true),
    map(mbus::SRGGB12_1X12, 2, pixfmt::SRGGB12, true),
];

/// Look up a pixel format by its internal media-bus code.
pub fn by_code(code: u32) -> Option<&'static PixMap> {
    PIX_MAP_TABLE.iter().find(|m| m.code == code)
}

/// Look up a pixel format by its external fourcc pixel format.
pub fn by_pixelformat(pixelformat: u32) -> Option<&'static PixMap> {
    PIX_MAP_TABLE.iter().find(|m| m.pixelformat == pixelformat)
}
