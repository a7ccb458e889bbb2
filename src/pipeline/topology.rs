//! Static topology description.
//!
//! A [`TopologyConfig`] is the externally authored blueprint a
//! [`Graph`](crate::pipeline::Graph) is built from: an ordered list of
//! entity descriptors and an ordered list of link descriptors referencing
//! entities by index. It is read-only at runtime and may be shared between
//! any number of graph instances.

use crate::entity::{NodeKind, PadDirection};

/// Flags on a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkFlags {
    /// Whether frames flow across this link.
    pub enabled: bool,
    /// Whether the enabled state is fixed for the graph's lifetime.
    pub immutable: bool,
}

impl LinkFlags {
    /// A disabled, mutable link.
    pub const fn none() -> Self {
        Self {
            enabled: false,
            immutable: false,
        }
    }

    /// An enabled, mutable link.
    pub const fn enabled() -> Self {
        Self {
            enabled: true,
            immutable: false,
        }
    }

    /// An enabled link whose state can never change.
    pub const fn enabled_immutable() -> Self {
        Self {
            enabled: true,
            immutable: true,
        }
    }
}

/// Configuration for one entity in the topology.
#[derive(Debug, Clone)]
pub struct EntityConfig {
    /// Display name.
    pub name: String,
    /// Node functionality.
    pub kind: NodeKind,
    /// Number of pads the entity must have.
    ///
    /// Carried separately from the direction list so a disagreement is
    /// detectable as a malformed config.
    pub pad_count: u16,
    /// Direction capability of each pad, in pad-index order.
    pub pad_directions: Vec<PadDirection>,
}

impl EntityConfig {
    /// Create an entity descriptor; `pad_count` is taken from the
    /// direction list.
    pub fn new(name: impl Into<String>, kind: NodeKind, directions: &[PadDirection]) -> Self {
        Self {
            name: name.into(),
            kind,
            pad_count: directions.len() as u16,
            pad_directions: directions.to_vec(),
        }
    }
}

/// Configuration for one link between two entities.
#[derive(Debug, Clone, Copy)]
pub struct LinkConfig {
    /// Index of the source entity in the entity list.
    pub src_ent: usize,
    /// Source pad index within the source entity.
    pub src_pad: u16,
    /// Index of the sink entity in the entity list.
    pub sink_ent: usize,
    /// Sink pad index within the sink entity.
    pub sink_pad: u16,
    /// Link flags.
    pub flags: LinkFlags,
}

impl LinkConfig {
    /// Create a link descriptor.
    pub fn new(src_ent: usize, src_pad: u16, sink_ent: usize, sink_pad: u16, flags: LinkFlags) -> Self {
        Self {
            src_ent,
            src_pad,
            sink_ent,
            sink_pad,
            flags,
        }
    }
}

/// The whole topology: entity descriptors plus link descriptors.
#[derive(Debug, Clone, Default)]
pub struct TopologyConfig {
    /// Entity descriptors, in creation order.
    pub entities: Vec<EntityConfig>,
    /// Link descriptors, in creation order.
    pub links: Vec<LinkConfig>,
}

impl TopologyConfig {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference camera topology.
    ///
    /// Nine entities, eight links:
    ///
    /// ```text
    /// Sensor A ──┬──> Debayer A ──> Scaler ──> RGB/YUV Capture
    ///            └──> Raw Capture 0       ^ ^
    /// Sensor B ──┬──> Debayer B ──────────┘ │   (disabled)
    ///            └──> Raw Capture 1         │
    /// RGB/YUV Input ────────────────────────┘   (disabled)
    /// ```
    ///
    /// Entity indices: 0 Sensor A, 1 Sensor B, 2 Debayer A, 3 Debayer B,
    /// 4 Raw Capture 0, 5 Raw Capture 1, 6 RGB/YUV Input, 7 Scaler,
    /// 8 RGB/YUV Capture.
    pub fn default_camera() -> Self {
        use crate::entity::PadDirection::{Sink, Source};

        let entities = vec![
            EntityConfig::new("Sensor A", NodeKind::Sensor, &[Source]),
            EntityConfig::new("Sensor B", NodeKind::Sensor, &[Source]),
            EntityConfig::new("Debayer A", NodeKind::Debayer, &[Sink, Source]),
            EntityConfig::new("Debayer B", NodeKind::Debayer, &[Sink, Source]),
            EntityConfig::new("Raw Capture 0", NodeKind::Capture, &[Sink]),
            EntityConfig::new("Raw Capture 1", NodeKind::Capture, &[Sink]),
            EntityConfig::new("RGB/YUV Input", NodeKind::Input, &[Source]),
            EntityConfig::new("Scaler", NodeKind::Scaler, &[Sink, Source]),
            EntityConfig::new("RGB/YUV Capture", NodeKind::Capture, &[Sink]),
        ];

        let links = vec![
            // Sensor A (pad 0) -> (pad 0) Debayer A
            LinkConfig::new(0, 0, 2, 0, LinkFlags::enabled_immutable()),
            // Sensor A (pad 0) -> (pad 0) Raw Capture 0
            LinkConfig::new(0, 0, 4, 0, LinkFlags::enabled_immutable()),
            // Sensor B (pad 0) -> (pad 0) Debayer B
            LinkConfig::new(1, 0, 3, 0, LinkFlags::enabled_immutable()),
            // Sensor B (pad 0) -> (pad 0) Raw Capture 1
            LinkConfig::new(1, 0, 5, 0, LinkFlags::enabled_immutable()),
            // Debayer A (pad 1) -> (pad 0) Scaler
            LinkConfig::new(2, 1, 7, 0, LinkFlags::enabled()),
            // Debayer B (pad 1) -> (pad 0) Scaler
            LinkConfig::new(3, 1, 7, 0, LinkFlags::none()),
            // RGB/YUV Input (pad 0) -> (pad 0) Scaler
            LinkConfig::new(6, 0, 7, 0, LinkFlags::none()),
            // Scaler (pad 1) -> (pad 0) RGB/YUV Capture
            LinkConfig::new(7, 1, 8, 0, LinkFlags::enabled_immutable()),
        ];

        Self { entities, links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_shape() {
        let config = TopologyConfig::default_camera();
        assert_eq!(config.entities.len(), 9);
        assert_eq!(config.links.len(), 8);
    }

    #[test]
    fn test_default_camera_pad_counts_consistent() {
        let config = TopologyConfig::default_camera();
        for ent in &config.entities {
            assert_eq!(ent.pad_count as usize, ent.pad_directions.len());
        }
    }

    #[test]
    fn test_default_camera_link_indices_in_range() {
        let config = TopologyConfig::default_camera();
        for link in &config.links {
            assert!(link.src_ent < config.entities.len());
            assert!(link.sink_ent < config.entities.len());
        }
    }

    #[test]
    fn test_link_flags_constructors() {
        assert!(!LinkFlags::none().enabled);
        assert!(LinkFlags::enabled().enabled);
        assert!(!LinkFlags::enabled().immutable);
        assert!(LinkFlags::enabled_immutable().immutable);
    }
}
