//! Pad abstraction for entity connection points.
//!
//! Pads are where links attach to an entity. Each entity owns an ordered
//! set of pads, indexed from zero; a pad either emits frames (source) or
//! receives them (sink).

/// Direction capability of a pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadDirection {
    /// A source pad (emits frames downstream).
    Source,
    /// A sink pad (receives frames from upstream).
    Sink,
}

/// A pad instance on an entity.
///
/// Pads are owned exclusively by their entity and referenced by index; the
/// index is stable for the graph's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pad {
    /// Index of this pad within its entity.
    index: u16,
    /// Direction capability.
    direction: PadDirection,
}

impl Pad {
    /// Create a new pad.
    pub fn new(index: u16, direction: PadDirection) -> Self {
        Self { index, direction }
    }

    /// Create a source pad.
    pub fn source(index: u16) -> Self {
        Self::new(index, PadDirection::Source)
    }

    /// Create a sink pad.
    pub fn sink(index: u16) -> Self {
        Self::new(index, PadDirection::Sink)
    }

    /// Get the pad's index within its entity.
    pub fn index(&self) -> u16 {
        self.index
    }

    /// Get the pad's direction.
    pub fn direction(&self) -> PadDirection {
        self.direction
    }

    /// Check if this is a source pad.
    pub fn is_source(&self) -> bool {
        self.direction == PadDirection::Source
    }

    /// Check if this is a sink pad.
    pub fn is_sink(&self) -> bool {
        self.direction == PadDirection::Sink
    }
}

/// Allocate and initialize pads from a direction list.
///
/// Pad indices are assigned in order, `0..directions.len()`.
pub fn pads_init(directions: &[PadDirection]) -> Vec<Pad> {
    directions
        .iter()
        .enumerate()
        .map(|(i, &dir)| Pad::new(i as u16, dir))
        .collect()
}
