//! The live topology graph: construction, frame propagation and stream
//! control.
//!
//! A [`Graph`] owns every entity and link built from a
//! [`TopologyConfig`]. Entities, pads and links reference each other by
//! index, never by pointer, so ownership stays flat and teardown order is
//! explicit: reverse creation order, teardown hooks included.

use crate::entity::{Entity, Pad, PadDirection};
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::pipeline::factory;
use crate::pipeline::topology::{LinkConfig, LinkFlags, TopologyConfig};
use smallvec::SmallVec;

/// Reference to one pad of one entity, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PadRef {
    /// Entity index within the graph.
    pub entity: usize,
    /// Pad index within the entity.
    pub pad: u16,
}

impl PadRef {
    /// Create a pad reference.
    pub fn new(entity: usize, pad: u16) -> Self {
        Self { entity, pad }
    }
}

impl std::fmt::Display for PadRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity {} pad {}", self.entity, self.pad)
    }
}

/// A directed link from a source pad to a sink pad.
#[derive(Debug, Clone, Copy)]
pub struct Link {
    src: PadRef,
    sink: PadRef,
    flags: LinkFlags,
}

impl Link {
    /// The source end of the link.
    pub fn src(&self) -> PadRef {
        self.src
    }

    /// The sink end of the link.
    pub fn sink(&self) -> PadRef {
        self.sink
    }

    /// Whether frames currently flow across this link.
    pub fn is_enabled(&self) -> bool {
        self.flags.enabled
    }

    /// Whether the enabled state is fixed for the graph's lifetime.
    pub fn is_immutable(&self) -> bool {
        self.flags.immutable
    }
}

/// Validation hook invoked per connected pad pair before a link is
/// accepted; returning `false` rejects the link.
pub type LinkValidator = dyn Fn(&Entity, &Pad, &Entity, &Pad) -> bool;

/// A live pipeline instance.
///
/// Exactly one graph exists per active pipeline; independent instances
/// built from the same config share no mutable state. All operations run
/// synchronously in the calling context — there is no internal scheduler
/// and no locking, so cross-thread use needs external synchronization.
pub struct Graph {
    entities: Vec<Entity>,
    links: Vec<Link>,
}

impl Graph {
    /// Build a graph from a topology config.
    pub fn build(config: &TopologyConfig) -> Result<Self> {
        Self::build_with_validator(config, None)
    }

    /// Build a graph, validating each link with the given hook.
    ///
    /// On any failure the entities created so far are torn down in
    /// reverse order before the error is returned; a partial graph never
    /// leaks.
    pub fn build_with_validator(
        config: &TopologyConfig,
        validator: Option<&LinkValidator>,
    ) -> Result<Self> {
        let mut graph = Self {
            entities: Vec::with_capacity(config.entities.len()),
            links: Vec::with_capacity(config.links.len()),
        };

        // Dropping `graph` on an early return unwinds the entities
        // created so far, newest first, with their teardown hooks.
        for ent_config in &config.entities {
            graph.entities.push(factory::create(ent_config)?);
        }

        for (index, link_config) in config.links.iter().enumerate() {
            graph.add_link(index, link_config, validator)?;
        }

        tracing::info!(
            entities = graph.entities.len(),
            links = graph.links.len(),
            "graph built"
        );
        Ok(graph)
    }

    fn add_link(
        &mut self,
        index: usize,
        config: &LinkConfig,
        validator: Option<&LinkValidator>,
    ) -> Result<()> {
        let src_ent = self.entities.get(config.src_ent).ok_or_else(|| {
            Error::OutOfRange(format!("link {index}: source entity {}", config.src_ent))
        })?;
        let src_pad = src_ent.pad(config.src_pad).ok_or_else(|| {
            Error::OutOfRange(format!(
                "link {index}: pad {} of '{}'",
                config.src_pad,
                src_ent.name()
            ))
        })?;
        let sink_ent = self.entities.get(config.sink_ent).ok_or_else(|| {
            Error::OutOfRange(format!("link {index}: sink entity {}", config.sink_ent))
        })?;
        let sink_pad = sink_ent.pad(config.sink_pad).ok_or_else(|| {
            Error::OutOfRange(format!(
                "link {index}: pad {} of '{}'",
                config.sink_pad,
                sink_ent.name()
            ))
        })?;

        if !src_pad.is_source() {
            return Err(Error::DirectionMismatch(format!(
                "link {index}: pad {} of '{}' is not a source pad",
                config.src_pad,
                src_ent.name()
            )));
        }
        if !sink_pad.is_sink() {
            return Err(Error::DirectionMismatch(format!(
                "link {index}: pad {} of '{}' is not a sink pad",
                config.sink_pad,
                sink_ent.name()
            )));
        }

        if let Some(validate) = validator {
            if !validate(src_ent, src_pad, sink_ent, sink_pad) {
                return Err(Error::LinkRejected(format!(
                    "link {index}: '{}' pad {} -> '{}' pad {}",
                    src_ent.name(),
                    config.src_pad,
                    sink_ent.name(),
                    config.sink_pad
                )));
            }
        }

        self.links.push(Link {
            src: PadRef::new(config.src_ent, config.src_pad),
            sink: PadRef::new(config.sink_ent, config.sink_pad),
            flags: config.flags,
        });
        Ok(())
    }

    /// Tear down the graph.
    ///
    /// Every entity's teardown hook runs in reverse creation order, then
    /// all links are released. Consuming `self` makes a second destroy
    /// unrepresentable. Dropping an un-destroyed graph performs the same
    /// teardown.
    pub fn destroy(mut self) {
        self.teardown_all();
    }

    fn teardown_all(&mut self) {
        if !self.entities.is_empty() {
            tracing::info!(entities = self.entities.len(), "tearing down graph");
        }
        while let Some(mut entity) = self.entities.pop() {
            entity.node_mut().teardown();
        }
        self.links.clear();
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// All entities, in creation order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Get an entity by index.
    pub fn entity(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    /// Get a mutable reference to an entity by index.
    pub fn entity_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entities.get_mut(index)
    }

    /// All links, in creation order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Get a link by index.
    pub fn link(&self, index: usize) -> Option<&Link> {
        self.links.get(index)
    }

    /// Enable or disable a link.
    ///
    /// Immutable links reject any state change with
    /// [`Error::ImmutableLink`]; setting the current state again is a
    /// no-op success.
    pub fn set_link_enabled(&mut self, index: usize, enabled: bool) -> Result<()> {
        let link = self
            .links
            .get_mut(index)
            .ok_or_else(|| Error::OutOfRange(format!("link {index}")))?;

        if link.flags.enabled == enabled {
            return Ok(());
        }
        if link.flags.immutable {
            return Err(Error::ImmutableLink(index));
        }

        link.flags.enabled = enabled;
        tracing::debug!(link = index, enabled, "link state changed");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Frame propagation
    // ------------------------------------------------------------------

    /// Push a frame from a source pad to every sink pad reachable via an
    /// enabled outgoing link.
    ///
    /// Delivery is synchronous fan-out: each sink's frame hook runs in
    /// turn with a reference to the same frame, and when a hook emits a
    /// new frame on one of its own source pads the engine recurses on it.
    /// Recursion depth is bounded by pipeline depth; no cycle detection
    /// is performed, acyclic topologies are the author's responsibility.
    ///
    /// Calling this on a pad without source capability is a caller bug
    /// and fails with [`Error::InvalidDirection`].
    pub fn propagate(&mut self, src: PadRef, frame: &Frame) -> Result<()> {
        let entity = self
            .entities
            .get(src.entity)
            .ok_or_else(|| Error::OutOfRange(format!("{src}")))?;
        let pad = entity
            .pad(src.pad)
            .ok_or_else(|| Error::OutOfRange(format!("{src}")))?;
        if !pad.is_source() {
            return Err(Error::InvalidDirection {
                entity: src.entity,
                pad: src.pad,
            });
        }

        let targets: SmallVec<[PadRef; 4]> = self
            .links
            .iter()
            .filter(|link| link.src == src && link.flags.enabled)
            .map(|link| link.sink)
            .collect();

        for sink in targets {
            tracing::trace!(
                from = %src,
                to = %sink,
                sequence = frame.meta().sequence,
                "delivering frame"
            );
            let emitted = self.entities[sink.entity]
                .node_mut()
                .process_frame(sink.pad, frame);
            if let Some(output) = emitted {
                self.propagate(PadRef::new(sink.entity, output.src_pad), &output.frame)?;
            }
        }
        Ok(())
    }

    /// Ask an entity's node to generate a frame and propagate it from the
    /// entity's first source pad.
    ///
    /// This is the call-driven stand-in for a sensor's free-running
    /// capture loop. A node that generates nothing (e.g. a sensor whose
    /// stream is off) makes this a no-op success.
    pub fn trigger(&mut self, entity: usize) -> Result<()> {
        let frame = {
            let ent = self
                .entities
                .get_mut(entity)
                .ok_or_else(|| Error::OutOfRange(format!("entity {entity}")))?;
            ent.node_mut().generate_frame()
        };
        let Some(frame) = frame else {
            return Ok(());
        };

        let Some(src_pad) = self.entities[entity].first_pad(PadDirection::Source) else {
            tracing::warn!(entity, "generated a frame but has no source pad");
            return Ok(());
        };
        self.propagate(PadRef::new(entity, src_pad), &frame)
    }

    // ------------------------------------------------------------------
    // Streaming control
    // ------------------------------------------------------------------

    /// Start or stop the stream one hop upstream of an entity.
    ///
    /// Looks up the remote end of the enabled link connected to the
    /// entity's pad 0. If there is no remote, or the remote entity is an
    /// I/O boundary rather than a processing node, this is a no-op
    /// success (there is nothing to activate, e.g. the entity hangs off
    /// an input device or is not connected at all). A remote node
    /// reporting [`Error::NotSupported`] also counts as success; any
    /// other failure is surfaced unchanged.
    pub fn set_stream(&mut self, entity: usize, enable: bool) -> Result<()> {
        if entity >= self.entities.len() {
            return Err(Error::OutOfRange(format!("entity {entity}")));
        }

        // TODO: forward the command through every connected pad, not
        // just pad 0.
        let Some(remote) = self.remote_pad(PadRef::new(entity, 0)) else {
            return Ok(());
        };
        if !self.entities[remote.entity].kind().is_processing() {
            return Ok(());
        }

        tracing::debug!(
            entity,
            remote = %remote,
            enable,
            "forwarding stream command"
        );
        match self.entities[remote.entity].node_mut().set_stream(enable) {
            Err(Error::NotSupported) => Ok(()),
            other => other,
        }
    }

    /// The pad at the other end of the first enabled link touching `pad`.
    fn remote_pad(&self, pad: PadRef) -> Option<PadRef> {
        self.links.iter().find_map(|link| {
            if !link.flags.enabled {
                None
            } else if link.src == pad {
                Some(link.sink)
            } else if link.sink == pad {
                Some(link.src)
            } else {
                None
            }
        })
    }
}

impl Drop for Graph {
    fn drop(&mut self) {
        self.teardown_all();
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("entities", &self.entities.len())
            .field("links", &self.links.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::NodeKind;
    use crate::frame::{Frame, FrameMeta};
    use crate::pipeline::topology::{EntityConfig, TopologyConfig};
    use crate::entity::PadDirection::{Sink, Source};
    use proptest::prelude::*;

    fn two_entity_config(
        src_dirs: &[PadDirection],
        sink_dirs: &[PadDirection],
        link: LinkConfig,
    ) -> TopologyConfig {
        TopologyConfig {
            entities: vec![
                EntityConfig::new("a", NodeKind::Input, src_dirs),
                EntityConfig::new("b", NodeKind::Input, sink_dirs),
            ],
            links: vec![link],
        }
    }

    #[test]
    fn test_build_default_camera() {
        let graph = Graph::build(&TopologyConfig::default_camera()).unwrap();
        assert_eq!(graph.entities().len(), 9);
        assert_eq!(graph.links().len(), 8);
        graph.destroy();
    }

    #[test]
    fn test_link_out_of_range_entity() {
        let config = two_entity_config(
            &[Source],
            &[Sink],
            LinkConfig::new(5, 0, 1, 0, LinkFlags::enabled()),
        );
        assert!(matches!(
            Graph::build(&config).unwrap_err(),
            Error::OutOfRange(_)
        ));
    }

    #[test]
    fn test_link_out_of_range_pad() {
        let config = two_entity_config(
            &[Source],
            &[Sink],
            LinkConfig::new(0, 3, 1, 0, LinkFlags::enabled()),
        );
        assert!(matches!(
            Graph::build(&config).unwrap_err(),
            Error::OutOfRange(_)
        ));
    }

    #[test]
    fn test_link_direction_mismatch() {
        // Source pad on the sink side.
        let config = two_entity_config(
            &[Source],
            &[Source],
            LinkConfig::new(0, 0, 1, 0, LinkFlags::enabled()),
        );
        assert!(matches!(
            Graph::build(&config).unwrap_err(),
            Error::DirectionMismatch(_)
        ));
    }

    #[test]
    fn test_link_validator_rejection() {
        let config = two_entity_config(
            &[Source],
            &[Sink],
            LinkConfig::new(0, 0, 1, 0, LinkFlags::enabled()),
        );
        let reject_all: Box<LinkValidator> = Box::new(|_, _, _, _| false);
        assert!(matches!(
            Graph::build_with_validator(&config, Some(reject_all.as_ref())).unwrap_err(),
            Error::LinkRejected(_)
        ));

        let accept_all: Box<LinkValidator> = Box::new(|_, _, _, _| true);
        assert!(Graph::build_with_validator(&config, Some(accept_all.as_ref())).is_ok());
    }

    #[test]
    fn test_immutable_link_cannot_be_toggled() {
        let mut graph = Graph::build(&TopologyConfig::default_camera()).unwrap();

        // Link 0 (Sensor A -> Debayer A) is enabled and immutable.
        assert!(graph.link(0).unwrap().is_immutable());
        assert!(matches!(
            graph.set_link_enabled(0, false).unwrap_err(),
            Error::ImmutableLink(0)
        ));
        // Re-asserting the current state is fine.
        graph.set_link_enabled(0, true).unwrap();
        assert!(graph.link(0).unwrap().is_enabled());
    }

    #[test]
    fn test_mutable_link_toggles() {
        let mut graph = Graph::build(&TopologyConfig::default_camera()).unwrap();

        // Link 4 (Debayer A -> Scaler) is enabled and mutable.
        graph.set_link_enabled(4, false).unwrap();
        assert!(!graph.link(4).unwrap().is_enabled());
        graph.set_link_enabled(4, true).unwrap();
        assert!(graph.link(4).unwrap().is_enabled());
    }

    #[test]
    fn test_propagate_from_sink_pad_is_an_error() {
        let mut graph = Graph::build(&TopologyConfig::default_camera()).unwrap();
        let frame = Frame::new(vec![0u8; 4], FrameMeta::default());

        // Pad 0 of Debayer A is a sink pad.
        let err = graph.propagate(PadRef::new(2, 0), &frame).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidDirection { entity: 2, pad: 0 }
        ));
    }

    #[test]
    fn test_propagate_unknown_pad() {
        let mut graph = Graph::build(&TopologyConfig::default_camera()).unwrap();
        let frame = Frame::new(vec![0u8; 4], FrameMeta::default());

        assert!(matches!(
            graph.propagate(PadRef::new(42, 0), &frame).unwrap_err(),
            Error::OutOfRange(_)
        ));
        assert!(matches!(
            graph.propagate(PadRef::new(0, 9), &frame).unwrap_err(),
            Error::OutOfRange(_)
        ));
    }

    #[test]
    fn test_set_stream_out_of_range() {
        let mut graph = Graph::build(&TopologyConfig::default_camera()).unwrap();
        assert!(matches!(
            graph.set_stream(99, true).unwrap_err(),
            Error::OutOfRange(_)
        ));
    }

    #[test]
    fn test_set_stream_no_neighbor_is_noop() {
        // The RGB/YUV Input's pad 0 has only a disabled link; nothing to
        // activate.
        let mut graph = Graph::build(&TopologyConfig::default_camera()).unwrap();
        graph.set_stream(6, true).unwrap();
    }

    #[test]
    fn test_set_stream_forwards_to_upstream_sensor() {
        // Debayer A's pad 0 neighbor across the enabled link is Sensor A.
        let mut graph = Graph::build(&TopologyConfig::default_camera()).unwrap();
        graph.set_stream(2, true).unwrap();

        let sensor = graph
            .entity(0)
            .unwrap()
            .node_as::<crate::nodes::SensorNode>()
            .unwrap();
        assert!(sensor.is_streaming());

        graph.set_stream(2, false).unwrap();
        let sensor = graph
            .entity(0)
            .unwrap()
            .node_as::<crate::nodes::SensorNode>()
            .unwrap();
        assert!(!sensor.is_streaming());
    }

    #[test]
    fn test_set_stream_boundary_neighbor_is_noop() {
        // Rewire the scaler's input to the RGB/YUV Input entity, an I/O
        // boundary with no stream hook of its own.
        let mut graph = Graph::build(&TopologyConfig::default_camera()).unwrap();
        graph.set_link_enabled(4, false).unwrap();
        graph.set_link_enabled(6, true).unwrap();

        graph.set_stream(7, true).unwrap();
    }

    proptest! {
        /// A link is accepted iff its source pad has source capability
        /// and its sink pad has sink capability.
        #[test]
        fn prop_link_direction_validation(
            src_dirs in proptest::collection::vec(any::<bool>(), 1..4),
            sink_dirs in proptest::collection::vec(any::<bool>(), 1..4),
            src_pick in any::<prop::sample::Index>(),
            sink_pick in any::<prop::sample::Index>(),
        ) {
            let to_dirs = |bits: &[bool]| -> Vec<PadDirection> {
                bits.iter()
                    .map(|&b| if b { Source } else { Sink })
                    .collect()
            };
            let src_dirs = to_dirs(&src_dirs);
            let sink_dirs = to_dirs(&sink_dirs);
            let src_pad = src_pick.index(src_dirs.len());
            let sink_pad = sink_pick.index(sink_dirs.len());

            let config = two_entity_config(
                &src_dirs,
                &sink_dirs,
                LinkConfig::new(0, src_pad as u16, 1, sink_pad as u16, LinkFlags::enabled()),
            );

            let valid = src_dirs[src_pad] == Source && sink_dirs[sink_pad] == Sink;
            match Graph::build(&config) {
                Ok(graph) => {
                    prop_assert!(valid);
                    graph.destroy();
                }
                Err(Error::DirectionMismatch(_)) => prop_assert!(!valid),
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }
    }
}
