//! Node factory: turns entity descriptors into live entities.

use crate::entity::{pads_init, Entity, Node, NodeKind, PadDirection};
use crate::error::{Error, Result};
use crate::nodes::{CaptureNode, DebayerNode, RawNode, ScalerNode, SensorNode};
use crate::pipeline::topology::EntityConfig;

/// Create a fully formed entity from a descriptor.
///
/// Allocates exactly `pad_count` pads with the configured directions and
/// installs the kind-specific node. No links are attached yet.
///
/// Kinds without dedicated node logic (Input) fall back to the raw
/// placeholder rather than failing; the entity still participates in the
/// topology, it just has no frame hook.
pub fn create(config: &EntityConfig) -> Result<Entity> {
    if config.pad_count as usize != config.pad_directions.len() {
        return Err(Error::InvalidConfig(format!(
            "entity '{}': pad_count {} disagrees with {} pad directions",
            config.name,
            config.pad_count,
            config.pad_directions.len()
        )));
    }

    let pads = pads_init(&config.pad_directions);
    let src_pad = pads
        .iter()
        .find(|p| p.is_source())
        .map(|p| p.index())
        .unwrap_or(0);

    let node: Box<dyn Node> = match config.kind {
        NodeKind::Sensor => Box::new(SensorNode::new(&config.name, src_pad)),
        NodeKind::Capture => Box::new(CaptureNode::new(&config.name)),
        NodeKind::Debayer => Box::new(DebayerNode::new(&config.name, src_pad)),
        NodeKind::Scaler => Box::new(ScalerNode::new(&config.name, src_pad)),
        // Generic placeholder until input gets node-specific logic.
        NodeKind::Input => Box::new(RawNode::new(&config.name)),
    };

    tracing::debug!(
        entity = %config.name,
        kind = ?config.kind,
        pads = config.pad_count,
        "entity created"
    );
    Ok(Entity::new(&config.name, config.kind, pads, node))
}

/// Convenience wrapper building a descriptor on the fly.
pub fn create_with(
    name: &str,
    kind: NodeKind,
    directions: &[PadDirection],
) -> Result<Entity> {
    create(&EntityConfig::new(name, kind, directions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::PadDirection::{Sink, Source};
    use crate::nodes::{CaptureNode, RawNode, SensorNode};

    #[test]
    fn test_create_dispatches_by_kind() {
        let sensor = create_with("s", NodeKind::Sensor, &[Source]).unwrap();
        assert!(sensor.node_as::<SensorNode>().is_some());

        let cap = create_with("c", NodeKind::Capture, &[Sink]).unwrap();
        assert!(cap.node_as::<CaptureNode>().is_some());

        let deb = create_with("d", NodeKind::Debayer, &[Sink, Source]).unwrap();
        assert!(deb.node_as::<crate::nodes::DebayerNode>().is_some());

        let sca = create_with("x", NodeKind::Scaler, &[Sink, Source]).unwrap();
        assert!(sca.node_as::<crate::nodes::ScalerNode>().is_some());
    }

    #[test]
    fn test_input_falls_back_to_raw_placeholder() {
        let input = create_with("in", NodeKind::Input, &[Source]).unwrap();
        assert!(input.node_as::<RawNode>().is_some());
        assert_eq!(input.kind(), NodeKind::Input);
    }

    #[test]
    fn test_pads_match_descriptor() {
        let ent = create_with("d", NodeKind::Debayer, &[Sink, Source]).unwrap();
        assert_eq!(ent.pads().len(), 2);
        assert!(ent.pad(0).unwrap().is_sink());
        assert!(ent.pad(1).unwrap().is_source());
    }

    #[test]
    fn test_pad_count_mismatch_rejected() {
        let config = EntityConfig {
            name: "bad".into(),
            kind: NodeKind::Sensor,
            pad_count: 2,
            pad_directions: vec![Source],
        };
        let err = create(&config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_pad_entity_allowed() {
        let ent = create_with("island", NodeKind::Input, &[]).unwrap();
        assert!(ent.pads().is_empty());
    }
}
