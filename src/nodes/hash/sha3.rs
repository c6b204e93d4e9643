//! SHA-3 family node implementation

use super::{algorithm_param, digest_keys, key_material, HASH_NODE_COLOR};
use crate::nodes::factory::{
    create_from_metadata, NodeCategory, NodeFactory, NodeMetadata, PortDefinition,
};
use crate::nodes::interface::NodeData;
use crate::nodes::node::Node;
use crate::nodes::port::DataType;
use egui::Pos2;
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

/// Configurable SHA-3 digest over the wired key inputs
pub struct Sha3Node;

impl NodeFactory for Sha3Node {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "SHA3",
            "SHA3",
            NodeCategory::hashing(),
            "SHA-3 family digest over the wired key inputs",
        )
        .with_color(HASH_NODE_COLOR)
        .with_inputs(vec![
            PortDefinition::widget("algorithm", DataType::String)
                .with_description("SHA3_224, SHA3_256, SHA3_384 or SHA3_512"),
            PortDefinition::required("key1", DataType::String)
                .with_description("First key (mandatory)"),
        ])
        .with_outputs(vec![PortDefinition::required("hash_bytes", DataType::Bytes)])
    }

    fn create(position: Pos2) -> Node {
        let mut node = create_from_metadata(&Self::metadata(), position);
        node.set_parameter("algorithm", NodeData::String("SHA3_256".to_string()));
        node
    }

    fn compute(node: &Node, inputs: &[NodeData]) -> Result<Vec<NodeData>, String> {
        let keys = key_material(node, inputs);
        let digest = match algorithm_param(node, "SHA3_256") {
            "SHA3_224" => digest_keys::<Sha3_224>(&keys),
            "SHA3_256" => digest_keys::<Sha3_256>(&keys),
            "SHA3_384" => digest_keys::<Sha3_384>(&keys),
            "SHA3_512" => digest_keys::<Sha3_512>(&keys),
            other => return Err(format!("Unknown SHA3 algorithm: {other}")),
        };
        Ok(vec![NodeData::Bytes(digest)])
    }
}
