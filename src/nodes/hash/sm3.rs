//! SM3 node implementation

use super::{digest_keys, key_material, HASH_NODE_COLOR};
use crate::nodes::factory::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};
use crate::nodes::interface::NodeData;
use crate::nodes::node::Node;
use crate::nodes::port::DataType;

/// SM3 digest over the wired key inputs
pub struct Sm3Node;

impl NodeFactory for Sm3Node {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "SM3",
            "SM3",
            NodeCategory::hashing(),
            "SM3 digest over the wired key inputs",
        )
        .with_color(HASH_NODE_COLOR)
        .with_inputs(vec![PortDefinition::required("key1", DataType::String)
            .with_description("First key (mandatory)")])
        .with_outputs(vec![PortDefinition::required("hash_bytes", DataType::Bytes)])
    }

    fn compute(node: &Node, inputs: &[NodeData]) -> Result<Vec<NodeData>, String> {
        let keys = key_material(node, inputs);
        Ok(vec![NodeData::Bytes(digest_keys::<sm3::Sm3>(&keys))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::hash::test_util::to_hex;
    use egui::Pos2;

    #[test]
    fn test_sm3_node_creation() {
        let node = Sm3Node::create(Pos2::ZERO);
        assert_eq!(node.type_id, "SM3");
        assert_eq!(node.inputs[0].name, "key1");
    }

    #[test]
    fn test_sm3_digest() {
        let node = Sm3Node::create(Pos2::ZERO);
        let outputs =
            Sm3Node::compute(&node, &[NodeData::String("abc".to_string())]).unwrap();
        let NodeData::Bytes(digest) = &outputs[0] else {
            panic!("expected bytes");
        };
        assert_eq!(
            to_hex(digest),
            "66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0"
        );
    }
}
