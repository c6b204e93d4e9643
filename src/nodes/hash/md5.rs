//! MD5 node implementation

use super::{digest_keys, key_material, HASH_NODE_COLOR};
use crate::nodes::factory::{NodeCategory, NodeFactory, NodeMetadata, PortDefinition};
use crate::nodes::interface::NodeData;
use crate::nodes::node::Node;
use crate::nodes::port::DataType;

/// MD5 digest over the wired key inputs
pub struct Md5Node;

impl NodeFactory for Md5Node {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "MD5",
            "MD5",
            NodeCategory::hashing(),
            "MD5 digest over the wired key inputs",
        )
        .with_color(HASH_NODE_COLOR)
        .with_inputs(vec![PortDefinition::required("key1", DataType::String)
            .with_description("First key (mandatory)")])
        .with_outputs(vec![PortDefinition::required("hash_bytes", DataType::Bytes)])
    }

    fn compute(node: &Node, inputs: &[NodeData]) -> Result<Vec<NodeData>, String> {
        let keys = key_material(node, inputs);
        Ok(vec![NodeData::Bytes(digest_keys::<md5::Md5>(&keys))])
    }
}
