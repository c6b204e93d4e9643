//! Constant byte-string source node

use crate::nodes::factory::{
    create_from_metadata, NodeCategory, NodeFactory, NodeMetadata, PortDefinition,
};
use crate::nodes::interface::NodeData;
use crate::nodes::node::Node;
use crate::nodes::port::DataType;
use egui::{Color32, Pos2};

/// Emits a fixed byte string, typically used as key material
pub struct ConstantBytesNode;

impl NodeFactory for ConstantBytesNode {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "ConstantBytes",
            "Constant Bytes",
            NodeCategory::data(),
            "Emits a constant byte string",
        )
        .with_color(Color32::from_rgb(45, 55, 65))
        .with_inputs(vec![PortDefinition::widget("value", DataType::String)
            .with_description("Literal value, taken as UTF-8 bytes")])
        .with_outputs(vec![PortDefinition::required("bytes", DataType::Bytes)])
    }

    fn create(position: Pos2) -> Node {
        let mut node = create_from_metadata(&Self::metadata(), position);
        node.set_parameter("value", NodeData::String(String::new()));
        node
    }

    fn compute(node: &Node, _inputs: &[NodeData]) -> Result<Vec<NodeData>, String> {
        let bytes = node
            .get_parameter("value")
            .and_then(NodeData::as_bytes)
            .unwrap_or_default();
        Ok(vec![NodeData::Bytes(bytes)])
    }
}
