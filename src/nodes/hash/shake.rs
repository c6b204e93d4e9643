//! SHAKE extendable-output node implementation

use super::{algorithm_param, key_material, HASH_NODE_COLOR};
use crate::nodes::factory::{
    create_from_metadata, NodeCategory, NodeFactory, NodeMetadata, PortDefinition,
};
use crate::nodes::interface::NodeData;
use crate::nodes::node::Node;
use crate::nodes::port::DataType;
use egui::Pos2;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake256};

/// SHAKE XOF over the wired key inputs
///
/// Output length is `squeeze_times × squeeze_bytes`; the XOF is squeezed
/// in `squeeze_times` chunks of `squeeze_bytes` each.
pub struct ShakeNode;

impl NodeFactory for ShakeNode {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "SHAKE",
            "SHAKE",
            NodeCategory::hashing(),
            "SHAKE extendable-output digest over the wired key inputs",
        )
        .with_color(HASH_NODE_COLOR)
        .with_inputs(vec![
            PortDefinition::widget("algorithm", DataType::String)
                .with_description("SHAKE_128 or SHAKE_256"),
            PortDefinition::widget("squeeze_bytes", DataType::Integer)
                .with_description("The amount of bytes to squeeze"),
            PortDefinition::widget("squeeze_times", DataType::Integer)
                .with_description("The amount of times to squeeze"),
            PortDefinition::required("key1", DataType::String)
                .with_description("First key (mandatory)"),
        ])
        .with_outputs(vec![PortDefinition::required("hash_bytes", DataType::Bytes)])
    }

    fn create(position: Pos2) -> Node {
        let mut node = create_from_metadata(&Self::metadata(), position);
        node.set_parameter("algorithm", NodeData::String("SHAKE_128".to_string()));
        node.set_parameter("squeeze_bytes", NodeData::Integer(16));
        node.set_parameter("squeeze_times", NodeData::Integer(1));
        node
    }

    fn compute(node: &Node, inputs: &[NodeData]) -> Result<Vec<NodeData>, String> {
        let squeeze_bytes = integer_param(node, "squeeze_bytes", 16);
        let squeeze_times = integer_param(node, "squeeze_times", 1);
        // Both widgets are user-settable; bound the total before allocating
        squeeze_bytes
            .checked_mul(squeeze_times)
            .filter(|total| *total <= MAX_SQUEEZE_OUTPUT)
            .ok_or_else(|| {
                format!("Squeeze output of {squeeze_bytes} x {squeeze_times} bytes is too large")
            })?;
        let keys = key_material(node, inputs);

        let output = match algorithm_param(node, "SHAKE_128") {
            "SHAKE_128" => squeeze::<Shake128>(&keys, squeeze_bytes, squeeze_times),
            "SHAKE_256" => squeeze::<Shake256>(&keys, squeeze_bytes, squeeze_times),
            other => return Err(format!("Unknown SHAKE algorithm: {other}")),
        };
        Ok(vec![NodeData::Bytes(output)])
    }
}

/// Upper bound on the total squeezed output, in bytes
const MAX_SQUEEZE_OUTPUT: usize = 1 << 20;

fn integer_param(node: &Node, name: &str, default: i64) -> usize {
    node.get_parameter(name)
        .and_then(NodeData::as_integer)
        .unwrap_or(default)
        .max(0) as usize
}

fn squeeze<X>(keys: &[Vec<u8>], squeeze_bytes: usize, squeeze_times: usize) -> Vec<u8>
where
    X: Default + Update + ExtendableOutput,
{
    let mut hasher = X::default();
    for key in keys {
        hasher.update(key);
    }
    let mut reader = hasher.finalize_xof();
    let mut output = Vec::with_capacity(squeeze_bytes * squeeze_times);
    let mut chunk = vec![0u8; squeeze_bytes];
    for _ in 0..squeeze_times {
        reader.read(&mut chunk);
        output.extend_from_slice(&chunk);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shake_node_creation() {
        let node = ShakeNode::create(Pos2::ZERO);
        assert_eq!(node.type_id, "SHAKE");
        assert_eq!(node.inputs.len(), 4);
        assert_eq!(node.inputs[3].name, "key1");
        assert!(!node.inputs[3].widget);
        assert_eq!(
            node.get_parameter("squeeze_bytes"),
            Some(&NodeData::Integer(16))
        );
    }

    fn key_inputs(value: &str) -> [NodeData; 4] {
        [
            NodeData::None,
            NodeData::None,
            NodeData::None,
            NodeData::String(value.to_string()),
        ]
    }

    #[test]
    fn test_shake_output_length() {
        let mut node = ShakeNode::create(Pos2::ZERO);
        node.set_parameter("squeeze_bytes", NodeData::Integer(8));
        node.set_parameter("squeeze_times", NodeData::Integer(3));
        let outputs = ShakeNode::compute(&node, &key_inputs("abc")).unwrap();
        let NodeData::Bytes(bytes) = &outputs[0] else {
            panic!("expected bytes");
        };
        assert_eq!(bytes.len(), 24);
    }

    #[test]
    fn test_shake_squeezing_is_a_continuous_stream() {
        // One 32-byte squeeze equals two 16-byte squeezes
        let mut once = ShakeNode::create(Pos2::ZERO);
        once.set_parameter("squeeze_bytes", NodeData::Integer(32));

        let mut twice = ShakeNode::create(Pos2::ZERO);
        twice.set_parameter("squeeze_bytes", NodeData::Integer(16));
        twice.set_parameter("squeeze_times", NodeData::Integer(2));

        assert_eq!(
            ShakeNode::compute(&once, &key_inputs("abc")).unwrap(),
            ShakeNode::compute(&twice, &key_inputs("abc")).unwrap()
        );
    }

    #[test]
    fn test_shake_rejects_oversized_output() {
        // Product overflows usize
        let mut node = ShakeNode::create(Pos2::ZERO);
        node.set_parameter("squeeze_bytes", NodeData::Integer(i64::MAX));
        node.set_parameter("squeeze_times", NodeData::Integer(i64::MAX));
        assert!(ShakeNode::compute(&node, &key_inputs("abc")).is_err());

        // Product fits but exceeds the output bound
        let mut node = ShakeNode::create(Pos2::ZERO);
        node.set_parameter("squeeze_bytes", NodeData::Integer((1 << 20) + 1));
        node.set_parameter("squeeze_times", NodeData::Integer(1));
        assert!(ShakeNode::compute(&node, &key_inputs("abc")).is_err());

        // The bound itself is fine
        let mut node = ShakeNode::create(Pos2::ZERO);
        node.set_parameter("squeeze_bytes", NodeData::Integer(1 << 20));
        node.set_parameter("squeeze_times", NodeData::Integer(1));
        assert!(ShakeNode::compute(&node, &key_inputs("abc")).is_ok());
    }

    #[test]
    fn test_shake_variants_differ() {
        let node_128 = ShakeNode::create(Pos2::ZERO);
        let mut node_256 = ShakeNode::create(Pos2::ZERO);
        node_256.set_parameter("algorithm", NodeData::String("SHAKE_256".to_string()));
        assert_ne!(
            ShakeNode::compute(&node_128, &key_inputs("abc")).unwrap(),
            ShakeNode::compute(&node_256, &key_inputs("abc")).unwrap()
        );
    }
}
