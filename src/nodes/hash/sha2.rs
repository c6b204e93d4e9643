//! SHA-2 family node implementation

use super::{algorithm_param, digest_keys, key_material, HASH_NODE_COLOR};
use crate::nodes::factory::{
    create_from_metadata, NodeCategory, NodeFactory, NodeMetadata, PortDefinition,
};
use crate::nodes::interface::NodeData;
use crate::nodes::node::Node;
use crate::nodes::port::DataType;
use egui::Pos2;
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};

/// Configurable SHA-2 digest over the wired key inputs
pub struct Sha2Node;

impl NodeFactory for Sha2Node {
    fn metadata() -> NodeMetadata {
        NodeMetadata::new(
            "SHA2",
            "SHA2",
            NodeCategory::hashing(),
            "SHA-2 family digest over the wired key inputs",
        )
        .with_color(HASH_NODE_COLOR)
        .with_inputs(vec![
            PortDefinition::widget("algorithm", DataType::String).with_description(
                "SHA224, SHA256, SHA384, SHA512, SHA512_224 or SHA512_256",
            ),
            PortDefinition::required("key1", DataType::String)
                .with_description("First key (mandatory)"),
        ])
        .with_outputs(vec![PortDefinition::required("hash_bytes", DataType::Bytes)])
    }

    fn create(position: Pos2) -> Node {
        let mut node = create_from_metadata(&Self::metadata(), position);
        node.set_parameter("algorithm", NodeData::String("SHA256".to_string()));
        node
    }

    fn compute(node: &Node, inputs: &[NodeData]) -> Result<Vec<NodeData>, String> {
        let keys = key_material(node, inputs);
        let digest = match algorithm_param(node, "SHA256") {
            "SHA224" => digest_keys::<Sha224>(&keys),
            "SHA256" => digest_keys::<Sha256>(&keys),
            "SHA384" => digest_keys::<Sha384>(&keys),
            "SHA512" => digest_keys::<Sha512>(&keys),
            "SHA512_224" => digest_keys::<Sha512_224>(&keys),
            "SHA512_256" => digest_keys::<Sha512_256>(&keys),
            other => return Err(format!("Unknown SHA2 algorithm: {other}")),
        };
        Ok(vec![NodeData::Bytes(digest)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::hash::test_util::to_hex;

    #[test]
    fn test_sha2_node_creation() {
        let node = Sha2Node::create(Pos2::new(100.0, 100.0));
        assert_eq!(node.type_id, "SHA2");
        assert_eq!(node.inputs.len(), 2);
        assert!(node.inputs[0].widget);
        assert_eq!(node.inputs[1].name, "key1");
        assert_eq!(
            node.get_parameter("algorithm"),
            Some(&NodeData::String("SHA256".to_string()))
        );
    }

    #[test]
    fn test_sha256_digest() {
        let node = Sha2Node::create(Pos2::ZERO);
        let inputs = [NodeData::None, NodeData::String("abc".to_string())];
        let outputs = Sha2Node::compute(&node, &inputs).unwrap();
        let NodeData::Bytes(digest) = &outputs[0] else {
            panic!("expected bytes");
        };
        assert_eq!(
            to_hex(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha512_digest() {
        let mut node = Sha2Node::create(Pos2::ZERO);
        node.set_parameter("algorithm", NodeData::String("SHA512".to_string()));
        let inputs = [NodeData::None, NodeData::String("abc".to_string())];
        let outputs = Sha2Node::compute(&node, &inputs).unwrap();
        let NodeData::Bytes(digest) = &outputs[0] else {
            panic!("expected bytes");
        };
        assert_eq!(
            to_hex(digest),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn test_keys_feed_in_slot_order() {
        let node = Sha2Node::create(Pos2::ZERO);
        // Two keys should digest like their concatenation
        let mut grown = node.clone();
        grown.add_typed_input("key2", DataType::String);
        let split = [
            NodeData::None,
            NodeData::String("ab".to_string()),
            NodeData::String("c".to_string()),
        ];
        let joined = [NodeData::None, NodeData::String("abc".to_string())];
        assert_eq!(
            Sha2Node::compute(&grown, &split).unwrap(),
            Sha2Node::compute(&node, &joined).unwrap()
        );
    }

    #[test]
    fn test_unknown_algorithm_is_an_error() {
        let mut node = Sha2Node::create(Pos2::ZERO);
        node.set_parameter("algorithm", NodeData::String("SHA9000".to_string()));
        assert!(Sha2Node::compute(&node, &[NodeData::None, NodeData::None]).is_err());
    }
}
