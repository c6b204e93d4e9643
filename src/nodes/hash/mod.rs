//! Hash node set
//!
//! Every hash node digests the key material wired into its elastic "key"
//! slots, in slot order, and outputs the digest as bytes. Algorithm
//! variants are selected through a widget-backed `algorithm` input.

pub mod blake2;
pub mod md5;
pub mod sha1;
pub mod sha2;
pub mod sha3;
pub mod shake;
pub mod sm3;

use crate::nodes::interface::NodeData;
use crate::nodes::node::Node;
use egui::Color32;

/// Shared color of the hash node set
pub(crate) const HASH_NODE_COLOR: Color32 = Color32::from_rgb(66, 52, 86);

/// Collects wired key material in slot order
///
/// `inputs` is aligned with the node's input slots; only wire-connectable
/// slots named "key..." contribute, and unwired slots carry `None` which
/// coerces to nothing.
pub(crate) fn key_material(node: &Node, inputs: &[NodeData]) -> Vec<Vec<u8>> {
    node.inputs
        .iter()
        .zip(inputs)
        .filter(|(port, _)| port.name.starts_with("key") && !port.widget)
        .filter_map(|(_, value)| value.as_bytes())
        .collect()
}

/// Feeds key material to a digest and finalizes it
pub(crate) fn digest_keys<D: ::sha2::Digest>(keys: &[Vec<u8>]) -> Vec<u8> {
    let mut hasher = D::new();
    for key in keys {
        hasher.update(key);
    }
    hasher.finalize().to_vec()
}

/// Reads the node's algorithm widget, falling back to the type's default
pub(crate) fn algorithm_param<'a>(node: &'a Node, default: &'a str) -> &'a str {
    node.get_parameter("algorithm")
        .and_then(NodeData::as_str)
        .unwrap_or(default)
}
