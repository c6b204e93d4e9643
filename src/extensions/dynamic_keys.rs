//! Dynamic key inputs for the hash node set
//!
//! Hash nodes accept a variable number of keying values. This extension
//! keeps their "key" input slots elastic: wiring the last empty key slot
//! grows a fresh one, unwiring a non-first key slot removes it, and the
//! surviving slots are always renamed to a contiguous key1..keyN run. The
//! first key slot is permanent.

use super::EditorExtension;
use crate::nodes::factory::NodeMetadata;
use crate::nodes::graph::NodeGraph;
use crate::nodes::hooks::{ConnectionEvent, ConnectionHooks, WireSide};
use crate::nodes::node::NodeId;
use crate::nodes::port::DataType;

/// Node types whose key inputs grow and shrink with their wires
pub const DYNAMIC_KEY_NODES: [&str; 7] =
    ["SHA2", "SHA3", "BLAKE2", "SHA1", "MD5", "SM3", "SHAKE"];

/// Editor extension attaching the dynamic key observer to the hash nodes
pub struct DynamicKeyInputs;

impl EditorExtension for DynamicKeyInputs {
    fn name(&self) -> &'static str {
        "DynamicHashInputs"
    }

    fn before_register_node_type(
        &self,
        metadata: &NodeMetadata,
        hooks: &mut Vec<Box<dyn ConnectionHooks>>,
    ) {
        if DYNAMIC_KEY_NODES.contains(&metadata.node_type) {
            hooks.push(Box::new(DynamicKeyHooks));
        }
    }
}

/// Connection observer implementing the elastic key-slot behavior
#[derive(Clone)]
pub struct DynamicKeyHooks;

impl DynamicKeyHooks {
    /// Indices of the wire-connectable "key" slots, renamed key1..keyN in place
    fn renumber_key_slots(graph: &mut NodeGraph, node_id: NodeId) -> Vec<usize> {
        let Some(node) = graph.nodes.get_mut(&node_id) else {
            return Vec::new();
        };
        let positions: Vec<usize> = node
            .inputs
            .iter()
            .enumerate()
            .filter(|(_, port)| port.name.starts_with("key") && !port.widget)
            .map(|(index, _)| index)
            .collect();
        for (n, &index) in positions.iter().enumerate() {
            node.inputs[index].name = format!("key{}", n + 1);
        }
        positions
    }
}

impl ConnectionHooks for DynamicKeyHooks {
    fn on_connections_changed(
        &mut self,
        graph: &mut NodeGraph,
        node_id: NodeId,
        event: &ConnectionEvent,
    ) -> Result<(), String> {
        if event.link.is_none() || event.side != WireSide::Input {
            return Ok(());
        }

        let key_slots = Self::renumber_key_slots(graph, node_id);

        if event.connected {
            // Wiring the last key slot opens a fresh one after it
            if key_slots.last() == Some(&event.port_index) {
                let name = format!("key{}", key_slots.len() + 1);
                let _ = graph.append_node_input(node_id, name, DataType::String);
            }
        } else {
            let removable = graph
                .nodes
                .get(&node_id)
                .and_then(|node| node.inputs.get(event.port_index))
                .map(|port| port.name.starts_with("key") && port.name != "key1" && !port.widget)
                .unwrap_or(false);
            if removable {
                graph.remove_node_input(node_id, event.port_index);
                Self::renumber_key_slots(graph, node_id);
            }
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn ConnectionHooks> {
        Box::new(self.clone())
    }
}
