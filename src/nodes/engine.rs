//! Graph engine: connection lifecycle and node evaluation
//!
//! The engine owns the per-type connection observer lists and compute
//! functions, cloned from a registry at construction. All graph mutations
//! that change connection state should go through the engine so observers
//! fire; direct `NodeGraph` calls bypass them.

use super::factory::{NodeCompute, NodeRegistry};
use super::graph::{Connection, NodeGraph};
use super::hooks::{ConnectionEvent, ConnectionHooks};
use super::interface::NodeData;
use super::node::{Node, NodeId};
use super::port::PortId;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

/// Dispatches connection events to observers and evaluates nodes
pub struct GraphEngine {
    connection_hooks: HashMap<String, Vec<Box<dyn ConnectionHooks>>>,
    compute_fns: HashMap<String, NodeCompute>,
}

impl GraphEngine {
    /// Builds an engine from a registry's hooks and compute functions
    pub fn from_registry(registry: &NodeRegistry) -> Self {
        Self {
            connection_hooks: registry.clone_connection_hooks(),
            compute_fns: registry.compute_table(),
        }
    }

    /// Adds a wire and notifies observers on both ends
    pub fn connect(
        &mut self,
        graph: &mut NodeGraph,
        connection: Connection,
    ) -> Result<(), &'static str> {
        graph.add_connection(connection.clone())?;
        debug!(
            "Connection added {}:{} -> {}:{}",
            connection.from_node, connection.from_port, connection.to_node, connection.to_port
        );

        self.notify(
            graph,
            connection.to_node,
            ConnectionEvent::input_connected(connection.to_port, connection.clone()),
        );
        self.notify(
            graph,
            connection.from_node,
            ConnectionEvent::output(connection.from_port, true, connection),
        );
        Ok(())
    }

    /// Convenience wrapper over `connect`
    pub fn connect_by_ids(
        &mut self,
        graph: &mut NodeGraph,
        from_node: NodeId,
        from_port: PortId,
        to_node: NodeId,
        to_port: PortId,
    ) -> Result<(), &'static str> {
        self.connect(graph, Connection::new(from_node, from_port, to_node, to_port))
    }

    /// Removes a wire by connection index and notifies observers on both ends
    pub fn disconnect(&mut self, graph: &mut NodeGraph, index: usize) -> Option<Connection> {
        let connection = graph.remove_connection(index)?;
        debug!(
            "Connection removed {}:{} -> {}:{}",
            connection.from_node, connection.from_port, connection.to_node, connection.to_port
        );

        self.notify(
            graph,
            connection.to_node,
            ConnectionEvent::input_disconnected(connection.to_port, connection.clone()),
        );
        self.notify(
            graph,
            connection.from_node,
            ConnectionEvent::output(connection.from_port, false, connection.clone()),
        );
        Some(connection)
    }

    /// Removes the wire feeding an input port, if any
    pub fn disconnect_input(
        &mut self,
        graph: &mut NodeGraph,
        node_id: NodeId,
        port: PortId,
    ) -> Option<Connection> {
        let index = graph
            .connections
            .iter()
            .position(|conn| conn.to_node == node_id && conn.to_port == port)?;
        self.disconnect(graph, index)
    }

    /// Removes a node; every wire it carried goes through the disconnect path
    ///
    /// Wires are dropped one at a time so an observer that reshapes input
    /// slots (shifting later `to_port`s down) is never handed a stale port
    /// index by the next event.
    pub fn remove_node(&mut self, graph: &mut NodeGraph, node_id: NodeId) -> Option<Node> {
        if !graph.nodes.contains_key(&node_id) {
            return None;
        }
        while let Some(index) = graph
            .connections
            .iter()
            .position(|conn| conn.from_node == node_id || conn.to_node == node_id)
        {
            if self.disconnect(graph, index).is_none() {
                break;
            }
        }
        graph.remove_node(node_id)
    }

    /// Evaluates a node, recursively evaluating its upstream nodes
    ///
    /// Results are memoized per call; a cycle is a hard error.
    pub fn evaluate(&self, graph: &NodeGraph, node_id: NodeId) -> Result<Vec<NodeData>, String> {
        let mut memo = HashMap::new();
        let mut visiting = HashSet::new();
        self.evaluate_inner(graph, node_id, &mut memo, &mut visiting)
    }

    fn evaluate_inner(
        &self,
        graph: &NodeGraph,
        node_id: NodeId,
        memo: &mut HashMap<NodeId, Vec<NodeData>>,
        visiting: &mut HashSet<NodeId>,
    ) -> Result<Vec<NodeData>, String> {
        if let Some(cached) = memo.get(&node_id) {
            return Ok(cached.clone());
        }
        if !visiting.insert(node_id) {
            return Err(format!("Cycle detected at node {}", node_id));
        }

        let node = graph
            .nodes
            .get(&node_id)
            .ok_or_else(|| format!("Node {} does not exist", node_id))?;

        let mut inputs = Vec::with_capacity(node.inputs.len());
        for port in 0..node.inputs.len() {
            let value = match graph.input_connection(node_id, port) {
                Some(conn) => {
                    let (from_node, from_port) = (conn.from_node, conn.from_port);
                    let upstream = self.evaluate_inner(graph, from_node, memo, visiting)?;
                    upstream.get(from_port).cloned().unwrap_or(NodeData::None)
                }
                None => NodeData::None,
            };
            inputs.push(value);
        }

        let compute = self
            .compute_fns
            .get(&node.type_id)
            .ok_or_else(|| format!("No compute function for node type {}", node.type_id))?;
        let outputs = compute(node, &inputs)?;

        visiting.remove(&node_id);
        memo.insert(node_id, outputs.clone());
        Ok(outputs)
    }

    /// Dispatches an event to the observers of one node, in registration order
    fn notify(&mut self, graph: &mut NodeGraph, node_id: NodeId, event: ConnectionEvent) {
        let Some(type_id) = graph.nodes.get(&node_id).map(|n| n.type_id.clone()) else {
            return;
        };
        if let Some(hooks) = self.connection_hooks.get_mut(&type_id) {
            for hook in hooks.iter_mut() {
                if let Err(e) = hook.on_connections_changed(graph, node_id, &event) {
                    warn!("Connection hook failed for node {}: {}", node_id, e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::data::constant::ConstantBytesNode;
    use crate::nodes::factory::NodeFactory;
    use crate::nodes::hash::sha1::Sha1Node;
    use crate::nodes::hash::sha2::Sha2Node;
    use egui::Pos2;

    fn to_hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    fn setup() -> (GraphEngine, NodeGraph) {
        let registry = NodeRegistry::default();
        (GraphEngine::from_registry(&registry), NodeGraph::new())
    }

    fn constant(graph: &mut NodeGraph, value: &str) -> NodeId {
        let mut node = ConstantBytesNode::create(Pos2::ZERO);
        node.set_parameter("value", NodeData::String(value.to_string()));
        graph.add_node(node)
    }

    #[test]
    fn test_evaluate_sha256_of_wired_key() {
        let (mut engine, mut graph) = setup();
        let source = constant(&mut graph, "abc");
        let hash = Sha2Node::add_to_graph(&mut graph, Pos2::new(200.0, 0.0));

        // key1 is the slot after the algorithm widget
        engine.connect_by_ids(&mut graph, source, 0, hash, 1).unwrap();

        let outputs = engine.evaluate(&graph, hash).unwrap();
        let NodeData::Bytes(digest) = &outputs[0] else {
            panic!("expected bytes output");
        };
        assert_eq!(
            to_hex(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_connect_grows_key_slots() {
        let (mut engine, mut graph) = setup();
        let source = constant(&mut graph, "k");
        let hash = Sha2Node::add_to_graph(&mut graph, Pos2::ZERO);

        assert_eq!(graph.nodes[&hash].inputs.len(), 2); // algorithm + key1
        engine.connect_by_ids(&mut graph, source, 0, hash, 1).unwrap();
        assert_eq!(graph.nodes[&hash].inputs.len(), 3);
        assert_eq!(graph.nodes[&hash].inputs[2].name, "key2");
    }

    #[test]
    fn test_remove_node_notifies_peer() {
        let (mut engine, mut graph) = setup();
        let first = constant(&mut graph, "a");
        let second = constant(&mut graph, "b");
        let hash = Sha2Node::add_to_graph(&mut graph, Pos2::ZERO);

        engine.connect_by_ids(&mut graph, first, 0, hash, 1).unwrap();
        engine.connect_by_ids(&mut graph, second, 0, hash, 2).unwrap();
        assert_eq!(graph.nodes[&hash].inputs.len(), 4); // algorithm + key1..key3

        // Dropping the node on key2 fires a disconnect event at the hash node
        engine.remove_node(&mut graph, second).unwrap();
        let names: Vec<&str> = graph.nodes[&hash]
            .inputs
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["algorithm", "key1", "key2"]);
    }

    #[test]
    fn test_remove_node_with_fan_out_keeps_surviving_wires() {
        let (mut engine, mut graph) = setup();
        // SHA1 has no widget inputs, so key1 sits at slot 0
        let hash = Sha1Node::add_to_graph(&mut graph, Pos2::ZERO);
        let single = constant(&mut graph, "a");
        let shared = constant(&mut graph, "b");
        let last = constant(&mut graph, "c");

        // One source fans out into two key slots of the same hash node
        engine.connect_by_ids(&mut graph, single, 0, hash, 0).unwrap();
        engine.connect_by_ids(&mut graph, shared, 0, hash, 1).unwrap();
        engine.connect_by_ids(&mut graph, shared, 0, hash, 2).unwrap();
        engine.connect_by_ids(&mut graph, last, 0, hash, 3).unwrap();

        engine.remove_node(&mut graph, shared).unwrap();

        // Both of the shared node's slots are gone, the others survive
        let names: Vec<&str> = graph.nodes[&hash]
            .inputs
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["key1", "key2", "key3"]);
        assert_eq!(
            graph.input_connection(hash, 0).map(|c| c.from_node),
            Some(single)
        );
        assert_eq!(
            graph.input_connection(hash, 1).map(|c| c.from_node),
            Some(last)
        );
        assert!(!graph.is_input_connected(hash, 2));
        assert_eq!(graph.connections.len(), 2);
    }

    #[test]
    fn test_evaluate_missing_node() {
        let (engine, graph) = setup();
        assert!(engine.evaluate(&graph, 42).is_err());
    }
}
