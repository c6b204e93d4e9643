//! Node graph data structures and operations

use super::node::{Node, NodeId};
use super::port::{DataType, PortId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents a connection between two ports on different nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from_node: NodeId,
    pub from_port: PortId,
    pub to_node: NodeId,
    pub to_port: PortId,
}

impl Connection {
    /// Creates a new connection
    pub fn new(from_node: NodeId, from_port: PortId, to_node: NodeId, to_port: PortId) -> Self {
        Self {
            from_node,
            from_port,
            to_node,
            to_port,
        }
    }
}

/// A graph containing nodes and their connections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeGraph {
    pub nodes: HashMap<NodeId, Node>,
    pub connections: Vec<Connection>,
    next_node_id: NodeId,
}

impl NodeGraph {
    /// Creates a new empty node graph
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            connections: Vec::new(),
            next_node_id: 0,
        }
    }

    /// Adds a node to the graph and returns its ID
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = self.next_node_id;
        node.id = id;
        self.nodes.insert(id, node);
        self.next_node_id += 1;
        id
    }

    /// Removes a node and all its connections
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.connections
            .retain(|conn| conn.from_node != node_id && conn.to_node != node_id);
        self.nodes.remove(&node_id)
    }

    /// Adds a connection between two ports
    pub fn add_connection(&mut self, connection: Connection) -> Result<(), &'static str> {
        if connection.from_node == connection.to_node {
            return Err("Cannot connect a node to itself");
        }

        let from_node = self
            .nodes
            .get(&connection.from_node)
            .ok_or("Source node does not exist")?;
        let to_node = self
            .nodes
            .get(&connection.to_node)
            .ok_or("Target node does not exist")?;

        let from_port = from_node
            .outputs
            .get(connection.from_port)
            .ok_or("Source port does not exist")?;
        let to_port = to_node
            .inputs
            .get(connection.to_port)
            .ok_or("Target port does not exist")?;

        if to_port.widget {
            return Err("Cannot connect to a widget-backed input");
        }
        if !from_port.data_type.can_connect_to(&to_port.data_type) {
            return Err("Incompatible port data types");
        }
        if self
            .input_connection(connection.to_node, connection.to_port)
            .is_some()
        {
            return Err("Input port is already connected");
        }

        self.connections.push(connection);
        Ok(())
    }

    /// Helper method to add a connection by node IDs and port indices
    pub fn add_connection_by_ids(
        &mut self,
        from_node: NodeId,
        from_port: PortId,
        to_node: NodeId,
        to_port: PortId,
    ) -> Result<(), &'static str> {
        self.add_connection(Connection::new(from_node, from_port, to_node, to_port))
    }

    /// Removes a connection by index
    pub fn remove_connection(&mut self, index: usize) -> Option<Connection> {
        if index < self.connections.len() {
            Some(self.connections.remove(index))
        } else {
            None
        }
    }

    /// Finds the connection wired into an input port, if any
    pub fn input_connection(&self, node_id: NodeId, port: PortId) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|conn| conn.to_node == node_id && conn.to_port == port)
    }

    /// Checks whether an input port has a wire
    pub fn is_input_connected(&self, node_id: NodeId, port: PortId) -> bool {
        self.input_connection(node_id, port).is_some()
    }

    /// Appends a wire-connectable input slot to a node
    pub fn append_node_input(
        &mut self,
        node_id: NodeId,
        name: impl Into<String>,
        data_type: DataType,
    ) -> Result<(), &'static str> {
        let node = self.nodes.get_mut(&node_id).ok_or("Node does not exist")?;
        node.add_typed_input(name, data_type);
        node.update_port_positions();
        Ok(())
    }

    /// Removes an input slot from a node, keeping the connection list consistent
    ///
    /// Wires into the removed slot are dropped; wires into later slots shift
    /// down by one so positional port identity stays valid.
    pub fn remove_node_input(&mut self, node_id: NodeId, index: usize) -> Option<super::port::Port> {
        let node = self.nodes.get_mut(&node_id)?;
        let removed = node.remove_input(index)?;
        node.update_port_positions();

        self.connections
            .retain(|conn| !(conn.to_node == node_id && conn.to_port == index));
        for conn in &mut self.connections {
            if conn.to_node == node_id && conn.to_port > index {
                conn.to_port -= 1;
            }
        }
        Some(removed)
    }

    /// Updates port positions for all nodes
    pub fn update_all_port_positions(&mut self) {
        for node in self.nodes.values_mut() {
            node.update_port_positions();
        }
    }

    /// Serializes the graph to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a graph from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for NodeGraph {
    fn default() -> Self {
        Self::new()
    }
}
