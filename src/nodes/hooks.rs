//! Connection-change observer hooks
//!
//! Node types can have observers attached at registration time (see
//! `EditorExtension`). Observers for a node type form an explicit ordered
//! list and are invoked in registration order, so an observer registered
//! later always runs after the pre-existing ones.

use super::graph::{Connection, NodeGraph};
use super::node::NodeId;
use super::port::PortId;

/// Which side of a node a connection event happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireSide {
    Input,
    Output,
}

/// A single connection-state change on one port of one node
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionEvent {
    pub side: WireSide,
    pub port_index: PortId,
    pub connected: bool,
    /// The wire involved; observers must treat a missing link as a no-op
    pub link: Option<Connection>,
}

impl ConnectionEvent {
    /// Event for a wire arriving at an input port
    pub fn input_connected(port_index: PortId, link: Connection) -> Self {
        Self {
            side: WireSide::Input,
            port_index,
            connected: true,
            link: Some(link),
        }
    }

    /// Event for a wire removed from an input port
    pub fn input_disconnected(port_index: PortId, link: Connection) -> Self {
        Self {
            side: WireSide::Input,
            port_index,
            connected: false,
            link: Some(link),
        }
    }

    /// Event for a wire arriving at or leaving an output port
    pub fn output(port_index: PortId, connected: bool, link: Connection) -> Self {
        Self {
            side: WireSide::Output,
            port_index,
            connected,
            link: Some(link),
        }
    }
}

/// Trait for observers of a node type's connection changes
pub trait ConnectionHooks: Send + Sync {
    /// Called after a connection-state change on any port of an observed node
    fn on_connections_changed(
        &mut self,
        _graph: &mut NodeGraph,
        _node_id: NodeId,
        _event: &ConnectionEvent,
    ) -> Result<(), String> {
        // Default: no special handling
        Ok(())
    }

    /// Clone the hooks for registration
    fn clone_box(&self) -> Box<dyn ConnectionHooks>;
}
