//! Cipherflow core library
//!
//! Node graph model for a cryptography node editor: nodes, ports,
//! connections, a node type registry with editor extensions, and the
//! dynamic "key" input behavior for the hash node set.

pub mod extensions;
pub mod nodes;

// Re-export commonly used types
pub use extensions::{DynamicKeyInputs, EditorExtension};
pub use nodes::{
    Connection, ConnectionEvent, ConnectionHooks, DataType, GraphEngine, Node,
    NodeCategory, NodeData, NodeFactory, NodeGraph, NodeId, NodeMetadata,
    NodeRegistry, Port, PortDefinition, PortId, WireSide,
};
