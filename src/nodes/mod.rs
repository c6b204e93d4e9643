//! Node system - graph data structures, registry and node implementations

// Core node system modules
pub mod engine;
pub mod factory;
pub mod graph;
pub mod hooks;
pub mod interface;
pub mod node;
pub mod port;

// Node implementations
pub mod data;
pub mod hash;

// Re-export core types
pub use engine::GraphEngine;
pub use factory::{NodeCategory, NodeFactory, NodeMetadata, NodeRegistry, PortDefinition};
pub use graph::{Connection, NodeGraph};
pub use hooks::{ConnectionEvent, ConnectionHooks, WireSide};
pub use interface::NodeData;
pub use node::{Node, NodeId};
pub use port::{DataType, Port, PortId, PortType};
