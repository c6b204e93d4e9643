//! Node factory system with self-registration and metadata

use super::graph::NodeGraph;
use super::hooks::ConnectionHooks;
use super::interface::NodeData;
use super::node::{Node, NodeId};
use super::port::DataType;
use crate::extensions::EditorExtension;
use egui::{Color32, Pos2};
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};

/// Hierarchical category system for organizing nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeCategory {
    path: Vec<String>,
}

impl NodeCategory {
    /// Create a new category from path components
    pub fn new(path: &[&str]) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Get the full path as a slice
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Get the category name (last component)
    pub fn name(&self) -> &str {
        self.path.last().map(|s| s.as_str()).unwrap_or("")
    }

    /// Get the parent category
    pub fn parent(&self) -> Option<NodeCategory> {
        if self.path.len() > 1 {
            Some(NodeCategory {
                path: self.path[..self.path.len() - 1].to_vec(),
            })
        } else {
            None
        }
    }

    /// Check if this category is a child of another
    pub fn is_child_of(&self, other: &NodeCategory) -> bool {
        self.path.len() > other.path.len() && self.path[..other.path.len()] == other.path
    }

    /// Get display string for UI
    pub fn display_string(&self) -> String {
        self.path.join(" > ")
    }

    /// Category of the modern hash nodes
    pub fn hashing() -> Self {
        Self::new(&["Cryptography", "Modern", "Hashing"])
    }

    /// Category of data source nodes
    pub fn data() -> Self {
        Self::new(&["Data"])
    }
}

/// Port definition for node creation
#[derive(Debug, Clone)]
pub struct PortDefinition {
    pub name: String,
    pub data_type: DataType,
    pub widget: bool,
    pub optional: bool,
    pub description: Option<String>,
}

impl PortDefinition {
    /// Create a required wire-connectable port
    pub fn required(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            widget: false,
            optional: false,
            description: None,
        }
    }

    /// Create an optional wire-connectable port
    pub fn optional(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            widget: false,
            optional: true,
            description: None,
        }
    }

    /// Create a widget-backed port
    pub fn widget(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            widget: true,
            optional: false,
            description: None,
        }
    }

    /// Add description to port
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Metadata describing a node type
#[derive(Debug, Clone)]
pub struct NodeMetadata {
    pub node_type: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: NodeCategory,
    pub color: Color32,
    pub inputs: Vec<PortDefinition>,
    pub outputs: Vec<PortDefinition>,
}

impl NodeMetadata {
    /// Create node metadata with sensible defaults
    pub fn new(
        node_type: &'static str,
        display_name: &'static str,
        category: NodeCategory,
        description: &'static str,
    ) -> Self {
        Self {
            node_type,
            display_name,
            description,
            category,
            color: Color32::from_rgb(100, 100, 100),
            inputs: vec![],
            outputs: vec![],
        }
    }

    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<PortDefinition>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<PortDefinition>) -> Self {
        self.outputs = outputs;
        self
    }
}

/// Builds a node instance from its type metadata
pub fn create_from_metadata(meta: &NodeMetadata, position: Pos2) -> Node {
    let mut node = Node::new(0, meta.node_type, position)
        .with_title(meta.display_name)
        .with_color(meta.color);

    for input in &meta.inputs {
        if input.widget {
            node.add_widget_input(&input.name, input.data_type);
        } else {
            node.add_typed_input(&input.name, input.data_type);
        }
    }
    for output in &meta.outputs {
        node.add_typed_output(&output.name, output.data_type);
    }

    node.update_port_positions();
    node
}

/// Node factory trait
pub trait NodeFactory: Send + Sync {
    /// Get node type metadata
    fn metadata() -> NodeMetadata
    where
        Self: Sized;

    /// Evaluate the node; `inputs` is aligned with the node's input slots
    fn compute(node: &Node, inputs: &[NodeData]) -> Result<Vec<NodeData>, String>
    where
        Self: Sized;

    /// Create a node instance at the given position
    fn create(position: Pos2) -> Node
    where
        Self: Sized,
    {
        create_from_metadata(&Self::metadata(), position)
    }

    /// Add this node to a graph
    fn add_to_graph(graph: &mut NodeGraph, position: Pos2) -> NodeId
    where
        Self: Sized,
    {
        graph.add_node(Self::create(position))
    }
}

/// Function pointer types stored per node type
type NodeCreator = fn(Pos2) -> Node;
type MetadataProvider = fn() -> NodeMetadata;
pub type NodeCompute = fn(&Node, &[NodeData]) -> Result<Vec<NodeData>, String>;

/// Registry for node types and editor extensions
///
/// Extensions must be registered before the node types they observe: each
/// `register::<T>()` call runs every extension's registration hook exactly
/// once for that node type.
pub struct NodeRegistry {
    creators: BTreeMap<String, NodeCreator>,
    metadata_providers: BTreeMap<String, MetadataProvider>,
    compute_fns: BTreeMap<String, NodeCompute>,
    categories: HashMap<NodeCategory, Vec<String>>,
    extensions: Vec<Box<dyn EditorExtension>>,
    connection_hooks: HashMap<String, Vec<Box<dyn ConnectionHooks>>>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            creators: BTreeMap::new(),
            metadata_providers: BTreeMap::new(),
            compute_fns: BTreeMap::new(),
            categories: HashMap::new(),
            extensions: Vec::new(),
            connection_hooks: HashMap::new(),
        }
    }

    /// Register an editor extension
    pub fn register_extension(&mut self, extension: Box<dyn EditorExtension>) {
        debug!("Registering editor extension: {}", extension.name());
        self.extensions.push(extension);
    }

    /// Register a node factory
    pub fn register<T: NodeFactory + 'static>(&mut self) {
        let metadata = T::metadata();
        let node_type = metadata.node_type.to_string();
        debug!("Registering node type: {}", node_type);

        // Extensions see the type before it goes live, in registration order
        let mut hooks: Vec<Box<dyn ConnectionHooks>> = Vec::new();
        for extension in &self.extensions {
            extension.before_register_node_type(&metadata, &mut hooks);
        }
        if !hooks.is_empty() {
            self.connection_hooks
                .entry(node_type.clone())
                .or_default()
                .extend(hooks);
        }

        self.creators.insert(node_type.clone(), T::create);
        self.metadata_providers.insert(node_type.clone(), T::metadata);
        self.compute_fns.insert(node_type.clone(), T::compute);

        self.categories
            .entry(metadata.category.clone())
            .or_default()
            .push(node_type);
    }

    /// Create a node by type name
    pub fn create_node(&self, node_type: &str, position: Pos2) -> Option<Node> {
        match self.creators.get(node_type) {
            Some(creator) => Some(creator(position)),
            None => {
                warn!("No factory registered for node type: {}", node_type);
                None
            }
        }
    }

    /// Get metadata for a node type without creating the node
    pub fn get_metadata(&self, node_type: &str) -> Option<NodeMetadata> {
        self.metadata_providers.get(node_type).map(|provider| provider())
    }

    /// Get all available node types
    pub fn node_types(&self) -> Vec<&str> {
        self.creators.keys().map(|s| s.as_str()).collect()
    }

    /// Get nodes in a specific category
    pub fn nodes_in_category(&self, category: &NodeCategory) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|nodes| nodes.iter().map(|s| s.as_str()).collect())
            .unwrap_or_default()
    }

    /// Get all categories
    pub fn categories(&self) -> Vec<&NodeCategory> {
        self.categories.keys().collect()
    }

    /// Clone the per-type connection observer lists (for engine construction)
    pub fn clone_connection_hooks(&self) -> HashMap<String, Vec<Box<dyn ConnectionHooks>>> {
        self.connection_hooks
            .iter()
            .map(|(node_type, hooks)| {
                (
                    node_type.clone(),
                    hooks.iter().map(|h| h.clone_box()).collect(),
                )
            })
            .collect()
    }

    /// Copy the compute function table (for engine construction)
    pub fn compute_table(&self) -> HashMap<String, NodeCompute> {
        self.compute_fns
            .iter()
            .map(|(node_type, compute)| (node_type.clone(), *compute))
            .collect()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        let mut registry = Self::new();

        // Extensions first so they observe every node type below
        registry.register_extension(Box::new(crate::extensions::DynamicKeyInputs));

        // Data source nodes
        registry.register::<crate::nodes::data::constant::ConstantBytesNode>();

        // Hash nodes
        registry.register::<crate::nodes::hash::sha1::Sha1Node>();
        registry.register::<crate::nodes::hash::sha2::Sha2Node>();
        registry.register::<crate::nodes::hash::sha3::Sha3Node>();
        registry.register::<crate::nodes::hash::blake2::Blake2Node>();
        registry.register::<crate::nodes::hash::md5::Md5Node>();
        registry.register::<crate::nodes::hash::sm3::Sm3Node>();
        registry.register::<crate::nodes::hash::shake::ShakeNode>();

        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::hash::sha2::Sha2Node;
    use egui::Pos2;

    #[test]
    fn test_node_factory_metadata() {
        let metadata = Sha2Node::metadata();
        assert_eq!(metadata.node_type, "SHA2");
        assert_eq!(metadata.display_name, "SHA2");
        assert_eq!(metadata.category, NodeCategory::hashing());

        let key1 = metadata.inputs.iter().find(|p| p.name == "key1").unwrap();
        assert!(!key1.widget);
        assert_eq!(key1.data_type, DataType::String);

        let output = &metadata.outputs[0];
        assert_eq!(output.name, "hash_bytes");
        assert_eq!(output.data_type, DataType::Bytes);
    }

    #[test]
    fn test_hierarchical_categories() {
        let hashing = NodeCategory::hashing();
        let crypto_root = NodeCategory::new(&["Cryptography"]);

        assert!(hashing.is_child_of(&crypto_root));
        assert!(!crypto_root.is_child_of(&hashing));
        assert_eq!(hashing.display_string(), "Cryptography > Modern > Hashing");
        assert_eq!(hashing.name(), "Hashing");
        assert_eq!(
            hashing.parent(),
            Some(NodeCategory::new(&["Cryptography", "Modern"]))
        );
        assert_eq!(crypto_root.parent(), None);
    }

    #[test]
    fn test_default_registry() {
        let registry = NodeRegistry::default();
        let types = registry.node_types();
        for expected in ["SHA1", "SHA2", "SHA3", "BLAKE2", "MD5", "SM3", "SHAKE", "ConstantBytes"] {
            assert!(types.contains(&expected), "missing node type {expected}");
        }

        let mut hashing = registry.nodes_in_category(&NodeCategory::hashing());
        hashing.sort();
        assert_eq!(
            hashing,
            vec!["BLAKE2", "MD5", "SHA1", "SHA2", "SHA3", "SHAKE", "SM3"]
        );

        assert!(registry.create_node("SHA2", Pos2::ZERO).is_some());
        assert!(registry.create_node("Nope", Pos2::ZERO).is_none());
    }

    #[test]
    fn test_dynamic_key_hooks_attached_to_hash_nodes_only() {
        let registry = NodeRegistry::default();
        let hooks = registry.clone_connection_hooks();
        for hash_type in ["SHA1", "SHA2", "SHA3", "BLAKE2", "MD5", "SM3", "SHAKE"] {
            assert_eq!(hooks.get(hash_type).map(|h| h.len()), Some(1));
        }
        assert!(hooks.get("ConstantBytes").is_none());
    }
}
