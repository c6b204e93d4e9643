//! Editor extensions
//!
//! An extension customizes node types at registration time: the registry
//! calls `before_register_node_type` once per node type, in extension
//! registration order, and the extension may attach connection observers
//! to that type. Observers stack; attaching one never displaces another.

pub mod dynamic_keys;

pub use dynamic_keys::DynamicKeyInputs;

use crate::nodes::factory::NodeMetadata;
use crate::nodes::hooks::ConnectionHooks;

/// Trait for editor extensions
pub trait EditorExtension: Send + Sync {
    /// Stable extension name, for logging and diagnostics
    fn name(&self) -> &'static str;

    /// Called once per node type before it is registered
    ///
    /// Push onto `hooks` to observe connection changes on nodes of this type.
    fn before_register_node_type(
        &self,
        metadata: &NodeMetadata,
        hooks: &mut Vec<Box<dyn ConnectionHooks>>,
    );
}
