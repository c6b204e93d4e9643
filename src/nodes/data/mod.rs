//! Data source nodes

pub mod constant;

pub use constant::ConstantBytesNode;
