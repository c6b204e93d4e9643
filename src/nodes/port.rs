//! Port types and functionality for node connections

use egui::Pos2;
use serde::{Deserialize, Serialize};

/// Unique identifier for a port
pub type PortId = usize;

/// Type of port (input or output)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortType {
    Input,
    Output,
}

/// Data types that can flow through ports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Raw byte string (key material, digests)
    Bytes,
    /// Text string
    String,
    /// Integer value
    Integer,
    /// Boolean value
    Boolean,
    /// Any type (for generic ports)
    Any,
}

impl DataType {
    /// Check if this data type can connect to another
    ///
    /// Key material flows both ways between text and raw bytes; everything
    /// else requires matching types or `Any` on one side.
    pub fn can_connect_to(&self, other: &DataType) -> bool {
        match (self, other) {
            _ if self == other => true,
            (DataType::Any, _) | (_, DataType::Any) => true,
            (DataType::Bytes, DataType::String) | (DataType::String, DataType::Bytes) => true,
            _ => false,
        }
    }

    /// Get a human-readable name for this data type
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Bytes => "Bytes",
            DataType::String => "String",
            DataType::Integer => "Integer",
            DataType::Boolean => "Boolean",
            DataType::Any => "Any",
        }
    }
}

/// Represents a connection point on a node
///
/// Input ports come in two flavors: wire-connectable sockets and
/// widget-backed inputs whose value lives in the node's parameters.
/// Widget-backed ports never accept wires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    pub id: PortId,
    pub name: String,
    pub port_type: PortType,
    pub data_type: DataType,
    pub widget: bool,
    #[serde(with = "pos2_serde")]
    pub position: Pos2,
}

impl Port {
    /// Creates a new wire-connectable port
    pub fn new(id: PortId, name: impl Into<String>, port_type: PortType) -> Self {
        Self {
            id,
            name: name.into(),
            port_type,
            data_type: DataType::Any,
            widget: false,
            position: Pos2::ZERO,
        }
    }

    /// Sets the data type of the port
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    /// Marks the port as widget-backed (not wire-connectable)
    pub fn as_widget(mut self) -> Self {
        self.widget = true;
        self
    }

    /// Checks if this port is an input
    pub fn is_input(&self) -> bool {
        matches!(self.port_type, PortType::Input)
    }

    /// Checks if this port is an output
    pub fn is_output(&self) -> bool {
        matches!(self.port_type, PortType::Output)
    }
}

// Serde helper module for Pos2
mod pos2_serde {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(pos: &Pos2, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [pos.x, pos.y].serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Pos2, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [x, y] = <[f32; 2]>::deserialize(deserializer)?;
        Ok(Pos2::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_compatibility() {
        assert!(DataType::Bytes.can_connect_to(&DataType::Bytes));
        assert!(DataType::String.can_connect_to(&DataType::Any));
        assert!(DataType::Any.can_connect_to(&DataType::Integer));
        assert!(DataType::Bytes.can_connect_to(&DataType::String));
        assert!(DataType::String.can_connect_to(&DataType::Bytes));
        assert!(!DataType::Bytes.can_connect_to(&DataType::Integer));
        assert!(!DataType::String.can_connect_to(&DataType::Boolean));
    }

    #[test]
    fn test_widget_port() {
        let port = Port::new(0, "algorithm", PortType::Input)
            .with_data_type(DataType::String)
            .as_widget();
        assert!(port.widget);
        assert!(port.is_input());
        assert_eq!(port.data_type, DataType::String);
    }
}
