//! Node types and core node functionality

use super::interface::NodeData;
use super::port::{DataType, Port, PortType};
use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a node
pub type NodeId = usize;

/// Core node structure representing a visual node in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Node type name, used to look up factories, compute functions and hooks
    pub type_id: String,
    pub title: String,
    #[serde(with = "pos2_serde")]
    pub position: Pos2,
    #[serde(with = "vec2_serde")]
    pub size: Vec2,
    pub inputs: Vec<Port>,
    pub outputs: Vec<Port>,
    #[serde(with = "color32_serde")]
    pub color: Color32,
    /// Values backing widget inputs, keyed by port name
    pub parameters: HashMap<String, NodeData>,
}

impl Node {
    /// Creates a new node of the given type
    pub fn new(id: NodeId, type_id: impl Into<String>, position: Pos2) -> Self {
        let type_id = type_id.into();
        Self {
            id,
            title: type_id.clone(),
            type_id,
            position,
            size: Vec2::new(150.0, 30.0),
            inputs: vec![],
            outputs: vec![],
            color: Color32::from_rgb(60, 60, 60),
            parameters: HashMap::new(),
        }
    }

    /// Adds an untyped input port to the node
    pub fn add_input(&mut self, name: impl Into<String>) -> &mut Self {
        let port_id = self.inputs.len();
        self.inputs.push(Port::new(port_id, name, PortType::Input));
        self
    }

    /// Adds a typed, wire-connectable input port
    pub fn add_typed_input(&mut self, name: impl Into<String>, data_type: DataType) -> &mut Self {
        let port_id = self.inputs.len();
        self.inputs
            .push(Port::new(port_id, name, PortType::Input).with_data_type(data_type));
        self
    }

    /// Adds a widget-backed input port
    pub fn add_widget_input(&mut self, name: impl Into<String>, data_type: DataType) -> &mut Self {
        let port_id = self.inputs.len();
        self.inputs.push(
            Port::new(port_id, name, PortType::Input)
                .with_data_type(data_type)
                .as_widget(),
        );
        self
    }

    /// Adds an output port to the node
    pub fn add_output(&mut self, name: impl Into<String>) -> &mut Self {
        let port_id = self.outputs.len();
        self.outputs.push(Port::new(port_id, name, PortType::Output));
        self
    }

    /// Adds a typed output port
    pub fn add_typed_output(&mut self, name: impl Into<String>, data_type: DataType) -> &mut Self {
        let port_id = self.outputs.len();
        self.outputs
            .push(Port::new(port_id, name, PortType::Output).with_data_type(data_type));
        self
    }

    /// Removes an input port by index, reindexing the survivors
    ///
    /// Connection bookkeeping lives at the graph level; callers that hold a
    /// graph should go through `NodeGraph::remove_node_input` instead.
    pub fn remove_input(&mut self, index: usize) -> Option<Port> {
        if index >= self.inputs.len() {
            return None;
        }
        let port = self.inputs.remove(index);
        for (i, input) in self.inputs.iter_mut().enumerate() {
            input.id = i;
        }
        Some(port)
    }

    /// Sets a parameter value backing a widget input
    pub fn set_parameter(&mut self, name: impl Into<String>, value: NodeData) {
        self.parameters.insert(name.into(), value);
    }

    /// Gets a parameter value by name
    pub fn get_parameter(&self, name: &str) -> Option<&NodeData> {
        self.parameters.get(name)
    }

    /// Updates the positions of all ports based on the node's position and size
    pub fn update_port_positions(&mut self) {
        let port_spacing = 30.0;

        // Input ports on TOP of node
        let input_start_x = if self.inputs.len() > 1 {
            (self.size.x - (self.inputs.len() - 1) as f32 * port_spacing) / 2.0
        } else {
            self.size.x / 2.0
        };

        for (i, input) in self.inputs.iter_mut().enumerate() {
            input.position =
                self.position + Vec2::new(input_start_x + i as f32 * port_spacing, 0.0);
        }

        // Output ports on BOTTOM of node
        let output_start_x = if self.outputs.len() > 1 {
            (self.size.x - (self.outputs.len() - 1) as f32 * port_spacing) / 2.0
        } else {
            self.size.x / 2.0
        };

        for (i, output) in self.outputs.iter_mut().enumerate() {
            output.position =
                self.position + Vec2::new(output_start_x + i as f32 * port_spacing, self.size.y);
        }
    }

    /// Returns the bounding rectangle of the node
    pub fn get_rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    /// Sets the color of the node
    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    /// Sets the display title of the node
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the size of the node
    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }
}

// Serde helper modules for egui types
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

mod vec2_serde {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(vec: &Vec2, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [vec.x, vec.y].serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec2, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [x, y] = <[f32; 2]>::deserialize(deserializer)?;
        Ok(Vec2::new(x, y))
    }
}

mod color32_serde {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [color.r(), color.g(), color.b(), color.a()].serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [r, g, b, a] = <[u8; 4]>::deserialize(deserializer)?;
        Ok(Color32::from_rgba_unmultiplied(r, g, b, a))
    }
}
