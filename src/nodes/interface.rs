//! Values flowing between nodes during evaluation

use serde::{Deserialize, Serialize};

/// A value carried on a wire or stored behind a widget input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeData {
    /// Raw byte string (key material, digests)
    Bytes(Vec<u8>),
    /// Text string
    String(String),
    /// Integer value
    Integer(i64),
    /// Boolean value
    Boolean(bool),
    /// Empty/null value
    None,
}

impl NodeData {
    /// Coerce to key material; strings are taken as UTF-8 bytes
    pub fn as_bytes(&self) -> Option<Vec<u8>> {
        match self {
            NodeData::Bytes(b) => Some(b.clone()),
            NodeData::String(s) => Some(s.as_bytes().to_vec()),
            _ => None,
        }
    }

    /// Integer accessor
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            NodeData::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// String accessor
    pub fn as_str(&self) -> Option<&str> {
        match self {
            NodeData::String(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_bytes() {
        assert_eq!(
            NodeData::String("abc".to_string()).as_bytes(),
            Some(b"abc".to_vec())
        );
        assert_eq!(NodeData::Bytes(vec![1, 2]).as_bytes(), Some(vec![1, 2]));
        assert_eq!(NodeData::Integer(7).as_bytes(), None);
        assert_eq!(NodeData::None.as_bytes(), None);
    }
}
