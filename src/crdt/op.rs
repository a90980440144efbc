// model = "claude-opus-4-5"
// created = "2026-01-30"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Operations that can be stored in a replica's log.
//!
//! Each site produces operations that, when replayed in total order,
//! reconstruct the document. Operations are *intention-preserving*: they
//! name the container they edit by identity, not by path, so they stay
//! meaningful while other sites edit concurrently.
//!
//! We store four kinds:
//! - Assign: "set key K of map P to this item"
//! - ListAssign: "overwrite live slot N of list P with this item"
//! - Insert: "insert this item into list P after element X"
//! - Delete: "tombstone element X of container P"
//!
//! The item an operation introduces takes the operation's own identity.
//! When the item is a map or list, that identity also names the new child
//! container, so an entry's identity and its container reference can never
//! disagree.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::primitives::Id;

/// A logical index into a container: a key for maps, a live position for lists.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Index {
    Key(String),
    Pos(usize),
}

impl From<&str> for Index {
    fn from(key: &str) -> Index {
        return Index::Key(key.to_string());
    }
}

impl From<String> for Index {
    fn from(key: String) -> Index {
        return Index::Key(key);
    }
}

impl From<usize> for Index {
    fn from(pos: usize) -> Index {
        return Index::Pos(pos);
    }
}

/// The shape of a container. Fixed when the container is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Map,
    List,
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return match self {
            Shape::Map => write!(f, "map"),
            Shape::List => write!(f, "list"),
        };
    }
}

/// The value an operation introduces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Payload {
    /// A leaf value, stored as-is.
    Primitive(Value),
    /// A new, empty map container.
    Map,
    /// A new, empty list container.
    List,
}

impl Payload {
    /// The container shape this payload creates, if any.
    pub fn shape(&self) -> Option<Shape> {
        return match self {
            Payload::Primitive(_) => None,
            Payload::Map => Some(Shape::Map),
            Payload::List => Some(Shape::List),
        };
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Payload {
        return Payload::Primitive(value);
    }
}

/// What an operation does to its parent container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Set a key in a map container.
    Assign { key: String, item: Payload },
    /// Overwrite an existing live slot of a list container.
    ListAssign { index: usize, item: Payload },
    /// Insert a new slot into a list container.
    Insert {
        /// The element this one is inserted after (None = head of list).
        anchor: Option<Id>,
        item: Payload,
    },
    /// Tombstone an element of a container.
    Delete { target: Id },
}

/// One causally identified edit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Identity of the operation and of the item it introduces.
    pub id: Id,
    /// An operation that must be visible before this one applies.
    pub dep: Option<Id>,
    /// The container being edited.
    pub parent: Id,
    pub action: Action,
}

impl Operation {
    /// The item introduced by this operation, if it introduces one.
    pub fn item(&self) -> Option<&Payload> {
        return match &self.action {
            Action::Assign { item, .. } => Some(item),
            Action::ListAssign { item, .. } => Some(item),
            Action::Insert { item, .. } => Some(item),
            Action::Delete { .. } => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyPub;
    use serde_json::json;

    fn id(clock: u64) -> Id {
        return Id::new(clock, KeyPub([1; 32]));
    }

    #[test]
    fn payload_shapes() {
        assert_eq!(Payload::Map.shape(), Some(Shape::Map));
        assert_eq!(Payload::List.shape(), Some(Shape::List));
        assert_eq!(Payload::from(json!(3)).shape(), None);
    }

    #[test]
    fn delete_has_no_item() {
        let op = Operation {
            id: id(2),
            dep: Some(id(1)),
            parent: Id::ROOT_PARENT,
            action: Action::Delete { target: id(1) },
        };
        assert!(op.item().is_none());
    }

    #[test]
    fn insert_exposes_item() {
        let op = Operation {
            id: id(2),
            dep: None,
            parent: id(1),
            action: Action::Insert {
                anchor: None,
                item: Payload::List,
            },
        };
        assert_eq!(op.item(), Some(&Payload::List));
    }

    #[test]
    fn index_conversions() {
        assert_eq!(Index::from("users"), Index::Key("users".to_string()));
        assert_eq!(Index::from(3usize), Index::Pos(3));
    }

    #[test]
    fn operation_survives_json() {
        let op = Operation {
            id: id(4),
            dep: Some(id(3)),
            parent: id(2),
            action: Action::Assign {
                key: "name".to_string(),
                item: Payload::Primitive(json!({"nested": [1, 2]})),
            },
        };
        let text = serde_json::to_string(&op).unwrap();
        let back: Operation = serde_json::from_str(&text).unwrap();
        assert_eq!(back, op);
    }

    #[test]
    fn index_path_reads_naturally_in_json() {
        let path: Vec<Index> = serde_json::from_value(json!(["users", 0, "name"])).unwrap();
        assert_eq!(path, vec![Index::from("users"), Index::from(0usize), Index::from("name")]);
    }
}
