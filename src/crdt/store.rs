// model = "claude-opus-4-5"
// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! The container arena.
//!
//! Every map or list in the document lives in one arena keyed by the
//! identity of the operation that created it. Entries refer to child
//! containers by identity only, so the arena is the sole owner and the
//! document forms a tree without any shared handles.
//!
//! ```text
//! ROOT_PARENT ─ Map { "root": Entry(id=A, Map) }
//! A           ─ Map { "users": Entry(id=B, List) }
//! B           ─ List [ Entry(id=C, "ann"), Entry(id=D, "bob", deleted) ]
//! ```

use rustc_hash::FxHashMap;
use serde_json::Value;

use super::op::Payload;
use super::op::Shape;
use super::primitives::Id;

/// The key under which `ROOT_PARENT` stores the document root.
pub const ROOT_KEY: &str = "root";

/// A slot inside a container.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    /// The operation that wrote this slot. Also names the child container
    /// when the payload is a map or list.
    pub id: Id,
    pub payload: Payload,
    /// Tombstone flag. Never cleared once set.
    pub deleted: bool,
}

impl Entry {
    /// A live entry.
    pub fn new(id: Id, payload: Payload) -> Entry {
        return Entry {
            id,
            payload,
            deleted: false,
        };
    }

    /// Whether this entry is still visible.
    #[inline]
    pub fn is_live(&self) -> bool {
        return !self.deleted;
    }

    /// The same entry, tombstoned.
    pub fn tombstoned(&self) -> Entry {
        return Entry {
            deleted: true,
            ..self.clone()
        };
    }
}

/// A map or list container. The variant is chosen once, at creation.
#[derive(Clone, Debug, PartialEq)]
pub enum Container {
    Map(FxHashMap<String, Entry>),
    List(Vec<Entry>),
}

impl Container {
    /// An empty container of the given shape.
    pub fn empty(shape: Shape) -> Container {
        return match shape {
            Shape::Map => Container::Map(FxHashMap::default()),
            Shape::List => Container::List(Vec::new()),
        };
    }

    pub fn shape(&self) -> Shape {
        return match self {
            Container::Map(_) => Shape::Map,
            Container::List(_) => Shape::List,
        };
    }
}

/// Arena mapping identities to containers, rooted at `Id::ROOT_PARENT`.
#[derive(Clone, Debug, PartialEq)]
pub struct Store {
    containers: FxHashMap<Id, Container>,
}

impl Store {
    /// A store holding only the root slot, which starts out absent.
    pub fn new() -> Store {
        let mut root_parent = FxHashMap::default();
        root_parent.insert(
            ROOT_KEY.to_string(),
            Entry {
                id: Id::ROOT,
                payload: Payload::Primitive(Value::Null),
                deleted: true,
            },
        );
        let mut containers = FxHashMap::default();
        containers.insert(Id::ROOT_PARENT, Container::Map(root_parent));
        return Store { containers };
    }

    /// Look up a container by identity.
    pub fn get(&self, id: &Id) -> Option<&Container> {
        return self.containers.get(id);
    }

    pub(crate) fn get_mut(&mut self, id: &Id) -> Option<&mut Container> {
        return self.containers.get_mut(id);
    }

    /// Create the child container for an item, if the item is one.
    ///
    /// Identities are unique across the log, so an existing container under
    /// `id` is left untouched.
    pub(crate) fn create_child(&mut self, id: Id, payload: &Payload) {
        if let Some(shape) = payload.shape() {
            self.containers
                .entry(id)
                .or_insert_with(|| Container::empty(shape));
        }
    }

    /// Number of containers in the arena, including `ROOT_PARENT`.
    pub fn len(&self) -> usize {
        return self.containers.len();
    }

    /// Never true: `ROOT_PARENT` always exists.
    pub fn is_empty(&self) -> bool {
        return self.containers.is_empty();
    }
}

impl Default for Store {
    fn default() -> Self {
        return Self::new();
    }
}
