// model = "claude-opus-4-5"
// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Read-only views of the arena: path resolution and materialization.

use serde_json::Map;
use serde_json::Value;

use super::error::Error;
use super::list;
use super::op::Index;
use super::op::Payload;
use super::primitives::Id;
use super::store::Container;
use super::store::Entry;
use super::store::ROOT_KEY;
use super::store::Store;

impl Store {
    /// The live entry at one logical index of a container.
    ///
    /// `None` if the container does not exist, the index has the wrong kind
    /// for the container, or the slot is missing or tombstoned.
    pub fn entry(&self, container: &Id, index: &Index) -> Option<&Entry> {
        let entry = match (self.get(container)?, index) {
            (Container::Map(map), Index::Key(key)) => map.get(key)?,
            (Container::List(entries), Index::Pos(pos)) => list::live_at(entries, *pos)?,
            _ => return None,
        };
        if !entry.is_live() {
            return None;
        }
        return Some(entry);
    }

    /// The live document root entry.
    pub fn root(&self) -> Option<&Entry> {
        return self.entry(&Id::ROOT_PARENT, &Index::Key(ROOT_KEY.to_string()));
    }

    /// Resolve a path of logical indices to the identity it addresses.
    ///
    /// Paths start below the document root: the empty path is the root
    /// itself, `["users", 0]` is the first live element of its `users` list.
    pub fn resolve(&self, path: &[Index]) -> Option<Id> {
        let mut current = self.root()?.id;
        for index in path {
            current = self.entry(&current, index)?.id;
        }
        return Some(current);
    }

    /// Resolve the container holding the last element of `path`.
    pub fn resolve_parent(&self, path: &[Index]) -> Result<Id, Error> {
        let addressing = || Error::Addressing {
            path: path.to_vec(),
        };
        let (_, parent) = path.split_last().ok_or_else(addressing)?;
        let id = self.resolve(parent).ok_or_else(addressing)?;
        if self.get(&id).is_none() {
            return Err(addressing());
        }
        return Ok(id);
    }

    /// Materialize the document as a plain value, dropping tombstones.
    ///
    /// An absent or deleted root renders as `null`.
    pub fn render(&self) -> Value {
        return match self.root() {
            Some(root) => self.render_entry(root),
            None => Value::Null,
        };
    }

    fn render_entry(&self, entry: &Entry) -> Value {
        return match &entry.payload {
            Payload::Primitive(value) => value.clone(),
            Payload::Map | Payload::List => self.render_container(&entry.id),
        };
    }

    fn render_container(&self, id: &Id) -> Value {
        return match self.get(id) {
            Some(Container::Map(map)) => {
                let mut out = Map::new();
                for (key, entry) in map.iter().filter(|(_, e)| e.is_live()) {
                    out.insert(key.clone(), self.render_entry(entry));
                }
                Value::Object(out)
            }
            Some(Container::List(entries)) => {
                Value::Array(list::live(entries).map(|e| self.render_entry(e)).collect())
            }
            // Unreachable while the arena is built by `apply`, which creates
            // a container for every map or list entry it writes.
            None => Value::Null,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crdt::apply::apply;
    use crate::crdt::op::Action;
    use crate::crdt::op::Operation;
    use crate::key::KeyPub;
    use serde_json::json;

    fn id(clock: u64) -> Id {
        return Id::new(clock, KeyPub([1; 32]));
    }

    fn run(store: &mut Store, clock: u64, parent: Id, action: Action) {
        let op = Operation {
            id: id(clock),
            dep: None,
            parent,
            action,
        };
        apply(store, &op).unwrap();
    }

    fn assign(key: &str, item: Payload) -> Action {
        return Action::Assign {
            key: key.to_string(),
            item,
        };
    }

    fn insert(anchor: Option<Id>, item: Payload) -> Action {
        return Action::Insert { anchor, item };
    }

    /// { "users": [ { "name": "ann" }, "bob" ], "n": 1 }
    fn sample() -> Store {
        let mut store = Store::new();
        run(&mut store, 1, Id::ROOT_PARENT, assign(ROOT_KEY, Payload::Map));
        run(&mut store, 2, id(1), assign("users", Payload::List));
        run(&mut store, 3, id(2), insert(None, Payload::Map));
        run(&mut store, 4, id(3), assign("name", json!("ann").into()));
        run(&mut store, 5, id(2), insert(Some(id(3)), json!("bob").into()));
        run(&mut store, 6, id(1), assign("n", json!(1).into()));
        return store;
    }

    #[test]
    fn empty_store_renders_null() {
        assert_eq!(Store::new().render(), Value::Null);
        assert_eq!(Store::new().resolve(&[]), None);
    }

    #[test]
    fn renders_nested_document() {
        let store = sample();
        assert_eq!(
            store.render(),
            json!({ "users": [ { "name": "ann" }, "bob" ], "n": 1 })
        );
    }

    #[test]
    fn resolve_walks_path() {
        let store = sample();
        assert_eq!(store.resolve(&[]), Some(id(1)));
        assert_eq!(store.resolve(&["users".into()]), Some(id(2)));
        assert_eq!(store.resolve(&["users".into(), 0usize.into()]), Some(id(3)));
        assert_eq!(store.resolve(&["users".into(), 0usize.into(), "name".into()]), Some(id(4)));
        assert_eq!(store.resolve(&["users".into(), 1usize.into()]), Some(id(5)));
    }

    #[test]
    fn resolve_rejects_bad_paths() {
        let store = sample();
        assert_eq!(store.resolve(&["missing".into()]), None);
        assert_eq!(store.resolve(&["users".into(), 2usize.into()]), None);
        // Wrong index kind for the container.
        assert_eq!(store.resolve(&["users".into(), "0".into()]), None);
        assert_eq!(store.resolve(&[0usize.into()]), None);
        // Walking below a leaf.
        assert_eq!(store.resolve(&["n".into(), "x".into()]), None);
    }

    #[test]
    fn tombstones_hide_entries_and_shift_positions() {
        let mut store = sample();
        run(&mut store, 7, id(2), Action::Delete { target: id(3) });
        assert_eq!(store.render(), json!({ "users": ["bob"], "n": 1 }));
        assert_eq!(store.resolve(&["users".into(), 0usize.into()]), Some(id(5)));

        run(&mut store, 8, id(1), Action::Delete { target: id(6) });
        assert_eq!(store.resolve(&["n".into()]), None);
        assert_eq!(store.render(), json!({ "users": ["bob"] }));
    }

    #[test]
    fn resolve_parent_requires_container() {
        let store = sample();
        assert_eq!(store.resolve_parent(&["users".into(), 0usize.into()]), Ok(id(2)));
        assert_eq!(store.resolve_parent(&["users".into()]), Ok(id(1)));
        assert!(store.resolve_parent(&[]).unwrap_err().is_addressing());
        assert!(store.resolve_parent(&["n".into(), "x".into()]).unwrap_err().is_addressing());
        assert!(store.resolve_parent(&["nope".into(), "x".into()]).unwrap_err().is_addressing());
    }

    #[test]
    fn deleted_root_renders_null() {
        let mut store = sample();
        run(&mut store, 7, Id::ROOT_PARENT, Action::Delete { target: id(1) });
        assert_eq!(store.render(), Value::Null);
        assert_eq!(store.resolve(&[]), None);
    }
}
