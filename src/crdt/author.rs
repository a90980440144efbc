// model = "claude-opus-4-5"
// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Building new operations against a replica.
//!
//! An `Author` turns user-facing paths into operations stamped for its
//! site. Each operation takes the replica's next clock and depends on the
//! replica's latest operation, so it is causally after everything the
//! author could see. Submit an authored operation to the replica before
//! authoring the next one; otherwise both would carry the same identity.
//!
//! ```
//! use replica::crdt::author::Author;
//! use replica::crdt::op::Payload;
//! use replica::crdt::state::State;
//! use replica::key::KeyPub;
//! use serde_json::json;
//!
//! let author = Author::new(KeyPub::generate());
//! let mut doc = State::new();
//!
//! let op = author.set_root(&doc, Payload::Map);
//! doc.submit(vec![op]).unwrap();
//! let op = author.assign(&doc, &["title".into()], json!("hello").into()).unwrap();
//! doc.submit(vec![op]).unwrap();
//!
//! assert_eq!(doc.render(), json!({ "title": "hello" }));
//! ```

use super::error::Error;
use super::list;
use super::op::Action;
use super::op::Index;
use super::op::Operation;
use super::op::Payload;
use super::primitives::Id;
use super::state::State;
use super::store::Container;
use super::store::ROOT_KEY;
use crate::key::KeyPub;

/// Authors operations on behalf of one site.
#[derive(Clone, Debug)]
pub struct Author {
    site: KeyPub,
}

impl Author {
    pub fn new(site: KeyPub) -> Author {
        return Author { site };
    }

    pub fn site(&self) -> &KeyPub {
        return &self.site;
    }

    fn stamp(&self, state: &State, parent: Id, action: Action) -> Operation {
        return Operation {
            id: Id::new(state.next_clock(), self.site),
            dep: state.latest_identity(),
            parent,
            action,
        };
    }

    /// Replace the document root.
    pub fn set_root(&self, state: &State, item: Payload) -> Operation {
        let action = Action::Assign {
            key: ROOT_KEY.to_string(),
            item,
        };
        return self.stamp(state, Id::ROOT_PARENT, action);
    }

    /// Write `item` at `path`.
    ///
    /// A key under a map becomes an `Assign`; a position in a list
    /// overwrites that live element with a `ListAssign`.
    pub fn assign(&self, state: &State, path: &[Index], item: Payload) -> Result<Operation, Error> {
        let parent = state.resolve_parent(path)?;
        let action = match (path.last(), state.store().get(&parent)) {
            (Some(Index::Key(key)), Some(Container::Map(_))) => Action::Assign {
                key: key.clone(),
                item,
            },
            (Some(Index::Pos(index)), Some(Container::List(entries)))
                if *index < list::live_len(entries) =>
            {
                Action::ListAssign {
                    index: *index,
                    item,
                }
            }
            _ => return Err(addressing(path)),
        };
        return Ok(self.stamp(state, parent, action));
    }

    /// Append `item` to the list at `path`.
    ///
    /// Only appends are authored. An insert goes after its anchor and then
    /// past every following element with a smaller identity, and everything
    /// a replica has seen sorts below the identity it stamps next, so a
    /// locally authored insert lands at the end of the list regardless of
    /// its anchor.
    pub fn push(&self, state: &State, path: &[Index], item: Payload) -> Result<Operation, Error> {
        let Some(parent) = state.resolve(path) else {
            return Err(addressing(path));
        };
        let Some(Container::List(entries)) = state.store().get(&parent) else {
            return Err(addressing(path));
        };
        let anchor = list::live(entries).last().map(|e| e.id);
        return Ok(self.stamp(state, parent, Action::Insert { anchor, item }));
    }

    /// Tombstone the element at `path`.
    pub fn delete(&self, state: &State, path: &[Index]) -> Result<Operation, Error> {
        let parent = state.resolve_parent(path)?;
        let Some(target) = state.resolve(path) else {
            return Err(addressing(path));
        };
        return Ok(self.stamp(state, parent, Action::Delete { target }));
    }
}

fn addressing(path: &[Index]) -> Error {
    return Error::Addressing {
        path: path.to_vec(),
    };
}
