// model = "claude-opus-4-5"
// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Applying a single operation to the container arena.
//!
//! The interpreter does not know about the log or causality; the replay
//! engine decides *whether* an operation runs, this module decides *what*
//! it does. An operation that cannot take effect yet (its parent container
//! or insert anchor is missing, or a list overwrite is past the live end)
//! is skipped without error. The only failure is a shape mismatch.

use tracing::trace;

use super::error::Error;
use super::list;
use super::op::Action;
use super::op::Operation;
use super::op::Shape;
use super::store::Container;
use super::store::Entry;
use super::store::Store;

/// Apply one operation to the store.
pub fn apply(store: &mut Store, op: &Operation) -> Result<(), Error> {
    let Some(container) = store.get_mut(&op.parent) else {
        trace!(op = ?op.id, parent = ?op.parent, "parent container missing, skipping");
        return Ok(());
    };

    let created = match (&op.action, container) {
        (Action::Assign { key, item }, Container::Map(map)) => {
            map.insert(key.clone(), Entry::new(op.id, item.clone()));
            Some(item)
        }
        (Action::ListAssign { index, item }, Container::List(entries)) => {
            let entry = Entry::new(op.id, item.clone());
            match list::overwrite_at(entries, *index, entry) {
                Some(_) => Some(item),
                None => {
                    trace!(op = ?op.id, index, "list slot out of range, skipping");
                    None
                }
            }
        }
        (Action::Insert { anchor, item }, Container::List(entries)) => {
            match list::insertion_point(entries, anchor.as_ref(), &op.id) {
                Some(at) => {
                    list::splice_insert(entries, at, Entry::new(op.id, item.clone()));
                    Some(item)
                }
                None => {
                    trace!(op = ?op.id, anchor = ?anchor, "insert anchor missing, skipping");
                    None
                }
            }
        }
        (Action::Delete { target }, Container::Map(map)) => {
            if let Some(entry) = map.values_mut().find(|e| e.id == *target) {
                *entry = entry.tombstoned();
            }
            None
        }
        (Action::Delete { target }, Container::List(entries)) => {
            if let Some(at) = list::position_of(entries, target) {
                entries[at] = entries[at].tombstoned();
            }
            None
        }
        (Action::Assign { .. }, found) => {
            return Err(conflict(op, Shape::Map, found.shape()));
        }
        (Action::ListAssign { .. } | Action::Insert { .. }, found) => {
            return Err(conflict(op, Shape::List, found.shape()));
        }
    };

    if let Some(item) = created {
        store.create_child(op.id, item);
    }
    return Ok(());
}

fn conflict(op: &Operation, expected: Shape, found: Shape) -> Error {
    return Error::StructuralConflict {
        op: op.id,
        parent: op.parent,
        expected,
        found,
    };
}
